pub mod combat;
pub mod level;
pub mod levels;
pub mod reset;
#[allow(clippy::module_inception)]
pub mod world;

pub use level::{Enemy, Level};
pub use levels::level_one;
pub use world::World;
