pub mod animation;
pub mod entity;
pub mod layer;
pub mod vitals;
