pub mod bus;
pub mod looping;
pub mod sink;
pub mod sound;
