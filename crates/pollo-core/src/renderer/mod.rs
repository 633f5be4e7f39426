pub mod camera;
pub mod draw_list;
pub mod surface;
