use wasm_bindgen::prelude::*;
use pollo_core::*;

pollo_web::export_game!(World, "pollo-loco");
