use wasm_bindgen::prelude::*;
use boxtruck_engine::*;

mod assembly;
mod collision;
mod game;
mod input;
mod level;
mod thrower;
mod truck;

use game::BoxTruck;

boxtruck_web::export_game!(BoxTruck, "box-truck");
