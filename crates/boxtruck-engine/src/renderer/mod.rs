pub mod instance;

pub use instance::{ShapeBuffer, ShapeGeometry, ShapeInstance};
