pub mod camera;
pub mod canvas;

pub use camera::{CameraMove, CameraPath, CropWindow, MoveKind};
pub use canvas::WorkingCanvas;
