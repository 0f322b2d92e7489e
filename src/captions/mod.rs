pub mod plan;
pub mod raster;

pub use plan::{CaptionStyle, WordOverlay, plan_captions};
pub use raster::{CaptionLayer, CaptionRenderer};
