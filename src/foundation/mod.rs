pub mod core;
pub mod error;
pub mod frame;
pub mod math;
