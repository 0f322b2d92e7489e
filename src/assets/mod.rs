pub mod font;
pub mod image;
pub mod media;
