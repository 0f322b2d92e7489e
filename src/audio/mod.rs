pub mod manifest;
pub mod mix;

pub use manifest::{AudioManifest, AudioSegment, BackgroundMix, build_audio_manifest};
pub use mix::{mix_manifest, write_mix_to_f32le_file};
