pub mod ffmpeg;
pub mod sink;

pub use ffmpeg::{EncoderSettings, FfmpegSink, FfmpegSinkOpts};
pub use sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
