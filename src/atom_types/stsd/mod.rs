mod stsd;
mod format;
mod video;
mod audio;
mod sample;

pub use stsd::Stsd;
pub use sample::SampleDescription;
pub use format::{DataFormat, AudioFormat, VideoFormat};
pub use video::Video;
pub use audio::{Audio, SoundV1};
