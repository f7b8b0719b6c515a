mod track;
mod sample;
mod tables;
mod builder;

pub use track::{Track, TrackKind, AudioInfo, VideoInfo};
pub use sample::{Sample, AudioSample, VideoSample};
pub use tables::SampleTables;
pub use builder::SampleTableBuilder;
