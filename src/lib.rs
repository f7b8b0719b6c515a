//! Per-track sample indexing for MP4 and QuickTime files.
//!
//! Locates the `moov` atom, parses its atom tree, and rebuilds
//! a flat sample index for each audio and video track: absolute
//! byte offset, size and decode timestamp for every sample, plus
//! keyframe flag and composition offset for video.
//! Sample data in `mdat` is never read, and nothing is decoded.
//!
//! The implementation was mostly done with help from
//! <https://developer.apple.com/documentation/quicktime-file-format>
//!
//! ```rs
//! use std::io::Cursor;
//!
//! fn main() -> Result<(), mp4index::Mp4Error> {
//!     let bytes = std::fs::read("VIDEO.MP4")?;
//!     let movie = mp4index::parse(&mut Cursor::new(bytes))?;
//!
//!     println!("{:?}", movie.duration());
//!     for track in movie.tracks() {
//!         for sample in track.samples() {
//!             println!("{} @ {} ({} bytes)", sample.timestamp(), sample.offset(), sample.size());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod mp4;
pub mod movie;
pub mod fourcc;
pub mod atom;
pub mod atom_types;
pub mod consts;
pub mod track;
pub mod errors;
pub mod reader;
pub(crate) mod support;

#[cfg(test)]
mod tests;

pub use mp4::{Mp4, Mp4Options, parse};
pub use movie::Movie;
pub use fourcc::FourCC;
pub use atom::{Atom, AtomBody, AtomHeader, Children};
pub use atom_types::{
    Co64,
    Ctts,
    Hdlr,
    Mdhd,
    Mvhd,
    Stco,
    Stsc,
    Stsd,
    Stss,
    Stsz,
    Stts,
    Tkhd,
    AudioFormat, // stsd component
    VideoFormat, // stsd component
    SampleDescription, // stsd component
};
pub use track::{
    Track,
    TrackKind,
    AudioInfo,
    VideoInfo,
    Sample,
    AudioSample,
    VideoSample,
    SampleTables,
    SampleTableBuilder,
};
pub use reader::{ByteSource, FileSource, locate_moov};
pub use consts::{CONTAINER, mp4_time_zero};
pub use errors::Mp4Error;
