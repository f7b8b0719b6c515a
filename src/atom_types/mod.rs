//! Decoders for the leaf atoms needed to index samples.
//! All values are big-endian.

mod co64;
mod ctts;
mod hdlr;
mod mdhd;
mod mvhd;
mod stco;
mod stsc;
mod stsd;
mod stss;
mod stsz;
mod stts;
mod tkhd;

pub use co64::Co64;
pub use ctts::{Ctts, OffsetTableEntry};
pub use hdlr::{Hdlr, HandlerType};
pub use mdhd::Mdhd;
pub use mvhd::Mvhd;
pub use stco::Stco;
pub use stsc::{Stsc, SampleToChunk};
pub use stsd::{
    Stsd,
    SampleDescription,
    DataFormat,
    AudioFormat,
    VideoFormat,
    Audio,
    SoundV1,
    Video,
};
pub use stss::Stss;
pub use stsz::Stsz;
pub use stts::{Stts, TimeToSample};
pub use tkhd::Tkhd;
