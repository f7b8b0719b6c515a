//! Sample description. Part of `stsd` atom.

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt};

use crate::Mp4Error;

use super::{Audio, DataFormat, Video};

/// Size of the general fields shared by all sample descriptions.
const GENERAL_SIZE: u32 = 16;

/// A single sample description. The format specific fields
/// are kept as bytes and decoded on request via
/// [`SampleDescription::video`] or [`SampleDescription::audio`].
#[derive(Debug, Clone, BinRead)]
#[br(big)]
pub struct SampleDescription {
    /// Sample description size, including the general fields.
    size: u32,
    #[br(map = |fourcc: [u8; 4]| DataFormat::new(fourcc))]
    data_format: DataFormat,
    /// Reserved. Must be set to 0.
    _reserved: [u8; 6],
    data_reference_index: u16,
    #[br(count = size.saturating_sub(GENERAL_SIZE))]
    data: Vec<u8>,
}

impl SampleDescription {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn data_format(&self) -> &DataFormat {
        &self.data_format
    }

    pub fn data_reference_index(&self) -> u16 {
        self.data_reference_index
    }

    /// Format specific fields as raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_video(&self) -> bool {
        self.data_format.is_video()
    }

    pub fn is_audio(&self) -> bool {
        self.data_format.is_audio()
    }

    /// Decodes the format specific fields as a video description.
    /// Does not check the data format.
    pub fn video(&self) -> Result<Video, Mp4Error> {
        Ok(Cursor::new(&self.data).read_be::<Video>()?)
    }

    /// Decodes the format specific fields as a sound description.
    /// Does not check the data format.
    pub fn audio(&self) -> Result<Audio, Mp4Error> {
        Ok(Cursor::new(&self.data).read_be::<Audio>()?)
    }
}
