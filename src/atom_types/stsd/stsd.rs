//! Sample description atom (`stsd`).
//!
//! Location: `moov/trak/mdia/minf/stbl/stsd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/sample_description_atom>

use binrw::BinRead;

use super::SampleDescription;

/// Sample description atom (`stsd`).
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Stsd {
    _version: u8,
    _flags: [u8; 3],
    _no_of_entries: u32,
    #[br(count = _no_of_entries)]
    descriptions: Vec<SampleDescription>
}

impl Stsd {
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    pub fn descriptions(&self) -> &[SampleDescription] {
        &self.descriptions
    }

    /// Returns the first video sample description.
    /// Falls back to the first description with a format
    /// that is neither a known video nor a known audio codec.
    pub fn video(&self) -> Option<&SampleDescription> {
        self.descriptions.iter()
            .find(|s| s.is_video())
            .or_else(|| self.first_other())
    }

    /// Returns the first audio sample description.
    /// Falls back to the first description with a format
    /// that is neither a known video nor a known audio codec.
    pub fn audio(&self) -> Option<&SampleDescription> {
        self.descriptions.iter()
            .find(|s| s.is_audio())
            .or_else(|| self.first_other())
    }

    fn first_other(&self) -> Option<&SampleDescription> {
        self.descriptions.iter()
            .find(|s| s.data_format().is_other())
    }
}
