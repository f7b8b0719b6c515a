use binrw::{helpers::until_eof, BinRead};

/// Sound sample description fields, following the
/// general sample description header.
///
/// Version 1 descriptions carry four additional fields
/// before any extensions. Version 2 layouts are not decoded,
/// their fields end up in `extensions`.
///
/// See: <https://developer.apple.com/documentation/quicktime-file-format/sound_sample_description_version_0>
#[derive(Debug, Clone, BinRead)]
#[br(big)]
pub struct Audio {
    version: u16,
    _revision_level: u16,
    vendor: u32,
    /// Number of sound channels, 1 = mono, 2 = stereo.
    channels: u16,
    /// Bits per sample.
    sample_size: u16,
    compression_id: i16,
    _packet_size: u16,
    /// Fixed point 16.16, samples per second.
    sample_rate: u32,
    #[br(if(version == 1))]
    v1: Option<SoundV1>,
    /// Extension atoms as raw bytes (e.g. `esds`, `dOps`, `dac3`).
    #[br(parse_with = until_eof)]
    extensions: Vec<u8>,
}

/// Additional fields for version 1 sound descriptions.
#[derive(Debug, Clone, Copy, BinRead)]
#[br(big)]
pub struct SoundV1 {
    pub samples_per_packet: u32,
    pub bytes_per_packet: u32,
    pub bytes_per_frame: u32,
    pub bytes_per_sample: u32,
}

impl Audio {
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn vendor(&self) -> u32 {
        self.vendor
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_size(&self) -> u16 {
        self.sample_size
    }

    pub fn compression_id(&self) -> i16 {
        self.compression_id
    }

    /// Sample rate in Hz, integer part of the 16.16 value.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate >> 16
    }

    /// Sample rate in Hz, including fractional part.
    pub fn sample_rate_f64(&self) -> f64 {
        self.sample_rate as f64 / 2_u32.pow(16) as f64
    }

    pub fn v1(&self) -> Option<&SoundV1> {
        self.v1.as_ref()
    }

    pub fn extensions(&self) -> &[u8] {
        self.extensions.as_slice()
    }

    pub(crate) fn into_extensions(self) -> Vec<u8> {
        self.extensions
    }
}
