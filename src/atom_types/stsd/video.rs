use binrw::{helpers::until_eof, BinRead};

use crate::support::counted_string;

/// Video sample description fields, following the
/// general sample description header.
///
/// See: <https://developer.apple.com/documentation/quicktime-file-format/video_sample_description>
#[derive(Debug, Clone, BinRead)]
#[br(big)]
pub struct Video {
    _version: u16,
    _revision_level: u16,
    /// Developer of the compressor that generated the compressed data.
    vendor: u32,
    /// Degree of temporal compression.
    temporal_quality: u32,
    /// Degree of spatial compression.
    spatial_quality: u32,
    /// Width of the source image in pixels.
    width: u16,
    /// Height of the source image in pixels.
    height: u16,
    /// Fixed point 16.16, pixels per inch.
    horizontal_resolution: u32,
    /// Fixed point 16.16, pixels per inch.
    vertical_resolution: u32,
    _data_size: u32,
    /// Frames of compressed data stored in each sample.
    frame_count: u16,
    /// 32-byte Pascal string, e.g. "jpeg".
    #[br(map = |data: [u8; 32]| counted_string(&data, true))]
    compressor_name: String,
    /// Pixel depth of the compressed image.
    depth: i16,
    color_table_id: i16,
    /// Extension atoms as raw bytes (e.g. `avcC`, `hvcC`, `pasp`).
    #[br(parse_with = until_eof)]
    extensions: Vec<u8>,
}

impl Video {
    pub fn vendor(&self) -> u32 {
        self.vendor
    }

    pub fn temporal_quality(&self) -> u32 {
        self.temporal_quality
    }

    pub fn spatial_quality(&self) -> u32 {
        self.spatial_quality
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn horizontal_resolution(&self) -> f64 {
        self.horizontal_resolution as f64 / 2_u32.pow(16) as f64
    }

    pub fn vertical_resolution(&self) -> f64 {
        self.vertical_resolution as f64 / 2_u32.pow(16) as f64
    }

    pub fn frame_count(&self) -> u16 {
        self.frame_count
    }

    pub fn compressor_name(&self) -> &str {
        self.compressor_name.as_str()
    }

    pub fn depth(&self) -> i16 {
        self.depth
    }

    pub fn color_table_id(&self) -> i16 {
        self.color_table_id
    }

    pub fn extensions(&self) -> &[u8] {
        self.extensions.as_slice()
    }

    pub(crate) fn into_extensions(self) -> Vec<u8> {
        self.extensions
    }
}
