use std::{io::Cursor, ops::Range};

use binrw::{BinRead, BinReaderExt};

use crate::{FourCC, Mp4Error, CONTAINER};

/// Size of a regular atom header in bytes.
pub const HEADER_SIZE: u64 = 8;
/// Size of an atom header with a 64-bit size field in bytes.
pub const HEADER_SIZE_64BIT: u64 = 16;

/// The first 8 bytes of every atom.
#[derive(Debug, BinRead)]
#[br(big)]
struct RawHeader {
    size: u32,
    name: [u8; 4],
}

/// Atom header.
/// 8 or 16 bytes in MP4, depending on whether
/// 32 or 64-bit sized.
///
/// ```ignore
/// | [X X X X] [Y Y Y Y] [Z Z Z Z Z Z Z Z] |
///    |         |         |
///    |         |         64bit size (optional, only if 32 bit size == 1)
///    |         FourCC
///    32bit size
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomHeader {
    /// Total atom size in bytes including 8/16 byte header.
    /// `0` only for a top-level atom that extends
    /// to the end of the file.
    pub(crate) atom_size: u64,
    /// FourCC
    pub(crate) name: FourCC,
    /// Absolute byte offset for start of atom in MP4,
    /// i.e. byte offset for its header,
    /// starting with 32-bit size.
    pub(crate) offset: u64,
    /// Set to `true` if atom size is specified
    /// in the 64 bit area, i.e. the 32bit size
    /// is set to `1`.
    pub(crate) size_64bit: bool
}

impl AtomHeader {
    /// Parses the header at the start of `bytes`, where `offset`
    /// is the absolute position of `bytes[0]` in the MP4.
    ///
    /// `bytes` must hold at least 8 bytes, or 16 if the atom
    /// uses a 64-bit size. The declared size is not validated
    /// against any bounds.
    pub(crate) fn parse(bytes: &[u8], offset: u64) -> Result<Self, Mp4Error> {
        if (bytes.len() as u64) < HEADER_SIZE {
            return Err(Mp4Error::UnexpectedAtomSize{len: bytes.len() as u64, offset})
        }

        let mut cursor = Cursor::new(bytes);
        let raw = cursor.read_be::<RawHeader>()?;

        let mut header = Self {
            atom_size: raw.size as u64,
            name: FourCC::from_slice(&raw.name),
            offset,
            size_64bit: false,
        };

        // Check if atom size is 64bit and read the 8 bytes
        // following directly after FourCC as new size if so
        if raw.size == 1 {
            if (bytes.len() as u64) < HEADER_SIZE_64BIT {
                return Err(Mp4Error::UnexpectedAtomSize{len: bytes.len() as u64, offset})
            }
            header.atom_size = cursor.read_be::<u64>()?;
            header.size_64bit = true;
        }

        Ok(header)
    }

    /// Convenience method to check whether atom
    /// is a container or not.
    pub fn is_container(&self) -> bool {
        CONTAINER.contains(&self.name)
    }

    pub fn start(&self) -> u64 {
        self.offset
    }

    pub fn end(&self) -> u64 {
        self.offset + self.atom_size
    }

    pub fn atom_size(&self) -> u64 {
        self.atom_size
    }

    pub fn name(&self) -> &FourCC {
        &self.name
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Header size in bytes in MP4.
    /// Returns 8 or 16 bytes.
    pub fn header_size(&self) -> u64 {
        match self.size_64bit {
            true => HEADER_SIZE_64BIT,
            false => HEADER_SIZE,
        }
    }

    /// Data load absolute offset,
    /// i.e. position after header
    /// adjusted for optional 64bit size value.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_size()
    }

    /// Size of data load, adjusted for header size
    /// (excludes header size).
    pub fn data_size(&self) -> u64 {
        self.atom_size.saturating_sub(self.header_size())
    }

    /// Returns start, end offset range for atom.
    pub fn bounds(&self) -> Range<u64> {
        self.offset .. self.end()
    }

    /// Returns `true` is absolute offset `pos`
    /// is contained within atom span.
    /// I.e `start_of_atom <= pos < end_of_atom`.
    pub fn contains(&self, pos: u64) -> bool {
        self.bounds().contains(&pos)
    }
}
