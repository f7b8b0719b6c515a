//! Various MP4-related errors.

use thiserror::Error;

/// Various MP4 read/parse errors.
#[derive(Debug, Error)]
pub enum Mp4Error {
    /// Converted `BinResult` error.
    /// Typically a leaf atom whose payload is
    /// too short for its fixed layout.
    #[error("{0}")]
    BinReadError(#[from] binrw::Error),
    /// IO error
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    /// Converted `TryFromIntError`,
    /// e.g. an atom size that does not fit in `usize`.
    #[error("{0}")]
    IntConversionError(#[from] std::num::TryFromIntError),
    /// Byte source returned fewer bytes than requested.
    #[error("Read {got} bytes @ offset {offset}, expected {expected} bytes.")]
    ReadMismatch{got: u64, expected: u64, offset: u64},
    /// Atom mismatch, e.g. decoding an `stsz` atom as `stts`.
    #[error("Atom mismatch. Expected '{expected}', got '{got}'")]
    AtomMismatch{got: String, expected: String},
    /// Atom size is smaller than its own header,
    /// or the atom extends past its parent/buffer.
    #[error("Unexpected MP4 atom size of {len} bytes @ offset {offset}.")]
    UnexpectedAtomSize{len: u64, offset: u64},
    /// No such atom.
    #[error("No such atom {0}.")]
    NoSuchAtom(String),
    /// Exceeded recurse depth when parsing nested container atoms.
    #[error("Recurse depth {0} exceeds max recurse depth {1}")]
    RecurseDepthExceeded(usize, usize),
    /// Top-level scan reached end of file without
    /// finding the `moov` atom.
    #[error("Failed to locate 'moov' atom.")]
    MoovReadError,
    /// Track has samples but neither `stco` nor `co64`
    /// lists any chunk offsets.
    #[error("Track has {samples} samples, but no chunk offsets ('stco'/'co64').")]
    MissingChunkOffsets{samples: usize},
    /// A sample table is too short for the number of samples
    /// implied by the time to sample table.
    #[error("Sample table '{table}' has {len} entries, but sample index {index} was requested.")]
    SampleCountMismatch{table: &'static str, len: usize, index: usize},
}

/// Converts Mp4Error to std::io::Error
impl From<Mp4Error> for std::io::Error {
    fn from(err: Mp4Error) -> Self {
        match err {
            Mp4Error::IOError(e) => e,
            e => std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        }
    }
}
