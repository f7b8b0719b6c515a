//! Random access byte sources and the top-level scan for `moov`.

use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek, SeekFrom},
    path::Path,
};

use tracing::{debug, trace};

use crate::{
    atom::{HEADER_SIZE, HEADER_SIZE_64BIT},
    Atom, AtomHeader, FourCC, Mp4Error,
};

/// Random access, read-only view of an MP4.
pub trait ByteSource {
    /// Total size in bytes.
    fn len(&self) -> u64;

    /// Reads up to `buf.len()` bytes starting at absolute `offset`.
    /// Returns the number of bytes read, `0` at or past the end.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Mp4Error>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fills `buf` from absolute `offset`.
    /// Raises `Mp4Error::ReadMismatch` if the source
    /// runs out of bytes first.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Mp4Error> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read_at(offset + filled as u64, &mut buf[filled ..])?;
            if n == 0 {
                return Err(Mp4Error::ReadMismatch{
                    got: filled as u64,
                    expected: buf.len() as u64,
                    offset
                })
            }
            filled += n;
        }
        Ok(())
    }
}

/// `BufReader` over a `File`.
#[derive(Debug)]
pub struct FileSource {
    /// File size.
    len: u64,
    reader: BufReader<File>,
}

impl FileSource {
    /// Opens the file at `path` with
    /// default buffer capacity (8KiB).
    pub fn open(path: &Path) -> Result<Self, Mp4Error> {
        Self::with_capacity(File::open(path)?, None)
    }

    pub fn new(file: File) -> Result<Self, Mp4Error> {
        Self::with_capacity(file, None)
    }

    /// Buffer capacity defaults to 8KiB if `capacity` is `None`.
    pub fn with_capacity(file: File, capacity: Option<usize>) -> Result<Self, Mp4Error> {
        let len = file.metadata()?.len();
        let reader = match capacity {
            Some(cap) => BufReader::with_capacity(cap, file),
            None => BufReader::new(file),
        };
        Ok(Self{len, reader})
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Mp4Error> {
        if offset >= self.len {
            return Ok(0)
        }
        self.reader.seek(SeekFrom::Start(offset))?;
        Ok(self.reader.read(buf)?)
    }
}

/// In-memory MP4, e.g. `Cursor<Vec<u8>>` or `Cursor<&[u8]>`.
impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn len(&self) -> u64 {
        self.get_ref().as_ref().len() as u64
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Mp4Error> {
        self.set_position(offset);
        Ok(self.read(buf)?)
    }
}

/// Reads the atom header at `offset`.
///
/// A 32-bit size of `0` is resolved to the remainder of the source.
fn read_header<S: ByteSource>(source: &mut S, offset: u64) -> Result<AtomHeader, Mp4Error> {
    let mut buf = [0_u8; HEADER_SIZE_64BIT as usize];
    source.read_exact_at(offset, &mut buf[.. HEADER_SIZE as usize])?;

    // 64-bit size follows FourCC
    let header_len = match buf[.. 4] == [0, 0, 0, 1] {
        true => {
            source.read_exact_at(offset + HEADER_SIZE, &mut buf[HEADER_SIZE as usize ..])?;
            HEADER_SIZE_64BIT as usize
        },
        false => HEADER_SIZE as usize,
    };

    let mut header = AtomHeader::parse(&buf[.. header_len], offset)?;
    if header.atom_size == 0 && !header.size_64bit {
        header.atom_size = source.len() - offset;
    }

    if header.atom_size < header.header_size() {
        return Err(Mp4Error::UnexpectedAtomSize{len: header.atom_size, offset})
    }

    Ok(header)
}

/// Scans top-level atoms from the start of the source
/// and returns the `moov` atom, with all nested atoms parsed.
///
/// Only headers are read for other top-level atoms (e.g. `mdat`).
/// Returns `None` if the scan reaches the end of the source
/// without finding `moov`.
pub fn locate_moov<S: ByteSource>(source: &mut S) -> Result<Option<Atom>, Mp4Error> {
    let len = source.len();
    let mut offset = 0;

    while offset < len {
        let header = read_header(source, offset)?;

        trace!(offset, name = %header.name, size = header.atom_size, "top-level atom");

        if header.name == FourCC::Moov {
            let available = len.saturating_sub(header.data_offset());
            if header.data_size() > available {
                return Err(Mp4Error::ReadMismatch{
                    got: available,
                    expected: header.data_size(),
                    offset: header.data_offset(),
                })
            }

            let mut data = vec![0_u8; usize::try_from(header.data_size())?];
            source.read_exact_at(header.data_offset(), &mut data)?;

            debug!(offset, size = header.atom_size, "located moov");

            return Atom::new(header, data).map(Some)
        }

        match offset.checked_add(header.atom_size) {
            Some(next) if next < len => offset = next,
            _ => break,
        }
    }

    debug!(len, "no moov atom");

    Ok(None)
}
