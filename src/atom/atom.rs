//! MP4 atom tree.
//!
//! An atom is either a container, holding child atoms grouped by FourCC,
//! or a leaf, holding its raw data load. Leaf data loads are only decoded
//! on request, via the method named after the atom's FourCC
//! (e.g. `Atom::stts()`).

use std::{collections::HashMap, io::Cursor};

use binrw::BinReaderExt;

use crate::{
    errors::Mp4Error,
    fourcc::FourCC,
    Co64, Ctts, Hdlr, Mdhd, Mvhd, Stco, Stsc, Stsd, Stss, Stsz, Stts, Tkhd,
};

use super::AtomHeader;

/// Max nesting level for container atoms.
pub const MAX_DEPTH: usize = 32;

/// MP4 atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Header
    pub(crate) header: AtomHeader,
    /// Child atoms or raw data load.
    pub(crate) body: AtomBody,
}

/// Atom content.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomBody {
    /// Nested atoms, for FourCC listed in `CONTAINER`.
    Container(Children),
    /// Undecoded data load (excludes header).
    Leaf(Vec<u8>),
}

/// Child atoms of a container, grouped by FourCC.
/// Atoms sharing a FourCC (e.g. multiple `trak`)
/// are kept in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Children(HashMap<FourCC, Vec<Atom>>);

impl Children {
    /// Parses `bytes` as a sequence of sibling atoms.
    /// `offset` is the absolute position of `bytes[0]` in the MP4.
    pub(crate) fn parse(bytes: &[u8], offset: u64, depth: usize) -> Result<Self, Mp4Error> {
        let mut children: HashMap<FourCC, Vec<Atom>> = HashMap::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let atom_offset = offset + pos as u64;
            let header = AtomHeader::parse(&bytes[pos ..], atom_offset)?;

            let remaining = (bytes.len() - pos) as u64;
            if header.atom_size < header.header_size() || header.atom_size > remaining {
                return Err(Mp4Error::UnexpectedAtomSize{
                    len: header.atom_size,
                    offset: atom_offset
                })
            }

            let size = usize::try_from(header.atom_size)?;
            let data = &bytes[pos + header.header_size() as usize .. pos + size];
            let atom = Atom::from_data(header, data, depth)?;

            children.entry(atom.header.name.to_owned())
                .or_default()
                .push(atom);

            pos += size;
        }

        Ok(Self(children))
    }

    /// Returns the first atom with specified FourCC.
    pub fn get(&self, name: &FourCC) -> Option<&Atom> {
        self.0.get(name)?.first()
    }

    /// Returns all atoms with specified FourCC, in file order.
    pub fn get_all(&self, name: &FourCC) -> &[Atom] {
        self.0.get(name)
            .map(|atoms| atoms.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of child atoms.
    pub fn len(&self) -> usize {
        self.0.values().map(|atoms| atoms.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over child atoms sorted on absolute offset.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        let mut atoms: Vec<&Atom> = self.0.values().flatten().collect();
        atoms.sort_by_key(|a| a.header.offset);
        atoms.into_iter()
    }
}

impl Atom {
    /// Builds an atom from its header and data load
    /// (the bytes directly after the header).
    pub(crate) fn new(header: AtomHeader, data: Vec<u8>) -> Result<Self, Mp4Error> {
        if header.is_container() {
            Self::from_data(header, &data, 0)
        } else {
            Ok(Self{header, body: AtomBody::Leaf(data)})
        }
    }

    fn from_data(header: AtomHeader, data: &[u8], depth: usize) -> Result<Self, Mp4Error> {
        let body = match header.is_container() {
            true => {
                if depth >= MAX_DEPTH {
                    return Err(Mp4Error::RecurseDepthExceeded(depth + 1, MAX_DEPTH))
                }
                AtomBody::Container(Children::parse(data, header.data_offset(), depth + 1)?)
            },
            false => AtomBody::Leaf(data.to_vec()),
        };

        Ok(Self{header, body})
    }

    pub fn header(&self) -> &AtomHeader {
        &self.header
    }

    pub fn body(&self) -> &AtomBody {
        &self.body
    }

    pub fn name(&self) -> &FourCC {
        &self.header.name
    }

    /// Total size of the atom in bytes.
    pub fn size(&self) -> u64 {
        self.header.atom_size
    }

    /// Child atoms, if this is a container.
    pub fn children(&self) -> Option<&Children> {
        match &self.body {
            AtomBody::Container(children) => Some(children),
            AtomBody::Leaf(_) => None,
        }
    }

    /// Raw data load, if this is a leaf atom.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.body {
            AtomBody::Container(_) => None,
            AtomBody::Leaf(data) => Some(data),
        }
    }

    /// Returns first child atom with specified FourCC.
    /// Always `None` for leaf atoms.
    pub fn find(&self, name: &FourCC) -> Option<&Atom> {
        self.children()?.get(name)
    }

    /// Returns all child atoms with specified FourCC,
    /// e.g. all `trak` in `moov`.
    pub fn find_all(&self, name: &FourCC) -> &[Atom] {
        match self.children() {
            Some(children) => children.get_all(name),
            None => &[],
        }
    }

    /// Descends one level per FourCC in `path`,
    /// following the first match on each level.
    ///
    /// ```ignore
    /// let stbl = trak.find_path(&[FourCC::Mdia, FourCC::Minf, FourCC::Stbl]);
    /// ```
    pub fn find_path(&self, path: &[FourCC]) -> Option<&Atom> {
        path.iter()
            .try_fold(self, |atom, name| atom.find(name))
    }

    /// Ensures user specified name (Four CC),
    /// matches that of current `Atom`.
    fn match_name(&self, name: &FourCC) -> Result<(), Mp4Error> {
        if &self.header.name != name {
            Err(Mp4Error::AtomMismatch{
                got: self.header.name.to_string(),
                expected: name.to_string()
            })
        } else {
            Ok(())
        }
    }

    /// Reader over the data load of a leaf atom
    /// with FourCC `name`.
    fn reader(&self, name: &FourCC) -> Result<Cursor<&[u8]>, Mp4Error> {
        self.match_name(name)?;
        self.data()
            .map(Cursor::new)
            .ok_or_else(|| Mp4Error::NoSuchAtom(name.to_string()))
    }

    /// Parse the atom into `Mvhd` (movie header) if `Atom.name` is `mvhd`.
    pub fn mvhd(&self) -> Result<Mvhd, Mp4Error> {
        Ok(self.reader(&FourCC::Mvhd)?.read_be::<Mvhd>()?)
    }

    /// Parse the atom into `Tkhd` (track header) if `Atom.name` is `tkhd`.
    pub fn tkhd(&self) -> Result<Tkhd, Mp4Error> {
        Ok(self.reader(&FourCC::Tkhd)?.read_be::<Tkhd>()?)
    }

    /// Parse the atom into `Mdhd` (media header) if `Atom.name` is `mdhd`.
    pub fn mdhd(&self) -> Result<Mdhd, Mp4Error> {
        Ok(self.reader(&FourCC::Mdhd)?.read_be::<Mdhd>()?)
    }

    /// Parse the atom into `Hdlr` (handler reference) if `Atom.name` is `hdlr`.
    pub fn hdlr(&self) -> Result<Hdlr, Mp4Error> {
        Ok(self.reader(&FourCC::Hdlr)?.read_be::<Hdlr>()?)
    }

    /// Parse the atom into `Stsd` (sample description) if `Atom.name` is `stsd`.
    pub fn stsd(&self) -> Result<Stsd, Mp4Error> {
        Ok(self.reader(&FourCC::Stsd)?.read_be::<Stsd>()?)
    }

    /// Parse the atom into `Stts` (time to sample) if `Atom.name` is `stts`.
    pub fn stts(&self) -> Result<Stts, Mp4Error> {
        Ok(self.reader(&FourCC::Stts)?.read_be::<Stts>()?)
    }

    /// Parse the atom into `Stsc` (sample to chunk) if `Atom.name` is `stsc`.
    pub fn stsc(&self) -> Result<Stsc, Mp4Error> {
        Ok(self.reader(&FourCC::Stsc)?.read_be::<Stsc>()?)
    }

    /// Parse the atom into `Stsz` (sample to size in bytes) if `Atom.name` is `stsz`.
    pub fn stsz(&self) -> Result<Stsz, Mp4Error> {
        Ok(self.reader(&FourCC::Stsz)?.read_be::<Stsz>()?)
    }

    /// Parse the atom into `Stco` (chunk offsets) if `Atom.name` is `stco`.
    pub fn stco(&self) -> Result<Stco, Mp4Error> {
        Ok(self.reader(&FourCC::Stco)?.read_be::<Stco>()?)
    }

    /// Parse the atom into `Co64` (64-bit chunk offsets) if `Atom.name` is `co64`.
    /// 64-bit equivalent to `stco` for file sizes above 32bit limit.
    pub fn co64(&self) -> Result<Co64, Mp4Error> {
        Ok(self.reader(&FourCC::Co64)?.read_be::<Co64>()?)
    }

    /// Parse the atom into `Stss` (sync samples) if `Atom.name` is `stss`.
    pub fn stss(&self) -> Result<Stss, Mp4Error> {
        Ok(self.reader(&FourCC::Stss)?.read_be::<Stss>()?)
    }

    /// Parse the atom into `Ctts` (composition offsets) if `Atom.name` is `ctts`.
    pub fn ctts(&self) -> Result<Ctts, Mp4Error> {
        Ok(self.reader(&FourCC::Ctts)?.read_be::<Ctts>()?)
    }
}
