//! MP4 atom header and atom tree.

mod atom;
mod atom_header;

pub use atom::{Atom, AtomBody, Children, MAX_DEPTH};
pub use atom_header::{AtomHeader, HEADER_SIZE, HEADER_SIZE_64BIT};
