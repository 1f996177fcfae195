use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

use derive_more::Display;

/// Extended attributes of a single file, keyed by attribute name.
///
/// A `BTreeMap` keeps the keys sorted so findings come out in a stable order.
pub type AttributeMap = BTreeMap<OsString, Vec<u8>>;

/// Which of the two compared trees something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Side {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

/// One regular file observed while walking a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Location as walked, i.e. the root joined with the file's relative path
    pub absolute_path: PathBuf,
    pub attributes: AttributeMap,
}

impl Entry {
    pub fn new(absolute_path: impl Into<PathBuf>, attributes: AttributeMap) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            attributes,
        }
    }
}
