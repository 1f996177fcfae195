use std::ffi::OsString;
use std::path::PathBuf;

use derive_more::Display;

use crate::supplier::Side;

/// A single difference between the two trees, one report line each.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Finding {
    /// A file exists under one root only. `root` is printed as given.
    #[display("only in {}: {}", root.display(), path.display())]
    OnlyIn { root: PathBuf, path: PathBuf },
    /// A file present on both sides carries an attribute on one side only.
    /// `path` is the file's location as walked on that side.
    #[display("xattr only in {}: {}", path.display(), name.to_string_lossy())]
    AttributeOnlyIn {
        side: Side,
        path: PathBuf,
        name: OsString,
    },
    /// Both copies carry the attribute, with different bytes.
    #[display("{} {} differ: {}", left.display(), right.display(), name.to_string_lossy())]
    AttributeMismatch {
        left: PathBuf,
        right: PathBuf,
        name: OsString,
    },
}
