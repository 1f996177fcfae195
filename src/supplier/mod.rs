//! Entry suppliers: walk a root and stream its regular files, with their
//! extended attributes, in path order.

mod attributes;
mod entry;
mod supplier;

pub use entry::{AttributeMap, Entry, Side};
pub use supplier::{EntryError, Supplier, SupplySummary, WalkError};
