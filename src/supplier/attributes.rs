use std::path::Path;

use tracing::debug;

use crate::supplier::{AttributeMap, EntryError};

/// Reads every extended attribute of `path`.
///
/// Failures never lose the entry: a listing failure yields an empty map, and a
/// value that cannot be read is kept under its name as an empty value. Each
/// failure is returned alongside the map so the caller can report it.
#[cfg(unix)]
pub fn read_attributes(path: &Path) -> (AttributeMap, Vec<EntryError>) {
    let mut attributes = AttributeMap::new();
    let mut errors = Vec::new();

    let names = match xattr::list(path) {
        Ok(names) => names,
        Err(source) => {
            errors.push(EntryError::ListAttributesError {
                path: path.to_path_buf(),
                source,
            });
            return (attributes, errors);
        }
    };

    for name in names {
        let value = match xattr::get(path, &name) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(
                    "Attribute {:?} vanished from {} before it could be read",
                    name,
                    path.display()
                );
                Vec::new()
            }
            Err(source) => {
                errors.push(EntryError::ReadAttributeError {
                    path: path.to_path_buf(),
                    name: name.to_string_lossy().into_owned(),
                    source,
                });
                Vec::new()
            }
        };
        attributes.insert(name, value);
    }

    (attributes, errors)
}

#[cfg(not(unix))]
pub fn read_attributes(path: &Path) -> (AttributeMap, Vec<EntryError>) {
    debug!(
        "Extended attributes are not supported here, treating {} as having none",
        path.display()
    );
    (AttributeMap::new(), Vec::new())
}
