use std::path::Path;

use crate::compare::Finding;
use crate::supplier::{Entry, Side};

/// Symmetric difference of the attribute maps of a matched pair.
///
/// Keys of the left map come first, in sorted order, each reported as a
/// mismatch or as left-only; keys only the right map has follow, also sorted.
/// Values are compared byte for byte.
pub fn diff_attributes(
    left: &Entry,
    left_relative: &Path,
    right: &Entry,
    right_relative: &Path,
) -> Vec<Finding> {
    let from_left = left
        .attributes
        .iter()
        .filter_map(|(name, value)| match right.attributes.get(name) {
            Some(other) if other == value => None,
            Some(_) => Some(Finding::AttributeMismatch {
                left: left_relative.to_path_buf(),
                right: right_relative.to_path_buf(),
                name: name.clone(),
            }),
            None => Some(Finding::AttributeOnlyIn {
                side: Side::Left,
                path: left.absolute_path.clone(),
                name: name.clone(),
            }),
        });

    let from_right = right
        .attributes
        .keys()
        .filter(|name| !left.attributes.contains_key(*name))
        .map(|name| Finding::AttributeOnlyIn {
            side: Side::Right,
            path: right.absolute_path.clone(),
            name: name.clone(),
        });

    from_left.chain(from_right).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supplier::AttributeMap;
    use std::collections::HashSet;
    use std::ffi::OsString;

    fn attributes(pairs: &[(&str, &[u8])]) -> AttributeMap {
        pairs
            .iter()
            .map(|(name, value)| (OsString::from(name), value.to_vec()))
            .collect()
    }

    fn diff(left: &[(&str, &[u8])], right: &[(&str, &[u8])]) -> Vec<Finding> {
        let left = Entry::new("/l/f", attributes(left));
        let right = Entry::new("/r/f", attributes(right));
        diff_attributes(&left, Path::new("f"), &right, Path::new("f"))
    }

    fn only_in(side: Side, name: &str) -> Finding {
        let path = match side {
            Side::Left => "/l/f",
            Side::Right => "/r/f",
        };
        Finding::AttributeOnlyIn {
            side,
            path: path.into(),
            name: name.into(),
        }
    }

    fn mismatch(name: &str) -> Finding {
        Finding::AttributeMismatch {
            left: "f".into(),
            right: "f".into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_symmetric_difference() {
        let findings = diff(&[("a", b"1"), ("b", b"2")], &[("b", b"9"), ("c", b"3")]);

        let found: HashSet<_> = findings.iter().cloned().collect();
        let expected: HashSet<_> = [
            only_in(Side::Left, "a"),
            mismatch("b"),
            only_in(Side::Right, "c"),
        ]
        .into_iter()
        .collect();
        assert_eq!(findings.len(), 3);
        assert_eq!(found, expected);
    }

    #[test]
    fn test_left_keys_come_first_in_sorted_order() {
        let findings = diff(
            &[("z", b"1"), ("m", b"1"), ("a", b"1")],
            &[("m", b"2"), ("b", b"1")],
        );

        assert_eq!(
            findings,
            vec![
                only_in(Side::Left, "a"),
                mismatch("m"),
                only_in(Side::Left, "z"),
                only_in(Side::Right, "b"),
            ]
        );
    }

    #[test]
    fn test_identical_maps_produce_nothing() {
        let findings = diff(&[("user.tag", b"v1")], &[("user.tag", b"v1")]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_empty_maps_produce_nothing() {
        assert!(diff(&[], &[]).is_empty());
    }

    #[test]
    fn test_extra_attribute_on_right() {
        let findings = diff(&[], &[("secure", b"1")]);
        assert_eq!(findings, vec![only_in(Side::Right, "secure")]);
        assert_eq!(findings[0].to_string(), "xattr only in /r/f: secure");
    }

    #[test]
    fn test_empty_value_differs_from_non_empty() {
        let findings = diff(&[("k", b"")], &[("k", b"\0")]);
        assert_eq!(findings, vec![mismatch("k")]);
    }

    #[test]
    fn test_comparison_is_byte_exact() {
        let findings = diff(&[("k", b"Value")], &[("k", b"value")]);
        assert_eq!(findings, vec![mismatch("k")]);
    }
}
