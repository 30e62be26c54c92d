//! Explicit ordering for tag-keyed output
//!
//! `latest` comes first, then recognized mutable tags by major version
//! descending with a bare major directly before its own `MAJOR.MINOR`
//! tags (minors descending), then anything else alphabetically.

use crate::tags::MutableTag;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Latest,
    Version(Reverse<u64>, Option<Reverse<u64>>),
    Other(&'a str),
}

fn sort_key(tag: &str) -> SortKey<'_> {
    match tag.parse::<MutableTag>() {
        Ok(MutableTag::Latest) => SortKey::Latest,
        Ok(MutableTag::Major(major)) => SortKey::Version(Reverse(major), None),
        Ok(MutableTag::Minor(major, minor)) => {
            SortKey::Version(Reverse(major), Some(Reverse(minor)))
        }
        Err(_) => SortKey::Other(tag),
    }
}

/// Compare two tags in descending display order
///
/// Tags that parse to the same version (`1` and `01`) fall back to their
/// raw text so distinct tags never compare equal.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

/// Sort tags in descending display order
pub fn sorted_tags<'a, I>(tags: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut sorted: Vec<&str> = tags.into_iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| compare_tags(a, b));
    sorted
}

/// Serialize a tag-keyed map in descending display order
pub fn serialize_descending<S, V>(map: &BTreeMap<String, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for tag in sorted_tags(map.keys()) {
        out.serialize_entry(tag, &map[tag])?;
    }
    out.end()
}
