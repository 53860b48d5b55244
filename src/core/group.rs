//! Grouping of matches by file extension

use std::collections::BTreeMap;

use crate::core::model::MatchResult;

/// Matches bucketed by lower-cased extension. Keys iterate in ascending
/// order ("" first) and each bucket is sorted by path.
#[derive(Debug, Default)]
pub struct GroupedResults<'a> {
    groups: BTreeMap<String, Vec<&'a MatchResult>>,
}

impl<'a> GroupedResults<'a> {
    pub fn from_matches(matches: &'a [MatchResult]) -> Self {
        let mut groups: BTreeMap<String, Vec<&'a MatchResult>> = BTreeMap::new();
        for m in matches {
            groups.entry(m.extension_key()).or_default().push(m);
        }
        for members in groups.values_mut() {
            members.sort_by(|a, b| a.path.cmp(&b.path));
        }
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of files across all groups
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Groups in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a MatchResult])> {
        self.groups
            .iter()
            .map(|(key, members)| (key.as_str(), members.as_slice()))
    }

    /// Every match, in the same order the report lists them
    pub fn flatten(&self) -> impl Iterator<Item = &'a MatchResult> + '_ {
        self.groups.values().flat_map(|members| members.iter().copied())
    }
}
