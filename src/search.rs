//! Fuzzy search over enriched package records
//!
//! Built once per run from the immutable record set and queried on every
//! keystroke. Matching is case-insensitive subsequence scoring with bonuses
//! for consecutive runs and word-start anchors, so "fo" finds "Foo" and
//! "gmaps" finds "Google Maps". An empty query is the unfiltered view: every
//! record in build order.

use crate::adb::PackageId;
use crate::metadata::PackageRecord;
use std::fmt;

/// Display projection of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Lookup succeeded; label is `"<title> by <developer> (<id>)"`
    Enriched { label: String, id: PackageId },
    /// Lookup failed; only the identifier is known
    Bare(PackageId),
}

impl Choice {
    pub fn from_record(record: &PackageRecord) -> Self {
        match &record.meta {
            Some(meta) => Choice::Enriched {
                label: format!("{} by {} ({})", meta.title, meta.developer, record.id),
                id: record.id.clone(),
            },
            None => Choice::Bare(record.id.clone()),
        }
    }

    pub fn id(&self) -> &PackageId {
        match self {
            Choice::Enriched { id, .. } => id,
            Choice::Bare(id) => id,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Enriched { label, .. } => f.write_str(label),
            Choice::Bare(id) => write!(f, "{id}"),
        }
    }
}

struct IndexEntry {
    choice: Choice,
    /// Lowercased searchable fields: id, then title/developer/summary when
    /// the record is enriched
    fields: Vec<String>,
}

/// Immutable fuzzy-search index over the full record set
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn build(records: &[PackageRecord]) -> Self {
        let entries = records
            .iter()
            .map(|record| {
                let mut fields = vec![record.id.as_str().to_lowercase()];
                if let Some(meta) = &record.meta {
                    fields.push(meta.title.to_lowercase());
                    fields.push(meta.developer.to_lowercase());
                    fields.push(meta.summary.to_lowercase());
                }
                IndexEntry {
                    choice: Choice::from_record(record),
                    fields,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score one record against a query; `None` means no match. Used both by
    /// [`query`](Self::query) and as the per-option scorer for the
    /// interactive prompt.
    pub fn score_record(&self, idx: usize, query: &str) -> Option<i64> {
        if query.is_empty() {
            return Some(0);
        }
        let entry = self.entries.get(idx)?;
        let needle = query.to_lowercase();
        entry
            .fields
            .iter()
            .filter_map(|field| fuzzy_score(&needle, field))
            .max()
    }

    /// Ranked matches, best first; ties keep build order. An empty query
    /// returns every choice in build order.
    pub fn query(&self, text: &str) -> Vec<Choice> {
        if text.is_empty() {
            return self.entries.iter().map(|e| e.choice.clone()).collect();
        }
        let mut scored: Vec<(i64, &Choice)> = (0..self.entries.len())
            .filter_map(|idx| {
                self.score_record(idx, text)
                    .map(|score| (score, &self.entries[idx].choice))
            })
            .collect();
        scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
        scored.into_iter().map(|(_, c)| c.clone()).collect()
    }
}

const CONSECUTIVE_BONUS: i64 = 8;
const WORD_START_BONUS: i64 = 10;
const MAX_GAP_PENALTY: i64 = 4;

fn is_word_boundary(c: char) -> bool {
    matches!(c, '.' | '_' | '-' | ' ' | '/' | ':')
}

/// Subsequence match of `needle` in `haystack`, both lowercase.
///
/// Every needle char must appear in order; the score rewards consecutive
/// matches and matches at word starts, penalizes gaps, and nudges shorter
/// haystacks ahead on otherwise equal matches.
fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    if needle.is_empty() {
        return Some(0);
    }
    let hay: Vec<char> = haystack.chars().collect();
    let mut total: i64 = 0;
    let mut prev: Option<usize> = None;
    let mut from = 0usize;

    for nc in needle.chars() {
        let at = hay[from..].iter().position(|&hc| hc == nc)? + from;
        let mut score = 1;
        if at == 0 || is_word_boundary(hay[at - 1]) {
            score += WORD_START_BONUS;
        }
        if let Some(p) = prev {
            if at == p + 1 {
                score += CONSECUTIVE_BONUS;
            } else {
                score -= ((at - p - 1) as i64).min(MAX_GAP_PENALTY);
            }
        }
        total += score;
        prev = Some(at);
        from = at + 1;
    }

    Some(total - (hay.len() as i64) / 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::AppMeta;

    fn enriched(id: &str, title: &str, developer: &str, summary: &str) -> PackageRecord {
        PackageRecord {
            id: PackageId::from(id),
            meta: Some(AppMeta {
                title: title.to_string(),
                developer: developer.to_string(),
                summary: summary.to_string(),
            }),
        }
    }

    fn bare(id: &str) -> PackageRecord {
        PackageRecord::bare(PackageId::from(id))
    }

    fn sample() -> Vec<PackageRecord> {
        vec![
            enriched("com.foo.app", "Foo", "Foo Inc", "A test app"),
            enriched(
                "com.google.android.apps.maps",
                "Google Maps",
                "Google LLC",
                "Navigate your world",
            ),
            bare("com.vendor.sideloaded"),
        ]
    }

    #[test]
    fn test_empty_query_returns_all_in_build_order() {
        let index = SearchIndex::build(&sample());
        let choices = index.query("");
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[0].id().as_str(), "com.foo.app");
        assert_eq!(choices[1].id().as_str(), "com.google.android.apps.maps");
        assert_eq!(choices[2].id().as_str(), "com.vendor.sideloaded");
    }

    #[test]
    fn test_partial_title_match() {
        let index = SearchIndex::build(&sample());
        let choices = index.query("fo");
        assert!(choices.iter().any(|c| c.id().as_str() == "com.foo.app"));
    }

    #[test]
    fn test_scattered_abbreviation_matches() {
        let index = SearchIndex::build(&sample());
        let choices = index.query("gmaps");
        assert_eq!(choices[0].id().as_str(), "com.google.android.apps.maps");
    }

    #[test]
    fn test_bare_record_matches_by_id_only() {
        let index = SearchIndex::build(&sample());
        let choices = index.query("sideloaded");
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].id().as_str(), "com.vendor.sideloaded");
        // Absent metadata contributes no match weight
        assert!(index.query("zzz-no-match").is_empty());
    }

    #[test]
    fn test_developer_field_is_indexed() {
        let index = SearchIndex::build(&sample());
        let choices = index.query("google llc");
        assert_eq!(choices[0].id().as_str(), "com.google.android.apps.maps");
    }

    #[test]
    fn test_enriched_choice_label_format() {
        let record = enriched("com.foo.app", "Foo", "Foo Inc", "s");
        let choice = Choice::from_record(&record);
        assert_eq!(choice.to_string(), "Foo by Foo Inc (com.foo.app)");
    }

    #[test]
    fn test_bare_choice_is_raw_id() {
        let choice = Choice::from_record(&bare("com.x"));
        assert_eq!(choice.to_string(), "com.x");
    }

    #[test]
    fn test_fuzzy_score_requires_subsequence() {
        assert!(fuzzy_score("abc", "a big cat").is_some());
        assert!(fuzzy_score("abc", "cab").is_none());
    }

    #[test]
    fn test_consecutive_run_outscores_scattered() {
        let tight = fuzzy_score("maps", "maps").unwrap();
        let scattered = fuzzy_score("maps", "my apple press salad").unwrap();
        assert!(tight > scattered);
    }
}
