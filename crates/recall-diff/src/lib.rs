//! Text-diff engine producing edit scripts.
//!
//! `diff` computes an ordered list of equal/delete/insert edits whose
//! equal+delete parts spell the old text and equal+insert parts spell
//! the new text. `diff_lines` runs the same algorithm at line
//! granularity, which is much faster on large documents.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod cleanup;
pub mod myers;

mod lines;

use recall_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EditKind {
    Equal,
    Delete,
    Insert,
}

/// One operation of an edit script. `text` is the run of characters
/// the operation covers; it is never empty after cleanup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edit {
    pub kind: EditKind,
    pub text: String,
}

impl Edit {
    pub fn equal<S: Into<String>>(text: S) -> Self {
        Edit { kind: EditKind::Equal, text: text.into() }
    }
    pub fn delete<S: Into<String>>(text: S) -> Self {
        Edit { kind: EditKind::Delete, text: text.into() }
    }
    pub fn insert<S: Into<String>>(text: S) -> Self {
        Edit { kind: EditKind::Insert, text: text.into() }
    }
}

/// Compute a character-level edit script transforming `old` into `new`.
///
/// Identical inputs produce a single `Equal` edit; two empty inputs
/// produce an empty script. Always terminates with a valid script.
pub fn diff(old: &str, new: &str) -> Vec<Edit> {
    let a: Vec<char> = old.chars().collect();
    let b: Vec<char> = new.chars().collect();
    let mut edits = myers::diff_slices(&a, &b);
    cleanup::cleanup_merge(&mut edits);
    edits
}

/// Line-granularity diff: unique lines are mapped to single symbols,
/// diffed, and rehydrated, so edits always cover whole lines.
pub fn diff_lines(old: &str, new: &str) -> Vec<Edit> {
    lines::diff_lines(old, new)
}

/// The old text a script was computed from (equal + delete runs).
pub fn source_text(edits: &[Edit]) -> String {
    edits
        .iter()
        .filter(|e| e.kind != EditKind::Insert)
        .map(|e| e.text.as_str())
        .collect()
}

/// The new text a script produces (equal + insert runs).
pub fn target_text(edits: &[Edit]) -> String {
    edits
        .iter()
        .filter(|e| e.kind != EditKind::Delete)
        .map(|e| e.text.as_str())
        .collect()
}

/// Replay a script against `old`, reconstructing the new text.
/// Fails if the script was not computed from `old`.
pub fn apply(edits: &[Edit], old: &str) -> Result<String> {
    if source_text(edits) != old {
        return Err(Error::InvalidParameter(
            "edit script does not match source text".to_string(),
        ));
    }
    Ok(target_text(edits))
}

/// Levenshtein distance implied by a script: per block of consecutive
/// non-equal edits, the larger of the inserted and deleted run lengths.
pub fn levenshtein(edits: &[Edit]) -> usize {
    let mut distance = 0;
    let mut insertions = 0;
    let mut deletions = 0;
    for e in edits {
        match e.kind {
            EditKind::Insert => insertions += e.text.chars().count(),
            EditKind::Delete => deletions += e.text.chars().count(),
            EditKind::Equal => {
                distance += insertions.max(deletions);
                insertions = 0;
                deletions = 0;
            }
        }
    }
    distance + insertions.max(deletions)
}
