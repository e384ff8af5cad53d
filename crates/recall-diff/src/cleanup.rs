//! Normalization passes over raw edit scripts.
//!
//! `cleanup_merge` is always run by `diff`: it coalesces adjacent
//! same-kind edits, refactors shared affixes out of delete/insert
//! pairs, and slides single edits trapped between equalities.
//! `cleanup_semantic` is an optional pass that sacrifices short
//! equalities dominated by the edits around them, producing scripts
//! that read better to humans.

use crate::myers::{common_prefix, common_suffix};
use crate::{Edit, EditKind};

pub fn cleanup_merge(edits: &mut Vec<Edit>) {
    loop {
        merge_pass(edits);
        if !shift_pass(edits) {
            break;
        }
    }
}

/// Coalesce runs of deletes/inserts and factor out shared affixes.
fn merge_pass(edits: &mut Vec<Edit>) {
    edits.retain(|e| !e.text.is_empty());
    // Sentinel equality so the final run gets flushed.
    edits.push(Edit::equal(""));
    let mut pointer = 0;
    let mut count_delete = 0;
    let mut count_insert = 0;
    let mut text_delete = String::new();
    let mut text_insert = String::new();
    while pointer < edits.len() {
        match edits[pointer].kind {
            EditKind::Insert => {
                count_insert += 1;
                text_insert.push_str(&edits[pointer].text);
                pointer += 1;
            }
            EditKind::Delete => {
                count_delete += 1;
                text_delete.push_str(&edits[pointer].text);
                pointer += 1;
            }
            EditKind::Equal => {
                if count_delete + count_insert > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let del: Vec<char> = text_delete.chars().collect();
                        let ins: Vec<char> = text_insert.chars().collect();
                        let run_start = pointer - count_delete - count_insert;
                        let prefix_len = common_prefix(&ins, &del).len();
                        if prefix_len != 0 {
                            let prefix: String = ins[..prefix_len].iter().collect();
                            if run_start > 0 && edits[run_start - 1].kind == EditKind::Equal {
                                edits[run_start - 1].text.push_str(&prefix);
                            } else {
                                edits.insert(0, Edit::equal(prefix));
                                pointer += 1;
                            }
                        }
                        let del = &del[prefix_len..];
                        let ins = &ins[prefix_len..];
                        let suffix_len = common_suffix(ins, del).len();
                        if suffix_len != 0 {
                            let suffix: String = ins[ins.len() - suffix_len..].iter().collect();
                            edits[pointer].text = format!("{}{}", suffix, edits[pointer].text);
                        }
                        text_delete = del[..del.len() - suffix_len].iter().collect();
                        text_insert = ins[..ins.len() - suffix_len].iter().collect();
                    }
                    let run_start = pointer - count_delete - count_insert;
                    let mut replacement = Vec::new();
                    if !text_delete.is_empty() {
                        replacement.push(Edit::delete(text_delete.clone()));
                    }
                    if !text_insert.is_empty() {
                        replacement.push(Edit::insert(text_insert.clone()));
                    }
                    let len = replacement.len();
                    edits.splice(run_start..pointer, replacement);
                    pointer = run_start + len + 1;
                } else if pointer != 0 && edits[pointer - 1].kind == EditKind::Equal {
                    let t = edits.remove(pointer).text;
                    edits[pointer - 1].text.push_str(&t);
                } else {
                    pointer += 1;
                }
                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }
    if edits.last().is_some_and(|e| e.text.is_empty()) {
        edits.pop();
    }
}

/// Slide single edits surrounded by equalities left or right when one
/// flank can be absorbed; eliminates equalities that split an edit.
fn shift_pass(edits: &mut Vec<Edit>) -> bool {
    let mut changes = false;
    let mut pointer = 1;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].kind == EditKind::Equal
            && edits[pointer + 1].kind == EditKind::Equal
        {
            if edits[pointer].text.ends_with(&edits[pointer - 1].text) {
                // Shift the edit left over the previous equality.
                let prev = edits[pointer - 1].text.clone();
                let trimmed = edits[pointer].text[..edits[pointer].text.len() - prev.len()].to_string();
                edits[pointer].text = format!("{}{}", prev, trimmed);
                edits[pointer + 1].text = format!("{}{}", prev, edits[pointer + 1].text);
                edits.remove(pointer - 1);
                changes = true;
                continue;
            } else if edits[pointer].text.starts_with(&edits[pointer + 1].text) {
                // Shift the edit right over the next equality.
                let next = edits[pointer + 1].text.clone();
                edits[pointer - 1].text.push_str(&next);
                let trimmed = edits[pointer].text[next.len()..].to_string();
                edits[pointer].text = format!("{}{}", trimmed, next);
                edits.remove(pointer + 1);
                changes = true;
                continue;
            }
        }
        pointer += 1;
    }
    changes
}

/// Drop equalities shorter than the edits flanking them on both sides,
/// re-expressing them as a delete+insert pair, then re-merge.
pub fn cleanup_semantic(edits: &mut Vec<Edit>) {
    let mut changes = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<String> = None;
    let mut pointer = 0;
    // Edit mass before and after the candidate equality.
    let mut len_insertions1 = 0;
    let mut len_deletions1 = 0;
    let mut len_insertions2 = 0;
    let mut len_deletions2 = 0;
    while pointer < edits.len() {
        if edits[pointer].kind == EditKind::Equal {
            equalities.push(pointer);
            len_insertions1 = len_insertions2;
            len_deletions1 = len_deletions2;
            len_insertions2 = 0;
            len_deletions2 = 0;
            last_equality = Some(edits[pointer].text.clone());
        } else {
            let n = edits[pointer].text.chars().count();
            if edits[pointer].kind == EditKind::Insert {
                len_insertions2 += n;
            } else {
                len_deletions2 += n;
            }
            let dominated = last_equality.as_ref().is_some_and(|eq| {
                let len = eq.chars().count();
                len <= len_insertions1.max(len_deletions1)
                    && len <= len_insertions2.max(len_deletions2)
            });
            if dominated {
                let eq = last_equality.take().unwrap_or_default();
                let at = *equalities.last().unwrap_or(&0);
                edits[at] = Edit::insert(eq.clone());
                edits.insert(at, Edit::delete(eq));
                equalities.pop();
                // The previous equality also needs re-examination.
                equalities.pop();
                pointer = match equalities.last() {
                    Some(&p) => p,
                    None => {
                        // Restart from the top on the next loop turn.
                        len_insertions1 = 0;
                        len_deletions1 = 0;
                        len_insertions2 = 0;
                        len_deletions2 = 0;
                        pointer = 0;
                        changes = true;
                        continue;
                    }
                };
                len_insertions1 = 0;
                len_deletions1 = 0;
                len_insertions2 = 0;
                len_deletions2 = 0;
                changes = true;
            }
        }
        pointer += 1;
    }
    if changes {
        cleanup_merge(edits);
    }
}
