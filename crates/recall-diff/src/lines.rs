//! Line-mode diff: the lines-to-symbols speedup.
//!
//! Each unique line is assigned a single `char` symbol, the symbol
//! sequences are diffed, and edit texts are rehydrated back into
//! lines. Edits therefore always cover whole lines.

use std::collections::HashMap;

use crate::{cleanup, myers, Edit};

pub(crate) fn diff_lines(old: &str, new: &str) -> Vec<Edit> {
    let mut line_array: Vec<&str> = Vec::new();
    let mut line_index: HashMap<&str, usize> = HashMap::new();
    let encoded_old = encode(old, &mut line_array, &mut line_index);
    let encoded_new = encode(new, &mut line_array, &mut line_index);
    let (encoded_old, encoded_new) = match (encoded_old, encoded_new) {
        (Some(a), Some(b)) => (a, b),
        // More unique lines than assignable symbols; degrade to the
        // character-level diff, which is correct just slower.
        _ => return crate::diff(old, new),
    };
    let mut symbol_edits = myers::diff_slices(&encoded_old, &encoded_new);
    cleanup::cleanup_merge(&mut symbol_edits);
    // Rehydration maps symbols back to whole lines; the script is
    // already normalized, and re-merging here would refactor shared
    // prefixes across line boundaries.
    symbol_edits
        .into_iter()
        .map(|e| Edit {
            kind: e.kind,
            text: e.text.chars().map(|c| line_array[decode(c)]).collect(),
        })
        .collect()
}

fn encode<'a>(
    text: &'a str,
    line_array: &mut Vec<&'a str>,
    line_index: &mut HashMap<&'a str, usize>,
) -> Option<Vec<char>> {
    let mut out = Vec::new();
    for line in text.split_inclusive('\n') {
        let idx = match line_index.get(line) {
            Some(&i) => i,
            None => {
                let i = line_array.len();
                line_array.push(line);
                line_index.insert(line, i);
                i
            }
        };
        out.push(symbol(idx)?);
    }
    Some(out)
}

/// Injective index-to-char mapping that skips the surrogate range.
fn symbol(i: usize) -> Option<char> {
    let cp = if i < 0xD800 { i as u32 } else { u32::try_from(i).ok()?.checked_add(0x800)? };
    char::from_u32(cp)
}

fn decode(c: char) -> usize {
    let cp = c as u32;
    if cp < 0xD800 { cp as usize } else { (cp - 0x800) as usize }
}
