//! Myers O(ND) diff with divide-and-conquer bisection.
//!
//! Works over `char` slices so a unicode scalar value is never split.
//! Shortcut paths (common prefix/suffix, containment, single-char
//! remainder) avoid the quadratic core on easy inputs.

use crate::{Edit, EditKind};

/// Diff two character slices into a raw edit script. The result is
/// valid but may contain adjacent same-kind edits; callers run
/// `cleanup::cleanup_merge` to normalize.
pub fn diff_slices(a: &[char], b: &[char]) -> Vec<Edit> {
    if a == b {
        if a.is_empty() {
            return Vec::new();
        }
        return vec![edit(EditKind::Equal, a)];
    }

    let prefix = common_prefix(a, b);
    let (a, b) = (&a[prefix.len()..], &b[prefix.len()..]);
    let suffix = common_suffix(a, b);
    let (a, b) = (&a[..a.len() - suffix.len()], &b[..b.len() - suffix.len()]);

    let mut edits = Vec::new();
    if !prefix.is_empty() {
        edits.push(edit(EditKind::Equal, prefix));
    }
    edits.extend(compute(a, b));
    if !suffix.is_empty() {
        edits.push(edit(EditKind::Equal, suffix));
    }
    edits
}

/// Core dispatch for inputs with no common prefix or suffix.
fn compute(a: &[char], b: &[char]) -> Vec<Edit> {
    if a.is_empty() {
        return vec![edit(EditKind::Insert, b)];
    }
    if b.is_empty() {
        return vec![edit(EditKind::Delete, a)];
    }

    let (long, short, short_is_old) =
        if a.len() > b.len() { (a, b, false) } else { (b, a, true) };
    if let Some(at) = find_subslice(long, short) {
        // Shorter text sits inside the longer; the longer side's
        // flanks are pure inserts or deletes.
        let kind = if short_is_old { EditKind::Insert } else { EditKind::Delete };
        let mut edits = Vec::new();
        if at > 0 {
            edits.push(edit(kind, &long[..at]));
        }
        edits.push(edit(EditKind::Equal, short));
        if at + short.len() < long.len() {
            edits.push(edit(kind, &long[at + short.len()..]));
        }
        return edits;
    }
    if short.len() == 1 {
        // After trimming, a single leftover char matches nothing.
        return vec![edit(EditKind::Delete, a), edit(EditKind::Insert, b)];
    }

    bisect(a, b)
}

/// Find the middle snake of the edit path, split there, and recurse.
fn bisect(a: &[char], b: &[char]) -> Vec<Edit> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let v_offset = max_d;
    let v_len = (2 * max_d + 2) as usize;
    let mut v1 = vec![-1isize; v_len];
    let mut v2 = vec![-1isize; v_len];
    v1[(v_offset + 1) as usize] = 0;
    v2[(v_offset + 1) as usize] = 0;
    let delta = n - m;
    // If total length is odd, the forward path finds the overlap;
    // otherwise the reverse path does.
    let front = delta % 2 != 0;
    let mut k1start = 0isize;
    let mut k1end = 0isize;
    let mut k2start = 0isize;
    let mut k2end = 0isize;

    for d in 0..max_d {
        // Forward path.
        let mut k1 = -d + k1start;
        while k1 <= d - k1end {
            let k1_offset = (v_offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                v1[k1_offset + 1]
            } else {
                v1[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && a[x1 as usize] == b[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            v1[k1_offset] = x1;
            if x1 > n {
                k1end += 2;
            } else if y1 > m {
                k1start += 2;
            } else if front {
                let k2_offset = v_offset + delta - k1;
                if (0..v_len as isize).contains(&k2_offset) && v2[k2_offset as usize] != -1 {
                    let x2 = n - v2[k2_offset as usize];
                    if x1 >= x2 {
                        return split(a, b, x1 as usize, y1 as usize);
                    }
                }
            }
            k1 += 2;
        }

        // Reverse path.
        let mut k2 = -d + k2start;
        while k2 <= d - k2end {
            let k2_offset = (v_offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                v2[k2_offset + 1]
            } else {
                v2[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n && y2 < m && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize] {
                x2 += 1;
                y2 += 1;
            }
            v2[k2_offset] = x2;
            if x2 > n {
                k2end += 2;
            } else if y2 > m {
                k2start += 2;
            } else if !front {
                let k1_offset = v_offset + delta - k2;
                if (0..v_len as isize).contains(&k1_offset) && v1[k1_offset as usize] != -1 {
                    let x1 = v1[k1_offset as usize];
                    let y1 = x1 - (k1_offset - v_offset);
                    let x2 = n - x2;
                    if x1 >= x2 {
                        return split(a, b, x1 as usize, y1 as usize);
                    }
                }
            }
            k2 += 2;
        }
    }

    // The paths never overlapped: no commonality at all.
    vec![edit(EditKind::Delete, a), edit(EditKind::Insert, b)]
}

fn split(a: &[char], b: &[char], x: usize, y: usize) -> Vec<Edit> {
    let mut edits = diff_slices(&a[..x], &b[..y]);
    edits.extend(diff_slices(&a[x..], &b[y..]));
    edits
}

pub(crate) fn common_prefix<'a>(a: &'a [char], b: &[char]) -> &'a [char] {
    let n = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
    &a[..n]
}

pub(crate) fn common_suffix<'a>(a: &'a [char], b: &[char]) -> &'a [char] {
    let n = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    &a[a.len() - n..]
}

fn find_subslice(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn edit(kind: EditKind, text: &[char]) -> Edit {
    Edit { kind, text: text.iter().collect() }
}
