//! Operations on string sets kept as sorted, deduplicated `Vec<String>`s.
//!
//! Every set that reaches another operation goes through [`clean`] first, so
//! the merge-style helpers below can rely on sortedness. Lengths and slices
//! are measured in characters.

use std::cmp::Ordering;

use crate::limits::TRIGRAM_LEN;

/// Sort order of a string set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOrder {
    Natural,
    /// Compare from the last character backward; a string sorts right after
    /// the strings that are suffixes of it.
    Suffix,
}

impl SetOrder {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            SetOrder::Natural => a.cmp(b),
            SetOrder::Suffix => a.chars().rev().cmp(b.chars().rev()),
        }
    }
}

/// Sorts `s` by `order` and drops duplicates.
pub fn clean(mut s: Vec<String>, order: SetOrder) -> Vec<String> {
    s.sort_by(|a, b| order.compare(a, b));
    s.dedup();
    s
}

pub fn union(mut s: Vec<String>, t: Vec<String>, order: SetOrder) -> Vec<String> {
    s.extend(t);
    clean(s, order)
}

pub fn cross(s: &[String], t: &[String], order: SetOrder) -> Vec<String> {
    let mut p = Vec::with_capacity(s.len() * t.len());
    for ss in s {
        for tt in t {
            p.push(format!("{}{}", ss, tt));
        }
    }
    clean(p, order)
}

/// Reports whether every string in `s` is also in `t`. Both must be sorted
/// in natural order.
pub fn is_subset(s: &[String], t: &[String]) -> bool {
    debug_assert!(is_sorted(s) && is_sorted(t), "is_subset on unsorted input");
    let mut j = 0;
    for ss in s {
        while j < t.len() && &t[j] < ss {
            j += 1;
        }
        if j >= t.len() || &t[j] != ss {
            return false;
        }
    }
    true
}

/// Splits two naturally sorted sets into (common, only in `s`, only in `t`).
pub fn split_common(s: Vec<String>, t: Vec<String>) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut common = Vec::new();
    let mut s_only = Vec::new();
    let mut t_only = Vec::new();
    let mut s = s.into_iter().peekable();
    let mut t = t.into_iter().peekable();
    loop {
        let ord = match (s.peek(), t.peek()) {
            (Some(a), Some(b)) => a.cmp(b),
            _ => break,
        };
        match ord {
            Ordering::Less => s_only.extend(s.next()),
            Ordering::Greater => t_only.extend(t.next()),
            Ordering::Equal => {
                common.extend(s.next());
                t.next();
            }
        }
    }
    s_only.extend(s);
    t_only.extend(t);
    (common, s_only, t_only)
}

pub fn min_len(s: &[String]) -> usize {
    s.iter().map(|x| char_len(x)).min().unwrap_or(0)
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn head(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

pub fn tail(s: &str, n: usize) -> &str {
    let len = char_len(s);
    if len <= n {
        return s;
    }
    match s.char_indices().nth(len - n) {
        Some((i, _)) => &s[i..],
        None => "",
    }
}

pub fn has_prefix(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

pub fn has_suffix(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

pub fn trigrams_of(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let trig = chars
        .windows(TRIGRAM_LEN)
        .map(|w| w.iter().collect::<String>())
        .collect();
    clean(trig, SetOrder::Natural)
}

fn is_sorted(s: &[String]) -> bool {
    s.windows(2).all(|w| w[0] <= w[1])
}
