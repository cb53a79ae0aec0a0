use std::mem;

use crate::limits::{Limits, TRIGRAM_LEN};
use crate::query::Query;
use crate::string_set::{
    SetOrder, char_len, clean, cross, has_prefix, has_suffix, head, min_len, tail, union,
};

/// What analysis knows about the strings a regex can match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegexInfo {
    pub can_empty: bool,
    /// The complete set of matching strings, when small enough to track.
    pub exact: Option<Vec<String>>,
    /// When `exact` is `None`: every match starts with one of these...
    pub prefix: Vec<String>,
    /// ...and ends with one of these.
    pub suffix: Vec<String>,
    /// A query every match satisfies, on top of the sets above.
    pub match_q: Query,
}

impl RegexInfo {
    fn new() -> Self {
        RegexInfo {
            can_empty: false,
            exact: None,
            prefix: Vec::new(),
            suffix: Vec::new(),
            match_q: Query::all(),
        }
    }

    pub fn exact(strings: Vec<String>) -> Self {
        RegexInfo { exact: Some(strings), ..RegexInfo::new() }
    }

    pub fn any_match() -> Self {
        RegexInfo {
            can_empty: true,
            prefix: vec![String::new()],
            suffix: vec![String::new()],
            ..RegexInfo::new()
        }
    }

    /// Matches any single character.
    pub fn any_char() -> Self {
        RegexInfo {
            prefix: vec![String::new()],
            suffix: vec![String::new()],
            ..RegexInfo::new()
        }
    }

    pub fn no_match() -> Self {
        RegexInfo { match_q: Query::none(), ..RegexInfo::new() }
    }

    pub fn empty_string() -> Self {
        RegexInfo {
            can_empty: true,
            exact: Some(vec![String::new()]),
            ..RegexInfo::new()
        }
    }

    fn and_trigrams(&mut self, strings: &[String]) {
        let q = mem::take(&mut self.match_q);
        self.match_q = q.and_trigrams(strings);
    }

    /// Folds the trigrams of the exact set into `match_q`.
    pub fn add_exact(&mut self) {
        if let Some(exact) = self.exact.take() {
            self.and_trigrams(&exact);
            self.exact = Some(exact);
        }
    }

    /// Keeps the info bounded. A large or long exact set is traded for
    /// prefix/suffix sets plus its trigrams; prefix and suffix sets are then
    /// cut down to size.
    pub fn simplify(&mut self, force: bool, limits: &Limits) {
        if let Some(exact) = self.exact.take() {
            let exact = clean(exact, SetOrder::Natural);
            let min = min_len(&exact);
            if exact.len() > limits.max_exact
                || min > TRIGRAM_LEN
                || (force && min >= TRIGRAM_LEN)
            {
                self.and_trigrams(&exact);
                let keep = TRIGRAM_LEN - 1;
                for s in exact {
                    if char_len(&s) < TRIGRAM_LEN {
                        self.prefix.push(s.clone());
                        self.suffix.push(s);
                    } else {
                        self.prefix.push(head(&s, keep).to_string());
                        self.suffix.push(tail(&s, keep).to_string());
                    }
                }
            } else {
                self.exact = Some(exact);
            }
        }

        if self.exact.is_none() {
            let prefix = mem::take(&mut self.prefix);
            self.prefix = self.simplify_set(prefix, SetOrder::Natural, limits);
            let suffix = mem::take(&mut self.suffix);
            self.suffix = self.simplify_set(suffix, SetOrder::Suffix, limits);
        }
    }

    fn simplify_set(&mut self, set: Vec<String>, order: SetOrder, limits: &Limits) -> Vec<String> {
        let mut t = clean(set, order);
        self.and_trigrams(&t);

        // Cut strings down to n-1 characters until the set is small enough.
        let mut n = TRIGRAM_LEN;
        while n > 0 && (n == TRIGRAM_LEN || t.len() > limits.max_set) {
            let cut = t
                .into_iter()
                .map(|s| {
                    if char_len(&s) < n {
                        s
                    } else if order == SetOrder::Natural {
                        head(&s, n - 1).to_string()
                    } else {
                        tail(&s, n - 1).to_string()
                    }
                })
                .collect();
            t = clean(cut, order);
            n -= 1;
        }

        // If "ab" is a possible prefix, "abc" adds nothing. Sorting puts "ab"
        // right before the strings it covers.
        let covers: fn(&str, &str) -> bool = match order {
            SetOrder::Natural => has_prefix,
            SetOrder::Suffix => has_suffix,
        };
        let mut out: Vec<String> = Vec::with_capacity(t.len());
        for s in t {
            if out.last().is_none_or(|prev| !covers(&s, prev)) {
                out.push(s);
            }
        }
        out
    }

    /// Info for `xy`.
    pub fn concat(x: RegexInfo, y: RegexInfo, limits: &Limits) -> RegexInfo {
        let mut xy = RegexInfo::new();
        xy.can_empty = x.can_empty && y.can_empty;

        // If every string in x.suffix + y.prefix is long enough, one of them
        // must appear, and its trigrams need not be covered by xy's own
        // prefix or suffix.
        let boundary = if x.exact.is_none()
            && y.exact.is_none()
            && x.suffix.len() <= limits.max_set
            && y.prefix.len() <= limits.max_set
            && min_len(&x.suffix) + min_len(&y.prefix) >= TRIGRAM_LEN
        {
            Some(cross(&x.suffix, &y.prefix, SetOrder::Natural))
        } else {
            None
        };

        match (&x.exact, &y.exact) {
            (Some(xe), Some(ye)) => xy.exact = Some(cross(xe, ye, SetOrder::Natural)),
            _ => {
                xy.prefix = match &x.exact {
                    Some(xe) => cross(xe, &y.prefix, SetOrder::Natural),
                    None if x.can_empty => {
                        union(x.prefix.clone(), y.prefix.clone(), SetOrder::Natural)
                    }
                    None => x.prefix.clone(),
                };
                xy.suffix = match &y.exact {
                    Some(ye) => cross(&x.suffix, ye, SetOrder::Suffix),
                    None if y.can_empty => {
                        union(y.suffix.clone(), x.suffix.clone(), SetOrder::Suffix)
                    }
                    None => y.suffix.clone(),
                };
            }
        }

        xy.match_q = x.match_q.and(y.match_q);
        if let Some(strings) = boundary {
            xy.and_trigrams(&strings);
        }

        xy.simplify(false, limits);
        xy
    }

    pub fn alternate(mut x: RegexInfo, mut y: RegexInfo, limits: &Limits) -> RegexInfo {
        let mut xy = RegexInfo::new();
        match (x.exact.take(), y.exact.take()) {
            (Some(xe), Some(ye)) => xy.exact = Some(union(xe, ye, SetOrder::Natural)),
            (Some(xe), None) => {
                xy.prefix = union(xe.clone(), mem::take(&mut y.prefix), SetOrder::Natural);
                xy.suffix = union(xe.clone(), mem::take(&mut y.suffix), SetOrder::Suffix);
                x.and_trigrams(&xe);
            }
            (None, Some(ye)) => {
                xy.prefix = union(mem::take(&mut x.prefix), ye.clone(), SetOrder::Natural);
                xy.suffix = union(mem::take(&mut x.suffix), ye.clone(), SetOrder::Suffix);
                y.and_trigrams(&ye);
            }
            (None, None) => {
                xy.prefix = union(x.prefix, y.prefix, SetOrder::Natural);
                xy.suffix = union(x.suffix, y.suffix, SetOrder::Suffix);
            }
        }
        xy.can_empty = x.can_empty || y.can_empty;
        xy.match_q = x.match_q.or(y.match_q);

        xy.simplify(false, limits);
        xy
    }
}
