//! Boolean queries over trigrams.
//!
//! A [`Query`] is a necessary condition for a text to match a regex: every
//! matching text contains a set of trigrams that satisfies it. The `and`/`or`
//! combinators simplify as they build, so the tree stays small enough to be
//! evaluated against posting lists cheaply.
//!
//! Combinators take their operands by value and return a new tree. A query
//! that has been handed out is never rewritten behind its owner's back.

use std::collections::HashSet;
use std::fmt;

use crate::limits::TRIGRAM_LEN;
use crate::string_set::{self, SetOrder, is_subset, min_len, split_common};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOp {
    All,
    None,
    And,
    Or,
}

impl QueryOp {
    fn dual(self) -> QueryOp {
        match self {
            QueryOp::And => QueryOp::Or,
            QueryOp::Or => QueryOp::And,
            op => op,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub op: QueryOp,
    pub trigram: Vec<String>, // Sorted and unique
    pub sub: Vec<Query>,
}

impl Default for Query {
    fn default() -> Self {
        Query::all()
    }
}

impl Query {
    pub fn all() -> Self {
        Query { op: QueryOp::All, trigram: Vec::new(), sub: Vec::new() }
    }

    pub fn none() -> Self {
        Query { op: QueryOp::None, trigram: Vec::new(), sub: Vec::new() }
    }

    /// A node of `op` over the given trigrams, with no children.
    pub fn trigrams(op: QueryOp, trigram: Vec<String>) -> Self {
        let trigram = string_set::clean(trigram, SetOrder::Natural);
        Query { op, trigram, sub: Vec::new() }
    }

    pub fn and(self, other: Query) -> Query {
        self.and_or(other, QueryOp::And)
    }

    pub fn or(self, other: Query) -> Query {
        self.and_or(other, QueryOp::Or)
    }

    fn is_atom(&self) -> bool {
        self.trigram.len() == 1 && self.sub.is_empty()
    }

    fn unwrap_single(mut self) -> Query {
        if self.trigram.is_empty() && self.sub.len() == 1 {
            if let Some(only) = self.sub.pop() {
                return only;
            }
        }
        self
    }

    fn and_or(self, other: Query, op: QueryOp) -> Query {
        let mut q = self.unwrap_single();
        let mut r = other.unwrap_single();

        // If q => r, then q AND r == q and q OR r == r.
        if q.implies(&r) {
            return if op == QueryOp::And { q } else { r };
        }
        if r.implies(&q) {
            return if op == QueryOp::And { r } else { q };
        }

        // Both are AND or OR from here on. Merge when the shapes line up.
        let q_atom = q.is_atom();
        let r_atom = r.is_atom();

        if q.op == op && (r.op == op || r_atom) {
            q.trigram = string_set::union(q.trigram, r.trigram, SetOrder::Natural);
            q.sub.extend(r.sub);
            return q;
        }
        if r.op == op && q_atom {
            r.trigram = string_set::union(r.trigram, q.trigram, SetOrder::Natural);
            return r;
        }
        if q_atom && r_atom {
            q.op = op;
            q.trigram = string_set::union(q.trigram, r.trigram, SetOrder::Natural);
            return q;
        }

        if q.op == op {
            q.sub.push(r);
            return q;
        }
        if r.op == op {
            r.sub.push(q);
            return r;
        }

        // An AND of ORs or an OR of ANDs. Factor out common trigrams:
        //
        //   (abc|def|ghi) AND (abc|def|jkl) => (abc|def) OR (ghi AND jkl)
        //   (abc&def&ghi) OR (abc&def&jkl)  => (abc&def) AND (ghi OR jkl)
        let (common, q_trig, r_trig) = split_common(q.trigram, r.trigram);
        q.trigram = q_trig;
        r.trigram = r_trig;

        if !common.is_empty() {
            q.maybe_rewrite(op);
            r.maybe_rewrite(op);
            // Recurse: the stripped operands may now simplify further.
            let s = q.and_or(r, op);
            let other_op = op.dual();
            let t = Query { op: other_op, trigram: common, sub: Vec::new() };
            return t.and_or(s, other_op);
        }

        Query { op, trigram: Vec::new(), sub: vec![q, r] }
    }

    /// Reports whether every trigram set satisfying `self` also satisfies
    /// `other`. False negatives are allowed, false positives are not.
    pub fn implies(&self, other: &Query) -> bool {
        if self.op == QueryOp::None || other.op == QueryOp::All {
            return true;
        }
        if self.op == QueryOp::All || other.op == QueryOp::None {
            return false;
        }

        if self.op == QueryOp::And || (self.op == QueryOp::Or && self.is_atom()) {
            return trigrams_imply(&self.trigram, other);
        }

        self.op == QueryOp::Or
            && other.op == QueryOp::Or
            && !self.trigram.is_empty()
            && self.sub.is_empty()
            && is_subset(&self.trigram, &other.trigram)
    }

    /// Collapses a degenerate AND/OR node: no leaves becomes ALL (for AND)
    /// or NONE (for OR), a lone child replaces the node, and a lone trigram
    /// takes on `op`.
    pub fn maybe_rewrite(&mut self, op: QueryOp) {
        if self.op != QueryOp::And && self.op != QueryOp::Or {
            return;
        }
        let n = self.sub.len() + self.trigram.len();
        if n > 1 {
            return;
        }
        if n == 0 {
            *self = if self.op == QueryOp::And { Query::all() } else { Query::none() };
            return;
        }
        if let Some(only) = self.sub.pop() {
            *self = only;
            return;
        }
        self.op = op;
    }

    /// Returns `self AND (OR over s in strings of (AND of s's trigrams))`.
    /// Unchanged when some string is too short to guarantee a trigram.
    pub fn and_trigrams(self, strings: &[String]) -> Query {
        if min_len(strings) < TRIGRAM_LEN {
            return self;
        }
        let mut or_q = Query::none();
        for s in strings {
            let trig = string_set::trigrams_of(s);
            or_q = or_q.or(Query { op: QueryOp::And, trigram: trig, sub: Vec::new() });
        }
        self.and(or_q)
    }

    pub fn matches(&self, present: &HashSet<String>) -> bool {
        match self.op {
            QueryOp::All => true,
            QueryOp::None => false,
            QueryOp::And => {
                self.trigram.iter().all(|t| present.contains(t))
                    && self.sub.iter().all(|q| q.matches(present))
            }
            QueryOp::Or => {
                self.trigram.iter().any(|t| present.contains(t))
                    || self.sub.iter().any(|q| q.matches(present))
            }
        }
    }
}

fn trigrams_imply(t: &[String], q: &Query) -> bool {
    match q.op {
        QueryOp::Or => {
            if q.sub.iter().any(|sub| trigrams_imply(t, sub)) {
                return true;
            }
            t.iter().any(|tt| is_subset(std::slice::from_ref(tt), &q.trigram))
        }
        QueryOp::And => {
            if !q.sub.iter().all(|sub| trigrams_imply(t, sub)) {
                return false;
            }
            is_subset(&q.trigram, t)
        }
        _ => false,
    }
}

/// The set of trigrams occurring in `text`.
pub fn trigrams(text: &str) -> HashSet<String> {
    string_set::trigrams_of(text).into_iter().collect()
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            QueryOp::None => return f.write_str("-"),
            QueryOp::All => return f.write_str("+"),
            _ => {}
        }
        if self.is_atom() {
            return f.write_str(&self.trigram[0]);
        }

        let (start, sjoin, end, tjoin) = if self.op == QueryOp::And {
            ("", " ", "", " ")
        } else {
            ("(", ")|(", ")", "|")
        };
        f.write_str(start)?;
        f.write_str(&self.trigram.join(tjoin))?;
        for (i, sub) in self.sub.iter().enumerate() {
            if i > 0 || !self.trigram.is_empty() {
                f.write_str(sjoin)?;
            }
            write!(f, "{}", sub)?;
        }
        f.write_str(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and(t: &[&str]) -> Query {
        Query::trigrams(QueryOp::And, t.iter().map(|s| s.to_string()).collect())
    }

    fn or(t: &[&str]) -> Query {
        Query::trigrams(QueryOp::Or, t.iter().map(|s| s.to_string()).collect())
    }

    fn strs(t: &[&str]) -> Vec<String> {
        t.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_and_none_identities() {
        assert_eq!(Query::all().and(and(&["abc"])), and(&["abc"]));
        assert_eq!(and(&["abc"]).and(Query::all()), and(&["abc"]));
        assert_eq!(Query::none().or(and(&["abc"])), and(&["abc"]));
        assert_eq!(Query::none().and(and(&["abc"])), Query::none());
        assert_eq!(Query::all().or(and(&["abc"])), Query::all());
    }

    #[test]
    fn test_atoms_merge_sorted() {
        let q = and(&["xyz"]).or(and(&["abc"]));
        assert_eq!(q.op, QueryOp::Or);
        assert_eq!(q.trigram, strs(&["abc", "xyz"]));
        assert!(q.sub.is_empty());
    }

    #[test]
    fn test_same_op_merge() {
        let q = and(&["abc", "bcd"]).and(and(&["cde", "abc"]));
        assert_eq!(q, and(&["abc", "bcd", "cde"]));
    }

    #[test]
    fn test_implication_absorbs() {
        // abc AND bcd implies abc.
        let q = and(&["abc", "bcd"]).and(and(&["abc"]));
        assert_eq!(q, and(&["abc", "bcd"]));
        let q = and(&["abc", "bcd"]).or(and(&["abc"]));
        assert_eq!(q, and(&["abc"]));
        // (abc|bcd) implies (abc|bcd|cde).
        let q = or(&["abc", "bcd"]).or(or(&["abc", "bcd", "cde"]));
        assert_eq!(q, or(&["abc", "bcd", "cde"]));
    }

    #[test]
    fn test_factor_common_trigrams() {
        let q = and(&["abc", "bcD"]).or(and(&["abc", "bcd"]));
        assert_eq!(q.op, QueryOp::And);
        assert_eq!(q.trigram, strs(&["abc"]));
        assert_eq!(q.sub, vec![or(&["bcD", "bcd"])]);
        assert_eq!(q.to_string(), "abc (bcD|bcd)");
    }

    #[test]
    fn test_factor_common_trigrams_dual() {
        let q = or(&["abc", "def", "ghi"]).and(or(&["abc", "def", "jkl"]));
        assert_eq!(q.op, QueryOp::Or);
        assert_eq!(q.trigram, strs(&["abc", "def"]));
        assert_eq!(q.sub, vec![and(&["ghi", "jkl"])]);
    }

    #[test]
    fn test_mixed_ops_nest() {
        let q = or(&["abc", "bcd"]).and(or(&["xyz", "yzw"]));
        assert_eq!(q.op, QueryOp::And);
        assert!(q.trigram.is_empty());
        assert_eq!(q.sub, vec![or(&["abc", "bcd"]), or(&["xyz", "yzw"])]);
    }

    #[test]
    fn test_implies_edges() {
        assert!(Query::none().implies(&Query::none()));
        assert!(Query::none().implies(&and(&["abc"])));
        assert!(and(&["abc"]).implies(&Query::all()));
        assert!(Query::all().implies(&Query::all()));
        assert!(!Query::all().implies(&and(&["abc"])));
        assert!(!and(&["abc"]).implies(&Query::none()));
        assert!(and(&["abc"]).implies(&or(&["abc", "xyz"])));
        assert!(!or(&["abc", "xyz"]).implies(&and(&["abc"])));
    }

    #[test]
    fn test_maybe_rewrite() {
        let mut q = Query { op: QueryOp::And, trigram: Vec::new(), sub: Vec::new() };
        q.maybe_rewrite(QueryOp::Or);
        assert_eq!(q, Query::all());

        let mut q = Query { op: QueryOp::Or, trigram: Vec::new(), sub: Vec::new() };
        q.maybe_rewrite(QueryOp::And);
        assert_eq!(q, Query::none());

        let mut q = and(&["abc"]);
        q.maybe_rewrite(QueryOp::Or);
        assert_eq!(q, or(&["abc"]));

        let mut q = Query { op: QueryOp::Or, trigram: Vec::new(), sub: vec![and(&["abc", "bcd"])] };
        q.maybe_rewrite(QueryOp::Or);
        assert_eq!(q, and(&["abc", "bcd"]));
    }

    #[test]
    fn test_and_trigrams() {
        let q = Query::all().and_trigrams(&strs(&["abcd"]));
        assert_eq!(q, and(&["abc", "bcd"]));

        let q = Query::all().and_trigrams(&strs(&["abd", "acd"]));
        assert_eq!(q, or(&["abd", "acd"]));

        // One short string means no trigram is guaranteed.
        let q = Query::all().and_trigrams(&strs(&["abcd", "ab"]));
        assert_eq!(q, Query::all());
        assert_eq!(Query::all().and_trigrams(&[]), Query::all());
    }

    #[test]
    fn test_display() {
        assert_eq!(Query::all().to_string(), "+");
        assert_eq!(Query::none().to_string(), "-");
        assert_eq!(and(&["abc"]).to_string(), "abc");
        assert_eq!(and(&["abc", "bcd"]).to_string(), "abc bcd");
        assert_eq!(or(&["abd", "acd"]).to_string(), "(abd|acd)");
        let q = Query {
            op: QueryOp::Or,
            trigram: strs(&["xyz"]),
            sub: vec![and(&["abc", "bcd"]), and(&["acd"])],
        };
        assert_eq!(q.to_string(), "(xyz)|(abc bcd)|(acd)");
    }

    #[test]
    fn test_matches() {
        let q = and(&["abc"]).and(or(&["bcd", "bce"]));
        assert!(q.matches(&trigrams("abcd")));
        assert!(q.matches(&trigrams("xabce")));
        assert!(!q.matches(&trigrams("abcf")));
        assert!(!q.matches(&trigrams("bcd")));
        assert!(Query::all().matches(&HashSet::new()));
        assert!(!Query::none().matches(&trigrams("anything")));
    }
}
