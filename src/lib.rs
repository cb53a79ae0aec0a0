//! Trigram queries for regular expressions.
//!
//! Given a regex, compute a boolean query over trigrams (three-character
//! substrings) that every matching text satisfies. A trigram index can use
//! the query to skip documents that cannot match before running the regex.
//!
//! ```
//! use regex_trigram::query_pattern;
//!
//! let q = query_pattern("a[bc]d").unwrap();
//! assert_eq!(q.to_string(), "(abd|acd)");
//! ```

pub mod error;
pub mod limits;
pub mod query;
pub mod regexp;
pub mod string_set;

pub use error::{Error, Result};
pub use limits::Limits;
pub use query::{Query, QueryOp};
pub use regexp::{
    Analyzer, Quantifier, RegexInfo, RegexNode, analyze, parse, query, query_pattern,
};
