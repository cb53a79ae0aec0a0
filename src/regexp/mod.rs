//! From a regex to the trigram query every match satisfies.
//!
//! [`parse`] turns pattern source into a [`RegexNode`] tree, and an
//! [`Analyzer`] walks the tree bottom-up, tracking a [`RegexInfo`] per node.

pub mod analyze;
pub mod ast;
pub mod class;
pub mod info;
pub mod parse;

pub use analyze::{Analyzer, analyze, query};
pub use ast::{Quantifier, RegexNode};
pub use class::expand_char_class;
pub use info::RegexInfo;
pub use parse::parse;

use crate::error::Result;
use crate::query::Query;

/// Parses `pattern` and returns its trigram query under default limits.
pub fn query_pattern(pattern: &str) -> Result<Query> {
    let node = parse(pattern)?;
    query(&node)
}
