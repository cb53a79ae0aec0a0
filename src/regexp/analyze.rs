use log::{debug, trace};

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::query::Query;
use crate::regexp::ast::{Quantifier, RegexNode};
use crate::regexp::class::expand_char_class;
use crate::regexp::info::RegexInfo;

/// Derives trigram queries from regex trees under a set of [`Limits`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    limits: Limits,
}

impl Analyzer {
    pub fn new(limits: Limits) -> Self {
        Analyzer { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the query any text matching `node` satisfies. Exact-string
    /// knowledge is fully folded into the result.
    pub fn query(&self, node: &RegexNode) -> Result<Query> {
        let mut info = self.analyze(node)?;
        info.simplify(true, &self.limits);
        info.add_exact();
        debug!("trigram query: {}", info.match_q);
        Ok(info.match_q)
    }

    pub fn analyze(&self, node: &RegexNode) -> Result<RegexInfo> {
        let mut info = match node {
            RegexNode::NoMatch => return Ok(RegexInfo::no_match()),

            // Assertions only constrain where a match sits, not what it
            // contains, so they look like the empty string here.
            RegexNode::EmptyMatch
            | RegexNode::BeginLine
            | RegexNode::EndLine
            | RegexNode::BeginText
            | RegexNode::EndText
            | RegexNode::WordBoundary
            | RegexNode::NoWordBoundary => return Ok(RegexInfo::empty_string()),

            RegexNode::Literal(c) => RegexInfo::exact(vec![c.to_string()]),

            RegexNode::AnyChar | RegexNode::AnyCharNotNL => return Ok(RegexInfo::any_char()),

            RegexNode::Capture(sub) => return self.analyze(sub),

            RegexNode::Concat(subs) => {
                return self.fold(RegexInfo::concat, subs, RegexInfo::empty_string());
            }

            RegexNode::Union(subs) => {
                return self.fold(RegexInfo::alternate, subs, RegexInfo::no_match());
            }

            RegexNode::Repetition(Quantifier::ZeroOrOne, sub) => {
                let x = self.analyze(sub)?;
                return Ok(RegexInfo::alternate(x, RegexInfo::empty_string(), &self.limits));
            }

            // Nothing is known; assume the worst.
            RegexNode::Repetition(Quantifier::ZeroOrMore, _) => return Ok(RegexInfo::any_match()),

            RegexNode::Repetition(Quantifier::OneOrMore, sub) => self.at_least_once(sub)?,

            RegexNode::Repeat { min, max, sub } => {
                if max.is_some_and(|max| max < *min) {
                    return Err(Error::unsupported(format!("repeat {{{},{:?}}}", min, max)));
                }
                if *min == 0 {
                    return Ok(RegexInfo::any_match());
                }
                self.at_least_once(sub)?
            }

            RegexNode::CharClass(bracket) => {
                let chars = expand_char_class(bracket, self.limits.max_class)?;
                if chars.is_empty() {
                    return Ok(RegexInfo::no_match());
                }
                // Overestimating a large class is fine.
                if chars.len() > self.limits.max_class {
                    trace!("class [{}] treated as any char", bracket);
                    return Ok(RegexInfo::any_char());
                }
                RegexInfo::exact(chars.iter().map(|c| c.to_string()).collect())
            }
        };
        info.simplify(false, &self.limits);
        trace!("analyzed {:?}: {:?}", node, info);
        Ok(info)
    }

    /// At least one copy of `sub` is present, so its boundary strings still
    /// hold even though the exact set no longer does.
    fn at_least_once(&self, sub: &RegexNode) -> Result<RegexInfo> {
        let mut info = self.analyze(sub)?;
        if let Some(exact) = info.exact.take() {
            info.prefix = exact.clone();
            info.suffix = exact;
        }
        Ok(info)
    }

    fn fold(
        &self,
        f: fn(RegexInfo, RegexInfo, &Limits) -> RegexInfo,
        subs: &[RegexNode],
        zero: RegexInfo,
    ) -> Result<RegexInfo> {
        let (first, rest) = match subs.split_first() {
            Some(split) => split,
            None => return Ok(zero),
        };
        let mut info = self.analyze(first)?;
        for sub in rest {
            info = f(info, self.analyze(sub)?, &self.limits);
        }
        Ok(info)
    }
}

/// [`Analyzer::analyze`] with default limits.
pub fn analyze(node: &RegexNode) -> Result<RegexInfo> {
    Analyzer::default().analyze(node)
}

/// [`Analyzer::query`] with default limits.
pub fn query(node: &RegexNode) -> Result<Query> {
    Analyzer::default().query(node)
}
