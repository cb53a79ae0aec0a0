use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A parsed regular expression, as consumed by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexNode {
    /// Matches no strings at all.
    NoMatch,
    /// Matches only the empty string.
    EmptyMatch,
    BeginLine,
    EndLine,
    BeginText,
    EndText,
    WordBoundary,
    NoWordBoundary,
    Literal(char),
    AnyChar,
    AnyCharNotNL,
    Capture(Box<RegexNode>),
    Concat(Vec<RegexNode>),
    Union(Vec<RegexNode>),
    Repetition(Quantifier, Box<RegexNode>),
    /// `x{min,max}`; `max` of `None` is unbounded.
    Repeat { min: u32, max: Option<u32>, sub: Box<RegexNode> },
    /// A bracket expression, without the surrounding `[` and `]`.
    CharClass(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `?`
    ZeroOrOne,
    /// `+`
    OneOrMore,
    /// `*`
    ZeroOrMore,
}

impl FromStr for Quantifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "?" => Ok(Quantifier::ZeroOrOne),
            "+" => Ok(Quantifier::OneOrMore),
            "*" => Ok(Quantifier::ZeroOrMore),
            _ => Err(Error::unsupported(format!("repetition quantifier {:?}", s))),
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quantifier::ZeroOrOne => "?",
            Quantifier::OneOrMore => "+",
            Quantifier::ZeroOrMore => "*",
        };
        f.write_str(s)
    }
}

// Builders, mostly for hand-written trees.
impl RegexNode {
    /// A concatenation of one literal per character of `s`.
    pub fn literal(s: &str) -> RegexNode {
        let mut lits: Vec<RegexNode> = s.chars().map(RegexNode::Literal).collect();
        if lits.len() == 1 {
            return lits.remove(0);
        }
        RegexNode::Concat(lits)
    }

    pub fn class(bracket: &str) -> RegexNode {
        RegexNode::CharClass(bracket.to_string())
    }

    pub fn capture(sub: RegexNode) -> RegexNode {
        RegexNode::Capture(Box::new(sub))
    }

    pub fn repetition(q: Quantifier, sub: RegexNode) -> RegexNode {
        RegexNode::Repetition(q, Box::new(sub))
    }

    pub fn repeat(min: u32, max: Option<u32>, sub: RegexNode) -> RegexNode {
        RegexNode::Repeat { min, max, sub: Box::new(sub) }
    }
}
