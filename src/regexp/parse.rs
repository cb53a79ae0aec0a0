use regex_syntax::hir::{Class, ClassUnicode, ClassUnicodeRange, Hir, HirKind, Look};

use crate::error::{Error, Result};
use crate::regexp::ast::{Quantifier, RegexNode};

/// Parses `source` into a [`RegexNode`] tree.
///
/// Parsing is delegated to `regex-syntax`; its HIR is then lowered into the
/// node set the analyzer understands. Case-insensitive flags arrive already
/// folded into character classes.
pub fn parse(source: &str) -> Result<RegexNode> {
    let hir = regex_syntax::Parser::new().parse(source)?;
    lower(&hir)
}

fn lower(hir: &Hir) -> Result<RegexNode> {
    let node = match hir.kind() {
        HirKind::Empty => RegexNode::EmptyMatch,
        HirKind::Literal(lit) => {
            let s = std::str::from_utf8(&lit.0)
                .map_err(|_| Error::unsupported(format!("non-UTF-8 literal {:?}", lit)))?;
            RegexNode::literal(s)
        }
        HirKind::Class(cls) => lower_class(cls),
        HirKind::Look(look) => lower_look(*look),
        HirKind::Repetition(rep) => {
            let sub = Box::new(lower(&rep.sub)?);
            match (rep.min, rep.max) {
                (0, Some(1)) => RegexNode::Repetition(Quantifier::ZeroOrOne, sub),
                (1, None) => RegexNode::Repetition(Quantifier::OneOrMore, sub),
                (0, None) => RegexNode::Repetition(Quantifier::ZeroOrMore, sub),
                (min, max) => RegexNode::Repeat { min, max, sub },
            }
        }
        HirKind::Capture(cap) => RegexNode::Capture(Box::new(lower(&cap.sub)?)),
        HirKind::Concat(subs) => RegexNode::Concat(lower_all(subs)?),
        HirKind::Alternation(subs) => RegexNode::Union(lower_all(subs)?),
    };
    Ok(node)
}

fn lower_all(subs: &[Hir]) -> Result<Vec<RegexNode>> {
    subs.iter().map(lower).collect()
}

fn lower_look(look: Look) -> RegexNode {
    match look {
        Look::Start => RegexNode::BeginText,
        Look::End => RegexNode::EndText,
        Look::StartLF | Look::StartCRLF => RegexNode::BeginLine,
        Look::EndLF | Look::EndCRLF => RegexNode::EndLine,
        Look::WordAsciiNegate | Look::WordUnicodeNegate => RegexNode::NoWordBoundary,
        _ => RegexNode::WordBoundary,
    }
}

fn lower_class(cls: &Class) -> RegexNode {
    let ranges: Vec<(char, char)> = match cls {
        Class::Unicode(u) => u.ranges().iter().map(|r| (r.start(), r.end())).collect(),
        Class::Bytes(b) => b
            .ranges()
            .iter()
            .map(|r| (r.start() as char, r.end() as char))
            .collect(),
    };
    if ranges.is_empty() {
        return RegexNode::NoMatch;
    }
    if let Class::Unicode(u) = cls {
        if *u == any_char() {
            return RegexNode::AnyChar;
        }
        if *u == any_char_not_nl() {
            return RegexNode::AnyCharNotNL;
        }
    }
    RegexNode::CharClass(bracket_source(&ranges))
}

fn any_char() -> ClassUnicode {
    ClassUnicode::new([ClassUnicodeRange::new('\0', char::MAX)])
}

fn any_char_not_nl() -> ClassUnicode {
    ClassUnicode::new([
        ClassUnicodeRange::new('\0', '\x09'),
        ClassUnicodeRange::new('\x0B', char::MAX),
    ])
}

/// Renders class ranges as bracket-expression source.
fn bracket_source(ranges: &[(char, char)]) -> String {
    let mut s = String::new();
    for &(start, end) in ranges {
        push_class_char(&mut s, start);
        if end != start {
            s.push('-');
            push_class_char(&mut s, end);
        }
    }
    s
}

fn push_class_char(s: &mut String, c: char) {
    if c.is_control() || c.is_whitespace() {
        s.push_str(&format!("\\x{{{:X}}}", c as u32));
    } else {
        regex_syntax::escape_into(c.encode_utf8(&mut [0; 4]), s);
    }
}
