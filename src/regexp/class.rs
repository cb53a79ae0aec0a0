use regex_syntax::hir::{Class, HirKind};

use crate::error::{Error, Result};

/// Lists the characters matched by the bracket expression `bracket` (given
/// without its surrounding `[` `]`), in ascending order.
///
/// Stops after `limit + 1` characters: callers only need to know whether a
/// class is larger than `limit`. An empty bracket matches nothing.
pub fn expand_char_class(bracket: &str, limit: usize) -> Result<Vec<char>> {
    if bracket.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = format!("[{}]", bracket);
    let hir = regex_syntax::Parser::new()
        .parse(&pattern)
        .map_err(|e| Error::unsupported(format!("character class {}: {}", pattern, e)))?;

    let ranges: Vec<(char, char)> = match hir.kind() {
        HirKind::Class(Class::Unicode(cls)) => {
            cls.ranges().iter().map(|r| (r.start(), r.end())).collect()
        }
        HirKind::Class(Class::Bytes(cls)) => cls
            .ranges()
            .iter()
            .map(|r| (r.start() as char, r.end() as char))
            .collect(),
        // A one-character class comes back as a literal.
        HirKind::Literal(lit) => match std::str::from_utf8(&lit.0) {
            Ok(s) => s.chars().map(|c| (c, c)).collect(),
            Err(_) => return Err(Error::unsupported(format!("character class {}", pattern))),
        },
        _ => {
            return Err(Error::unsupported(format!(
                "{} is not a character class",
                pattern
            )));
        }
    };

    let mut chars = Vec::new();
    for (start, end) in ranges {
        for c in start..=end {
            chars.push(c);
            if chars.len() > limit {
                return Ok(chars);
            }
        }
    }
    Ok(chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_classes() {
        assert_eq!(expand_char_class("bc", 100).unwrap(), vec!['b', 'c']);
        assert_eq!(expand_char_class("aA", 100).unwrap(), vec!['A', 'a']);
        assert_eq!(expand_char_class("a", 100).unwrap(), vec!['a']);
        assert_eq!(expand_char_class("cba", 100).unwrap(), vec!['a', 'b', 'c']);
        assert_eq!(expand_char_class("0-9", 100).unwrap().len(), 10);
    }

    #[test]
    fn test_empty_class() {
        assert!(expand_char_class("", 100).unwrap().is_empty());
        assert!(expand_char_class(r"^\x00-\x{10FFFF}", 100).unwrap().is_empty());
    }

    #[test]
    fn test_stops_past_limit() {
        assert_eq!(expand_char_class("^a", 100).unwrap().len(), 101);
        assert_eq!(expand_char_class("a-z", 5).unwrap().len(), 6);
        assert_eq!(expand_char_class("a-z", 26).unwrap().len(), 26);
    }

    #[test]
    fn test_beyond_bmp() {
        assert_eq!(expand_char_class(r"\x{1F600}", 100).unwrap(), vec!['\u{1F600}']);
        assert_eq!(expand_char_class(r"a\x{1F600}", 100).unwrap(), vec!['a', '\u{1F600}']);
    }

    #[test]
    fn test_bad_class() {
        let err = expand_char_class("z-a", 100).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConstruct(_)));
    }
}
