//! The path-specification mini-language.
//!
//! ```text
//! list  := node (',' node)*
//! node  := name ('[' list ']')? range?
//! range := '{' n '}' | '{' n? ',' n? '}'   (at least one bound)
//! name  := any non-empty run of characters except , [ ]
//! ```
//!
//! `a,b[c,d]` selects the top-level properties `a` and `b`, and only the
//! children `c` and `d` of `b`. `jobs[name]{3,6}` selects elements 3 to 5
//! of `jobs`, each reduced to its `name`.
//!
//! A `{` opens a range only when a complete range follows and ends the
//! node, i.e. is followed by `,`, `]` or the end of input. Anywhere else
//! braces are part of the name, so `a{b}` selects the property `a{b}`.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::Range;
use crate::error::{Expected, PathSyntaxError};

// -----------------------------------------------------------------------------
// PathTree

/// A parsed path specification: the properties to keep at one level, each
/// with the subtree applying below it.
///
/// Naming the same property twice keeps the last occurrence.
///
/// # Examples
///
/// ```
/// use bx_export::PathTree;
///
/// let tree = PathTree::parse("a,b[c,d]{,10},e").unwrap();
/// let b = tree.child("b").unwrap();
///
/// assert!(tree.child("a").unwrap().is_leaf());
/// assert!(b.child("c").is_some() && b.child("x").is_none());
/// assert_eq!(b.range().max(), 10);
/// assert_eq!(tree.to_string(), "a,b[c,d]{,10},e");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTree {
    children: BTreeMap<String, PathTree>,
    range: Range,
}

impl PathTree {
    /// Parses a specification; see the [module docs](self) for the grammar.
    pub fn parse(spec: &str) -> Result<Self, PathSyntaxError> {
        let mut reader = Reader::new(spec);
        let mut tree = PathTree::default();
        list(&mut reader, &mut tree)?;
        reader.expect(Token::End, Expected::EndOfInput)?;
        Ok(tree)
    }

    /// The subtree for the property `name`, if it was selected.
    #[inline]
    pub fn child(&self, name: &str) -> Option<&PathTree> {
        self.children.get(name)
    }

    /// Selected names in ascending order.
    #[inline]
    pub fn children(&self) -> impl ExactSizeIterator<Item = (&str, &PathTree)> {
        self.children.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    /// Range of the sequence value selected by this node.
    #[inline]
    pub const fn range(&self) -> Range {
        self.range
    }

    /// `true` if nothing below this node is selected.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl FromStr for PathTree {
    type Err = PathSyntaxError;

    #[inline]
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Self::parse(spec)
    }
}

/// Prints the canonical specification, names sorted.
impl fmt::Display for PathTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, child)) in self.children.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(name)?;
            if !child.is_leaf() {
                write!(f, "[{child}]")?;
            }
            if !child.range.is_all() {
                write!(f, "{}", child.range)?;
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Parser

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Comma,
    OpenBracket,
    CloseBracket,
    Range(Range),
    /// Anything else, e.g. a name.
    Text,
    End,
}

/// Reads a range at the start of `text`, returning it with its byte length.
fn range_suffix(text: &str) -> Option<(Range, usize)> {
    let body = text.strip_prefix('{')?;
    let close = body.find('}')?;
    let len = close + 2;
    if !matches!(text[len..].chars().next(), None | Some(',' | ']')) {
        return None;
    }
    let range = match body[..close].split_once(',') {
        None => Range::single(bound(&body[..close])??),
        Some((min, max)) => match (bound(min)?, bound(max)?) {
            (None, None) => return None,
            (min, max) => Range::new(min.unwrap_or(0), max.unwrap_or(usize::MAX)),
        },
    };
    Some((range, len))
}

/// `Some(None)` for a blank bound, `None` if it is not a number.
fn bound(text: &str) -> Option<Option<usize>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(None);
    }
    text.parse().ok().map(Some)
}

/// Byte length of the name at the start of `text`.
fn name_len(text: &str) -> usize {
    text.char_indices()
        .find(|&(index, c)| {
            matches!(c, ',' | '[' | ']')
                || (c == '{' && index > 0 && range_suffix(&text[index..]).is_some())
        })
        .map_or(text.len(), |(index, _)| index)
}

struct Reader<'s> {
    text: &'s str,
    pos: usize,
}

impl<'s> Reader<'s> {
    const fn new(text: &'s str) -> Self {
        Self { text, pos: 0 }
    }

    /// The next token and the byte offset right after it.
    fn peek(&self) -> (Token, usize) {
        let rest = &self.text[self.pos..];
        let token = match rest.chars().next() {
            None => return (Token::End, self.pos),
            Some(',') => Token::Comma,
            Some('[') => Token::OpenBracket,
            Some(']') => Token::CloseBracket,
            Some(_) => {
                if let Some((range, len)) = range_suffix(rest) {
                    return (Token::Range(range), self.pos + len);
                }
                return (Token::Text, self.pos + name_len(rest));
            }
        };
        (token, self.pos + 1)
    }

    fn accept(&mut self, expected: Token) -> bool {
        let (token, next) = self.peek();
        if token == expected {
            self.pos = next;
        }
        token == expected
    }

    fn expect(&mut self, token: Token, expected: Expected) -> Result<(), PathSyntaxError> {
        if self.accept(token) {
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    /// Names may start with a brace, so this does not go through `peek`.
    fn name(&mut self) -> Option<&'s str> {
        let rest = &self.text[self.pos..];
        let len = name_len(rest);
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn error(&self, expected: Expected) -> PathSyntaxError {
        PathSyntaxError::new(expected, self.pos, self.text)
    }
}

fn list(reader: &mut Reader<'_>, tree: &mut PathTree) -> Result<(), PathSyntaxError> {
    loop {
        node(reader, tree)?;
        if !reader.accept(Token::Comma) {
            return Ok(());
        }
    }
}

fn node(reader: &mut Reader<'_>, tree: &mut PathTree) -> Result<(), PathSyntaxError> {
    let Some(name) = reader.name() else {
        return Err(reader.error(Expected::Name));
    };
    let mut subtree = PathTree::default();
    if reader.accept(Token::OpenBracket) {
        list(reader, &mut subtree)?;
        reader.expect(Token::CloseBracket, Expected::CloseBracket)?;
    }
    match reader.peek() {
        (Token::Range(range), next) => {
            subtree.range = range;
            reader.pos = next;
        }
        // Only a range may follow `]`.
        (Token::Text, _) => return Err(reader.error(Expected::RangeBound)),
        _ => {}
    }
    tree.children.insert(name.into(), subtree);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn names(tree: &PathTree) -> Vec<&str> {
        tree.children().map(|(name, _)| name).collect()
    }

    #[test]
    fn nested_lists() {
        let tree = PathTree::parse("a,b[c,d],e").unwrap();
        assert_eq!(names(&tree), ["a", "b", "e"]);
        assert_eq!(names(tree.child("b").unwrap()), ["c", "d"]);
        assert!(tree.child("a").unwrap().is_leaf());
        assert!(tree.range().is_all());
    }

    #[test]
    fn deep_nesting_and_odd_names() {
        let tree = PathTree::parse("jobs[builds[number,result]],über name").unwrap();
        let builds = tree.child("jobs").and_then(|jobs| jobs.child("builds")).unwrap();
        assert_eq!(names(builds), ["number", "result"]);
        assert!(tree.child("über name").is_some());
    }

    #[test]
    fn duplicates_keep_last() {
        let tree = PathTree::parse("a[x],a[y]").unwrap();
        assert_eq!(names(tree.child("a").unwrap()), ["y"]);
    }

    #[test]
    fn ranges() {
        let tree = PathTree::parse("a{1,3},b{,3},c{2,},d{5},e[f]{ 0 , 1 }").unwrap();
        let range = |name| tree.child(name).unwrap().range();
        assert_eq!(range("a"), Range::new(1, 3));
        assert_eq!(range("b"), Range::new(0, 3));
        assert_eq!(range("c"), Range::new(2, usize::MAX));
        assert_eq!(range("d"), Range::new(5, 6));
        assert_eq!(range("e"), Range::new(0, 1));
        assert_eq!(tree.to_string(), "a{1,3},b{,3},c{2,},d{5},e[f]{0}");
    }

    #[test]
    fn braces_outside_ranges_belong_to_names() {
        let tree = PathTree::parse("a{b},c{},{1},e{2}x,f{1},g[h{,2}]").unwrap();
        assert_eq!(names(&tree), ["a{b}", "c{}", "e{2}x", "f", "g", "{1}"]);
        assert_eq!(tree.child("f").unwrap().range(), Range::single(1));
        assert!(tree.child("a{b}").unwrap().range().is_all());
        assert_eq!(tree.child("g").unwrap().child("h").unwrap().range(), Range::new(0, 2));
    }

    #[test]
    fn syntax_errors() {
        let cases = [
            ("", Expected::Name, 0),
            ("a,", Expected::Name, 2),
            (",b", Expected::Name, 0),
            ("a[", Expected::Name, 2),
            ("a[b", Expected::CloseBracket, 3),
            ("a[b,c", Expected::CloseBracket, 5),
            ("a[]", Expected::Name, 2),
            ("a[b,,]", Expected::Name, 4),
            ("a]", Expected::EndOfInput, 1),
            ("a[b]{}", Expected::RangeBound, 4),
            ("a[b]{x}", Expected::RangeBound, 4),
            ("a[b]{,}", Expected::RangeBound, 4),
            ("a[b]{1,2,3}", Expected::RangeBound, 4),
            ("a[b]{1}c", Expected::RangeBound, 4),
            ("a[b]c", Expected::RangeBound, 4),
            ("ü[b", Expected::CloseBracket, 3),
        ];
        for (spec, expected, offset) in cases {
            let err = PathTree::parse(spec).unwrap_err();
            assert_eq!((err.expected(), err.offset()), (expected, offset), "{spec:?}");
            assert_eq!(err.spec(), spec);
        }
    }

    #[test]
    fn from_str() {
        let tree: PathTree = "x".parse().unwrap();
        assert_eq!(names(&tree), ["x"]);
    }
}
