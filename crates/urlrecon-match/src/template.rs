//! Placeholder scanning for URL templates.
//!
//! A placeholder is `{{` followed by one or more ASCII word characters and
//! `}}`. Anything else, including half-open or empty markers, stays literal.

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{take, take_till, take_while};

/// A segment of a template string - either literal text or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A URL template split into literal text and placeholder occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = parse_segments(&source);
        Self { source, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders().count()
    }

    pub fn is_literal(&self) -> bool {
        self.placeholder_count() == 0
    }

    /// Substitutes `values` into the placeholder occurrences left to right.
    ///
    /// Each occurrence consumes the next value, so a name used twice can be
    /// bound to two different values. Occurrences without a value keep their
    /// original marker text.
    pub fn bind<S: AsRef<str>>(&self, values: &[S]) -> String {
        let mut values = values.iter();
        let mut bound = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => bound.push_str(text),
                Segment::Placeholder(name) => match values.next() {
                    Some(value) => bound.push_str(value.as_ref()),
                    None => {
                        bound.push_str("{{");
                        bound.push_str(name);
                        bound.push_str("}}");
                    }
                },
            }
        }

        bound
    }

    /// Regex source for a full-string, case-insensitive match with one
    /// non-greedy capture group per placeholder occurrence.
    pub fn regex_source(&self) -> String {
        let mut regex_str = String::from("(?i)^");

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => regex_str.push_str(&regex::escape(text)),
                Segment::Placeholder(_) => regex_str.push_str("(.+?)"),
            }
        }

        regex_str.push('$');
        regex_str
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

// ============ Segment Parsing ============

enum Piece<'a> {
    Text(&'a str),
    Name(&'a str),
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn placeholder<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    delimited("{{", take_while(1.., is_word), "}}")
        .map(Piece::Name)
        .parse_next(input)
}

fn text<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    alt((take_till(1.., '{'), take(1usize)))
        .map(Piece::Text)
        .parse_next(input)
}

pub fn parse_segments(input: &str) -> Vec<Segment> {
    let mut remaining = input;
    let pieces: ModalResult<Vec<Piece<'_>>> =
        repeat(0.., alt((placeholder, text))).parse_next(&mut remaining);

    // Every alternative consumes at least one char, so the scan cannot stall.
    let Ok(pieces) = pieces else {
        return vec![Segment::Literal(input.to_string())];
    };

    let mut segments = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Name(name) => segments.push(Segment::Placeholder(name.to_string())),
            Piece::Text(text) => match segments.last_mut() {
                Some(Segment::Literal(literal)) => literal.push_str(text),
                _ => segments.push(Segment::Literal(text.to_string())),
            },
        }
    }

    segments
}
