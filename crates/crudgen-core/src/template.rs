//! `{{token}}` template parsing shared by the id-format, import-format,
//! and mutex resolvers.
//!
//! Determinism: parsing is pure, and matching walks segments left to right
//! with a single boundary rule per segment kind — the same template and
//! input always produce the same captures.

use serde::Serialize;
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

/// Marker that lets an import token match text containing `/` separators.
pub const GREEDY_MARKER: char = '%';

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

///
/// TemplateError
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, ThisError)]
pub enum TemplateError {
    #[error("empty token at byte {at}")]
    EmptyToken { at: usize },

    #[error("unterminated '{{{{' at byte {at}")]
    Unterminated { at: usize },
}

///
/// Segment
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Segment {
    /// Literal text between tokens, separators included.
    Literal(String),

    /// `{{name}}` — substitutes one value containing no `/`.
    Field(String),

    /// `{{%name}}` — substitutes a value that may span `/` separators.
    GreedyField(String),
}

impl Segment {
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Field(name) | Self::GreedyField(name) => Some(name),
        }
    }
}

///
/// Template
///
/// A parsed `{{token}}` template. The source string is preserved so a
/// resolved plan renders templates back out verbatim.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while !rest.is_empty() {
            let Some(start) = rest.find(OPEN) else {
                segments.push(Segment::Literal(rest.to_string()));
                break;
            };

            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let token_start = start + OPEN.len();
            let Some(end) = rest[token_start..].find(CLOSE) else {
                return Err(TemplateError::Unterminated { at: offset + start });
            };

            let raw = &rest[token_start..token_start + end];
            if raw.is_empty() || raw == "%" {
                return Err(TemplateError::EmptyToken { at: offset + start });
            }

            let segment = match raw.strip_prefix(GREEDY_MARKER) {
                Some(name) => Segment::GreedyField(name.to_string()),
                None => Segment::Field(raw.to_string()),
            };
            segments.push(segment);

            let consumed = token_start + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate the field names referenced by this template, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::field_name)
    }

    #[must_use]
    pub fn has_greedy_fields(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::GreedyField(_)))
    }

    /// Render an anchored regex matching strings produced from this
    /// template: plain tokens as `([^/]+)`, greedy tokens as `(.+)`.
    /// Capture groups appear in token declaration order.
    #[must_use]
    pub fn to_regex(&self) -> String {
        let mut out = String::from("^");
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => out.push_str(&escape_literal(lit)),
                Segment::Field(_) => out.push_str("([^/]+)"),
                Segment::GreedyField(_) => out.push_str("(.+)"),
            }
        }
        out.push('$');
        out
    }

    /// Match `input` against the template, returning captured field
    /// values keyed by field name, or `None` on mismatch.
    ///
    /// Plain fields stop at the next literal and reject `/`; greedy
    /// fields extend to the last occurrence of the next literal. Two
    /// adjacent fields with no separating literal cannot be
    /// disambiguated and never match.
    #[must_use]
    pub fn capture(&self, input: &str) -> Option<BTreeMap<String, String>> {
        let mut captures = BTreeMap::new();
        match_segments(&self.segments, input, &mut captures).then_some(captures)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn match_segments(
    segments: &[Segment],
    input: &str,
    captures: &mut BTreeMap<String, String>,
) -> bool {
    let Some((head, tail)) = segments.split_first() else {
        return input.is_empty();
    };

    match head {
        Segment::Literal(lit) => match input.strip_prefix(lit.as_str()) {
            Some(rest) => match_segments(tail, rest, captures),
            None => false,
        },
        Segment::Field(name) => {
            let end = match tail.first() {
                Some(Segment::Literal(lit)) => match input.find(lit.as_str()) {
                    Some(idx) => idx,
                    None => return false,
                },
                Some(_) => return false,
                None => input.len(),
            };

            let value = &input[..end];
            if value.is_empty() || value.contains('/') {
                return false;
            }

            captures.insert(name.clone(), value.to_string());
            match_segments(tail, &input[end..], captures)
        }
        Segment::GreedyField(name) => {
            let end = match tail.first() {
                Some(Segment::Literal(lit)) => match input.rfind(lit.as_str()) {
                    Some(idx) => idx,
                    None => return false,
                },
                Some(_) => return false,
                None => input.len(),
            };

            let value = &input[..end];
            if value.is_empty() {
                return false;
            }

            captures.insert(name.clone(), value.to_string());
            match_segments(tail, &input[end..], captures)
        }
    }
}

// Escape regex metacharacters so literal URL segments match verbatim.
fn escape_literal(lit: &str) -> String {
    let mut out = String::with_capacity(lit.len());
    for c in lit.chars() {
        if matches!(
            c,
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
