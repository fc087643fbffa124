//! Field path tokenizer
//!
//! Splits a path on `.` and classifies each segment by its index marker.
//! Bracket content is parsed explicitly: `[]` and `[*]` fan out, a run of
//! ASCII digits is a fixed index, anything else is rejected.

use thiserror::Error;

/// Index marker attached to a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Plain property, no brackets
    None,
    /// `[]` or `[*]`: every element
    All,
    /// `[n]`: a single element
    Fixed(usize),
}

/// One `.`-separated piece of a field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    raw: &'a str,
    name: &'a str,
    index: IndexKind,
}

impl<'a> Segment<'a> {
    /// Segment text exactly as written in the path
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Property name without the index marker
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn index(&self) -> IndexKind {
        self.index
    }

    /// Renders the segment for element `position` of a fan-out.
    pub fn at(&self, position: usize) -> String {
        format!("{}[{}]", self.name, position)
    }
}

/// Path syntax errors. Each carries the offending segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("field path contains an empty segment")]
    EmptySegment,

    #[error("segment '{0}' has no property name")]
    MissingName(String),

    #[error("segment '{0}' has an unbalanced or misplaced bracket")]
    UnclosedBracket(String),

    #[error("segment '{0}' has a non-numeric index")]
    InvalidIndex(String),
}

impl PathError {
    /// The segment to report when the path is skipped.
    pub fn segment(&self) -> &str {
        match self {
            PathError::EmptySegment => "[empty segment]",
            PathError::MissingName(s)
            | PathError::UnclosedBracket(s)
            | PathError::InvalidIndex(s) => s,
        }
    }
}

/// Tokenizes a field path. The empty path yields no segments.
pub fn tokenize(path: &str) -> Result<Vec<Segment<'_>>, PathError> {
    if path.is_empty() {
        return Ok(Vec::new());
    }

    path.split('.').map(parse_segment).collect()
}

fn parse_segment(raw: &str) -> Result<Segment<'_>, PathError> {
    if raw.is_empty() {
        return Err(PathError::EmptySegment);
    }

    let Some(open) = raw.find('[') else {
        if raw.contains(']') {
            return Err(PathError::UnclosedBracket(raw.to_string()));
        }
        return Ok(Segment {
            raw,
            name: raw,
            index: IndexKind::None,
        });
    };

    let name = &raw[..open];
    if name.is_empty() {
        return Err(PathError::MissingName(raw.to_string()));
    }
    if name.contains(']') {
        return Err(PathError::UnclosedBracket(raw.to_string()));
    }

    let inner = raw[open + 1..]
        .strip_suffix(']')
        .filter(|inner| !inner.contains('[') && !inner.contains(']'))
        .ok_or_else(|| PathError::UnclosedBracket(raw.to_string()))?;

    let index = match inner {
        "" | "*" => IndexKind::All,
        digits if digits.bytes().all(|b| b.is_ascii_digit()) => digits
            .parse()
            .map(IndexKind::Fixed)
            .map_err(|_| PathError::InvalidIndex(raw.to_string()))?,
        _ => return Err(PathError::InvalidIndex(raw.to_string())),
    };

    Ok(Segment { raw, name, index })
}
