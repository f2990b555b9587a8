/*!
 * Data model shared by every segmentation stage.
 *
 * Offsets are byte offsets into a passage body and every interval is
 * half-open. Spans and blocks borrow their text from the passage body, so
 * `text == &body[start..end]` holds by construction.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named section of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    /// Path of the document the passage came from
    pub filepath: String,

    /// Header name with tag list and metadata annotations stripped
    pub name: String,

    /// Tags from the `[...]` header annotation
    pub tags: Vec<String>,

    /// Every line after the header, up to the next header delimiter
    pub body: String,

    /// The passage as it appeared in the document, header included
    pub full_text: String,
}

impl Passage {
    /// Whether the passage carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Classification of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Comment,
    Macro,
    Tag,
    Text,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Comment => "comment",
            Self::Macro => "macro",
            Self::Tag => "tag",
            Self::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// Construct name and direction of a macro or tag span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    /// Construct name without delimiters or the closing slash
    pub name: &'a str,

    /// True for `<</name>>` and `</name>`
    pub closing: bool,
}

/// A classified, offset-bounded slice of a passage body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: SpanKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,

    /// Present for macro and tag spans only
    pub marker: Option<Marker<'a>>,
}

impl<'a> Span<'a> {
    /// Create a span over `body[start..end]`
    pub fn new(kind: SpanKind, body: &'a str, start: usize, end: usize, marker: Option<Marker<'a>>) -> Self {
        Self {
            kind,
            text: &body[start..end],
            start,
            end,
            marker,
        }
    }

    /// Create a plain-text span over `body[start..end]`
    pub fn text(body: &'a str, start: usize, end: usize) -> Self {
        Self::new(SpanKind::Text, body, start, end, None)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_opening(&self) -> bool {
        self.marker.is_some_and(|m| !m.closing)
    }

    pub fn is_closing(&self) -> bool {
        self.marker.is_some_and(|m| m.closing)
    }

    /// Whether `other` is the same construct (kind and name) as this span.
    /// Tag names compare case-insensitively, macro names exactly.
    pub fn same_construct(&self, other: &Span<'_>) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match (self.marker, other.marker) {
            (Some(a), Some(b)) => match self.kind {
                SpanKind::Tag => a.name.eq_ignore_ascii_case(b.name),
                _ => a.name == b.name,
            },
            _ => false,
        }
    }
}

/// How a block came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOrigin {
    /// The entire passage body, which fit within the limit
    Passage,
    /// A single span carried over unchanged
    Span(SpanKind),
    /// A matched opener, its closer and everything between
    Pair,
    /// Two or more adjacent blocks packed together
    Run,
}

/// One or more adjacent spans merged under nesting and size rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub origin: BlockOrigin,
}

impl<'a> Block<'a> {
    pub fn new(body: &'a str, start: usize, end: usize, origin: BlockOrigin) -> Self {
        Self {
            text: &body[start..end],
            start,
            end,
            origin,
        }
    }

    /// A block holding exactly one span
    pub fn from_span(span: &Span<'a>) -> Self {
        Self {
            text: span.text,
            start: span.start,
            end: span.end,
            origin: BlockOrigin::Span(span.kind),
        }
    }

    /// Byte length; always equal to `end - start` and `text.len()`
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Translation-workflow status of a segment
///
/// Serialized as the integer code used by the translation platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Stage {
    #[default]
    Untranslated,
    Translated,
    Disputed,
    Checked,
    Reviewed,
    Locked,
    Hidden,
}

impl From<Stage> for i32 {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Untranslated => 0,
            Stage::Translated => 1,
            Stage::Disputed => 2,
            Stage::Checked => 3,
            Stage::Reviewed => 5,
            Stage::Locked => 9,
            Stage::Hidden => -1,
        }
    }
}

impl TryFrom<i32> for Stage {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Untranslated),
            1 => Ok(Self::Translated),
            2 => Ok(Self::Disputed),
            3 => Ok(Self::Checked),
            5 => Ok(Self::Reviewed),
            9 => Ok(Self::Locked),
            -1 => Ok(Self::Hidden),
            other => Err(format!("Unknown stage code: {}", other)),
        }
    }
}

/// The final translatable unit handed to the translation platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// `{filepath_without_extension}|{passage_name}|{index}`
    pub key: String,

    #[serde(rename = "original")]
    pub original_text: String,

    #[serde(default)]
    pub translation: String,

    #[serde(default)]
    pub context: String,

    #[serde(default)]
    pub stage: Stage,
}
