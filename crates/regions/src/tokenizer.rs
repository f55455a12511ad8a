//! Tag tokenizers for editor text.
//!
//! [`tokenize`] is the incremental scanner used while editing. It walks the
//! text once, left to right, and never revisits emitted tokens. A `<` opens a
//! tag candidate that ends at the first `>` after it; the candidate becomes a
//! tag token only if it matches one of the two tag grammars exactly, otherwise
//! the `<` is kept as literal text and scanning resumes one character later.
//!
//! [`tokenize_areas`] is a separate whole-string recognizer for bulk
//! extraction of complete `<Name: id="Id">…</Name>` spans.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Regex for an opening tag candidate, `<Name: id="Id">`.
static OPEN_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^<([a-zA-Z]+): id="([0-9a-zA-Z]+)">$"#).unwrap());

/// Regex for a closing tag candidate, `</Name>`.
static CLOSE_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^</([a-zA-Z0-9]+)>$").unwrap());

/// Regex for a complete area. Greedy, and confined to a single line.
static AREA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([a-zA-Z]+): id="([0-9a-zA-Z]+)">(.*)</([a-zA-Z0-9]+)>"#).unwrap()
});

/// One element of the flat token stream.
///
/// Serializes as a bare string for literals, `{name, id}` for opening tags,
/// and `{name}` for closing tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Token {
    Literal(String),
    Open(OpenTag),
    Close(CloseTag),
}

impl Token {
    /// True for literal text runs.
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }
}

/// `<Name: id="Id">`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenTag {
    pub name: String,
    pub id: String,
}

/// `</Name>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloseTag {
    pub name: String,
}

/// A complete area found by [`tokenize_areas`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub name: String,
    pub id: String,
    pub text: String,
}

/// Split text into literal runs and tag tokens.
///
/// Text without any recognizable tag comes back as a single literal token,
/// and empty text yields no tokens. Tag balance is not checked.
pub fn tokenize(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut next_lt = Lookahead::new(bytes, b'<');
    let mut next_gt = Lookahead::new(bytes, b'>');

    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            let end = next_lt.find_from(pos).unwrap_or(bytes.len());
            literal.push_str(&text[pos..end]);
            pos = end;
            continue;
        }

        let Some(end) = next_gt.find_from(pos) else {
            literal.push('<');
            pos += 1;
            continue;
        };

        // A second `<` before the `>` rules out both grammars.
        let nested = next_lt.find_from(pos + 1).is_some_and(|lt| lt < end);
        let tag = if nested {
            None
        } else {
            recognize_tag(&text[pos..=end])
        };

        match tag {
            Some(tag) => {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(tag);
                pos = end + 1;
            }
            None => {
                literal.push('<');
                pos += 1;
            }
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    log::trace!("Tokenized {} bytes into {} tokens", text.len(), tokens.len());
    tokens
}

/// Match a `<...>` candidate against the opening and closing tag grammars.
fn recognize_tag(candidate: &str) -> Option<Token> {
    if let Some(caps) = OPEN_TAG_REGEX.captures(candidate) {
        return Some(Token::Open(OpenTag {
            name: caps[1].to_string(),
            id: caps[2].to_string(),
        }));
    }

    CLOSE_TAG_REGEX.captures(candidate).map(|caps| {
        Token::Close(CloseTag {
            name: caps[1].to_string(),
        })
    })
}

/// Forward-only search for one byte, caching the last hit.
///
/// Queries must not move backwards, which keeps the total work linear.
struct Lookahead<'a> {
    haystack: &'a [u8],
    needle: u8,
    hit: Option<usize>,
    exhausted: bool,
}

impl<'a> Lookahead<'a> {
    fn new(haystack: &'a [u8], needle: u8) -> Self {
        Self {
            haystack,
            needle,
            hit: None,
            exhausted: false,
        }
    }

    /// First position at or after `from` holding the needle.
    fn find_from(&mut self, from: usize) -> Option<usize> {
        if self.exhausted {
            return None;
        }
        if let Some(hit) = self.hit.filter(|&hit| hit >= from) {
            return Some(hit);
        }

        let found = self.haystack[from..]
            .iter()
            .position(|&b| b == self.needle)
            .map(|offset| from + offset);
        match found {
            Some(hit) => self.hit = Some(hit),
            None => self.exhausted = true,
        }
        found
    }
}

/// Extract complete areas with one greedy match per line.
///
/// Each line yields at most one area, spanning from its first opening tag to
/// its last closing tag. Literal text outside areas is not returned, and
/// spans whose closing name differs from the opening name are dropped.
pub fn tokenize_areas(text: &str) -> Vec<Area> {
    AREA_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            if caps[1] != caps[4] {
                log::debug!(
                    "Dropping area opened as {} but closed as {}",
                    &caps[1],
                    &caps[4]
                );
                return None;
            }
            Some(Area {
                name: caps[1].to_string(),
                id: caps[2].to_string(),
                text: caps[3].to_string(),
            })
        })
        .collect()
}
