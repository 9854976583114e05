//! Content safety check for user-submitted bodies
//!
//! Bodies are plain text. Anything that looks like active markup is rejected
//! outright rather than escaped, so stored text is exactly what the author
//! typed (trimmed).

use crate::error::DomainError;

/// Longest accepted body, in characters
pub const MAX_BODY_CHARS: usize = 2000;

/// Substrings that mark a body as unsafe, matched case-insensitively
const BLOCKED_PATTERNS: &[&str] = &[
    "<script",
    "</script",
    "javascript:",
    "vbscript:",
    "data:text/html",
    "<iframe",
    "<object",
    "<embed",
    "<svg",
    "<img",
    "<style",
    "<link",
    "<meta",
];

/// Which kind of content a body belongs to; decides the minimum length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Post,
    Comment,
}

impl BodyKind {
    pub const fn min_chars(self) -> usize {
        match self {
            Self::Post => 3,
            Self::Comment => 1,
        }
    }
}

/// Validate a body and return the text to store.
pub fn validate_body(body: &str, kind: BodyKind) -> Result<String, DomainError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyBody);
    }

    let chars = trimmed.chars().count();
    if chars < kind.min_chars() {
        return Err(DomainError::BodyTooShort {
            min: kind.min_chars(),
        });
    }
    if chars > MAX_BODY_CHARS {
        return Err(DomainError::ContentTooLong {
            max: MAX_BODY_CHARS,
        });
    }

    let lowered = trimmed.to_lowercase();
    if let Some(pattern) = BLOCKED_PATTERNS.iter().find(|p| lowered.contains(**p)) {
        return Err(DomainError::UnsafeContent(*pattern));
    }
    if has_inline_handler(&lowered) {
        return Err(DomainError::UnsafeContent("inline event handler"));
    }

    Ok(trimmed.to_string())
}

/// Detect `on<letters>=` attributes inside an opened tag, e.g. `<b onclick=`.
///
/// Expects lowercased input.
fn has_inline_handler(lowered: &str) -> bool {
    let bytes = lowered.as_bytes();
    let mut in_tag = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => in_tag = true,
            b'>' => in_tag = false,
            b'o' if in_tag
                && i > 0
                && is_attr_boundary(bytes[i - 1])
                && bytes.get(i + 1) == Some(&b'n') =>
            {
                let mut j = i + 2;
                while j < bytes.len() && bytes[j].is_ascii_lowercase() {
                    j += 1;
                }
                let has_name = j > i + 2;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if has_name && bytes.get(j) == Some(&b'=') {
                    return true;
                }
            }
            _ => {}
        }
        i += 1;
    }

    false
}

fn is_attr_boundary(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'/' | b'"' | b'\'' | b'<')
}
