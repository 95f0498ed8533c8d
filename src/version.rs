use std::{fmt, ops::Range};

#[cfg(test)]
mod test;

/// Which way a resource moves the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Moves the schema forward to the version.
    Upgrade,
    /// Undoes the version.
    Rollback,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Upgrade => "upgrade",
            Direction::Rollback => "rollback",
        })
    }
}

/// One schema increment.
///
/// A [Version] always has upgrade content, rollback content is optional.
/// It can not be changed after it was read from the resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub(crate) number: u64,
    pub(crate) upgrade: Vec<u8>,
    pub(crate) rollback: Option<Vec<u8>>,
}

impl Version {
    /// The version number, always at least 1.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Content that moves the schema to this version.
    pub fn upgrade(&self) -> &[u8] {
        &self.upgrade
    }

    /// Content that undoes this version, if the resources define it.
    pub fn rollback(&self) -> Option<&[u8]> {
        self.rollback.as_deref()
    }

    /// The content for the given direction.
    pub fn content(&self, direction: Direction) -> Option<&[u8]> {
        match direction {
            Direction::Upgrade => Some(self.upgrade()),
            Direction::Rollback => self.rollback(),
        }
    }
}

/// Accepted separators between the version number and the direction.
const SEPARATORS: &[char] = &['_', '-'];

/// Direction keywords, matched case-insensitively.
const KEYWORDS: &[(&str, Direction)] = &[
    ("up", Direction::Upgrade),
    ("dn", Direction::Rollback),
    ("down", Direction::Rollback),
];

/// Length of the longest keyword in [KEYWORDS].
const MAX_KEYWORD: usize = 4;

/// A resource name that starts like an upgrade resource, but is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct NameError {
    /// Byte range of the offending part of the name.
    pub span: Range<usize>,
    pub reason: NameErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NameErrorKind {
    #[error("invalid syntax: expected `up`, `dn` or `down`")]
    InvalidSyntax,
    #[error("version must be at least 1")]
    Zero,
    #[error("version number is too large")]
    Overflow,
}

/// Parse a resource name of the form `<number><_|-><up|dn|down>[<anything>]`.
///
/// Returns `Ok(None)` for names that are not upgrade resources at all.
/// A name with a leading number and separator, but without a valid direction, is an error.
pub fn parse_name(name: &str) -> Result<Option<(u64, Direction)>, NameError> {
    if name.starts_with('.') {
        return Ok(None);
    }

    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Ok(None);
    }

    let rest = &name[digits..];
    let Some(rest) = rest.strip_prefix(SEPARATORS) else {
        return Ok(None);
    };
    if rest.is_empty() {
        return Ok(None);
    }

    let start = digits + 1;
    let letters = rest
        .bytes()
        .take(MAX_KEYWORD)
        .take_while(u8::is_ascii_alphabetic)
        .count();
    let keyword = rest[..letters].to_ascii_lowercase();
    let Some(&(_, direction)) = KEYWORDS.iter().find(|(k, _)| *k == keyword) else {
        // point at the whole word, not just the part we looked at
        let word = match rest.bytes().take_while(u8::is_ascii_alphanumeric).count() {
            0 => rest.chars().next().map_or(0, char::len_utf8),
            n => n,
        };
        return Err(NameError {
            span: start..start + word,
            reason: NameErrorKind::InvalidSyntax,
        });
    };

    let number: u64 = name[..digits].parse().map_err(|_| NameError {
        span: 0..digits,
        reason: NameErrorKind::Overflow,
    })?;
    if number == 0 {
        return Err(NameError {
            span: 0..digits,
            reason: NameErrorKind::Zero,
        });
    }

    Ok(Some((number, direction)))
}
