//! Which version of the code is on screen.
//!
//! Internally a position is either the live draft ([`Position::Current`]) or
//! a snapshot index. Two numeric encodings exist at the edges:
//!
//! - the *index* encoding `{-1} ∪ [0, len-1]`, where `-1` is Current;
//! - the *scale* encoding `[0, len]` used by sliders and typed input, where
//!   `len` is Current.
//!
//! Translation between them happens here and nowhere else.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pointer selecting the displayed version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    /// Viewing the live, possibly unsaved draft.
    #[default]
    Current,
    /// Viewing the snapshot at this index (0 = oldest).
    Viewing(usize),
}

impl Position {
    /// Index encoding: `Current` is -1.
    pub fn as_index(self) -> i64 {
        match self {
            Position::Current => -1,
            Position::Viewing(i) => i as i64,
        }
    }

    /// Decodes the index encoding, rejecting anything invalid for `len`.
    pub fn from_index(index: i64, len: usize) -> Option<Position> {
        if index == -1 {
            return Some(Position::Current);
        }
        let i = usize::try_from(index).ok()?;
        (i < len).then_some(Position::Viewing(i))
    }

    /// Decodes the scale encoding `[0, len]`, where `len` means Current.
    pub fn from_scale(value: i64, len: usize) -> Option<Position> {
        let v = usize::try_from(value).ok()?;
        match v.cmp(&len) {
            std::cmp::Ordering::Less => Some(Position::Viewing(v)),
            std::cmp::Ordering::Equal => Some(Position::Current),
            std::cmp::Ordering::Greater => None,
        }
    }

    /// Scale encoding of this position for a history of `len` snapshots.
    pub fn to_scale(self, len: usize) -> usize {
        match self {
            Position::Current => len,
            Position::Viewing(i) => i,
        }
    }

    pub fn is_current(self) -> bool {
        matches!(self, Position::Current)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Current => write!(f, "current"),
            Position::Viewing(i) => write!(f, "snapshot {}", i),
        }
    }
}

/// Parses a free-typed jump target.
///
/// Blank input means 0. Otherwise leading whitespace, an optional sign and
/// the leading run of digits are read, so `"3abc"` is 3. Input with no
/// digits yields `None`, which callers treat as "do nothing".
pub fn parse_jump_input(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    if trimmed.trim_end().is_empty() {
        return Some(0);
    }

    let (negative, rest) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Saturate absurdly long digit runs; they are out of range either way.
    let magnitude = rest[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
