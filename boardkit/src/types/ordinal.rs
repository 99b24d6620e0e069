//! Item ordering within a board using fractional indexing.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Display order of an item within its board.
///
/// Ordinals are strings that sort lexicographically to determine display
/// order. This allows inserting between existing items without rewriting the
/// positions of their neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ordinal(String);

impl Ordinal {
    /// Ordinal at the start
    pub fn first() -> Self {
        Self("a0".to_string())
    }

    /// Ordinal after all existing ordinals
    pub fn after(last: &Ordinal) -> Self {
        let bytes = last.0.as_bytes();
        let mut result = last.0.clone();

        // Increment the last character, rolling over where needed
        if let Some(&last_byte) = bytes.last() {
            let new_char = match last_byte {
                b'0'..=b'8' => (last_byte + 1) as char,
                b'9' => {
                    result.pop();
                    if result.is_empty() {
                        return Self("b0".to_string());
                    }
                    return Self::after(&Ordinal(result)).append_zero();
                }
                b'a'..=b'y' => (last_byte + 1) as char,
                b'z' => {
                    return Self(format!("{}0", last.0));
                }
                _ => '0',
            };
            result.pop();
            result.push(new_char);
        }

        Self(result)
    }

    fn append_zero(self) -> Self {
        Self(format!("{}0", self.0))
    }

    /// Ordinal between two existing ordinals (fractional index)
    pub fn between(before: &Ordinal, after: &Ordinal) -> Self {
        let before_bytes = before.0.as_bytes();
        let after_bytes = after.0.as_bytes();

        let max_len = before_bytes.len().max(after_bytes.len());
        let mut result = Vec::with_capacity(max_len + 1);

        for i in 0..max_len {
            let b = before_bytes.get(i).copied().unwrap_or(b'0');
            let a = after_bytes.get(i).copied().unwrap_or(b'z');

            if b < a {
                let mid = b + (a - b) / 2;
                if mid > b {
                    result.push(mid);
                    return Self(String::from_utf8(result).unwrap_or_else(|_| before.0.clone()));
                } else {
                    result.push(b);
                }
            } else {
                result.push(b);
            }
        }

        // No midpoint found at existing positions, extend instead
        result.push(b'V');
        Self(String::from_utf8(result).unwrap_or_else(|_| format!("{}V", before.0)))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialOrd for Ordinal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ordinal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Default for Ordinal {
    fn default() -> Self {
        Self::first()
    }
}
