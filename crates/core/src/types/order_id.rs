//! Order identifier parsing.
//!
//! Identifiers follow `PREFIX-NUMBER[-SUFFIX]`, e.g. `ORD-1002-S`. The suffix
//! letter selects the order's [`BehaviorTag`]; the number seeds the details the
//! mock engine varies between orders.
//!
//! Classification never fails. Input without a suffix, or with a letter
//! outside the known set, resolves to [`BehaviorTag::Pending`]. The only way to
//! get [`BehaviorTag::NotFound`] is to ask for it with the `E` suffix, so a
//! typo from the agent never turns into a "no such order" answer.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::status::BehaviorTag;

/// A classified order identifier.
///
/// ```
/// use parcel_desk_core::{BehaviorTag, OrderIdentifier};
///
/// let id = OrderIdentifier::classify("ORD-1002-S");
/// assert_eq!(id.numeric_id(), Some(1002));
/// assert_eq!(id.suffix(), Some('S'));
/// assert_eq!(id.tag(), BehaviorTag::Shipped);
///
/// // Unknown suffixes fall back to pending rather than erroring.
/// assert_eq!(OrderIdentifier::classify("ORD-1004-B").tag(), BehaviorTag::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderIdentifier {
    raw: String,
    numeric_id: Option<u64>,
    suffix: Option<char>,
    tag: BehaviorTag,
}

impl OrderIdentifier {
    /// Classify a raw identifier string.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let (body, suffix) = split_suffix(raw);
        let tag = suffix
            .and_then(BehaviorTag::from_suffix)
            .unwrap_or(BehaviorTag::Pending);
        // Only letters from the known set are kept as a suffix.
        let suffix = suffix
            .map(|c| c.to_ascii_uppercase())
            .filter(|_| tag.suffix().is_some());

        Self {
            raw: raw.to_owned(),
            numeric_id: last_digit_run(body),
            suffix,
            tag,
        }
    }

    /// The identifier exactly as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Integer portion of the identifier, if any.
    #[must_use]
    pub const fn numeric_id(&self) -> Option<u64> {
        self.numeric_id
    }

    /// Canonical (uppercase) suffix letter, if one from the known set was present.
    #[must_use]
    pub const fn suffix(&self) -> Option<char> {
        self.suffix
    }

    /// Lifecycle state selected by the suffix.
    #[must_use]
    pub const fn tag(&self) -> BehaviorTag {
        self.tag
    }

    /// Stable seed for generated details.
    ///
    /// The numeric id when present, otherwise an FNV-1a hash of the raw text.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.numeric_id.unwrap_or_else(|| fnv1a(self.raw.as_bytes()))
    }
}

impl fmt::Display for OrderIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for OrderIdentifier {
    fn from(raw: &str) -> Self {
        Self::classify(raw)
    }
}

/// Split a trailing `-X` (single ASCII letter) off the identifier.
fn split_suffix(raw: &str) -> (&str, Option<char>) {
    let Some((body, last)) = raw.rsplit_once('-') else {
        return (raw, None);
    };

    let mut chars = last.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => (body, Some(c)),
        _ => (raw, None),
    }
}

/// The last run of ASCII digits in `s`, if it fits in a `u64`.
fn last_digit_run(s: &str) -> Option<u64> {
    let reversed: String = s
        .chars()
        .rev()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    if reversed.is_empty() {
        return None;
    }
    reversed.chars().rev().collect::<String>().parse().ok()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;

    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}
