//! Convention-based truncation of long text fields
//!
//! Any record key named `description`, `body`, or `content` holding a string
//! is truncatable, at any depth and under any parent. Each one gets a
//! companion `{key}Length` carrying the full length, so callers always know
//! how much was cut and can ask for the field again with `--expand` or
//! `--full`.
//!
//! Lengths and cut points count Unicode scalar values. A cut can separate a
//! combining mark from its base character; the tail before the ellipsis may
//! then render oddly. This is not grapheme-aware.

use std::collections::{BTreeSet, HashMap};

use serde_json::{Map, Value};

/// Field names subject to truncation
pub const TRUNCATABLE_FIELDS: [&str; 3] = ["description", "body", "content"];

pub const DEFAULT_MAX_LENGTH: usize = 200;

pub const ELLIPSIS: char = '…';

/// Which truncatable fields are shown in full
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    #[default]
    None,
    All,
    Fields(BTreeSet<String>),
}

impl TruncationPolicy {
    /// Builds the policy from the `--full` and `--expand` flags
    ///
    /// `--full` wins. The expand list is comma-separated, trimmed, and
    /// compared case-insensitively.
    pub fn from_flags(full: bool, expand: Option<&str>) -> Self {
        if full {
            return TruncationPolicy::All;
        }

        match expand {
            Some(list) => {
                let fields: BTreeSet<String> = list
                    .split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect();
                if fields.is_empty() {
                    TruncationPolicy::None
                } else {
                    TruncationPolicy::Fields(fields)
                }
            }
            None => TruncationPolicy::None,
        }
    }

    /// Returns true if `field` is shown in full
    pub fn expands(&self, field: &str) -> bool {
        match self {
            TruncationPolicy::None => false,
            TruncationPolicy::All => true,
            TruncationPolicy::Fields(fields) => fields.contains(&field.to_lowercase()),
        }
    }
}

/// Truncation settings for one invocation
///
/// Built once from flags and settings, then passed wherever output is
/// rendered. Applying it never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    policy: TruncationPolicy,
    max_length: usize,
}

impl Default for Truncation {
    fn default() -> Self {
        Self {
            policy: TruncationPolicy::None,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

fn is_truncatable(key: &str) -> bool {
    TRUNCATABLE_FIELDS.contains(&key)
}

fn companion_key(key: &str) -> String {
    format!("{}Length", key)
}

impl Truncation {
    pub fn new(policy: TruncationPolicy, max_length: Option<usize>) -> Self {
        Self {
            policy,
            max_length: max_length.unwrap_or(DEFAULT_MAX_LENGTH),
        }
    }

    /// Configures truncation from command-line flags and the persisted maximum
    pub fn configure(full: bool, expand: Option<&str>, max_length: Option<usize>) -> Self {
        Self::new(TruncationPolicy::from_flags(full, expand), max_length)
    }

    pub fn policy(&self) -> &TruncationPolicy {
        &self.policy
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Truncates every truncatable field in `value`, recursively
    pub fn apply(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.apply(v)).collect()),
            Value::Object(map) => Value::Object(self.apply_record(map)),
            other => other,
        }
    }

    fn apply_record(&self, map: Map<String, Value>) -> Map<String, Value> {
        // Companions already present for string fields, from an earlier pass
        let mut prior: HashMap<String, Option<u64>> = HashMap::new();
        for (key, value) in &map {
            if is_truncatable(key) && value.is_string() {
                let companion = companion_key(key);
                let existing = map.get(&companion).and_then(Value::as_u64);
                prior.insert(companion, existing);
            }
        }

        let mut out = Map::with_capacity(map.len() + prior.len());
        for (key, value) in map {
            if prior.contains_key(&key) {
                continue;
            }

            match value {
                Value::String(text) if is_truncatable(&key) => {
                    let companion = companion_key(&key);
                    let length = text.chars().count();
                    let full_length = match prior.get(&companion).copied().flatten() {
                        Some(previous) if self.was_cut(&text, length, previous) => previous,
                        _ => length as u64,
                    };

                    let shown = if self.policy.expands(&key) {
                        text
                    } else {
                        self.cut(text, length)
                    };

                    out.insert(companion, Value::from(full_length));
                    out.insert(key, Value::String(shown));
                }
                other => {
                    out.insert(key, self.apply(other));
                }
            }
        }
        out
    }

    /// True if `text` is this engine's own output for a longer original
    fn was_cut(&self, text: &str, length: usize, previous: u64) -> bool {
        previous as usize > length && length == self.max_length + 1 && text.ends_with(ELLIPSIS)
    }

    fn cut(&self, text: String, length: usize) -> String {
        if length <= self.max_length {
            return text;
        }

        let end = text
            .char_indices()
            .nth(self.max_length)
            .map(|(idx, _)| idx)
            .unwrap_or(text.len());
        let mut cut = String::with_capacity(end + ELLIPSIS.len_utf8());
        cut.push_str(&text[..end]);
        cut.push(ELLIPSIS);
        cut
    }
}
