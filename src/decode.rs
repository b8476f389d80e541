//! Literal code-point substitution
//!
//! Game fonts often place glyphs in private-use code points. A [`Decoder`]
//! maps such sequences to readable replacements with an ordered
//! find-and-replace pass. It knows nothing about color codes.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeRule {
    pub from: String,
    pub to: String,
}

impl DecodeRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Ordered list of substitutions, applied first to last
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoder {
    rules: Vec<DecodeRule>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule at the end of the list.
    pub fn with_rule(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.rules.push(DecodeRule::new(from, to));
        self
    }

    pub fn rules(&self) -> &[DecodeRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Apply every rule in order. Later rules see the output of earlier ones.
    /// Rules with an empty `from` are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use qstr::decode::Decoder;
    ///
    /// let decoder = Decoder::new().with_rule("\u{e0b0}", "[").with_rule("\u{e0b1}", "]");
    /// assert_eq!(decoder.decode("\u{e0b0}tag\u{e0b1}"), "[tag]");
    /// ```
    pub fn decode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(text);
        for rule in &self.rules {
            if rule.from.is_empty() || !result.contains(rule.from.as_str()) {
                continue;
            }
            result = Cow::Owned(result.replace(rule.from.as_str(), &rule.to));
        }
        result
    }
}

impl FromIterator<DecodeRule> for Decoder {
    fn from_iter<I: IntoIterator<Item = DecodeRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
