//! Registry of recognized assertion messages.
//!
//! Each [`Matcher`] is a regular expression with exactly two capture groups,
//! one per operand, plus a `reverse` flag saying whether group 1 is the
//! actual value. Matchers are tried in registry order and the first one that
//! captures both operands wins.
//!
//! # Built-in matchers
//!
//! | name      | message                          | comparison |
//! |-----------|----------------------------------|------------|
//! | `toBe`    | `Expected <actual> to be <exp>.`  | identity   |
//! | `toEqual` | `Expected <actual> to equal <exp>.` | equality |
//!
//! Jasmine prints the actual value first, so both built-ins are reversed.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, Result};
use crate::formatter::Comparison;

const TO_BE: &str = r"Expected ([\s\S]*) to be ([\s\S]*)\.$";
const TO_EQUAL: &str = r"Expected ([\s\S]*) to equal ([\s\S]*)\.$";

static JASMINE: LazyLock<MatcherRegistry> = LazyLock::new(|| {
    let matchers = [
        ("toBe", TO_BE, Comparison::Identity),
        ("toEqual", TO_EQUAL, Comparison::Equality),
    ]
    .into_iter()
    .filter_map(|(name, pattern, comparison)| Matcher::new(name, pattern, true, comparison).ok())
    .collect();
    MatcherRegistry { matchers }
});

/// User-facing description of a matcher, as found in [`Options`](crate::Options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Regular expression with exactly two capture groups.
    pub pattern: String,
    /// Group 1 is the actual value and group 2 the expected one.
    #[serde(default)]
    pub reverse: bool,
    /// Comparison semantics. When absent, an override keeps the semantics of
    /// the built-in it replaces; new matchers default to equality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

impl MatcherConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reverse: false,
            comparison: None,
        }
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }
}

/// A compiled matcher.
#[derive(Debug, Clone)]
pub struct Matcher {
    name: String,
    regex: Regex,
    reverse: bool,
    comparison: Comparison,
}

impl Matcher {
    /// Compile `pattern`. It must have exactly two capture groups.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        reverse: bool,
        comparison: Comparison,
    ) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|source| DiffError::InvalidPattern {
            name: name.clone(),
            source,
        })?;

        // `captures_len` counts the implicit whole-match group.
        let found = regex.captures_len() - 1;
        if found != 2 {
            return Err(DiffError::CaptureCount { name, found });
        }

        Ok(Self {
            name,
            regex,
            reverse,
            comparison,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Match `message`, returning both operands when both groups took part.
    pub fn detect<'m>(&self, message: &'m str) -> Option<Detection<'_, 'm>> {
        let captures = self.regex.captures(message)?;
        let first = captures.get(1)?;
        let second = captures.get(2)?;

        let first = Operand {
            text: first.as_str(),
            start: first.start(),
        };
        let second = Operand {
            text: second.as_str(),
            start: second.start(),
        };
        let (expected, actual) = if self.reverse {
            (second, first)
        } else {
            (first, second)
        };

        Some(Detection {
            matcher: self,
            expected,
            actual,
        })
    }
}

/// One captured operand and its byte offset in the matched message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand<'m> {
    pub text: &'m str,
    pub start: usize,
}

/// A matched message.
#[derive(Debug, Clone, Copy)]
pub struct Detection<'r, 'm> {
    pub matcher: &'r Matcher,
    pub expected: Operand<'m>,
    pub actual: Operand<'m>,
}

/// Ordered list of matchers.
#[derive(Debug, Clone, Default)]
pub struct MatcherRegistry {
    matchers: Vec<Matcher>,
}

impl MatcherRegistry {
    /// A registry with no matchers; every message passes through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in Jasmine matchers.
    pub fn jasmine() -> Self {
        JASMINE.clone()
    }

    /// Add `matcher`. A matcher with the same name is replaced in place;
    /// otherwise the new one goes last.
    pub fn insert(&mut self, matcher: Matcher) {
        match self.matchers.iter_mut().find(|m| m.name == matcher.name) {
            Some(slot) => *slot = matcher,
            None => self.matchers.push(matcher),
        }
    }

    /// Compile and [`insert`](Self::insert) each configured matcher in order.
    pub fn extend<'a, I>(&mut self, configs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a String, &'a MatcherConfig)>,
    {
        for (name, config) in configs {
            let comparison = config
                .comparison
                .or_else(|| self.get(name).map(Matcher::comparison))
                .unwrap_or_default();
            self.insert(Matcher::new(
                name.as_str(),
                &config.pattern,
                config.reverse,
                comparison,
            )?);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Matcher> {
        self.matchers.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.matchers.iter()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// The first matcher that captures both operands of `message`.
    pub fn detect<'m>(&self, message: &'m str) -> Option<Detection<'_, 'm>> {
        self.matchers.iter().find_map(|m| m.detect(message))
    }
}
