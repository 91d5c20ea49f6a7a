//! Text normalization applied to names before they are indexed.
//!
//! The index builders only see the [`Normalizer`] trait. Any
//! `Fn(&str) -> String` is a normalizer, and [`Chain`] composes
//! [`Rule`]s applied left to right.

/// A total, deterministic string rewrite.
pub trait Normalizer {
    fn normalize(&self, text: &str) -> String;
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize(&self, text: &str) -> String {
        self(text)
    }
}

/// One rewriting step of a [`Chain`].
pub trait Rule: Send + Sync {
    fn apply(&self, text: &str) -> String;
}

/// Leaves the text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Rule for Identity {
    fn apply(&self, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Lowercase;

impl Rule for Lowercase {
    fn apply(&self, text: &str) -> String {
        text.to_lowercase()
    }
}

/// Strips leading and trailing whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trim;

impl Rule for Trim {
    fn apply(&self, text: &str) -> String {
        text.trim().to_string()
    }
}

/// Replaces every run of whitespace with a single space.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseWhitespace;

impl Rule for CollapseWhitespace {
    fn apply(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Ordered sequence of rules. An empty chain is the identity.
#[derive(Default)]
pub struct Chain {
    rules: Vec<Box<dyn Rule>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Trim, collapse inner whitespace, lower-case.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(Trim)
            .with_rule(CollapseWhitespace)
            .with_rule(Lowercase)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}

impl Normalizer for Chain {
    fn normalize(&self, text: &str) -> String {
        self.apply(text)
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("rules", &self.rules.len()).finish()
    }
}
