use std::borrow::Cow;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: String,
}

impl Substitution {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern =
            Regex::new(pattern).with_context(|| format!("Invalid pattern: {:?}", pattern))?;

        Ok(Substitution {
            pattern,
            replacement: replacement.to_owned(),
        })
    }

    fn apply<'t>(&self, txt: Cow<'t, str>) -> Cow<'t, str> {
        let replaced = match self.pattern.replace_all(&txt, self.replacement.as_str()) {
            Cow::Borrowed(_) => None,
            Cow::Owned(replaced) => Some(replaced),
        };

        match replaced {
            Some(replaced) => Cow::Owned(replaced),
            None => txt,
        }
    }
}

/// Rewrites language specific spellings in graph text so that the decoder
/// accepts it. Substitutions run in order.
#[derive(Debug, Clone)]
pub struct Normalizer {
    substitutions: Vec<Substitution>,
}

impl Normalizer {
    pub fn empty() -> Self {
        Normalizer {
            substitutions: Vec::new(),
        }
    }

    pub fn with(mut self, substitution: Substitution) -> Self {
        self.substitutions.push(substitution);
        self
    }

    pub fn normalize<'t>(&self, txt: &'t str) -> Cow<'t, str> {
        self.substitutions
            .iter()
            .fold(Cow::Borrowed(txt), |txt, substitution| substitution.apply(txt))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        // Czech concepts may start with '#' (#PersPron, #Cor)
        static REGEX_HASH: Lazy<Regex> = Lazy::new(|| Regex::new("#").unwrap());
        // Czech empty nodes are written (s234x21 / /)
        static REGEX_EMPTY_NODE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\((s\d+x\d+) / /\)").unwrap());

        Normalizer::empty()
            .with(Substitution {
                pattern: REGEX_HASH.clone(),
                replacement: String::new(),
            })
            .with(Substitution {
                pattern: REGEX_EMPTY_NODE.clone(),
                replacement: "$1".to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let normalizer = Normalizer::default();

        assert_eq!(
            normalizer.normalize("(s1p / #PersPron :ARG1 (s1x21 / /))"),
            "(s1p / PersPron :ARG1 s1x21)"
        );
        assert_eq!(
            normalizer.normalize("(s12x3 / /) (s1a / /)"),
            "s12x3 (s1a / /)"
        );
    }

    #[test]
    fn test_untouched_text_is_borrowed() {
        let normalizer = Normalizer::default();

        assert!(matches!(
            normalizer.normalize("(s1c / cat)"),
            Cow::Borrowed("(s1c / cat)")
        ));
    }

    #[test]
    fn test_custom_rules_run_in_order() {
        let normalizer = Normalizer::empty()
            .with(Substitution::new("a", "b").unwrap())
            .with(Substitution::new("b", "c").unwrap());

        assert_eq!(normalizer.normalize("ab"), "cc");
        assert!(Substitution::new("(", "").is_err());
    }
}
