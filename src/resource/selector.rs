//! Label and field selectors for list and watch requests.
//!
//! Selectors are comma-separated requirement terms. Label selectors accept
//! `key=value`, `key==value`, `key!=value`, `key` (exists) and `!key` (does
//! not exist). Field selectors accept the three comparison forms only.
//!
//! Terms render in insertion order; an empty selector renders as `""` and adds
//! no query parameter to a request.
//!
//! # Example
//!
//! ```rust
//! use resource_helper::resource::{FieldSelector, LabelSelector};
//!
//! let labels: LabelSelector = "app=web, tier!=cache, !canary".parse().unwrap();
//! assert_eq!(labels.to_string(), "app=web,tier!=cache,!canary");
//!
//! let fields = FieldSelector::everything()
//!     .equals("metadata.name", "web-0")
//!     .unwrap();
//! assert_eq!(fields.to_string(), "metadata.name=web-0");
//! ```
//!
//! The builder methods apply the same key and value rules as parsing, so a
//! built selector always renders to a string that parses back to it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a selector string cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// A term has no key.
    #[error("Selector term '{term}' has no key")]
    EmptyKey {
        /// The offending term.
        term: String,
    },

    /// A key contains characters selectors do not allow.
    #[error("Invalid selector key '{key}'")]
    InvalidKey {
        /// The offending key.
        key: String,
    },

    /// A value contains characters selectors do not allow.
    #[error("Invalid selector value '{value}'")]
    InvalidValue {
        /// The offending value.
        value: String,
    },

    /// A field selector term has no comparison operator.
    #[error("Field selector term '{term}' needs '=', '==' or '!='")]
    MissingOperator {
        /// The offending term.
        term: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Requirement {
    Equals(String, String),
    NotEquals(String, String),
    Exists(String),
    DoesNotExist(String),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(key, value) => write!(f, "{key}={value}"),
            Self::NotEquals(key, value) => write!(f, "{key}!={value}"),
            Self::Exists(key) => write!(f, "{key}"),
            Self::DoesNotExist(key) => write!(f, "!{key}"),
        }
    }
}

fn is_key_char(c: char, extra: &[char]) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') || extra.contains(&c)
}

fn validate_key(key: &str, term: &str, extra: &[char]) -> Result<String, SelectorError> {
    if key.is_empty() {
        return Err(SelectorError::EmptyKey {
            term: term.to_string(),
        });
    }
    if !key.chars().all(|c| is_key_char(c, extra)) {
        return Err(SelectorError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(key.to_string())
}

fn validate_value(value: &str) -> Result<String, SelectorError> {
    if value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, ',' | '=' | '!'))
    {
        return Err(SelectorError::InvalidValue {
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Splits a comparison term into key, value and whether it is negated.
fn split_comparison(term: &str) -> Option<(&str, &str, bool)> {
    if let Some((key, value)) = term.split_once("!=") {
        return Some((key.trim(), value.trim(), true));
    }
    if let Some((key, value)) = term.split_once("==") {
        return Some((key.trim(), value.trim(), false));
    }
    term.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim(), false))
}

/// Label keys may carry a `prefix/` part.
const LABEL_KEY_EXTRA: &[char] = &['/'];

fn comparison(
    key: &str,
    value: &str,
    negated: bool,
    extra: &[char],
) -> Result<Requirement, SelectorError> {
    let key = validate_key(key, key, extra)?;
    let value = validate_value(value)?;
    Ok(if negated {
        Requirement::NotEquals(key, value)
    } else {
        Requirement::Equals(key, value)
    })
}

fn terms(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|term| !term.is_empty())
}

fn join(requirements: &[Requirement], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, requirement) in requirements.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{requirement}")?;
    }
    Ok(())
}

/// Selects objects by their labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<Requirement>,
}

impl LabelSelector {
    /// Returns a selector that matches every object.
    #[must_use]
    pub const fn everything() -> Self {
        Self {
            requirements: Vec::new(),
        }
    }

    /// Requires the label `key` to equal `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the key or value would not parse.
    pub fn equals(mut self, key: &str, value: &str) -> Result<Self, SelectorError> {
        let requirement = comparison(key, value, false, LABEL_KEY_EXTRA)?;
        self.requirements.push(requirement);
        Ok(self)
    }

    /// Requires the label `key` to differ from `value` (or be absent).
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the key or value would not parse.
    pub fn not_equals(mut self, key: &str, value: &str) -> Result<Self, SelectorError> {
        let requirement = comparison(key, value, true, LABEL_KEY_EXTRA)?;
        self.requirements.push(requirement);
        Ok(self)
    }

    /// Requires the label `key` to be present.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the key would not parse.
    pub fn exists(mut self, key: &str) -> Result<Self, SelectorError> {
        let key = validate_key(key, key, LABEL_KEY_EXTRA)?;
        self.requirements.push(Requirement::Exists(key));
        Ok(self)
    }

    /// Requires the label `key` to be absent.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the key would not parse.
    pub fn does_not_exist(mut self, key: &str) -> Result<Self, SelectorError> {
        let key = validate_key(key, key, LABEL_KEY_EXTRA)?;
        self.requirements.push(Requirement::DoesNotExist(key));
        Ok(self)
    }

    /// Returns `true` if the selector matches every object.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl FromStr for LabelSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut selector = Self::everything();
        for term in terms(s) {
            let absent = term.strip_prefix('!').filter(|key| !key.contains('='));
            let requirement = if let Some(key) = absent {
                Requirement::DoesNotExist(validate_key(key.trim(), term, LABEL_KEY_EXTRA)?)
            } else if let Some((key, value, negated)) = split_comparison(term) {
                let key = validate_key(key, term, LABEL_KEY_EXTRA)?;
                let value = validate_value(value)?;
                if negated {
                    Requirement::NotEquals(key, value)
                } else {
                    Requirement::Equals(key, value)
                }
            } else {
                Requirement::Exists(validate_key(term, term, LABEL_KEY_EXTRA)?)
            };
            selector.requirements.push(requirement);
        }
        Ok(selector)
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(&self.requirements, f)
    }
}

/// Selects objects by the values of their fields (e.g., `metadata.name`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSelector {
    requirements: Vec<Requirement>,
}

impl FieldSelector {
    /// Returns a selector that matches every object.
    #[must_use]
    pub const fn everything() -> Self {
        Self {
            requirements: Vec::new(),
        }
    }

    /// Requires the field `key` to equal `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the key or value would not parse.
    pub fn equals(mut self, key: &str, value: &str) -> Result<Self, SelectorError> {
        let requirement = comparison(key, value, false, &[])?;
        self.requirements.push(requirement);
        Ok(self)
    }

    /// Requires the field `key` to differ from `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the key or value would not parse.
    pub fn not_equals(mut self, key: &str, value: &str) -> Result<Self, SelectorError> {
        let requirement = comparison(key, value, true, &[])?;
        self.requirements.push(requirement);
        Ok(self)
    }

    /// Returns `true` if the selector matches every object.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl FromStr for FieldSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut selector = Self::everything();
        for term in terms(s) {
            let (key, value, negated) =
                split_comparison(term).ok_or_else(|| SelectorError::MissingOperator {
                    term: term.to_string(),
                })?;
            let key = validate_key(key, term, &[])?;
            let value = validate_value(value)?;
            selector.requirements.push(if negated {
                Requirement::NotEquals(key, value)
            } else {
                Requirement::Equals(key, value)
            });
        }
        Ok(selector)
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(&self.requirements, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_is_empty() {
        assert!(LabelSelector::everything().is_empty());
        assert_eq!(LabelSelector::everything().to_string(), "");
        assert!(FieldSelector::everything().is_empty());
        assert_eq!(
            "".parse::<LabelSelector>().unwrap(),
            LabelSelector::everything()
        );
        assert_eq!(
            " , ".parse::<FieldSelector>().unwrap(),
            FieldSelector::everything()
        );
    }

    #[test]
    fn test_label_selector_parses_all_forms() {
        let selector: LabelSelector = "app==web,env!=prod,team,!legacy,example.com/owner=ops"
            .parse()
            .unwrap();
        let built = LabelSelector::everything()
            .equals("app", "web")
            .and_then(|s| s.not_equals("env", "prod"))
            .and_then(|s| s.exists("team"))
            .and_then(|s| s.does_not_exist("legacy"))
            .and_then(|s| s.equals("example.com/owner", "ops"))
            .unwrap();
        assert_eq!(selector, built);
        assert_eq!(
            selector.to_string(),
            "app=web,env!=prod,team,!legacy,example.com/owner=ops"
        );
    }

    #[test]
    fn test_label_selector_allows_empty_value() {
        let selector: LabelSelector = "app=".parse().unwrap();
        assert_eq!(selector.to_string(), "app=");
    }

    #[test]
    fn test_label_selector_errors() {
        assert_eq!(
            "=web".parse::<LabelSelector>(),
            Err(SelectorError::EmptyKey {
                term: "=web".to_string()
            })
        );
        assert!(matches!(
            "app name=web".parse::<LabelSelector>(),
            Err(SelectorError::InvalidKey { .. })
        ));
        assert!(matches!(
            "app=we b".parse::<LabelSelector>(),
            Err(SelectorError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_field_selector_requires_operator() {
        assert_eq!(
            "metadata.name".parse::<FieldSelector>(),
            Err(SelectorError::MissingOperator {
                term: "metadata.name".to_string()
            })
        );
    }

    #[test]
    fn test_field_selector_round_trip() {
        let selector: FieldSelector = "metadata.name=web-0, status.phase!=Failed"
            .parse()
            .unwrap();
        assert_eq!(
            selector.to_string(),
            "metadata.name=web-0,status.phase!=Failed"
        );
        assert!(matches!(
            "spec/node=a".parse::<FieldSelector>(),
            Err(SelectorError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_what_parsing_rejects() {
        assert_eq!(
            LabelSelector::everything().equals("a b", "x"),
            Err(SelectorError::InvalidKey {
                key: "a b".to_string()
            })
        );
        assert_eq!(
            LabelSelector::everything().not_equals("app", "x,y"),
            Err(SelectorError::InvalidValue {
                value: "x,y".to_string()
            })
        );
        assert!(matches!(
            LabelSelector::everything().exists(""),
            Err(SelectorError::EmptyKey { .. })
        ));
        assert!(matches!(
            FieldSelector::everything().equals("spec/node", "a"),
            Err(SelectorError::InvalidKey { .. })
        ));
        assert!(matches!(
            FieldSelector::everything().not_equals("status.phase", "a=b"),
            Err(SelectorError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_built_selector_parses_back() {
        let built = LabelSelector::everything()
            .equals("example.com/owner", "ops")
            .and_then(|s| s.does_not_exist("canary"))
            .unwrap();
        assert_eq!(built.to_string().parse::<LabelSelector>(), Ok(built));
    }
}
