//! Acceptance predicates over extracted output.
//!
//! An [`Expectation`] is a small serializable predicate tree. Leaves test the
//! output string; `not`, `any_of` and `all_of` compose them. The `Display`
//! form completes the sentence "expected output to ..." in failure reports.
//!
//! ```
//! use thanglish_probe::Expectation;
//!
//! let neg = Expectation::any_of([Expectation::empty(), Expectation::not(Expectation::tamil())]);
//! assert!(neg.evaluate("asdfghjkl").unwrap());
//! assert!(!neg.evaluate("நான்").unwrap());
//! assert_eq!(neg.to_string(), "either be empty or not contain Tamil script");
//! ```

use crate::result::{ProbeError, ProbeResult};
use crate::script::contains_tamil_script;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicate over one extracted output string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// Case-sensitive substring containment
    Contains {
        /// Required substring
        text: String,
    },
    /// Substring containment after lowercasing both sides
    ContainsIgnoreCase {
        /// Required substring
        text: String,
    },
    /// Regular expression search
    Matches {
        /// Pattern in `regex` syntax
        pattern: String,
    },
    /// At least one Tamil letter
    HasTamilScript,
    /// Zero-length output
    IsEmpty,
    /// Negation
    Not {
        /// Negated predicate
        expect: Box<Expectation>,
    },
    /// Disjunction; false when empty
    AnyOf {
        /// Alternatives
        of: Vec<Expectation>,
    },
    /// Conjunction; true when empty
    AllOf {
        /// Required predicates
        of: Vec<Expectation>,
    },
}

impl Expectation {
    /// Output contains `text`
    #[must_use]
    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains { text: text.into() }
    }

    /// Output contains `text`, ignoring case
    #[must_use]
    pub fn contains_ignore_case(text: impl Into<String>) -> Self {
        Self::ContainsIgnoreCase { text: text.into() }
    }

    /// Output matches the regular expression `pattern`
    #[must_use]
    pub fn matches(pattern: impl Into<String>) -> Self {
        Self::Matches {
            pattern: pattern.into(),
        }
    }

    /// Output contains Tamil script
    #[must_use]
    pub const fn tamil() -> Self {
        Self::HasTamilScript
    }

    /// Output is empty
    #[must_use]
    pub const fn empty() -> Self {
        Self::IsEmpty
    }

    /// Negate a predicate
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(expect: Self) -> Self {
        Self::Not {
            expect: Box::new(expect),
        }
    }

    /// Any of the given predicates
    #[must_use]
    pub fn any_of(of: impl IntoIterator<Item = Self>) -> Self {
        Self::AnyOf {
            of: of.into_iter().collect(),
        }
    }

    /// All of the given predicates
    #[must_use]
    pub fn all_of(of: impl IntoIterator<Item = Self>) -> Self {
        Self::AllOf {
            of: of.into_iter().collect(),
        }
    }

    /// Evaluate against `output`.
    ///
    /// Fails only for an invalid `matches` pattern.
    pub fn evaluate(&self, output: &str) -> ProbeResult<bool> {
        Ok(match self {
            Self::Contains { text } => output.contains(text.as_str()),
            Self::ContainsIgnoreCase { text } => {
                output.to_lowercase().contains(&text.to_lowercase())
            }
            Self::Matches { pattern } => compile(pattern)?.is_match(output),
            Self::HasTamilScript => contains_tamil_script(output),
            Self::IsEmpty => output.is_empty(),
            Self::Not { expect } => !expect.evaluate(output)?,
            Self::AnyOf { of } => {
                for expect in of {
                    if expect.evaluate(output)? {
                        return Ok(true);
                    }
                }
                false
            }
            Self::AllOf { of } => {
                for expect in of {
                    if !expect.evaluate(output)? {
                        return Ok(false);
                    }
                }
                true
            }
        })
    }

    /// Check `output`, producing an [`ProbeError::AssertionFailure`] that
    /// names the scenario, the literal input, this predicate, and the output.
    pub fn check(&self, scenario: &str, input: &str, output: &str) -> ProbeResult<()> {
        if self.evaluate(output)? {
            Ok(())
        } else {
            Err(ProbeError::AssertionFailure {
                scenario: scenario.to_string(),
                input: input.to_string(),
                predicate: self.to_string(),
                actual: output.to_string(),
            })
        }
    }

    /// Reject invalid patterns anywhere in the tree
    pub fn validate(&self) -> ProbeResult<()> {
        match self {
            Self::Matches { pattern } => compile(pattern).map(drop),
            Self::Not { expect } => expect.validate(),
            Self::AnyOf { of } | Self::AllOf { of } => of.iter().try_for_each(Self::validate),
            Self::Contains { .. }
            | Self::ContainsIgnoreCase { .. }
            | Self::HasTamilScript
            | Self::IsEmpty => Ok(()),
        }
    }
}

fn compile(pattern: &str) -> ProbeResult<Regex> {
    Regex::new(pattern).map_err(|e| ProbeError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Whether the description joins several clauses
fn is_compound(expect: &Expectation) -> bool {
    match expect {
        Expectation::AnyOf { of } | Expectation::AllOf { of } => of.len() > 1,
        _ => false,
    }
}

/// Write `expect`, in parentheses when it is compound
fn write_operand(f: &mut fmt::Formatter<'_>, expect: &Expectation) -> fmt::Result {
    if is_compound(expect) {
        write!(f, "({expect})")
    } else {
        write!(f, "{expect}")
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, of: &[Expectation], sep: &str) -> fmt::Result {
    for (i, expect) in of.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write_operand(f, expect)?;
    }
    Ok(())
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains { text } => write!(f, "contain \"{text}\""),
            Self::ContainsIgnoreCase { text } => write!(f, "contain \"{text}\" (ignoring case)"),
            Self::Matches { pattern } => write!(f, "match /{pattern}/"),
            Self::HasTamilScript => f.write_str("contain Tamil script"),
            Self::IsEmpty => f.write_str("be empty"),
            Self::Not { expect } => {
                f.write_str("not ")?;
                write_operand(f, expect)
            }
            Self::AnyOf { of } if of.is_empty() => f.write_str("satisfy an empty alternative"),
            Self::AnyOf { of } if of.len() == 1 => write!(f, "{}", of[0]),
            Self::AnyOf { of } => {
                f.write_str("either ")?;
                write_joined(f, of, " or ")
            }
            Self::AllOf { of } if of.is_empty() => f.write_str("be anything"),
            Self::AllOf { of } => write_joined(f, of, " and "),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod evaluate_tests {
        use super::*;

        #[test]
        fn test_contains_is_case_sensitive() {
            let e = Expectation::contains("Rs.");
            assert!(e.evaluate("indha book price Rs. 1200").unwrap());
            assert!(!e.evaluate("rs. 1200").unwrap());
        }

        #[test]
        fn test_contains_ignore_case() {
            let e = Expectation::contains_ignore_case("bus");
            assert!(e.evaluate("BUSstop-ல").unwrap());
            assert!(!e.evaluate("பஸ்").unwrap());
        }

        #[test]
        fn test_matches_and_invalid_pattern() {
            assert!(Expectation::matches(r"^\d{4}-\d{2}-\d{2}")
                .evaluate("2026-03-15 அன்று")
                .unwrap());
            let err = Expectation::matches("(").evaluate("x").unwrap_err();
            assert_eq!(err.kind(), "invalid_pattern");
        }

        #[test]
        fn test_empty_and_tamil() {
            assert!(Expectation::empty().evaluate("").unwrap());
            assert!(!Expectation::empty().evaluate(" ").unwrap());
            assert!(Expectation::tamil().evaluate("வணக்கம்").unwrap());
        }

        #[test]
        fn test_empty_combinators() {
            assert!(!Expectation::any_of([]).evaluate("x").unwrap());
            assert!(Expectation::all_of([]).evaluate("x").unwrap());
        }

        #[test]
        fn test_negative_acceptance_alternatives() {
            // Symbols only: empty, or keeps a symbol
            let e = Expectation::any_of([
                Expectation::empty(),
                Expectation::contains("#"),
                Expectation::contains("$"),
            ]);
            assert!(e.evaluate("").unwrap());
            assert!(e.evaluate("###$$$").unwrap());
            assert!(!e.evaluate("ஹ").unwrap());
        }

        #[test]
        fn test_invalid_pattern_short_circuits_after_match() {
            let e = Expectation::any_of([Expectation::empty(), Expectation::matches("(")]);
            assert!(e.evaluate("").unwrap());
            assert!(e.evaluate("x").is_err());
            assert!(e.validate().is_err());
        }
    }

    mod check_tests {
        use super::*;

        #[test]
        fn test_check_failure_carries_diagnostics() {
            let err = Expectation::contains("நான் வரல")
                .check("pos-04", "naan varala", "naan varala")
                .unwrap_err();
            match err {
                ProbeError::AssertionFailure {
                    scenario,
                    input,
                    predicate,
                    actual,
                } => {
                    assert_eq!(scenario, "pos-04");
                    assert_eq!(input, "naan varala");
                    assert_eq!(predicate, "contain \"நான் வரல\"");
                    assert_eq!(actual, "naan varala");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_check_passes() {
            assert!(Expectation::tamil().check("pos-01", "amma", "அம்மா").is_ok());
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display_composes() {
            let e = Expectation::all_of([
                Expectation::contains("காலை"),
                Expectation::not(Expectation::empty()),
            ]);
            assert_eq!(e.to_string(), "contain \"காலை\" and not be empty");
            assert_eq!(
                Expectation::contains_ignore_case("lol").to_string(),
                "contain \"lol\" (ignoring case)"
            );
            assert_eq!(Expectation::any_of([Expectation::tamil()]).to_string(), "contain Tamil script");
        }

        #[test]
        fn test_not_brackets_compound_predicate() {
            let e = Expectation::not(Expectation::any_of([
                Expectation::empty(),
                Expectation::contains("x"),
            ]));
            assert_eq!(e.to_string(), "not (either be empty or contain \"x\")");
            let single = Expectation::not(Expectation::any_of([Expectation::empty()]));
            assert_eq!(single.to_string(), "not be empty");
        }

        #[test]
        fn test_nested_groups_are_bracketed() {
            let e = Expectation::all_of([
                Expectation::tamil(),
                Expectation::any_of([Expectation::contains("Rs."), Expectation::contains("ரூ")]),
            ]);
            assert_eq!(
                e.to_string(),
                "contain Tamil script and (either contain \"Rs.\" or contain \"ரூ\")"
            );
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_yaml_shape() {
            let yaml = "kind: any_of\nof:\n  - kind: is_empty\n  - kind: not\n    expect:\n      kind: has_tamil_script\n";
            let e: Expectation = serde_yaml_ng::from_str(yaml).unwrap();
            assert_eq!(
                e,
                Expectation::any_of([Expectation::empty(), Expectation::not(Expectation::tamil())])
            );
        }

        #[test]
        fn test_json_contains() {
            let json = serde_json::to_string(&Expectation::contains("?!")).unwrap();
            assert_eq!(json, r#"{"kind":"contains","text":"?!"}"#);
        }
    }

    proptest! {
        /// Negation flips every non-failing predicate
        #[test]
        fn prop_not_flips(s in "\\PC{0,32}", needle in "[a-z]{1,3}") {
            for e in [Expectation::contains(needle.clone()), Expectation::tamil(), Expectation::empty()] {
                let direct = e.evaluate(&s).unwrap();
                prop_assert_eq!(Expectation::not(e).evaluate(&s).unwrap(), !direct);
            }
        }

        /// Every string contains itself, under both case modes
        #[test]
        fn prop_contains_self(s in "\\PC{0,32}") {
            prop_assert!(Expectation::contains(s.clone()).evaluate(&s).unwrap());
            prop_assert!(Expectation::contains_ignore_case(s.clone()).evaluate(&s).unwrap());
        }
    }
}
