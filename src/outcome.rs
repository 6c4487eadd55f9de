//! Outcome values and the expectations tests are judged against.

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

/// A single observable result of executing a test.
///
/// Outcomes carry no structure beyond equality and ordering: an exit status
/// from a child process, or a named token for executors that report symbolic
/// results.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Status(i32),
    Token(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Status(code) => write!(f, "{}", code),
            Outcome::Token(token) => write!(f, "{}", token),
        }
    }
}

/// The outcome(s) accepted as a pass for one test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    One(Outcome),
    AnyOf(BTreeSet<Outcome>),
}

impl Expectation {
    /// Builds a set expectation from any collection of outcomes.
    pub fn any_of(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Expectation::AnyOf(outcomes.into_iter().collect())
    }

    /// True if the observed outcome satisfies this expectation: exact
    /// equality for a scalar, membership for a set.
    pub fn matches(&self, actual: &Outcome) -> bool {
        match self {
            Expectation::One(expected) => expected == actual,
            Expectation::AnyOf(expected) => expected.contains(actual),
        }
    }

    /// Every outcome this expectation declares valid.
    pub fn outcomes(&self) -> Box<dyn Iterator<Item = &Outcome> + '_> {
        match self {
            Expectation::One(outcome) => Box::new(std::iter::once(outcome)),
            Expectation::AnyOf(set) => Box::new(set.iter()),
        }
    }
}

/// Union of every outcome declared expected by any configured suite.
///
/// Built once before execution starts; read-only for the duration of a run.
/// A failing outcome absent from this set is "exceptional": the test failed
/// in a way no configuration anywhere anticipated, as opposed to an outcome
/// that is valid for some other suite but not this test.
#[derive(Debug, Clone, Default)]
pub struct ValidOutcomes(BTreeSet<Outcome>);

impl ValidOutcomes {
    pub fn collect<'a, I>(expectations: I) -> Self
    where
        I: IntoIterator<Item = &'a Expectation>,
    {
        let mut set = BTreeSet::new();
        for expectation in expectations {
            set.extend(expectation.outcomes().cloned());
        }
        ValidOutcomes(set)
    }

    pub fn contains(&self, outcome: &Outcome) -> bool {
        self.0.contains(outcome)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What actually came back from the executor for one test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    /// The executor returned an outcome normally.
    Returned(Outcome),
    /// The executor failed abnormally (error return or panic). Never
    /// matches any expectation and is always classified exceptional.
    Crashed(String),
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observed::Returned(outcome) => write!(f, "{}", outcome),
            Observed::Crashed(message) => write!(f, "crashed: {}", message),
        }
    }
}
