use std::fmt::{self, Display};

use serde::Serialize;

use crate::{ErrorCollector, Failure, IntoFailures};

/// Every failure encountered during a single decode pass.
///
/// Failures are only ever appended. Appending another `DecodeError` splices in its contents, so
/// the collection holds leaf failures only, each with its original structure.
///
/// # Rendering
///
/// The [`Display`] implementation produces a count header followed by one bulleted line per
/// failure. Lines are sorted, so the report does not depend on the order in which the failures
/// were discovered.
///
/// ```
/// # use decode_errors::DecodeError;
/// let errors = DecodeError::new()
///     .append("B failed")
///     .append("A failed");
///
/// assert_eq!(errors.to_string(), "2 error(s) decoding:\n\n* A failed\n* B failed");
/// ```
///
/// An empty `DecodeError` still renders its header. Whether an empty collection means success is
/// up to the caller; see [`into_result`](DecodeError::into_result).
///
/// ```
/// # use decode_errors::DecodeError;
/// assert_eq!(DecodeError::new().to_string(), "0 error(s) decoding:\n\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecodeError {
    failures: Vec<Failure>,
}

impl DecodeError {
    /// Constructs a new `DecodeError` without any failures.
    #[must_use]
    pub fn new() -> Self {
        DecodeError { failures: vec![] }
    }

    /// Consumes this `DecodeError` and returns it with `incoming` added at the end. Use the
    /// returned value from then on.
    ///
    /// ```
    /// # use decode_errors::{DecodeError, Failure, TypeMismatch};
    /// let first = DecodeError::new().append(TypeMismatch::new("Age", "int", "string", "abc"));
    /// let second = DecodeError::new().append("x").append("y");
    ///
    /// let errors = first.append(second);
    /// assert_eq!(errors.len(), 3);
    /// assert!(matches!(errors.failures()[0], Failure::TypeMismatch(_)));
    /// ```
    #[must_use = "append returns the updated collection"]
    pub fn append(mut self, incoming: impl IntoFailures) -> Self {
        self.record(incoming);
        self
    }

    /// The failures, in the order they were added.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consumes this `DecodeError`, returning its failures in the order they were added.
    #[must_use]
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Treats an empty collection as success, and anything else as the failure of the pass.
    ///
    /// ```
    /// # use decode_errors::DecodeError;
    /// assert!(DecodeError::new().into_result().is_ok());
    /// assert!(DecodeError::new().append("oops").into_result().is_err());
    /// ```
    pub fn into_result(self) -> Result<(), DecodeError> {
        if self.is_empty() {
            Ok(())
        } else {
            tracing::debug!(failures = self.len(), "decode pass finished with failures");
            Err(self)
        }
    }

    /// The rendered body lines, bulleted and sorted.
    fn lines(&self) -> Vec<String> {
        let mut points: Vec<String> = self.failures.iter().map(|f| format!("* {f}")).collect();
        points.sort();
        points
    }
}

/// Returns the leaf failures of `error` as independent errors, in the order they were added. An
/// absent `DecodeError` has none.
///
/// ```
/// # use decode_errors::{wrapped_errors, DecodeError};
/// assert!(wrapped_errors(None).is_empty());
///
/// let errors = DecodeError::new().append("one").append("two");
/// let wrapped = wrapped_errors(Some(&errors));
/// assert_eq!(wrapped.len(), 2);
/// assert_eq!(wrapped[0].to_string(), "one");
/// ```
#[must_use]
pub fn wrapped_errors(error: Option<&DecodeError>) -> Vec<Failure> {
    error.map(|e| e.failures.clone()).unwrap_or_default()
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s) decoding:\n\n{}",
            self.len(),
            self.lines().join("\n"),
        )
    }
}

impl std::error::Error for DecodeError {}

impl ErrorCollector for DecodeError {
    type WrappedInner = ();

    fn push_failure(&mut self, failure: Failure) {
        tracing::trace!(%failure, total = self.failures.len() + 1, "recorded decode failure");
        self.failures.push(failure);
    }

    fn propagate(self, other: &mut impl ErrorCollector) {
        for failure in self.failures {
            other.push_failure(failure);
        }
    }
}

impl FromIterator<Failure> for DecodeError {
    fn from_iter<I: IntoIterator<Item = Failure>>(iter: I) -> Self {
        DecodeError { failures: iter.into_iter().collect() }
    }
}

impl IntoIterator for DecodeError {
    type Item = Failure;
    type IntoIter = std::vec::IntoIter<Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodeError {
    type Item = &'a Failure;
    type IntoIter = std::slice::Iter<'a, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}
