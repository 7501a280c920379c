use std::error::Error;

use crate::{DecodeError, Failure, NumberParseError, TypeMismatch};

/// Something which tracks the failures of a decode pass.
///
/// This generalizes methods like [`Outcome::propagate`] which allow failures to be handled by
/// merging them into a different collection of failures.
///
/// [`Outcome::propagate`]: crate::Outcome::propagate
pub trait ErrorCollector {
    /// The type returned by [`propagate`].
    ///
    /// [`propagate`]: ErrorCollector::propagate
    type WrappedInner;

    /// Add a single leaf failure to the collection.
    fn push_failure(&mut self, failure: Failure);

    /// Add anything which converts into failures, flattening a nested [`DecodeError`] into its
    /// leaf failures rather than nesting it.
    ///
    /// ```
    /// # use decode_errors::{DecodeError, ErrorCollector};
    /// let nested = DecodeError::new().append("inner 1").append("inner 2");
    ///
    /// let mut errors = DecodeError::new();
    /// errors.record("outer");
    /// errors.record(nested);
    ///
    /// assert_eq!(errors.len(), 3);
    /// ```
    fn record(&mut self, incoming: impl IntoFailures) {
        for failure in incoming.into_failures() {
            self.push_failure(failure);
        }
    }

    /// Consumes this collector and pushes all of its failures into a different collector. If the
    /// type is wrapping some kind of value, it may return it too.
    fn propagate(self, other: &mut impl ErrorCollector) -> Self::WrappedInner;
}

/// Conversion into the leaf failures it represents. Leaves produce themselves, a [`DecodeError`]
/// produces its contents, and `None` produces nothing.
pub trait IntoFailures {
    fn into_failures(self) -> Vec<Failure>;
}

impl IntoFailures for Failure {
    fn into_failures(self) -> Vec<Failure> {
        vec![self]
    }
}

impl IntoFailures for TypeMismatch {
    fn into_failures(self) -> Vec<Failure> {
        vec![self.into()]
    }
}

impl IntoFailures for NumberParseError {
    fn into_failures(self) -> Vec<Failure> {
        vec![self.into()]
    }
}

impl IntoFailures for String {
    fn into_failures(self) -> Vec<Failure> {
        vec![self.into()]
    }
}

impl IntoFailures for &str {
    fn into_failures(self) -> Vec<Failure> {
        vec![self.into()]
    }
}

impl IntoFailures for DecodeError {
    fn into_failures(self) -> Vec<Failure> {
        DecodeError::into_failures(self)
    }
}

impl<T: IntoFailures> IntoFailures for Option<T> {
    fn into_failures(self) -> Vec<Failure> {
        self.map(IntoFailures::into_failures).unwrap_or_default()
    }
}

/// Errors of unknown type are inspected at runtime. A boxed [`DecodeError`] is flattened and a
/// boxed leaf keeps its structure; anything else is recorded by its message.
///
/// ```
/// # use std::error::Error;
/// # use decode_errors::{DecodeError, Failure, TypeMismatch};
/// let nested: Box<dyn Error + Send + Sync> =
///     Box::new(DecodeError::new().append(TypeMismatch::new("A", "int", "bool", true)));
/// let io: Box<dyn Error + Send + Sync> =
///     Box::new(std::io::Error::other("disk on fire"));
///
/// let errors = DecodeError::new().append(nested).append(io);
///
/// assert!(matches!(errors.failures()[0], Failure::TypeMismatch(_)));
/// assert_eq!(errors.failures()[1], Failure::generic("disk on fire"));
/// ```
impl IntoFailures for Box<dyn Error + Send + Sync> {
    fn into_failures(self) -> Vec<Failure> {
        let error = match self.downcast::<DecodeError>() {
            Ok(nested) => return (*nested).into_failures(),
            Err(error) => error,
        };
        let error = match error.downcast::<Failure>() {
            Ok(failure) => return vec![*failure],
            Err(error) => error,
        };
        let error = match error.downcast::<TypeMismatch>() {
            Ok(mismatch) => return vec![(*mismatch).into()],
            Err(error) => error,
        };
        match error.downcast::<NumberParseError>() {
            Ok(parse) => vec![(*parse).into()],
            Err(error) => vec![Failure::generic(error)],
        }
    }
}
