use crate::{DecodeError, ErrorCollector, Failure};

/// Contains a decoded value, and every failure produced while decoding it.
///
/// `Outcome<T>` can be used like a `Result<T, DecodeError>`, except it has _both_ the `Ok` and
/// `Err` variants at the same time. A decoder can keep going after a bad field, filling in what it
/// can, and report every problem at the end of the pass.
///
/// # Creation
///
/// Use [`new_with_errors`] to construct "raw" from an existing value and [`DecodeError`]:
///
/// [`new_with_errors`]: Outcome::new_with_errors
///
/// ```
/// # use decode_errors::{DecodeError, Outcome};
/// Outcome::new_with_errors(42, DecodeError::new().append("something that went wrong"));
/// ```
///
/// Use [`build`] to decode a value while accumulating failures:
///
/// [`build`]: Outcome::build
///
/// ```
/// # use decode_errors::{ErrorCollector, NumberKind, Outcome};
/// let ports = ["80", "http", "443"];
///
/// let o = Outcome::build(|errs| {
///     let mut parsed = vec![];
///     for (i, raw) in ports.iter().enumerate() {
///         match NumberKind::Uint16.parse_field(&format!("Ports[{i}]"), raw) {
///             Ok(port) => parsed.push(port),
///             Err(e) => errs.record(e),
///         }
///     }
///     parsed
/// });
///
/// assert_eq!(o.len_errors(), 1);
/// ```
///
/// # Finalization
///
/// At the end of a decode pass, [`into_result`] treats an empty collection as success. Use
/// [`finalize`] instead to keep the partially decoded value alongside the failures.
///
/// [`into_result`]: Outcome::into_result
/// [`finalize`]: Outcome::finalize
///
/// # Combination
///
/// - Transform the value: [`map`]
/// - Unwrap a value by moving its failures elsewhere: [`propagate`]
/// - Fold two values and combine their failures: [`integrate`]
/// - Bundle values into a collection and combine their failures: [`zip`], [`from_iter`]
/// - Extract the value by asserting there are no failures: [`unwrap`], [`expect`]
///
/// [`map`]: Outcome::map
/// [`propagate`]: Outcome::propagate
/// [`integrate`]: Outcome::integrate
/// [`zip`]: Outcome::zip
/// [`from_iter`]: Outcome::from_iter
/// [`unwrap`]: Outcome::unwrap
/// [`expect`]: Outcome::expect
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    value: T,
    errors: DecodeError,
}

impl<T> Outcome<T> {
    /// Constructs a new `Outcome` with a value and no failures.
    ///
    /// ```
    /// # use decode_errors::Outcome;
    /// let o = Outcome::new(42);
    /// assert_eq!(o.len_errors(), 0);
    /// ```
    #[must_use]
    pub fn new(value: T) -> Self {
        Outcome { value, errors: DecodeError::new() }
    }

    /// Constructs a new `Outcome` with some failures.
    #[must_use]
    pub fn new_with_errors(value: T, errors: DecodeError) -> Self {
        Outcome { value, errors }
    }

    /// A convenience function to construct a new `Outcome` by accumulating failures over time, and
    /// finally returning some value.
    ///
    /// ```
    /// # use decode_errors::{DecodeError, ErrorCollector, Outcome, TypeMismatch};
    /// fn decode_name() -> Outcome<String> {
    ///     Outcome::new_with_errors(
    ///         String::new(),
    ///         DecodeError::new().append(TypeMismatch::new("Name", "string", "int64", 7)),
    ///     )
    /// }
    ///
    /// let o = Outcome::build(|errs| {
    ///     // Record failures of our own...
    ///     errs.record("'Person' has invalid keys: nmae");
    ///
    ///     // ...or propagate failures from another `Outcome`
    ///     let name = decode_name().propagate(errs);
    ///
    ///     (name, 30)
    /// });
    ///
    /// let (value, errors) = o.finalize();
    /// assert_eq!(value, (String::new(), 30));
    /// assert_eq!(errors.len(), 2);
    /// ```
    #[must_use]
    pub fn build<F>(func: F) -> Self
    where
        F: FnOnce(&mut DecodeError) -> T,
    {
        let mut errors = DecodeError::new();
        let value = func(&mut errors);
        Outcome { value, errors }
    }

    /// Adds a new failure to this `Outcome`.
    pub fn push_failure(&mut self, failure: impl Into<Failure>) {
        self.errors.push_failure(failure.into());
    }

    /// Moves the failures from this `Outcome` into an [`ErrorCollector`], and unwraps it to return
    /// its value.
    ///
    /// ```
    /// # use decode_errors::{DecodeError, Outcome};
    /// let source = Outcome::new_with_errors(42, DecodeError::new().append("a").append("b"));
    /// let mut dest = DecodeError::new().append("c");
    ///
    /// let source_value = source.propagate(&mut dest);
    /// assert_eq!(dest.len(), 3);
    /// assert_eq!(source_value, 42);
    /// ```
    #[must_use = "propagate returns the inner value; use `integrate` if you wish to merge values in-place"]
    pub fn propagate(self, other: &mut impl ErrorCollector) -> T {
        self.errors.propagate(other);
        self.value
    }

    /// Moves the failures from this `Outcome` into another `Outcome`, and apply a mapping function
    /// to transform the value within that `Outcome` based on the value within this one.
    ///
    /// ```
    /// # use decode_errors::{DecodeError, Outcome};
    /// let source = Outcome::new_with_errors(42, DecodeError::new().append("a"));
    /// let mut dest = Outcome::new_with_errors(123, DecodeError::new().append("b"));
    ///
    /// source.integrate(&mut dest, |acc, x| *acc += x);
    ///
    /// let (value, errors) = dest.finalize();
    /// assert_eq!(value, 123 + 42);
    /// assert_eq!(errors.len(), 2);
    /// ```
    pub fn integrate<OT>(self, other: &mut Outcome<OT>, func: impl FnOnce(&mut OT, T)) {
        func(&mut other.value, self.value);
        self.errors.propagate(&mut other.errors);
    }

    /// Consumes this `Outcome` and another one, returning a new `Outcome` with their values as a
    /// tuple `(this, other)` and the failures combined.
    #[must_use]
    pub fn zip<OT>(self, other: Outcome<OT>) -> Outcome<(T, OT)> {
        Outcome::new_with_errors((self.value, other.value), self.errors.append(other.errors))
    }

    /// Applies a function to the value within this `Outcome`.
    #[must_use]
    pub fn map<R>(self, func: impl FnOnce(T) -> R) -> Outcome<R> {
        Outcome::new_with_errors(func(self.value), self.errors)
    }

    /// Extracts the inner value, panicking if there are any failures.
    ///
    /// The panic message includes the rendered [`DecodeError`]. If you would like to provide a
    /// custom message instead, use [`expect`].
    ///
    /// [`expect`]: Outcome::expect
    ///
    /// ```should_panic
    /// # use decode_errors::{DecodeError, Outcome};
    /// let o = Outcome::new_with_errors(42, DecodeError::new().append("oops"));
    /// o.unwrap(); // Panics
    /// ```
    #[track_caller]
    pub fn unwrap(self) -> T {
        if self.is_success() {
            self.value
        } else {
            panic!("called `unwrap` on an Outcome with failures: {}", self.errors)
        }
    }

    /// Extracts the inner value, panicking with a message if there are any failures.
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        if self.is_success() {
            self.value
        } else {
            panic!("{msg}")
        }
    }

    /// Converts this `Outcome` into a [`Result`]:
    ///
    /// - If there are no failures, produces an [`Ok`] with the value.
    /// - Otherwise, produces an [`Err`] with the [`DecodeError`], discarding the value.
    ///
    /// ```
    /// # use decode_errors::{DecodeError, Outcome};
    /// let ok: Outcome<u8> = Outcome::new(1);
    /// assert_eq!(ok.into_result(), Ok(1));
    ///
    /// let failed = Outcome::new_with_errors(1, DecodeError::new().append("oops"));
    /// assert_eq!(failed.into_result().unwrap_err().len(), 1);
    /// ```
    pub fn into_result(self) -> Result<T, DecodeError> {
        let value = self.value;
        self.errors.into_result().map(|()| value)
    }

    /// Converts this `Outcome` into its [`DecodeError`], discarding the value.
    #[must_use]
    pub fn into_errors(self) -> DecodeError {
        self.errors
    }

    /// The failures collected so far.
    #[must_use]
    pub fn errors(&self) -> &DecodeError {
        &self.errors
    }

    /// Returns `true` if this `Outcome` has any failures.
    ///
    /// Opposite of [`is_success`](#method.is_success).
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.len_errors() > 0
    }

    /// Returns `true` if this `Outcome` has no failures.
    ///
    /// Opposite of [`has_errors`](#method.has_errors).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.len_errors() == 0
    }

    #[must_use]
    pub fn len_errors(&self) -> usize {
        self.errors.len()
    }

    /// Consumes and deconstructs this `Outcome` into its value and its [`DecodeError`].
    #[must_use]
    pub fn finalize(self) -> (T, DecodeError) {
        (self.value, self.errors)
    }
}

impl<T> ErrorCollector for Outcome<T> {
    type WrappedInner = T;

    fn push_failure(&mut self, failure: Failure) {
        self.errors.push_failure(failure);
    }

    fn propagate(self, other: &mut impl ErrorCollector) -> Self::WrappedInner {
        Outcome::propagate(self, other)
    }
}

impl<T, C: FromIterator<T>> FromIterator<Outcome<T>> for Outcome<C> {
    /// Enables an [`Iterator`] of `Outcome` items to be converted into a single `Outcome` whose
    /// item is a collection containing each of the items' values.
    ///
    /// The failures are aggregated in order.
    ///
    /// ```
    /// # use decode_errors::{DecodeError, Outcome};
    /// let items = vec![
    ///     Outcome::new_with_errors(1, DecodeError::new().append("error 1").append("error 2")),
    ///     Outcome::new(2),
    ///     Outcome::new_with_errors(3, DecodeError::new().append("error 3")),
    /// ];
    ///
    /// let combined: Outcome<Vec<u32>> = items.into_iter().collect();
    ///
    /// let (value, errors) = combined.finalize();
    /// assert_eq!(value, vec![1, 2, 3]);
    /// assert_eq!(errors.len(), 3);
    /// ```
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        let mut items = vec![];
        let mut errors = DecodeError::new();

        for item in iter {
            items.push(item.value);
            item.errors.propagate(&mut errors);
        }

        Outcome::new_with_errors(items.into_iter().collect(), errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumberKind, TypeMismatch};
    use serde_json::{json, Value};

    // A tiny stand-in for a decode engine walking a map into fixed fields.
    fn decode_person(input: &Value) -> Outcome<(String, i64)> {
        Outcome::build(|errs| {
            let name = match &input["name"] {
                Value::String(s) => s.clone(),
                other => {
                    errs.record(TypeMismatch::from_value("name", "string", other.clone()));
                    String::new()
                }
            };
            let age = match &input["age"] {
                Value::String(s) => NumberKind::Int.parse_field("age", s).map_or_else(
                    |e| {
                        errs.record(e);
                        0
                    },
                    |n| match n {
                        crate::Number::Signed(n) => n,
                        _ => 0,
                    },
                ),
                Value::Number(n) if n.is_i64() => n.as_i64().unwrap_or_default(),
                other => {
                    errs.record(TypeMismatch::from_value("age", "int", other.clone()));
                    0
                }
            };
            (name, age)
        })
    }

    #[test]
    fn clean_pass_is_success() {
        let o = decode_person(&json!({"name": "Ada", "age": "36"}));
        assert_eq!(o.into_result(), Ok(("Ada".to_owned(), 36)));
    }

    #[test]
    fn every_failure_is_reported() {
        let err = decode_person(&json!({"name": 5, "age": "old"}))
            .into_result()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "2 error(s) decoding:\n\n\
             * 'name' expected type 'string', got unconvertible type 'int64', value: '5'\n\
             * cannot parse 'age' as int: invalid digit found in string"
        );
    }

    #[test]
    fn collecting_people_keeps_partial_values() {
        let inputs = [
            json!({"name": "Ada", "age": 36}),
            json!({"name": null, "age": true}),
        ];
        let combined: Outcome<Vec<_>> = inputs.iter().map(decode_person).collect();

        assert_eq!(combined.len_errors(), 2);
        let (people, errors) = combined.finalize();
        assert_eq!(people[0], ("Ada".to_owned(), 36));
        assert_eq!(people[1], (String::new(), 0));
        assert!(matches!(errors.failures()[1], Failure::TypeMismatch(ref t) if t.actual == "bool"));
    }

    #[test]
    fn zip_and_map_combine_failures() {
        let a = Outcome::new_with_errors(5, DecodeError::new().append("a"));
        let b = Outcome::new_with_errors(9, DecodeError::new().append("b").append("c"));

        let zipped = a.zip(b).map(|(x, y)| x + y);
        assert_eq!(zipped.errors().len(), 3);
        assert_eq!(zipped.finalize().0, 14);
    }

    #[test]
    fn push_failure_converts() {
        let mut o = Outcome::new(());
        o.push_failure("plain");
        o.push_failure(TypeMismatch::new("X", "int", "string", "y"));

        assert!(o.has_errors());
        assert!(!o.is_success());
        assert_eq!(o.into_errors().len(), 2);
    }

    #[test]
    #[should_panic(expected = "1 error(s) decoding")]
    fn unwrap_panics_with_report() {
        Outcome::new_with_errors((), DecodeError::new().append("oops")).unwrap();
    }

    #[test]
    #[should_panic(expected = "decode failed")]
    fn expect_panics_with_message() {
        Outcome::new_with_errors((), DecodeError::new().append("oops")).expect("decode failed");
    }
}
