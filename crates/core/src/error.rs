use std::fmt;

/// Boxed handler error, the unit every error-shaped outcome is made of.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Aggregate of several independent failures.
///
/// Handlers that validate many things at once collect every failure here
/// instead of stopping at the first one. When rendered, each inner error
/// becomes its own entry in the envelope's `errors` list, in insertion order.
#[derive(Debug, Default)]
pub struct MultiError {
    errors: Vec<BoxError>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one error to the end of the aggregate.
    pub fn push(&mut self, err: impl Into<BoxError>) {
        self.errors.push(err.into());
    }

    /// Add an error, flattening it when it is itself a `MultiError`.
    pub fn append(&mut self, err: BoxError) {
        match err.downcast::<MultiError>() {
            Ok(nested) => self.errors.extend((*nested).into_errors()),
            Err(err) => self.errors.push(err),
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<BoxError> {
        self.errors
    }

    /// `Ok(())` when nothing was collected, otherwise the aggregate itself.
    pub fn into_result(self) -> Result<(), MultiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.len() == 1 {
            writeln!(f, "1 error occurred:")?;
        } else {
            writeln!(f, "{} errors occurred:", self.errors.len())?;
        }
        for err in &self.errors {
            writeln!(f, "\t* {err}")?;
        }
        writeln!(f)
    }
}

impl std::error::Error for MultiError {}

impl FromIterator<BoxError> for MultiError {
    fn from_iter<I: IntoIterator<Item = BoxError>>(iter: I) -> Self {
        let mut errs = Self::new();
        errs.extend(iter);
        errs
    }
}

impl Extend<BoxError> for MultiError {
    fn extend<I: IntoIterator<Item = BoxError>>(&mut self, iter: I) {
        for err in iter {
            self.append(err);
        }
    }
}
