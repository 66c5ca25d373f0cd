use std::fmt;

use super::error::ApiError;

/// Ordered collection of query string parameters.
///
/// Parameters render in insertion order as `?k1=v1&k2=v2`. Values are used
/// verbatim; callers must pre-encode components such as `|`-joined address
/// lists. There is no deletion operation.
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    params: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parameters currently held.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Adds a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DuplicateKey`] if the key is already present.
    pub fn add(&mut self, key: impl Into<String>, value: impl ToString) -> Result<(), ApiError> {
        let key = key.into();
        if self.params.iter().any(|(k, _)| *k == key) {
            return Err(ApiError::DuplicateKey(key));
        }
        self.params.push((key, value.to_string()));
        Ok(())
    }

    /// Adds a parameter, overwriting any existing value for the key.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.params.push((key, value.to_string())),
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        write!(f, "?{rendered}")
    }
}
