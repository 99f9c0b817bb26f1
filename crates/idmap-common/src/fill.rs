//! Fill values for identifiers a source could not resolve.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default sentinel for unresolved identifiers.
pub const NOT_AVAILABLE: &str = "N/A";

/// Keyword selecting [`FillValue::Passthrough`].
pub const PASSTHROUGH: &str = "passthrough";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FillValue {
    /// `N/A`
    #[default]
    NotAvailable,
    /// Echo the input identifier back.
    Passthrough,
    Custom(String),
}

impl FillValue {
    pub fn parse(s: &str) -> Self {
        match s {
            NOT_AVAILABLE => FillValue::NotAvailable,
            PASSTHROUGH   => FillValue::Passthrough,
            other         => FillValue::Custom(other.to_string()),
        }
    }

    /// The value reported for an unresolved `input`.
    pub fn resolve(&self, input: &str) -> String {
        match self {
            FillValue::NotAvailable => NOT_AVAILABLE.to_string(),
            FillValue::Passthrough  => input.to_string(),
            FillValue::Custom(v)    => v.clone(),
        }
    }

    /// Fill every `None` in `values`, pairing positions with `inputs`.
    pub fn fill_all(&self, inputs: &[String], values: Vec<Option<String>>) -> Vec<String> {
        values
            .into_iter()
            .zip(inputs)
            .map(|(v, input)| v.unwrap_or_else(|| self.resolve(input)))
            .collect()
    }
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillValue::NotAvailable => f.write_str(NOT_AVAILABLE),
            FillValue::Passthrough  => f.write_str(PASSTHROUGH),
            FillValue::Custom(v)    => f.write_str(v),
        }
    }
}

impl From<String> for FillValue {
    fn from(s: String) -> Self {
        FillValue::parse(&s)
    }
}

impl From<&str> for FillValue {
    fn from(s: &str) -> Self {
        FillValue::parse(s)
    }
}

impl From<FillValue> for String {
    fn from(f: FillValue) -> Self {
        f.to_string()
    }
}
