use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Dimension
///
/// Named axis of variation (e.g. `frame`, `sensor`).
/// Equality and ordering are by name.
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct Dimension(String);

impl Dimension {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub const fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Dimension {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Dimension {
    fn from(name: String) -> Self {
        Self(name)
    }
}
