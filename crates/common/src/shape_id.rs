//! Smithy shape identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A Smithy Shape ID.
///
/// Format: `namespace#shapeName` or `namespace#shapeName$memberName`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId {
    value: String,
}

impl ShapeId {
    /// Creates a new ShapeId from a string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the string representation of this ShapeId.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the namespace portion, e.g. `smithy.api` for `smithy.api#String`.
    pub fn namespace(&self) -> Option<&str> {
        self.value.split_once('#').map(|(ns, _)| ns)
    }

    /// Returns the shape name portion, without any member suffix.
    ///
    /// IDs without a `#` are treated as a bare shape name.
    pub fn name(&self) -> &str {
        let rest = self
            .value
            .split_once('#')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.value);
        rest.split_once('$').map(|(name, _)| name).unwrap_or(rest)
    }

    /// Returns the member name if this is a member shape ID.
    pub fn member_name(&self) -> Option<&str> {
        self.value
            .split_once('#')
            .and_then(|(_, rest)| rest.split_once('$').map(|(_, member)| member))
    }

    /// Builds the member ID `namespace#Shape$member` for a member of this shape.
    pub fn with_member(&self, member: &str) -> ShapeId {
        let root = self
            .value
            .split_once('$')
            .map(|(root, _)| root)
            .unwrap_or(&self.value);
        ShapeId::new(format!("{}${}", root, member))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Borrow<str> for ShapeId {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
