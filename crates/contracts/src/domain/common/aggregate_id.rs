use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Identifier of an aggregate as it travels through routes and URLs
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Render the id as a path segment
    fn as_string(&self) -> String;

    /// Parse the id back from a path segment
    fn from_string(s: &str) -> Result<Self, String>;
}
