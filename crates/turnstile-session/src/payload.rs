//! `PropertyMap`: the canonical session payload.
//!
//! Any `Clone + Send + 'static` type can serve as a session payload, but in
//! practice most hosts want "a bag of string properties about the user"
//! (display name, role flags, organization, ...). `PropertyMap` is that bag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered string→string property bag.
///
/// Properties iterate in key order, so JSON emitted from a `PropertyMap` is
/// stable across runs — convenient for the HTTP host and for tests.
///
/// Cloning is a deep copy: a clone shares nothing with the original, which
/// is exactly the contract the session registry relies on when it hands
/// payload copies to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    properties: BTreeMap<String, String>,
}

impl PropertyMap {
    /// Creates an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any previous value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    /// Looks up a property. `None` if it was never set.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    /// Returns all property names, in key order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of properties stored.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if no properties are stored.
    ///
    /// An empty map is still a payload — the registry distinguishes
    /// "session with an empty `PropertyMap`" from "session with no payload".
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_returns_value() {
        let mut map = PropertyMap::new();
        map.set("username", "alice");

        assert_eq!(map.get("username"), Some("alice"));
    }

    #[test]
    fn test_get_unknown_property_returns_none() {
        let map = PropertyMap::new();

        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let mut map = PropertyMap::new();
        map.set("role", "viewer");
        map.set("role", "admin");

        assert_eq!(map.get("role"), Some("admin"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_properties_iterates_in_key_order() {
        let mut map = PropertyMap::new();
        map.set("zeta", "1");
        map.set("alpha", "2");

        let names: Vec<&str> = map.properties().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_clone_is_independent_deep_copy() {
        let mut original = PropertyMap::new();
        original.set("key", "before");

        let mut copy = original.clone();
        copy.set("key", "after");

        assert_eq!(original.get("key"), Some("before"));
        assert_eq!(copy.get("key"), Some("after"));
    }

    #[test]
    fn test_serializes_as_flat_json_object() {
        let mut map = PropertyMap::new();
        map.set("username", "alice");
        map.set("role", "admin");

        let json = serde_json::to_string(&map).expect("serializable");
        assert_eq!(json, r#"{"role":"admin","username":"alice"}"#);
    }
}
