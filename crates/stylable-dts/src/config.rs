//! Generation options.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Options can be built in code or deserialized from the build tool's
//! configuration:
//!
//! ```yaml
//! source-file: /src/button.st.css
//! duplicates: first-wins
//! map-delivery:
//!   kind: sibling
//!   file: button.st.css.d.ts.map
//! ```

use serde::{Deserialize, Serialize};

/// Which occurrence of a repeatedly declared symbol supplies its position.
///
/// Emission order is always the order of first appearance; only the recorded
/// position changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    #[default]
    FirstWins,
    LastWins,
}

/// How the declaration text references its source map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MapDelivery {
    /// No reference comment; the caller stores the map however it likes
    #[default]
    None,
    /// `//# sourceMappingURL=<file>` pointing at a sibling artifact
    Sibling { file: String },
    /// `//# sourceMappingURL=data:...` with the map embedded as base64
    Inline,
}

/// Options for [`crate::generate_with_source_map`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DtsOptions {
    /// Path of the stylesheet, recorded in `sources` and in every mapping
    pub source_file: String,

    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    #[serde(default)]
    pub map_delivery: MapDelivery,
}

impl DtsOptions {
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Default::default()
        }
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_map_delivery(mut self, map_delivery: MapDelivery) -> Self {
        self.map_delivery = map_delivery;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DtsOptions::new("/a.st.css");
        assert_eq!(options.source_file, "/a.st.css");
        assert_eq!(options.duplicates, DuplicatePolicy::FirstWins);
        assert_eq!(options.map_delivery, MapDelivery::None);
    }

    #[test]
    fn test_deserialize_minimal() {
        let options: DtsOptions = serde_json::from_str(r#"{"source-file": "/a.st.css"}"#).unwrap();
        assert_eq!(options, DtsOptions::new("/a.st.css"));
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "source-file": "/a.st.css",
            "duplicates": "last-wins",
            "map-delivery": {"kind": "sibling", "file": "a.st.css.d.ts.map"}
        }"#;
        let options: DtsOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.duplicates, DuplicatePolicy::LastWins);
        assert_eq!(
            options.map_delivery,
            MapDelivery::Sibling {
                file: "a.st.css.d.ts.map".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_inline_delivery() {
        let delivery: MapDelivery = serde_json::from_str(r#"{"kind": "inline"}"#).unwrap();
        assert_eq!(delivery, MapDelivery::Inline);
    }
}
