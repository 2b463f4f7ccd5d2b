//! Stylesheet metadata types.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Two layers of types live here:
//! - [`CompiledStylesheet`]: the raw, serde-facing shape handed over by the
//!   stylesheet resolver. Structural fields are optional so that their absence
//!   can be reported instead of failing deep inside deserialization.
//! - [`StylesheetMetadata`]: the normalized, ordered records the emitter
//!   consumes. Every collection is a `Vec` in source declaration order.

use serde::{Deserialize, Serialize};
use stylable_source_map::Position;

/// Raw symbol table of one compiled stylesheet.
///
/// ```json
/// {
///   "namespace": "button",
///   "symbols": [
///     {"kind": "class", "name": "root", "position": {"line": 1, "column": 0},
///      "states": [{"name": "on", "position": {"line": 1, "column": 8}}]},
///     {"kind": "css-var", "name": "--color", "position": {"line": 2, "column": 4}},
///     {"kind": "keyframes", "name": "spin"}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledStylesheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name of the root class; `root` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Every exported symbol in source declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<RawSymbol>>,
}

/// One declaration of a symbol, as reported by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RawSymbol {
    Class(RawClass),
    StVar(RawNamed),
    CssVar(RawNamed),
    Keyframes(RawNamed),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClass {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// States in the order they appear in this rule's `-st-states` directive
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<RawNamed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNamed {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl RawNamed {
    pub fn new(name: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// A named symbol with the position of its chosen declaration.
///
/// `position` is `None` when the resolver could not attribute the symbol to
/// source text; such symbols are emitted but not mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSymbol {
    pub name: String,
    pub position: Option<Position>,
}

/// A class with its states, in `-st-states` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: String,
    pub position: Option<Position>,
    pub states: Vec<NamedSymbol>,
}

/// Normalized, immutable input of the emitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetMetadata {
    pub namespace: String,
    /// Root class first, then every other class in declaration order
    pub classes: Vec<ClassEntry>,
    pub st_vars: Vec<NamedSymbol>,
    pub css_vars: Vec<NamedSymbol>,
    pub keyframes: Vec<NamedSymbol>,
}

impl StylesheetMetadata {
    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Total number of keys the emitter will write
    pub fn symbol_count(&self) -> usize {
        self.classes.iter().map(|c| 1 + c.states.len()).sum::<usize>()
            + self.st_vars.len()
            + self.css_vars.len()
            + self.keyframes.len()
    }
}
