//! Normalizing resolver output into ordered emitter records.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The reader walks the raw symbol list once and groups it by kind. Within a
//! group, the first appearance of a name fixes its place in the output;
//! repeated declarations only affect which position is recorded, as chosen by
//! [`DuplicatePolicy`]. States declared for the same class in several rules are
//! merged in order of first appearance.

use std::collections::HashMap;

use stylable_source_map::Position;

use crate::config::DuplicatePolicy;
use crate::error::DtsError;
use crate::metadata::{
    ClassEntry, CompiledStylesheet, NamedSymbol, RawNamed, RawSymbol, StylesheetMetadata,
};

pub const DEFAULT_ROOT_CLASS: &str = "root";

/// Position of the implicit root class when the stylesheet never declares it
pub const IMPLICIT_ROOT_POSITION: Position = Position { line: 1, column: 0 };

#[derive(Debug, Default)]
struct SymbolGroup {
    symbols: Vec<NamedSymbol>,
    index: HashMap<String, usize>,
}

impl SymbolGroup {
    fn insert(&mut self, name: &str, position: Option<Position>, policy: DuplicatePolicy) {
        match self.index.get(name) {
            Some(&i) => {
                if policy == DuplicatePolicy::LastWins {
                    self.symbols[i].position = position;
                }
            }
            None => {
                self.index.insert(name.to_string(), self.symbols.len());
                self.symbols.push(NamedSymbol {
                    name: name.to_string(),
                    position,
                });
            }
        }
    }
}

#[derive(Debug)]
struct ClassBuilder {
    name: String,
    position: Option<Position>,
    /// False only for the pre-inserted root until its declaration is seen
    declared: bool,
    states: SymbolGroup,
}

impl ClassBuilder {
    fn build(self) -> ClassEntry {
        ClassEntry {
            name: self.name,
            position: self.position,
            states: self.states.symbols,
        }
    }
}

fn check_name(kind: &str, name: &str) -> Result<(), DtsError> {
    if name.is_empty() {
        return Err(DtsError::invalid(format!("{} symbol with an empty name", kind)));
    }
    Ok(())
}

fn check_position(kind: &str, name: &str, position: Option<Position>) -> Result<(), DtsError> {
    match position {
        Some(p) if p.line == 0 => Err(DtsError::invalid(format!(
            "{} '{}' has line 0; lines are 1-based",
            kind, name
        ))),
        _ => Ok(()),
    }
}

fn check_named(kind: &str, symbol: &RawNamed) -> Result<(), DtsError> {
    check_name(kind, &symbol.name)?;
    check_position(kind, &symbol.name, symbol.position)
}

/// Normalize a compiled stylesheet into ordered records.
///
/// # Errors
///
/// Returns [`DtsError::InvalidMetadata`] when the namespace or the symbol list
/// is absent, when a symbol has an empty name, or when a position has line 0.
/// A symbol without a position is accepted.
pub fn read_metadata(
    raw: &CompiledStylesheet,
    duplicates: DuplicatePolicy,
) -> Result<StylesheetMetadata, DtsError> {
    let namespace = match raw.namespace.as_deref() {
        Some(ns) if !ns.is_empty() => ns.to_string(),
        Some(_) => return Err(DtsError::invalid("namespace is empty")),
        None => return Err(DtsError::invalid("missing namespace")),
    };
    let symbols = raw
        .symbols
        .as_ref()
        .ok_or_else(|| DtsError::invalid("missing symbol list"))?;
    let root_name = raw.root.as_deref().unwrap_or(DEFAULT_ROOT_CLASS);
    check_name("root class", root_name)?;

    let mut classes = vec![ClassBuilder {
        name: root_name.to_string(),
        position: None,
        declared: false,
        states: SymbolGroup::default(),
    }];
    let mut class_index: HashMap<String, usize> = HashMap::new();
    class_index.insert(root_name.to_string(), 0);

    let mut st_vars = SymbolGroup::default();
    let mut css_vars = SymbolGroup::default();
    let mut keyframes = SymbolGroup::default();

    for symbol in symbols {
        match symbol {
            RawSymbol::Class(class) => {
                check_name("class", &class.name)?;
                check_position("class", &class.name, class.position)?;

                let i = match class_index.get(&class.name) {
                    Some(&i) => {
                        let existing = &mut classes[i];
                        if !existing.declared || duplicates == DuplicatePolicy::LastWins {
                            existing.position = class.position;
                        }
                        existing.declared = true;
                        i
                    }
                    None => {
                        let i = classes.len();
                        class_index.insert(class.name.clone(), i);
                        classes.push(ClassBuilder {
                            name: class.name.clone(),
                            position: class.position,
                            declared: true,
                            states: SymbolGroup::default(),
                        });
                        i
                    }
                };

                for state in &class.states {
                    check_named("state", state)?;
                    classes[i]
                        .states
                        .insert(&state.name, state.position, duplicates);
                }
            }
            RawSymbol::StVar(var) => {
                check_named("st-var", var)?;
                st_vars.insert(&var.name, var.position, duplicates);
            }
            RawSymbol::CssVar(var) => {
                check_named("css-var", var)?;
                css_vars.insert(&var.name, var.position, duplicates);
            }
            RawSymbol::Keyframes(frames) => {
                check_named("keyframes", frames)?;
                keyframes.insert(&frames.name, frames.position, duplicates);
            }
        }
    }

    if !classes[0].declared {
        classes[0].position = Some(IMPLICIT_ROOT_POSITION);
    }

    let metadata = StylesheetMetadata {
        namespace,
        classes: classes.into_iter().map(ClassBuilder::build).collect(),
        st_vars: st_vars.symbols,
        css_vars: css_vars.symbols,
        keyframes: keyframes.symbols,
    };

    tracing::debug!(
        namespace = %metadata.namespace,
        classes = metadata.classes.len(),
        st_vars = metadata.st_vars.len(),
        css_vars = metadata.css_vars.len(),
        keyframes = metadata.keyframes.len(),
        "Read stylesheet metadata"
    );

    Ok(metadata)
}

/// Parse resolver output from JSON and normalize it.
///
/// Any JSON or shape error is reported as [`DtsError::InvalidMetadata`].
pub fn read_metadata_json(
    json: &str,
    duplicates: DuplicatePolicy,
) -> Result<StylesheetMetadata, DtsError> {
    let raw: CompiledStylesheet =
        serde_json::from_str(json).map_err(|e| DtsError::invalid(e.to_string()))?;
    read_metadata(&raw, duplicates)
}
