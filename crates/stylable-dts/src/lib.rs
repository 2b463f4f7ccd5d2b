//! Typed declarations for compiled stylesheets.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - Metadata types (CompiledStylesheet, StylesheetMetadata) and the reader
//!   that normalizes resolver output into ordered records
//! - The declaration emitter, which records a source position for every
//!   exported class, state, st-var, css-var and keyframe
//! - Generation entry points that return declaration text and its source map

mod config;
mod emitter;
mod error;
mod generate;
mod metadata;
mod reader;

pub use config::{DtsOptions, DuplicatePolicy, MapDelivery};
pub use emitter::{DTS_HEADER, Emitted, SymbolAnchor, SymbolKind, emit};
pub use error::DtsError;
pub use generate::{DtsOutput, generate, generate_from_compiled, generate_with_source_map};
pub use metadata::{
    ClassEntry, CompiledStylesheet, NamedSymbol, RawClass, RawNamed, RawSymbol,
    StylesheetMetadata,
};
pub use reader::{DEFAULT_ROOT_CLASS, IMPLICIT_ROOT_POSITION, read_metadata, read_metadata_json};

pub use stylable_source_map::{MappingEntry, OriginalPosition, Position, SourceMapDocument};
