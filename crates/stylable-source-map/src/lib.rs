//! Source mapping for generated stylesheet declarations
//!
//! This crate records where every traceable symbol of a generated declaration
//! file came from in the original stylesheet, and serializes those records
//! into a version 3 source map that editors and type-checkers can consume.
//!
//! # Overview
//!
//! The core types are:
//! - [`Position`]: A 1-based line / 0-based column pair
//! - [`PositionMapper`]: Append-only recorder of generated → original tuples
//! - [`SourceMapDocument`]: The serialized interchange document
//!
//! # Example
//!
//! ```rust
//! use stylable_source_map::*;
//!
//! let mut mapper = PositionMapper::new();
//! mapper.add(3, 5, Position::new(1, 0), "/entry.st.css");
//!
//! let text = "line 1\nline 2\n    \"root\": string;\n";
//! let doc = serialize(text, &mapper.snapshot()).unwrap();
//! assert_eq!(doc.sources, vec!["/entry.st.css".to_string()]);
//!
//! let found = doc.original_position_for(3, 5).unwrap();
//! assert_eq!(found.line, 1);
//! assert_eq!(found.column, 0);
//! ```

pub mod document;
pub mod error;
pub mod mapper;
pub mod types;
pub mod vlq;

// Re-export main types
pub use document::{MappingIndex, SourceMapDocument, decode_mappings, serialize};
pub use error::SourceMapError;
pub use mapper::PositionMapper;
pub use types::{MappingEntry, OriginalPosition, Position};
