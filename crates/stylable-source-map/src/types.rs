//! Core types for source mapping

use serde::{Deserialize, Serialize};

/// A location in text, addressed the way stylesheet tooling addresses it.
///
/// Lines are 1-based, columns are 0-based. Ordering is by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (0-indexed)
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// One recorded correspondence between generated text and the original stylesheet.
///
/// `generated_column` is the column immediately after the opening quote of the
/// emitted key for the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub generated_line: u32,
    pub generated_column: u32,
    pub original_line: u32,
    pub original_column: u32,
    pub source_file: String,
    /// Always `None` for declaration files; kept for interchange compatibility
    pub name: Option<String>,
}

impl MappingEntry {
    pub fn generated(&self) -> Position {
        Position::new(self.generated_line, self.generated_column)
    }

    pub fn original(&self) -> Position {
        Position::new(self.original_line, self.original_column)
    }
}

/// Result of resolving a generated position through a source map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalPosition {
    /// The original file, as listed in `sources`
    pub source: String,
    /// Line in the original file (1-indexed)
    pub line: u32,
    /// Column in the original file (0-indexed)
    pub column: u32,
    pub name: Option<String>,
}
