//! Append-only recording of generated → original positions

use crate::types::{MappingEntry, Position};

/// Records one [`MappingEntry`] per traceable symbol as declaration text is produced.
///
/// A mapper is owned by a single generation call; nothing is shared between
/// calls. Entries are never merged or deduplicated.
#[derive(Debug, Clone, Default)]
pub struct PositionMapper {
    entries: Vec<MappingEntry>,
}

impl PositionMapper {
    pub fn new() -> Self {
        PositionMapper {
            entries: Vec::new(),
        }
    }

    /// Record that the text at (`generated_line`, `generated_column`) came from
    /// `original` in `source_file`.
    ///
    /// Inputs are trusted: the emitter only calls this for positions it produced.
    pub fn add(
        &mut self,
        generated_line: u32,
        generated_column: u32,
        original: Position,
        source_file: &str,
    ) {
        self.entries.push(MappingEntry {
            generated_line,
            generated_column,
            original_line: original.line,
            original_column: original.column,
            source_file: source_file.to_string(),
            name: None,
        });
    }

    /// All recorded entries ordered by generated (line, column).
    ///
    /// The sort is stable, so entries sharing a generated position keep their
    /// insertion order.
    pub fn snapshot(&self) -> Vec<MappingEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| (e.generated_line, e.generated_column));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mapper_is_empty() {
        let mapper = PositionMapper::new();
        assert!(mapper.is_empty());
        assert!(mapper.snapshot().is_empty());
    }

    #[test]
    fn test_add_records_every_call() {
        let mut mapper = PositionMapper::new();
        mapper.add(2, 5, Position::new(1, 0), "a.st.css");
        mapper.add(2, 5, Position::new(1, 0), "a.st.css");

        assert_eq!(mapper.len(), 2);
        let entries = mapper.snapshot();
        assert_eq!(entries[0], entries[1]);
        assert_eq!(entries[0].name, None);
        assert_eq!(entries[0].source_file, "a.st.css");
    }

    #[test]
    fn test_snapshot_sorts_by_generated_position() {
        let mut mapper = PositionMapper::new();
        mapper.add(3, 1, Position::new(9, 9), "a.st.css");
        mapper.add(1, 7, Position::new(1, 1), "a.st.css");
        mapper.add(1, 2, Position::new(2, 2), "a.st.css");

        let generated: Vec<_> = mapper.snapshot().iter().map(|e| e.generated()).collect();
        assert_eq!(
            generated,
            vec![Position::new(1, 2), Position::new(1, 7), Position::new(3, 1)]
        );
    }

    #[test]
    fn test_snapshot_ties_keep_insertion_order() {
        let mut mapper = PositionMapper::new();
        mapper.add(4, 5, Position::new(10, 0), "first.st.css");
        mapper.add(1, 0, Position::new(1, 0), "first.st.css");
        mapper.add(4, 5, Position::new(20, 0), "second.st.css");

        let entries = mapper.snapshot();
        assert_eq!(entries[1].source_file, "first.st.css");
        assert_eq!(entries[1].original_line, 10);
        assert_eq!(entries[2].source_file, "second.st.css");
        assert_eq!(entries[2].original_line, 20);
    }

    #[test]
    fn test_snapshot_does_not_drain() {
        let mut mapper = PositionMapper::new();
        mapper.add(1, 0, Position::new(1, 0), "a.st.css");
        assert_eq!(mapper.snapshot().len(), 1);
        assert_eq!(mapper.snapshot().len(), 1);
    }
}
