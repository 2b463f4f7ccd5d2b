//! Source map v3 documents: encoding recorded entries and resolving lookups

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::SourceMapError;
use crate::types::{MappingEntry, OriginalPosition, Position};
use crate::vlq;

/// A version 3 source map for one generated declaration file.
///
/// `names` is always empty for declaration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMapDocument {
    pub version: u32,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMapDocument {
    pub fn to_json(&self) -> Result<String, SourceMapError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SourceMapError> {
        let doc: SourceMapDocument = serde_json::from_str(json)?;
        if doc.version != 3 {
            return Err(SourceMapError::decoding(format!(
                "unsupported source map version {}",
                doc.version
            )));
        }
        Ok(doc)
    }

    /// Encode the document as a `data:` URL suitable for an inline
    /// `sourceMappingURL` comment.
    pub fn to_data_url(&self) -> Result<String, SourceMapError> {
        let json = self.to_json()?;
        Ok(format!(
            "data:application/json;charset=utf-8;base64,{}",
            STANDARD.encode(json.as_bytes())
        ))
    }

    /// Resolve a generated position (1-based line, 0-based column).
    ///
    /// Decodes the whole document on every call; build a [`MappingIndex`]
    /// once when resolving many positions. Returns `None` when nothing maps
    /// the position or the mappings are malformed.
    pub fn original_position_for(&self, line: u32, column: u32) -> Option<OriginalPosition> {
        MappingIndex::new(self)
            .ok()?
            .original_position_for(line, column)
    }
}

/// Decoded mappings ordered by generated position, for repeated lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingIndex {
    entries: Vec<MappingEntry>,
}

impl MappingIndex {
    pub fn new(doc: &SourceMapDocument) -> Result<Self, SourceMapError> {
        let mut entries = decode_mappings(doc)?;
        entries.sort_by_key(|e| e.generated());
        Ok(Self { entries })
    }

    /// Greatest-lower-bound match within the generated line: the segment with
    /// the largest column not after `column` wins.
    pub fn original_position_for(&self, line: u32, column: u32) -> Option<OriginalPosition> {
        let target = Position::new(line, column);
        let idx = self.entries.partition_point(|e| e.generated() <= target);
        let entry = self.entries[..idx].last()?;
        if entry.generated_line != line {
            return None;
        }
        Some(OriginalPosition {
            source: entry.source_file.clone(),
            line: entry.original_line,
            column: entry.original_column,
            name: entry.name.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn checked_delta(current: u32, previous: u32, field: &str) -> Result<i64, SourceMapError> {
    let delta = current as i64 - previous as i64;
    if i32::try_from(delta).is_err() {
        return Err(SourceMapError::encoding(format!(
            "{} delta {} is outside the representable range",
            field, delta
        )));
    }
    Ok(delta)
}

/// Serialize sorted mapping entries for `declaration_text` into a source map.
///
/// Entries must be ordered by generated (line, column), as returned by
/// [`crate::PositionMapper::snapshot`]. Generated columns reset on every line;
/// source index, original line and original column are relative to the
/// previous segment. Lines without entries produce empty groups so later
/// lines stay aligned.
pub fn serialize(
    declaration_text: &str,
    entries: &[MappingEntry],
) -> Result<SourceMapDocument, SourceMapError> {
    let line_count = declaration_text.split('\n').count() as u32;

    let mut sources: Vec<String> = Vec::new();
    let mut source_indices: HashMap<&str, u32> = HashMap::new();

    let mut mappings = String::new();
    let mut current_line: u32 = 1;
    let mut first_in_line = true;

    let mut prev_generated_column: u32 = 0;
    let mut prev_source: u32 = 0;
    let mut prev_original_line: u32 = 0;
    let mut prev_original_column: u32 = 0;

    for entry in entries {
        if entry.generated_line == 0 || entry.generated_line > line_count {
            return Err(SourceMapError::encoding(format!(
                "generated line {} is outside the declaration text (1..={})",
                entry.generated_line, line_count
            )));
        }
        if entry.original_line == 0 {
            return Err(SourceMapError::encoding(format!(
                "original line 0 for generated position {}:{}",
                entry.generated_line, entry.generated_column
            )));
        }
        if entry.generated_line < current_line
            || (entry.generated_line == current_line
                && !first_in_line
                && entry.generated_column < prev_generated_column)
        {
            return Err(SourceMapError::encoding(format!(
                "entries are not sorted at generated position {}:{}",
                entry.generated_line, entry.generated_column
            )));
        }

        while current_line < entry.generated_line {
            mappings.push(';');
            current_line += 1;
            first_in_line = true;
            prev_generated_column = 0;
        }
        if !first_in_line {
            mappings.push(',');
        }

        let source_index = match source_indices.get(entry.source_file.as_str()) {
            Some(&index) => index,
            None => {
                let index = sources.len() as u32;
                sources.push(entry.source_file.clone());
                source_indices.insert(entry.source_file.as_str(), index);
                index
            }
        };
        // The encoded form addresses original lines from 0
        let original_line = entry.original_line - 1;

        vlq::encode(
            checked_delta(entry.generated_column, prev_generated_column, "generated column")?,
            &mut mappings,
        );
        vlq::encode(
            checked_delta(source_index, prev_source, "source index")?,
            &mut mappings,
        );
        vlq::encode(
            checked_delta(original_line, prev_original_line, "original line")?,
            &mut mappings,
        );
        vlq::encode(
            checked_delta(entry.original_column, prev_original_column, "original column")?,
            &mut mappings,
        );

        prev_generated_column = entry.generated_column;
        prev_source = source_index;
        prev_original_line = original_line;
        prev_original_column = entry.original_column;
        first_in_line = false;
    }

    tracing::debug!(
        segments = entries.len(),
        lines = current_line,
        sources = sources.len(),
        "Serialized source map"
    );

    Ok(SourceMapDocument {
        version: 3,
        sources,
        names: Vec::new(),
        mappings,
    })
}

/// Decode a document's `mappings` back into entries, in generated order.
///
/// Segments without source information are skipped.
pub fn decode_mappings(doc: &SourceMapDocument) -> Result<Vec<MappingEntry>, SourceMapError> {
    let mut entries = Vec::new();

    let mut source: i64 = 0;
    let mut original_line: i64 = 0;
    let mut original_column: i64 = 0;
    let mut name_index: i64 = 0;

    for (line_index, line) in doc.mappings.split(';').enumerate() {
        let mut generated_column: i64 = 0;

        for segment in line.split(',').filter(|s| !s.is_empty()) {
            let values = vlq::decode_segment(segment)?;
            match values.len() {
                1 => {
                    generated_column += values[0];
                    continue;
                }
                4 | 5 => {}
                n => {
                    return Err(SourceMapError::decoding(format!(
                        "segment {:?} has {} fields",
                        segment, n
                    )));
                }
            }

            generated_column += values[0];
            source += values[1];
            original_line += values[2];
            original_column += values[3];

            let name = if values.len() == 5 {
                name_index += values[4];
                let name = usize::try_from(name_index)
                    .ok()
                    .and_then(|i| doc.names.get(i))
                    .ok_or_else(|| {
                        SourceMapError::decoding(format!("name index {} out of range", name_index))
                    })?;
                Some(name.clone())
            } else {
                None
            };

            let source_file = usize::try_from(source)
                .ok()
                .and_then(|i| doc.sources.get(i))
                .ok_or_else(|| {
                    SourceMapError::decoding(format!("source index {} out of range", source))
                })?;

            let to_u32 = |value: i64, field: &str| {
                u32::try_from(value).map_err(|_| {
                    SourceMapError::decoding(format!("{} {} is negative or too large", field, value))
                })
            };

            entries.push(MappingEntry {
                generated_line: to_u32(line_index as i64 + 1, "generated line")?,
                generated_column: to_u32(generated_column, "generated column")?,
                original_line: to_u32(original_line + 1, "original line")?,
                original_column: to_u32(original_column, "original column")?,
                source_file: source_file.clone(),
                name,
            });
        }
    }

    Ok(entries)
}
