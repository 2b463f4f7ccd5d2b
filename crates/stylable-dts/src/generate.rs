//! Generation entry points.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Every call owns a fresh [`PositionMapper`]; nothing is cached or shared, so
//! independent stylesheets can be generated in parallel by the caller.

use stylable_source_map::{
    MappingIndex, OriginalPosition, PositionMapper, SourceMapDocument, serialize,
};

use crate::config::{DtsOptions, MapDelivery};
use crate::emitter::{SymbolAnchor, SymbolKind, emit};
use crate::error::DtsError;
use crate::metadata::{CompiledStylesheet, StylesheetMetadata};
use crate::reader::read_metadata;

/// Declaration text and its source map, produced together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtsOutput {
    pub declaration: String,
    pub source_map: SourceMapDocument,
    /// Anchor of every emitted key, in emission order
    pub anchors: Vec<SymbolAnchor>,
    map_delivery: MapDelivery,
    /// Decoded once from `source_map`, so anchors resolve through the
    /// serialized mappings
    index: MappingIndex,
}

impl DtsOutput {
    /// First anchor of the given kind and name.
    ///
    /// State names can repeat across classes; use [`DtsOutput::state_anchor`]
    /// to pick one by owner.
    pub fn anchor(&self, kind: SymbolKind, name: &str) -> Option<&SymbolAnchor> {
        self.anchors
            .iter()
            .find(|a| a.kind == kind && a.name == name)
    }

    pub fn state_anchor(&self, class: &str, state: &str) -> Option<&SymbolAnchor> {
        self.anchors.iter().find(|a| {
            a.kind == SymbolKind::State && a.name == state && a.owner.as_deref() == Some(class)
        })
    }

    /// Resolve an anchor through the generated source map
    pub fn resolve(&self, anchor: &SymbolAnchor) -> Option<OriginalPosition> {
        self.index
            .original_position_for(anchor.generated.line, anchor.generated.column)
    }

    pub fn source_map_json(&self) -> Result<String, DtsError> {
        Ok(self.source_map.to_json()?)
    }

    /// Declaration text with the configured `sourceMappingURL` reference appended.
    ///
    /// The comment goes after the last line, so recorded mappings stay valid.
    pub fn declaration_with_map_reference(&self) -> Result<String, DtsError> {
        let url = match &self.map_delivery {
            MapDelivery::None => return Ok(self.declaration.clone()),
            MapDelivery::Sibling { file } => file.clone(),
            MapDelivery::Inline => self.source_map.to_data_url()?,
        };
        Ok(format!("{}//# sourceMappingURL={}\n", self.declaration, url))
    }
}

/// Declaration text alone
pub fn generate(metadata: &StylesheetMetadata) -> String {
    let mut mapper = PositionMapper::new();
    emit(metadata, "", &mut mapper).text
}

/// Declaration text plus a source map resolving every positioned key back to
/// `options.source_file`.
pub fn generate_with_source_map(
    metadata: &StylesheetMetadata,
    options: &DtsOptions,
) -> Result<DtsOutput, DtsError> {
    let mut mapper = PositionMapper::new();
    let emitted = emit(metadata, &options.source_file, &mut mapper);
    let source_map = serialize(&emitted.text, &mapper.snapshot())?;
    let index = MappingIndex::new(&source_map)?;

    tracing::debug!(
        source = %options.source_file,
        mappings = mapper.len(),
        "Generated declarations with source map"
    );

    Ok(DtsOutput {
        declaration: emitted.text,
        source_map,
        anchors: emitted.anchors,
        map_delivery: options.map_delivery.clone(),
        index,
    })
}

/// Read resolver output and generate from it in one step
pub fn generate_from_compiled(
    raw: &CompiledStylesheet,
    options: &DtsOptions,
) -> Result<DtsOutput, DtsError> {
    let metadata = read_metadata(raw, options.duplicates)?;
    generate_with_source_map(&metadata, options)
}
