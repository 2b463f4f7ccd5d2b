//! Declaration text emission.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The emitter writes a fixed TypeScript declaration schema:
//!
//! ```text
//! /* THIS FILE IS AUTO GENERATED DO NOT MODIFY */
//! type StylableClass<States> = string & { readonly __states?: States };
//!
//! declare const namespace: "button";
//! declare const classes: {
//!     "root": StylableClass<{
//!         "on"?: boolean;
//!     }>;
//!     "icon": StylableClass<{}>;
//! };
//! declare const stVars: {};
//! declare const vars: {
//!     "--color": string;
//! };
//! declare const keyframes: {};
//! declare const st: (...) => string;
//!
//! export { namespace, classes, stVars, vars, keyframes, st };
//! ```
//!
//! Generated positions are tracked while text is appended, so every key's
//! anchor is known at the moment it is written rather than searched for later.

use stylable_source_map::{Position, PositionMapper};

use crate::metadata::{ClassEntry, NamedSymbol, StylesheetMetadata};

pub const DTS_HEADER: &str = "/* THIS FILE IS AUTO GENERATED DO NOT MODIFY */\n";

const CLASS_TYPE: &str =
    "type StylableClass<States> = string & { readonly __states?: States };\n";

const RUNTIME_DECLARATIONS: &str = "declare const st: (className: keyof typeof classes, states?: Record<string, boolean>, ...extra: string[]) => string;\n\nexport { namespace, classes, stVars, vars, keyframes, st };\n";

const INDENT: &str = "    ";

/// What an emitted key stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    State,
    StVar,
    CssVar,
    Keyframes,
}

/// The generated location of one emitted key.
///
/// `generated` follows the anchor rule: it is the position of the first
/// character of the key text, immediately after the opening quote. `original`
/// is `None` for symbols without a recorded source position; those anchors
/// have no mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolAnchor {
    pub kind: SymbolKind,
    /// Owning class, for states
    pub owner: Option<String>,
    pub name: String,
    pub generated: Position,
    pub original: Option<Position>,
}

/// Declaration text together with the anchor of every key in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub text: String,
    pub anchors: Vec<SymbolAnchor>,
}

/// Escape a symbol name for use inside a double-quoted key
fn escape_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

struct DeclarationWriter<'a> {
    text: String,
    /// 1-based
    line: u32,
    /// 0-based, in UTF-16 code units
    column: u32,
    source_file: &'a str,
    mapper: &'a mut PositionMapper,
    anchors: Vec<SymbolAnchor>,
}

impl<'a> DeclarationWriter<'a> {
    fn new(source_file: &'a str, mapper: &'a mut PositionMapper) -> Self {
        Self {
            text: String::new(),
            line: 1,
            column: 0,
            source_file,
            mapper,
            anchors: Vec::new(),
        }
    }

    fn push(&mut self, s: &str) {
        for ch in s.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += ch.len_utf16() as u32;
            }
        }
        self.text.push_str(s);
    }

    /// Anchor rule: called right after the opening quote has been written and
    /// before any key text, so the current position is the key's first character.
    fn anchor_after_opening_quote(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn key(
        &mut self,
        indent: &str,
        kind: SymbolKind,
        owner: Option<&str>,
        symbol: &NamedSymbol,
        rest: &str,
    ) {
        self.push(indent);
        self.push("\"");
        let anchor = self.anchor_after_opening_quote();
        self.push(&escape_key(&symbol.name));
        self.push("\"");
        self.push(rest);

        if let Some(original) = symbol.position {
            self.mapper
                .add(anchor.line, anchor.column, original, self.source_file);
        } else {
            tracing::trace!(name = %symbol.name, ?kind, "No source position; key left unmapped");
        }

        self.anchors.push(SymbolAnchor {
            kind,
            owner: owner.map(String::from),
            name: symbol.name.clone(),
            generated: anchor,
            original: symbol.position,
        });
    }

    fn class(&mut self, class: &ClassEntry) {
        let symbol = NamedSymbol {
            name: class.name.clone(),
            position: class.position,
        };
        if class.states.is_empty() {
            self.key(INDENT, SymbolKind::Class, None, &symbol, ": StylableClass<{}>;\n");
            return;
        }

        self.key(INDENT, SymbolKind::Class, None, &symbol, ": StylableClass<{\n");
        let nested = INDENT.repeat(2);
        for state in &class.states {
            self.key(
                &nested,
                SymbolKind::State,
                Some(class.name.as_str()),
                state,
                "?: boolean;\n",
            );
        }
        self.push(INDENT);
        self.push("}>;\n");
    }

    fn group(&mut self, declaration: &str, kind: SymbolKind, symbols: &[NamedSymbol]) {
        if symbols.is_empty() {
            self.push(&format!("declare const {}: {{}};\n", declaration));
            return;
        }
        self.push(&format!("declare const {}: {{\n", declaration));
        for symbol in symbols {
            self.key(INDENT, kind, None, symbol, ": string;\n");
        }
        self.push("};\n");
    }
}

/// Write the declaration text for `metadata`, recording one mapping per
/// positioned key into `mapper`.
///
/// Groups are written in a fixed order: classes (each followed by its
/// states), st-vars, css-vars, keyframes. Output depends only on the input.
pub fn emit(
    metadata: &StylesheetMetadata,
    source_file: &str,
    mapper: &mut PositionMapper,
) -> Emitted {
    let mut writer = DeclarationWriter::new(source_file, mapper);
    writer.anchors.reserve(metadata.symbol_count());

    writer.push(DTS_HEADER);
    writer.push(CLASS_TYPE);
    writer.push("\n");
    writer.push(&format!(
        "declare const namespace: \"{}\";\n",
        escape_key(&metadata.namespace)
    ));

    if metadata.classes.is_empty() {
        writer.push("declare const classes: {};\n");
    } else {
        writer.push("declare const classes: {\n");
        for class in &metadata.classes {
            writer.class(class);
        }
        writer.push("};\n");
    }
    writer.group("stVars", SymbolKind::StVar, &metadata.st_vars);
    writer.group("vars", SymbolKind::CssVar, &metadata.css_vars);
    writer.group("keyframes", SymbolKind::Keyframes, &metadata.keyframes);
    writer.push(RUNTIME_DECLARATIONS);

    tracing::debug!(
        namespace = %metadata.namespace,
        keys = writer.anchors.len(),
        mapped = writer.mapper.len(),
        lines = writer.line,
        "Emitted declarations"
    );

    Emitted {
        text: writer.text,
        anchors: writer.anchors,
    }
}
