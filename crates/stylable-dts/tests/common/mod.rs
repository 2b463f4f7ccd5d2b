//! A deliberately small stylesheet scanner for tests.
//!
//! It understands just enough syntax to produce resolver-shaped metadata from
//! literal sources: class selectors, `-st-states` declarations, custom
//! properties, `:vars` blocks and `@keyframes`. Positions are 1-based lines
//! and 0-based columns, pointing at the selector, declaration or at-rule start.

#![allow(dead_code)]

use stylable_dts::{CompiledStylesheet, Position, RawClass, RawNamed, RawSymbol};

enum Context {
    /// Inside a rule whose last selector class is `symbols[index]`
    Class(usize),
    Vars,
    Other,
}

fn read_ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && (chars[*i].is_alphanumeric() || chars[*i] == '-' || chars[*i] == '_')
    {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

fn starts_with(chars: &[char], i: usize, pattern: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    chars.len() >= i + pattern.len() && chars[i..i + pattern.len()] == pattern[..]
}

pub fn scan(namespace: &str, source: &str) -> CompiledStylesheet {
    let chars: Vec<char> = source.chars().collect();

    let mut positions = Vec::with_capacity(chars.len());
    let (mut line, mut column) = (1, 0);
    for &c in &chars {
        positions.push(Position::new(line, column));
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }

    let mut symbols: Vec<RawSymbol> = Vec::new();
    let mut context = Context::Other;
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if depth == 0 {
            match c {
                '.' => {
                    let start = i;
                    i += 1;
                    let name = read_ident(&chars, &mut i);
                    symbols.push(RawSymbol::Class(RawClass {
                        name,
                        position: Some(positions[start]),
                        states: Vec::new(),
                    }));
                    context = Context::Class(symbols.len() - 1);
                }
                ':' if starts_with(&chars, i, ":vars") => {
                    context = Context::Vars;
                    i += ":vars".len();
                }
                '@' => {
                    let start = i;
                    i += 1;
                    let keyword = read_ident(&chars, &mut i);
                    if keyword == "keyframes" {
                        while i < chars.len() && chars[i].is_whitespace() {
                            i += 1;
                        }
                        let name = read_ident(&chars, &mut i);
                        symbols.push(RawSymbol::Keyframes(RawNamed::new(
                            name,
                            Some(positions[start]),
                        )));
                    }
                    context = Context::Other;
                }
                '{' => {
                    depth += 1;
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }

        if c == '}' {
            depth -= 1;
            if depth == 0 {
                context = Context::Other;
            }
            i += 1;
            continue;
        }
        if c.is_whitespace() || c == ';' {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && !matches!(chars[i], ';' | '}' | '{') {
            i += 1;
        }
        if i < chars.len() && chars[i] == '{' {
            // Nested rule such as a keyframe selector
            depth += 1;
            i += 1;
            continue;
        }

        let text: String = chars[start..i].iter().collect();
        let Some((property, value)) = text.split_once(':') else {
            continue;
        };
        let (property, value) = (property.trim(), value.trim());
        let position = Some(positions[start]);

        if property == "-st-states" {
            if let Context::Class(index) = context {
                if let RawSymbol::Class(class) = &mut symbols[index] {
                    for state in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        class.states.push(RawNamed::new(state, position));
                    }
                }
            }
        } else if property.starts_with("--") {
            symbols.push(RawSymbol::CssVar(RawNamed::new(property, position)));
        } else if matches!(context, Context::Vars) {
            symbols.push(RawSymbol::StVar(RawNamed::new(property, position)));
        }
    }

    CompiledStylesheet {
        namespace: Some(namespace.to_string()),
        root: None,
        symbols: Some(symbols),
    }
}

#[test]
fn scanner_reports_selector_and_declaration_starts() {
    let raw = scan("entry", ".root { -st-states: a, b; --c: red; }\n@keyframes k {}");
    let symbols = raw.symbols.unwrap();
    assert_eq!(symbols.len(), 3);
    match &symbols[0] {
        RawSymbol::Class(class) => {
            assert_eq!(class.position, Some(Position::new(1, 0)));
            assert_eq!(
                class.states,
                vec![
                    RawNamed::new("a", Some(Position::new(1, 8))),
                    RawNamed::new("b", Some(Position::new(1, 8))),
                ]
            );
        }
        other => panic!("expected class, got {:?}", other),
    }
    assert_eq!(
        symbols[1],
        RawSymbol::CssVar(RawNamed::new("--c", Some(Position::new(1, 26))))
    );
    assert_eq!(
        symbols[2],
        RawSymbol::Keyframes(RawNamed::new("k", Some(Position::new(2, 0))))
    );
}
