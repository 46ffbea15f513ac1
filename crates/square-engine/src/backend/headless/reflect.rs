use std::collections::HashMap;

use crate::gfx::{GfxError, ShaderSource, ShaderStage};

/// Interface of a "compiled" headless program, read from declarations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reflection {
    pub attributes: HashMap<String, u32>,
    pub uniforms: HashMap<String, u32>,
    pub storage_blocks: HashMap<String, u32>,
}

/// Compiles and links `sources`.
///
/// Only declarations are looked at: vertex-stage `in` variables become
/// attributes, `uniform` declarations uniforms and `buffer` blocks storage
/// blocks. A stage without `main` fails to compile.
pub fn reflect_program(name: &str, sources: &[ShaderSource]) -> Result<Reflection, GfxError> {
    if sources.is_empty() {
        return Err(GfxError::EmptyProgram(name.to_owned()));
    }

    let has_compute = sources.iter().any(|s| s.stage == ShaderStage::Compute);
    if has_compute && sources.len() > 1 {
        return Err(GfxError::Link {
            name: name.to_owned(),
            log: "compute stage cannot be linked with graphics stages".to_owned(),
        });
    }

    let mut out = Reflection::default();
    for source in sources {
        if !source.src.contains("main") {
            return Err(GfxError::Compile {
                name: name.to_owned(),
                stage: source.stage,
                log: "no entry point 'main'".to_owned(),
            });
        }
        reflect_stage(source, &mut out);
    }
    Ok(out)
}

fn reflect_stage(source: &ShaderSource, out: &mut Reflection) {
    for raw in source.src.lines() {
        let line = raw.split("//").next().unwrap_or_default().trim();
        let (location, decl) = split_layout(line);
        let mut words = decl.split_whitespace();

        match words.next() {
            Some("in") if source.stage == ShaderStage::Vertex => {
                let Some(name) = words.nth(1).map(identifier) else {
                    continue;
                };
                let next = out.attributes.values().max().map_or(0, |m| m + 1);
                out.attributes
                    .entry(name.to_owned())
                    .or_insert(location.unwrap_or(next));
            }
            Some("uniform") => {
                // `uniform vec4 u_color;` or `uniform Block {`
                let first = words.next().map(identifier);
                let name = words
                    .next()
                    .map(identifier)
                    .filter(|n| !n.is_empty())
                    .or(first);
                let Some(name) = name.filter(|n| !n.is_empty()) else {
                    continue;
                };
                let next = out.uniforms.len() as u32;
                out.uniforms.entry(name.to_owned()).or_insert(next);
            }
            Some("buffer") => {
                let Some(name) = words.next().map(identifier).filter(|n| !n.is_empty()) else {
                    continue;
                };
                let next = out.storage_blocks.len() as u32;
                out.storage_blocks.entry(name.to_owned()).or_insert(next);
            }
            _ => {}
        }
    }
}

/// Splits `layout(...)` off a declaration, returning an explicit location if present.
fn split_layout(line: &str) -> (Option<u32>, &str) {
    let Some(rest) = line.strip_prefix("layout") else {
        return (None, line);
    };
    let Some(close) = rest.find(')') else {
        return (None, line);
    };
    let qualifiers = rest[..close].trim_start().trim_start_matches('(');

    let location = qualifiers.split(',').find_map(|q| {
        let (key, value) = q.split_once('=')?;
        (key.trim() == "location").then(|| value.trim().parse().ok())?
    });

    (location, rest[close + 1..].trim())
}

/// Strips trailing punctuation and array suffixes from a declared name.
fn identifier(word: &str) -> &str {
    let end = word
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(word.len());
    &word[..end]
}
