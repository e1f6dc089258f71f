//! Tool manifest: the JSON capability listing consumed by the runtime.
//!
//! Each entry carries its parameter schema in `arguments` as a JSON document
//! encoded into a string, with every `"` replaced by `'`. Readers must swap
//! the apostrophes back before parsing; [`decode_arguments`] does that.

use super::{advertised_params, resolve_description, Tool};
use crate::types::ParamType;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use tracing::warn;

/// One advertised tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub agent: String,
    pub function: String,
    pub description: String,
    pub arguments: String,
}

/// Schema of a single tool parameter inside `arguments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    pub description: String,
    pub title: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
}

impl ManifestEntry {
    pub fn for_tool(agent: &str, tool: &dyn Tool) -> Self {
        let descriptors: Vec<(String, ArgumentDescriptor)> = advertised_params(tool)
            .map(|param| {
                (
                    param.name.clone(),
                    ArgumentDescriptor {
                        description: param.name.clone(),
                        title: title_case(&param.name.replace('_', " ")),
                        param_type: param.resolved_type(),
                    },
                )
            })
            .collect();

        Self {
            agent: agent.to_string(),
            function: tool.name().to_string(),
            description: resolve_description(tool).to_string(),
            arguments: encode_arguments(&descriptors),
        }
    }
}

/// Render entries as a pretty-printed JSON array.
pub fn render(entries: &[ManifestEntry]) -> String {
    match serde_json::to_string_pretty(entries) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize tool manifest: {}", e);
            "[]".into()
        }
    }
}

/// Parse an `arguments` string back into parameter descriptors.
pub fn decode_arguments(
    arguments: &str,
) -> Result<BTreeMap<String, ArgumentDescriptor>, serde_json::Error> {
    serde_json::from_str(&arguments.replace('\'', "\""))
}

/// Capitalize the first letter of every word and lowercase the rest.
/// Any non-alphabetic character starts a new word.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Ordered parameter map, serialized in declaration order.
struct ArgumentSchema<'a>(&'a [(String, ArgumentDescriptor)]);

impl Serialize for ArgumentSchema<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, descriptor) in self.0 {
            map.serialize_entry(name, descriptor)?;
        }
        map.end()
    }
}

/// Compact JSON with `", "` / `": "` separators and ASCII-only strings.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn encode_arguments(descriptors: &[(String, ArgumentDescriptor)]) -> String {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    if let Err(e) = ArgumentSchema(descriptors).serialize(&mut serializer) {
        warn!("Failed to encode tool arguments: {}", e);
        return "{}".into();
    }
    String::from_utf8_lossy(&buf).replace('"', "'")
}
