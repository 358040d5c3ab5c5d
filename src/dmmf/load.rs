use super::types::{Datamodel, Document};
use anyhow::Context;
use serde_json::Value;
use std::path::Path;

/// Read a DMMF document from disk.
///
/// YAML is accepted for `.yaml`/`.yml` files, JSON otherwise. The file may hold a
/// full DMMF (`{"datamodel": {...}}`) or just the datamodel (`{"models": [...]}`).
pub fn load_datamodel(path: &Path) -> anyhow::Result<Datamodel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read DMMF file: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);
    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    };
    datamodel_from_value(value)
}

/// Extract the datamodel from an already parsed DMMF value.
pub fn datamodel_from_value(value: Value) -> anyhow::Result<Datamodel> {
    if value.get("datamodel").is_some() {
        let doc: Document =
            serde_json::from_value(value).context("Malformed DMMF document")?;
        Ok(doc.datamodel)
    } else {
        serde_json::from_value(value).context("Malformed DMMF datamodel")
    }
}
