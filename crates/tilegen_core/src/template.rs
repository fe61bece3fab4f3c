//! The fully-resolved map template the core accepts from external config
//! loaders. Callers deserialize this from JSON with `serde_json`; the
//! parsing itself happens outside this crate.

use serde::{Deserialize, Serialize};

/// One layer's static metadata, independent of its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerTemplate {
    pub name: String,
}

/// A fully-resolved description of a map to build: dimensions, layer names,
/// and an optional seed. `MapTemplate` says nothing about which elements
/// run; element composition is wired up by the caller constructing a
/// `Builder` (see `tilegen_builder`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTemplate {
    pub map_id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub layers: Vec<LayerTemplate>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_template() {
        let json = r#"{"map_id":"overworld","width":32,"height":32}"#;
        let template: MapTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.width, 32);
        assert!(template.layers.is_empty());
        assert_eq!(template.seed, None);
    }
}
