//! The resolved-asset map an element reads from during `build`.

use std::collections::HashMap;
use tilegen_core::TilegenError;

/// One resolved asset: the path the loader confirmed exists. Decoding the
/// image itself is the exporter/renderer's concern, not the core's.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedResource {
    pub resource_id: String,
    pub image_path: String,
}

/// The resources an element was handed after the Builder's load step,
/// keyed by the same resource id the element's descriptors used.
#[derive(Debug, Clone, Default)]
pub struct LoadedResources {
    by_id: HashMap<String, LoadedResource>,
}

impl LoadedResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: LoadedResource) {
        self.by_id.insert(resource.resource_id.clone(), resource);
    }

    pub fn extend(&mut self, other: LoadedResources) {
        self.by_id.extend(other.by_id);
    }

    /// Look up a loaded resource by id. Fails with `MissingResource` if the
    /// element references an id the Builder never loaded — the element name
    /// is supplied by the caller for a useful error message.
    pub fn get(&self, element: &str, resource_id: &str) -> Result<&LoadedResource, TilegenError> {
        self.by_id.get(resource_id).ok_or_else(|| TilegenError::MissingResource {
            element: element.to_string(),
            resource: resource_id.to_string(),
        })
    }
}
