//! Resource loading: resolves every descriptor's image path before any
//! element's `build` runs. This is the one step the core permits to run
//! with internal parallelism (spec §5) — loads are independent and none of
//! them mutate shared state, so `rayon` can fan them out.

use rayon::prelude::*;
use std::path::Path;
use tilegen_core::{ResourceGroup, TilegenError};
use tilegen_elements::{LoadedResource, LoadedResources};

/// Walk every descriptor across `groups`, verify its image path resolves,
/// and produce a [`LoadedResources`] keyed by resource id. Existence check
/// is sufficient per spec §4.B; decoding is the exporter's concern.
pub fn load_resources(groups: &[ResourceGroup]) -> Result<LoadedResources, TilegenError> {
    let pairs: Vec<(String, String)> = groups
        .iter()
        .flat_map(|group| {
            let resource_ids = group.members().iter().map(|m| m.resource_id().to_string());
            resource_ids.zip(group.image_paths().map(str::to_string))
        })
        .collect();

    let loaded: Vec<LoadedResource> = pairs
        .par_iter()
        .map(|(resource_id, image_path)| {
            if Path::new(image_path).exists() {
                Ok(LoadedResource {
                    resource_id: resource_id.clone(),
                    image_path: image_path.clone(),
                })
            } else {
                Err(TilegenError::AssetLoadFailed {
                    path: image_path.clone(),
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut resources = LoadedResources::new();
    for resource in loaded {
        resources.insert(resource);
    }
    Ok(resources)
}
