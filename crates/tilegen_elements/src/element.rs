//! The Element lifecycle contract: resource setup -> asset load -> build.

use crate::resources::LoadedResources;
use tilegen_cache::MapCache;
use tilegen_core::{ResourceGroup, TilegenError};

/// A named generator contributing tiles and/or objects to the cache.
///
/// Implementors provide their descriptor groups up front via
/// [`Element::setup_resources`] (pure — never touches the cache) and later
/// consume the Builder-loaded assets via [`Element::build`]. `build` is
/// invoked at most once per element per build.
pub trait Element {
    /// A stable name used for duplicate-element rejection and error
    /// messages (`BuildAborted { element, .. }`).
    fn name(&self) -> &str;

    /// Populate this element's descriptor groups. Must be pure with respect
    /// to the element's own fields and must not touch the cache. Called
    /// exactly once during construction unless the caller supplied an
    /// override map (see [`Element::install_overrides`]).
    fn setup_resources(&mut self);

    /// The descriptor groups this element declared, after `setup_resources`
    /// has run. The Builder aggregates these across all elements before
    /// loading assets.
    fn resource_groups(&self) -> &[ResourceGroup];

    /// The descriptor groups this element would install under
    /// `setup_resources`, computed fresh rather than read off `self`'s
    /// current (possibly already-overridden) state. Used by
    /// `install_overrides` to fill in any group id a caller's override map
    /// omits, and by callers who want to inspect an element's defaults
    /// before construction.
    fn default_descriptors(&self) -> Vec<ResourceGroup>;

    /// Replace this element's descriptor groups with caller-supplied
    /// overrides, skipping `setup_resources` entirely. Overrides must
    /// provide at least the required resource ids; any group id they omit
    /// is filled in from `default_descriptors` (see [`fill_missing_groups`]).
    fn install_overrides(&mut self, overrides: Vec<ResourceGroup>);

    /// Receive the Builder-loaded assets for this element's descriptor
    /// groups, ahead of `build`.
    fn set_loaded_resources(&mut self, loaded: LoadedResources);

    /// Perform placement against `cache`, reading previously-loaded
    /// resources. Must leave the cache invariant-satisfying on return;
    /// partial progress on failure should be rolled back via
    /// copy/mutate/assign or reported as [`TilegenError::BuildAborted`].
    fn build(&mut self, cache: &mut MapCache) -> Result<(), TilegenError>;
}

/// Fills in any group id `overrides` omits from `defaults`, so a caller
/// overriding only some of an element's groups doesn't silently drop the
/// rest. A group id present in `overrides` always wins outright; a default
/// group id absent from `overrides` is carried over unchanged.
pub fn fill_missing_groups(defaults: Vec<ResourceGroup>, overrides: Vec<ResourceGroup>) -> Vec<ResourceGroup> {
    let mut result = overrides;
    for default_group in defaults {
        if !result.iter().any(|g| g.id == default_group.id) {
            result.push(default_group);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegen_core::TileDescriptor;

    fn tile_group(id: &str, resource_id: &str) -> ResourceGroup {
        ResourceGroup::new(id)
            .add_tile(TileDescriptor {
                resource_id: resource_id.to_string(),
                image_path: format!("{resource_id}.png"),
                rate: 1.0,
                collision: false,
                cover: false,
            })
            .unwrap()
    }

    #[test]
    fn override_wins_for_ids_it_provides() {
        let defaults = vec![tile_group("ground", "grass")];
        let overrides = vec![tile_group("ground", "dirt")];
        let merged = fill_missing_groups(defaults, overrides);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].members()[0].resource_id(), "dirt");
    }

    #[test]
    fn missing_group_id_falls_back_to_default() {
        let defaults = vec![tile_group("ground", "grass"), tile_group("props", "rock")];
        let overrides = vec![tile_group("ground", "dirt")];
        let merged = fill_missing_groups(defaults, overrides);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().any(|g| g.id == "ground" && g.members()[0].resource_id() == "dirt"));
        assert!(merged.iter().any(|g| g.id == "props" && g.members()[0].resource_id() == "rock"));
    }
}
