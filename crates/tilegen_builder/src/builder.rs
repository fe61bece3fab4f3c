//! Orchestrates elements against a fresh cache and produces the finished
//! map (spec §4.F): setup -> load -> sequential element build -> built-in
//! passes -> auto-tile resolution -> export.

use tilegen_cache::MapCache;
use tilegen_core::{TilegenError, COLLISION_LAYER, COVER_LAYER, DEFAULT_LAYER_COUNT};
use tilegen_elements::Element;

use crate::export::{export_map, MapSchema};
use crate::loader::load_resources;
use crate::resolve::resolve_auto_tiles;

/// Holds an ordered list of elements and the fixed dimensions of the map
/// they'll build. `add_element` rejects a duplicate element name.
pub struct Builder {
    map_id: String,
    width: u32,
    height: u32,
    layer_count: u32,
    seed: u64,
    elements: Vec<Box<dyn Element>>,
}

impl Builder {
    pub fn new(map_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self::with_layers(map_id, width, height, DEFAULT_LAYER_COUNT)
    }

    pub fn with_layers(map_id: impl Into<String>, width: u32, height: u32, layer_count: u32) -> Self {
        Self {
            map_id: map_id.into(),
            width,
            height,
            layer_count,
            seed: default_seed(),
            elements: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds a `Builder` from a fully-resolved template (spec §6): `width`,
    /// `height` and `seed` (if present) seed the cache. Elements still have
    /// to be added by the caller — the template says nothing about element
    /// composition. Pass `template.layers`' names to `BuiltMap::export_map`
    /// separately when exporting.
    pub fn from_template(template: &tilegen_core::MapTemplate) -> Self {
        let mut builder = Self::new(template.map_id.clone(), template.width, template.height);
        if let Some(seed) = template.seed {
            builder = builder.with_seed(seed);
        }
        builder
    }

    /// Appends an element, returning `self` for chaining. Fails if another
    /// element with the same name was already added.
    pub fn add_element(mut self, element: Box<dyn Element>) -> Result<Self, TilegenError> {
        if self.elements.iter().any(|e| e.name() == element.name()) {
            return Err(TilegenError::BuildAborted {
                element: element.name().to_string(),
                cause: "duplicate element name".to_string(),
            });
        }
        self.elements.push(element);
        Ok(self)
    }

    /// Runs the full pipeline and returns the finished (frozen) cache.
    pub fn build(mut self) -> Result<BuiltMap, TilegenError> {
        log::info!(
            "starting build: map_id={} {}x{} elements={} seed={}",
            self.map_id,
            self.width,
            self.height,
            self.elements.len(),
            self.seed
        );

        // Step 1: resource setup, once per element.
        for element in &mut self.elements {
            element.setup_resources();
        }

        // Step 2: aggregate descriptors and load assets.
        let groups: Vec<_> = self
            .elements
            .iter()
            .flat_map(|e| e.resource_groups().to_vec())
            .collect();
        let loaded = load_resources(&groups)?;
        for element in &mut self.elements {
            element.set_loaded_resources(loaded.clone());
        }

        // Step 3: instantiate the cache.
        let mut cache = MapCache::new(self.width, self.height, self.layer_count, self.seed);

        // Step 4: sequential element build, insertion order.
        for element in &mut self.elements {
            if let Err(cause) = element.build(&mut cache) {
                log::warn!("element `{}` aborted the build: {cause}", element.name());
                return Err(TilegenError::BuildAborted {
                    element: element.name().to_string(),
                    cause: cause.to_string(),
                });
            }
        }

        let collision_layer = reserved_layer(self.layer_count, COLLISION_LAYER);
        let cover_layer = reserved_layer(self.layer_count, COVER_LAYER);

        // Steps 5-6: built-in Collision and Cover passes.
        tilegen_elements::run_collision_pass(&mut cache, collision_layer)?;
        tilegen_elements::run_cover_pass(&mut cache, cover_layer)?;

        // Step 7: auto-tile resolution.
        resolve_auto_tiles(&mut cache)?;

        log::info!("build finished: map_id={}", self.map_id);

        Ok(BuiltMap {
            map_id: self.map_id,
            cache,
            groups,
        })
    }
}

/// Scales the two highest-index reserved layers to whatever `layer_count`
/// the caller asked for, so a non-default layer count still reserves the
/// top two layers rather than hardcoding indices 8/9.
fn reserved_layer(layer_count: u32, default_reserved: u32) -> u32 {
    let distance_from_top = DEFAULT_LAYER_COUNT - default_reserved;
    layer_count.saturating_sub(distance_from_top)
}

fn default_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("no seed supplied; drew {seed} from system entropy for reproducibility logging");
    seed
}

/// The result of a finished build: the frozen cache plus enough context to
/// export it.
pub struct BuiltMap {
    map_id: String,
    cache: MapCache,
    groups: Vec<tilegen_core::ResourceGroup>,
}

impl BuiltMap {
    pub fn map_id(&self) -> &str {
        &self.map_id
    }

    pub fn cache(&self) -> &MapCache {
        &self.cache
    }

    /// Serializes this map to the standard editor-compatible schema.
    pub fn export_map(&self, layer_names: &[String]) -> MapSchema {
        export_map(&self.cache, &self.groups, layer_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tilegen_core::{ResourceGroup, TileDescriptor};
    use tilegen_elements::LoadedResources;

    struct GrassFillElement {
        groups: Vec<ResourceGroup>,
        loaded: RefCell<LoadedResources>,
    }

    impl GrassFillElement {
        fn new() -> Self {
            Self {
                groups: Vec::new(),
                loaded: RefCell::new(LoadedResources::new()),
            }
        }

        fn default_groups() -> Vec<ResourceGroup> {
            vec![ResourceGroup::new("ground")
                .add_tile(TileDescriptor {
                    resource_id: "grass".to_string(),
                    // Any path that exists is fine for the loader's
                    // existence check; reuse the manifest file itself.
                    image_path: env!("CARGO_MANIFEST_DIR").to_string(),
                    rate: 1.0,
                    collision: false,
                    cover: false,
                })
                .unwrap()]
        }
    }

    impl Element for GrassFillElement {
        fn name(&self) -> &str {
            "grass_fill"
        }

        fn setup_resources(&mut self) {
            self.groups = Self::default_groups();
        }

        fn resource_groups(&self) -> &[ResourceGroup] {
            &self.groups
        }

        fn default_descriptors(&self) -> Vec<ResourceGroup> {
            Self::default_groups()
        }

        fn install_overrides(&mut self, overrides: Vec<ResourceGroup>) {
            self.groups = tilegen_elements::fill_missing_groups(self.default_descriptors(), overrides);
        }

        fn set_loaded_resources(&mut self, loaded: LoadedResources) {
            *self.loaded.borrow_mut() = loaded;
        }

        fn build(&mut self, cache: &mut MapCache) -> Result<(), TilegenError> {
            let members = self.groups[0].members().to_vec();
            let positions: Vec<_> = (0..cache.height())
                .flat_map(|y| (0..cache.width()).map(move |x| tilegen_core::Coord::new(x, y)))
                .collect();
            cache.drop_tiles_from_tilegroup("ground", &members, &positions, 0)
        }
    }

    #[test]
    fn install_overrides_keeps_element_usable_when_caller_omits_its_group() {
        let mut element = GrassFillElement::new();
        // The caller supplies an override for a group id the element never
        // declared, omitting "ground" entirely; the element must still be
        // able to build against its own required group.
        element.install_overrides(vec![ResourceGroup::new("unrelated")]);
        assert_eq!(element.groups.len(), 2);
        assert!(element.groups.iter().any(|g| g.id == "ground"));
    }

    #[test]
    fn full_pipeline_fills_and_exports() {
        let builder = Builder::with_layers("test_map", 4, 2, 10).with_seed(1);
        let builder = builder.add_element(Box::new(GrassFillElement::new())).unwrap();
        let built = builder.build().unwrap();
        assert_eq!(built.cache().get_layer(0).len(), 8);
        let schema = built.export_map(&[]);
        assert_eq!(schema.layers[0].data.iter().filter(|&&g| g != 0).count(), 8);
    }

    #[test]
    fn from_template_carries_dimensions_and_seed() {
        let template = tilegen_core::MapTemplate {
            map_id: "overworld".to_string(),
            width: 6,
            height: 3,
            layers: vec![],
            seed: Some(99),
        };
        let built = Builder::from_template(&template)
            .add_element(Box::new(GrassFillElement::new()))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(built.map_id(), "overworld");
        assert_eq!(built.cache().width(), 6);
        assert_eq!(built.cache().height(), 3);
    }

    #[test]
    fn rejects_duplicate_element_names() {
        let builder = Builder::new("m", 2, 2)
            .add_element(Box::new(GrassFillElement::new()))
            .unwrap();
        let err = builder.add_element(Box::new(GrassFillElement::new())).unwrap_err();
        assert!(matches!(err, TilegenError::BuildAborted { .. }));
    }

    #[test]
    fn reserved_layer_scales_with_layer_count() {
        assert_eq!(reserved_layer(10, COLLISION_LAYER), 8);
        assert_eq!(reserved_layer(10, COVER_LAYER), 9);
        assert_eq!(reserved_layer(4, COLLISION_LAYER), 2);
        assert_eq!(reserved_layer(4, COVER_LAYER), 3);
    }
}
