//! Serializes a finished [`MapCache`] to the editor-compatible map schema
//! (spec §6): a flat `data` array of gids per layer, plus a tileset table
//! mapping `firstgid..firstgid+tilecount` ranges back to source images.

use serde::Serialize;
use std::collections::HashMap;
use tilegen_cache::MapCache;
use tilegen_core::{GroupMember, ResourceGroup, DEFAULT_TILE_SIZE};

use tilegen_elements::{COLLISION_RESOURCE_ID, COVER_RESOURCE_ID};

#[derive(Debug, Serialize)]
pub struct MapSchema {
    pub width: u32,
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub orientation: &'static str,
    pub renderorder: &'static str,
    pub layers: Vec<LayerSchema>,
    pub tilesets: Vec<TilesetSchema>,
}

#[derive(Debug, Serialize)]
pub struct LayerSchema {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct TilesetSchema {
    pub firstgid: u32,
    pub name: String,
    pub tilecount: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    pub image: String,
}

struct TilesetEntry {
    resource_id: String,
    image: String,
    firstgid: u32,
    tilecount: u32,
}

/// Assigns contiguous gid ranges to every distinct resource id referenced
/// by `groups`, plus the two built-in obstacle resources. gid 0 is
/// reserved for "empty", so the first entry starts at `firstgid = 1`.
struct TilesetRegistry {
    entries: Vec<TilesetEntry>,
    firstgid_by_resource: HashMap<String, u32>,
}

impl TilesetRegistry {
    fn build(groups: &[ResourceGroup]) -> Self {
        let mut entries = Vec::new();
        let mut firstgid_by_resource = HashMap::new();
        let mut next_gid = 1u32;

        let mut push = |resource_id: String, image: String, tilecount: u32| {
            if firstgid_by_resource.contains_key(&resource_id) {
                return;
            }
            firstgid_by_resource.insert(resource_id.clone(), next_gid);
            entries.push(TilesetEntry {
                resource_id,
                image,
                firstgid: next_gid,
                tilecount,
            });
            next_gid += tilecount;
        };

        for group in groups {
            for member in group.members() {
                match member {
                    GroupMember::Tile(t) => push(t.resource_id.clone(), t.image_path.clone(), 1),
                    GroupMember::Object(o) => push(o.resource_id.clone(), o.image_path.clone(), 1),
                    GroupMember::AutoTile(a) => push(a.resource_id.clone(), a.image_path.clone(), 47),
                }
            }
        }

        push(
            COLLISION_RESOURCE_ID.to_string(),
            "builtin://collision_obstacle.png".to_string(),
            1,
        );
        push(
            COVER_RESOURCE_ID.to_string(),
            "builtin://cover_obstacle.png".to_string(),
            1,
        );

        Self {
            entries,
            firstgid_by_resource,
        }
    }

    fn gid_for(&self, tile_ref: &tilegen_core::TileRef) -> u32 {
        let firstgid = match self.firstgid_by_resource.get(&tile_ref.resource_id) {
            Some(g) => *g,
            None => return 0,
        };
        if tile_ref.auto_tile_family.is_some() {
            firstgid + tile_ref.auto_tile_index.unwrap_or(0)
        } else {
            firstgid
        }
    }

    fn into_schemas(self) -> Vec<TilesetSchema> {
        self.entries
            .into_iter()
            .map(|e| TilesetSchema {
                firstgid: e.firstgid,
                name: e.resource_id,
                tilecount: e.tilecount,
                tilewidth: DEFAULT_TILE_SIZE,
                tileheight: DEFAULT_TILE_SIZE,
                image: e.image,
            })
            .collect()
    }
}

/// Serialize `cache` to the standard map schema. `groups` must be the same
/// aggregated descriptor groups the Builder loaded resources from, so gid
/// assignment is stable across a build.
pub fn export_map(cache: &MapCache, groups: &[ResourceGroup], layer_names: &[String]) -> MapSchema {
    let registry = TilesetRegistry::build(groups);
    let width = cache.width();
    let height = cache.height();

    let layers = (0..cache.layer_count())
        .map(|layer| {
            let mut data = vec![0u32; (width as usize) * (height as usize)];
            for (coord, tile_ref) in cache.get_layer(layer) {
                let idx = (coord.y as usize) * (width as usize) + coord.x as usize;
                data[idx] = registry.gid_for(tile_ref);
            }
            LayerSchema {
                id: layer,
                name: layer_names
                    .get(layer as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("layer_{layer}")),
                kind: "tilelayer",
                width,
                height,
                data,
            }
        })
        .collect();

    MapSchema {
        width,
        height,
        tilewidth: DEFAULT_TILE_SIZE,
        tileheight: DEFAULT_TILE_SIZE,
        kind: "map",
        orientation: "orthogonal",
        renderorder: "right-down",
        layers,
        tilesets: registry.into_schemas(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegen_core::{TileDescriptor, TileRef};

    #[test]
    fn export_fills_full_length_data_array() {
        let mut cache = MapCache::new(4, 2, 1, 1);
        let group = ResourceGroup::new("ground")
            .add_tile(TileDescriptor {
                resource_id: "grass".to_string(),
                image_path: "grass.png".to_string(),
                rate: 1.0,
                collision: false,
                cover: false,
            })
            .unwrap();
        for y in 0..2 {
            for x in 0..4 {
                cache.drop_tile(x, y, 0, TileRef::unit("grass", "ground"));
            }
        }
        let schema = export_map(&cache, &[group], &["ground".to_string()]);
        assert_eq!(schema.layers.len(), 1);
        assert_eq!(schema.layers[0].data.len(), 8);
        assert!(schema.layers[0].data.iter().all(|&gid| gid != 0));
    }

    #[test]
    fn footprint_cells_emit_zero_gid() {
        let mut cache = MapCache::new(6, 6, 2, 1);
        let group = ResourceGroup::new("props")
            .add_object(tilegen_core::ObjectDescriptor {
                resource_id: "house".to_string(),
                image_path: "house.png".to_string(),
                w: 2,
                h: 2,
                collision: false,
                cover: false,
                rate: 1.0,
                functions: vec![],
            })
            .unwrap();
        cache.drop_object(1, 1, 0, 1, "house", "props", 2, 2, false, false);

        let schema = export_map(&cache, &[group], &[]);
        let width = schema.width as usize;
        let data = &schema.layers[0].data;
        let anchor_idx = width + 1;
        let footprint_idx = width + 2;
        assert_ne!(data[anchor_idx], 0);
        assert_eq!(data[footprint_idx], 0);
    }
}
