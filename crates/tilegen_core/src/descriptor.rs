//! Declarative resource descriptors: the tiles, auto-tiles and objects an
//! element can place, and the weighted groups that union them.

use crate::error::TilegenError;
use serde::{Deserialize, Serialize};

/// A single-cell tile descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub resource_id: String,
    pub image_path: String,
    pub rate: f64,
    #[serde(default)]
    pub collision: bool,
    #[serde(default)]
    pub cover: bool,
}

/// A blob47 auto-tile descriptor. The image is a composite sprite sheet
/// indexed by the resolved blob47 code (0..47).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoTileDescriptor {
    pub resource_id: String,
    pub image_path: String,
    #[serde(default = "default_autotile_method")]
    pub method: String,
    #[serde(default)]
    pub collision: bool,
    #[serde(default)]
    pub cover: bool,
}

fn default_autotile_method() -> String {
    "blob47".to_string()
}

/// A verb/noun interaction function an object exposes (e.g. `("open",
/// "door")`), carried through to downstream generators; the core never
/// interprets these itself.
pub type Function = (String, String);

/// A multi-cell object descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub resource_id: String,
    pub image_path: String,
    pub w: u32,
    pub h: u32,
    #[serde(default)]
    pub collision: bool,
    #[serde(default)]
    pub cover: bool,
    pub rate: f64,
    #[serde(default)]
    pub functions: Vec<Function>,
}

/// One member of a [`ResourceGroup`]. Groups are homogeneous: every member
/// must be the same variant — mixing `Tile` and `AutoTile` in one group is
/// the specific ambiguity this resolves in favor of rejecting at
/// construction, same as mixing either with `Object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GroupMember {
    Tile(TileDescriptor),
    AutoTile(AutoTileDescriptor),
    Object(ObjectDescriptor),
}

impl GroupMember {
    pub fn resource_id(&self) -> &str {
        match self {
            GroupMember::Tile(t) => &t.resource_id,
            GroupMember::AutoTile(a) => &a.resource_id,
            GroupMember::Object(o) => &o.resource_id,
        }
    }

    /// AutoTile descriptors carry no explicit rate in the source data (only
    /// `Tile`/`Object` do); an all-AutoTile group still has to go through
    /// weighted choice, so members default to a uniform weight of 1.0.
    pub fn rate(&self) -> f64 {
        match self {
            GroupMember::Tile(t) => t.rate,
            GroupMember::AutoTile(_) => 1.0,
            GroupMember::Object(o) => o.rate,
        }
    }

    fn family(&self) -> GroupFamily {
        match self {
            GroupMember::Tile(_) => GroupFamily::Tile,
            GroupMember::AutoTile(_) => GroupFamily::AutoTile,
            GroupMember::Object(_) => GroupFamily::Object,
        }
    }
}

/// A group's members must all be the same kind: mixing `Tile` and `AutoTile`
/// within one group is the specific ambiguity this type rejects at
/// construction (see `HeterogeneousGroup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupFamily {
    Tile,
    AutoTile,
    Object,
}

/// A weighted union of descriptors, all of the same kind: all `Tile`, all
/// `AutoTile`, or all `Object` (never mixed — see [`GroupMember`]).
///
/// Construction is a fallible builder: `add_tile`/`add_auto_tile`/
/// `add_object` each return `Result<Self, TilegenError>` so duplicate ids and
/// heterogeneous members are caught at group-assembly time, not silently
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub id: String,
    members: Vec<GroupMember>,
}

impl ResourceGroup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            members: Vec::new(),
        }
    }

    fn family(&self) -> Option<GroupFamily> {
        self.members.first().map(GroupMember::family)
    }

    fn push(&mut self, member: GroupMember) -> Result<(), TilegenError> {
        if let Some(existing) = self.family() {
            if existing != member.family() {
                return Err(TilegenError::HeterogeneousGroup {
                    group: self.id.clone(),
                });
            }
        }
        if self
            .members
            .iter()
            .any(|m| m.resource_id() == member.resource_id())
        {
            return Err(TilegenError::DuplicateResource(
                member.resource_id().to_string(),
                self.id.clone(),
            ));
        }
        self.members.push(member);
        Ok(())
    }

    pub fn add_tile(mut self, tile: TileDescriptor) -> Result<Self, TilegenError> {
        self.push(GroupMember::Tile(tile))?;
        Ok(self)
    }

    pub fn add_auto_tile(mut self, auto_tile: AutoTileDescriptor) -> Result<Self, TilegenError> {
        self.push(GroupMember::AutoTile(auto_tile))?;
        Ok(self)
    }

    pub fn add_object(mut self, object: ObjectDescriptor) -> Result<Self, TilegenError> {
        self.push(GroupMember::Object(object))?;
        Ok(self)
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All image paths this group references, for the resource loader.
    pub fn image_paths(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| match m {
            GroupMember::Tile(t) => t.image_path.as_str(),
            GroupMember::AutoTile(a) => a.image_path.as_str(),
            GroupMember::Object(o) => o.image_path.as_str(),
        })
    }
}
