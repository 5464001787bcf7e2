//! Wire payloads of the catalog API and the domain records built from them.

use serde::{Deserialize, Serialize};

/// One row of the lightweight universe listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: u32,
    pub name: String,
    /// URL of the entity's detail record
    pub locator: String,
}

/// A named base stat (`hp`, `special-attack`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub value: u32,
}

/// Full record of one entity, fetched on demand for cards and the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDetail {
    pub id: u32,
    pub name: String,
    /// Category tags in slot order; the first one is the primary category
    pub categories: Vec<String>,
    /// Front image locator, when the API has one
    pub image: Option<String>,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    pub abilities: Vec<String>,
    pub stats: Vec<BaseStat>,
}

impl EntityDetail {
    /// Primary category tag, used to color cards
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}

/// `{ name, url }` reference used throughout the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the entity listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Total number of entities the server knows about
    pub count: u64,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// Category record: who belongs to the category
///
/// Accepts both the generic `members: [{entity: {url}}]` shape and the
/// upstream `pokemon: [{pokemon: {url}}]` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default, alias = "pokemon")]
    pub members: Vec<CategoryMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMember {
    #[serde(alias = "pokemon")]
    pub entity: MemberRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
}

// Detail record as the API ships it; converted into `EntityDetail`.

#[derive(Debug, Deserialize)]
pub(crate) struct DetailRecord {
    id: u32,
    name: String,
    #[serde(default, rename = "types", alias = "categories")]
    categories: Vec<CategorySlot>,
    #[serde(default)]
    sprites: Option<Sprites>,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
}

#[derive(Debug, Deserialize)]
struct NameOnly {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CategorySlot {
    #[serde(default)]
    slot: u32,
    #[serde(rename = "type", alias = "category")]
    kind: NameOnly,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    #[serde(default)]
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NameOnly,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u32,
    stat: NameOnly,
}

impl From<DetailRecord> for EntityDetail {
    fn from(record: DetailRecord) -> Self {
        let mut slots = record.categories;
        slots.sort_by_key(|s| s.slot);

        EntityDetail {
            id: record.id,
            name: record.name,
            categories: slots.into_iter().map(|s| s.kind.name).collect(),
            image: record.sprites.and_then(|s| s.front_default),
            height: record.height,
            weight: record.weight,
            abilities: record.abilities.into_iter().map(|a| a.ability.name).collect(),
            stats: record
                .stats
                .into_iter()
                .map(|s| BaseStat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
        }
    }
}
