use crate::error::{CollabError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item id -> rating for a single entity
pub type ItemRatings = BTreeMap<String, f64>;

/// (identifier, score) as produced by the ranking operations
pub type RankedPair = (String, f64);

/// Entity id -> item ratings.
///
/// Serializes as a plain JSON object of objects. Keys are kept ordered so that
/// iteration, and therefore floating-point accumulation order, is the same in
/// every process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingTable {
    entities: BTreeMap<String, ItemRatings>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a single rating
    pub fn insert(&mut self, entity: impl Into<String>, item: impl Into<String>, rating: f64) {
        self.entities
            .entry(entity.into())
            .or_default()
            .insert(item.into(), rating);
    }

    /// Ratings of `entity`, or `UnknownEntity`
    pub fn ratings(&self, entity: &str) -> Result<&ItemRatings> {
        self.entities
            .get(entity)
            .ok_or_else(|| CollabError::UnknownEntity(entity.to_string()))
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }

    /// Entity ids in ascending order
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemRatings)> {
        self.entities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl From<BTreeMap<String, ItemRatings>> for RatingTable {
    fn from(entities: BTreeMap<String, ItemRatings>) -> Self {
        Self { entities }
    }
}

impl<E, I> FromIterator<(E, I, f64)> for RatingTable
where
    E: Into<String>,
    I: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (E, I, f64)>>(iter: T) -> Self {
        let mut table = RatingTable::new();
        for (entity, item, rating) in iter {
            table.insert(entity, item, rating);
        }
        table
    }
}
