use super::fitness::Fitness;
use crate::types::Vector;
use crate::utils::prelude::*;
use std::collections::BTreeMap;

/// Clés standard des propriétés d'une entité.
pub mod keys {
    pub const FITNESS: &str = "fitness";
    pub const BEST_POSITION: &str = "best_position";
    pub const BEST_FITNESS: &str = "best_fitness";
    pub const BOARD: &str = "board";
}

/// Tableau des scores d'une entité en co-évolution compétitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn win_count(&self) -> u32 {
        self.wins
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Valeur typée d'une propriété auxiliaire.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PropertyValue {
    Real(f64),
    Integer(i64),
    Text(String),
    Fitness(Fitness),
    Vector(Vector),
    Scoreboard(Scoreboard),
}

/// Dictionnaire des propriétés nommées d'une entité.
/// BTreeMap : l'ordre d'itération reste reproductible d'un run à l'autre.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Properties {
    values: BTreeMap<String, PropertyValue>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: PropertyValue) -> Option<PropertyValue> {
        self.values.insert(key.to_string(), value)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropertyValue> {
        self.values.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fitness(&self, key: &str) -> Option<&Fitness> {
        match self.values.get(key) {
            Some(PropertyValue::Fitness(f)) => Some(f),
            _ => None,
        }
    }

    pub fn vector(&self, key: &str) -> Option<&Vector> {
        match self.values.get(key) {
            Some(PropertyValue::Vector(v)) => Some(v),
            _ => None,
        }
    }

    pub fn real(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(PropertyValue::Real(r)) => Some(*r),
            Some(PropertyValue::Integer(i)) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn scoreboard(&self, key: &str) -> Option<&Scoreboard> {
        match self.values.get(key) {
            Some(PropertyValue::Scoreboard(b)) => Some(b),
            _ => None,
        }
    }

    /// Scoreboard existant, ou créé vide (remplace une valeur d'un autre type).
    pub fn scoreboard_mut(&mut self, key: &str) -> &mut Scoreboard {
        let slot = self
            .values
            .entry(key.to_string())
            .or_insert(PropertyValue::Scoreboard(Scoreboard::default()));
        if !matches!(slot, PropertyValue::Scoreboard(_)) {
            *slot = PropertyValue::Scoreboard(Scoreboard::default());
        }
        match slot {
            PropertyValue::Scoreboard(board) => board,
            _ => unreachable!("slot initialisé en Scoreboard juste au-dessus"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
        self.values.iter()
    }
}
