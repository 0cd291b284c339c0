use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned hero identifier
pub type HeroId = i64;

/// A hero record as exchanged with the heroes API
///
/// A hero without an id has not been persisted yet. Only `create` accepts
/// such a record; update and delete require the id the server assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HeroId>,
    pub name: String,
}

impl Hero {
    /// Create a new, not yet persisted hero
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Create a hero that already carries a server id
    pub fn with_id(id: HeroId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}: {}", id, self.name),
            None => write!(f, "(new): {}", self.name),
        }
    }
}

/// Target of a delete: either a bare id or a full record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroRef {
    Id(HeroId),
    Record(Hero),
}

impl HeroRef {
    /// The id to address, if the reference carries one
    pub fn id(&self) -> Option<HeroId> {
        match self {
            HeroRef::Id(id) => Some(*id),
            HeroRef::Record(hero) => hero.id,
        }
    }
}

impl From<HeroId> for HeroRef {
    fn from(id: HeroId) -> Self {
        HeroRef::Id(id)
    }
}

impl From<Hero> for HeroRef {
    fn from(hero: Hero) -> Self {
        HeroRef::Record(hero)
    }
}

impl From<&Hero> for HeroRef {
    fn from(hero: &Hero) -> Self {
        HeroRef::Record(hero.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_hero_omits_id_on_the_wire() {
        let hero = Hero::new("Magneta");
        assert!(hero.is_new());
        assert_eq!(serde_json::to_value(&hero).unwrap(), json!({"name": "Magneta"}));
    }

    #[test]
    fn test_persisted_hero_wire_shape() {
        let hero: Hero = serde_json::from_value(json!({"id": 5, "name": "X"})).unwrap();
        assert_eq!(hero, Hero::with_id(5, "X"));
        assert_eq!(serde_json::to_value(&hero).unwrap(), json!({"id": 5, "name": "X"}));
    }

    #[test]
    fn test_hero_ref_extracts_id() {
        assert_eq!(HeroRef::from(5).id(), Some(5));
        assert_eq!(HeroRef::from(&Hero::with_id(7, "Y")).id(), Some(7));
        assert_eq!(HeroRef::from(Hero::new("Z")).id(), None);
    }
}
