//! Entity hierarchy
//!
//! ```text
//! Animal
//! ├── Mammal
//! │   └── Dog
//! └── Bird
//! ```
//!
//! Each record embeds its parent record, so a `Dog` always carries a full
//! `Mammal`, which always carries a full `Animal`. The closed [`Entity`] sum
//! type is what callers hand to the dispatcher; its discriminant is
//! [`EntityKind`].
//!
//! Entities serialize as internally tagged objects with the parent fields
//! flattened:
//!
//! ```json
//! {"kind": "dog", "name": "Johny", "breed": "Bull"}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{DispatchError, Result};

// =============================================================================
// Records
// =============================================================================

/// Root of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Animal {
    pub name: String,
}

impl Animal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An animal that is (by default) warm-blooded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mammal {
    #[serde(flatten)]
    pub animal: Animal,
    #[serde(default = "default_true")]
    pub is_warm_blooded: bool,
}

impl Mammal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            animal: Animal::new(name),
            is_warm_blooded: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.animal.name
    }

    pub fn as_animal(&self) -> &Animal {
        &self.animal
    }
}

/// An animal that can (by default) fly
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bird {
    #[serde(flatten)]
    pub animal: Animal,
    #[serde(default = "default_true")]
    pub can_fly: bool,
}

impl Bird {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            animal: Animal::new(name),
            can_fly: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.animal.name
    }

    pub fn as_animal(&self) -> &Animal {
        &self.animal
    }
}

/// A mammal with a breed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dog {
    #[serde(flatten)]
    pub mammal: Mammal,
    pub breed: String,
}

impl Dog {
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            mammal: Mammal::new(name),
            breed: breed.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.mammal.name()
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn as_mammal(&self) -> &Mammal {
        &self.mammal
    }

    pub fn as_animal(&self) -> &Animal {
        self.mammal.as_animal()
    }
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Entity Kind
// =============================================================================

/// Discriminant of [`Entity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Animal,
    Mammal,
    Bird,
    Dog,
}

impl EntityKind {
    /// Direct parent in the hierarchy (`None` for the root)
    pub fn parent(&self) -> Option<EntityKind> {
        match self {
            EntityKind::Animal => None,
            EntityKind::Mammal | EntityKind::Bird => Some(EntityKind::Animal),
            EntityKind::Dog => Some(EntityKind::Mammal),
        }
    }

    /// Whether a value of this kind is-a `other` (reflexive, transitive)
    pub fn is_a(&self, other: EntityKind) -> bool {
        self.ancestry().any(|kind| kind == other)
    }

    /// This kind followed by each ancestor, most derived first
    pub fn ancestry(&self) -> impl Iterator<Item = EntityKind> {
        std::iter::successors(Some(*self), |kind| kind.parent())
    }

    /// Type name as shown to users
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Animal => "Animal",
            EntityKind::Mammal => "Mammal",
            EntityKind::Bird => "Bird",
            EntityKind::Dog => "Dog",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// =============================================================================
// Entity
// =============================================================================

/// Any value whose runtime type is `Animal` or one of its descendants
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Animal(Animal),
    Mammal(Mammal),
    Bird(Bird),
    Dog(Dog),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Animal(_) => EntityKind::Animal,
            Entity::Mammal(_) => EntityKind::Mammal,
            Entity::Bird(_) => EntityKind::Bird,
            Entity::Dog(_) => EntityKind::Dog,
        }
    }

    pub fn name(&self) -> &str {
        &self.as_animal().name
    }

    /// Runtime type test against `kind`, honouring inheritance
    pub fn is(&self, kind: EntityKind) -> bool {
        self.kind().is_a(kind)
    }

    /// The animal view every entity has
    pub fn as_animal(&self) -> &Animal {
        match self {
            Entity::Animal(animal) => animal,
            Entity::Mammal(mammal) => mammal.as_animal(),
            Entity::Bird(bird) => bird.as_animal(),
            Entity::Dog(dog) => dog.as_animal(),
        }
    }

    /// Narrow to a mammal; a dog narrows to its embedded mammal
    pub fn as_mammal(&self) -> Option<&Mammal> {
        match self {
            Entity::Mammal(mammal) => Some(mammal),
            Entity::Dog(dog) => Some(dog.as_mammal()),
            Entity::Animal(_) | Entity::Bird(_) => None,
        }
    }

    pub fn as_bird(&self) -> Option<&Bird> {
        match self {
            Entity::Bird(bird) => Some(bird),
            _ => None,
        }
    }

    pub fn as_dog(&self) -> Option<&Dog> {
        match self {
            Entity::Dog(dog) => Some(dog),
            _ => None,
        }
    }
}

impl From<Animal> for Entity {
    fn from(animal: Animal) -> Self {
        Entity::Animal(animal)
    }
}

impl From<Mammal> for Entity {
    fn from(mammal: Mammal) -> Self {
        Entity::Mammal(mammal)
    }
}

impl From<Bird> for Entity {
    fn from(bird: Bird) -> Self {
        Entity::Bird(bird)
    }
}

impl From<Dog> for Entity {
    fn from(dog: Dog) -> Self {
        Entity::Dog(dog)
    }
}

/// Load a JSON array of tagged entities from a file
pub fn load_entities(path: &Path) -> Result<Vec<Entity>> {
    let content = std::fs::read_to_string(path)?;
    let entities: Vec<Entity> = serde_json::from_str(&content)
        .map_err(|e| DispatchError::InvalidEntity(format!("{}: {}", path.display(), e)))?;
    tracing::debug!("loaded {} entities from {}", entities.len(), path.display());
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dog_is_mammal_and_animal() {
        let dog = Entity::from(Dog::new("Johny", "Bull"));
        assert!(dog.is(EntityKind::Dog));
        assert!(dog.is(EntityKind::Mammal));
        assert!(dog.is(EntityKind::Animal));
        assert!(!dog.is(EntityKind::Bird));
    }

    #[test]
    fn test_bird_is_not_mammal() {
        let bird = Entity::from(Bird::new("Robin"));
        assert!(bird.is(EntityKind::Animal));
        assert!(!bird.is(EntityKind::Mammal));
        assert!(bird.as_mammal().is_none());
        assert!(bird.as_bird().unwrap().can_fly);
    }

    #[test]
    fn test_dog_narrows_to_embedded_mammal() {
        let dog = Entity::from(Dog::new("Johny", "Bull"));
        let mammal = dog.as_mammal().unwrap();
        assert_eq!(mammal.name(), "Johny");
        assert!(mammal.is_warm_blooded);
        assert_eq!(dog.as_dog().unwrap().breed(), "Bull");
    }

    #[test]
    fn test_ancestry_most_derived_first() {
        let chain: Vec<_> = EntityKind::Dog.ancestry().collect();
        assert_eq!(chain, vec![EntityKind::Dog, EntityKind::Mammal, EntityKind::Animal]);
        assert_eq!(EntityKind::Animal.parent(), None);
    }

    #[test]
    fn test_field_by_field_equality_and_hash() {
        let mut seen = HashSet::new();
        seen.insert(Entity::from(Dog::new("Johny", "Bull")));
        assert!(seen.contains(&Entity::from(Dog::new("Johny", "Bull"))));
        assert!(!seen.contains(&Entity::from(Dog::new("Johny", "Poodle"))));
        // Same name, different kind
        assert_ne!(Entity::from(Mammal::new("Lion")), Entity::from(Animal::new("Lion")));
    }

    #[test]
    fn test_tagged_json_shape() {
        let json = serde_json::to_value(Entity::from(Dog::new("Johny", "Bull"))).unwrap();
        assert_eq!(json["kind"], "dog");
        assert_eq!(json["name"], "Johny");
        assert_eq!(json["breed"], "Bull");
        assert_eq!(json["is_warm_blooded"], true);
    }

    #[test]
    fn test_load_entities_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoo.json");
        std::fs::write(&path, r#"[{"kind": "dog", "name": "Johny"}]"#).unwrap();

        match load_entities(&path) {
            Err(DispatchError::InvalidEntity(msg)) => assert!(msg.contains("zoo.json")),
            other => panic!("Expected InvalidEntity, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let mammal: Entity = serde_json::from_str(r#"{"kind": "mammal", "name": "Lion"}"#).unwrap();
        assert_eq!(mammal, Entity::from(Mammal::new("Lion")));

        let penguin: Entity =
            serde_json::from_str(r#"{"kind": "bird", "name": "Pingu", "can_fly": false}"#).unwrap();
        assert!(!penguin.as_bird().unwrap().can_fly);
    }
}
