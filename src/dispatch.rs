//! Type Dispatch
//!
//! Three ways of acting on a value without knowing its concrete variant up
//! front:
//! - [`classify`]: exact-type query, reported as a [`Classification`]
//! - [`safe_downcast`]: narrow to the most specific view available ([`AnimalView`])
//! - [`dispatch_any`]: open-type dispatch over a [`DynValue`] ([`AnyLabel`])
//!
//! Every check runs most-derived first. A `Dog` is also a `Mammal`, so testing
//! `Mammal` before `Dog` would report every dog as a mammal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::Entity;
use crate::value::{format_real, DynValue};

// =============================================================================
// Classification
// =============================================================================

/// Result of an exact-type query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Dog,
    Mammal,
    /// Fallback for anything that is neither a dog nor a mammal
    Animal,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Dog => "Dog",
            Classification::Mammal => "Mammal",
            Classification::Animal => "Animal",
        }
    }

    /// Sentence describing an entity called `name` with this classification
    pub fn describe(&self, name: &str) -> String {
        match self {
            Classification::Animal => format!("{} is an Animal.", name),
            other => format!("{} is a {}.", name, other.label()),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an entity, most specific type first
pub fn classify(entity: &Entity) -> Classification {
    let classification = if entity.as_dog().is_some() {
        Classification::Dog
    } else if entity.as_mammal().is_some() {
        Classification::Mammal
    } else {
        Classification::Animal
    };

    tracing::trace!(kind = %entity.kind(), %classification, "classified entity");
    classification
}

// =============================================================================
// Downcast View
// =============================================================================

/// The most specific view of an entity that a downcast could produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AnimalView<'a> {
    Dog { name: &'a str, breed: &'a str },
    Mammal { name: &'a str },
    Animal { name: &'a str },
}

impl<'a> AnimalView<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            AnimalView::Dog { name, .. }
            | AnimalView::Mammal { name }
            | AnimalView::Animal { name } => name,
        }
    }

    /// Only the dog view exposes a breed
    pub fn breed(&self) -> Option<&'a str> {
        match *self {
            AnimalView::Dog { breed, .. } => Some(breed),
            _ => None,
        }
    }
}

impl fmt::Display for AnimalView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimalView::Dog { name, breed } => {
                write!(f, "This is a dog named {} of breed {}.", name, breed)
            }
            AnimalView::Mammal { name } => write!(f, "{} is a Mammal.", name),
            AnimalView::Animal { name } => write!(f, "{} is an Animal.", name),
        }
    }
}

/// Downcast to `Dog`, then to `Mammal`, falling back to the animal view
pub fn safe_downcast(entity: &Entity) -> AnimalView<'_> {
    let view = if let Some(dog) = entity.as_dog() {
        AnimalView::Dog {
            name: dog.name(),
            breed: dog.breed(),
        }
    } else if let Some(mammal) = entity.as_mammal() {
        AnimalView::Mammal { name: mammal.name() }
    } else {
        AnimalView::Animal {
            name: entity.name(),
        }
    };

    tracing::trace!(kind = %entity.kind(), ?view, "downcast entity");
    view
}

// =============================================================================
// Open-Type Dispatch
// =============================================================================

/// Outcome of dispatching a heterogeneous value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "label", rename_all = "snake_case")]
pub enum AnyLabel<'a> {
    String { text: &'a str },
    Int { value: i64 },
    Double { value: f64 },
    Dog { name: &'a str, breed: &'a str },
    Unknown,
}

impl AnyLabel<'_> {
    /// Short label naming the matched case
    pub fn label(&self) -> &'static str {
        match self {
            AnyLabel::String { .. } => "String",
            AnyLabel::Int { .. } => "Int",
            AnyLabel::Double { .. } => "Double",
            AnyLabel::Dog { .. } => "Dog",
            AnyLabel::Unknown => "Unknown type",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AnyLabel::Unknown)
    }
}

impl fmt::Display for AnyLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyLabel::String { text } => write!(f, "Found a String: {}", text),
            AnyLabel::Int { value } => write!(f, "Found an Int: {}", value),
            AnyLabel::Double { value } => write!(f, "Found a Double: {}", format_real(*value)),
            AnyLabel::Dog { name, breed } => {
                write!(f, "Found a Dog named {} of breed {}", name, breed)
            }
            AnyLabel::Unknown => f.write_str("Unknown type"),
        }
    }
}

/// Dispatch in declared order: text, integer, real, dog, then unknown
pub fn dispatch_any(value: &DynValue) -> AnyLabel<'_> {
    let label = match value {
        DynValue::Text(text) => AnyLabel::String { text: text.as_str() },
        DynValue::Integer(int) => AnyLabel::Int { value: *int },
        DynValue::Real(real) => AnyLabel::Double { value: *real },
        DynValue::Entity(entity) => match entity.as_dog() {
            Some(dog) => AnyLabel::Dog {
                name: dog.name(),
                breed: dog.breed(),
            },
            None => AnyLabel::Unknown,
        },
        DynValue::Other(_) => AnyLabel::Unknown,
    };

    tracing::trace!(tag = value.tag(), label = label.label(), "dispatched value");
    label
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Stateless handle bundling the three dispatch operations
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeDispatcher;

impl TypeDispatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, entity: &Entity) -> Classification {
        classify(entity)
    }

    pub fn safe_downcast<'a>(&self, entity: &'a Entity) -> AnimalView<'a> {
        safe_downcast(entity)
    }

    pub fn dispatch_any<'a>(&self, value: &'a DynValue) -> AnyLabel<'a> {
        dispatch_any(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Animal, Bird, Dog, Mammal};

    #[test]
    fn test_classify_most_derived_first() {
        assert_eq!(classify(&Dog::new("Johny", "Bull").into()), Classification::Dog);
        assert_eq!(classify(&Mammal::new("Lion").into()), Classification::Mammal);
    }

    #[test]
    fn test_classify_falls_back_to_animal() {
        assert_eq!(classify(&Bird::new("Robin").into()), Classification::Animal);
        assert_eq!(classify(&Animal::new("Thing").into()), Classification::Animal);
    }

    #[test]
    fn test_describe() {
        assert_eq!(Classification::Dog.describe("Johny"), "Johny is a Dog.");
        assert_eq!(Classification::Mammal.describe("Lion"), "Lion is a Mammal.");
        assert_eq!(Classification::Animal.describe("Robin"), "Robin is an Animal.");
    }

    #[test]
    fn test_downcast_dog_exposes_breed() {
        let dog: Entity = Dog::new("Johny", "Bull").into();
        let view = safe_downcast(&dog);
        assert_eq!(view, AnimalView::Dog { name: "Johny", breed: "Bull" });
        assert_eq!(view.to_string(), "This is a dog named Johny of breed Bull.");
    }

    #[test]
    fn test_downcast_mammal_and_fallback() {
        let lion: Entity = Mammal::new("Lion").into();
        assert_eq!(safe_downcast(&lion), AnimalView::Mammal { name: "Lion" });
        assert_eq!(safe_downcast(&lion).breed(), None);

        let robin: Entity = Bird::new("Robin").into();
        let view = safe_downcast(&robin);
        assert_eq!(view, AnimalView::Animal { name: "Robin" });
        assert_eq!(view.to_string(), "Robin is an Animal.");
    }

    #[test]
    fn test_dispatch_any_labels() {
        assert_eq!(dispatch_any(&"x".into()).label(), "String");
        assert_eq!(dispatch_any(&5i64.into()).label(), "Int");
        assert_eq!(dispatch_any(&5.0.into()).label(), "Double");
        assert_eq!(dispatch_any(&Mammal::new("Lion").into()), AnyLabel::Unknown);
        assert_eq!(dispatch_any(&DynValue::Other("null".into())).label(), "Unknown type");
    }

    #[test]
    fn test_dispatch_any_messages() {
        let dog: DynValue = Dog::new("Johny", "Bull").into();
        assert_eq!(dispatch_any(&dog).to_string(), "Found a Dog named Johny of breed Bull");
        assert_eq!(dispatch_any(&"Object".into()).to_string(), "Found a String: Object");
        assert_eq!(dispatch_any(&5.0.into()).to_string(), "Found a Double: 5.0");
        assert_eq!(dispatch_any(&7i64.into()).to_string(), "Found an Int: 7");
    }

    #[test]
    fn test_dispatcher_is_pure() {
        let dispatcher = TypeDispatcher::new();
        let dog: Entity = Dog::new("Johny", "Bull").into();
        assert_eq!(dispatcher.classify(&dog), dispatcher.classify(&dog));
        assert_eq!(dispatcher.safe_downcast(&dog), dispatcher.safe_downcast(&dog));
        let value = DynValue::from(dog.clone());
        assert_eq!(dispatcher.dispatch_any(&value), dispatcher.dispatch_any(&value));
    }
}
