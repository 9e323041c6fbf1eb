//! Type Dispatch
//!
//! Runtime type inspection over a small entity hierarchy, expressed as a
//! closed sum type instead of dynamic casts.
//!
//! ## Features
//!
//! - **Exact-type query**: [`classify`] reports the most specific type an entity has
//! - **Safe downcast**: [`safe_downcast`] narrows to the richest available view
//! - **Open-type dispatch**: [`dispatch_any`] labels strings, numbers and dogs
//! - **Fingerprints**: SHA256 over every significant field of an entity
//!
//! ## Hierarchy
//!
//! ```text
//! Animal (name)
//! ├── Mammal (is_warm_blooded)
//! │   └── Dog (breed)
//! └── Bird (can_fly)
//! ```
//!
//! ## Example
//!
//! ```
//! use type_dispatch::{classify, dispatch_any, safe_downcast, Classification, Dog, DynValue, Entity};
//!
//! let dog: Entity = Dog::new("Johny", "Bull").into();
//! assert_eq!(classify(&dog), Classification::Dog);
//! assert_eq!(safe_downcast(&dog).breed(), Some("Bull"));
//! assert_eq!(dispatch_any(&DynValue::from(5i64)).label(), "Int");
//! ```

pub mod config;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod fingerprint;
pub mod report;
pub mod value;

pub use config::{DispatchConfig, OutputFormat};
pub use dispatch::{classify, dispatch_any, safe_downcast, AnimalView, AnyLabel, Classification, TypeDispatcher};
pub use entity::{Animal, Bird, Dog, Entity, EntityKind, Mammal};
pub use error::{DispatchError, Result};
pub use fingerprint::Fingerprint;
pub use report::DispatchReport;
pub use value::DynValue;
