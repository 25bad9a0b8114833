//! Slot decomposition of composite components
//!
//! [`schema`] describes the expected structure, [`registry`] holds the
//! validated schemas, [`decompose`] maps a node's children onto them.

pub mod decompose;
pub mod registry;
pub mod schema;

pub use decompose::{Decomposer, SemanticMappingResult, SlotMapping};
pub use registry::SchemaRegistry;
pub use schema::{DetectionRule, RuleKind, SlotPosition, SlotSchema, SlotSpec, TextRole};
