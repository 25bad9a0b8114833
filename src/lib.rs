//! Design classifier - component and block recognition for design trees
//!
//! Classifies nodes of a normalized design-file tree into UI component
//! types, decomposes composite components into named slots, and labels
//! whole subtrees as page-section archetypes.

pub mod block;
pub mod composition;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod leaf;
pub mod node;
pub mod scoring;
pub mod signals;
pub mod similarity;
pub mod slots;
pub mod types;

pub use block::{BlockCategory, BlockCharacteristics, BlockClassification, BlockPipeline};
pub use composition::{ComponentComposition, CompositionAnalyzer, Location, SubtreeAnalysis};
pub use config::EngineConfig;
pub use engine::{ClassifiedNode, Engine};
pub use error::{EngineError, Result};
pub use layout::{Complexity, LayoutKind, LayoutPattern};
pub use leaf::{LeafPipeline, LeafScorer};
pub use node::*;
pub use signals::{NodeCache, NodeFacts, VariantInfo};
pub use slots::{SchemaRegistry, SemanticMappingResult, SlotMapping, SlotSchema};
pub use types::*;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn design_classifier(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<py::PyEngine>()?;
    Ok(())
}
