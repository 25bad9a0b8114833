//! Python bindings using PyO3
//!
//! Trees cross the boundary as JSON strings in the normalized export
//! shape; structured results come back as JSON strings too, except the
//! leaf classification which is small enough for a dict.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::node::DesignNode;
use crate::slots::SchemaRegistry;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

fn parse_tree(tree_json: &str) -> PyResult<DesignNode> {
    serde_json::from_str(tree_json).map_err(|e| value_error(format!("Failed to parse design tree: {e}")))
}

fn to_json(value: &impl serde::Serialize) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| value_error(format!("Failed to serialize result: {e}")))
}

/// Python wrapper for the classification engine
#[pyclass]
pub struct PyEngine {
    engine: Engine,
}

#[pymethods]
impl PyEngine {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json(json).map_err(value_error)?,
            None => EngineConfig::default(),
        };
        let engine = Engine::new(config).map_err(value_error)?;
        Ok(Self { engine })
    }

    /// Merge user schemas given as a JSON array
    fn add_schemas(&mut self, schemas_json: &str) -> PyResult<()> {
        let extra = SchemaRegistry::from_json(schemas_json).map_err(value_error)?;
        self.engine.add_schemas(extra).map_err(value_error)
    }

    /// Leaf classification of the tree's root
    fn classify<'py>(&self, tree_json: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let node = parse_tree(tree_json)?;
        let c = self.engine.classify(&node);
        let dict = PyDict::new_bound(py);
        let kind = serde_json::to_value(c.component_type).map_err(value_error)?;
        dict.set_item("type", kind.as_str().unwrap_or_default())?;
        dict.set_item("confidence", c.confidence)?;
        dict.set_item("reasons", c.reasons)?;
        Ok(dict)
    }

    /// Semantic mapping as JSON, or `None` when the type has no schema
    fn map_semantics(&self, tree_json: &str) -> PyResult<Option<String>> {
        let node = parse_tree(tree_json)?;
        self.engine
            .map_semantics(&node)
            .map(|result| to_json(&result))
            .transpose()
    }

    fn classify_block(&self, tree_json: &str) -> PyResult<String> {
        let node = parse_tree(tree_json)?;
        to_json(&self.engine.classify_block(&node))
    }

    fn classify_tree(&self, tree_json: &str) -> PyResult<String> {
        let node = parse_tree(tree_json)?;
        to_json(&self.engine.classify_tree(&node))
    }
}
