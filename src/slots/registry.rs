//! Schema registry: one validated schema per composite type

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::MAX_DEPTH;
use crate::error::{EngineError, Result};
use crate::slots::schema::SlotSchema;
use crate::types::ComponentType;

const BUILTIN_SCHEMAS: &str = include_str!("builtin_schemas.json");

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<ComponentType, SlotSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schemas shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SCHEMAS)
    }

    /// Parse a JSON array of schemas, validating each one.
    pub fn from_json(json: &str) -> Result<Self> {
        let schemas: Vec<SlotSchema> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for schema in schemas {
            registry.insert(schema)?;
        }
        debug!(schemas = registry.len(), "loaded slot schemas");
        Ok(registry)
    }

    pub fn insert(&mut self, schema: SlotSchema) -> Result<()> {
        schema.validate(MAX_DEPTH)?;
        if self.schemas.contains_key(&schema.component) {
            return Err(EngineError::DuplicateSchema(schema.component));
        }
        self.schemas.insert(schema.component, schema);
        Ok(())
    }

    /// Add every schema from `other`; a type registered in both is an error
    /// and leaves `self` unchanged.
    pub fn merge(&mut self, other: SchemaRegistry) -> Result<()> {
        if let Some(dup) = other.schemas.keys().find(|k| self.schemas.contains_key(k)) {
            return Err(EngineError::DuplicateSchema(*dup));
        }
        self.schemas.extend(other.schemas);
        Ok(())
    }

    /// Re-check nesting against an engine's own depth limit
    pub fn validate(&self, max_depth: usize) -> Result<()> {
        self.schemas.values().try_for_each(|s| s.validate(max_depth))
    }

    pub fn get(&self, component: ComponentType) -> Option<&SlotSchema> {
        self.schemas.get(&component)
    }

    pub fn components(&self) -> impl Iterator<Item = ComponentType> + '_ {
        self.schemas.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
