//! Engine facade
//!
//! Owns the validated configuration, both pipelines and the schema
//! registry. Every request builds its own [`NodeCache`] and drops it on
//! return, so an `Engine` holds no per-tree state and can be shared.

use serde::Serialize;
use tracing::warn;

use crate::block::{BlockClassification, BlockContext, BlockPipeline, BlockScore};
use crate::composition::{CompositionAnalyzer, SubtreeAnalysis};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::leaf::LeafPipeline;
use crate::node::DesignNode;
use crate::signals::NodeCache;
use crate::slots::{Decomposer, SchemaRegistry, SemanticMappingResult, SlotSchema};
use crate::types::{Classification, NodeRef};

/// One visible node of an annotated tree
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedNode<'a> {
    pub node: NodeRef<'a>,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantics: Option<SemanticMappingResult<'a>>,
    pub children: Vec<ClassifiedNode<'a>>,
    /// Children exist but were not visited because of the depth guard
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl ClassifiedNode<'_> {
    /// Number of annotated nodes, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ClassifiedNode::node_count).sum::<usize>()
    }
}

pub struct Engine {
    config: EngineConfig,
    leaf: LeafPipeline,
    blocks: BlockPipeline,
    schemas: SchemaRegistry,
}

impl Engine {
    /// Validates `config` and the built-in schemas.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let schemas = SchemaRegistry::builtin()?;
        schemas.validate(config.max_depth)?;
        Ok(Self {
            leaf: LeafPipeline::standard(&config),
            blocks: BlockPipeline::standard(&config),
            schemas,
            config,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Add user schemas; a type that already has a schema is an error.
    pub fn with_schemas(mut self, extra: SchemaRegistry) -> Result<Self> {
        self.add_schemas(extra)?;
        Ok(self)
    }

    /// Leaves the registry unchanged on error.
    pub fn add_schemas(&mut self, extra: SchemaRegistry) -> Result<()> {
        extra.validate(self.config.max_depth)?;
        self.schemas.merge(extra)
    }

    pub fn with_leaf_pipeline(mut self, leaf: LeafPipeline) -> Self {
        self.leaf = leaf;
        self
    }

    pub fn with_block_pipeline(mut self, blocks: BlockPipeline) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn leaf_pipeline(&self) -> &LeafPipeline {
        &self.leaf
    }

    pub fn block_pipeline(&self) -> &BlockPipeline {
        &self.blocks
    }

    pub fn classify(&self, node: &DesignNode) -> Classification {
        self.leaf.classify_node(node)
    }

    /// Every leaf scorer's result, in pipeline order
    pub fn explain(&self, node: &DesignNode) -> Vec<Classification> {
        let cache = NodeCache::new();
        self.leaf.explain(&cache.facts(node))
    }

    pub fn decompose<'a>(&self, node: &'a DesignNode, schema: &SlotSchema) -> SemanticMappingResult<'a> {
        let cache = NodeCache::new();
        Decomposer::new(&self.leaf, &self.config, &cache).decompose(node, schema)
    }

    /// Classify `node`, then decompose it against the schema for that type.
    /// `None` when the type has no schema.
    pub fn map_semantics<'a>(&self, node: &'a DesignNode) -> Option<SemanticMappingResult<'a>> {
        let cache = NodeCache::new();
        let c = self.leaf.classify_cached(node, &cache);
        let schema = self.schemas.get(c.component_type)?;
        Some(Decomposer::new(&self.leaf, &self.config, &cache).decompose(node, schema))
    }

    pub fn analyze(&self, node: &DesignNode) -> SubtreeAnalysis {
        let cache = NodeCache::new();
        CompositionAnalyzer::new(&self.leaf, &self.config, &cache).analyze(node)
    }

    pub fn classify_block(&self, node: &DesignNode) -> BlockClassification {
        let cache = NodeCache::new();
        let analyzer = CompositionAnalyzer::new(&self.leaf, &self.config, &cache);
        self.blocks.classify(node, &analyzer, &cache, &self.config)
    }

    /// Every block scorer's verdict, in pipeline order
    pub fn explain_block(&self, node: &DesignNode) -> Vec<BlockScore> {
        let cache = NodeCache::new();
        let analyzer = CompositionAnalyzer::new(&self.leaf, &self.config, &cache);
        let ctx = BlockContext::build(node, &analyzer, &cache, &self.config);
        self.blocks.explain(&ctx)
    }

    /// Classify every visible node down to `max_depth`, decomposing the
    /// ones whose type has a schema.
    pub fn classify_tree<'a>(&self, root: &'a DesignNode) -> ClassifiedNode<'a> {
        let cache = NodeCache::new();
        let decomposer = Decomposer::new(&self.leaf, &self.config, &cache);
        self.annotate(root, 0, &cache, &decomposer)
    }

    fn annotate<'a>(
        &self,
        node: &'a DesignNode,
        depth: usize,
        cache: &NodeCache<'a>,
        decomposer: &Decomposer<'_, 'a>,
    ) -> ClassifiedNode<'a> {
        let classification = self.leaf.classify_cached(node, cache);
        let semantics = self
            .schemas
            .get(classification.component_type)
            .map(|schema| decomposer.decompose(node, schema));

        let has_children = node.visible_children().next().is_some();
        let truncated = has_children && depth >= self.config.max_depth;
        let children = if truncated {
            warn!(node = %node.name, max_depth = self.config.max_depth, "tree annotation hit the depth guard");
            Vec::new()
        } else {
            node.visible_children()
                .map(|child| self.annotate(child, depth + 1, cache, decomposer))
                .collect()
        };

        ClassifiedNode {
            node: NodeRef::from(node),
            classification,
            semantics,
            children,
            truncated,
        }
    }
}
