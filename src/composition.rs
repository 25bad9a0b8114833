//! Composition analysis
//!
//! Walks a subtree, classifies every visible descendant with the leaf
//! pipeline and counts the component types found, nested parts of atomic
//! controls included.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::config::EngineConfig;
use crate::layout::{complexity, detect_layout, Complexity, LayoutPattern};
use crate::leaf::LeafPipeline;
use crate::node::DesignNode;
use crate::signals::NodeCache;
use crate::types::ComponentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Direct child of the analyzed node
    Root,
    /// Grandchild
    Nested,
    Deep,
}

impl Location {
    pub fn at_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => Self::Root,
            2 => Self::Nested,
            _ => Self::Deep,
        }
    }

    fn decay(&self, config: &EngineConfig) -> f64 {
        match self {
            Self::Root => 1.0,
            Self::Nested => config.nested_decay,
            Self::Deep => config.deep_decay,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentComposition {
    pub component_type: ComponentType,
    pub count: usize,
    pub location: Location,
    /// Mean leaf confidence, decayed by location
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtreeAnalysis {
    pub composition: Vec<ComponentComposition>,
    pub layout: LayoutPattern,
    pub complexity: Complexity,
}

impl SubtreeAnalysis {
    /// Occurrences of `component` at any location
    pub fn count(&self, component: ComponentType) -> usize {
        self.composition
            .iter()
            .filter(|c| c.component_type == component)
            .map(|c| c.count)
            .sum()
    }

    pub fn count_any(&self, components: &[ComponentType]) -> usize {
        components.iter().map(|c| self.count(*c)).sum()
    }

    pub fn has(&self, component: ComponentType) -> bool {
        self.count(component) > 0
    }

    pub fn total(&self) -> usize {
        self.composition.iter().map(|c| c.count).sum()
    }
}

pub struct CompositionAnalyzer<'e, 'a> {
    leaf: &'e LeafPipeline,
    config: &'e EngineConfig,
    cache: &'e NodeCache<'a>,
}

impl<'e, 'a> CompositionAnalyzer<'e, 'a> {
    pub fn new(leaf: &'e LeafPipeline, config: &'e EngineConfig, cache: &'e NodeCache<'a>) -> Self {
        Self { leaf, config, cache }
    }

    pub fn analyze(&self, node: &'a DesignNode) -> SubtreeAnalysis {
        SubtreeAnalysis {
            composition: self.compose(node),
            layout: detect_layout(node, self.config),
            complexity: complexity(node, self.config),
        }
    }

    /// Sorted by count (descending), then type, then location.
    pub fn compose(&self, node: &'a DesignNode) -> Vec<ComponentComposition> {
        let mut tally: BTreeMap<(ComponentType, Location), (usize, f64)> = BTreeMap::new();
        self.walk(node, 1, &mut tally);

        let mut out: Vec<ComponentComposition> = tally
            .into_iter()
            .map(|((component_type, location), (count, sum))| ComponentComposition {
                component_type,
                count,
                location,
                confidence: sum / count as f64 * location.decay(self.config),
            })
            .collect();
        out.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(a.component_type.cmp(&b.component_type))
                .then(a.location.cmp(&b.location))
        });
        out
    }

    fn walk(
        &self,
        node: &'a DesignNode,
        depth: usize,
        tally: &mut BTreeMap<(ComponentType, Location), (usize, f64)>,
    ) {
        if depth > self.config.max_depth {
            warn!(node = %node.name, max_depth = self.config.max_depth, "composition traversal hit the depth guard");
            return;
        }
        for child in node.visible_children() {
            let c = self.leaf.classify_cached(child, self.cache);
            if c.component_type != ComponentType::Container {
                let entry = tally
                    .entry((c.component_type, Location::at_depth(depth)))
                    .or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += c.confidence;
            }
            self.walk(child, depth + 1, tally);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutKind;
    use crate::node::NodeKind;

    fn input() -> DesignNode {
        DesignNode::frame("Email Input")
            .with_size(280.0, 40.0)
            .with_stroke()
            .with_children(vec![DesignNode::text("Placeholder", "you@example.com")])
    }

    fn button() -> DesignNode {
        DesignNode::frame("Submit Button")
            .with_size(120.0, 40.0)
            .with_fill()
            .with_children(vec![DesignNode::text("Label", "Submit")])
    }

    fn analyze(node: &DesignNode, config: &EngineConfig) -> SubtreeAnalysis {
        let leaf = LeafPipeline::standard(config);
        let cache = NodeCache::new();
        CompositionAnalyzer::new(&leaf, config, &cache).analyze(node)
    }

    fn find(a: &SubtreeAnalysis, t: ComponentType) -> &ComponentComposition {
        a.composition.iter().find(|c| c.component_type == t).unwrap()
    }

    #[test]
    fn test_root_and_deep_locations() {
        let config = EngineConfig::default();
        let flat = DesignNode::frame("Section").with_children(vec![input(), button()]);
        let deep = DesignNode::frame("Section").with_children(vec![DesignNode::frame("Group")
            .with_children(vec![DesignNode::frame("Group").with_children(vec![input(), button()])])]);

        let a = analyze(&flat, &config);
        let b = analyze(&deep, &config);
        for t in [ComponentType::Input, ComponentType::Button] {
            assert_eq!(find(&a, t).location, Location::Root);
            assert_eq!(find(&b, t).location, Location::Deep);
            assert!(find(&b, t).confidence < find(&a, t).confidence);
        }
    }

    #[test]
    fn test_parts_of_atomic_controls_are_counted() {
        let config = EngineConfig::default();
        let icon = || DesignNode::new("Search Icon", NodeKind::Vector).with_size(16.0, 16.0);
        let search = DesignNode::frame("Search Input")
            .with_size(280.0, 40.0)
            .with_stroke()
            .with_children(vec![icon(), DesignNode::text("Placeholder", "Search")]);
        let node = DesignNode::frame("Section").with_children(vec![search, icon()]);

        let a = analyze(&node, &config);
        assert_eq!(a.count(ComponentType::Input), 1);
        assert_eq!(a.count(ComponentType::Icon), 2);
        let nested = a
            .composition
            .iter()
            .find(|c| c.component_type == ComponentType::Icon && c.location == Location::Nested)
            .unwrap();
        assert_eq!(nested.count, 1);
    }

    #[test]
    fn test_counts_repeated_types() {
        let config = EngineConfig::default();
        let node = DesignNode::frame("Section").with_children(vec![button(), button(), input()]);
        let a = analyze(&node, &config);
        let root: Vec<_> = a.composition.iter().filter(|c| c.location == Location::Root).collect();
        assert_eq!(root[0].component_type, ComponentType::Button);
        assert_eq!(root[0].count, 2);
        assert_eq!(root.iter().map(|c| c.count).sum::<usize>(), 3);
        assert_eq!(a.count_any(&[ComponentType::Button, ComponentType::Input]), 3);
    }

    #[test]
    fn test_empty_subtree() {
        let a = analyze(&DesignNode::frame("Empty"), &EngineConfig::default());
        assert!(a.composition.is_empty());
        assert_eq!(a.layout.kind, LayoutKind::None);
        assert_eq!(a.complexity, Complexity::Simple);
    }

    #[test]
    fn test_depth_guard_bounds_traversal() {
        let mut node = input();
        for _ in 0..20 {
            node = DesignNode::frame("Group").with_children(vec![node]);
        }
        let config = EngineConfig {
            max_depth: 5,
            ..EngineConfig::default()
        };
        let a = analyze(&node, &config);
        assert!(!a.has(ComponentType::Input));
        let unbounded = EngineConfig {
            max_depth: 30,
            ..EngineConfig::default()
        };
        assert!(analyze(&node, &unbounded).has(ComponentType::Input));
    }
}
