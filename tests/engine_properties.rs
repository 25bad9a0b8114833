//! Property-based invariant tests for the classification engine.
//!
//! 1. Every confidence produced anywhere lies in [0, 1]
//! 2. Classification is deterministic
//! 3. Decomposition and block classification never panic
//! 4. `size=icon` never yields a Button
//! 5. Deep chains stay within the depth guard

use design_classifier::leaf::special::{ButtonScorer, IconScorer};
use design_classifier::leaf::LeafScorer;
use design_classifier::{ComponentType, DesignNode, Engine, EngineConfig, LayoutMode, NodeFacts, NodeKind};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

const NAMES: &[&str] = &[
    "Button", "Card", "Header", "Title", "Description", "Content", "Footer", "Input", "Icon", "Avatar",
    "Dialog", "Tabs", "Tab", "Frame 12", "Group", "Login", "Hero", "Pricing", "Label", "Badge",
    "Slider", "Track", "Thumb", "Switch", "Table", "Row", "Size=icon", "Variant=outline, State=hover",
    "",
];

const TEXTS: &[&str] = &["Sign in", "$19/mo", "10k+", "Is it free?", "“Great”", "Welcome back", ""];

fn kind_strategy() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        Just(NodeKind::Frame),
        Just(NodeKind::Group),
        Just(NodeKind::Instance),
        Just(NodeKind::Rectangle),
        Just(NodeKind::Ellipse),
        Just(NodeKind::Vector),
        Just(NodeKind::Line),
    ]
}

fn dimension() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(-10.0),
        0.0f64..2000.0,
    ]
}

fn leaf_strategy() -> impl Strategy<Value = DesignNode> {
    prop_oneof![
        (
            prop::sample::select(NAMES),
            kind_strategy(),
            dimension(),
            dimension(),
            any::<(bool, bool, bool, bool)>(),
            0.0f64..40.0,
        )
            .prop_map(|(name, kind, w, h, (fill, stroke, shadow, image), radius)| {
                let mut node = DesignNode::new(name, kind).with_size(w, h).with_radius(radius);
                if fill {
                    node = node.with_fill();
                }
                if stroke {
                    node = node.with_stroke();
                }
                if shadow {
                    node = node.with_shadow();
                }
                if image {
                    node = node.with_image_fill();
                }
                node
            }),
        (prop::sample::select(NAMES), prop::sample::select(TEXTS), 8.0f64..72.0, 100.0f64..900.0)
            .prop_map(|(name, text, size, weight)| DesignNode::text(name, text).with_font(size, weight)),
    ]
}

fn tree_strategy() -> impl Strategy<Value = DesignNode> {
    leaf_strategy().prop_recursive(5, 64, 6, |inner| {
        (
            prop::sample::select(NAMES),
            prop::collection::vec(inner, 0..6),
            prop_oneof![Just(LayoutMode::None), Just(LayoutMode::Horizontal), Just(LayoutMode::Vertical)],
            any::<bool>(),
            -50.0f64..500.0,
        )
            .prop_map(|(name, children, mode, hidden, y)| {
                let children = children
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| c.at(i as f64 * 40.0, y * (i % 2) as f64))
                    .collect();
                let node = DesignNode::frame(name).with_layout(mode).with_children(children);
                if hidden {
                    node.hidden()
                } else {
                    node
                }
            })
    })
}

fn unit(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Clamp invariant
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_leaf_confidence_is_in_unit_range(node in tree_strategy()) {
        let engine = Engine::with_defaults().unwrap();
        prop_assert!(unit(engine.classify(&node).confidence));
        for c in engine.explain(&node) {
            prop_assert!(unit(c.confidence), "{} scored {}", c.component_type, c.confidence);
        }
    }

    #[test]
    fn every_block_and_composition_confidence_is_in_unit_range(node in tree_strategy()) {
        let engine = Engine::with_defaults().unwrap();
        let block = engine.classify_block(&node);
        prop_assert!(unit(block.confidence));
        for c in &block.composed_of {
            prop_assert!(unit(c.confidence));
        }
        for s in engine.explain_block(&node) {
            prop_assert!(unit(s.confidence));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classification_is_deterministic(node in tree_strategy()) {
        let engine = Engine::with_defaults().unwrap();
        prop_assert_eq!(engine.classify(&node), engine.classify(&node));
        prop_assert_eq!(engine.classify_block(&node), engine.classify_block(&node));
        let a = serde_json::to_string(&engine.classify_tree(&node)).unwrap();
        let b = serde_json::to_string(&engine.classify_tree(&node)).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Decomposition never panics
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn decomposition_handles_any_tree(node in tree_strategy()) {
        let engine = Engine::with_defaults().unwrap();
        for component in engine.schemas().components().collect::<Vec<_>>() {
            let schema = engine.schemas().get(component).unwrap();
            let result = engine.decompose(&node, schema);
            prop_assert!(unit(result.overall_confidence));
            for m in &result.mappings {
                prop_assert!(unit(m.confidence));
                prop_assert!(!m.matched_nodes.is_empty());
            }
            if node.visible_children().next().is_none() {
                prop_assert!(result.mappings.is_empty());
                prop_assert!(!result.warnings.is_empty());
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Icon-sized nodes are never buttons
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn icon_size_never_classifies_as_button(node in tree_strategy()) {
        let node = node.with_property("Size", "icon");
        let facts = NodeFacts::extract(&node);
        prop_assert_eq!(ButtonScorer.score(&facts).confidence, 0.0);

        let plain = NodeFacts::extract(&DesignNode { properties: Default::default(), ..node.clone() });
        let boosted = IconScorer.score(&facts);
        prop_assert!(boosted.confidence >= IconScorer.score(&plain).confidence);
        prop_assert!(boosted.reasons.iter().any(|r| r.contains("size=icon")));

        let engine = Engine::with_defaults().unwrap();
        prop_assert_ne!(engine.classify(&node).component_type, ComponentType::Button);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Depth guard
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn deep_chains_respect_max_depth(depth in 1usize..200, max_depth in 2usize..20) {
        let mut node = DesignNode::text("Leaf", "deep");
        for _ in 0..depth {
            node = DesignNode::frame("Group").with_children(vec![node]);
        }
        let config = EngineConfig { max_depth, ..EngineConfig::default() };
        let engine = Engine::new(config).unwrap();

        let tree = engine.classify_tree(&node);
        prop_assert!(tree.node_count() <= max_depth + 1);

        let block = engine.classify_block(&node);
        prop_assert!(unit(block.confidence));
        let analysis = engine.analyze(&node);
        prop_assert!(analysis.total() <= max_depth);
    }
}
