//! Leaf classifier pipeline
//!
//! An ordered list of independent scorers, one per component type. The
//! pipeline walks the list and returns the first result at or above the
//! acceptance threshold; it never takes a global maximum. Narrow types sit
//! ahead of the broad types they overlap with, and that order is data:
//! [`STANDARD_ORDER`], checked against [`ORDERING_CONSTRAINTS`].

pub mod cues;
pub mod profiles;
pub mod special;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::node::DesignNode;
use crate::signals::{NodeCache, NodeFacts};
use crate::types::{Classification, ComponentType};

use profiles::ProfileScorer;
use special::{ButtonScorer, IconScorer};

/// Bumped whenever [`STANDARD_ORDER`] changes
pub const LEAF_ORDER_VERSION: u32 = 3;

/// One scorer for exactly one component type
pub trait LeafScorer: Send + Sync {
    fn component(&self) -> ComponentType;

    /// Independent of every other scorer; confidence already clamped.
    fn score(&self, facts: &NodeFacts) -> Classification;
}

use ComponentType as T;

pub const STANDARD_ORDER: &[ComponentType] = &[
    T::AlertDialog,
    T::Sheet,
    T::Drawer,
    T::Dialog,
    T::Alert,
    T::Toast,
    T::HoverCard,
    T::Tooltip,
    T::Popover,
    T::Skeleton,
    T::EmptyState,
    T::InputOtp,
    T::Combobox,
    T::DatePicker,
    T::Calendar,
    T::Select,
    T::Textarea,
    T::Input,
    T::Slider,
    T::Switch,
    T::ToggleGroup,
    T::Toggle,
    T::RadioGroup,
    T::Checkbox,
    T::Progress,
    T::Chart,
    T::Table,
    T::Carousel,
    T::Pagination,
    T::Breadcrumb,
    T::Command,
    T::Sidebar,
    T::NavigationMenu,
    T::Menubar,
    T::ContextMenu,
    T::DropdownMenu,
    T::Tabs,
    T::Accordion,
    T::Collapsible,
    T::ScrollArea,
    T::Resizable,
    T::Card,
    T::Form,
    T::AspectRatio,
    T::Avatar,
    T::Badge,
    T::Button,
    T::Icon,
    T::Image,
    T::Separator,
    T::Label,
    T::Link,
    T::Heading,
    T::Text,
];

/// `(narrow, broad)`: the narrow scorer must run first
pub const ORDERING_CONSTRAINTS: &[(ComponentType, ComponentType)] = &[
    (T::AlertDialog, T::Alert),
    (T::AlertDialog, T::Dialog),
    (T::Sheet, T::Dialog),
    (T::Drawer, T::Dialog),
    (T::HoverCard, T::Card),
    (T::InputOtp, T::Input),
    (T::Combobox, T::Select),
    (T::Combobox, T::Input),
    (T::DatePicker, T::Input),
    (T::Textarea, T::Input),
    (T::ToggleGroup, T::Toggle),
    (T::Command, T::DropdownMenu),
    (T::Sidebar, T::NavigationMenu),
    (T::NavigationMenu, T::DropdownMenu),
    (T::Menubar, T::DropdownMenu),
    (T::ContextMenu, T::DropdownMenu),
    (T::Button, T::Icon),
    (T::Avatar, T::Image),
    (T::Label, T::Text),
    (T::Heading, T::Text),
];

/// Built-in scorer for `component`; `None` for the container fallback.
pub fn scorer_for(component: ComponentType) -> Option<Box<dyn LeafScorer>> {
    match component {
        T::Button => Some(Box::new(ButtonScorer)),
        T::Icon => Some(Box::new(IconScorer)),
        T::Container => None,
        other => ProfileScorer::for_type(other).map(|s| Box::new(s) as Box<dyn LeafScorer>),
    }
}

pub struct LeafPipeline {
    scorers: Vec<Box<dyn LeafScorer>>,
    accept_threshold: f64,
    fallback_confidence: f64,
}

impl LeafPipeline {
    /// The tuned, versioned pipeline
    pub fn standard(config: &EngineConfig) -> Self {
        Self {
            scorers: STANDARD_ORDER.iter().filter_map(|t| scorer_for(*t)).collect(),
            accept_threshold: config.accept_threshold,
            fallback_confidence: config.fallback_confidence,
        }
    }

    /// Built-in scorers in a caller-chosen order
    pub fn with_order(order: &[ComponentType], config: &EngineConfig) -> Result<Self> {
        let scorers = order
            .iter()
            .map(|t| scorer_for(*t).ok_or_else(|| EngineError::config("leaf_order", format!("{t} has no scorer"))))
            .collect::<Result<Vec<_>>>()?;
        Self::from_scorers(scorers, config)
    }

    pub fn from_scorers(scorers: Vec<Box<dyn LeafScorer>>, config: &EngineConfig) -> Result<Self> {
        for (i, s) in scorers.iter().enumerate() {
            if scorers[..i].iter().any(|p| p.component() == s.component()) {
                return Err(EngineError::DuplicateScorer(s.component().to_string()));
            }
        }
        Ok(Self {
            scorers,
            accept_threshold: config.accept_threshold,
            fallback_confidence: config.fallback_confidence,
        })
    }

    pub fn order(&self) -> Vec<ComponentType> {
        self.scorers.iter().map(|s| s.component()).collect()
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }

    /// First scorer at or above threshold wins; otherwise the container fallback.
    pub fn classify(&self, facts: &NodeFacts) -> Classification {
        for scorer in &self.scorers {
            let c = scorer.score(facts);
            trace!(component = %c.component_type, confidence = c.confidence, "leaf scorer");
            if c.exceeds_threshold(self.accept_threshold) {
                debug!(node = %facts.name, component = %c.component_type, confidence = c.confidence, "leaf classification");
                return c;
            }
        }
        debug!(node = %facts.name, "no leaf scorer cleared threshold");
        Classification::fallback(self.fallback_confidence)
    }

    /// Every scorer's result in pipeline order
    pub fn explain(&self, facts: &NodeFacts) -> Vec<Classification> {
        self.scorers.iter().map(|s| s.score(facts)).collect()
    }

    pub fn classify_node(&self, node: &DesignNode) -> Classification {
        self.classify(&NodeFacts::extract(node))
    }

    pub(crate) fn classify_cached<'a>(&self, node: &'a DesignNode, cache: &NodeCache<'a>) -> Classification {
        cache.classification(node, |facts| self.classify(facts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{LayoutMode, NodeKind};

    fn pipeline() -> LeafPipeline {
        LeafPipeline::standard(&EngineConfig::default())
    }

    fn classify(node: &DesignNode) -> Classification {
        pipeline().classify_node(node)
    }

    #[test]
    fn test_every_type_has_a_scorer() {
        assert_eq!(pipeline().len(), STANDARD_ORDER.len());
        for t in STANDARD_ORDER {
            assert!(scorer_for(*t).is_some(), "{t} missing");
        }
    }

    #[test]
    fn test_ordering_constraints_hold() {
        let order = pipeline().order();
        for (narrow, broad) in ORDERING_CONSTRAINTS {
            let n = order.iter().position(|t| t == narrow).unwrap();
            let b = order.iter().position(|t| t == broad).unwrap();
            assert!(n < b, "{narrow} must precede {broad}");
        }
    }

    #[test]
    fn test_alert_dialog_beats_alert_and_dialog() {
        let node = DesignNode::frame("Alert Dialog").with_shadow().with_children(vec![
            DesignNode::frame("Header"),
            DesignNode::frame("Footer"),
        ]);
        assert_eq!(classify(&node).component_type, T::AlertDialog);
    }

    #[test]
    fn test_reordering_lets_broad_type_win() {
        let node = DesignNode::frame("Alert Dialog");
        let reordered =
            LeafPipeline::with_order(&[T::Alert, T::AlertDialog], &EngineConfig::default()).unwrap();
        assert_eq!(reordered.classify_node(&node).component_type, T::Alert);
    }

    #[test]
    fn test_first_match_not_maximum() {
        // Dialog clears threshold at 0.5 even though Card would score higher later
        let node = DesignNode::frame("Dialog Card")
            .with_shadow()
            .with_radius(8.0)
            .with_stroke()
            .with_fill();
        let c = classify(&node);
        assert_eq!(c.component_type, T::Dialog);
    }

    #[test]
    fn test_fallback_is_fixed_container() {
        let c = classify(&DesignNode::frame("Frame 12"));
        assert_eq!(c.component_type, T::Container);
        assert!((c.confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_icon_sized_button_classifies_as_icon() {
        let node = DesignNode::frame("Button")
            .with_property("Size", "icon")
            .with_size(36.0, 36.0)
            .with_fill()
            .with_children(vec![DesignNode::new("Vector", NodeKind::Vector).with_size(16.0, 16.0)]);
        assert_eq!(classify(&node).component_type, T::Icon);
    }

    #[test]
    fn test_common_leaves() {
        let input = DesignNode::frame("Email Input")
            .with_size(280.0, 40.0)
            .with_stroke()
            .with_children(vec![DesignNode::text("Placeholder", "you@example.com")]);
        assert_eq!(classify(&input).component_type, T::Input);

        let button = DesignNode::frame("Submit Button")
            .with_size(120.0, 40.0)
            .with_fill()
            .with_layout(LayoutMode::Horizontal)
            .with_children(vec![DesignNode::text("Label", "Submit")]);
        assert_eq!(classify(&button).component_type, T::Button);

        let switch = DesignNode::frame("Toggle Switch")
            .with_size(44.0, 24.0)
            .with_radius(12.0)
            .with_children(vec![DesignNode::new("Thumb", NodeKind::Ellipse).with_size(20.0, 20.0)]);
        assert_eq!(classify(&switch).component_type, T::Switch);

        let heading = DesignNode::text("Hero copy", "Build faster").with_font(48.0, 700.0);
        assert_eq!(classify(&heading).component_type, T::Heading);

        let body = DesignNode::text("Paragraph", "Some longer supporting copy.");
        assert_eq!(classify(&body).component_type, T::Text);
    }

    #[test]
    fn test_slider_needs_track_and_thumb() {
        let node = DesignNode::frame("Volume").with_size(200.0, 20.0).with_children(vec![
            DesignNode::frame("Track"),
            DesignNode::frame("Thumb"),
        ]);
        assert_eq!(classify(&node).component_type, T::Slider);
    }

    #[test]
    fn test_container_cannot_be_ordered() {
        let err = LeafPipeline::with_order(&[T::Container], &EngineConfig::default());
        assert!(matches!(err, Err(EngineError::InvalidConfig { field: "leaf_order", .. })));
    }

    #[test]
    fn test_duplicate_scorers_rejected() {
        let err = LeafPipeline::with_order(&[T::Card, T::Card], &EngineConfig::default());
        assert!(matches!(err, Err(EngineError::DuplicateScorer(_))));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let strict = EngineConfig {
            accept_threshold: 0.95,
            ..EngineConfig::default()
        };
        let node = DesignNode::frame("Modal");
        assert_eq!(LeafPipeline::standard(&strict).classify_node(&node).component_type, T::Container);
        assert_eq!(classify(&node).component_type, T::Dialog);
    }

    #[test]
    fn test_explain_covers_every_scorer() {
        let p = pipeline();
        let all = p.explain(&NodeFacts::extract(&DesignNode::frame("Card")));
        assert_eq!(all.len(), p.len());
        assert!(all.iter().all(|c| (0.0..=1.0).contains(&c.confidence)));
    }
}
