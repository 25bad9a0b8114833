//! Block-level classification
//!
//! A block is a page section: a hero, a pricing table, a login form. The
//! subtree is surveyed once into a [`BlockContext`], then an ordered list of
//! [`BlockScorer`]s is walked with the same early-exit rule as the leaf
//! pipeline. Authentication and Form run before CTA, since a short login
//! form also looks like "text plus a button".

pub mod context;
pub mod scorers;

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::composition::{ComponentComposition, CompositionAnalyzer};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::layout::LayoutPattern;
use crate::node::DesignNode;
use crate::signals::NodeCache;

pub use context::{BlockCharacteristics, BlockContext};
use scorers::*;

/// Bumped whenever [`STANDARD_BLOCK_ORDER`] changes
pub const BLOCK_ORDER_VERSION: u32 = 2;

pub const SECTION_SUB_TYPE: &str = "generic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockCategory {
    Authentication,
    Form,
    Navigation,
    Footer,
    Pricing,
    Faq,
    Testimonials,
    Dashboard,
    Stats,
    Features,
    Hero,
    Cta,
    /// Fallback when no scorer clears the threshold
    Section,
}

impl BlockCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Form => "form",
            Self::Navigation => "navigation",
            Self::Footer => "footer",
            Self::Pricing => "pricing",
            Self::Faq => "faq",
            Self::Testimonials => "testimonials",
            Self::Dashboard => "dashboard",
            Self::Stats => "stats",
            Self::Features => "features",
            Self::Hero => "hero",
            Self::Cta => "cta",
            Self::Section => "section",
        }
    }
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scorer's verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockScore {
    pub category: BlockCategory,
    pub sub_type: &'static str,
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl BlockScore {
    fn fallback(confidence: f64) -> Self {
        Self {
            category: BlockCategory::Section,
            sub_type: SECTION_SUB_TYPE,
            confidence,
            reasons: vec!["no block scorer cleared the threshold".to_string()],
        }
    }
}

pub trait BlockScorer: Send + Sync {
    fn category(&self) -> BlockCategory;

    fn score(&self, ctx: &BlockContext) -> BlockScore;
}

use BlockCategory as B;

pub const STANDARD_BLOCK_ORDER: &[BlockCategory] = &[
    B::Authentication,
    B::Form,
    B::Navigation,
    B::Footer,
    B::Pricing,
    B::Faq,
    B::Testimonials,
    B::Dashboard,
    B::Stats,
    B::Features,
    B::Hero,
    B::Cta,
];

/// `(narrow, broad)`: the narrow category must be tried first
pub const BLOCK_ORDERING_CONSTRAINTS: &[(BlockCategory, BlockCategory)] = &[
    (B::Authentication, B::Form),
    (B::Authentication, B::Cta),
    (B::Form, B::Cta),
    (B::Pricing, B::Features),
    (B::Pricing, B::Cta),
    (B::Faq, B::Features),
    (B::Testimonials, B::Features),
    (B::Dashboard, B::Stats),
    (B::Stats, B::Features),
    (B::Hero, B::Cta),
];

pub fn block_scorer_for(category: BlockCategory) -> Option<Box<dyn BlockScorer>> {
    let scorer: Box<dyn BlockScorer> = match category {
        B::Authentication => Box::new(AuthenticationScorer),
        B::Form => Box::new(FormScorer),
        B::Navigation => Box::new(NavigationScorer),
        B::Footer => Box::new(FooterScorer),
        B::Pricing => Box::new(PricingScorer),
        B::Faq => Box::new(FaqScorer),
        B::Testimonials => Box::new(TestimonialsScorer),
        B::Dashboard => Box::new(DashboardScorer),
        B::Stats => Box::new(StatsScorer),
        B::Features => Box::new(FeaturesScorer),
        B::Hero => Box::new(HeroScorer),
        B::Cta => Box::new(CtaScorer),
        B::Section => return None,
    };
    Some(scorer)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockClassification {
    pub category: BlockCategory,
    pub sub_type: String,
    pub confidence: f64,
    pub composed_of: Vec<ComponentComposition>,
    pub layout_pattern: LayoutPattern,
    pub characteristics: BlockCharacteristics,
    pub reasons: Vec<String>,
}

pub struct BlockPipeline {
    scorers: Vec<Box<dyn BlockScorer>>,
    accept_threshold: f64,
    fallback_confidence: f64,
}

impl BlockPipeline {
    pub fn standard(config: &EngineConfig) -> Self {
        Self {
            scorers: STANDARD_BLOCK_ORDER.iter().filter_map(|c| block_scorer_for(*c)).collect(),
            accept_threshold: config.block_accept_threshold,
            fallback_confidence: config.block_fallback_confidence,
        }
    }

    pub fn with_order(order: &[BlockCategory], config: &EngineConfig) -> Result<Self> {
        let scorers = order
            .iter()
            .map(|c| block_scorer_for(*c).ok_or_else(|| EngineError::config("block_order", format!("{c} has no scorer"))))
            .collect::<Result<Vec<_>>>()?;
        Self::from_scorers(scorers, config)
    }

    pub fn from_scorers(scorers: Vec<Box<dyn BlockScorer>>, config: &EngineConfig) -> Result<Self> {
        for (i, s) in scorers.iter().enumerate() {
            if scorers[..i].iter().any(|p| p.category() == s.category()) {
                return Err(EngineError::DuplicateScorer(s.category().to_string()));
            }
        }
        Ok(Self {
            scorers,
            accept_threshold: config.block_accept_threshold,
            fallback_confidence: config.block_fallback_confidence,
        })
    }

    pub fn order(&self) -> Vec<BlockCategory> {
        self.scorers.iter().map(|s| s.category()).collect()
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }

    /// First scorer at or above threshold wins; otherwise a generic section.
    pub fn score(&self, ctx: &BlockContext) -> BlockScore {
        for scorer in &self.scorers {
            let s = scorer.score(ctx);
            trace!(category = %s.category, confidence = s.confidence, "block scorer");
            if s.confidence >= self.accept_threshold {
                debug!(node = %ctx.facts.name, category = %s.category, sub_type = s.sub_type, confidence = s.confidence, "block classification");
                return s;
            }
        }
        debug!(node = %ctx.facts.name, "no block scorer cleared threshold");
        BlockScore::fallback(self.fallback_confidence)
    }

    /// Every scorer's verdict in pipeline order
    pub fn explain(&self, ctx: &BlockContext) -> Vec<BlockScore> {
        self.scorers.iter().map(|s| s.score(ctx)).collect()
    }

    pub fn classify<'a>(
        &self,
        node: &'a DesignNode,
        analyzer: &CompositionAnalyzer<'_, 'a>,
        cache: &NodeCache<'a>,
        config: &EngineConfig,
    ) -> BlockClassification {
        let ctx = BlockContext::build(node, analyzer, cache, config);
        let verdict = self.score(&ctx);
        BlockClassification {
            category: verdict.category,
            sub_type: verdict.sub_type.to_string(),
            confidence: verdict.confidence,
            composed_of: ctx.analysis.composition,
            layout_pattern: ctx.analysis.layout,
            characteristics: ctx.characteristics,
            reasons: verdict.reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::LeafPipeline;
    use crate::node::LayoutMode;

    fn classify_with(pipeline: &BlockPipeline, node: &DesignNode) -> BlockClassification {
        let config = EngineConfig::default();
        let leaf = LeafPipeline::standard(&config);
        let cache = NodeCache::new();
        let analyzer = CompositionAnalyzer::new(&leaf, &config, &cache);
        pipeline.classify(node, &analyzer, &cache, &config)
    }

    fn classify(node: &DesignNode) -> BlockClassification {
        classify_with(&BlockPipeline::standard(&EngineConfig::default()), node)
    }

    fn input(name: &str, placeholder: &str) -> DesignNode {
        DesignNode::frame(name)
            .with_size(280.0, 40.0)
            .with_stroke()
            .with_children(vec![DesignNode::text("Placeholder", placeholder)])
    }

    fn button(label: &str) -> DesignNode {
        DesignNode::frame("Button")
            .with_size(120.0, 40.0)
            .with_fill()
            .with_children(vec![DesignNode::text("Label", label)])
    }

    fn heading(text: &str, size: f64) -> DesignNode {
        DesignNode::text("Title", text).with_font(size, 700.0)
    }

    fn login() -> DesignNode {
        DesignNode::frame("Login")
            .with_layout(LayoutMode::Vertical)
            .with_children(vec![
                heading("Welcome back", 28.0),
                input("Email Input", "you@example.com"),
                input("Password Input", "Password"),
                button("Sign in"),
            ])
    }

    #[test]
    fn test_every_category_has_a_scorer() {
        for c in STANDARD_BLOCK_ORDER {
            assert!(block_scorer_for(*c).is_some(), "{c} has no scorer");
        }
        assert!(block_scorer_for(BlockCategory::Section).is_none());
        assert_eq!(BlockPipeline::standard(&EngineConfig::default()).len(), STANDARD_BLOCK_ORDER.len());
    }

    #[test]
    fn test_ordering_constraints_hold() {
        let position = |c: &BlockCategory| STANDARD_BLOCK_ORDER.iter().position(|x| x == c).unwrap();
        for (narrow, broad) in BLOCK_ORDERING_CONSTRAINTS {
            assert!(position(narrow) < position(broad), "{narrow} must run before {broad}");
        }
        assert_eq!(STANDARD_BLOCK_ORDER.last(), Some(&BlockCategory::Cta));
    }

    #[test]
    fn test_login_form_is_authentication() {
        let result = classify(&login());
        assert_eq!(result.category, BlockCategory::Authentication);
        assert_eq!(result.sub_type, "login");
        assert!(result.confidence >= 0.8);
        assert_eq!(result.characteristics.input_count, 2);
        assert_eq!(result.characteristics.button_count, 1);
    }

    #[test]
    fn test_cta_first_misclassifies_login() {
        let config = EngineConfig::default();
        let misordered = BlockPipeline::with_order(&[BlockCategory::Cta, BlockCategory::Authentication], &config).unwrap();
        assert_eq!(classify_with(&misordered, &login()).category, BlockCategory::Cta);
    }

    #[test]
    fn test_signup_sub_type() {
        let node = DesignNode::frame("Register").with_children(vec![
            heading("Create account", 28.0),
            input("Email Input", "you@example.com"),
            input("Password Input", "Password"),
            button("Sign up"),
        ]);
        let result = classify(&node);
        assert_eq!(result.category, BlockCategory::Authentication);
        assert_eq!(result.sub_type, "signup");
    }

    #[test]
    fn test_contact_form_without_auth_cue() {
        let node = DesignNode::frame("Contact").with_children(vec![
            input("Name Input", "Jane Doe"),
            input("Email Input", "you@example.com"),
            button("Send"),
        ]);
        let result = classify(&node);
        assert_eq!(result.category, BlockCategory::Form);
        assert_eq!(result.sub_type, "contact");
    }

    #[test]
    fn test_pricing_tiers() {
        let plan = |name: &str, price: &str| {
            DesignNode::frame(name).with_children(vec![
                DesignNode::text("Plan", name),
                DesignNode::text("Price", price),
                button("Choose"),
            ])
        };
        let node = DesignNode::frame("Plans").with_children(vec![
            plan("Starter", "$9/mo"),
            plan("Pro", "$29/mo"),
            plan("Team", "$99/mo"),
        ]);
        let result = classify(&node);
        assert_eq!(result.category, BlockCategory::Pricing);
        assert_eq!(result.sub_type, "tiers");
        assert_eq!(result.characteristics.price_count, 3);
    }

    #[test]
    fn test_hero() {
        let node = DesignNode::frame("Hero").with_children(vec![
            heading("Ship faster", 56.0),
            DesignNode::text("Body", "The toolkit for product teams").with_size(480.0, 24.0),
            button("Get started"),
            DesignNode::frame("Secondary Button")
                .with_size(140.0, 40.0)
                .with_stroke()
                .with_children(vec![DesignNode::text("Label", "Learn more")]),
            DesignNode::new("Hero Image", crate::node::NodeKind::Rectangle)
                .with_size(640.0, 400.0)
                .with_image_fill(),
        ]);
        let result = classify(&node);
        assert_eq!(result.category, BlockCategory::Hero);
        assert_eq!(result.sub_type, "with-image");
        assert_eq!(result.characteristics.max_font_size, Some(56.0));
    }

    #[test]
    fn test_stats_row() {
        let node = DesignNode::frame("Stats").with_children(vec![
            DesignNode::text("Users", "10k+"),
            DesignNode::text("Uptime", "99.9%"),
            DesignNode::text("Teams", "120+"),
        ]);
        let result = classify(&node);
        assert_eq!(result.category, BlockCategory::Stats);
        assert_eq!(result.characteristics.stat_count, 3);
    }

    #[test]
    fn test_faq_questions() {
        let node = DesignNode::frame("FAQ")
            .with_layout(LayoutMode::Vertical)
            .with_children(vec![
                DesignNode::text("Q1", "Is there a free trial?"),
                DesignNode::text("Q2", "Can I cancel anytime?"),
            ]);
        let result = classify(&node);
        assert_eq!(result.category, BlockCategory::Faq);
        assert_eq!(result.sub_type, "list");
    }

    #[test]
    fn test_fallback_is_generic_section() {
        let node = DesignNode::frame("Frame 12")
            .with_children(vec![DesignNode::new("Rectangle 4", crate::node::NodeKind::Rectangle).with_size(10.0, 10.0)]);
        let result = classify(&node);
        assert_eq!(result.category, BlockCategory::Section);
        assert_eq!(result.sub_type, SECTION_SUB_TYPE);
        assert!((result.confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let strict = EngineConfig {
            block_accept_threshold: 0.99,
            ..EngineConfig::default()
        };
        let result = classify_with(&BlockPipeline::standard(&strict), &login());
        assert_eq!(result.category, BlockCategory::Section);
    }

    #[test]
    fn test_order_validation() {
        let config = EngineConfig::default();
        assert!(BlockPipeline::with_order(&[BlockCategory::Section], &config).is_err());
        assert!(matches!(
            BlockPipeline::with_order(&[BlockCategory::Hero, BlockCategory::Hero], &config),
            Err(EngineError::DuplicateScorer(_))
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(classify(&login())).unwrap();
        assert_eq!(json["category"], "authentication");
        assert_eq!(json["layout_pattern"]["type"], "column");
        assert!(json["composed_of"].is_array());
        assert!(json["reasons"].as_array().unwrap().len() >= 2);
    }
}
