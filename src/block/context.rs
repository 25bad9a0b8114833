//! Everything a block scorer may look at, gathered once per subtree

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::composition::{CompositionAnalyzer, SubtreeAnalysis};
use crate::config::EngineConfig;
use crate::layout::{Complexity, LayoutKind};
use crate::node::{DesignNode, NodeKind};
use crate::signals::{NodeCache, NodeFacts};
use crate::similarity::{contains_phrase, match_keywords, tokenize, KeywordMatch};
use crate::types::ComponentType;

static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[$€£¥]\s?\d|\d\s?(€|(usd|eur|gbp)\b)|/\s?(mo|month|yr|year|user|seat)\b|\bper (month|year|user|seat)\b")
        .expect("Invalid regex pattern")
});
static STAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[$€£]?\d[\d,.]*\s?(%|\+|[kmb]\+?|x)?$").expect("Invalid regex pattern"));

const QUOTE_MARKS: &[char] = &['"', '“', '”', '\'', '‘', '«'];

const INPUT_TYPES: &[ComponentType] = &[
    ComponentType::Input,
    ComponentType::InputOtp,
    ComponentType::Textarea,
    ComponentType::Select,
    ComponentType::Combobox,
    ComponentType::DatePicker,
    ComponentType::Checkbox,
    ComponentType::Switch,
    ComponentType::RadioGroup,
];
const IMAGE_TYPES: &[ComponentType] = &[ComponentType::Image, ComponentType::Avatar, ComponentType::AspectRatio];

/// Counts reported with every block classification
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockCharacteristics {
    pub text_count: usize,
    pub heading_count: usize,
    pub image_count: usize,
    pub icon_count: usize,
    pub button_count: usize,
    pub input_count: usize,
    pub link_count: usize,
    pub card_count: usize,
    pub interactive_count: usize,
    /// Text layers that read as a price (`$19/mo`)
    pub price_count: usize,
    /// Short numeric figures (`10k+`, `99.9%`)
    pub stat_count: usize,
    pub question_count: usize,
    pub quote_count: usize,
    pub max_font_size: Option<f64>,
    pub complexity: Option<Complexity>,
}

pub struct BlockContext {
    pub facts: Rc<NodeFacts>,
    pub analysis: SubtreeAnalysis,
    pub characteristics: BlockCharacteristics,
    /// Name and text tokens of the node and its visible descendants, in document order
    pub vocabulary: Vec<String>,
}

impl BlockContext {
    pub fn build<'a>(
        node: &'a DesignNode,
        analyzer: &CompositionAnalyzer<'_, 'a>,
        cache: &NodeCache<'a>,
        config: &EngineConfig,
    ) -> Self {
        let analysis = analyzer.analyze(node);
        let mut characteristics = BlockCharacteristics::default();
        let mut vocabulary = tokenize(&node.name);
        survey(node, 1, config.max_depth, &mut characteristics, &mut vocabulary);

        let a = &analysis;
        characteristics.heading_count = a.count(ComponentType::Heading);
        characteristics.image_count = a.count_any(IMAGE_TYPES);
        characteristics.icon_count = a.count(ComponentType::Icon);
        characteristics.button_count = a.count(ComponentType::Button);
        characteristics.input_count = a.count_any(INPUT_TYPES);
        characteristics.link_count = a.count(ComponentType::Link);
        characteristics.card_count = a.count(ComponentType::Card);
        characteristics.interactive_count = a
            .composition
            .iter()
            .filter(|c| c.component_type.is_interactive())
            .map(|c| c.count)
            .sum();
        characteristics.complexity = Some(a.complexity);

        Self {
            facts: cache.facts(node),
            analysis,
            characteristics,
            vocabulary,
        }
    }

    /// The block's own layer name matches one of `keywords`
    pub fn named(&self, keywords: &[&str]) -> bool {
        matches!(match_keywords(&self.facts.tokens, keywords), Some(KeywordMatch::Exact(_)))
    }

    /// Some name or text inside the block contains one of `phrases`
    pub fn mentions(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| contains_phrase(&self.vocabulary, p))
    }

    pub fn count(&self, component: ComponentType) -> usize {
        self.analysis.count(component)
    }

    pub fn has(&self, component: ComponentType) -> bool {
        self.analysis.has(component)
    }

    pub fn layout_kind(&self) -> LayoutKind {
        self.analysis.layout.kind
    }

    pub fn complexity(&self) -> Complexity {
        self.analysis.complexity
    }

    /// Columns of a row or grid; 1 for a column, 0 for no layout
    pub fn columns(&self) -> usize {
        self.analysis.layout.columns
    }
}

fn survey(
    node: &DesignNode,
    depth: usize,
    max_depth: usize,
    out: &mut BlockCharacteristics,
    vocabulary: &mut Vec<String>,
) {
    if depth > max_depth {
        return;
    }
    for child in node.visible_children() {
        vocabulary.extend(tokenize(&child.name));
        if child.kind == NodeKind::Text {
            if let Some(text) = child.text_content() {
                record_text(child, text, out);
                vocabulary.extend(tokenize(text));
            }
        }
        survey(child, depth + 1, max_depth, out, vocabulary);
    }
}

fn record_text(node: &DesignNode, text: &str, out: &mut BlockCharacteristics) {
    let text = text.trim();
    out.text_count += 1;
    if PRICE.is_match(text) {
        out.price_count += 1;
    } else if STAT.is_match(text) {
        out.stat_count += 1;
    }
    if text.ends_with('?') {
        out.question_count += 1;
    }
    if text.starts_with(QUOTE_MARKS) {
        out.quote_count += 1;
    }
    if let Some(size) = node.text.as_ref().and_then(|t| t.font_size).filter(|s| s.is_finite()) {
        out.max_font_size = Some(out.max_font_size.map_or(size, |m: f64| m.max(size)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::LeafPipeline;

    fn context(node: &DesignNode) -> BlockContext {
        let config = EngineConfig::default();
        let leaf = LeafPipeline::standard(&config);
        let cache = NodeCache::new();
        let analyzer = CompositionAnalyzer::new(&leaf, &config, &cache);
        BlockContext::build(node, &analyzer, &cache, &config)
    }

    #[test]
    fn test_text_patterns() {
        let node = DesignNode::frame("Block").with_children(vec![
            DesignNode::text("a", "$19/mo"),
            DesignNode::text("b", "10k+"),
            DesignNode::text("c", "99.9%"),
            DesignNode::text("d", "Is there a free trial?"),
            DesignNode::text("e", "“Best tool we bought this year.”").with_font(18.0, 400.0),
            DesignNode::text("f", "Plain copy").with_font(32.0, 700.0),
        ]);
        let ctx = context(&node);
        let c = &ctx.characteristics;
        assert_eq!(c.text_count, 6);
        assert_eq!(c.price_count, 1);
        assert_eq!(c.stat_count, 2);
        assert_eq!(c.question_count, 1);
        assert_eq!(c.quote_count, 1);
        assert_eq!(c.max_font_size, Some(32.0));
    }

    #[test]
    fn test_vocabulary_covers_names_and_text() {
        let node = DesignNode::frame("Login Card").with_children(vec![DesignNode::frame("Actions")
            .with_children(vec![DesignNode::text("Label", "Forgot password?")])]);
        let ctx = context(&node);
        assert!(ctx.named(&["login"]));
        assert!(!ctx.named(&["actions"]));
        assert!(ctx.mentions(&["forgot password"]));
        assert!(ctx.mentions(&["actions"]));
    }
}
