//! Signal extractors
//!
//! Pure functions that turn a raw [`DesignNode`] into normalized facts. Every
//! classifier reads [`NodeFacts`]; none of them touch raw attributes. Absent
//! attributes degrade to `false`, `0` or `None`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::LazyLock;

use ahash::{AHashMap, AHashSet};
use regex::Regex;

use crate::node::{DesignNode, EffectKind, LayoutMode, NodeKind, PaintKind};
use crate::similarity::{contains_phrase, normalize_name, tokenize};
use crate::types::Classification;

/// How far below a node descendant names are collected
pub const SCAN_DEPTH: usize = 3;
/// Largest side of a vector that still reads as an icon
const ICON_MAX_PX: f64 = 48.0;

static METADATA_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z0-9 _-]*?)\s*=\s*([^,/;=]+)").expect("Invalid regex pattern")
});

/// Structured metadata recovered from variant properties and `key=value` names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantInfo {
    pub variant: Option<String>,
    pub state: Option<String>,
    pub size: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl VariantInfo {
    /// Merge name-embedded pairs with declared properties; declared ones win.
    pub fn extract(node: &DesignNode) -> Self {
        let mut info = Self::default();
        for cap in METADATA_PAIR.captures_iter(&node.name) {
            if let (Some(k), Some(v)) = (cap.get(1), cap.get(2)) {
                info.assign(k.as_str(), v.as_str());
            }
        }
        for (k, v) in &node.properties {
            info.assign(k, v);
        }
        info
    }

    fn assign(&mut self, key: &str, value: &str) {
        let key = normalize_name(key);
        let value = normalize_name(value);
        if value.is_empty() {
            return;
        }
        match key.as_str() {
            "variant" | "type" | "style" => self.variant = Some(value),
            "state" | "status" => self.state = Some(value),
            "size" => self.size = Some(value),
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    pub fn is_icon_sized(&self) -> bool {
        self.size.as_deref() == Some("icon")
    }
}

/// Coarse primitive a layer renders as, before any component classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Text,
    Icon,
    Image,
    Shape,
    Line,
    Frame,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RadiusClass {
    None,
    Small,
    Medium,
    Large,
    Full,
}

/// Facts about one direct child, enough for structural cues
#[derive(Debug, Clone)]
pub struct ChildFacts {
    pub tokens: Vec<String>,
    pub kind: NodeKind,
    pub primitive: Primitive,
    pub width: f64,
    pub height: f64,
    pub circular: bool,
    pub child_count: usize,
}

#[derive(Debug, Clone)]
pub struct NodeFacts {
    pub name: String,
    pub tokens: Vec<String>,
    pub metadata: VariantInfo,
    pub kind: NodeKind,
    pub width: f64,
    pub height: f64,
    /// `None` when height is zero
    pub aspect_ratio: Option<f64>,
    pub has_fill: bool,
    pub has_image_fill: bool,
    pub has_stroke: bool,
    pub has_shadow: bool,
    pub radius: RadiusClass,
    pub circular: bool,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub layout: LayoutMode,
    pub has_padding: bool,
    pub children: Vec<ChildFacts>,
    pub histogram: AHashMap<Primitive, usize>,
    /// Name tokens of every visible descendant within [`SCAN_DEPTH`]
    pub descendant_tokens: AHashSet<String>,
    /// Text layers in the scanned subtree, the node itself included
    pub text_nodes: usize,
}

impl NodeFacts {
    pub fn extract(node: &DesignNode) -> Self {
        let width = node.geometry.width.max(0.0);
        let height = node.geometry.height.max(0.0);
        let radius = radius_class(node);
        let aspect = aspect_ratio(width, height);

        let children: Vec<ChildFacts> = node
            .visible_children()
            .map(|c| ChildFacts {
                tokens: tokenize(&c.name),
                kind: c.kind,
                primitive: infer_primitive(c),
                width: c.geometry.width,
                height: c.geometry.height,
                circular: is_circular(c),
                child_count: c.visible_children().count(),
            })
            .collect();

        let mut histogram = AHashMap::new();
        for child in &children {
            *histogram.entry(child.primitive).or_insert(0) += 1;
        }

        let mut descendant_tokens = AHashSet::new();
        let mut text_nodes = usize::from(node.text_content().is_some());
        scan_descendants(node, 1, &mut descendant_tokens, &mut text_nodes);

        Self {
            name: normalize_name(&node.name),
            tokens: tokenize(&node.name),
            metadata: VariantInfo::extract(node),
            kind: node.kind,
            width,
            height,
            aspect_ratio: aspect,
            has_fill: node.style.fills.iter().any(|p| p.is_effective()),
            has_image_fill: node
                .style
                .fills
                .iter()
                .any(|p| p.is_effective() && p.kind == PaintKind::Image),
            has_stroke: node.style.strokes.iter().any(|p| p.is_effective())
                && node.style.stroke_weight.map_or(true, |w| w > 0.0),
            has_shadow: node
                .style
                .effects
                .iter()
                .any(|e| e.visible && e.kind == EffectKind::DropShadow),
            radius,
            circular: is_circular(node),
            text: node.text_content().map(normalize_name),
            font_size: node.text.as_ref().and_then(|t| t.font_size),
            font_weight: node.text.as_ref().and_then(|t| t.font_weight),
            layout: node.layout.mode,
            has_padding: !node.layout.padding.is_zero(),
            children,
            histogram,
            descendant_tokens,
            text_nodes,
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn count(&self, primitive: Primitive) -> usize {
        self.histogram.get(&primitive).copied().unwrap_or(0)
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    pub fn word_count(&self) -> usize {
        self.text.as_deref().map_or(0, |t| t.split_whitespace().count())
    }

    /// Any direct child whose name contains one of `keywords`
    pub fn child_named(&self, keywords: &[&str]) -> bool {
        self.children
            .iter()
            .any(|c| keywords.iter().any(|k| contains_phrase(&c.tokens, k)))
    }

    /// Any scanned descendant name token equal to one of `keywords` (single words)
    pub fn descendant_named(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.descendant_tokens.contains(*k))
    }

    /// Size of the largest group of children sharing primitive and footprint
    pub fn repeated_children(&self) -> usize {
        let mut groups: AHashMap<(Primitive, i64, i64), usize> = AHashMap::new();
        for c in &self.children {
            let key = (c.primitive, bucket(c.width), bucket(c.height));
            *groups.entry(key).or_insert(0) += 1;
        }
        groups.values().copied().max().unwrap_or(0)
    }
}

/// Round to an 8px bucket so near-identical siblings group together
fn bucket(v: f64) -> i64 {
    (v / 8.0).round() as i64
}

fn scan_descendants(node: &DesignNode, depth: usize, tokens: &mut AHashSet<String>, text_nodes: &mut usize) {
    if depth > SCAN_DEPTH {
        return;
    }
    for child in node.visible_children() {
        tokens.extend(tokenize(&child.name));
        if child.text_content().is_some() {
            *text_nodes += 1;
        }
        scan_descendants(child, depth + 1, tokens, text_nodes);
    }
}

pub fn aspect_ratio(width: f64, height: f64) -> Option<f64> {
    if height > 0.0 && width.is_finite() && height.is_finite() {
        Some(width / height)
    } else {
        None
    }
}

pub fn radius_class(node: &DesignNode) -> RadiusClass {
    if node.kind == NodeKind::Ellipse {
        return RadiusClass::Full;
    }
    let Some(r) = node.style.corner_radius.filter(|r| r.is_finite() && *r > 0.0) else {
        return RadiusClass::None;
    };
    let short_side = node.geometry.width.min(node.geometry.height);
    if short_side > 0.0 && r >= short_side / 2.0 - 0.5 {
        RadiusClass::Full
    } else if r <= 4.0 {
        RadiusClass::Small
    } else if r <= 12.0 {
        RadiusClass::Medium
    } else {
        RadiusClass::Large
    }
}

fn is_circular(node: &DesignNode) -> bool {
    let square = aspect_ratio(node.geometry.width, node.geometry.height)
        .is_some_and(|a| (0.9..=1.1).contains(&a));
    square && radius_class(node) == RadiusClass::Full
}

pub fn infer_primitive(node: &DesignNode) -> Primitive {
    let (w, h) = (node.geometry.width, node.geometry.height);
    let small = w.max(h) <= ICON_MAX_PX;

    if node.kind == NodeKind::Text {
        return Primitive::Text;
    }
    if node
        .style
        .fills
        .iter()
        .any(|p| p.is_effective() && p.kind == PaintKind::Image)
    {
        return Primitive::Image;
    }
    if node.kind == NodeKind::Line || (node.kind.is_shape() && (w <= 2.0 || h <= 2.0) && w.max(h) > 2.0) {
        return Primitive::Line;
    }
    if node.kind.is_vector() {
        return if small { Primitive::Icon } else { Primitive::Shape };
    }
    if node.kind.is_shape() {
        return Primitive::Shape;
    }
    if node.kind.is_container() {
        let vector_only = !node.children.is_empty() && node.children.iter().all(|c| c.kind.is_vector());
        return if small && vector_only { Primitive::Icon } else { Primitive::Frame };
    }
    Primitive::Other
}

/// Per-request memo of facts and leaf classifications.
///
/// Keys are node addresses, which are stable because the tree is borrowed
/// immutably for `'a`. Drop the cache when the request finishes.
pub struct NodeCache<'a> {
    facts: RefCell<AHashMap<*const DesignNode, Rc<NodeFacts>>>,
    classifications: RefCell<AHashMap<*const DesignNode, Classification>>,
    _tree: PhantomData<&'a DesignNode>,
}

impl<'a> NodeCache<'a> {
    pub fn new() -> Self {
        Self {
            facts: RefCell::new(AHashMap::new()),
            classifications: RefCell::new(AHashMap::new()),
            _tree: PhantomData,
        }
    }

    pub fn facts(&self, node: &'a DesignNode) -> Rc<NodeFacts> {
        let key = node as *const DesignNode;
        if let Some(f) = self.facts.borrow().get(&key) {
            return Rc::clone(f);
        }
        let facts = Rc::new(NodeFacts::extract(node));
        self.facts.borrow_mut().insert(key, Rc::clone(&facts));
        facts
    }

    pub(crate) fn classification(
        &self,
        node: &'a DesignNode,
        compute: impl FnOnce(&NodeFacts) -> Classification,
    ) -> Classification {
        let key = node as *const DesignNode;
        if let Some(c) = self.classifications.borrow().get(&key) {
            return c.clone();
        }
        let facts = self.facts(node);
        let c = compute(&facts);
        self.classifications.borrow_mut().insert(key, c.clone());
        c
    }

    pub fn len(&self) -> usize {
        self.facts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NodeCache<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DesignNode;

    #[test]
    fn test_variant_from_name_and_properties() {
        let node = DesignNode::frame("Button/Variant=Outline, Size=Icon, State=Hover");
        let info = VariantInfo::extract(&node);
        assert_eq!(info.variant.as_deref(), Some("outline"));
        assert_eq!(info.size.as_deref(), Some("icon"));
        assert_eq!(info.state.as_deref(), Some("hover"));
        assert!(info.is_icon_sized());

        let declared = DesignNode::frame("Size=sm").with_property("Size", "icon");
        assert!(VariantInfo::extract(&declared).is_icon_sized());
    }

    #[test]
    fn test_unknown_keys_land_in_extra() {
        let node = DesignNode::frame("Theme=Dark");
        let info = VariantInfo::extract(&node);
        assert_eq!(info.extra.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_aspect_ratio_never_divides_by_zero() {
        assert_eq!(aspect_ratio(10.0, 0.0), None);
        assert_eq!(aspect_ratio(10.0, 5.0), Some(2.0));
    }

    #[test]
    fn test_radius_classes() {
        let pill = DesignNode::frame("p").with_size(44.0, 24.0).with_radius(12.0);
        assert_eq!(radius_class(&pill), RadiusClass::Full);
        let card = DesignNode::frame("c").with_size(300.0, 200.0).with_radius(8.0);
        assert_eq!(radius_class(&card), RadiusClass::Medium);
        assert_eq!(radius_class(&DesignNode::frame("x")), RadiusClass::None);
    }

    #[test]
    fn test_histogram_and_primitives() {
        let node = DesignNode::frame("Row").with_children(vec![
            DesignNode::text("Label", "Name"),
            DesignNode::new("Chevron", NodeKind::Vector).with_size(16.0, 16.0),
            DesignNode::frame("Photo").with_size(200.0, 120.0).with_image_fill(),
            DesignNode::new("Divider", NodeKind::Rectangle).with_size(200.0, 1.0),
            DesignNode::text("Hidden", "x").hidden(),
        ]);
        let facts = NodeFacts::extract(&node);
        assert_eq!(facts.child_count(), 4);
        assert_eq!(facts.count(Primitive::Text), 1);
        assert_eq!(facts.count(Primitive::Icon), 1);
        assert_eq!(facts.count(Primitive::Image), 1);
        assert_eq!(facts.count(Primitive::Line), 1);
        assert!(facts.child_named(&["chevron"]));
        assert!(facts.descendant_named(&["divider"]));
    }

    #[test]
    fn test_absent_fields_degrade() {
        let facts = NodeFacts::extract(&DesignNode::default());
        assert!(!facts.has_fill && !facts.has_stroke && !facts.has_shadow);
        assert_eq!(facts.aspect_ratio, None);
        assert_eq!(facts.child_count(), 0);
        assert!(facts.tokens.is_empty());
    }

    #[test]
    fn test_cache_reuses_facts() {
        let node = DesignNode::frame("Card");
        let cache = NodeCache::new();
        let a = cache.facts(&node);
        let b = cache.facts(&node);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }
}
