//! Structural, geometric and cosmetic cues
//!
//! A cue is a yes/no question about [`NodeFacts`]. Profiles pair each cue
//! with a signed weight, so the same vocabulary expresses both supporting
//! and contradicting evidence.

use crate::node::{LayoutMode, NodeKind};
use crate::signals::{NodeFacts, Primitive, RadiusClass};

/// Sectioned-body naming shared by Card, HoverCard and their exclusions
pub const SECTION_GROUPS: &[&[&str]] = &[&["header"], &["content", "body"], &["footer"]];
pub const ARROW_NAMES: &[&str] = &["arrow", "pointer", "caret", "beak", "tail"];

#[derive(Debug, Clone, Copy)]
pub enum Cue {
    /// Some direct child is named with one of these keywords
    ChildNamed(&'static [&'static str]),
    /// Every group is matched by some direct child
    ChildrenNamedAll(&'static [&'static [&'static str]]),
    /// Some descendant within scan depth carries one of these name tokens
    DescendantNamed(&'static [&'static str]),
    ChildCountAtLeast(usize),
    ChildCountAtMost(usize),
    /// At least n children share primitive and footprint
    RepeatedChildren(usize),
    PrimitiveAtLeast(Primitive, usize),
    CircularChildren(usize),
    /// Text layers in the scanned subtree, node included
    TextNodesAtLeast(usize),
    NoText,
    SingleTextChild,
    IsText,
    IsKind(NodeKind),
    Vector,
    Container,
    ImageFill,
    Fill,
    Stroke,
    Shadow,
    RadiusAtLeast(RadiusClass),
    Circular,
    /// Fully rounded and clearly wider than tall
    Pill,
    Axis(LayoutMode),
    Padding,
    WidthBetween(f64, f64),
    HeightBetween(f64, f64),
    AspectBetween(f64, f64),
    /// Hairline: one side at most 2px, the other at least 16px
    Thin,
    ShortText(usize),
    FontSizeAtLeast(f64),
    FontWeightAtLeast(f64),
}

impl Cue {
    pub fn holds(&self, f: &NodeFacts) -> bool {
        match *self {
            Cue::ChildNamed(keys) => f.child_named(keys),
            Cue::ChildrenNamedAll(groups) => groups.iter().all(|g| f.child_named(g)),
            Cue::DescendantNamed(keys) => f.descendant_named(keys),
            Cue::ChildCountAtLeast(n) => f.child_count() >= n,
            Cue::ChildCountAtMost(n) => f.child_count() <= n,
            Cue::RepeatedChildren(n) => f.repeated_children() >= n,
            Cue::PrimitiveAtLeast(p, n) => f.count(p) >= n,
            Cue::CircularChildren(n) => f.children.iter().filter(|c| c.circular).count() >= n,
            Cue::TextNodesAtLeast(n) => f.text_nodes >= n,
            Cue::NoText => f.text_nodes == 0,
            Cue::SingleTextChild => f.child_count() == 1 && f.count(Primitive::Text) == 1,
            Cue::IsText => f.is_text(),
            Cue::IsKind(kind) => f.kind == kind,
            Cue::Vector => f.kind.is_vector(),
            Cue::Container => f.kind.is_container(),
            Cue::ImageFill => f.has_image_fill,
            Cue::Fill => f.has_fill,
            Cue::Stroke => f.has_stroke,
            Cue::Shadow => f.has_shadow,
            Cue::RadiusAtLeast(class) => f.radius >= class,
            Cue::Circular => f.circular,
            Cue::Pill => f.radius == RadiusClass::Full && f.aspect_ratio.is_some_and(|a| a >= 1.3),
            Cue::Axis(mode) => f.layout == mode,
            Cue::Padding => f.has_padding,
            Cue::WidthBetween(lo, hi) => f.width > 0.0 && (lo..=hi).contains(&f.width),
            Cue::HeightBetween(lo, hi) => f.height > 0.0 && (lo..=hi).contains(&f.height),
            Cue::AspectBetween(lo, hi) => f.aspect_ratio.is_some_and(|a| (lo..=hi).contains(&a)),
            Cue::Thin => {
                let (short, long) = (f.width.min(f.height), f.width.max(f.height));
                short <= 2.0 && long >= 16.0
            }
            Cue::ShortText(max_words) => {
                let words = f.word_count();
                words > 0 && words <= max_words
            }
            Cue::FontSizeAtLeast(px) => f.font_size.is_some_and(|s| s >= px),
            Cue::FontWeightAtLeast(w) => f.font_weight.is_some_and(|x| x >= w),
        }
    }
}
