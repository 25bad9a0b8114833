//! Scorers that need more than a profile row
//!
//! Button and Icon share the icon-size disambiguation: a control declared as
//! `size = icon` is never a Button and always gets an Icon boost.

use crate::leaf::cues::Cue;
use crate::leaf::profiles::{ev, score_evidence, score_metadata, score_name, Evidence};
use crate::leaf::LeafScorer;
use crate::node::LayoutMode;
use crate::scoring::ScoreSheet;
use crate::signals::{NodeFacts, RadiusClass};
use crate::types::{Classification, ComponentType};

const ICON_SIZE_BOOST: f64 = 0.45;
const SIZE_MATCH: f64 = 0.05;

const BUTTON_KEYWORDS: &[&str] = &["button", "btn", "cta"];
const BUTTON_VARIANTS: &[&str] = &[
    "default", "primary", "secondary", "destructive", "outline", "ghost", "link",
];
const BUTTON_STATES: &[&str] = &[
    "default", "hover", "pressed", "disabled", "focus", "active", "loading",
];
const BUTTON_SIZES: &[&str] = &["sm", "default", "lg", "small", "medium", "large"];

const BUTTON_EVIDENCE: &[Evidence] = &[
    ev(Cue::SingleTextChild, 0.1, "single label child"),
    ev(Cue::Axis(LayoutMode::Horizontal), 0.05, "horizontal content"),
    ev(Cue::Padding, 0.05, "padded"),
    ev(Cue::HeightBetween(24.0, 64.0), 0.1, "control height"),
    ev(Cue::AspectBetween(1.5, 8.0), 0.05, "button proportions"),
    ev(Cue::Fill, 0.05, "solid surface"),
    ev(Cue::RadiusAtLeast(RadiusClass::Small), 0.05, "rounded corners"),
    ev(Cue::IsText, -0.2, "a bare text layer is not a control surface"),
];

const ICON_KEYWORDS: &[&str] = &["icon", "glyph", "symbol", "ic"];

const ICON_EVIDENCE: &[Evidence] = &[
    ev(Cue::AspectBetween(0.8, 1.25), 0.1, "square footprint"),
    ev(Cue::IsText, -0.3, "text layer"),
];

pub struct ButtonScorer;

impl LeafScorer for ButtonScorer {
    fn component(&self) -> ComponentType {
        ComponentType::Button
    }

    fn score(&self, facts: &NodeFacts) -> Classification {
        let mut sheet = ScoreSheet::new();
        // checked before any other button signal
        if facts.metadata.is_icon_sized() {
            sheet.veto("size=icon marks an icon control, not a button");
            let (confidence, reasons) = sheet.into_parts();
            return Classification::new(ComponentType::Button, confidence, reasons);
        }

        score_name(&mut sheet, facts, BUTTON_KEYWORDS);
        score_metadata(&mut sheet, facts, BUTTON_VARIANTS, BUTTON_STATES);
        if let Some(size) = facts.metadata.size.as_deref() {
            if BUTTON_SIZES.contains(&size) {
                sheet.add(SIZE_MATCH, format!("size '{size}' is a button size"));
            }
        }
        score_evidence(&mut sheet, facts, BUTTON_EVIDENCE);

        let (confidence, reasons) = sheet.into_parts();
        Classification::new(ComponentType::Button, confidence, reasons)
    }
}

pub struct IconScorer;

impl LeafScorer for IconScorer {
    fn component(&self) -> ComponentType {
        ComponentType::Icon
    }

    fn score(&self, facts: &NodeFacts) -> Classification {
        let mut sheet = ScoreSheet::new();
        if facts.metadata.is_icon_sized() {
            sheet.add(ICON_SIZE_BOOST, "size=icon marks an icon-sized control");
        }
        score_name(&mut sheet, facts, ICON_KEYWORDS);

        let small = facts.width.max(facts.height) <= 48.0;
        if facts.kind.is_vector() && small {
            sheet.add(0.35, "small vector");
        } else if facts.kind.is_container()
            && small
            && facts.child_count() > 0
            && facts.children.iter().all(|c| c.kind.is_vector())
        {
            sheet.add(0.25, "small frame wrapping vector paths");
        }
        score_evidence(&mut sheet, facts, ICON_EVIDENCE);

        let (confidence, reasons) = sheet.into_parts();
        Classification::new(ComponentType::Icon, confidence, reasons)
    }
}
