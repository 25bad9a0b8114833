//! Table-driven leaf scorers
//!
//! Most component types differ only in which keywords, variant values and
//! cues count as evidence, so each one is a [`LeafProfile`] row evaluated by
//! the same [`ProfileScorer`]. Negative weights are contradicting evidence.

use crate::leaf::cues::{Cue, ARROW_NAMES, SECTION_GROUPS};
use crate::leaf::LeafScorer;
use crate::node::{LayoutMode, NodeKind};
use crate::scoring::ScoreSheet;
use crate::signals::{NodeFacts, Primitive, RadiusClass};
use crate::similarity::{match_keywords, KeywordMatch};
use crate::types::{Classification, ComponentType};

pub const NAME_EXACT: f64 = 0.5;
pub const NAME_FUZZY: f64 = 0.3;
/// Applied when the name also names a sub-part (`Card Header`, `Tooltip Arrow`)
pub const PART_PENALTY: f64 = 0.3;
pub const VARIANT_MATCH: f64 = 0.15;
pub const STATE_MATCH: f64 = 0.1;
/// Charged to a text layer by every profile that does not list text layers as evidence
pub const TEXT_LAYER_PENALTY: f64 = 0.3;

const PART_TOKENS: &[&str] = &[
    "header", "title", "description", "content", "footer", "trigger", "item", "body", "list",
    "thumb", "track", "indicator", "handle", "arrow", "icon", "label", "text", "placeholder",
    "overlay", "close",
];

#[derive(Debug, Clone, Copy)]
pub struct Evidence {
    pub cue: Cue,
    pub weight: f64,
    pub reason: &'static str,
}

pub(crate) const fn ev(cue: Cue, weight: f64, reason: &'static str) -> Evidence {
    Evidence { cue, weight, reason }
}

#[derive(Debug, Clone, Copy)]
pub struct LeafProfile {
    pub component: ComponentType,
    pub keywords: &'static [&'static str],
    pub variants: &'static [&'static str],
    pub states: &'static [&'static str],
    pub evidence: &'static [Evidence],
}

/// Name evidence: exact or fuzzy keyword hit, minus the sub-part penalty.
pub(crate) fn score_name(sheet: &mut ScoreSheet, facts: &NodeFacts, keywords: &[&str]) -> bool {
    let Some(hit) = match_keywords(&facts.tokens, keywords) else {
        return false;
    };
    match &hit {
        KeywordMatch::Exact(k) => sheet.add(NAME_EXACT, format!("name matches '{k}'")),
        KeywordMatch::Fuzzy { keyword, ratio } => {
            sheet.add(NAME_FUZZY, format!("name resembles '{keyword}' ({ratio:.2})"))
        }
    }
    let own_words: Vec<&str> = hit.keyword().split_whitespace().collect();
    let part = facts
        .tokens
        .iter()
        .find(|t| PART_TOKENS.contains(&t.as_str()) && !own_words.contains(&t.as_str()));
    if let Some(part) = part {
        sheet.penalize(PART_PENALTY, format!("name refers to a '{part}' sub-part"));
    }
    true
}

/// Declared variant and state evidence.
pub(crate) fn score_metadata(sheet: &mut ScoreSheet, facts: &NodeFacts, variants: &[&str], states: &[&str]) {
    if let Some(v) = facts.metadata.variant.as_deref() {
        if variants.contains(&v) {
            sheet.add(VARIANT_MATCH, format!("variant '{v}' is known for this type"));
        }
    }
    if let Some(s) = facts.metadata.state.as_deref() {
        if states.contains(&s) {
            sheet.add(STATE_MATCH, format!("state '{s}' is known for this type"));
        }
    }
}

pub(crate) fn score_evidence(sheet: &mut ScoreSheet, facts: &NodeFacts, evidence: &[Evidence]) {
    for e in evidence {
        if e.cue.holds(facts) {
            sheet.apply(e.weight, e.reason);
        }
    }
}

pub struct ProfileScorer {
    profile: &'static LeafProfile,
}

impl ProfileScorer {
    pub fn new(profile: &'static LeafProfile) -> Self {
        Self { profile }
    }

    /// Scorer for `component`, if a profile row exists
    pub fn for_type(component: ComponentType) -> Option<Self> {
        profile(component).map(Self::new)
    }
}

impl LeafScorer for ProfileScorer {
    fn component(&self) -> ComponentType {
        self.profile.component
    }

    fn score(&self, facts: &NodeFacts) -> Classification {
        let p = self.profile;
        let mut sheet = ScoreSheet::new();
        score_name(&mut sheet, facts, p.keywords);
        score_metadata(&mut sheet, facts, p.variants, p.states);
        score_evidence(&mut sheet, facts, p.evidence);
        if facts.is_text() && !p.accepts_text_layers() {
            sheet.penalize(TEXT_LAYER_PENALTY, "a bare text layer is not this component");
        }
        let (confidence, reasons) = sheet.into_parts();
        Classification::new(p.component, confidence, reasons)
    }
}

impl LeafProfile {
    /// Text layers count as positive evidence for this type
    pub fn accepts_text_layers(&self) -> bool {
        self.evidence.iter().any(|e| matches!(e.cue, Cue::IsText) && e.weight > 0.0)
    }
}

pub fn profile(component: ComponentType) -> Option<&'static LeafProfile> {
    PROFILES.iter().find(|p| p.component == component)
}

use ComponentType as T;

const NO_VALUES: &[&str] = &[];
const CHECK_STATES: &[&str] = &["checked", "unchecked", "indeterminate", "selected", "on", "off"];
const FIELD_STATES: &[&str] = &["default", "focus", "focused", "error", "disabled", "filled", "hover"];

pub static PROFILES: &[LeafProfile] = &[
    LeafProfile {
        component: T::AlertDialog,
        keywords: &["alert dialog", "confirm dialog", "confirmation dialog"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["action", "confirm", "continue", "delete"]), 0.15, "has a confirming action"),
            ev(Cue::ChildNamed(&["cancel"]), 0.15, "has a cancel action"),
            ev(Cue::Shadow, 0.05, "elevated surface"),
        ],
    },
    LeafProfile {
        component: T::Sheet,
        keywords: &["sheet", "side panel", "slide over"],
        variants: &["left", "right", "top", "bottom"],
        states: NO_VALUES,
        evidence: &[
            ev(Cue::AspectBetween(0.0, 0.8), 0.1, "taller than wide"),
            ev(Cue::Shadow, 0.05, "elevated surface"),
            ev(Cue::ChildNamed(&["close"]), 0.05, "has a close control"),
        ],
    },
    LeafProfile {
        component: T::Drawer,
        keywords: &["drawer", "bottom sheet"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["handle", "grabber", "grip"]), 0.2, "has a drag handle"),
            ev(Cue::RadiusAtLeast(RadiusClass::Medium), 0.05, "rounded top edge"),
        ],
    },
    LeafProfile {
        component: T::Dialog,
        keywords: &["dialog", "modal"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["header", "title"]), 0.1, "has a header or title"),
            ev(Cue::ChildNamed(&["footer", "actions"]), 0.1, "has a footer or actions"),
            ev(Cue::Shadow, 0.1, "elevated surface"),
            ev(Cue::ChildNamed(&["close"]), 0.05, "has a close control"),
        ],
    },
    LeafProfile {
        component: T::Alert,
        keywords: &["alert", "callout", "notice"],
        variants: &["default", "destructive", "warning", "info", "success", "error"],
        states: NO_VALUES,
        evidence: &[
            ev(Cue::PrimitiveAtLeast(Primitive::Icon, 1), 0.1, "has a leading icon"),
            ev(Cue::ChildNamed(&["title"]), 0.1, "has a title"),
            ev(Cue::ChildNamed(&["description"]), 0.05, "has a description"),
            ev(Cue::Stroke, 0.05, "outlined"),
        ],
    },
    LeafProfile {
        component: T::Toast,
        keywords: &["toast", "sonner", "snackbar", "notification"],
        variants: &["default", "destructive", "success", "error"],
        states: NO_VALUES,
        evidence: &[
            ev(Cue::Shadow, 0.1, "floating surface"),
            ev(Cue::ChildNamed(&["action", "close"]), 0.05, "has an action or close control"),
            ev(Cue::WidthBetween(240.0, 480.0), 0.05, "toast-sized width"),
        ],
    },
    LeafProfile {
        component: T::HoverCard,
        keywords: &["hover card", "preview card"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildrenNamedAll(SECTION_GROUPS), 0.2, "header, content and footer sections"),
            ev(Cue::DescendantNamed(&["avatar"]), 0.1, "contains an avatar"),
            ev(Cue::Shadow, 0.05, "floating surface"),
            ev(Cue::ChildNamed(ARROW_NAMES), -0.4, "an arrow child implies Tooltip"),
        ],
    },
    LeafProfile {
        component: T::Tooltip,
        keywords: &["tooltip", "tool tip", "hint"],
        variants: &["top", "bottom", "left", "right"],
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(ARROW_NAMES), 0.2, "has an arrow child"),
            ev(Cue::HeightBetween(16.0, 48.0), 0.1, "compact height"),
            ev(Cue::TextNodesAtLeast(1), 0.05, "carries text"),
            ev(Cue::ChildrenNamedAll(SECTION_GROUPS), -0.4, "header, content and footer sections imply HoverCard"),
            ev(Cue::ChildCountAtLeast(4), -0.2, "too many children for a tooltip"),
        ],
    },
    LeafProfile {
        component: T::Popover,
        keywords: &["popover", "popup", "flyout"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::Shadow, 0.1, "floating surface"),
            ev(Cue::ChildNamed(ARROW_NAMES), 0.05, "has an arrow child"),
        ],
    },
    LeafProfile {
        component: T::Skeleton,
        keywords: &["skeleton", "shimmer", "loading placeholder"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::NoText, 0.1, "no rendered text"),
            ev(Cue::PrimitiveAtLeast(Primitive::Shape, 2), 0.1, "placeholder shapes"),
            ev(Cue::Fill, 0.05, "muted fill"),
            ev(Cue::TextNodesAtLeast(1), -0.3, "rendered text implies Tooltip or HoverCard content"),
        ],
    },
    LeafProfile {
        component: T::EmptyState,
        keywords: &["empty state", "empty", "no results", "no data", "zero state", "blank state"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::PrimitiveAtLeast(Primitive::Icon, 1), 0.1, "has an illustration icon"),
            ev(Cue::PrimitiveAtLeast(Primitive::Image, 1), 0.1, "has an illustration"),
            ev(Cue::ChildNamed(&["title", "heading"]), 0.05, "has a title"),
            ev(Cue::DescendantNamed(&["button", "action"]), 0.1, "offers an action"),
            ev(Cue::ChildrenNamedAll(SECTION_GROUPS), -0.3, "sectioned body implies HoverCard"),
            ev(Cue::Shadow, -0.1, "floating surface implies HoverCard"),
        ],
    },
    LeafProfile {
        component: T::InputOtp,
        keywords: &["input otp", "otp", "pin input", "verification code", "one time password"],
        variants: NO_VALUES,
        states: FIELD_STATES,
        evidence: &[
            ev(Cue::RepeatedChildren(4), 0.25, "four or more identical slots"),
            ev(Cue::Axis(LayoutMode::Horizontal), 0.05, "horizontal row"),
        ],
    },
    LeafProfile {
        component: T::Combobox,
        keywords: &["combobox", "combo box", "autocomplete", "typeahead"],
        variants: NO_VALUES,
        states: FIELD_STATES,
        evidence: &[
            ev(Cue::DescendantNamed(&["search"]), 0.1, "has a search affordance"),
            ev(Cue::DescendantNamed(&["chevron", "caret"]), 0.1, "has a disclosure chevron"),
            ev(Cue::Stroke, 0.05, "outlined field"),
        ],
    },
    LeafProfile {
        component: T::DatePicker,
        keywords: &["date picker", "datepicker", "date input"],
        variants: NO_VALUES,
        states: FIELD_STATES,
        evidence: &[
            ev(Cue::DescendantNamed(&["calendar"]), 0.15, "has a calendar affordance"),
            ev(Cue::Stroke, 0.05, "outlined field"),
        ],
    },
    LeafProfile {
        component: T::Calendar,
        keywords: &["calendar", "date grid", "month view"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::RepeatedChildren(7), 0.2, "week row or day grid"),
            ev(Cue::ChildNamed(&["weekday", "day", "week"]), 0.1, "day or week children"),
        ],
    },
    LeafProfile {
        component: T::Select,
        keywords: &["select", "picker", "dropdown select", "listbox"],
        variants: NO_VALUES,
        states: &["open", "closed", "default", "disabled", "focus"],
        evidence: &[
            ev(Cue::ChildNamed(&["chevron", "caret", "arrow"]), 0.2, "has a disclosure chevron"),
            ev(Cue::Stroke, 0.05, "outlined control"),
            ev(Cue::HeightBetween(28.0, 56.0), 0.1, "control height"),
        ],
    },
    LeafProfile {
        component: T::Textarea,
        keywords: &["textarea", "text area", "multiline input", "message field"],
        variants: NO_VALUES,
        states: FIELD_STATES,
        evidence: &[
            ev(Cue::Stroke, 0.1, "outlined field"),
            ev(Cue::HeightBetween(64.0, 400.0), 0.1, "multi-line height"),
        ],
    },
    LeafProfile {
        component: T::Input,
        keywords: &[
            "input", "text field", "textfield", "text input", "search field", "search bar",
            "email field", "password field",
        ],
        variants: NO_VALUES,
        states: FIELD_STATES,
        evidence: &[
            ev(Cue::Stroke, 0.15, "outlined field"),
            ev(Cue::HeightBetween(28.0, 56.0), 0.1, "control height"),
            ev(Cue::AspectBetween(3.0, 40.0), 0.05, "wide control"),
            ev(Cue::DescendantNamed(&["placeholder"]), 0.1, "has placeholder text"),
        ],
    },
    LeafProfile {
        component: T::Slider,
        keywords: &["slider", "range slider", "range"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(
                Cue::ChildrenNamedAll(&[&["track", "rail"], &["thumb", "handle", "knob"]]),
                0.4,
                "has both a track and a thumb",
            ),
            ev(Cue::AspectBetween(4.0, 100.0), 0.05, "long horizontal footprint"),
        ],
    },
    LeafProfile {
        component: T::Switch,
        keywords: &["switch"],
        variants: NO_VALUES,
        states: CHECK_STATES,
        evidence: &[
            ev(Cue::Pill, 0.2, "pill-shaped track"),
            ev(Cue::CircularChildren(1), 0.15, "round thumb"),
        ],
    },
    LeafProfile {
        component: T::ToggleGroup,
        keywords: &["toggle group", "segmented control", "segmented", "button group"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::RepeatedChildren(2), 0.1, "repeated options"),
            ev(Cue::Axis(LayoutMode::Horizontal), 0.05, "horizontal row"),
        ],
    },
    LeafProfile {
        component: T::Toggle,
        keywords: &["toggle"],
        variants: &["default", "outline"],
        states: &["on", "off", "pressed", "unpressed"],
        evidence: &[ev(Cue::PrimitiveAtLeast(Primitive::Icon, 1), 0.05, "icon content")],
    },
    LeafProfile {
        component: T::RadioGroup,
        keywords: &["radio group", "radio", "radio button", "option group"],
        variants: NO_VALUES,
        states: CHECK_STATES,
        evidence: &[
            ev(Cue::CircularChildren(1), 0.15, "round indicators"),
            ev(Cue::RepeatedChildren(2), 0.05, "repeated options"),
        ],
    },
    LeafProfile {
        component: T::Checkbox,
        keywords: &["checkbox", "check box", "check"],
        variants: NO_VALUES,
        states: CHECK_STATES,
        evidence: &[
            ev(Cue::WidthBetween(12.0, 28.0), 0.1, "checkbox-sized"),
            ev(Cue::AspectBetween(0.9, 1.1), 0.05, "square"),
            ev(Cue::Stroke, 0.1, "outlined box"),
        ],
    },
    LeafProfile {
        component: T::Progress,
        keywords: &["progress", "progress bar", "loading bar", "meter"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["indicator", "fill", "bar", "value"]), 0.15, "has an indicator child"),
            ev(Cue::AspectBetween(6.0, 1000.0), 0.1, "thin horizontal bar"),
            ev(Cue::RadiusAtLeast(RadiusClass::Small), 0.05, "rounded track"),
            ev(Cue::ChildNamed(&["axis", "legend", "series"]), -0.35, "axis or legend implies Chart"),
        ],
    },
    LeafProfile {
        component: T::Chart,
        keywords: &["chart", "graph", "plot", "visualization", "sparkline"],
        variants: &["bar", "line", "area", "pie", "donut", "radar"],
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["axis", "legend", "series", "grid lines"]), 0.25, "has axes or a legend"),
            ev(Cue::PrimitiveAtLeast(Primitive::Shape, 5), 0.1, "many plotted shapes"),
            ev(Cue::AspectBetween(8.0, 1000.0), -0.3, "a single thin bar implies Progress"),
        ],
    },
    LeafProfile {
        component: T::Table,
        keywords: &["table", "data table", "datatable", "data grid", "datagrid", "spreadsheet"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["row", "tr"]), 0.2, "has row children"),
            ev(Cue::ChildNamed(&["header", "thead"]), 0.1, "has a header row"),
            ev(Cue::RepeatedChildren(3), 0.1, "repeated rows"),
            ev(Cue::Axis(LayoutMode::Vertical), 0.05, "stacked vertically"),
            ev(Cue::ChildNamed(&["previous", "prev", "next", "slide"]), -0.35, "navigation arrows or slides imply Carousel"),
        ],
    },
    LeafProfile {
        component: T::Carousel,
        keywords: &["carousel", "slideshow", "gallery slider", "image slider"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["previous", "prev", "next"]), 0.25, "has previous/next controls"),
            ev(Cue::ChildNamed(&["slide", "item"]), 0.1, "has slide children"),
            ev(Cue::DescendantNamed(&["dot", "dots", "indicator"]), 0.05, "has position dots"),
            ev(Cue::ChildNamed(&["row", "cell", "column"]), -0.35, "row and cell structure implies Table"),
        ],
    },
    LeafProfile {
        component: T::Pagination,
        keywords: &["pagination", "pager", "page numbers"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["previous", "prev", "next"]), 0.15, "has previous/next controls"),
            ev(Cue::RepeatedChildren(3), 0.1, "repeated page links"),
            ev(Cue::Axis(LayoutMode::Horizontal), 0.05, "horizontal row"),
        ],
    },
    LeafProfile {
        component: T::Breadcrumb,
        keywords: &["breadcrumb", "breadcrumbs", "crumbs"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["separator", "slash", "chevron"]), 0.15, "separated path segments"),
            ev(Cue::Axis(LayoutMode::Horizontal), 0.05, "horizontal row"),
        ],
    },
    LeafProfile {
        component: T::Command,
        keywords: &["command", "command palette", "command menu", "cmdk", "spotlight"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::DescendantNamed(&["search", "input"]), 0.1, "has a search input"),
            ev(Cue::ChildNamed(&["group", "list"]), 0.05, "grouped results"),
        ],
    },
    LeafProfile {
        component: T::Sidebar,
        keywords: &["sidebar", "side nav", "sidenav", "side navigation"],
        variants: NO_VALUES,
        states: &["collapsed", "expanded"],
        evidence: &[
            ev(Cue::AspectBetween(0.0, 0.5), 0.15, "tall and narrow"),
            ev(Cue::Axis(LayoutMode::Vertical), 0.05, "stacked vertically"),
        ],
    },
    LeafProfile {
        component: T::NavigationMenu,
        keywords: &["navigation menu", "navigation", "navbar", "nav bar", "nav", "top nav"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::Axis(LayoutMode::Horizontal), 0.05, "horizontal row"),
            ev(Cue::TextNodesAtLeast(3), 0.05, "several labels"),
            ev(Cue::DescendantNamed(&["link"]), 0.1, "contains links"),
        ],
    },
    LeafProfile {
        component: T::Menubar,
        keywords: &["menubar", "menu bar"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::Axis(LayoutMode::Horizontal), 0.1, "horizontal row"),
            ev(Cue::ChildCountAtLeast(3), 0.05, "several menus"),
        ],
    },
    LeafProfile {
        component: T::ContextMenu,
        keywords: &["context menu", "right click menu"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["item"]), 0.1, "has menu items"),
            ev(Cue::Shadow, 0.05, "floating surface"),
        ],
    },
    LeafProfile {
        component: T::DropdownMenu,
        keywords: &["dropdown menu", "dropdown", "menu", "overflow menu"],
        variants: NO_VALUES,
        states: &["open", "closed"],
        evidence: &[
            ev(Cue::ChildNamed(&["item"]), 0.1, "has menu items"),
            ev(Cue::ChildNamed(&["separator"]), 0.05, "has separators"),
            ev(Cue::Shadow, 0.05, "floating surface"),
        ],
    },
    LeafProfile {
        component: T::Tabs,
        keywords: &["tabs", "tab bar", "tab list", "tabbar", "tab group"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildNamed(&["tab", "trigger"]), 0.15, "has tab triggers"),
            ev(Cue::RepeatedChildren(2), 0.05, "repeated triggers"),
            ev(Cue::Axis(LayoutMode::Horizontal), 0.05, "horizontal row"),
        ],
    },
    LeafProfile {
        component: T::Accordion,
        keywords: &["accordion", "faq list", "expandable list"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::RepeatedChildren(2), 0.1, "repeated sections"),
            ev(Cue::DescendantNamed(&["chevron", "plus"]), 0.1, "has expand indicators"),
            ev(Cue::Axis(LayoutMode::Vertical), 0.05, "stacked vertically"),
        ],
    },
    LeafProfile {
        component: T::Collapsible,
        keywords: &["collapsible", "expandable", "disclosure", "expander"],
        variants: NO_VALUES,
        states: &["open", "closed", "expanded", "collapsed"],
        evidence: &[ev(Cue::DescendantNamed(&["chevron", "trigger"]), 0.1, "has a disclosure trigger")],
    },
    LeafProfile {
        component: T::ScrollArea,
        keywords: &["scroll area", "scrollarea", "scrollable", "scroll view", "scroll"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[ev(Cue::ChildNamed(&["scrollbar", "scroll bar"]), 0.25, "has a scrollbar")],
    },
    LeafProfile {
        component: T::Resizable,
        keywords: &["resizable", "split pane", "split view", "panel group"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[ev(Cue::ChildNamed(&["handle", "divider"]), 0.2, "has a resize handle")],
    },
    LeafProfile {
        component: T::Card,
        keywords: &["card", "tile"],
        variants: &["default", "outline", "elevated", "filled"],
        states: NO_VALUES,
        evidence: &[
            ev(Cue::ChildrenNamedAll(SECTION_GROUPS), 0.2, "header, content and footer sections"),
            ev(Cue::ChildNamed(&["header", "title"]), 0.05, "has a header or title"),
            ev(Cue::RadiusAtLeast(RadiusClass::Medium), 0.05, "rounded corners"),
            ev(Cue::Shadow, 0.05, "elevated"),
            ev(Cue::Stroke, 0.05, "outlined"),
            ev(Cue::Fill, 0.05, "filled surface"),
            ev(Cue::Padding, 0.05, "padded"),
        ],
    },
    LeafProfile {
        component: T::Form,
        keywords: &["form", "login form", "sign in form", "contact form"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::DescendantNamed(&["input", "field", "textarea"]), 0.2, "contains input fields"),
            ev(Cue::DescendantNamed(&["submit", "button"]), 0.1, "contains a submit control"),
            ev(Cue::Axis(LayoutMode::Vertical), 0.05, "stacked vertically"),
        ],
    },
    LeafProfile {
        component: T::AspectRatio,
        keywords: &["aspect ratio", "aspectratio", "ratio box"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[ev(Cue::ImageFill, 0.1, "image fill")],
    },
    LeafProfile {
        component: T::Avatar,
        keywords: &["avatar", "profile picture", "profile photo", "user photo", "user image"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::Circular, 0.2, "circular"),
            ev(Cue::ImageFill, 0.1, "image fill"),
            ev(Cue::WidthBetween(16.0, 128.0), 0.05, "avatar-sized"),
        ],
    },
    LeafProfile {
        component: T::Badge,
        keywords: &["badge", "tag", "chip", "pill"],
        variants: &["default", "secondary", "destructive", "outline"],
        states: NO_VALUES,
        evidence: &[
            ev(Cue::HeightBetween(14.0, 30.0), 0.1, "badge height"),
            ev(Cue::Pill, 0.1, "pill shape"),
            ev(Cue::SingleTextChild, 0.1, "single label"),
        ],
    },
    LeafProfile {
        component: T::Image,
        keywords: &["image", "img", "photo", "picture", "illustration", "thumbnail", "cover"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[ev(Cue::ImageFill, 0.45, "image fill")],
    },
    LeafProfile {
        component: T::Separator,
        keywords: &["separator", "divider", "hr", "rule"],
        variants: &["horizontal", "vertical"],
        states: NO_VALUES,
        evidence: &[
            ev(Cue::Thin, 0.45, "hairline geometry"),
            ev(Cue::IsKind(NodeKind::Line), 0.1, "line layer"),
        ],
    },
    LeafProfile {
        component: T::Label,
        keywords: &["label", "caption", "field label"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::IsText, 0.1, "text layer"),
            ev(Cue::ShortText(4), 0.05, "short text"),
        ],
    },
    LeafProfile {
        component: T::Link,
        keywords: &["link", "anchor", "hyperlink"],
        variants: NO_VALUES,
        states: &["default", "hover", "visited", "active"],
        evidence: &[
            ev(Cue::IsText, 0.1, "text layer"),
            ev(Cue::ShortText(5), 0.05, "short text"),
        ],
    },
    LeafProfile {
        component: T::Heading,
        keywords: &["heading", "headline", "title", "h1", "h2", "h3", "h4"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::IsText, 0.15, "text layer"),
            ev(Cue::FontSizeAtLeast(24.0), 0.3, "display font size"),
            ev(Cue::FontWeightAtLeast(600.0), 0.1, "bold weight"),
        ],
    },
    LeafProfile {
        component: T::Text,
        keywords: &["text", "paragraph", "body", "description", "subtitle", "copy"],
        variants: NO_VALUES,
        states: NO_VALUES,
        evidence: &[
            ev(Cue::IsText, 0.35, "text layer"),
            ev(Cue::TextNodesAtLeast(1), 0.1, "has text content"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DesignNode;

    fn score(component: ComponentType, node: &DesignNode) -> Classification {
        ProfileScorer::for_type(component)
            .expect("profile exists")
            .score(&NodeFacts::extract(node))
    }

    #[test]
    fn test_profiles_are_unique() {
        for (i, p) in PROFILES.iter().enumerate() {
            assert!(
                PROFILES[i + 1..].iter().all(|q| q.component != p.component),
                "duplicate profile for {}",
                p.component
            );
        }
    }

    #[test]
    fn test_exact_name_match() {
        let c = score(T::Dialog, &DesignNode::frame("Modal"));
        assert!((c.confidence - NAME_EXACT).abs() < 1e-9);
        assert_eq!(c.reasons, vec!["+0.50 name matches 'modal'"]);
    }

    #[test]
    fn test_sub_part_names_are_penalized() {
        let whole = score(T::Card, &DesignNode::frame("Card"));
        let part = score(T::Card, &DesignNode::frame("Card Header"));
        assert!(part.confidence < whole.confidence);
        assert!(part.reasons.iter().any(|r| r.contains("'header' sub-part")));
    }

    #[test]
    fn test_matched_keyword_words_are_not_parts() {
        let c = score(T::Tabs, &DesignNode::frame("Tab List"));
        assert!(c.reasons.iter().all(|r| !r.contains("sub-part")));
    }

    #[test]
    fn test_tooltip_penalized_by_sections() {
        let plain = DesignNode::frame("Tooltip")
            .with_size(120.0, 32.0)
            .with_children(vec![DesignNode::text("Text", "Copy link")]);
        let sectioned = DesignNode::frame("Tooltip").with_size(120.0, 32.0).with_children(vec![
            DesignNode::frame("Header"),
            DesignNode::frame("Content"),
            DesignNode::frame("Footer"),
        ]);
        let a = score(T::Tooltip, &plain);
        let b = score(T::Tooltip, &sectioned);
        assert!(a.confidence >= 0.4);
        assert!(b.confidence < 0.4);
        assert!(b.reasons.iter().any(|r| r.contains("imply HoverCard")));
    }

    #[test]
    fn test_hover_card_penalized_by_arrow() {
        let node = DesignNode::frame("Hover Card").with_children(vec![
            DesignNode::frame("Arrow"),
            DesignNode::text("Text", "Details"),
        ]);
        let c = score(T::HoverCard, &node);
        assert!(c.confidence < 0.4);
        assert!(c.reasons.iter().any(|r| r.contains("implies Tooltip")));
    }

    #[test]
    fn test_table_vs_carousel() {
        let slides = DesignNode::frame("Gallery Table").with_children(vec![
            DesignNode::frame("Previous"),
            DesignNode::frame("Slide 1"),
            DesignNode::frame("Next"),
        ]);
        assert!(score(T::Table, &slides).confidence < 0.4);

        let rows = DesignNode::frame("Carousel").with_children(vec![
            DesignNode::frame("Row 1"),
            DesignNode::frame("Cell"),
        ]);
        assert!(score(T::Carousel, &rows).confidence < 0.4);
    }

    #[test]
    fn test_progress_vs_chart() {
        let chart_like = DesignNode::frame("Progress").with_children(vec![
            DesignNode::frame("Legend"),
            DesignNode::frame("Axis"),
        ]);
        assert!(score(T::Progress, &chart_like).confidence < 0.4);

        let bar = DesignNode::frame("Chart").with_size(300.0, 8.0);
        assert!(score(T::Chart, &bar).confidence < 0.4);
    }

    #[test]
    fn test_skeleton_with_text_is_penalized() {
        let node = DesignNode::frame("Skeleton").with_children(vec![DesignNode::text("Text", "Hello")]);
        assert!(score(T::Skeleton, &node).confidence < 0.4);
    }

    #[test]
    fn test_empty_state_penalized_by_floating_sections() {
        let node = DesignNode::frame("Empty").with_shadow().with_children(vec![
            DesignNode::frame("Header"),
            DesignNode::frame("Content"),
            DesignNode::frame("Footer"),
        ]);
        assert!(score(T::EmptyState, &node).confidence < 0.4);
    }

    #[test]
    fn test_structure_alone_for_separator_and_image() {
        let line = DesignNode::new("Rectangle 4", NodeKind::Rectangle).with_size(320.0, 1.0);
        assert!(score(T::Separator, &line).confidence >= 0.4);
        let photo = DesignNode::new("Rectangle 5", NodeKind::Rectangle)
            .with_size(320.0, 200.0)
            .with_image_fill();
        assert!(score(T::Image, &photo).confidence >= 0.4);
    }

    #[test]
    fn test_text_layers_named_like_components() {
        let cases = [
            ("Card", T::Card),
            ("Modal", T::Dialog),
            ("Table", T::Table),
            ("Notifications", T::Toast),
            ("Menu", T::DropdownMenu),
            ("Hint", T::Tooltip),
            ("Tab", T::Tabs),
            ("Tag", T::Badge),
        ];
        for (name, component) in cases {
            let node = DesignNode::text(name, name).with_size(80.0, 20.0);
            let c = score(component, &node);
            assert!(c.confidence < 0.4, "text layer '{name}' scored {} as {component}", c.confidence);
            assert!(c.reasons.iter().any(|r| r.contains("bare text layer")));
        }
        let frame = score(T::Card, &DesignNode::frame("Card"));
        assert!((frame.confidence - NAME_EXACT).abs() < 1e-9);

        let heading = DesignNode::text("Title", "Welcome").with_font(32.0, 700.0);
        assert!(score(T::Heading, &heading).reasons.iter().all(|r| !r.contains("bare text layer")));
    }

    #[test]
    fn test_variant_and_state_metadata() {
        let node = DesignNode::frame("Toggle")
            .with_property("Variant", "Outline")
            .with_property("State", "On");
        let c = score(T::Toggle, &node);
        assert!(c.reasons.iter().any(|r| r.contains("variant 'outline'")));
        assert!(c.reasons.iter().any(|r| r.contains("state 'on'")));
    }
}
