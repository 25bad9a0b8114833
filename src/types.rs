//! Core value types shared by every stage of the engine

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::node::DesignNode;

/// Closed set of UI roles a design node can play.
///
/// Declaration order carries no meaning; only pipeline order does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Accordion,
    Alert,
    AlertDialog,
    AspectRatio,
    Avatar,
    Badge,
    Breadcrumb,
    Button,
    Calendar,
    Card,
    Carousel,
    Chart,
    Checkbox,
    Collapsible,
    Combobox,
    Command,
    ContextMenu,
    DatePicker,
    Dialog,
    Drawer,
    DropdownMenu,
    EmptyState,
    Form,
    Heading,
    HoverCard,
    Icon,
    Image,
    Input,
    InputOtp,
    Label,
    Link,
    Menubar,
    NavigationMenu,
    Pagination,
    Popover,
    Progress,
    RadioGroup,
    Resizable,
    ScrollArea,
    Select,
    Separator,
    Sheet,
    Sidebar,
    Skeleton,
    Slider,
    Switch,
    Table,
    Tabs,
    Text,
    Textarea,
    Toast,
    Toggle,
    ToggleGroup,
    Tooltip,
    /// Universal fallback when no scorer clears the acceptance threshold
    Container,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accordion => "Accordion",
            Self::Alert => "Alert",
            Self::AlertDialog => "AlertDialog",
            Self::AspectRatio => "AspectRatio",
            Self::Avatar => "Avatar",
            Self::Badge => "Badge",
            Self::Breadcrumb => "Breadcrumb",
            Self::Button => "Button",
            Self::Calendar => "Calendar",
            Self::Card => "Card",
            Self::Carousel => "Carousel",
            Self::Chart => "Chart",
            Self::Checkbox => "Checkbox",
            Self::Collapsible => "Collapsible",
            Self::Combobox => "Combobox",
            Self::Command => "Command",
            Self::ContextMenu => "ContextMenu",
            Self::DatePicker => "DatePicker",
            Self::Dialog => "Dialog",
            Self::Drawer => "Drawer",
            Self::DropdownMenu => "DropdownMenu",
            Self::EmptyState => "EmptyState",
            Self::Form => "Form",
            Self::Heading => "Heading",
            Self::HoverCard => "HoverCard",
            Self::Icon => "Icon",
            Self::Image => "Image",
            Self::Input => "Input",
            Self::InputOtp => "InputOtp",
            Self::Label => "Label",
            Self::Link => "Link",
            Self::Menubar => "Menubar",
            Self::NavigationMenu => "NavigationMenu",
            Self::Pagination => "Pagination",
            Self::Popover => "Popover",
            Self::Progress => "Progress",
            Self::RadioGroup => "RadioGroup",
            Self::Resizable => "Resizable",
            Self::ScrollArea => "ScrollArea",
            Self::Select => "Select",
            Self::Separator => "Separator",
            Self::Sheet => "Sheet",
            Self::Sidebar => "Sidebar",
            Self::Skeleton => "Skeleton",
            Self::Slider => "Slider",
            Self::Switch => "Switch",
            Self::Table => "Table",
            Self::Tabs => "Tabs",
            Self::Text => "Text",
            Self::Textarea => "Textarea",
            Self::Toast => "Toast",
            Self::Toggle => "Toggle",
            Self::ToggleGroup => "ToggleGroup",
            Self::Tooltip => "Tooltip",
            Self::Container => "Container",
        }
    }

    /// Composite types own an internal slot structure and may contain other
    /// components. Composition traversal descends into these (and into
    /// generic containers) but stops at atomic controls.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Self::Accordion
                | Self::Alert
                | Self::AlertDialog
                | Self::Card
                | Self::Carousel
                | Self::Collapsible
                | Self::Command
                | Self::ContextMenu
                | Self::Dialog
                | Self::Drawer
                | Self::DropdownMenu
                | Self::EmptyState
                | Self::Form
                | Self::HoverCard
                | Self::Menubar
                | Self::NavigationMenu
                | Self::Popover
                | Self::Resizable
                | Self::ScrollArea
                | Self::Sheet
                | Self::Sidebar
                | Self::Table
                | Self::Tabs
                | Self::Toast
                | Self::Container
        )
    }

    /// Controls a user can act on directly.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Checkbox
                | Self::Combobox
                | Self::DatePicker
                | Self::Input
                | Self::InputOtp
                | Self::Link
                | Self::RadioGroup
                | Self::Select
                | Self::Slider
                | Self::Switch
                | Self::Textarea
                | Self::Toggle
                | Self::ToggleGroup
        )
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one classifier invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Always within [0, 1]
    pub confidence: f64,
    /// One entry per signal that moved the score
    pub reasons: Vec<String>,
}

impl Classification {
    pub fn new(component_type: ComponentType, confidence: f64, reasons: Vec<String>) -> Self {
        Self {
            component_type,
            confidence: clamp_unit(confidence),
            reasons,
        }
    }

    /// Fixed-confidence generic container, used when nothing else clears threshold.
    pub fn fallback(confidence: f64) -> Self {
        Self::new(
            ComponentType::Container,
            confidence,
            vec!["no classifier cleared the acceptance threshold".to_string()],
        )
    }

    pub fn exceeds_threshold(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }
}

/// Clamp to [0, 1]; NaN collapses to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Serialized stand-in for a node reference in outbound results
#[derive(Debug, Clone, Serialize)]
pub struct NodeRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a DesignNode> for NodeRef<'a> {
    fn from(node: &'a DesignNode) -> Self {
        Self {
            id: &node.id,
            name: &node.name,
        }
    }
}

pub(crate) fn serialize_node_refs<S>(nodes: &[&DesignNode], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(nodes.iter().map(|n| NodeRef::from(*n)))
}
