//! Inbound design tree
//!
//! A normalized export handed over by the loader: geometry is numeric, colors
//! are structured, and every optional facet defaults to "absent". The engine
//! only ever borrows these nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single layer of the design tree. Parents own their children exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub text: Option<TextFacet>,
    #[serde(default)]
    pub layout: LayoutFacets,
    /// Declared component-variant properties (`Variant`, `State`, `Size`, ...)
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<DesignNode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    #[default]
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Vector,
    BooleanOperation,
    Star,
    Polygon,
    Rectangle,
    Ellipse,
    Line,
    #[serde(other)]
    Other,
}

impl NodeKind {
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Frame | Self::Group | Self::Section | Self::Component | Self::ComponentSet | Self::Instance
        )
    }

    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            Self::Vector | Self::BooleanOperation | Self::Star | Self::Polygon
        )
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Line)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// 2x3 affine transform relative to the parent
    #[serde(default)]
    pub transform: Option<[[f64; 3]; 2]>,
}

impl Geometry {
    /// Position relative to the parent, preferring the transform when present.
    pub fn origin(&self) -> (f64, f64) {
        match self.transform {
            Some(t) => (t[0][2], t[1][2]),
            None => (self.x, self.y),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub stroke_weight: Option<f64>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            kind: PaintKind::Solid,
            visible: true,
            opacity: None,
            color: Some(color),
        }
    }

    pub fn image() -> Self {
        Self {
            kind: PaintKind::Image,
            visible: true,
            opacity: None,
            color: None,
        }
    }

    /// Visible and not fully transparent
    pub fn is_effective(&self) -> bool {
        self.visible
            && self.opacity.map_or(true, |o| o > 0.0)
            && self.color.as_ref().map_or(true, |c| c.a > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFacet {
    #[serde(default)]
    pub characters: String,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_weight: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutFacets {
    #[serde(default)]
    pub mode: LayoutMode,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default)]
    pub primary_align: Option<String>,
    #[serde(default)]
    pub counter_align: Option<String>,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub item_spacing: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

impl Padding {
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

fn default_true() -> bool {
    true
}

fn default_alpha() -> f64 {
    1.0
}

impl Default for DesignNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind: NodeKind::Frame,
            visible: true,
            geometry: Geometry::default(),
            style: Style::default(),
            text: None,
            layout: LayoutFacets::default(),
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

impl DesignNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn frame(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Frame)
    }

    pub fn text(name: impl Into<String>, characters: impl Into<String>) -> Self {
        let mut node = Self::new(name, NodeKind::Text);
        node.text = Some(TextFacet {
            characters: characters.into(),
            ..TextFacet::default()
        });
        node
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_children(mut self, children: Vec<DesignNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.geometry.width = width;
        self.geometry.height = height;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.geometry.x = x;
        self.geometry.y = y;
        self
    }

    pub fn with_fill(mut self) -> Self {
        self.style.fills.push(Paint::solid(Color::rgb(0.1, 0.1, 0.1)));
        self
    }

    pub fn with_image_fill(mut self) -> Self {
        self.style.fills.push(Paint::image());
        self
    }

    pub fn with_stroke(mut self) -> Self {
        self.style.strokes.push(Paint::solid(Color::rgb(0.8, 0.8, 0.8)));
        self.style.stroke_weight = Some(1.0);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.style.corner_radius = Some(radius);
        self
    }

    pub fn with_shadow(mut self) -> Self {
        self.style.effects.push(Effect {
            kind: EffectKind::DropShadow,
            visible: true,
            radius: Some(8.0),
        });
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_layout(mut self, mode: LayoutMode) -> Self {
        self.layout.mode = mode;
        self
    }

    pub fn with_font(mut self, size: f64, weight: f64) -> Self {
        let text = self.text.get_or_insert_with(TextFacet::default);
        text.font_size = Some(size);
        text.font_weight = Some(weight);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Visible direct children in document order
    pub fn visible_children(&self) -> impl Iterator<Item = &DesignNode> {
        self.children.iter().filter(|c| c.visible)
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text
            .as_ref()
            .map(|t| t.characters.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}
