//! Element schema for the artboard.
//!
//! The scene is a flat, z-ordered list of [`Element`]s. Hierarchy is encoded
//! twice on purpose: a group lists its children in order, and each child
//! points back via `parent_id`. Every scene operation keeps both sides in
//! agreement.

use crate::error::{DocumentError, ValidationError};
use crate::geometry::normalize_rotation;
use crate::id::ElementId;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Minimum width/height after a committed resize.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;
/// Minimum width/height while a resize gesture is still live.
pub const MIN_LIVE_ELEMENT_SIZE: f64 = 10.0;
pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MIN_LINE_HEIGHT: f64 = 10.0;

/// Ordered child list of a group. Most groups hold a handful of elements.
pub type ChildList = SmallVec<[ElementId; 4]>;

// ─── Color ───────────────────────────────────────────────────────────────

/// 8-bit RGBA color, serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Default rectangle fill.
    pub const NAVY: Color = Color::rgb(0x1E, 0x3A, 0x8A);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
                Some(Self::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color `{value}`"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

// ─── Per-type payloads ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// How a text box reacts to content changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextResizing {
    #[default]
    AutoWidth,
    AutoHeight,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RectangleProps {
    pub color: Color,
    pub corner_radius: f64,
    pub border_width: f64,
    pub border_color: Color,
    pub shadow_blur: f64,
    pub shadow_color: Color,
}

impl Default for RectangleProps {
    fn default() -> Self {
        Self {
            color: Color::NAVY,
            corner_radius: 0.0,
            border_width: 0.0,
            border_color: Color::BLACK,
            shadow_blur: 0.0,
            shadow_color: Color::rgba(0, 0, 0, 64),
        }
    }
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_weight() -> u16 {
    400
}

fn default_line_height() -> f64 {
    20.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// Required: a text element without content is malformed.
    pub content: String,
    #[serde(default = "text_default_color")]
    pub color: Color,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    #[serde(default)]
    pub letter_spacing: f64,
    /// Line height in pixels.
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub horizontal_align: HorizontalAlign,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
    #[serde(default)]
    pub text_resizing: TextResizing,
}

fn text_default_color() -> Color {
    Color::BLACK
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            color: text_default_color(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            letter_spacing: 0.0,
            line_height: default_line_height(),
            horizontal_align: HorizontalAlign::default(),
            vertical_align: VerticalAlign::default(),
            text_resizing: TextResizing::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    /// Set while the real image dimensions are being probed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub loading: bool,
}

/// Groups carry no payload of their own: transparent fill, dashed outline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupProps {}

/// Type tag plus type-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementData {
    Rectangle(RectangleProps),
    Text(TextProps),
    Image(ImageProps),
    Group(GroupProps),
}

/// The element type without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Text,
    Image,
    Group,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Group => "group",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(ElementKind::Rectangle),
            "text" => Ok(ElementKind::Text),
            "image" => Ok(ElementKind::Image),
            "group" => Ok(ElementKind::Group),
            other => Err(DocumentError::UnknownElementType(other.to_string())),
        }
    }
}

// ─── Element ─────────────────────────────────────────────────────────────

fn default_visible() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

/// A placed design object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,

    /// Optional user-facing label shown in the layer list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Degrees, kept in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,

    /// Owned children in paint order. Only groups have any.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub children: ChildList,

    /// Transient UI flag, never persisted.
    #[serde(skip)]
    pub selected: bool,

    #[serde(default = "default_visible", skip_serializing_if = "is_true")]
    pub visible: bool,

    #[serde(flatten)]
    pub data: ElementData,
}

impl Element {
    /// A bare element of the given payload at the given bounds.
    pub fn new(id: ElementId, data: ElementData, bounds: Rect) -> Self {
        Self {
            id,
            name: None,
            x: bounds.x0,
            y: bounds.y0,
            width: bounds.width(),
            height: bounds.height(),
            rotation: 0.0,
            parent_id: None,
            children: SmallVec::new(),
            selected: false,
            visible: true,
            data,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self.data {
            ElementData::Rectangle(_) => ElementKind::Rectangle,
            ElementData::Text(_) => ElementKind::Text,
            ElementData::Image(_) => ElementKind::Image,
            ElementData::Group(_) => ElementKind::Group,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.data, ElementData::Group(_))
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Axis-aligned bounds, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn rectangle(&self) -> Option<&RectangleProps> {
        match &self.data {
            ElementData::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextProps> {
        match &self.data {
            ElementData::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageProps> {
        match &self.data {
            ElementData::Image(i) => Some(i),
            _ => None,
        }
    }

    /// Keep `corner_radius <= min(width, height) / 2`.
    pub fn clamp_corner_radius(&mut self) {
        let max = self.width.min(self.height) / 2.0;
        if let ElementData::Rectangle(r) = &mut self.data {
            r.corner_radius = r.corner_radius.clamp(0.0, max.max(0.0));
        }
    }

    /// Apply a property update. Returns `false` when the property does not
    /// exist on this element type, leaving it untouched.
    pub fn apply(&mut self, update: &PropertyUpdate) -> bool {
        match (update, &mut self.data) {
            (PropertyUpdate::FillColor(c), ElementData::Rectangle(r)) => r.color = *c,
            (PropertyUpdate::FillColor(c), ElementData::Text(t)) => t.color = *c,
            (PropertyUpdate::CornerRadius(v), ElementData::Rectangle(r)) => {
                let max = (self.width.min(self.height) / 2.0).max(0.0);
                r.corner_radius = v.clamp(0.0, max);
            }
            (PropertyUpdate::BorderWidth(v), ElementData::Rectangle(r)) => {
                r.border_width = v.max(0.0)
            }
            (PropertyUpdate::BorderColor(c), ElementData::Rectangle(r)) => r.border_color = *c,
            (PropertyUpdate::ShadowBlur(v), ElementData::Rectangle(r)) => r.shadow_blur = v.max(0.0),
            (PropertyUpdate::ShadowColor(c), ElementData::Rectangle(r)) => r.shadow_color = *c,
            (PropertyUpdate::FontSize(v), ElementData::Text(t)) => {
                t.font_size = v.max(MIN_FONT_SIZE)
            }
            (PropertyUpdate::FontWeight(w), ElementData::Text(t)) => {
                t.font_weight = (*w).clamp(100, 900)
            }
            (PropertyUpdate::LetterSpacing(v), ElementData::Text(t)) => t.letter_spacing = *v,
            (PropertyUpdate::LineHeight(v), ElementData::Text(t)) => {
                t.line_height = v.max(MIN_LINE_HEIGHT)
            }
            (PropertyUpdate::HorizontalAlign(a), ElementData::Text(t)) => t.horizontal_align = *a,
            (PropertyUpdate::VerticalAlign(a), ElementData::Text(t)) => t.vertical_align = *a,
            (PropertyUpdate::TextResizing(m), ElementData::Text(t)) => t.text_resizing = *m,
            (PropertyUpdate::Content(s), ElementData::Text(t)) => t.content = s.clone(),
            (PropertyUpdate::ImageSource(s), ElementData::Image(i)) => i.src = s.clone(),
            (PropertyUpdate::Rotation(deg), _) => self.rotation = normalize_rotation(*deg),
            (PropertyUpdate::Position { x, y }, _) => {
                self.x = x.round();
                self.y = y.round();
            }
            (PropertyUpdate::Name(name), _) => self.name = name.clone(),
            _ => return false,
        }
        true
    }
}

/// A typed single-property edit coming from the inspector panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyUpdate {
    /// Rectangle fill or text color.
    FillColor(Color),
    CornerRadius(f64),
    BorderWidth(f64),
    BorderColor(Color),
    ShadowBlur(f64),
    ShadowColor(Color),
    FontSize(f64),
    FontWeight(u16),
    LetterSpacing(f64),
    LineHeight(f64),
    HorizontalAlign(HorizontalAlign),
    VerticalAlign(VerticalAlign),
    TextResizing(TextResizing),
    Content(String),
    ImageSource(String),
    Rotation(f64),
    /// Absolute position. Groups should be moved through the scene move
    /// operations so their subtree follows.
    Position { x: f64, y: f64 },
    /// Absolute size. Only the scene updates understand it: they route it
    /// through a resize so corner radii and group subtrees follow.
    Size { width: f64, height: f64 },
    Name(Option<String>),
}

// ─── Validation ──────────────────────────────────────────────────────────

/// Check the structural requirements for an element coming from outside.
pub fn validate_element(el: &Element) -> Result<(), ValidationError> {
    if el.id.is_empty() {
        return Err(ValidationError::MissingId);
    }
    if !el.x.is_finite() || !el.y.is_finite() {
        return Err(ValidationError::InvalidPosition {
            id: el.id,
            x: el.x,
            y: el.y,
        });
    }
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(el.width) || !positive(el.height) {
        return Err(ValidationError::InvalidSize {
            id: el.id,
            width: el.width,
            height: el.height,
        });
    }
    match &el.data {
        ElementData::Image(img) if img.src.trim().is_empty() => {
            Err(ValidationError::MissingImageSource { id: el.id })
        }
        ElementData::Group(_) => Ok(()),
        _ if !el.children.is_empty() => Err(ValidationError::ChildrenOnLeaf {
            id: el.id,
            count: el.children.len(),
        }),
        _ => Ok(()),
    }
}

pub fn is_valid_element(el: &Element) -> bool {
    validate_element(el).is_ok()
}
