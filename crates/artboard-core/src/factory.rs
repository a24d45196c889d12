//! Element factory: type-specific defaults and placement.

use crate::config::{ArtboardDimensions, EditorConfig};
use crate::geometry::fit_within;
use crate::id::ElementId;
use crate::model::*;
use kurbo::{Point, Rect, Size};

/// Where a new element goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub artboard: ArtboardDimensions,
    /// Center of the new element. `None` centers it on the artboard.
    pub position: Option<Point>,
}

impl Placement {
    pub fn centered(artboard: ArtboardDimensions) -> Self {
        Self {
            artboard,
            position: None,
        }
    }

    pub fn at(artboard: ArtboardDimensions, position: Point) -> Self {
        Self {
            artboard,
            position: Some(position),
        }
    }

    fn bounds_for(&self, size: Size) -> Rect {
        let center = self.position.unwrap_or_else(|| self.artboard.center());
        let origin = Point::new(
            (center.x - size.width / 2.0).round(),
            (center.y - size.height / 2.0).round(),
        );
        Rect::from_origin_size(origin, size)
    }
}

/// Default size for a freshly created element of `kind`.
pub fn default_size(kind: ElementKind, config: &EditorConfig) -> Size {
    match kind {
        ElementKind::Rectangle => Size::new(150.0, 75.0),
        ElementKind::Text => Size::new(100.0, 20.0),
        ElementKind::Image => config.image_placeholder_size(),
        ElementKind::Group => Size::new(200.0, 150.0),
    }
}

/// Create a new element with type defaults.
///
/// Images get a random placeholder picture from the configured provider.
pub fn create_element(kind: ElementKind, placement: &Placement, config: &EditorConfig) -> Element {
    let id = ElementId::generate();
    let bounds = placement.bounds_for(default_size(kind, config));
    let data = match kind {
        ElementKind::Rectangle => ElementData::Rectangle(RectangleProps::default()),
        ElementKind::Text => ElementData::Text(TextProps::default()),
        ElementKind::Image => ElementData::Image(ImageProps {
            src: config.placeholder_url(id.as_str()),
            loading: false,
        }),
        ElementKind::Group => ElementData::Group(GroupProps::default()),
    };
    let el = Element::new(id, data, bounds);
    log::trace!("created {} {}", kind, el.id);
    el
}

/// Create an image element right away at placeholder size, flagged as
/// loading. The real size arrives later through [`apply_image_size`].
pub fn create_image_element_immediate(
    src: &str,
    placement: &Placement,
    config: &EditorConfig,
) -> Element {
    let bounds = placement.bounds_for(config.image_placeholder_size());
    Element::new(
        ElementId::generate(),
        ElementData::Image(ImageProps {
            src: src.to_string(),
            loading: true,
        }),
        bounds,
    )
}

/// Final on-canvas size for an image whose natural size is `natural`.
/// Unknown or degenerate sizes fall back to the placeholder.
pub fn resolve_image_size(natural: Option<Size>, config: &EditorConfig) -> Size {
    natural
        .and_then(|n| fit_within(n, config.image_max_size()))
        .unwrap_or_else(|| config.image_placeholder_size())
}

/// Resize a loading image to `size` around its current center and clear
/// the loading flag. Non-image elements are left alone.
pub fn apply_image_size(el: &mut Element, size: Size) {
    let ElementData::Image(img) = &mut el.data else {
        return;
    };
    img.loading = false;
    let center = el.bounds().center();
    el.width = size.width;
    el.height = size.height;
    el.x = (center.x - size.width / 2.0).round();
    el.y = (center.y - size.height / 2.0).round();
}
