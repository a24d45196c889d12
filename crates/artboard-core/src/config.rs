//! Editor configuration and artboard dimensions.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Size of the artboard surface elements are placed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtboardDimensions {
    pub width: f64,
    pub height: f64,
}

impl ArtboardDimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for ArtboardDimensions {
    fn default() -> Self {
        AspectRatio::Landscape.dimensions()
    }
}

/// Artboard presets offered by the document settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectRatio {
    /// 16:9
    Landscape,
    /// 9:16
    Portrait,
    /// 1:1
    Square,
    /// 4:3
    Classic,
}

impl AspectRatio {
    pub fn dimensions(self) -> ArtboardDimensions {
        match self {
            AspectRatio::Landscape => ArtboardDimensions::new(1024.0, 576.0),
            AspectRatio::Portrait => ArtboardDimensions::new(576.0, 1024.0),
            AspectRatio::Square => ArtboardDimensions::new(768.0, 768.0),
            AspectRatio::Classic => ArtboardDimensions::new(1024.0, 768.0),
        }
    }
}

/// Tunables for the editor.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Artboard size for new projects.
    pub artboard: ArtboardDimensions,

    /// Maximum number of undo steps kept. Oldest entries are dropped.
    pub history_limit: usize,

    /// Offset applied to pasted and duplicated elements.
    pub paste_offset: f64,

    /// Images larger than this are scaled down, preserving aspect ratio.
    pub image_max_size: (f64, f64),

    /// Size used for new images until their real dimensions are known.
    pub image_placeholder_size: (f64, f64),

    /// Random-image provider for freshly added image elements.
    /// `{seed}`, `{width}` and `{height}` are substituted.
    pub placeholder_image_url: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            artboard: ArtboardDimensions::default(),
            history_limit: 100,
            paste_offset: 20.0,
            image_max_size: (400.0, 400.0),
            image_placeholder_size: (150.0, 112.0),
            placeholder_image_url: "https://picsum.photos/seed/{seed}/{width}/{height}".into(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config, falling back to defaults for
    /// anything not specified.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn image_max_size(&self) -> Size {
        Size::new(self.image_max_size.0, self.image_max_size.1)
    }

    pub fn image_placeholder_size(&self) -> Size {
        Size::new(self.image_placeholder_size.0, self.image_placeholder_size.1)
    }

    pub fn placeholder_url(&self, seed: &str) -> String {
        let size = self.image_placeholder_size();
        self.placeholder_image_url
            .replace("{seed}", seed)
            .replace("{width}", &format!("{}", size.width.round() as i64))
            .replace("{height}", &format!("{}", size.height.round() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = EditorConfig::from_json_str(r#"{ "historyLimit": 5 }"#).unwrap();
        assert_eq!(cfg.history_limit, 5);
        assert_eq!(cfg.paste_offset, 20.0);
        assert_eq!(cfg.artboard, ArtboardDimensions::new(1024.0, 576.0));
    }

    #[test]
    fn placeholder_url_substitution() {
        let cfg = EditorConfig::default();
        assert_eq!(
            cfg.placeholder_url("abc"),
            "https://picsum.photos/seed/abc/150/112"
        );
    }

    #[test]
    fn aspect_ratio_of_presets() {
        let d = AspectRatio::Landscape.dimensions();
        assert!((d.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
        assert_eq!(AspectRatio::Square.dimensions().aspect_ratio(), 1.0);
    }
}
