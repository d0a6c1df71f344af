use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 10.0,
            left: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub width: f64,
    pub offset: f64,
    pub rect_size: f64,
    pub h_spacing: f64,
    pub v_spacing: f64,
    pub text_x_offset: f64,
    pub text_y_offset: f64,
    pub translate_x: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            offset: 10.0,
            rect_size: 15.0,
            h_spacing: 150.0,
            v_spacing: 10.0,
            text_x_offset: 3.0,
            text_y_offset: -2.0,
            translate_x: 60.0,
        }
    }
}

impl LegendConfig {
    pub fn columns_per_row(&self) -> usize {
        ((self.width / self.h_spacing).floor() as usize).max(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Logical canvas size before margins are subtracted.
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub label_offset_x: f64,
    pub label_offset_y: f64,
    pub label_line_height: f64,
    pub legend: LegendConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin::default(),
            label_offset_x: 4.0,
            label_offset_y: 13.0,
            label_line_height: 10.0,
            legend: LegendConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Drawing area left once the margins are taken off the canvas.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(1.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster size for PNG output.
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    background: Option<String>,
    tile_stroke: Option<String>,
    tile_stroke_width: Option<f32>,
    palette: Option<Vec<String>>,
    fade: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegendFile {
    width: Option<f64>,
    offset: Option<f64>,
    rect_size: Option<f64>,
    h_spacing: Option<f64>,
    v_spacing: Option<f64>,
    text_x_offset: Option<f64>,
    text_y_offset: Option<f64>,
    translate_x: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutFile {
    width: Option<f64>,
    height: Option<f64>,
    margin_top: Option<f64>,
    margin_right: Option<f64>,
    margin_bottom: Option<f64>,
    margin_left: Option<f64>,
    label_offset_x: Option<f64>,
    label_offset_y: Option<f64>,
    label_line_height: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<ThemeFile>,
    layout: Option<LayoutFile>,
    legend: Option<LegendFile>,
}

/// Load the default config, overlaying an optional JSON file. Every field
/// in the file is optional; absent fields keep their defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = theme.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = theme.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = theme.background {
            config.theme.background = v;
        }
        if let Some(v) = theme.tile_stroke {
            config.theme.tile_stroke = v;
        }
        if let Some(v) = theme.tile_stroke_width {
            config.theme.tile_stroke_width = v;
        }
        if let Some(v) = theme.palette
            && !v.is_empty()
        {
            config.theme.palette = v;
        }
        if let Some(v) = theme.fade {
            config.theme.fade = v.clamp(0.0, 1.0);
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.width {
            config.layout.width = v;
        }
        if let Some(v) = layout.height {
            config.layout.height = v;
        }
        if let Some(v) = layout.margin_top {
            config.layout.margin.top = v;
        }
        if let Some(v) = layout.margin_right {
            config.layout.margin.right = v;
        }
        if let Some(v) = layout.margin_bottom {
            config.layout.margin.bottom = v;
        }
        if let Some(v) = layout.margin_left {
            config.layout.margin.left = v;
        }
        if let Some(v) = layout.label_offset_x {
            config.layout.label_offset_x = v;
        }
        if let Some(v) = layout.label_offset_y {
            config.layout.label_offset_y = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
    }

    if let Some(legend) = parsed.legend {
        if let Some(v) = legend.width {
            config.layout.legend.width = v;
        }
        if let Some(v) = legend.offset {
            config.layout.legend.offset = v;
        }
        if let Some(v) = legend.rect_size {
            config.layout.legend.rect_size = v;
        }
        if let Some(v) = legend.h_spacing {
            config.layout.legend.h_spacing = v;
        }
        if let Some(v) = legend.v_spacing {
            config.layout.legend.v_spacing = v;
        }
        if let Some(v) = legend.text_x_offset {
            config.layout.legend.text_x_offset = v;
        }
        if let Some(v) = legend.text_y_offset {
            config.layout.legend.text_y_offset = v;
        }
        if let Some(v) = legend.translate_x {
            config.layout.legend.translate_x = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_canvas() {
        let config = Config::default();
        assert_eq!(config.layout.inner_width(), 980.0);
        assert_eq!(config.layout.inner_height(), 580.0);
        assert_eq!(config.layout.legend.columns_per_row(), 3);
    }

    #[test]
    fn overlay_merges_partial_file() {
        let dir = std::env::temp_dir().join("treemap-renderer-config-test");
        std::fs::create_dir_all(&dir).expect("tempdir");
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r#"{"layout": {"width": 800.0}, "legend": {"width": 300.0}, "theme": {"fade": 0.5}}"#,
        )
        .expect("write config");
        let config = load_config(Some(&path)).expect("load failed");
        assert_eq!(config.layout.width, 800.0);
        assert_eq!(config.layout.height, 600.0);
        assert_eq!(config.layout.legend.width, 300.0);
        assert_eq!(config.layout.legend.columns_per_row(), 2);
        assert_eq!(config.theme.fade, 0.5);
    }
}
