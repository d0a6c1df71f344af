use serde::{Deserialize, Serialize};

/// The 10-color qualitative palette used for category fills (d3's
/// `schemeCategory10`). Categories past the 10th wrap around.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub background: String,
    pub tile_stroke: String,
    pub tile_stroke_width: f32,
    pub palette: Vec<String>,
    /// Fraction each palette color is blended toward white before use.
    pub fade: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Verdana, Geneva, sans-serif".to_string(),
            font_size: 10.0,
            text_color: "#111111".to_string(),
            background: "#FFFFFF".to_string(),
            tile_stroke: "#FFFFFF".to_string(),
            tile_stroke_width: 1.0,
            palette: CATEGORY10.iter().map(|c| c.to_string()).collect(),
            fade: 0.2,
        }
    }

    /// Palette with every entry lightened by `fade` toward white.
    pub fn faded_palette(&self) -> Vec<String> {
        self.palette
            .iter()
            .map(|color| fade_toward_white(color, self.fade))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

/// Ordinal category -> color mapping over a cyclic palette. The domain is
/// seeded from the top-level group names and extended on first use, so the
/// 11th distinct category reuses the 1st base hue.
#[derive(Debug, Clone)]
pub struct ColorScale {
    range: Vec<String>,
    domain: Vec<String>,
}

impl ColorScale {
    pub fn new(range: Vec<String>, domain: Vec<String>) -> Self {
        Self { range, domain }
    }

    pub fn from_theme(theme: &Theme, domain: Vec<String>) -> Self {
        Self::new(theme.faded_palette(), domain)
    }

    pub fn color(&mut self, category: &str) -> String {
        let index = match self.domain.iter().position(|entry| entry == category) {
            Some(index) => index,
            None => {
                self.domain.push(category.to_string());
                self.domain.len() - 1
            }
        };
        self.range[index % self.range.len()].clone()
    }
}

/// Blend a `#rrggbb` color `t` of the way toward white, per channel with
/// rounding. Unparsable colors pass through unchanged.
pub fn fade_toward_white(color: &str, t: f32) -> String {
    let Some((r, g, b)) = parse_hex_rgb(color) else {
        return color.to_string();
    };
    let blend = |c: u8| -> u8 { (c as f32 + (255.0 - c as f32) * t).round() as u8 };
    format!("#{:02x}{:02x}{:02x}", blend(r), blend(g), blend(b))
}

fn parse_hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_blends_each_channel_toward_white() {
        assert_eq!(fade_toward_white("#1f77b4", 0.2), "#4c92c3");
        assert_eq!(fade_toward_white("#000000", 0.2), "#333333");
        assert_eq!(fade_toward_white("#ffffff", 0.2), "#ffffff");
    }

    #[test]
    fn unparsable_color_passes_through() {
        assert_eq!(fade_toward_white("tomato", 0.2), "tomato");
    }

    #[test]
    fn scale_is_stable_and_appends_unknowns() {
        let mut scale = ColorScale::new(
            vec!["#aaa".to_string(), "#bbb".to_string()],
            vec!["Wii".to_string()],
        );
        assert_eq!(scale.color("Wii"), "#aaa");
        assert_eq!(scale.color("DS"), "#bbb");
        assert_eq!(scale.color("Wii"), "#aaa");
    }

    #[test]
    fn eleventh_category_reuses_first_hue() {
        let theme = Theme::classic();
        let mut scale = ColorScale::from_theme(&theme, Vec::new());
        let first = scale.color("cat-0");
        for i in 1..10 {
            scale.color(&format!("cat-{i}"));
        }
        assert_eq!(scale.color("cat-10"), first);
    }
}
