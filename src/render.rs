use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::dataset::Dataset;
use crate::hierarchy::Hierarchy;
use crate::theme::{ColorScale, Theme};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// An uppercase letter followed by a non-uppercase one starts a new label
// fragment (approximate camel-case / word segmentation).
static LABEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new("[A-Z][^A-Z]").expect("label boundary regex"));

/// Split a tile name into stacked label fragments, breaking before each
/// uppercase letter that is not itself followed by another uppercase letter.
/// Names without such a boundary come back as a single fragment.
pub fn split_label(name: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut start = 0;
    for m in LABEL_BOUNDARY.find_iter(name) {
        if m.start() > start {
            fragments.push(name[start..m.start()].to_string());
            start = m.start();
        }
    }
    fragments.push(name[start..].to_string());
    fragments
}

/// Draw one tile per leaf: a colored rectangle carrying the node's
/// name/category/value as inspectable attributes, plus the stacked label.
pub fn render_treemap_svg(
    hierarchy: &Hierarchy,
    scale: &mut ColorScale,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let width = config.inner_width();
    let height = config.inner_height();

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"tree-map\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for leaf_id in hierarchy.leaves() {
        let leaf = hierarchy.node(leaf_id);
        let x = leaf.rect.x0 + config.margin.left;
        let y = leaf.rect.y0 + config.margin.top;
        let category = leaf.category.as_deref().unwrap_or("");
        let fill = scale.color(category);

        svg.push_str(&format!(
            "<g class=\"group\" transform=\"translate({x:.2},{y:.2})\">"
        ));
        svg.push_str(&format!(
            "<rect id=\"{}\" class=\"tile\" width=\"{:.2}\" height=\"{:.2}\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            escape_xml(&leaf.id),
            leaf.rect.width(),
            leaf.rect.height(),
            escape_xml(&leaf.name),
            escape_xml(category),
            leaf.value,
            fill,
            theme.tile_stroke,
            theme.tile_stroke_width,
        ));

        svg.push_str(&format!(
            "<text class=\"tile-text\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
            theme.font_family, theme.font_size, theme.text_color
        ));
        for (i, fragment) in split_label(&leaf.name).into_iter().enumerate() {
            let line_y = config.label_offset_y + i as f64 * config.label_line_height;
            svg.push_str(&format!(
                "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
                config.label_offset_x,
                line_y,
                escape_xml(&fragment)
            ));
        }
        svg.push_str("</text>");
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

/// Draw one swatch + label per category, wrapped into rows of
/// `floor(legendWidth / hSpacing)` columns.
pub fn render_legend_svg(
    categories: &[String],
    scale: &mut ColorScale,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let legend = &config.legend;
    let columns = legend.columns_per_row();
    let rows = categories.len().div_ceil(columns).max(1);
    let height =
        legend.offset + rows as f64 * (legend.rect_size + legend.v_spacing) + legend.rect_size;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"legend\" width=\"{}\" height=\"{height}\">",
        legend.width
    ));
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">",
        legend.translate_x, legend.offset
    ));

    for (i, category) in categories.iter().enumerate() {
        let column = i % columns;
        let row = i / columns;
        let x = column as f64 * legend.h_spacing;
        let y = row as f64 * legend.rect_size + legend.v_spacing * row as f64;
        svg.push_str(&format!("<g transform=\"translate({x},{y})\">"));
        svg.push_str(&format!(
            "<rect class=\"legend-item\" width=\"{size}\" height=\"{size}\" fill=\"{}\"/>",
            scale.color(category),
            size = legend.rect_size,
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            legend.rect_size + legend.text_x_offset,
            legend.rect_size + legend.text_y_offset,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            escape_xml(category)
        ));
        svg.push_str("</g>");
    }

    svg.push_str("</g>");
    svg.push_str("</svg>");
    svg
}

/// Wrap the two SVGs in a self-contained page: dataset title and
/// description up top, a floating tooltip that follows the pointer over the
/// tiles (opacity 0 -> 0.9, offset +10/-28) and hides on pointer-out.
pub fn render_page(
    dataset: &Dataset,
    treemap_svg: &str,
    legend_svg: &str,
    theme: &Theme,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: {font}; background: {background}; text-align: center; }}
#tooltip {{
  position: absolute;
  padding: 8px;
  background: rgba(0, 0, 0, 0.75);
  color: #fff;
  border-radius: 4px;
  pointer-events: none;
  opacity: 0;
}}
</style>
</head>
<body>
<h1 id="title">{title}</h1>
<p id="description">{description}</p>
<div id="main">
{treemap}
{legend}
<div id="tooltip"></div>
</div>
<script>
var tooltip = document.getElementById('tooltip');
document.querySelectorAll('.tile').forEach(function (tile) {{
  tile.addEventListener('mousemove', function (event) {{
    tooltip.style.opacity = 0.9;
    tooltip.innerHTML =
      'Name: ' + tile.getAttribute('data-name') +
      '<br>Category: ' + tile.getAttribute('data-category') +
      '<br>Value: ' + tile.getAttribute('data-value');
    tooltip.setAttribute('data-value', tile.getAttribute('data-value'));
    tooltip.style.left = event.pageX + 10 + 'px';
    tooltip.style.top = event.pageY - 28 + 'px';
  }});
  tile.addEventListener('mouseout', function () {{
    tooltip.style.opacity = 0;
  }});
}});
</script>
</body>
</html>
"#,
        title = escape_xml(dataset.title),
        description = escape_xml(dataset.description),
        font = theme.font_family,
        background = theme.background,
        treemap = treemap_svg,
        legend = legend_svg,
    )
}

pub fn write_output(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)?;
        }
        None => {
            print!("{}", contents);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(1000.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
