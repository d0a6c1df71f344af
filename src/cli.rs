use crate::config::load_config;
use crate::dataset::Dataset;
use crate::fetch::{fetch_dataset, read_dataset};
use crate::hierarchy::Hierarchy;
use crate::layout;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_legend_svg, render_page, render_treemap_svg, write_output};
use crate::theme::ColorScale;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tmr", version, about = "Treemap renderer: hierarchical JSON to SVG/HTML/PNG")]
pub struct Args {
    /// Dataset key (videogames, movies, kickstarter); unknown or missing
    /// keys fall back to the default
    #[arg(short = 'd', long = "data")]
    pub data: Option<String>,

    /// Local JSON dataset, read instead of fetching the registry URL
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG/HTML if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "html")]
    pub output_format: OutputFormat,

    /// Where to write the legend SVG when the format is svg
    #[arg(long = "legendOutput")]
    pub legend_output: Option<PathBuf>,

    /// Config JSON file overriding theme/layout/legend defaults
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Html,
    #[cfg(feature = "png")]
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.layout.width = width;
        config.render.width = width as f32;
    }
    if let Some(height) = args.height {
        config.layout.height = height;
        config.render.height = height as f32;
    }

    let dataset = Dataset::select(args.data.as_deref());
    let raw = match &args.input {
        Some(path) => read_dataset(path)?,
        None => fetch_dataset(dataset.url)?,
    };

    let mut hierarchy = Hierarchy::build(&raw);
    layout::treemap(
        &mut hierarchy,
        config.layout.inner_width(),
        config.layout.inner_height(),
    );

    let mut scale = ColorScale::from_theme(&config.theme, hierarchy.top_level_names());
    let treemap_svg = render_treemap_svg(&hierarchy, &mut scale, &config.theme, &config.layout);
    let categories = hierarchy.leaf_categories();
    let legend_svg = render_legend_svg(&categories, &mut scale, &config.theme, &config.layout);

    match args.output_format {
        OutputFormat::Svg => {
            write_output(&treemap_svg, args.output.as_deref())?;
            if let Some(path) = &args.legend_output {
                write_output(&legend_svg, Some(path))?;
            }
        }
        OutputFormat::Html => {
            let page = render_page(dataset, &treemap_svg, &legend_svg, &config.theme);
            write_output(&page, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let output = args
                .output
                .clone()
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&treemap_svg, &output, &config.render, &config.theme)?;
        }
    }

    Ok(())
}
