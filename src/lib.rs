#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod fetch;
pub mod hierarchy;
pub mod ir;
pub mod layout;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use dataset::Dataset;
pub use fetch::FetchError;
pub use hierarchy::Hierarchy;
pub use ir::RawNode;
pub use render::{render_legend_svg, render_page, render_treemap_svg};
pub use theme::{ColorScale, Theme};
