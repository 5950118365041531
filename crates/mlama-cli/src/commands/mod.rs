//! CLI command implementations.

mod articles;
mod check;
mod render;

pub use articles::{run_articles, ArticlesArgs};
pub use check::{run_check, CheckArgs};
pub use render::{run_render, RenderArgs};
