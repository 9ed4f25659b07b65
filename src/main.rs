use anyhow::{bail, Context};
use config::Config;
use theme::Theme;

mod config;
mod generator;
mod loader;
mod markdown;
mod metadata;
mod paginator;
mod theme;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = config::command().get_matches();
    let config = Config::from_matches(&matches)?;

    if config.output_dir.exists() && !config.output_dir.is_dir() {
        bail!("if output exists, it must be a directory.");
    }
    if !config.theme_dir.is_dir() {
        bail!("theme must be a directory.");
    }

    let theme = Theme::load(&config.theme_dir).context("while loading theme")?;
    let posts = loader::load_posts(&config)?;
    generator::publish(&config, &theme, &posts)?;

    Ok(())
}
