use anyhow::{Context, Result};
use clap::Parser;
use overtext::cli::Cli;
use overtext::debug;
use overtext_config::OsdConfig;
use overtext_fonts::SystemFontResolver;
use overtext_render::{CanvasBackend, CanvasGeometry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level takes highest precedence, then RUST_LOG, then config (applied below)
    debug::init_log_bridge(cli.log_level);

    let mut config = match &cli.config {
        Some(path) => OsdConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => OsdConfig::load().context("Failed to load config")?,
    };
    debug::apply_config_level(config.log_level.to_level_filter());

    cli.apply_overrides(&mut config);
    config.validate().context("Invalid settings")?;

    log::info!("Starting overtext-preview");

    let resolver = SystemFontResolver::new();
    let mut renderer = overtext::renderer_from_config::<CanvasGeometry>(&config, &resolver)
        .with_context(|| format!("Failed to create renderer for '{}'", config.font_name))?;

    let mut canvas = CanvasBackend::with_background(cli.width, cli.height, cli.background);
    renderer.render(&mut canvas, cli.width, cli.height, cli.text());

    canvas
        .save_png(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    log::info!(
        "Rendered {} glyph draws ({} distinct glyphs) to {:?}",
        canvas.draw_count(),
        renderer.cached_glyph_count(),
        cli.output
    );
    println!("{}", cli.output.display());
    Ok(())
}
