//! # Moon Phase Diagram Generator
//!
//! Renders one diagram per reference phase into the system temp directory
//! (`/tmp` on Linux) and reports each file as it is written.


use anyhow::Context;
use moon_phase_lib::{config::Config, lunar::reference_phases, PhaseRenderer};
use std::path::{Path, PathBuf};

/// Render every reference phase into `dir`, returning the written paths in cycle order.
fn render_all(renderer: &PhaseRenderer, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(8);
    for (name, phase) in reference_phases() {
        let path = dir.join(format!("{}.png", name));
        renderer
            .render(phase, &path)
            .with_context(|| format!("failed to render {}", path.display()))?;
        println!("Generated: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("moon_phase_lib=info".parse()?),
        )
        .init();

    let renderer = PhaseRenderer::new(Config::load());
    render_all(&renderer, &std::env::temp_dir())?;

    println!("\nPhase diagrams created successfully!");
    println!("They show the scenes the interactive view lets you explore.");
    Ok(())
}
