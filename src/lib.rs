// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Image Canvas: a viewport engine for very large images, with vector shape
//! overlays and a pointer-driven tool engine.
//!
//! [`ImageCanvas`] is the entry point. Attach an [`ImageSource`], pick a
//! tool, feed it pointer events in canvas coordinates and drain the
//! [`CanvasEvent`]s it produces.

use std::path::PathBuf;

pub mod config;
pub mod editing;
pub mod error;
pub mod geometry;
pub mod model;
pub mod replay;
pub mod settings;
pub mod tools;

pub use config::CanvasConfig;
pub use editing::{CanvasEvent, CanvasSession, ImageCanvas, MouseButton, ViewPort, ZoomOutcome};
pub use error::{CanvasError, Result};
pub use geometry::{ImageExtent, ImagePoint, ImageRect};
pub use model::{ArraySource, GradientSource, ImageSource, ShapeId, ShapeKind, ShapeStyle, VectorShape};
pub use tools::ToolId;

/// Entry point for the `canvas-replay` binary
pub fn run() -> anyhow::Result<()> {
    // Log to stderr (RUST_LOG controls the level); stdout carries the summary
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("image_canvas=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(script) = args.get(1).map(PathBuf::from) else {
        tracing::error!("Usage: canvas-replay <script.json> [config.toml]");
        anyhow::bail!("missing script path");
    };

    let config = match args.get(2) {
        Some(path) => {
            tracing::info!("Loading config from: {}", path);
            CanvasConfig::load(path)?
        }
        None => CanvasConfig::default(),
    };

    replay::run_script(&script, config)
}
