// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Scripted pointer sessions.
//!
//! A script names an image (or a synthetic gradient) and a list of input
//! steps. Replaying it drives an [`ImageCanvas`] exactly as a pointer would
//! and reports where the view and the shapes ended up.

use crate::config::CanvasConfig;
use crate::editing::{ImageCanvas, MouseButton};
use crate::geometry::{ImagePoint, ImageRect};
use crate::model::{ArraySource, GradientSource, ImageSource, ShapeId, ShapeKind};
use crate::tools::ToolId;
use anyhow::{Context, Result};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Synthetic image size used when a script names no image
const DEFAULT_GRADIENT: [usize; 2] = [512, 512];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Image file to attach, relative to the script
    #[serde(default)]
    pub image: Option<PathBuf>,
    /// `[rows, cols]` of a gradient to attach when no image is given
    #[serde(default)]
    pub gradient: Option<[usize; 2]>,
    /// `[width, height]` overriding the configured canvas size
    #[serde(default)]
    pub canvas: Option<[u32; 2]>,
    pub steps: Vec<Step>,
}

fn left() -> MouseButton {
    MouseButton::Left
}

/// One input step
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool { name: String },
    Kind { name: String },
    Down {
        x: f64,
        y: f64,
        #[serde(default = "left")]
        button: MouseButton,
    },
    Move { x: f64, y: f64 },
    Up {
        x: f64,
        y: f64,
        #[serde(default = "left")]
        button: MouseButton,
    },
    RightClick { x: f64, y: f64 },
    Wheel { x: f64, y: f64, delta: f64 },
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct ShapeSummary {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub image_coords: Vec<ImagePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Final state of a replayed session
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub tool: String,
    pub canvas: [u32; 2],
    pub region: ImageRect,
    pub decimation: u32,
    pub current_shape: Option<ShapeId>,
    pub shapes: Vec<ShapeSummary>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }

    fn source(&self, base: &Path) -> Result<Box<dyn ImageSource>> {
        if let Some(image) = &self.image {
            let path = base.join(image);
            let source = ArraySource::open(&path)
                .with_context(|| format!("opening image {}", path.display()))?;
            return Ok(Box::new(source));
        }
        let [rows, cols] = self.gradient.unwrap_or(DEFAULT_GRADIENT);
        Ok(Box::new(GradientSource::new(rows, cols)))
    }
}

/// Build a canvas for `script`, replay every step and summarize the result.
pub fn replay(script: &Script, base: &Path, mut config: CanvasConfig) -> Result<Summary> {
    if let Some([width, height]) = script.canvas {
        config.canvas_width = width;
        config.canvas_height = height;
    }
    let mut canvas = ImageCanvas::new(config);
    canvas.attach_source(script.source(base)?)?;
    log_events(&mut canvas);

    for (index, step) in script.steps.iter().enumerate() {
        apply_step(&mut canvas, step).with_context(|| format!("step {index}: {step:?}"))?;
        log_events(&mut canvas);
    }
    Ok(summarize(&canvas))
}

fn apply_step(canvas: &mut ImageCanvas, step: &Step) -> Result<()> {
    match step {
        Step::Tool { name } => canvas.set_tool(name.parse::<ToolId>()?),
        Step::Kind { name } => canvas.set_new_shape_kind(name.parse::<ShapeKind>()?),
        Step::Down { x, y, button } => canvas.pointer_down(Point::new(*x, *y), *button)?,
        Step::Move { x, y } => canvas.pointer_move(Point::new(*x, *y))?,
        Step::Up { x, y, button } => canvas.pointer_up(Point::new(*x, *y), *button)?,
        Step::RightClick { x, y } => {
            let pos = Point::new(*x, *y);
            canvas.pointer_down(pos, MouseButton::Right)?;
            canvas.pointer_up(pos, MouseButton::Right)?;
        }
        Step::Wheel { x, y, delta } => canvas.wheel(Point::new(*x, *y), *delta)?,
        Step::Resize { width, height } => {
            canvas.session_mut().set_canvas_size(*width, *height)?;
        }
    }
    Ok(())
}

fn log_events(canvas: &mut ImageCanvas) {
    for event in canvas.drain_events() {
        tracing::info!("{:?}", event);
    }
}

fn summarize(canvas: &ImageCanvas) -> Summary {
    let session = canvas.session();
    let (region, decimation) = session.viewport_extent();
    let (width, height) = session.viewport.canvas_size();
    Summary {
        tool: canvas.current_tool().to_string(),
        canvas: [width, height],
        region,
        decimation,
        current_shape: session.current_shape_id(),
        shapes: session
            .shapes
            .iter()
            .map(|shape| ShapeSummary {
                id: shape.id(),
                kind: shape.kind(),
                image_coords: shape.image_coords().to_vec(),
                text: shape.text.clone(),
            })
            .collect(),
    }
}

/// Load a script from disk, replay it and print the summary as JSON.
pub fn run_script(path: &Path, config: CanvasConfig) -> Result<()> {
    let script = Script::load(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let summary = replay(&script, base, config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "gradient": [200, 200],
        "canvas": [200, 200],
        "steps": [
            { "op": "kind", "name": "line" },
            { "op": "tool", "name": "NEW_SHAPE" },
            { "op": "down", "x": 10, "y": 10 },
            { "op": "move", "x": 60, "y": 40 },
            { "op": "up", "x": 80, "y": 50 },
            { "op": "tool", "name": "SHAPE_SELECT" },
            { "op": "down", "x": 12, "y": 11 },
            { "op": "up", "x": 12, "y": 11 }
        ]
    }"#;

    #[test]
    fn replay_draws_and_selects() {
        let script: Script = serde_json::from_str(SCRIPT).unwrap();
        let summary = replay(&script, Path::new("."), CanvasConfig::default()).unwrap();
        assert_eq!(summary.tool, "SHAPE_SELECT");
        assert_eq!(summary.canvas, [200, 200]);
        assert_eq!(summary.shapes.len(), 1);
        let line = &summary.shapes[0];
        assert_eq!(line.kind, ShapeKind::Line);
        assert_eq!(
            line.image_coords,
            vec![ImagePoint::new(10.0, 10.0), ImagePoint::new(50.0, 80.0)]
        );
        assert_eq!(summary.current_shape, Some(line.id));
    }

    #[test]
    fn unknown_tool_names_the_step() {
        let script: Script = serde_json::from_str(
            r#"{ "steps": [ { "op": "tool", "name": "LASSO" } ] }"#,
        )
        .unwrap();
        let err = replay(&script, Path::new("."), CanvasConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("step 0"));
        assert!(format!("{err:#}").contains("LASSO"));
    }

    #[test]
    fn steps_parse_with_default_button() {
        let step: Step = serde_json::from_str(r#"{ "op": "down", "x": 1.5, "y": 2 }"#).unwrap();
        assert_eq!(
            step,
            Step::Down {
                x: 1.5,
                y: 2.0,
                button: MouseButton::Left
            }
        );
    }
}
