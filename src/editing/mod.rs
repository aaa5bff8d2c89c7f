// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Canvas state and interaction

pub mod canvas;
pub mod events;
pub mod mouse;
pub mod session;
pub mod viewport;

pub use canvas::ImageCanvas;
pub use events::{CanvasEvent, EventQueue};
pub use mouse::{Drag, Mouse, MouseButton, MouseDelegate, MouseEvent};
pub use session::{CanvasSession, CursorHint, ShapeDrawingState, VertexHit};
pub use viewport::{ViewPort, ZoomOutcome, ZoomRejection};
