//! Overlay Compositor Render Engine
//!
//! Turns a session's layout and images into draw calls and exports the
//! finished canvas as PNG.
//!
//! # Pipeline Architecture
//!
//! ```text
//! UI command ──┐
//!              ├── Session ── LayoutState / DragController
//! image load ──┘      │
//!                     ├── render(): clear ── base ── highlight ── overlay
//!                     │                                              │
//!                     ▼                                              ▼
//!               Effect::Export ───────────────────────────► DrawingSurface
//!                                                                    │
//!                                                                    ▼
//!                                                           <filename>.png
//! ```

pub mod compositor;
pub mod export;
pub mod raster;
pub mod session;
pub mod surface;

pub use compositor::{render, RenderStyle};
pub use export::*;
pub use raster::{RasterImage, RasterSurface};
pub use session::{Effect, ImageSlot, Session};
pub use surface::*;
