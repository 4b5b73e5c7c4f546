//! Overlay Compositor Layout Model
//!
//! Defines the core data contracts of the compositor:
//! - **Geometry:** Draw rectangles and the contain/cover fitting rules
//! - **Layout:** Layout modes, canvas sizes, overlay dimensions, base placement
//! - **Drag:** Pointer-driven repositioning of the base image
//! - **Commands:** Typed UI commands consumed by a session
//! - **Persisted:** Settings schema and the key-value stores backing it
//!
//! All coordinates are canvas pixels with the origin at the top-left corner.

pub mod command;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod persisted;

pub use command::*;
pub use drag::*;
pub use error::*;
pub use geometry::*;
pub use layout::*;
pub use persisted::*;
