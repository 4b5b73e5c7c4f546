//! Compositing session: the single owner of all mutable editor state.
//!
//! A [`Session`] holds the layout, drag controller, both optional images,
//! the export filename field and the settings store. Hosts feed it
//! [`Command`]s and image loads, then act on the returned [`Effect`]:
//! redraw the surface, or redraw and export it.

use compositor_common::error::{CompositorError, CompositorResult};
use compositor_layout_model::command::Command;
use compositor_layout_model::drag::DragController;
use compositor_layout_model::error::LayoutError;
use compositor_layout_model::geometry::ImageSource;
use compositor_layout_model::layout::{Axis, LayoutMode, LayoutState};
use compositor_layout_model::persisted::{LayoutSettings, SettingsStore};

use crate::compositor::{render, RenderStyle};
use crate::export::{is_export_shortcut, resolve_export_file_name};
use crate::surface::DrawingSurface;

/// Which image a load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Base,
    Overlay,
}

/// What the host should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing visible changed.
    None,
    /// The frame must be redrawn.
    Redraw,
    /// Redraw, then export the surface under `file_name`.
    Export { file_name: String },
}

/// Editor state for one compositing session.
pub struct Session<I: ImageSource> {
    layout: LayoutState,
    drag: DragController,
    base: Option<I>,
    overlay: Option<I>,
    filename: String,
    panel_visible: bool,
    style: RenderStyle,
    store: Box<dyn SettingsStore>,
}

impl<I: ImageSource> Session<I> {
    /// Start a session, restoring overlay size and layout from `store`.
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        let settings = LayoutSettings::load(store.as_ref());
        tracing::info!(
            layout = %settings.layout,
            overlay_width = settings.overlay_width,
            overlay_height = settings.overlay_height,
            "Session started"
        );
        Self {
            layout: LayoutState::from_settings(&settings),
            drag: DragController::new(),
            base: None,
            overlay: None,
            filename: String::new(),
            panel_visible: true,
            style: RenderStyle::default(),
            store,
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn base(&self) -> Option<&I> {
        self.base.as_ref()
    }

    pub fn overlay(&self) -> Option<&I> {
        self.overlay.as_ref()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    /// Install a decoded image, replacing whatever the slot held.
    ///
    /// Images with a zero dimension are rejected and the slot keeps its
    /// previous image.
    pub fn load_image(&mut self, slot: ImageSlot, image: I) -> CompositorResult<Effect> {
        let size = image.size().validate().map_err(layout_error)?;
        match slot {
            ImageSlot::Base => {
                self.layout.fit_base(size).map_err(layout_error)?;
                self.base = Some(image);
            }
            ImageSlot::Overlay => self.overlay = Some(image),
        }
        tracing::debug!(?slot, width = size.width, height = size.height, "Image loaded");
        Ok(Effect::Redraw)
    }

    pub fn load_base(&mut self, image: I) -> CompositorResult<Effect> {
        self.load_image(ImageSlot::Base, image)
    }

    pub fn load_overlay(&mut self, image: I) -> CompositorResult<Effect> {
        self.load_image(ImageSlot::Overlay, image)
    }

    /// Pasted images fill the base slot first, then replace the overlay.
    pub fn paste_image(&mut self, image: I) -> CompositorResult<ImageSlot> {
        let slot = if self.base.is_none() {
            ImageSlot::Base
        } else {
            ImageSlot::Overlay
        };
        self.load_image(slot, image)?;
        Ok(slot)
    }

    /// Apply one UI command.
    pub fn apply(&mut self, command: Command) -> CompositorResult<Effect> {
        tracing::trace!(?command, "Applying command");
        let effect = match command {
            Command::SetOverlayWidth { value } => self.set_overlay_dimension(Axis::Width, value),
            Command::SetOverlayHeight { value } => self.set_overlay_dimension(Axis::Height, value),
            Command::SetLayout { mode } => self.set_layout(mode)?,
            Command::PointerDown { x, y } => {
                self.drag.pointer_down(x, y, &self.layout);
                Effect::None
            }
            Command::PointerMove { x, y } => {
                if self.drag.pointer_move(x, y, &mut self.layout) {
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            Command::PointerUp => {
                self.drag.pointer_up();
                Effect::None
            }
            Command::PointerLeave => {
                self.drag.pointer_leave();
                Effect::None
            }
            Command::SetAxisLock {
                allow_vertical_move,
            } => {
                self.drag.set_axis_lock(allow_vertical_move);
                Effect::None
            }
            Command::ToggleAxisLock => {
                self.drag.toggle_axis_lock();
                Effect::None
            }
            Command::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                Effect::None
            }
            Command::SetFilename { value } => {
                self.filename = value;
                Effect::None
            }
            Command::Export => self.export_effect(),
            Command::KeyDown { key, alt } => {
                if is_export_shortcut(&key, alt) {
                    self.export_effect()
                } else {
                    Effect::None
                }
            }
        };
        Ok(effect)
    }

    /// Draw the current frame.
    pub fn render<S>(&self, surface: &mut S)
    where
        S: DrawingSurface<Image = I>,
    {
        render(
            surface,
            &self.layout,
            self.base.as_ref(),
            self.overlay.as_ref(),
            &self.style,
        );
    }

    fn set_layout(&mut self, mode: LayoutMode) -> CompositorResult<Effect> {
        let base_size = self.base.as_ref().map(ImageSource::size);
        self.layout
            .set_layout(mode, base_size)
            .map_err(layout_error)?;
        self.persist();
        Ok(Effect::Redraw)
    }

    fn set_overlay_dimension(&mut self, axis: Axis, value: i32) -> Effect {
        self.layout.set_overlay_dimension(axis, value);
        self.persist();
        Effect::Redraw
    }

    fn export_effect(&self) -> Effect {
        Effect::Export {
            file_name: resolve_export_file_name(&self.filename),
        }
    }

    /// Save layout settings. Store failures are logged, never surfaced.
    fn persist(&mut self) {
        if let Err(e) = self.layout.settings().save(self.store.as_mut()) {
            tracing::warn!(error = %e, "Failed to persist layout settings");
        }
    }
}

impl<I: ImageSource> std::fmt::Debug for Session<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("layout", &self.layout)
            .field("drag", &self.drag)
            .field("base", &self.base.as_ref().map(ImageSource::size))
            .field("overlay", &self.overlay.as_ref().map(ImageSource::size))
            .field("filename", &self.filename)
            .field("panel_visible", &self.panel_visible)
            .finish_non_exhaustive()
    }
}

fn layout_error(e: LayoutError) -> CompositorError {
    match e {
        LayoutError::InvalidDimension { width, height } => {
            CompositorError::invalid_dimension(width, height)
        }
        other => CompositorError::store(other.to_string()),
    }
}
