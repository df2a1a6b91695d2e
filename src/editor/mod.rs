//! Editor - the single owner of every surface and of the view state
//!
//! The host drives it through [`EditorControls`] plus a handful of inherent
//! operations (loading, tool selection, pointer input). Every state change
//! that affects the display re-renders synchronously before returning.


use crate::ai::AiRequest;
use crate::core::adapters::encode_png_data_url;
use crate::core::config::EditorConfig;
use crate::core::errors::EditorError;
use crate::core::geometry::{fit_surface, SurfaceSize};
use crate::file::{export_composite, ExportedImage, ImageResource};
use crate::input::{DisplayRect, InputRouter, PointerEvent, RoutedInput};
use crate::mask::{BinaryMask, BrushMode, BrushSettings, MaskLayer};
use crate::render::{DisplaySurface, ViewState};
use crate::tool::EditingTool;

pub use crate::core::config::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

/// Capability handed to the host once the editor is ready
pub trait EditorControls {
    /// Rotate 90 degrees clockwise; returns the new rotation
    fn rotate(&mut self) -> u16;
    /// Returns the stored (clamped) value
    fn set_brightness(&mut self, percent: i32) -> u8;
    /// Returns the stored (clamped) value
    fn set_contrast(&mut self, percent: i32) -> u8;
    fn clear_mask(&mut self) -> MaskUpdate;
    fn export(&self) -> Result<ExportedImage, EditorError>;
}

/// Mask notification for the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskUpdate {
    /// A stroke completed; the full current mask
    Updated(BinaryMask),
    /// The mask was wiped and is now absent
    Cleared,
}

impl MaskUpdate {
    /// PNG data URL, `None` for a cleared mask
    pub fn to_data_url(&self) -> Result<Option<String>, EditorError> {
        match self {
            MaskUpdate::Updated(mask) => Ok(Some(encode_png_data_url(&mask.to_png()?))),
            MaskUpdate::Cleared => Ok(None),
        }
    }
}

/// Identifies one load request; only the latest one may be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started before this one finished
    Discarded,
}

pub struct Editor {
    config: EditorConfig,
    image: Option<ImageResource>,
    view: ViewState,
    size: SurfaceSize,
    display: DisplaySurface,
    mask: MaskLayer,
    router: InputRouter,
    tool: EditingTool,
    brush: BrushSettings,
    current_mask: Option<BinaryMask>,
    load_generation: u64,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        let brush = BrushSettings {
            mode: BrushMode::Paint,
            size: config.default_brush_size,
        };
        let mask = MaskLayer::new(config.paint_color, config.mask_alpha_threshold);
        Ok(Self {
            config,
            image: None,
            view: ViewState::default(),
            size: SurfaceSize::default(),
            display: DisplaySurface::new(),
            mask,
            router: InputRouter::new(),
            tool: EditingTool::None,
            brush,
            current_mask: None,
            load_generation: 0,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&ImageResource> {
        self.image.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Display and mask surface size
    pub fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    pub fn display(&self) -> &DisplaySurface {
        &self.display
    }

    pub fn mask_layer(&self) -> &MaskLayer {
        &self.mask
    }

    pub fn tool(&self) -> EditingTool {
        self.tool
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    /// Last mask produced by a completed stroke, if not cleared since
    pub fn current_mask(&self) -> Option<&BinaryMask> {
        self.current_mask.as_ref()
    }

    /// Show a new image. Resets the tool, like a fresh upload.
    pub fn set_image(&mut self, image: ImageResource) {
        self.install(image);
        self.select_tool(EditingTool::None);
    }

    /// Replace the image with an AI result, keeping the tool.
    ///
    /// AI payloads are the composite, so rotation and tone are already baked
    /// into the result and the view goes back to identity.
    pub fn apply_ai_result(&mut self, image: ImageResource) -> MaskUpdate {
        self.view = ViewState::default();
        self.install(image);
        MaskUpdate::Cleared
    }

    fn install(&mut self, image: ImageResource) {
        let size = fit_surface(
            image.width(),
            image.height(),
            self.config.max_canvas_width,
            self.config.max_canvas_height,
        );
        tracing::info!(
            "Loaded image #{} ({}x{}) -> surface {}x{}",
            image.id().get(),
            image.width(),
            image.height(),
            size.width,
            size.height
        );
        self.size = size;
        self.mask.reset(size);
        self.current_mask = None;
        self.image = Some(image);
        self.redraw();
    }

    /// Start a load; results for older tickets will be discarded
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket {
            generation: self.load_generation,
        }
    }

    /// Apply a finished decode if its ticket is still current.
    ///
    /// A decode error for the current ticket is returned and leaves the
    /// previous image and frame untouched.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        decoded: Result<ImageResource, EditorError>,
    ) -> Result<LoadOutcome, EditorError> {
        if ticket.generation != self.load_generation {
            tracing::debug!(
                "Discarding stale load (ticket {}, current {})",
                ticket.generation,
                self.load_generation
            );
            return Ok(LoadOutcome::Discarded);
        }
        let image = decoded.map_err(|e| {
            tracing::warn!("Image load failed: {}", e);
            e
        })?;
        self.set_image(image);
        Ok(LoadOutcome::Applied)
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let ticket = self.begin_load();
        self.finish_load(ticket, ImageResource::decode(bytes))
            .map(|_| ())
    }

    /// Decode on tokio's blocking pool, then apply.
    ///
    /// Holds the editor for the whole decode, so no other load can start
    /// meanwhile. Hosts that keep handling commands during a decode should
    /// call [`Editor::begin_load`], await [`ImageResource::decode_async`]
    /// themselves, then hand the result to [`Editor::finish_load`].
    pub async fn load_bytes_async(&mut self, bytes: Vec<u8>) -> Result<LoadOutcome, EditorError> {
        let ticket = self.begin_load();
        let decoded = ImageResource::decode_async(bytes).await;
        self.finish_load(ticket, decoded)
    }

    pub fn load_data_url(&mut self, value: &str) -> Result<(), EditorError> {
        let ticket = self.begin_load();
        self.finish_load(ticket, ImageResource::from_data_url(value))
            .map(|_| ())
    }

    /// Switch tools. Leaving inpaint (or selecting any other tool) wipes
    /// the mask.
    pub fn select_tool(&mut self, tool: EditingTool) -> Option<MaskUpdate> {
        self.tool = tool;
        self.router.set_capturing(tool.captures_pointer());
        if tool.captures_pointer() {
            return None;
        }
        let had_mask = self.current_mask.is_some() || self.mask.is_drawing();
        self.wipe_mask();
        had_mask.then_some(MaskUpdate::Cleared)
    }

    pub fn set_brush_mode(&mut self, mode: BrushMode) {
        self.brush.mode = mode;
    }

    /// Clamped to the brush slider range; returns the stored size
    pub fn set_brush_size(&mut self, size: f32) -> f32 {
        if size.is_finite() {
            self.brush.size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        }
        self.brush.size
    }

    /// Feed one pointer event. Returns a mask update when a stroke completes.
    pub fn handle_pointer(&mut self, event: &PointerEvent, rect: DisplayRect) -> Option<MaskUpdate> {
        if self.image.is_none() {
            return None;
        }
        match self.router.route(event, rect, self.size) {
            RoutedInput::Begin(at) => {
                self.mask.begin_stroke(at, self.brush);
                None
            }
            RoutedInput::Extend(to) => {
                self.mask.extend_stroke(to);
                None
            }
            RoutedInput::End => {
                if !self.mask.end_stroke() {
                    return None;
                }
                let mask = self.mask.binarize();
                tracing::debug!(
                    "Stroke complete: {} of {} pixels masked",
                    mask.masked_pixel_count(),
                    self.size.pixel_count()
                );
                self.current_mask = Some(mask.clone());
                Some(MaskUpdate::Updated(mask))
            }
            RoutedInput::Ignored => None,
        }
    }

    /// Build the AI request for the active tool.
    ///
    /// Image payloads are the current composite, so a mask lines up with
    /// what the user painted over.
    pub fn ai_request(&self, prompt: &str, allow_nsfw: bool) -> Result<AiRequest, EditorError> {
        if !self.tool.uses_ai() {
            return Err(EditorError::NotAnAiTool(
                format!("{:?}", self.tool).to_lowercase(),
            ));
        }
        if self.tool.requires_image() && self.image.is_none() {
            return Err(EditorError::NoImage);
        }

        let prompt = prompt.to_string();
        match self.tool {
            EditingTool::Generate { size } => Ok(AiRequest::Generate { prompt, size }),
            EditingTool::Inpaint => {
                let image = self.composite_data_url()?;
                let mask = self.current_mask.as_ref().ok_or(EditorError::MissingMask)?;
                Ok(AiRequest::Inpaint {
                    image,
                    mask: encode_png_data_url(&mask.to_png()?),
                    prompt,
                    allow_nsfw,
                })
            }
            EditingTool::Edit => Ok(AiRequest::Edit {
                image: self.composite_data_url()?,
                prompt,
            }),
            EditingTool::Analyze { fast } => Ok(AiRequest::Analyze {
                image: self.composite_data_url()?,
                prompt,
                fast,
            }),
            EditingTool::None | EditingTool::Rotate | EditingTool::Adjust => {
                Err(EditorError::NotAnAiTool(format!("{:?}", self.tool).to_lowercase()))
            }
        }
    }

    fn composite_data_url(&self) -> Result<String, EditorError> {
        Ok(self.export()?.to_data_url())
    }

    fn wipe_mask(&mut self) {
        self.mask.clear();
        self.current_mask = None;
    }

    fn redraw(&mut self) {
        match &self.image {
            Some(image) => self.display.render(image, &self.view, self.size),
            None => self.display.reset(),
        }
    }
}

impl EditorControls for Editor {
    fn rotate(&mut self) -> u16 {
        let degrees = self.view.rotate_clockwise();
        self.redraw();
        degrees
    }

    fn set_brightness(&mut self, percent: i32) -> u8 {
        let stored = self.view.set_brightness(percent);
        self.redraw();
        stored
    }

    fn set_contrast(&mut self, percent: i32) -> u8 {
        let stored = self.view.set_contrast(percent);
        self.redraw();
        stored
    }

    fn clear_mask(&mut self) -> MaskUpdate {
        self.wipe_mask();
        MaskUpdate::Cleared
    }

    fn export(&self) -> Result<ExportedImage, EditorError> {
        let image = self.image.as_ref().ok_or(EditorError::NoImage)?;
        export_composite(image, &self.view, self.size, &self.config.download_file_name)
    }
}
