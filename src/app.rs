use std::path::Path;

use egui::{Color32, Key, Modifiers, Sense, vec2};

use crate::config::BoardOptions;
use crate::error::BoardResult;
use crate::input::{InputHandler, dispatch};
use crate::recorder::{StrokeRecorder, replay};
use crate::renderer::{RasterSurface, ShapeSurface};

/// Desktop host: a fixed-size drawing surface with an undo/redo toolbar
pub struct BoardApp {
    options: BoardOptions,
    recorder: StrokeRecorder<ShapeSurface>,
    input: InputHandler,
    status: Option<String>,
}

impl BoardApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, options: BoardOptions) -> BoardResult<Self> {
        Self::with_options(options)
    }

    pub fn with_options(options: BoardOptions) -> BoardResult<Self> {
        options.validate()?;
        let style = options.line_style()?;
        Ok(Self {
            recorder: StrokeRecorder::new(ShapeSurface::new(), style),
            input: InputHandler::new(egui::Rect::NOTHING),
            status: None,
            options,
        })
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    pub fn recorder(&self) -> &StrokeRecorder<ShapeSurface> {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut StrokeRecorder<ShapeSurface> {
        &mut self.recorder
    }

    pub fn undo(&mut self) {
        self.recorder.undo();
    }

    pub fn redo(&mut self) {
        self.recorder.redo();
    }

    pub fn reset(&mut self) {
        self.recorder.reset();
    }

    /// Rasterize the visible strokes at the configured size
    pub fn snapshot(&self) -> RasterSurface {
        let mut surface = RasterSurface::new(self.options.width, self.options.height);
        replay(
            &mut surface,
            self.recorder.history().undo_stack(),
            self.recorder.style(),
        );
        surface
    }

    /// Write the current picture as a PNG
    pub fn save(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.status = Some(match self.snapshot().download(path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::warn!("Failed to save {}: {}", path.display(), err);
                format!("Save failed: {err}")
            }
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Redo first: the undo shortcut would also match Shift+Z.
        let (redo, undo) = ctx.input_mut(|i| {
            let redo = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
            let undo = i.consume_key(Modifiers::COMMAND, Key::Z);
            (redo, undo)
        });
        if redo {
            self.redo();
        }
        if undo {
            self.undo();
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let can_undo = self.recorder.can_undo();
            let can_redo = self.recorder.can_redo();

            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                self.undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                self.redo();
            }
            if ui.button("Reset").clicked() {
                self.reset();
            }
            if ui.button("Save PNG").clicked() {
                self.save(crate::renderer::raster::DEFAULT_DOWNLOAD_NAME);
            }

            ui.separator();
            let history = self.recorder.history();
            ui.label(format!("Undo stack size: {}", history.undo_stack().len()));
            ui.label(format!("Redo stack size: {}", history.redo_stack().len()));
            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let size = vec2(self.options.width as f32, self.options.height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        self.input.set_canvas_rect(rect);
        for event in self.input.process_input(ui.ctx()) {
            dispatch(&mut self.recorder, event);
        }

        self.recorder.surface().paint(&painter, rect.min);
    }
}

impl eframe::App for BoardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));
    }
}
