//! Selection window: thumbnails with checkboxes, "Toggle All" and "Save"

use std::sync::{Arc, Mutex};

use egui::{ColorImage, TextureHandle, TextureOptions};
use image::imageops;

use crate::collect::DecodedImage;
use crate::error::{Error, Result};
use crate::selection::Selection;
use crate::session::Session;

/// Window settings
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Thumbnails wider than this are scaled down to it
    pub thumbnail_width: u32,
    /// Initial inner window size
    pub window_size: [f32; 2],
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            thumbnail_width: 600,
            window_size: [700.0, 500.0],
        }
    }
}

/// How the window was left
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// "Save" (or Enter) with this selection
    Save(Selection),
    /// Window closed without saving
    Cancelled,
}

/// Show the selection window and block until it closes
///
/// Returns [`ShellOutcome::Cancelled`] when the user closes the window.
/// Writing the PDF is left to the caller.
pub fn run(session: &Session, options: &ShellOptions) -> Result<ShellOutcome> {
    let outcome = Arc::new(Mutex::new(ShellOutcome::Cancelled));
    let app = SelectionApp::new(
        session.shared_images(),
        options.thumbnail_width,
        Arc::clone(&outcome),
    );

    let title = session
        .output_path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| session.title().to_string());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(options.window_size)
            .with_title(title.clone()),
        ..Default::default()
    };

    eframe::run_native(&title, native_options, Box::new(|_cc| Box::new(app)))
        .map_err(|e| Error::Gui(e.to_string()))?;

    let mut guard = outcome
        .lock()
        .map_err(|_| Error::Gui("selection state poisoned".to_string()))?;
    Ok(std::mem::replace(&mut *guard, ShellOutcome::Cancelled))
}

/// Thumbnail size keeping aspect ratio; images are never enlarged
pub fn thumbnail_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let scaled = (f64::from(max_width) / f64::from(width) * f64::from(height)).round() as u32;
    (max_width, scaled.max(1))
}

struct SelectionApp {
    images: Arc<[DecodedImage]>,
    selection: Selection,
    thumbnail_width: u32,
    thumbnails: Vec<TextureHandle>,
    /// Checkbox widget ids from the last frame, in image order
    checkbox_ids: Vec<egui::Id>,
    focus_placed: bool,
    outcome: Arc<Mutex<ShellOutcome>>,
}

impl SelectionApp {
    fn new(images: Arc<[DecodedImage]>, thumbnail_width: u32, outcome: Arc<Mutex<ShellOutcome>>) -> Self {
        let selection = Selection::new(images.len());
        Self {
            images,
            selection,
            thumbnail_width,
            thumbnails: Vec::new(),
            checkbox_ids: Vec::new(),
            focus_placed: false,
            outcome,
        }
    }

    /// Upload thumbnails on the first frame
    fn ensure_thumbnails(&mut self, ctx: &egui::Context) {
        if self.thumbnails.len() == self.images.len() {
            return;
        }
        self.thumbnails = self
            .images
            .iter()
            .enumerate()
            .map(|(idx, image)| {
                let (width, height) = image.dimensions();
                let (tw, th) = thumbnail_size(width, height, self.thumbnail_width);
                let color_image = if (tw, th) == (width, height) {
                    ColorImage::from_rgb([tw as usize, th as usize], image.bitmap().as_raw())
                } else {
                    let small = imageops::thumbnail(image.bitmap(), tw, th);
                    ColorImage::from_rgb([tw as usize, th as usize], small.as_raw())
                };
                ctx.load_texture(format!("thumb_{}", idx), color_image, TextureOptions::LINEAR)
            })
            .collect();
    }

    fn finish(&self, ctx: &egui::Context) {
        tracing::debug!(
            "Saving {} of {} images",
            self.selection.selected_count(),
            self.selection.len()
        );
        match self.outcome.lock() {
            Ok(mut guard) => *guard = ShellOutcome::Save(self.selection.clone()),
            Err(_) => tracing::error!("Could not record selection"),
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    /// Draw one frame; true when the user asked to save
    fn show(&mut self, ctx: &egui::Context) -> bool {
        self.ensure_thumbnails(ctx);

        // Enter saves. Taken out of the input before any widget runs, so a
        // focused checkbox never sees it as a click.
        let mut save_requested =
            ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));

        egui::TopBottomPanel::top("actions").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Toggle All").clicked() {
                    self.selection.toggle_all();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save").clicked() {
                        save_requested = true;
                    }
                    ui.label(format!(
                        "{} / {} selected",
                        self.selection.selected_count(),
                        self.selection.len()
                    ));
                });
            });
        });

        let mut checkbox_ids = Vec::with_capacity(self.thumbnails.len());
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (idx, texture) in self.thumbnails.iter().enumerate() {
                        ui.horizontal(|ui| {
                            if let Some(state) = self.selection.get_mut(idx) {
                                let response = ui.checkbox(state, (idx + 1).to_string());
                                checkbox_ids.push(response.id);
                            }
                            ui.image(egui::load::SizedTexture::from_handle(texture));
                        });
                    }
                });
        });
        self.checkbox_ids = checkbox_ids;

        // Start keyboard navigation at the first image
        if !self.focus_placed {
            if let Some(first) = self.checkbox_ids.first().copied() {
                ctx.memory_mut(|mem| mem.request_focus(first));
                self.focus_placed = true;
            }
        }

        save_requested
    }
}

impl eframe::App for SelectionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.show(ctx) {
            self.finish(ctx);
        }
    }
}
