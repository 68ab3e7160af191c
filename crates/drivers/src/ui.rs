use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui;
use log::error;
use mars_photos_adapters::present_no_photos;
use mars_photos_application::{
    ApplicationError, ApplicationService, BuildRequestCommand, DownloadPhotosCommand, DownloadReport, FailurePolicy,
    RenderThumbnailsCommand, Thumbnail,
};
use mars_photos_domain::{CameraId, FetchRequest};

use crate::config::AppConfig;

const APP_TITLE: &str = "Mars Rover Photo Downloader";
const WINDOW_SIZE: [f32; 2] = [960.0, 640.0];

/// Values passed on the command line next to `--gui`.
#[derive(Clone, Default)]
pub struct FormSeed {
    pub api_key: Option<String>,
    pub output_dir: Option<PathBuf>,
}

/// Everything the form collects for one download.
#[derive(Clone, PartialEq)]
struct DownloadForm {
    earth_date: String,
    camera: CameraId,
    api_key: String,
    output_dir: String,
    show_images: bool,
    keep_going: bool,
}

impl std::fmt::Debug for DownloadForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadForm")
            .field("earth_date", &self.earth_date)
            .field("camera", &self.camera)
            .field("api_key", &"<redacted>")
            .field("output_dir", &self.output_dir)
            .field("show_images", &self.show_images)
            .field("keep_going", &self.keep_going)
            .finish()
    }
}

impl DownloadForm {
    fn new(config: &AppConfig, seed: &FormSeed) -> Self {
        Self {
            earth_date: String::new(),
            camera: CameraId::Fhaz,
            api_key: seed
                .api_key
                .clone()
                .unwrap_or_else(|| config.api_key.clone()),
            output_dir: seed
                .output_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            show_images: true,
            keep_going: config.failure_policy == FailurePolicy::Continue,
        }
    }

    fn build_command(&self) -> BuildRequestCommand {
        BuildRequestCommand {
            earth_date: self.earth_date.clone(),
            camera: self.camera.as_str().to_string(),
            api_key: self.api_key.clone(),
        }
    }

    fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::FailFast
        }
    }

    fn output_dir_problem(&self) -> Option<Notice> {
        let folder = self.output_dir.trim();
        if folder.is_empty() {
            return Some(Notice::error(
                "No Folder Selected",
                "Please select a folder to save the photos.",
            ));
        }
        if !Path::new(folder).is_dir() {
            return Some(Notice::error(
                "Invalid Folder",
                format!("The folder '{folder}' does not exist."),
            ));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    kind: NoticeKind,
    title: String,
    message: String,
}

impl Notice {
    fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

fn notice_for_error(error: &ApplicationError) -> Notice {
    let title = match error {
        ApplicationError::Date(_) => "Invalid Date",
        ApplicationError::Camera(_) => "Invalid Camera",
        ApplicationError::InvalidInput(_) => "Invalid Input",
        _ => "Error",
    };
    Notice::error(title, format!("An error occurred: {error}"))
}

fn notice_for_report(report: &DownloadReport, no_photos: &str) -> Notice {
    let Some(destination) = &report.destination else {
        return Notice::info("No Photos Found", no_photos);
    };

    let mut message = format!(
        "Photos downloaded successfully to: {}",
        destination.display()
    );
    if report.failed.is_empty() {
        return Notice::info("Download Complete", message);
    }

    message.push_str(&format!(
        "\n{} of {} photos could not be downloaded:",
        report.failed.len(),
        report.photos_found
    ));
    for failure in &report.failed {
        message.push_str(&format!("\n{}", failure.url));
    }
    Notice::error("Download Incomplete", message)
}

/// Date, then camera, then folder; the first problem found is reported.
fn prepare_request(
    service: &ApplicationService,
    form: &DownloadForm,
) -> Result<FetchRequest, Notice> {
    let request = service
        .build_request(form.build_command())
        .map_err(|error| notice_for_error(&error))?;
    if let Some(problem) = form.output_dir_problem() {
        return Err(problem);
    }
    Ok(request)
}

enum JobOutcome {
    Finished {
        report: DownloadReport,
        no_photos: String,
        thumbnails: Vec<Thumbnail>,
    },
    Failed(ApplicationError),
}

fn run_job(config: &AppConfig, request: FetchRequest, form: &DownloadForm) -> JobOutcome {
    download(config, request, form).unwrap_or_else(JobOutcome::Failed)
}

fn download(
    config: &AppConfig,
    request: FetchRequest,
    form: &DownloadForm,
) -> Result<JobOutcome, ApplicationError> {
    let service = crate::build_application_service(config)?;
    let no_photos = present_no_photos(&request);

    let report = service.download_photos(DownloadPhotosCommand {
        request,
        output_dir: PathBuf::from(form.output_dir.trim()),
        policy: form.failure_policy(),
    })?;

    let thumbnails = if form.show_images {
        service.render_thumbnails(RenderThumbnailsCommand {
            paths: report.saved.clone(),
            max_edge: config.thumbnail_edge,
        })
    } else {
        Vec::new()
    };

    Ok(JobOutcome::Finished {
        report,
        no_photos,
        thumbnails,
    })
}

struct GalleryImage {
    label: String,
    texture: egui::TextureHandle,
}

fn load_gallery(ctx: &egui::Context, thumbnails: Vec<Thumbnail>) -> Vec<GalleryImage> {
    thumbnails
        .into_iter()
        .map(|thumb| {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [thumb.width as usize, thumb.height as usize],
                &thumb.rgba,
            );
            let label = thumb
                .source_path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let texture = ctx.load_texture(
                thumb.source_path.display().to_string(),
                image,
                egui::TextureOptions::LINEAR,
            );
            GalleryImage { label, texture }
        })
        .collect()
}

fn show_gallery(ui: &mut egui::Ui, gallery: &[GalleryImage]) {
    egui::ScrollArea::horizontal().show(ui, |ui| {
        ui.horizontal(|ui| {
            for image in gallery {
                ui.vertical(|ui| {
                    ui.image((image.texture.id(), image.texture.size_vec2()));
                    ui.label(image.label.as_str());
                });
            }
        });
    });
}

struct DownloadApp {
    config: AppConfig,
    form: DownloadForm,
    job: Option<Receiver<JobOutcome>>,
    notice: Option<Notice>,
    gallery: Vec<GalleryImage>,
}

impl DownloadApp {
    fn new(config: AppConfig, seed: &FormSeed) -> Self {
        Self {
            form: DownloadForm::new(&config, seed),
            config,
            job: None,
            notice: None,
            gallery: Vec::new(),
        }
    }

    fn start_download(&mut self, ctx: &egui::Context) {
        let checked = crate::build_application_service(&self.config)
            .map_err(|error| notice_for_error(&error))
            .and_then(|service| prepare_request(&service, &self.form));
        let request = match checked {
            Ok(request) => request,
            Err(problem) => {
                self.notice = Some(problem);
                return;
            }
        };

        self.gallery.clear();
        let (sender, receiver) = mpsc::channel();
        let config = self.config.clone();
        let form = self.form.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let outcome = run_job(&config, request, &form);
            // the window may already be closed
            let _ = sender.send(outcome);
            ctx.request_repaint();
        });
        self.job = Some(receiver);
    }

    fn poll_job(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.job else {
            return;
        };

        match receiver.try_recv() {
            Ok(JobOutcome::Finished {
                report,
                no_photos,
                thumbnails,
            }) => {
                self.job = None;
                self.gallery = load_gallery(ctx, thumbnails);
                self.notice = Some(notice_for_report(&report, &no_photos));
            }
            Ok(JobOutcome::Failed(error)) => {
                self.job = None;
                self.notice = Some(notice_for_error(&error));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                error!("download worker exited without a result");
                self.job = None;
                self.notice = Some(Notice::error(
                    "Error",
                    "The download stopped unexpectedly.",
                ));
            }
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::Grid::new("download_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Earth date (YYYY-MM-DD):");
                ui.text_edit_singleline(&mut self.form.earth_date);
                ui.end_row();

                ui.label("Camera:");
                egui::ComboBox::from_id_salt("camera")
                    .selected_text(self.form.camera.as_str())
                    .show_ui(ui, |ui| {
                        for camera in CameraId::ALL {
                            ui.selectable_value(
                                &mut self.form.camera,
                                camera,
                                format!("{} - {}", camera.as_str(), camera.description()),
                            );
                        }
                    });
                ui.end_row();

                ui.label("NASA API key:");
                ui.text_edit_singleline(&mut self.form.api_key);
                ui.end_row();

                ui.label("Save folder:");
                ui.text_edit_singleline(&mut self.form.output_dir);
                ui.end_row();
            });

        ui.checkbox(&mut self.form.show_images, "Show images after download");
        ui.checkbox(
            &mut self.form.keep_going,
            "Keep going when an image fails to download",
        );

        ui.horizontal(|ui| {
            let idle = self.job.is_none();
            if ui
                .add_enabled(idle, egui::Button::new("Download Photos"))
                .clicked()
            {
                self.start_download(ctx);
            }
            if ui.button("Exit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            if !idle {
                ui.spinner();
                ui.label("Downloading...");
            }
        });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let color = match notice.kind {
                    NoticeKind::Error => ui.visuals().error_fg_color,
                    NoticeKind::Info => ui.visuals().text_color(),
                };
                ui.colored_label(color, notice.message.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for DownloadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_job(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.heading(APP_TITLE);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_form(ui, ctx);
            ui.separator();
            show_gallery(ui, &self.gallery);
        });

        self.show_notice(ctx);
    }
}

struct GalleryApp {
    title: String,
    images: Vec<GalleryImage>,
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.heading(self.title.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.images.is_empty() {
                ui.label("None of the downloaded files could be displayed.");
                return;
            }
            show_gallery(ui, &self.images);
        });
    }
}

fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(WINDOW_SIZE),
        ..Default::default()
    }
}

pub fn launch_download_window(config: AppConfig, seed: FormSeed) -> Result<(), String> {
    eframe::run_native(
        APP_TITLE,
        native_options(),
        Box::new(move |_cc| Ok(Box::new(DownloadApp::new(config, &seed)))),
    )
    .map_err(|error| format!("failed to start UI: {error}"))
}

pub fn launch_gallery_window(title: String, thumbnails: Vec<Thumbnail>) -> Result<(), String> {
    eframe::run_native(
        APP_TITLE,
        native_options(),
        Box::new(move |cc| {
            let images = load_gallery(&cc.egui_ctx, thumbnails);
            Ok(Box::new(GalleryApp { title, images }))
        }),
    )
    .map_err(|error| format!("failed to start UI: {error}"))
}
