use std::path::PathBuf;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, route_effect, EffectRoute};
use crate::ui::viewer::DesktopPdfViewer;
use client_core::{
    config::{ClientSettings, CONFIG_FILE_NAME},
    controller::{
        status::{StatusIcon, StatusStyle},
        Key,
    },
    navigate_best_effort,
    view::{AppView, ModalView, PapersView, ResultEntryView, ResultsView, ScoreView},
    Effect, HttpPaperApi, KeyChord, PdfTarget, PdfViewer, UiAction, ViewController,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub settings: ClientSettings,
    pub paths: AppPaths,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_path: PathBuf,
    pub download_dir: Option<PathBuf>,
}

impl AppPaths {
    /// An explicit config path wins, then `exam_search.toml` in the working
    /// directory, then the per-user config directory.
    pub fn resolve(explicit_config: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = match explicit_config {
            Some(path) => path,
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if local.exists() {
                    local
                } else {
                    dirs::config_dir()
                        .ok_or_else(|| anyhow::anyhow!("unable to resolve user config dir"))?
                        .join("exam_search")
                        .join(CONFIG_FILE_NAME)
                }
            }
        };
        Ok(Self {
            config_path,
            download_dir: dirs::download_dir().or_else(dirs::home_dir),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct ExamSearchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: ViewController,
    api: HttpPaperApi,
    viewer: DesktopPdfViewer,
    settings: ClientSettings,
    paths: AppPaths,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl ExamSearchApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api: HttpPaperApi,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: ViewController::new(&startup.settings),
            api,
            viewer: DesktopPdfViewer::new(startup.settings.auto_open_viewer),
            settings: startup.settings,
            paths: startup.paths,
            status: "Starting...".to_string(),
            status_banner: None,
        };
        let effects = app.controller.start();
        app.run_effects(effects);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Status(result) => {
                    let effects = self.controller.apply_status(result);
                    self.run_effects(effects);
                }
                UiEvent::Papers(result) => self.controller.apply_papers(result),
                UiEvent::Search(result) => self.controller.apply_search(result),
                UiEvent::MarkingSchemeLookup { ticket, result } => {
                    let effects = self.controller.apply_marking_scheme_lookup(ticket, result);
                    self.run_effects(effects);
                }
                UiEvent::ViewerNavigate { target, page } => {
                    if self.controller.modal().viewer() == Some(&target) {
                        navigate_best_effort(&mut self.viewer, page);
                    } else {
                        tracing::debug!(page, "dropping navigation for a document no longer shown");
                    }
                }
                UiEvent::PdfSaved { path, bytes } => {
                    self.status = format!("Saved {} ({bytes} bytes)", path.display());
                }
                UiEvent::Error(err) => {
                    tracing::warn!(category = ?err.category(), context = ?err.context(), "{}", err.message());
                    self.show_error(&err);
                }
            }
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match route_effect(effect, self.settings.status_poll_interval) {
                EffectRoute::Backend(cmd) => {
                    dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
                }
                EffectRoute::LoadViewer(target) => {
                    let url = self.api.viewer_url(&target);
                    if let Err(err) = self.viewer.load(&url) {
                        self.show_error(&UiError::from_message(
                            UiErrorContext::Viewer,
                            err.to_string(),
                        ));
                    }
                }
                EffectRoute::ClearViewer => self.viewer.clear(),
            }
        }
    }

    fn dispatch_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            let effects = self.controller.dispatch(action);
            self.run_effects(effects);
        }
    }

    fn show_error(&mut self, err: &UiError) {
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: err.banner_text(),
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (escape, debug_toggle) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::D),
            )
        });
        if escape {
            let effects = self.controller.handle_key(KeyChord::plain(Key::Escape));
            self.run_effects(effects);
        }
        if debug_toggle {
            let effects = self.controller.handle_key(KeyChord::ctrl_shift('d'));
            self.run_effects(effects);
        }
    }

    fn save_pdf(&mut self, target: PdfTarget) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name(target.suggested_file_name());
        if let Some(dir) = &self.paths.download_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.status = format!("Downloading {}...", target.suggested_file_name());
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::DownloadPdf { target, path },
                &mut self.status,
            );
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, view: &AppView) {
        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Exam Paper Search");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (icon, color) = status_icon(view.status.icon, view.status.style);
                    ui.label(egui::RichText::new(&view.status.text).color(color));
                    ui.label(egui::RichText::new(icon).color(color).strong());
                    if view.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").monospace().weak());
                    }
                });
            });
            self.show_status_banner(ui);
        });
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.small(&self.status);
        });
    }

    fn show_search_section(&mut self, ui: &mut egui::Ui, view: &AppView, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            let search = self.controller.search_mut();
            let response = ui.add_enabled(
                view.search.enabled,
                egui::TextEdit::singleline(search.query_input_mut())
                    .hint_text("Describe the question you are looking for...")
                    .desired_width(ui.available_width() - 220.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                actions.push(UiAction::SubmitSearch);
            }

            let mut num_results = view.search.num_results;
            ui.add_enabled_ui(view.search.enabled, |ui| {
                egui::ComboBox::from_id_salt("num_results")
                    .selected_text(format!("{num_results} results"))
                    .show_ui(ui, |ui| {
                        for option in view.search.result_count_options {
                            ui.selectable_value(&mut num_results, *option, format!("{option} results"));
                        }
                    });
            });
            if num_results != view.search.num_results {
                self.controller.search_mut().set_num_results(num_results);
            }

            if view.search.busy {
                ui.spinner();
            }
            let label = if view.search.busy { "Searching..." } else { "Search" };
            if ui
                .add_enabled(view.search.enabled && !view.search.busy, egui::Button::new(label))
                .clicked()
            {
                actions.push(UiAction::SubmitSearch);
            }
        });
    }

    fn show_alert(&mut self, ctx: &egui::Context, view: &AppView, actions: &mut Vec<UiAction>) {
        let Some(message) = &view.alert else {
            return;
        };
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 80.0))
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    actions.push(UiAction::DismissAlert);
                }
            });
    }

    fn show_modal(&mut self, ctx: &egui::Context, modal: &ModalView, actions: &mut Vec<UiAction>) {
        let mut open = true;
        egui::Window::new(&modal.title)
            .id(egui::Id::new("pdf_modal"))
            .open(&mut open)
            .collapsible(false)
            .default_width(520.0)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if modal.subtitle_loading {
                        ui.spinner();
                        ui.label(egui::RichText::new(&modal.subtitle).italics().weak());
                    } else {
                        ui.label(&modal.subtitle);
                    }
                });
                ui.horizontal(|ui| {
                    if modal.show_back_to_question && ui.button("Back to Question").clicked() {
                        actions.push(UiAction::BackToQuestion);
                    }
                    if modal.show_view_marking_scheme && ui.button("View Marking Scheme").clicked() {
                        actions.push(UiAction::OpenMarkingSchemeFromModal);
                    }
                });
                ui.separator();

                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    match self.viewer.source().map(str::to_string) {
                        Some(url) => {
                            ui.label(egui::RichText::new(&url).monospace().small());
                            ui.horizontal(|ui| {
                                if ui.button("Open in viewer").clicked() {
                                    if let Err(err) = self.viewer.open_external() {
                                        self.show_error(&UiError::from_message(
                                            UiErrorContext::Viewer,
                                            err.to_string(),
                                        ));
                                    }
                                }
                                if let Some(target) = &modal.viewer {
                                    if ui.button("Save PDF...").clicked() {
                                        self.save_pdf(target.clone());
                                    }
                                }
                            });
                        }
                        None => {
                            ui.weak("No document loaded");
                        }
                    }
                });
            });
        if !open {
            actions.push(UiAction::CloseModal);
        }
    }
}

fn status_icon(icon: StatusIcon, style: StatusStyle) -> (&'static str, egui::Color32) {
    let glyph = match icon {
        StatusIcon::Ready => "✔",
        StatusIcon::Error => "✖",
        StatusIcon::Pending => "…",
    };
    let color = match style {
        StatusStyle::Ready => egui::Color32::from_rgb(76, 175, 80),
        StatusStyle::Error => egui::Color32::from_rgb(229, 57, 53),
        StatusStyle::Neutral => egui::Color32::GRAY,
    };
    (glyph, color)
}

fn show_results(ui: &mut egui::Ui, results: &ResultsView, actions: &mut Vec<UiAction>) {
    match results {
        ResultsView::Hidden => {}
        ResultsView::Error { header, message } => {
            ui.label(egui::RichText::new(header).strong().color(egui::Color32::from_rgb(229, 57, 53)));
            ui.label(message);
        }
        ResultsView::Empty { header, message } => {
            ui.label(egui::RichText::new(header).strong());
            ui.weak(*message);
        }
        ResultsView::List { header, entries } => {
            ui.label(egui::RichText::new(header).strong());
            for entry in entries {
                show_result_entry(ui, entry, actions);
            }
        }
    }
}

fn show_result_entry(ui: &mut egui::Ui, entry: &ResultEntryView, actions: &mut Vec<UiAction>) {
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("#{}", entry.rank)).strong());
                ui.label(format!(
                    "{} - Paper {} - Question {} (Page {})",
                    entry.year, entry.paper, entry.question_number, entry.page
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| match &entry.score {
                    ScoreView::Total(label) => {
                        ui.label(egui::RichText::new(label).strong());
                    }
                    ScoreView::Breakdown {
                        total,
                        semantic,
                        keyword,
                    } => {
                        ui.label(egui::RichText::new(keyword).small());
                        ui.label(egui::RichText::new(semantic).small());
                        ui.label(egui::RichText::new(total).strong());
                    }
                });
            });
            ui.label(&entry.question_text);
            ui.horizontal(|ui| {
                if ui.button(&entry.jump_label).clicked() {
                    actions.push(entry.jump.clone());
                }
                if ui.button("View Marking Scheme").clicked() {
                    actions.push(entry.view_marking_scheme.clone());
                }
            });
        });
}

fn show_papers(ui: &mut egui::Ui, papers: &PapersView, actions: &mut Vec<UiAction>) {
    match papers {
        PapersView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Loading papers...");
            });
        }
        PapersView::Failed(message) => {
            ui.colored_label(egui::Color32::from_rgb(229, 57, 53), message);
        }
        PapersView::Empty(message) => {
            ui.weak(*message);
        }
        PapersView::Grid(cards) => {
            ui.horizontal_wrapped(|ui| {
                for card in cards {
                    egui::Frame::group(ui.style())
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(&card.year).strong());
                                for link in &card.papers {
                                    if ui.link(&link.label).clicked() {
                                        actions.push(link.action.clone());
                                    }
                                }
                                if let Some(link) = &card.marking_scheme {
                                    if ui.link(&link.label).clicked() {
                                        actions.push(link.action.clone());
                                    }
                                }
                            });
                        });
                }
            });
        }
    }
}

impl eframe::App for ExamSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_shortcuts(ctx);

        let view = self.controller.render();
        let mut actions = Vec::new();

        self.show_top_bar(ctx, &view);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_search_section(ui, &view, &mut actions);
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_results(ui, &view.results, &mut actions);
                ui.add_space(12.0);
                ui.heading("Browse Papers");
                show_papers(ui, &view.papers, &mut actions);
            });
        });
        if let Some(modal) = &view.modal {
            self.show_modal(ctx, modal, &mut actions);
        }
        self.show_alert(ctx, &view, &mut actions);

        self.dispatch_actions(actions);
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
