//! Main application UI and state management.
//! Renders the set list, the set editor, and study/test/results screens on top
//! of the flashcard store and the session controllers.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use flashcard_sets::database::{FlashcardStore, KeyValueStore, SqliteStore};
use flashcard_sets::export::csv::import_terms_csv;
use flashcard_sets::export::json::{export_set_to_path, import_set_json};
use flashcard_sets::{
    Collection, Config, FlashcardSet, FlashcardsError, RevealState, SetDraft, StudySession, Term,
    TestResult, TestSession,
};
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

const THEME_KEY: &str = "theme";

/// Application screen states
#[derive(Default, PartialEq, Eq)]
enum AppScreen {
    #[default]
    Home,
    Editor,
    Study,
    Test,
    Results,
    NoSetSelected,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Theme {
    Dark,
    Light,
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        }
    }
}

/// One editable term row in the set editor
#[derive(Default)]
struct TermRow {
    question: String,
    answer: String,
}

/// Main application state
pub struct FlashcardsApp {
    config: Config,
    store: FlashcardStore<SqliteStore>,
    current_screen: AppScreen,
    collection: Collection,
    theme: Theme,

    editor_title: String,
    editor_name: String,
    editor_rows: Vec<TermRow>,
    editor_message: Option<String>,

    study_session: Option<StudySession<StdRng>>,
    test_session: Option<TestSession>,
    last_tick: Option<Instant>,
    results: Option<TestResult>,

    pending_delete: Option<usize>,
    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    show_message_dialog: bool,
    message: String,
}

/// Formats a `lastOpened` value in local time
fn format_last_opened(ms: Option<i64>) -> String {
    match ms.and_then(DateTime::<Utc>::from_timestamp_millis) {
        Some(time) => time
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "never".to_string(),
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl eframe::App for FlashcardsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.current_screen {
            AppScreen::Home => self.render_home_screen(ctx),
            AppScreen::Editor => self.render_editor_screen(ctx),
            AppScreen::Study => self.render_study_screen(ctx),
            AppScreen::Test => self.render_test_screen(ctx),
            AppScreen::Results => self.render_results_screen(ctx),
            AppScreen::NoSetSelected => self.render_no_set_screen(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if let Some(index) = self.pending_delete {
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new("Delete this set?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    if let Some(set) = self.collection.get(index) {
                        ui.label(format!("'{}' will be removed.", set.name));
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            cancelled = true;
                        }
                        if ui.button("Delete").clicked() {
                            confirmed = true;
                        }
                    });
                });

            if confirmed {
                self.handle_delete(index);
            }
            if confirmed || cancelled {
                self.pending_delete = None;
            }
        }

        if self.show_message_dialog {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(self.message.as_str());
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_message_dialog = false;
                    }
                });
        }
    }
}

impl FlashcardsApp {
    /// Creates a new application instance on top of an opened store
    pub fn new(config: Config, store: FlashcardStore<SqliteStore>, ctx: &egui::Context) -> Self {
        let theme = match store.kv().get(THEME_KEY) {
            Ok(Some(value)) if value == "light" => Theme::Light,
            _ => Theme::Dark,
        };
        ctx.set_visuals(theme.visuals());

        let collection = store.load_collection();
        Self {
            config,
            store,
            current_screen: AppScreen::Home,
            collection,
            theme,
            editor_title: String::new(),
            editor_name: String::new(),
            editor_rows: Vec::new(),
            editor_message: None,
            study_session: None,
            test_session: None,
            last_tick: None,
            results: None,
            pending_delete: None,
            show_confirmation_dialog: false,
            allowed_to_close: false,
            show_message_dialog: false,
            message: String::new(),
        }
    }

    fn show_message(&mut self, message: String) {
        self.message = message;
        self.show_message_dialog = true;
    }

    /// Leaves any session and reloads the collection from storage
    fn go_home(&mut self) {
        self.study_session = None;
        self.test_session = None;
        self.last_tick = None;
        self.results = None;
        self.collection = self.store.load_collection();
        self.current_screen = AppScreen::Home;
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_visuals(self.theme.visuals());
        if let Err(e) = self.store.kv().set(THEME_KEY, self.theme.as_str()) {
            log::warn!("Could not save theme: {}", e);
        }
    }

    /// Renders the home screen with the list of sets
    fn render_home_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Flashcard Sets");
                let label = match self.theme {
                    Theme::Dark => "Light mode",
                    Theme::Light => "Dark mode",
                };
                if ui.button(label).clicked() {
                    self.toggle_theme(ui.ctx());
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Make New Set").clicked() {
                    self.open_editor(None);
                }
                if ui.button("Import Set (JSON)").clicked() {
                    self.handle_import_json();
                }
                if ui.button("Import Terms (CSV)").clicked() {
                    self.handle_import_csv();
                }
            });

            ui.separator();

            if self.collection.is_empty() {
                ui.label("No sets yet. Click 'Make New Set' to add one!");
                return;
            }

            // We store actions to execute after UI rendering to avoid borrowing conflicts
            let mut action_study: Option<usize> = None;
            let mut action_test: Option<usize> = None;
            let mut action_edit: Option<usize> = None;
            let mut action_export: Option<usize> = None;
            let mut action_delete: Option<usize> = None;

            egui::ScrollArea::vertical()
                .id_source("sets_list")
                .show(ui, |ui| {
                    for (i, set) in self.collection.by_last_opened() {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.strong(set.name.as_str());
                                ui.label(format!(
                                    "{} terms, last opened {}",
                                    set.terms.len(),
                                    format_last_opened(set.last_opened())
                                ));
                            });
                            ui.horizontal(|ui| {
                                if ui.button("Study").clicked() {
                                    action_study = Some(i);
                                }
                                if ui.button("Test").clicked() {
                                    action_test = Some(i);
                                }
                                if ui.button("Edit").clicked() {
                                    action_edit = Some(i);
                                }
                                if ui.button("Export").clicked() {
                                    action_export = Some(i);
                                }
                                if ui.button("Delete").clicked() {
                                    action_delete = Some(i);
                                }
                            });
                        });
                    }
                });

            // Execute deferred actions
            if let Some(i) = action_study {
                self.start_study_session(i);
            }
            if let Some(i) = action_test {
                self.start_test_session(i);
            }
            if let Some(i) = action_edit {
                self.open_editor(Some(i));
            }
            if let Some(i) = action_export {
                self.handle_export(i);
            }
            if let Some(i) = action_delete {
                self.pending_delete = Some(i);
            }
        });
    }

    /// Opens the editor, either for a new set or for the set at `edit_index`
    fn open_editor(&mut self, edit_index: Option<usize>) {
        let result = match edit_index {
            Some(i) => self.store.begin_edit(i),
            None => self.store.cancel_edit(),
        };
        if let Err(e) = result {
            self.show_message(format!("Could not open editor: {}", e));
            return;
        }

        match self.store.set_under_edit() {
            Some((_, set)) => {
                self.editor_title = "Edit Set".to_string();
                self.editor_name = set.name;
                self.editor_rows = set
                    .terms
                    .into_iter()
                    .map(|t| TermRow {
                        question: t.question,
                        answer: t.answer,
                    })
                    .collect();
            }
            None => {
                self.editor_title = "Create Set".to_string();
                self.editor_name.clear();
                self.editor_rows = vec![TermRow::default()];
            }
        }
        self.editor_message = None;
        self.current_screen = AppScreen::Editor;
    }

    /// Renders the set editor
    fn render_editor_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.editor_title.as_str());
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Set name:");
                ui.text_edit_singleline(&mut self.editor_name);
            });

            ui.separator();

            let mut action_remove: Option<usize> = None;

            egui::ScrollArea::vertical()
                .id_source("terms_editor")
                .max_height(400.0)
                .show(ui, |ui| {
                    for (i, row) in self.editor_rows.iter_mut().enumerate() {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.label("Question:");
                                ui.text_edit_singleline(&mut row.question);
                            });
                            ui.horizontal(|ui| {
                                ui.label("Answer:");
                                ui.text_edit_multiline(&mut row.answer);
                            });
                            if ui.button("Delete").clicked() {
                                action_remove = Some(i);
                            }
                        });
                    }
                });

            if let Some(i) = action_remove {
                self.editor_rows.remove(i);
            }

            if ui.button("Add Term").clicked() {
                self.editor_rows.push(TermRow::default());
            }

            ui.separator();

            if let Some(message) = &self.editor_message {
                ui.colored_label(egui::Color32::RED, message.as_str());
            }

            ui.horizontal(|ui| {
                if ui.button("Save Set").clicked() {
                    self.handle_save_set();
                }
                if ui.button("Cancel").clicked() {
                    if let Err(e) = self.store.cancel_edit() {
                        log::warn!("Could not clear edit index: {}", e);
                    }
                    self.go_home();
                }
            });
        });
    }

    fn handle_save_set(&mut self) {
        let terms = self
            .editor_rows
            .iter()
            .map(|row| Term::new(row.question.clone(), row.answer.clone()))
            .collect();
        let draft = SetDraft::new(self.editor_name.clone(), terms);

        match self.store.save_set(draft) {
            Ok(_) => self.go_home(),
            Err(FlashcardsError::Validation(e)) => self.editor_message = Some(e.to_string()),
            Err(e) => self.editor_message = Some(format!("Could not save set: {}", e)),
        }
    }

    /// Selects a set and opens it, stamping its last-opened time
    fn open_set(&mut self, index: usize) -> Option<FlashcardSet> {
        if let Err(e) = self.store.select_set(index) {
            self.show_message(format!("Could not select set: {}", e));
            return None;
        }
        match self.store.open_current_set(now_millis()) {
            Ok(set) => Some(set),
            Err(FlashcardsError::NoSetSelected) | Err(FlashcardsError::SetNotFound(_)) => {
                self.current_screen = AppScreen::NoSetSelected;
                None
            }
            Err(e) => {
                self.show_message(format!("Could not open set: {}", e));
                None
            }
        }
    }

    /// Starts an adaptive study session on the set at `index`
    fn start_study_session(&mut self, index: usize) {
        let Some(set) = self.open_set(index) else {
            return;
        };
        match StudySession::new(&set, self.config.rng()) {
            Ok(session) => {
                self.study_session = Some(session);
                self.current_screen = AppScreen::Study;
            }
            Err(e) => self.show_message(e.to_string()),
        }
    }

    /// Starts a one-pass timed test on the set at `index`
    fn start_test_session(&mut self, index: usize) {
        let Some(set) = self.open_set(index) else {
            return;
        };
        let mut rng = self.config.rng();
        self.test_session = Some(TestSession::new(&set, &mut rng));
        self.last_tick = Some(Instant::now());
        self.current_screen = AppScreen::Test;
        self.check_test_finished();
    }

    /// Renders the study screen with the adaptive flashcard drill
    fn render_study_screen(&mut self, ctx: &egui::Context) {
        let mut action_back = false;
        let mut action_edit = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &mut self.study_session else {
                action_back = true;
                return;
            };

            ui.heading(format!("Studying: {}", session.set_name()));
            ui.label(format!("Card {}", session.cards_shown()));
            ui.add_space(20.0);

            let content = session.current_content().to_string();
            let side = match session.reveal_state() {
                RevealState::QuestionShown => "Question (click to flip)",
                RevealState::AnswerShown => "Answer (click to flip)",
            };

            ui.vertical_centered(|ui| {
                ui.label(side);
                let card = egui::Button::new(egui::RichText::new(&content).size(22.0))
                    .min_size(egui::vec2(360.0, 180.0));
                if ui.add(card).clicked() {
                    session.on_flip();
                }
            });

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                if ui.button("Correct").clicked() {
                    session.on_correct();
                }
                if ui.button("Wrong").clicked() {
                    session.on_wrong();
                }
                if ui.button("Skip").clicked() {
                    session.on_skip();
                }
            });

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                if ui.button("Edit set").clicked() {
                    action_edit = true;
                }
                if ui.button("Back to Home").clicked() {
                    action_back = true;
                }
            });

            ui.separator();

            ui.heading(format!("All terms ({})", session.terms().len()));
            egui::ScrollArea::vertical()
                .id_source("study_terms_list")
                .show(ui, |ui| {
                    for term in session.terms() {
                        ui.group(|ui| {
                            ui.label(format!("Q: {}", term.question));
                            ui.label(format!("A: {}", term.answer));
                        });
                    }
                });
        });

        if action_edit {
            match self.store.current_set_index() {
                Some(i) => {
                    self.study_session = None;
                    self.open_editor(Some(i));
                }
                None => self.current_screen = AppScreen::NoSetSelected,
            }
        } else if action_back {
            self.go_home();
        }
    }

    /// Advances the test timer by one tick for each whole second elapsed
    fn tick_test_timer(&mut self) {
        let (Some(session), Some(last_tick)) = (&mut self.test_session, &mut self.last_tick) else {
            return;
        };
        while last_tick.elapsed() >= Duration::from_secs(1) {
            session.tick();
            *last_tick += Duration::from_secs(1);
        }
    }

    /// Stores the result and shows it once every card has been answered
    fn check_test_finished(&mut self) {
        let Some(result) = self.test_session.as_ref().and_then(|s| s.result()) else {
            return;
        };
        if let Err(e) = self.store.record_test_result(&result) {
            log::warn!("Could not store test result: {}", e);
        }
        self.test_session = None;
        self.last_tick = None;
        self.results = match self.store.take_test_result() {
            Ok(Some(stored)) => Some(stored),
            _ => Some(result),
        };
        self.current_screen = AppScreen::Results;
    }

    /// Renders the test screen with the running timer
    fn render_test_screen(&mut self, ctx: &egui::Context) {
        self.tick_test_timer();
        ctx.request_repaint_after(Duration::from_millis(250));

        let mut action_back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &mut self.test_session else {
                action_back = true;
                return;
            };

            ui.heading(format!("Test: {}", session.set_name()));
            ui.label(format!(
                "Answered {} / {}   Time {}",
                session.answered(),
                session.total(),
                flashcard_sets::models::test_result::format_elapsed(session.elapsed_seconds())
            ));
            ui.add_space(20.0);

            if let Some(content) = session.current_content().map(str::to_string) {
                ui.vertical_centered(|ui| {
                    let card = egui::Button::new(egui::RichText::new(&content).size(22.0))
                        .min_size(egui::vec2(360.0, 180.0));
                    if ui.add(card).clicked() {
                        session.on_flip();
                    }
                });

                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    if ui.button("Correct").clicked() {
                        session.on_correct();
                    }
                    if ui.button("Wrong").clicked() {
                        session.on_wrong();
                    }
                });
            }

            ui.add_space(20.0);

            if ui.button("Back to Home").clicked() {
                action_back = true;
            }
        });

        if action_back {
            self.go_home();
        } else {
            self.check_test_finished();
        }
    }

    /// Renders the score of the last finished test
    fn render_results_screen(&mut self, ctx: &egui::Context) {
        let mut action_back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Test Results");
            ui.separator();

            match &self.results {
                Some(result) => {
                    ui.label(format!("Correct: {}", result.correct));
                    ui.label(format!("Wrong: {}", result.wrong));
                    ui.label(format!("Total: {}", result.total));
                    ui.label(format!("Score: {}%", result.percent));
                    ui.label(format!("Time: {}", result.formatted_time()));
                }
                None => {
                    ui.label("No test results to show.");
                }
            }

            ui.add_space(20.0);

            if ui.button("Back to Home").clicked() {
                action_back = true;
            }
        });

        if action_back {
            self.go_home();
        }
    }

    /// Shown when a session is opened without a resolvable set
    fn render_no_set_screen(&mut self, ctx: &egui::Context) {
        let mut action_back = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("No set selected.");
            if ui.link("Go back to home").clicked() {
                action_back = true;
            }
        });
        if action_back {
            self.go_home();
        }
    }

    /// Handles set export to JSON file
    fn handle_export(&mut self, index: usize) {
        let Some(set) = self.collection.get(index).cloned() else {
            return;
        };
        // Open file save dialog
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", set.name))
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            let message = match export_set_to_path(&set, &path) {
                Ok(_) => format!("Set '{}' exported successfully!", set.name),
                Err(e) => format!("Export failed: {}", e),
            };
            self.show_message(message);
        }
    }

    /// Handles set import from JSON file
    fn handle_import_json(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        let message = match import_set_json(&path).and_then(|set| {
            let name = set.name.clone();
            self.store.import_set(set).map(|_| name)
        }) {
            Ok(name) => {
                self.collection = self.store.load_collection();
                format!("Set '{}' imported successfully!", name)
            }
            Err(e) => format!(
                "Import failed: {}\n\nPlease check if the file has correct structure:\n{{\n  \"name\": \"Set Name\",\n  \"terms\": [{{ \"question\": \"...\", \"answer\": \"...\" }}]\n}}",
                e
            ),
        };
        self.show_message(message);
    }

    /// Loads terms from a CSV file into a new set in the editor
    fn handle_import_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match import_terms_csv(&path) {
            Ok(terms) if terms.is_empty() => {
                self.show_message("No complete question,answer rows found.".to_string());
            }
            Ok(terms) => {
                self.open_editor(None);
                self.editor_name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.editor_rows = terms
                    .into_iter()
                    .map(|t| TermRow {
                        question: t.question,
                        answer: t.answer,
                    })
                    .collect();
            }
            Err(e) => self.show_message(format!("CSV import failed: {}", e)),
        }
    }

    fn handle_delete(&mut self, index: usize) {
        match self.store.delete_set(index) {
            Ok(_) => self.collection = self.store.load_collection(),
            Err(e) => self.show_message(format!("Could not delete set: {}", e)),
        }
    }
}
