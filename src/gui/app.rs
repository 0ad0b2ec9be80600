use std::time::Duration;

use eframe::egui::{
    self,
    Color32,
    RichText,
};

use crate::{
    anki::{
        AnkiClient,
        AnkiScheduler,
    },
    core::{
        HayaoshiError,
        QuizConfig,
    },
    persistence::load_config,
    quiz::{
        Mode,
        NullAudio,
        Outcome,
        QuizSession,
        SessionState,
        SharedTimer,
    },
};

const GREEN: Color32 = Color32::from_rgb(0x50, 0xfa, 0x7b);
const RED: Color32 = Color32::from_rgb(0xff, 0x55, 0x55);
const YELLOW: Color32 = Color32::from_rgb(0xf1, 0xfa, 0x8c);
const DIM: Color32 = Color32::from_rgb(0x62, 0x72, 0xa4);

enum Screen {
    Start,
    Fatal(HayaoshiError),
    Quiz(Box<QuizSession<AnkiScheduler, SharedTimer>>),
}

enum Action {
    None,
    Start(Mode),
    Refresh,
    Back,
}

pub struct HayaoshiApp {
    config: QuizConfig,
    timer: SharedTimer,
    decks: Vec<String>,
    selected_deck: usize,
    deck_error: Option<String>,
    screen: Screen,
}

impl HayaoshiApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_zoom_factor(1.2);

        let mut app = Self {
            config: load_config(),
            timer: SharedTimer::new(),
            decks: Vec::new(),
            selected_deck: 0,
            deck_error: None,
            screen: Screen::Start,
        };
        app.refresh_decks();
        app
    }

    fn refresh_decks(&mut self) {
        match AnkiClient::new().deck_names() {
            Ok(decks) => {
                self.decks = decks;
                self.selected_deck = 0;
                self.deck_error = None;
            }
            Err(err) => {
                self.deck_error = Some(err.to_string());
            }
        }
    }

    fn start_session(&mut self, mode: Mode) {
        let Some(deck) = self.decks.get(self.selected_deck).cloned() else {
            return;
        };

        // A fresh timer guarantees the new session owns it exclusively.
        self.timer = SharedTimer::new();

        let result = AnkiScheduler::connect(AnkiClient::new(), deck).and_then(|scheduler| {
            QuizSession::start(
                mode,
                self.config.clone(),
                scheduler,
                self.timer.clone(),
                Box::new(NullAudio),
            )
        });

        self.screen = match result {
            Ok(session) => Screen::Quiz(Box::new(session)),
            Err(err) => Screen::Fatal(err),
        };
    }

    fn handle_keys(ctx: &egui::Context, session: &mut QuizSession<AnkiScheduler, SharedTimer>) {
        const OPTION_KEYS: [egui::Key; 9] = [
            egui::Key::Num1,
            egui::Key::Num2,
            egui::Key::Num3,
            egui::Key::Num4,
            egui::Key::Num5,
            egui::Key::Num6,
            egui::Key::Num7,
            egui::Key::Num8,
            egui::Key::Num9,
        ];

        ctx.input(|input| {
            for (index, key) in OPTION_KEYS.iter().enumerate() {
                if input.key_pressed(*key) {
                    session.select_answer(index);
                }
            }
            if input.key_pressed(egui::Key::Num0) {
                session.give_up();
            }
            if input.key_pressed(egui::Key::Enter) {
                session.acknowledge_new();
            }
        });
    }

    fn start_screen(
        ui: &mut egui::Ui,
        decks: &[String],
        selected_deck: &mut usize,
        deck_error: Option<&str>,
    ) -> Action {
        let mut action = Action::None;

        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("Hayaoshi").size(30.0).strong());
            ui.label(RichText::new("Timed multiple-choice reviews for Anki").color(DIM));
            ui.add_space(20.0);

            if let Some(error) = deck_error {
                ui.label(RichText::new(error).color(RED));
                ui.add_space(8.0);
                if ui.button("Retry connection").clicked() {
                    action = Action::Refresh;
                }
                return;
            }

            let selected_name =
                decks.get(*selected_deck).map(String::as_str).unwrap_or("(no decks)");
            egui::ComboBox::from_label("Deck").selected_text(selected_name).show_ui(ui, |ui| {
                for (index, name) in decks.iter().enumerate() {
                    ui.selectable_value(selected_deck, index, name);
                }
            });

            ui.add_space(16.0);
            if ui.button("Meaning Only").clicked() {
                action = Action::Start(Mode::MeaningOnly);
            }
            if ui.button("Reading + Meaning").clicked() {
                action = Action::Start(Mode::ReadingThenMeaning);
            }
        });

        action
    }

    fn fatal_screen(ui: &mut egui::Ui, error: &HayaoshiError) -> Action {
        let mut action = Action::None;

        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("PLEASE WAIT...").size(24.0).strong());
            ui.add_space(12.0);
            ui.label(RichText::new("Error:").color(RED).size(18.0));
            ui.label(RichText::new(error.to_string()).color(RED));
            ui.add_space(16.0);
            if ui.button("Back").clicked() {
                action = Action::Back;
            }
        });

        action
    }

    fn quiz_screen(ui: &mut egui::Ui, session: &QuizSession<AnkiScheduler, SharedTimer>) -> Action {
        let mut action = Action::None;

        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            let (banner, color) = Self::banner(session);
            ui.label(RichText::new(banner).size(26.0).color(color).strong());
            ui.add_space(10.0);

            if session.state() == SessionState::Done {
                ui.label(RichText::new("No more cards due in this deck.").color(DIM));
                ui.add_space(12.0);
                if ui.button("Back").clicked() {
                    action = Action::Back;
                }
                return;
            }

            let Some(question) = session.question() else {
                return;
            };

            let reading = if session.show_reading() { question.reading.as_str() } else { " " };
            ui.label(RichText::new(reading).size(18.0).color(DIM));
            ui.label(RichText::new(&question.prompt).size(34.0).strong());
            ui.add_space(14.0);

            let reveal = matches!(session.state(), SessionState::Answer | SessionState::New);
            let wrong_pick = match session.last_outcome() {
                Some(Outcome::Wrong(index)) => Some(index),
                _ => None,
            };

            for index in 0..session.config().option_count {
                let text = question.option_at(index).unwrap_or("---");
                let mut line = RichText::new(format!("{}) {}", index + 1, text)).size(16.0);
                if reveal && question.is_correct(index) {
                    line = line.color(GREEN);
                } else if wrong_pick == Some(index) {
                    line = line.color(RED);
                }
                ui.label(line);
            }

            if session.state() == SessionState::New {
                ui.add_space(12.0);
                ui.label(RichText::new("Press Enter to continue").color(DIM));
            }
        });

        action
    }

    fn banner(session: &QuizSession<AnkiScheduler, SharedTimer>) -> (String, Color32) {
        match session.state() {
            SessionState::Initial => ("PLEASE WAIT...".to_string(), DIM),
            SessionState::Countdown => {
                let seconds = session.time_left_sec();
                (format!("{:02}:{:02}", seconds / 60, seconds % 60), GREEN)
            }
            SessionState::Answer => match session.last_outcome() {
                Some(Outcome::Correct) => ("CORRECT!".to_string(), GREEN),
                Some(Outcome::Wrong(_)) => ("WRONG!".to_string(), RED),
                Some(Outcome::GaveUp) => ("DON'T KNOW!".to_string(), RED),
                Some(Outcome::TimedOut) | None => ("TIMEOUT!".to_string(), RED),
            },
            SessionState::New => ("NEW!".to_string(), YELLOW),
            SessionState::Done => ("DONE!".to_string(), GREEN),
        }
    }
}

impl eframe::App for HayaoshiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Screen::Quiz(session) = &mut self.screen {
            while self.timer.poll() {
                session.on_timer();
            }
            Self::handle_keys(ctx, session);
        }

        let mut action = Action::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = match &self.screen {
                Screen::Start => Self::start_screen(
                    ui,
                    &self.decks,
                    &mut self.selected_deck,
                    self.deck_error.as_deref(),
                ),
                Screen::Fatal(error) => Self::fatal_screen(ui, error),
                Screen::Quiz(session) => Self::quiz_screen(ui, session),
            };
        });

        match action {
            Action::None => {}
            Action::Start(mode) => self.start_session(mode),
            Action::Refresh => self.refresh_decks(),
            Action::Back => {
                self.screen = Screen::Start;
                self.refresh_decks();
            }
        }

        if let Some(delay) = self.timer.time_to_fire() {
            ctx.request_repaint_after(delay.min(Duration::from_millis(100)));
        }
    }
}
