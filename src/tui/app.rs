//! Main TUI application state machine.
//!
//! Handles:
//! - Model loading at startup
//! - Input event handling
//! - Synchronous prediction on request

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::linear::{LinearPredictor, MODEL_PATH};
use crate::application::PredictionService;

use super::terminal::TerminalGuard;
use super::ui::{
    render_disclaimer,
    results::{render_results, PredictionState},
    render_title,
    sidebar::{render_sidebar, SidebarState},
};

/// Input poll interval for the event loop.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Coarse adjustment factor for PgUp/PgDn.
const COARSE_STEPS: i64 = 10;

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Prediction service holding the loaded classifier
    service: PredictionService<LinearPredictor>,

    /// Sidebar widget state
    sidebar_state: SidebarState,

    /// Prediction panel state
    prediction_state: PredictionState,
}

impl App {
    /// Create a new application, loading the model from its fixed path.
    ///
    /// # Errors
    /// Returns error if the model file is missing, empty or invalid.
    pub fn new() -> Result<Self> {
        Self::from_model_path(Path::new(MODEL_PATH))
    }

    /// Create a new application with the model at `model_path`.
    ///
    /// # Errors
    /// Returns error if the model cannot be loaded. No predictor is
    /// constructed in that case.
    pub fn from_model_path(model_path: &Path) -> Result<Self> {
        let predictor = LinearPredictor::load(model_path)
            .inspect_err(|e| tracing::error!("Failed to load model from {:?}: {}", model_path, e))
            .with_context(|| format!("Cannot start without a model at {}", model_path.display()))?;

        Ok(Self::with_dependencies(PredictionService::new(Arc::new(
            predictor,
        ))))
    }

    /// Create application with an injected prediction service.
    #[must_use]
    pub fn with_dependencies(service: PredictionService<LinearPredictor>) -> Self {
        Self {
            should_quit: false,
            service,
            sidebar_state: SidebarState::default(),
            prediction_state: PredictionState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        let guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let result = self.main_loop(&mut terminal);

        drop(guard);
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // The preprocessed row always reflects the current widgets.
            let record = self.sidebar_state.to_feature_record();
            let encoded = self.service.preprocess(&record);
            let dropped = self.service.dropped_indicators(&record);

            terminal.draw(|f| {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // Title
                        Constraint::Min(0),    // Sidebar + main
                        Constraint::Length(2), // Disclaimer
                    ])
                    .split(f.area());

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .split(rows[1]);

                render_title(f, rows[0]);
                render_sidebar(f, columns[0], &self.sidebar_state);
                render_results(f, columns[1], &encoded, &dropped, &self.prediction_state);
                render_disclaimer(f, rows[2]);
            })?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => self.sidebar_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.sidebar_state.next_field(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageDown => self.adjust(-COARSE_STEPS),
            KeyCode::PageUp => self.adjust(COARSE_STEPS),
            KeyCode::Home => {
                if self.sidebar_state.set_to_bound(false) {
                    self.prediction_state = PredictionState::Idle;
                }
            }
            KeyCode::End => {
                if self.sidebar_state.set_to_bound(true) {
                    self.prediction_state = PredictionState::Idle;
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.sidebar_state.reset();
                self.prediction_state = PredictionState::Idle;
            }
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => self.predict(),
            _ => {}
        }
    }

    /// A changed input invalidates the shown result.
    fn adjust(&mut self, steps: i64) {
        if self.sidebar_state.adjust(steps) {
            self.prediction_state = PredictionState::Idle;
        }
    }

    fn predict(&mut self) {
        let record = self.sidebar_state.to_feature_record();
        self.prediction_state = match self.service.predict(&record) {
            Ok(prediction) => PredictionState::Complete { prediction },
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                PredictionState::Error {
                    message: e.to_string(),
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ArtifactError;
    use tempfile::tempdir;

    fn assert_missing_or_empty(err: &anyhow::Error) {
        assert!(matches!(
            err.downcast_ref::<ArtifactError>(),
            Some(ArtifactError::MissingOrEmpty { .. })
        ));
        assert_eq!(err.root_cause().to_string(), "Model file not found or is empty.");
    }

    fn bundled_app() -> App {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(MODEL_PATH);
        App::from_model_path(&path).expect("bundled model should load")
    }

    #[test]
    fn test_missing_model_halts_startup() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("best_model.json");
        let err = App::from_model_path(&path).err().expect("startup must fail");
        assert_missing_or_empty(&err);
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_empty_model_halts_startup() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("best_model.json");
        std::fs::write(&path, b"").expect("write");
        let err = App::from_model_path(&path).err().expect("startup must fail");
        assert_missing_or_empty(&err);
    }

    #[test]
    fn test_predict_then_adjust_returns_to_idle() {
        let mut app = bundled_app();
        assert!(matches!(app.prediction_state, PredictionState::Idle));

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        let PredictionState::Complete { prediction } = &app.prediction_state else {
            panic!("expected a prediction, got {:?}", app.prediction_state);
        };
        assert_eq!(prediction.code, 2);
        assert_eq!(prediction.label(), "Moderate Obesity Risk");

        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert!(matches!(app.prediction_state, PredictionState::Idle));
    }

    #[test]
    fn test_heavier_input_raises_risk() {
        let mut app = bundled_app();
        // Focus Weight and push it to the top of its range.
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::End, KeyModifiers::NONE);
        assert_eq!(app.sidebar_state.to_feature_record().weight, 150.0);

        app.handle_key(KeyCode::Char('p'), KeyModifiers::NONE);
        let PredictionState::Complete { prediction } = &app.prediction_state else {
            panic!("expected a prediction, got {:?}", app.prediction_state);
        };
        assert_eq!(prediction.code, 4);
    }

    #[test]
    fn test_unloaded_service_reports_error() {
        let mut app = App::with_dependencies(PredictionService::unloaded());
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        match &app.prediction_state {
            PredictionState::Error { message } => {
                assert_eq!(message, "Model is not loaded properly.")
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = bundled_app();
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = bundled_app();
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit);
    }
}
