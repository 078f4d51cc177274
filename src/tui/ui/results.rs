//! Main display: preprocessed row and prediction result.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::domain::{EncodedRecord, Prediction, FEATURE_COUNT};
use crate::tui::styles::Theme;

/// Prediction panel state
#[derive(Debug, Clone, Default)]
pub enum PredictionState {
    /// Nothing requested since the last input change
    #[default]
    Idle,
    /// Result of the last Predict
    Complete { prediction: Prediction },
    /// Error from the last Predict
    Error { message: String },
}

/// Render the main display area
pub fn render_results(
    f: &mut Frame,
    area: Rect,
    encoded: &EncodedRecord,
    dropped: &[String],
    state: &PredictionState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FEATURE_COUNT as u16 + 3), // Preprocessed row
            Constraint::Length(4),                        // Dropped indicators
            Constraint::Min(0),                           // Prediction
        ])
        .split(area);

    render_encoded_table(f, chunks[0], encoded);
    render_dropped(f, chunks[1], dropped);
    render_prediction(f, chunks[2], state);
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn render_encoded_table(f: &mut Frame, area: Rect, encoded: &EncodedRecord) {
    let rows: Vec<Row> = encoded
        .columns()
        .map(|(name, value)| {
            Row::new(vec![
                Cell::from(Span::styled(name, Theme::text_secondary())),
                Cell::from(Span::styled(format_value(value), Theme::text())),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(8)])
        .header(Row::new(vec![
            Cell::from(Span::styled("Column", Theme::focused())),
            Cell::from(Span::styled("Value", Theme::focused())),
        ]))
        .block(
            Block::default()
                .title(Span::styled(" Preprocessed Input Data ", Theme::focused()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    f.render_widget(table, area);
}

fn render_dropped(f: &mut Frame, area: Rect, dropped: &[String]) {
    let line = if dropped.is_empty() {
        Line::from(Span::styled(
            "All categorical answers reach the model.",
            Theme::text_muted(),
        ))
    } else {
        Line::from(vec![
            Span::styled("Not in model schema: ", Theme::warning()),
            Span::styled(dropped.join(", "), Theme::text_muted()),
        ])
    };

    let p = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" Dropped Indicator Columns ", Theme::focused()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    f.render_widget(p, area);
}

fn render_prediction(f: &mut Frame, area: Rect, state: &PredictionState) {
    let (lines, border) = match state {
        PredictionState::Idle => (
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Adjust the inputs, then press [Enter] to predict",
                    Theme::text_muted(),
                )),
            ],
            Theme::border(),
        ),
        PredictionState::Complete { prediction } => (
            vec![
                Line::from(vec![
                    Span::styled("Prediction Array: ", Theme::text_secondary()),
                    Span::styled(format!("[{}]", prediction.code), Theme::text()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Predicted Obesity Level: ", Theme::text_secondary()),
                    Span::styled(prediction.label(), Theme::risk(prediction.risk)),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    prediction.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                    Theme::text_muted(),
                )),
            ],
            Theme::border_focused(),
        ),
        PredictionState::Error { message } => (
            vec![
                Line::from(""),
                Line::from(Span::styled("! Error", Theme::danger())),
                Line::from(""),
                Line::from(Span::styled(message.clone(), Theme::text())),
            ],
            Theme::danger(),
        ),
    };

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(Span::styled(" Prediction ", Theme::focused()))
                .borders(Borders::ALL)
                .border_style(border),
        );

    f.render_widget(p, area);
}
