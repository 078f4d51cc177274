//! UI module: View components for the TUI.

pub mod results;
pub mod sidebar;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

pub fn render_title(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Obesity Level Estimation", Theme::title()),
        Span::styled(" │ ", Theme::text_muted()),
        Span::styled("Lifestyle-based risk estimate", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: This tool provides indicative estimates and does not replace professional medical evaluation.",
        Theme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
