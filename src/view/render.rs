//! Frame rendering for the terminal preview.
//!
//! Pure functions of the [`Site`] and the folded [`Surface`]; nothing here
//! mutates either.

use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

use super::constants::{
    HEADER_HEIGHT, OVERLAY_POPUP_HEIGHT_PERCENT, OVERLAY_POPUP_WIDTH_PERCENT, STATUS_BAR_HEIGHT,
};
use super::surface::Surface;
use crate::content;
use crate::model::{DetailKind, Language, NavigationState, Target, TypewriterSlot};
use crate::state::Site;

/// Render one frame.
pub fn render(frame: &mut Frame, site: &Site, surface: &Surface) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], site, surface.language());
    match site.current_state() {
        NavigationState::Hero { .. } => render_hero(frame, chunks[1], surface),
        NavigationState::ContentPage { index } => render_page(frame, chunks[1], site, index, surface),
        NavigationState::DetailOverlay { parent_index, kind } => {
            render_page(frame, chunks[1], site, parent_index, surface);
            render_overlay(frame, chunks[1], kind, surface);
        }
    }
    render_status(frame, chunks[2], site);
}

fn render_header(frame: &mut Frame, area: Rect, site: &Site, lang: Language) {
    let current = site.current_state().page_index();
    let mut spans = vec![Span::styled(
        "folio ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for page in 0..site.config().pages.count {
        let marker = if Some(page) == current { "●" } else { "○" };
        spans.push(Span::raw(marker));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        content::LANGUAGE_TOGGLE.get(lang),
        Style::default().fg(Color::Yellow),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Split `text` at `percent` of its characters: (filled, rest).
pub fn split_filled(text: &str, percent: f64) -> (String, String) {
    let len = text.chars().count();
    let filled = ((len as f64) * percent.clamp(0.0, 100.0) / 100.0).round() as usize;
    let head = text.chars().take(filled).collect();
    let tail = text.chars().skip(filled).collect();
    (head, tail)
}

fn render_hero(frame: &mut Frame, area: Rect, surface: &Surface) {
    let lang = surface.language();
    let filled = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let empty = Style::default().fg(Color::DarkGray);

    let mut lines = vec![Line::default()];
    for (i, text) in content::HEADLINE.iter().enumerate() {
        let (head, tail) = split_filled(text.get(lang), surface.mask(i));
        lines.push(Line::from(vec![
            Span::styled(head, filled),
            Span::styled(tail, empty),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        surface
            .text(Target::Typewriter(TypewriterSlot::HeroIndicator))
            .to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_page(frame: &mut Frame, area: Rect, site: &Site, index: usize, surface: &Surface) {
    let lang = surface.language();
    let title = content::page_title(index)
        .map(|t| t.get(lang).to_string())
        .unwrap_or_else(|| format!("Page {}", index + 1));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(format!("Page {} of {}", index + 1, site.config().pages.count)),
        Line::from(format!(
            "strip translateY {:.0}px",
            surface.translate(Target::PageStrip)
        )),
    ];
    if let Some(kind) = site.config().overlay_for_page(index) {
        if site.overlay(kind).is_some() {
            lines.push(Line::from(Span::styled(
                "Enter: open detail",
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    let is_rubber_page = site.navigator().and_then(|n| n.rubber_page()) == Some(index);
    match site.rubber().filter(|_| is_rubber_page) {
        Some(stage) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(lines.len() as u16),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ])
                .split(inner);
            frame.render_widget(Paragraph::new(lines), chunks[0]);

            let state = stage.state();
            let rubber = &site.config().rubber;
            let gauges = [
                ("inner", state.inner, rubber.inner_max, Color::Green),
                ("reveal", state.reveal, rubber.reveal_max, Color::Blue),
                ("overscroll", state.overscroll, rubber.overscroll_max, Color::Magenta),
            ];
            for (chunk, (label, value, max, color)) in chunks[1..4].iter().zip(gauges) {
                let gauge = Gauge::default()
                    .block(Block::default().borders(Borders::ALL).title(label))
                    .gauge_style(Style::default().fg(color))
                    .ratio(ratio(value, max))
                    .label(format!("{value:.0}/{max:.0}"));
                frame.render_widget(gauge, *chunk);
            }
        }
        None => {
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }
    }
}

fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Popup rectangle centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn render_overlay(frame: &mut Frame, area: Rect, kind: DetailKind, surface: &Surface) {
    let popup = centered_rect(OVERLAY_POPUP_WIDTH_PERCENT, OVERLAY_POPUP_HEIGHT_PERCENT, area);
    frame.render_widget(Clear, popup);

    let lang = surface.language();
    let mut lines = vec![Line::default()];
    if kind == DetailKind::Design {
        lines.push(Line::from(Span::styled(
            surface
                .text(Target::Typewriter(TypewriterSlot::DesignDetail))
                .to_string(),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "Backspace: close",
        Style::default().fg(Color::Yellow),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", content::overlay_title(kind).get(lang)));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}

/// One-line description of the navigation state.
pub fn state_label(state: NavigationState, page_count: usize) -> String {
    match state {
        NavigationState::Hero { fill_progress } => format!("hero {fill_progress:.0}%"),
        NavigationState::ContentPage { index } => format!("page {}/{page_count}", index + 1),
        NavigationState::DetailOverlay { parent_index, kind } => {
            format!("{kind} detail on page {}/{page_count}", parent_index + 1)
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, site: &Site) {
    let mut spans = vec![Span::styled(
        state_label(site.current_state(), site.config().pages.count),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if site.is_transitioning() {
        spans.push(Span::styled(" [moving]", Style::default().fg(Color::Yellow)));
    }
    if !site.init_errors().is_empty() {
        spans.push(Span::styled(
            format!(" [{} disabled]", site.init_errors().len()),
            Style::default().fg(Color::Red),
        ));
    }
    spans.push(Span::styled(
        "  wheel/↑↓ scroll  1-9 jump  Esc hero  l lang  q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
