//! Rendering. Reads the render surface and controller state; writes
//! nothing back.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Tabs},
    Frame,
};

use crate::catalog::catalog;
use crate::color::RgbColor;
use crate::constants::APP_NAME;
use crate::content::Section;
use crate::surface::{RenderSurface, SurfaceVar};
use crate::tui::{rem_rows, AppState, InputMode, SettingsPanel, SETTINGS_ROWS};

/// Resolves a surface color variable to a terminal color.
///
/// An unparseable value degrades to the terminal default rather than
/// failing the frame.
fn var_color(surface: &RenderSurface, var: SurfaceVar) -> Color {
    RgbColor::from_hex(surface.get(var))
        .map_or(Color::Reset, |c| Color::Rgb(c.r, c.g, c.b))
}

/// Draws one frame.
pub fn render(f: &mut Frame, state: &AppState) {
    let surface = &state.surface;
    let background = Style::default()
        .bg(var_color(surface, SurfaceVar::BackgroundColor))
        .fg(var_color(surface, SurfaceVar::TextColor));
    f.render_widget(Block::default().style(background), f.area());

    let [header, tabs, body, quick, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_header(f, state, header);
    render_tabs(f, state, tabs);
    render_body(f, state, body);
    render_quick_switch(f, state, quick);
    render_status(f, state, status);

    if state.mode == InputMode::Settings {
        render_settings_panel(f, state);
    }
}

fn render_header(f: &mut Frame, state: &AppState, area: Rect) {
    let surface = &state.surface;
    let title_style = Style::default()
        .fg(var_color(surface, SurfaceVar::TextColor))
        .add_modifier(Modifier::BOLD);
    let subtitle_style = Style::default().fg(var_color(surface, SurfaceVar::AccentColor));

    // The typography scale drives the header treatment: larger title
    // sizes get the spaced-out rendition.
    let title = if rem_rows(surface.get(SurfaceVar::TitleFontSize)) >= 3 {
        spaced(&state.site.title)
    } else {
        state.site.title.clone()
    };

    let lines = vec![
        Line::styled(title, title_style),
        Line::styled(state.site.subtitle.clone(), subtitle_style),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// "Jordan Vale" -> "J o r d a n   V a l e"
fn spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn render_tabs(f: &mut Frame, state: &AppState, area: Rect) {
    let surface = &state.surface;
    let titles: Vec<Line> = state
        .site
        .sections
        .iter()
        .map(|s| Line::from(s.title.clone()))
        .collect();

    let tabs = Tabs::new(titles)
        .style(Style::default().fg(var_color(surface, SurfaceVar::TextColor)))
        .highlight_style(
            Style::default()
                .fg(var_color(surface, SurfaceVar::AccentColor))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .select(state.navigation.active_index().unwrap_or(0));
    f.render_widget(tabs, area);
}

fn render_body(f: &mut Frame, state: &AppState, area: Rect) {
    let surface = &state.surface;
    let section = state.active_section();
    let lines = section_lines(state, section);
    let indent = rem_rows(surface.get(SurfaceVar::SectionPadding));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(indent)))
        .scroll((state.scroll, 0));
    f.render_widget(paragraph, area);
}

/// Builds the section's display lines. Must stay in step with the row
/// extents from `section_rows`, which the reveal observations use.
fn section_lines(state: &AppState, section: &Section) -> Vec<Line<'static>> {
    let surface = &state.surface;
    let spacing = rem_rows(surface.get(SurfaceVar::SectionSpacing));
    let top_pad = rem_rows(surface.get(SurfaceVar::SectionPadding)) / 2;

    let text_style = Style::default().fg(var_color(surface, SurfaceVar::TextColor));
    let lead_style = Style::default()
        .fg(var_color(surface, SurfaceVar::AccentColor))
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for _ in 0..top_pad {
        lines.push(Line::default());
    }

    for block in &section.blocks {
        // Watched blocks stay dimmed and offset until their one-shot
        // reveal; reduced motion renders everything settled.
        let hidden = block.reveal_watched()
            && !state.reveal.is_revealed(&block.id)
            && !surface.reduce_motion();

        for (i, text) in block.lines.iter().enumerate() {
            let base = if i == 0 && block.reveal_watched() {
                lead_style
            } else {
                text_style
            };
            let (style, offset) = if hidden {
                (base.add_modifier(Modifier::DIM), "  ")
            } else {
                (base, "")
            };
            lines.push(Line::styled(format!("{offset}{text}"), style));
        }
        for _ in 0..spacing {
            lines.push(Line::default());
        }
    }
    lines
}

fn render_quick_switch(f: &mut Frame, state: &AppState, area: Rect) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, id) in state.quick_switch.buttons().iter().enumerate() {
        let palette = catalog().palette(id);
        let mut style = Style::default()
            .bg(Color::Rgb(palette.primary.r, palette.primary.g, palette.primary.b))
            .fg(Color::Rgb(palette.text.r, palette.text.g, palette.text.b));
        // The pulse is suppressed entirely under reduced motion.
        if state.quick_switch.is_pulsing(i) && !state.surface.reduce_motion() {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} {} ", i + 1, id), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(f: &mut Frame, state: &AppState, area: Rect) {
    let surface = &state.surface;
    let style = Style::default()
        .bg(var_color(surface, SurfaceVar::SecondaryColor))
        .fg(var_color(surface, SurfaceVar::TextColor));

    let left = match state.mode {
        InputMode::Goto => format!("goto section: {}_", state.goto_buffer),
        _ => state.status.clone().unwrap_or_else(|| {
            "q quit · s settings · g goto · tab/←/→ sections · j/k scroll · 1-6 palette"
                .to_string()
        }),
    };
    let right = format!(
        "{} {} · motion {}",
        surface.get(SurfaceVar::TransitionDuration),
        surface.get(SurfaceVar::TransitionTiming),
        if surface.reduce_motion() { "off" } else { "on" },
    );

    let [left_area, right_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(right.len() as u16 + 1)])
            .areas(area);
    f.render_widget(Paragraph::new(left).style(style), left_area);
    f.render_widget(
        Paragraph::new(right)
            .style(style)
            .alignment(Alignment::Right),
        right_area,
    );
}

fn render_settings_panel(f: &mut Frame, state: &AppState) {
    let surface = &state.surface;
    let area = centered_rect(44, (SETTINGS_ROWS.len() as u16) + 4, f.area());
    f.render_widget(Clear, area);

    let prefs = state.store.get();
    let text_style = Style::default().fg(var_color(surface, SurfaceVar::TextColor));
    let selected_style = Style::default()
        .fg(var_color(surface, SurfaceVar::BackgroundColor))
        .bg(var_color(surface, SurfaceVar::AccentColor))
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in SETTINGS_ROWS.iter().enumerate() {
        let value = SettingsPanel::displayed_value(*row, &prefs);
        let style = if i == state.settings.selected_index() {
            selected_style
        } else {
            text_style
        };
        lines.push(Line::styled(
            format!(" {:<16} {:>20} ", row.label(), value),
            style,
        ));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        " j/k select · h/l change · esc close",
        text_style.add_modifier(Modifier::DIM),
    ));

    let block = Block::default()
        .title(format!(" {APP_NAME} Settings "))
        .borders(Borders::ALL)
        .style(
            Style::default()
                .bg(var_color(surface, SurfaceVar::SecondaryColor))
                .fg(var_color(surface, SurfaceVar::PrimaryColor)),
        );
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Centers a fixed-size rectangle inside `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
