use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::widgets::{practice, subjects};
use super::{App, Page};
use crate::session::Mode;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumbs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Help bar
        ])
        .split(f.area());

    draw_crumbs(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_help_bar(f, app, chunks[2]);
}

fn crumbs(app: &App) -> Vec<Span<'_>> {
    let sep = || Span::styled(" / ", Style::default().fg(Color::DarkGray));
    let current = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    match &app.page {
        Page::Subjects(_) => vec![Span::styled("Subjects", current)],
        Page::Practice(page) => vec![
            Span::styled("Subjects", Style::default().fg(Color::Gray)),
            sep(),
            Span::styled(page.params.subject.as_str(), Style::default().fg(Color::Gray)),
            sep(),
            Span::styled(page.params.chapter.as_str(), current),
        ],
    }
}

fn draw_crumbs(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(crumbs(app))).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" MCQ Practice "),
    );

    f.render_widget(header, area);
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    match &app.page {
        Page::Subjects(page) => subjects::draw(f, page, area),
        Page::Practice(page) => practice::draw(f, page, area),
    }
}

fn key(k: &'static str) -> Span<'static> {
    Span::styled(k, Style::default().fg(Color::Cyan))
}

fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    match &app.page {
        Page::Subjects(_) => {
            spans.extend(vec![
                key("j/k"),
                Span::raw(" Nav  "),
                key("g/G"),
                Span::raw(" Top/Bot  "),
                key("l/<CR>"),
                Span::raw(" Open  "),
            ]);
        }
        Page::Practice(page) => match page.session() {
            None => {
                spans.extend(vec![key("h/<Esc>"), Span::raw(" Back  ")]);
            }
            Some(session) => {
                if session.mode() == Mode::Testing {
                    spans.extend(vec![
                        key("j/k"),
                        Span::raw(" Option  "),
                        key("<Space>/1-9"),
                        Span::raw(" Choose  "),
                    ]);
                }
                spans.extend(vec![
                    key("h/p"),
                    Span::raw(" Previous  "),
                    key("l/n"),
                    Span::raw(format!(" {}  ", session.next_label().as_str())),
                    key("<Esc>"),
                    Span::raw(" Subjects  "),
                ]);
            }
        },
    }

    spans.extend(vec![key("q"), Span::raw(" Quit")]);

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

    f.render_widget(help, area);
}
