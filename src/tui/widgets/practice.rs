use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::review;
use crate::session::QuizSession;
use crate::tui::{PracticeContent, PracticePage};

pub fn draw(f: &mut Frame, page: &PracticePage, area: Rect) {
    match &page.content {
        PracticeContent::Message(message) => draw_message(f, message, area),
        PracticeContent::Quiz(session) => draw_quiz(f, session, page.cursor, area),
    }
}

fn draw_message(f: &mut Frame, message: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Practice ")
        .title_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

// Rows kept for the question card before the feedback box may grow.
const QUESTION_MIN_HEIGHT: u16 = 4;

fn draw_quiz(f: &mut Frame, session: &QuizSession, cursor: usize, area: Rect) {
    let feedback = session.feedback();
    let summary_height = if session.result().is_some() { 4 } else { 0 };

    let mut constraints = Vec::new();
    if summary_height > 0 {
        constraints.push(Constraint::Length(summary_height)); // Result summary
    }
    constraints.push(Constraint::Length(3)); // Progress
    constraints.push(Constraint::Min(QUESTION_MIN_HEIGHT)); // Question card
    if let Some(feedback) = &feedback {
        // The feedback grows with its explanation; the card scrolls instead
        let spare = area
            .height
            .saturating_sub(summary_height + 3 + 3 + QUESTION_MIN_HEIGHT);
        let height = review::feedback_height(feedback, area.width).min(spare.max(3));
        constraints.push(Constraint::Length(height)); // Feedback
    }
    constraints.push(Constraint::Length(3)); // Navigation

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    let mut chunk = || {
        let area = chunks[next];
        next += 1;
        area
    };

    if let Some(result) = session.result() {
        review::draw_summary(f, &result, chunk());
    }
    draw_progress(f, session, chunk());
    draw_question(f, session, cursor, chunk());
    if let Some(feedback) = &feedback {
        review::draw_feedback(f, feedback, chunk());
    }
    draw_nav(f, session, chunk());
}

fn draw_progress(f: &mut Frame, session: &QuizSession, area: Rect) {
    let (number, total) = session.progress();
    let answered = session.answers().len();

    let text = Line::from(vec![
        Span::styled("Question: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} / {}", number, total),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Answered: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", answered),
            Style::default().fg(Color::Cyan),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} Mode ", session.mode().label()))
        .title_style(Style::default().fg(if session.is_locked() {
            Color::Magenta
        } else {
            Color::Cyan
        }));

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_question(f: &mut Frame, session: &QuizSession, cursor: usize, area: Rect) {
    let question = session.current_question();
    let selected = session.selected();
    let locked = session.is_locked();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Q{}. ", session.current_index() + 1),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(question.prompt.as_str(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
    ];

    for (i, option) in question.options.iter().enumerate() {
        let is_selected = selected == Some(i);
        let marker = if is_selected { "(•)" } else { "( )" };
        let pointer = if !locked && i == cursor { "> " } else { "  " };

        let style = if locked {
            // Review colours: the right answer in green, a wrong pick in red
            if i == question.answer_index {
                Style::default().fg(Color::Green)
            } else if is_selected {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        } else if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(pointer, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{} {}. ", marker, i + 1), style),
            Span::styled(option.as_str(), style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Question ")
        .title_style(Style::default().fg(Color::Yellow));

    let scroll = card_scroll(&lines, 2 + cursor, block.inner(area));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

/// First wrapped row to show so that line `focus` ends inside `inner`.
fn card_scroll(lines: &[Line], focus: usize, inner: Rect) -> u16 {
    let focus = focus.min(lines.len().saturating_sub(1));
    let bottom = Paragraph::new(lines[..=focus].to_vec())
        .wrap(Wrap { trim: false })
        .line_count(inner.width);
    let scroll = bottom.saturating_sub(usize::from(inner.height));
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

fn draw_nav(f: &mut Frame, session: &QuizSession, area: Rect) {
    let prev_style = if session.can_retreat() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = Line::from(vec![
        Span::styled("[ Previous ]", prev_style),
        Span::raw("   "),
        Span::styled(
            format!("[ {} ]", session.next_label().as_str()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(text).block(block), area);
}
