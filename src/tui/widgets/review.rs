use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::QuizResult;
use crate::session::Feedback;

pub fn draw_summary(f: &mut Frame, result: &QuizResult, area: Rect) {
    let percentage = result.percentage();

    let text = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} / {}", result.score, result.total),
                Style::default()
                    .fg(if percentage >= 70.0 {
                        Color::Green
                    } else if percentage >= 50.0 {
                        Color::Yellow
                    } else {
                        Color::Red
                    })
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({:.0}%)", percentage),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Attempted: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} / {}", result.attempted, result.total),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Result ")
        .title_style(Style::default().fg(Color::Magenta));

    f.render_widget(Paragraph::new(text).block(block), area);
}

/// Rows the feedback box needs to show every wrapped line at `width`,
/// borders included.
pub fn feedback_height(feedback: &Feedback, width: u16) -> u16 {
    let lines = feedback_text(feedback).line_count(width.saturating_sub(2));
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

pub fn draw_feedback(f: &mut Frame, feedback: &Feedback, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Feedback ")
        .border_style(Style::default().fg(verdict_color(feedback)));

    f.render_widget(feedback_text(feedback).block(block), area);
}

fn verdict_color(feedback: &Feedback) -> Color {
    if feedback.correct {
        Color::Green
    } else {
        Color::Red
    }
}

fn feedback_text<'a>(feedback: &Feedback<'a>) -> Paragraph<'a> {
    let verdict_color = verdict_color(feedback);

    let text = vec![
        Line::from(Span::styled(
            feedback.verdict(),
            Style::default()
                .fg(verdict_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Your answer: ", Style::default().fg(Color::Gray)),
            Span::styled(
                feedback.your_answer_label(),
                Style::default().fg(if feedback.your_answer.is_some() {
                    Color::White
                } else {
                    Color::DarkGray
                }),
            ),
        ]),
        Line::from(vec![
            Span::styled("Correct answer: ", Style::default().fg(Color::Gray)),
            Span::styled(feedback.correct_answer, Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Explanation: ", Style::default().fg(Color::Gray)),
            Span::styled(
                feedback.explanation_label(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    Paragraph::new(text).wrap(Wrap { trim: true })
}
