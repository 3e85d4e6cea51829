use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::tui::SubjectsPage;

pub fn draw(f: &mut Frame, page: &SubjectsPage, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Subjects ({} topics) ", page.topics.items.len()))
        .title_style(Style::default().fg(Color::Cyan));

    if let Some(error) = &page.error {
        let paragraph = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    if page.topics.items.is_empty() {
        let paragraph = Paragraph::new("No topics found.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = page
        .topics
        .items
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            // Subject name only on the first topic of each group
            let first_of_subject =
                i == 0 || page.topics.items[i - 1].subject != entry.subject;
            let subject = if first_of_subject {
                truncate(&entry.subject, 22)
            } else {
                String::new()
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<24}", subject),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:<32}", truncate(&entry.name, 30)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(entry.file.as_str(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let header = Line::from(vec![
        Span::styled(
            format!("{:<24}", "Subject"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<32}", "Topic"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "File",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(page.topics.selected);

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Header row, then the list below it
    let header_area = Rect { height: 1, ..inner };
    f.render_widget(Paragraph::new(header), header_area);

    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };

    f.render_stateful_widget(list, list_area, &mut state);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
