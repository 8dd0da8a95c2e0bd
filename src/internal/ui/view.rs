use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use super::app::{App, InputMode};
use crate::internal::notification::NotificationKind;
use crate::internal::ui::sort::SortKey;
use crate::utils::url::extract_domain;

#[tracing::instrument(skip(app, f))]
pub fn draw(app: &mut App, f: &mut Frame) {
    let start = std::time::Instant::now();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, f, chunks[0]);
    render_last_searches(app, f, chunks[1]);
    render_list(app, f, chunks[2]);
    render_status_bar(app, f, chunks[3]);

    // Render notification overlay if present
    if app.notification.is_some() {
        render_notification(app, f);
    }

    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?start.elapsed(), "render.draw");
    }
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" Hacker Stories v{} ", app.app_version),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Search: "),
    ];

    match app.input_mode {
        InputMode::Search => {
            spans.push(Span::styled(
                format!("{}▌", app.saved_search.term),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        }
        InputMode::Normal => {
            spans.push(Span::styled(
                app.saved_search.term.clone(),
                Style::default().fg(Color::Cyan),
            ));
        }
    }

    if app.stories.is_loading {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} fetching", app.get_spinner_char()),
            Style::default().fg(Color::Yellow),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_last_searches(app: &App, f: &mut Frame, area: Rect) {
    let terms = app.last_searches();
    if terms.is_empty() {
        return;
    }

    let mut spans = vec![Span::styled(" Recent:", Style::default().fg(Color::DarkGray))];
    for (i, term) in terms.iter().enumerate() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", i + 1),
            Style::default().fg(Color::Yellow),
        ));
        let label = match term.is_empty() {
            true => "(empty)".to_string(),
            false => term.clone(),
        };
        spans.push(Span::styled(label, Style::default().fg(Color::Gray)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(app: &mut App, f: &mut Frame, area: Rect) {
    let view_start = std::time::Instant::now();

    // The error line does not hide data: a failed re-search keeps showing
    // the previous result set underneath it.
    let mut area = area;
    if app.stories.is_error {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let message = Paragraph::new("Something went wrong ...")
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(message, split[0]);
        area = split[1];
    }

    if app.stories.is_loading {
        let message = Paragraph::new(format!("{} Loading ...", app.get_spinner_char()))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(message, area);
        return;
    }

    let stories = app.visible_stories();
    let items: Vec<ListItem> = stories
        .iter()
        .map(|story| {
            let title_lines = calculate_wrapped_title(&story.title, area.width, 4);
            let title = title_lines.first().cloned().unwrap_or_default();

            let domain = extract_domain(&story.url).unwrap_or_default();
            let meta = format!(
                "    {} | by {} | {} comments | {} points",
                domain, story.author, story.num_comments, story.points
            );

            ListItem::new(vec![
                Line::from(Span::styled(
                    title,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::TOP))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.story_list_state);

    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?view_start.elapsed(), "render.list");
    }
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let sort_label = match app.sort.key {
        SortKey::None => "none".to_string(),
        key => format!(
            "{} {}",
            key,
            match app.sort.is_reverse {
                true => "↑",
                false => "↓",
            }
        ),
    };

    let status = format!(
        " {} stories | sort: {} | /: search  1-5: recent  t/a/c/p: sort  d: dismiss  o: open  q: quit",
        app.stories.data.len(),
        sort_label
    );

    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_notification(app: &App, f: &mut Frame) {
    let Some(notification) = &app.notification else {
        return;
    };

    let area = f.area();
    let width = (notification.message.len() as u16 + 4).min(area.width.saturating_sub(2));
    let popup = Rect::new(
        area.width.saturating_sub(width + 1),
        area.height.saturating_sub(4),
        width,
        3,
    );

    let color = match notification.kind {
        NotificationKind::Info => Color::Green,
        NotificationKind::Error => Color::Red,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(notification.message.clone())
            .style(Style::default().fg(color))
            .block(block),
        popup,
    );
}

/// Wrap a story title to the width left over once `prefix` columns are
/// spoken for. Always yields at least one line for non-empty input.
pub fn calculate_wrapped_title(title: &str, width: u16, prefix: u16) -> Vec<String> {
    let available = width.saturating_sub(prefix).max(1) as usize;
    textwrap::wrap(title, available)
        .into_iter()
        .map(|line| line.to_string())
        .collect()
}
