//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{ActivePane, App, Form, InputMode};
use crate::output::truncate;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    // Create vertical layout for status bar at the bottom
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    // Split the main area into three panes
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(45),
            Constraint::Percentage(35),
        ])
        .split(outer_chunks[0]);

    draw_categories_pane(frame, app, pane_chunks[0]);
    draw_links_pane(frame, app, pane_chunks[1]);
    draw_detail_pane(frame, app, pane_chunks[2]);

    match app.input_mode {
        InputMode::Search => draw_search_input(frame, app, outer_chunks[1]),
        _ => draw_status_bar(frame, app, outer_chunks[1]),
    }

    if let Some(form) = &app.form {
        draw_form(frame, form);
    }
    if let Some(pending) = &app.pending {
        draw_dialog(frame, " Confirm ", &pending.prompt(), "y: yes   n: no", Color::Yellow);
    }
    if let Some(message) = &app.error_message {
        draw_dialog(frame, " Error ", message, "Press any key to close", Color::Red);
    }
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn pane_styles(is_active: bool) -> (Style, Style) {
    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let highlight_style = if is_active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };
    (border_style, highlight_style)
}

/// Draw the categories pane (left)
fn draw_categories_pane(frame: &mut Frame, app: &App, area: Rect) {
    let (border_style, highlight_style) = pane_styles(app.active_pane == ActivePane::Categories);

    let items: Vec<ListItem> = app
        .categories
        .iter()
        .map(|name| {
            // Mark the row the links pane is showing
            if *name == app.title {
                ListItem::new(format!("● {}", name))
            } else {
                ListItem::new(format!("  {}", name))
            }
        })
        .collect();

    let block = Block::default()
        .title(" Categories ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    state.select(Some(app.category_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the links pane (middle)
fn draw_links_pane(frame: &mut Frame, app: &App, area: Rect) {
    let (border_style, highlight_style) = pane_styles(app.active_pane == ActivePane::Links);
    let max_len = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .links
        .iter()
        .map(|view| {
            let name = Line::from(truncate(&view.link.name, max_len));
            let url = Line::from(Span::styled(
                truncate(&view.link.url, max_len.saturating_sub(2)),
                Style::default().add_modifier(Modifier::DIM),
            ));
            ListItem::new(vec![name, url])
        })
        .collect();

    let title = format!(" {} ({}) ", app.title, app.links.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if items.is_empty() {
        let hint = if app.search_input.is_empty() {
            "No links yet"
        } else {
            "No links match the search"
        };
        let paragraph = Paragraph::new(Span::styled(
            hint,
            Style::default().add_modifier(Modifier::DIM),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    state.select(Some(app.link_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the detail pane (right)
fn draw_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let (border_style, _) = pane_styles(app.active_pane == ActivePane::Detail);

    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let content = match app.current_link() {
        Some(view) => {
            let desc = if view.link.desc.is_empty() {
                "-"
            } else {
                view.link.desc.as_str()
            };
            vec![
                Line::from(vec![Span::styled("Name: ", bold), Span::raw(&view.link.name)]),
                Line::from(""),
                Line::from(vec![Span::styled("URL: ", bold), Span::raw(&view.link.url)]),
                Line::from(""),
                Line::from(vec![Span::styled("Description: ", bold), Span::raw(desc)]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Category: ", bold),
                    Span::raw(&view.category),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!("ID: {}", view.link.id),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ]
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select a link to view details",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ],
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = match &app.status_message {
        Some(msg) => msg.clone(),
        None if !app.search_input.is_empty() => {
            format!("search: {}   /:edit  ?:help  q:quit", app.search_input)
        }
        None => "c:category  a:add  d:del  o:open  X:clear  /:search  ?:help  q:quit".to_string(),
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Draw search input at the bottom
fn draw_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let prefix = "/";

    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Cyan)),
        Span::raw(app.search_input.as_str()),
        Span::styled(
            format!("  ({} matches)", app.links.len()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + prefix.len() as u16 + app.search_input.chars().count() as u16;
    frame.set_cursor_position((cursor_x, area.y));
}

/// Centered popup of at most the given size
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Draw the modal form
fn draw_form(frame: &mut Frame, form: &Form) {
    let height = form.fields.len() as u16 * 3 + 6;
    let area = popup_area(frame.area(), 60, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> =
        form.fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let input = Paragraph::new(field.value.as_str()).block(
            Block::default()
                .title(field.label)
                .borders(Borders::ALL)
                .border_style(style),
        );
        frame.render_widget(input, rows[i]);

        if focused {
            let cursor_x = rows[i].x + 1 + field.value.chars().count() as u16;
            let cursor_x = cursor_x.min(rows[i].right().saturating_sub(2));
            frame.set_cursor_position((cursor_x, rows[i].y + 1));
        }
    }

    let error_row = rows[form.fields.len()];
    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            error_row,
        );
    }

    let hint_row = rows[form.fields.len() + 1];
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Enter: save   Tab: next field   Esc: cancel",
            Style::default().add_modifier(Modifier::DIM),
        )),
        hint_row,
    );
}

/// Draw a small message box with a footer hint
fn draw_dialog(frame: &mut Frame, title: &str, message: &str, hint: &str, color: Color) {
    let area = popup_area(frame.area(), 56, 9);
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = message.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = popup_area(frame.area(), 50, 22);

    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  h/l, ←/→    Switch panes"),
        Line::from("  Tab         Cycle panes"),
        Line::from("  Enter       Select category / Open link"),
        Line::from(""),
        Line::from("Commands:"),
        Line::from("  c           New category"),
        Line::from("  a           Add link to selected category"),
        Line::from("  o           Open link in browser"),
        Line::from("  d           Delete category or link"),
        Line::from("  X           Delete everything"),
        Line::from("  /           Search all fields"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}
