//! 界面渲染

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::state::{Focus, InputField, TaskItem, UiState};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;

pub fn draw(frame: &mut Frame, state: &UiState) {
    let [header_area, title_area, description_area, button_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_header(frame, header_area);
    render_input(
        frame,
        title_area,
        " Title ",
        &state.title,
        state.focus == Focus::Title,
    );
    render_input(
        frame,
        description_area,
        " Description ",
        &state.description,
        state.focus == Focus::Description,
    );
    render_add_button(frame, button_area, state.add_enabled);
    render_footer(frame, footer_area, state.panel.is_open());

    if state.panel.is_open() {
        render_panel(frame, state);
    } else if state.alert.is_none() {
        let area = match state.focus {
            Focus::Title => title_area,
            Focus::Description => description_area,
        };
        place_cursor(frame, area, focused_input(state));
    }

    if let Some(message) = &state.alert {
        render_alert(frame, message);
    }
}

fn focused_input(state: &UiState) -> &InputField {
    match state.focus {
        Focus::Title => &state.title,
        Focus::Description => &state.description,
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(vec![
        Span::styled(" Todo ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled("Ctrl+T tasks", Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, input: &InputField, focused: bool) {
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(input.value())
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// 光标放在输入内容末尾，超出区域时截断到边框内
fn place_cursor(frame: &mut Frame, area: Rect, input: &InputField) {
    let value = input.value();
    let line_count = value.split('\n').count() as u16;
    let last_line = value.rsplit('\n').next().unwrap_or_default();

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    if inner_width == 0 || inner_height == 0 {
        return;
    }

    let x = area.x + 1 + (last_line.chars().count() as u16).min(inner_width - 1);
    let y = area.y + 1 + line_count.saturating_sub(1).min(inner_height - 1);
    frame.set_cursor_position((x, y));
}

fn render_add_button(frame: &mut Frame, area: Rect, enabled: bool) {
    let button = if enabled {
        Span::styled(
            "[ Add task ]",
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ Adding… ]", Style::default().fg(MUTED))
    };
    let line = Line::from(vec![
        Span::raw(" "),
        button,
        Span::styled("  Ctrl+Enter", Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect, panel_open: bool) {
    let hints = if panel_open {
        " ↑/↓ select  d delete  r reload  Esc close"
    } else {
        " Enter next field  Tab switch  Ctrl+Enter add  Ctrl+T tasks  Ctrl+C quit"
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(MUTED)),
        area,
    );
}

/// 计算居中区域
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_panel(frame: &mut Frame, state: &UiState) {
    let full = frame.area();
    let area = centered_rect(full, full.width * 4 / 5, full.height * 4 / 5);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Tasks ({}) ", state.tasks.len()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    if let Some(placeholder) = state.placeholder() {
        let paragraph = Paragraph::new(placeholder)
            .alignment(Alignment::Center)
            .style(Style::default().fg(MUTED))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state.tasks.iter().map(task_list_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn task_list_item(item: &TaskItem) -> ListItem<'static> {
    let description = item.task.description.lines().next().unwrap_or_default();
    let mut spans = vec![
        Span::styled(
            item.task.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::raw(description.to_string()),
    ];

    if !item.delete_enabled {
        spans.push(Span::raw(" (deleting…)"));
        return ListItem::new(Line::from(spans)).style(Style::default().fg(MUTED));
    }

    ListItem::new(Line::from(spans))
}

fn render_alert(frame: &mut Frame, message: &str) {
    let width = (message.chars().count() as u16 + 6).clamp(30, 70);
    let area = centered_rect(frame.area(), width, 6);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Alert ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", Style::default().fg(MUTED))),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TaskItem, EMPTY_PLACEHOLDER};
    use ratatui::{backend::TestBackend, Terminal};
    use todo_core::{NewTask, Task};

    fn render(state: &UiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_form_renders_inputs() {
        let mut state = UiState::new();
        state.title.set("Buy milk");
        let screen = render(&state);

        assert!(screen.contains("Title"));
        assert!(screen.contains("Buy milk"));
        assert!(screen.contains("[ Add task ]"));
        assert!(!screen.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_disabled_add_button() {
        let mut state = UiState::new();
        state.add_enabled = false;
        assert!(render(&state).contains("[ Adding… ]"));
    }

    #[test]
    fn test_empty_panel_shows_placeholder() {
        let mut state = UiState::new();
        state.panel.open();
        let screen = render(&state);
        assert!(screen.contains(EMPTY_PLACEHOLDER));
        assert!(screen.contains("Tasks (0)"));
    }

    #[test]
    fn test_panel_lists_tasks() {
        let mut state = UiState::new();
        state.tasks = vec![TaskItem::from(Task::new(
            NewTask::new("Buy milk", "2%").unwrap(),
        ))];
        state.panel.open();

        let screen = render(&state);
        assert!(screen.contains("Buy milk - 2%"));
        assert!(!screen.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_alert_overlay() {
        let mut state = UiState::new();
        state.alert("Failed to add task.");
        let screen = render(&state);
        assert!(screen.contains("Failed to add task."));
        assert!(screen.contains("[Enter] OK"));
    }
}
