use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{api::TaskApi, app::TodoApp, state::Focus};

/// 处理事件，返回 true 表示应该继续运行
pub async fn handle_events<A: TaskApi>(app: &mut TodoApp<A>) -> io::Result<bool> {
    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key).await;
        }
    }

    Ok(!app.state().should_quit)
}

pub async fn handle_key<A: TaskApi>(app: &mut TodoApp<A>, key: KeyEvent) {
    // 只处理按下事件
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 提示框优先
    if app.state().alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.state_mut().dismiss_alert();
        }
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.quit();
            return;
        }
        KeyCode::Char('t') if ctrl => {
            app.refresh(true).await;
            return;
        }
        KeyCode::Esc => {
            app.close_panel();
            return;
        }
        _ => {}
    }

    if app.state().panel.is_open() {
        handle_panel_key(app, key).await;
    } else {
        handle_form_key(app, key).await;
    }
}

async fn handle_panel_key<A: TaskApi>(app: &mut TodoApp<A>, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.state_mut().select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.state_mut().select_next(),
        KeyCode::Delete | KeyCode::Char('d') => app.delete_selected().await,
        KeyCode::Char('r') => app.refresh(true).await,
        _ => {}
    }
}

async fn handle_form_key<A: TaskApi>(app: &mut TodoApp<A>, key: KeyEvent) {
    let focus = app.state().focus;

    if focus == Focus::Description && is_submit(&key) {
        app.add().await;
        return;
    }

    let state = app.state_mut();
    match key.code {
        // 标题中回车只切换焦点，不提交
        KeyCode::Enter if focus == Focus::Title => state.focus = Focus::Description,
        KeyCode::Enter => state.description.insert('\n'),
        KeyCode::Tab | KeyCode::BackTab => state.focus = focus.toggle(),
        KeyCode::Backspace => state.focused_input_mut().backspace(),
        KeyCode::Char(c) if !has_command_modifier(&key) => state.focused_input_mut().insert(c),
        _ => {}
    }
}

/// Ctrl/Cmd+Enter；多数终端把 Ctrl+Enter 发送为 Ctrl+J
fn is_submit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => has_command_modifier(key),
        KeyCode::Char('j') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::ALERT_MISSING_FIELDS, state::Panel, testing::MockApi};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut TodoApp<MockApi>, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).await;
        }
    }

    #[tokio::test]
    async fn test_enter_in_title_moves_focus() {
        let mut app = TodoApp::new(MockApi::default());
        type_text(&mut app, "Buy milk").await;
        handle_key(&mut app, key(KeyCode::Enter)).await;

        assert_eq!(app.state().focus, Focus::Description);
        assert_eq!(app.state().title.value(), "Buy milk");
        assert_eq!(app.api().create_calls(), 0);
    }

    #[tokio::test]
    async fn test_ctrl_enter_in_description_adds() {
        let mut app = TodoApp::new(MockApi::default());
        type_text(&mut app, "Buy milk").await;
        handle_key(&mut app, key(KeyCode::Enter)).await;
        type_text(&mut app, "2%").await;
        handle_key(&mut app, ctrl(KeyCode::Enter)).await;

        assert_eq!(app.api().create_calls(), 1);
        assert!(app.state().panel.is_open());
        assert_eq!(app.state().tasks[0].task.title, "Buy milk");
    }

    #[tokio::test]
    async fn test_ctrl_j_submits_and_plain_enter_inserts_newline() {
        let mut app = TodoApp::new(MockApi::default());
        app.state_mut().focus = Focus::Description;
        type_text(&mut app, "line").await;
        handle_key(&mut app, key(KeyCode::Enter)).await;
        assert_eq!(app.state().description.value(), "line\n");

        handle_key(&mut app, ctrl(KeyCode::Char('j'))).await;
        // 标题为空，提示但不发请求
        assert_eq!(app.state().alert.as_deref(), Some(ALERT_MISSING_FIELDS));
        assert_eq!(app.api().create_calls(), 0);
    }

    #[tokio::test]
    async fn test_ctrl_enter_in_title_does_not_submit() {
        let mut app = TodoApp::new(MockApi::default());
        app.state_mut().title.set("Buy milk");
        app.state_mut().description.set("2%");
        handle_key(&mut app, ctrl(KeyCode::Enter)).await;

        assert_eq!(app.api().create_calls(), 0);
        assert_eq!(app.state().focus, Focus::Description);
    }

    #[tokio::test]
    async fn test_alert_blocks_input_until_dismissed() {
        let mut app = TodoApp::new(MockApi::default());
        app.state_mut().alert("boom");

        type_text(&mut app, "x").await;
        assert_eq!(app.state().title.value(), "");

        handle_key(&mut app, key(KeyCode::Enter)).await;
        assert!(app.state().alert.is_none());
    }

    #[tokio::test]
    async fn test_escape_closes_panel() {
        let mut app = TodoApp::new(MockApi::with_tasks(&["a"]));
        handle_key(&mut app, ctrl(KeyCode::Char('t'))).await;
        assert_eq!(app.state().panel, Panel::Open);

        handle_key(&mut app, key(KeyCode::Esc)).await;
        assert_eq!(app.state().panel, Panel::Closed);

        // 已关闭时再次 Esc 不改变状态
        handle_key(&mut app, key(KeyCode::Esc)).await;
        assert_eq!(app.state().panel, Panel::Closed);
    }

    #[tokio::test]
    async fn test_panel_delete_selected() {
        let mut app = TodoApp::new(MockApi::with_tasks(&["older", "newer"]));
        handle_key(&mut app, ctrl(KeyCode::Char('t'))).await;
        handle_key(&mut app, key(KeyCode::Down)).await;
        handle_key(&mut app, key(KeyCode::Char('d'))).await;

        assert_eq!(app.api().delete_calls(), 1);
        assert_eq!(app.state().tasks.len(), 1);
        assert_eq!(app.state().tasks[0].task.title, "newer");
        // 面板打开时字符不进入输入框
        assert_eq!(app.state().title.value(), "");
    }

    #[tokio::test]
    async fn test_tab_and_backspace() {
        let mut app = TodoApp::new(MockApi::default());
        type_text(&mut app, "ab").await;
        handle_key(&mut app, key(KeyCode::Backspace)).await;
        assert_eq!(app.state().title.value(), "a");

        handle_key(&mut app, key(KeyCode::Tab)).await;
        assert_eq!(app.state().focus, Focus::Description);
        handle_key(&mut app, key(KeyCode::BackTab)).await;
        assert_eq!(app.state().focus, Focus::Title);
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = TodoApp::new(MockApi::default());
        handle_key(&mut app, ctrl(KeyCode::Char('c'))).await;
        assert!(app.state().should_quit);
    }
}
