use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex};
use todo_ui::{event, ui, HttpTaskApi, TaskApi, TodoApp, DEFAULT_API_BASE};
use tracing::{error, info, Level};

/// 待办事项终端客户端
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 任务接口地址
    #[arg(long, env = "TODO_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// 日志文件路径，默认写入系统临时目录
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_path = init_logging(args.log_file)?;
    info!("启动todo-ui，接口地址: {}，日志: {}", args.api_base, log_path.display());

    let mut app = TodoApp::new(HttpTaskApi::new(args.api_base));

    // 终端初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // 支持增强键盘协议的终端才能区分 Ctrl+Enter
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // 恢复终端
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("todo-ui异常退出: {:?}", e);
    }
    result
}

async fn run_app<B: Backend, A: TaskApi>(
    terminal: &mut Terminal<B>,
    app: &mut TodoApp<A>,
) -> anyhow::Result<()> {
    terminal.draw(|frame| ui::draw(frame, app.state()))?;
    app.load().await;

    loop {
        terminal.draw(|frame| ui::draw(frame, app.state()))?;
        if !event::handle_events(app).await? {
            return Ok(());
        }
    }
}

/// 日志写入文件，避免干扰终端界面
fn init_logging(log_file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let path = log_file.unwrap_or_else(|| std::env::temp_dir().join("todo-ui.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("无法打开日志文件 {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(path)
}
