use anyhow::Context;
use clap::Parser;
use todo_server::{create_app_from_config, routes::ROUTES, ServerConfig};
use tracing::{info, warn, Level};

/// 待办事项 REST API 服务
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 监听地址（覆盖 HOST）
    #[arg(long)]
    host: Option<String>,

    /// 监听端口（覆盖 PORT）
    #[arg(short, long)]
    port: Option<u16>,

    /// 数据库连接串（覆盖 DATABASE_URL）
    #[arg(short, long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("读取 .env 失败: {}", e);
        }
    }

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config = config.with_host(host);
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(database_url) = args.database_url {
        config = config.with_database_url(database_url);
    }

    let app = create_app_from_config(&config)
        .with_context(|| format!("数据库连接失败: {}", config.database_url))?;
    info!("数据库已连接: {}", config.database_url);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("无法监听 {}", config.bind_addr()))?;

    info!("服务器运行在 http://{}", listener.local_addr()?);
    info!("=== API端点列表 ===");
    for route in ROUTES {
        info!("  {}", route);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("监听退出信号失败: {}", e);
        std::future::pending::<()>().await;
    }
}
