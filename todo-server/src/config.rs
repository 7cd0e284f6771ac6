//! 服务配置

use thiserror::Error;

/// 默认监听地址
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// 默认监听端口
pub const DEFAULT_PORT: u16 = 5000;
/// 默认数据库连接串
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 环境变量取值非法
    #[error("环境变量 {name} 取值非法: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

/// 服务配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 数据库连接串
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// 创建新的配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从环境变量读取配置（`HOST`、`PORT`、`DATABASE_URL`），未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|v| !v.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: "PORT",
                    value: port.clone(),
                })?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            config.database_url = url.trim().to_string();
        }

        Ok(config)
    }

    /// 设置监听地址
    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    /// 设置监听端口
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// 设置数据库连接串
    pub fn with_database_url<S: Into<String>>(mut self, database_url: S) -> Self {
        self.database_url = database_url.into();
        self
    }

    /// 监听地址，形如 `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
