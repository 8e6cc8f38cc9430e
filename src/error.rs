//! 错误处理模块
//!
//! 定义了插件中使用的所有错误类型和结果类型。

use thiserror::Error;

/// 插件的主要错误类型
#[derive(Error, Debug)]
pub enum BlameError {
    /// HTTP 请求错误
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON 反序列化错误
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL 解析错误
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 命令行参数错误
    #[error("invalid argument set: {0}")]
    Usage(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 网络连接错误
    #[error("Network error: {0}")]
    Network(String),

    /// 宿主 CLI 传输错误
    #[error("Transport error: {0}")]
    Transport(String),

    /// 平台 API 返回的错误体
    #[error("API error {code}: {description}")]
    Api { code: String, description: String },

    /// 无效参数错误
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 插件的结果类型
pub type Result<T> = std::result::Result<T, BlameError>;

impl BlameError {
    /// 创建参数错误（不记录日志，由调用方展示）
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        BlameError::Usage(msg.into())
    }

    /// 创建配置错误
    pub fn config<S: Into<String>>(msg: S) -> Self {
        let error = BlameError::Config(msg.into());
        error.log_error();
        error
    }

    /// 创建网络错误
    pub fn network<S: Into<String>>(msg: S) -> Self {
        let error = BlameError::Network(msg.into());
        error.log_error();
        error
    }

    /// 创建传输错误
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        let error = BlameError::Transport(msg.into());
        error.log_error();
        error
    }

    /// 创建 API 错误
    pub fn api<C: Into<String>, D: Into<String>>(code: C, description: D) -> Self {
        let error = BlameError::Api {
            code: code.into(),
            description: description.into(),
        };
        error.log_error();
        error
    }

    /// 创建无效参数错误
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        let error = BlameError::InvalidParameter(msg.into());
        error.log_error();
        error
    }

    /// 创建内部错误
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        let error = BlameError::Internal(msg.into());
        error.log_error();
        error
    }

    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            BlameError::Http(_) => "HTTP_ERROR",
            BlameError::Json(_) => "JSON_ERROR",
            BlameError::UrlParse(_) => "URL_PARSE_ERROR",
            BlameError::Io(_) => "IO_ERROR",
            BlameError::Usage(_) => "USAGE_ERROR",
            BlameError::Config(_) => "CONFIG_ERROR",
            BlameError::Network(_) => "NETWORK_ERROR",
            BlameError::Transport(_) => "TRANSPORT_ERROR",
            BlameError::Api { .. } => "API_ERROR",
            BlameError::InvalidParameter(_) => "INVALID_PARAMETER",
            BlameError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为命令行参数错误
    pub fn is_usage(&self) -> bool {
        matches!(self, BlameError::Usage(_))
    }

    /// 进程退出码
    pub fn exit_code(&self) -> i32 {
        if self.is_usage() {
            2
        } else {
            1
        }
    }

    /// 获取建议的解决方案
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            BlameError::Usage(_) => Some("usage: cf diego-blame <cell-host-ip>"),
            BlameError::Config(_) => Some("run `cf login` or pass --api and --token explicitly"),
            BlameError::Network(_) | BlameError::Http(_) => {
                Some("check the API endpoint and your network connection")
            }
            BlameError::Transport(_) => Some("make sure the cf CLI is installed and logged in"),
            _ => None,
        }
    }

    /// 记录错误日志
    fn log_error(&self) {
        log::error!("[{}] {}", self.code(), self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = BlameError::config("missing target");
        assert!(matches!(config_err, BlameError::Config(_)));

        let api_err = BlameError::api("10000", "Unknown request");
        assert!(matches!(api_err, BlameError::Api { .. }));
        assert_eq!(api_err.code(), "API_ERROR");
    }

    #[test]
    fn test_error_display() {
        let err = BlameError::usage("[diego-blame]");
        assert_eq!(err.to_string(), "invalid argument set: [diego-blame]");

        let err = BlameError::api("CF-AppNotFound", "The app could not be found");
        assert_eq!(
            err.to_string(),
            "API error CF-AppNotFound: The app could not be found"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BlameError::usage("x").exit_code(), 2);
        assert!(BlameError::usage("x").is_usage());
        assert_eq!(BlameError::network("x").exit_code(), 1);
        assert!(!BlameError::internal("x").is_usage());
    }

    #[test]
    fn test_suggestion() {
        assert!(BlameError::usage("x").suggestion().is_some());
        assert!(BlameError::internal("x").suggestion().is_none());
    }
}
