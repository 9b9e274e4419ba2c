//! 转写引擎统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// 转写错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscribeError {
    /// 语言源文件缺失或不可读
    #[error("找不到转写源文件: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// 在任何成功的 read 之前发起了查询（调用方契约违规）
    #[error("转写源尚未读取，请先调用 read")]
    NotReady,

    /// 地址超出已加载行缓冲的范围
    #[error("行索引 {index} 超出范围 (有效范围 {}..{})", .bounds.0, .bounds.1)]
    OutOfRange { index: usize, bounds: (usize, usize) },

    /// 请求了从未为该语言加载过的文本（调用方绕过了 get）
    #[error("语言 '{lang_key}' 的转写尚未加载，请先调用 get")]
    NotLoaded { lang_key: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl TranscribeError {
    /// 检查错误是否可由调用方恢复（例如改选语言后重试）
    pub fn is_recoverable(&self) -> bool {
        match self {
            TranscribeError::SourceNotFound { .. } => true,
            TranscribeError::OutOfRange { .. } => true,
            TranscribeError::Config(_) => true,
            // 契约违规：立即暴露，不应重试
            TranscribeError::NotReady => false,
            TranscribeError::NotLoaded { .. } => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranscribeError::SourceNotFound { .. } => ErrorSeverity::Warning,
            TranscribeError::NotReady => ErrorSeverity::Critical,
            TranscribeError::OutOfRange { .. } => ErrorSeverity::Error,
            TranscribeError::NotLoaded { .. } => ErrorSeverity::Critical,
            TranscribeError::Config(_) => ErrorSeverity::Critical,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 标准错误转换
impl From<std::io::Error> for TranscribeError {
    fn from(error: std::io::Error) -> Self {
        TranscribeError::Config(format!("IO错误: {}", error))
    }
}

impl From<toml::de::Error> for TranscribeError {
    fn from(error: toml::de::Error) -> Self {
        TranscribeError::Config(format!("TOML解析错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranscribeResult<T> = Result<T, TranscribeError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录并返回错误
    pub fn log_error<T>(error: TranscribeError) -> TranscribeResult<T> {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("转写信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("转写警告: {}", error),
            ErrorSeverity::Error => tracing::error!("转写错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("转写严重错误: {}", error),
        }

        Err(error)
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranscribeError {
        TranscribeError::Config(msg.to_string())
    }
}
