//! 转写配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、清单文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{Association, ConfigManager, EngineConfig, LanguageSpec};

/// 配置常量
pub mod constants {
    /// 默认语言目录（沿用游戏资源的布局约定）
    pub const DEFAULT_BASEPATH: &str = "./languages";
    /// 默认源文件扩展名
    pub const DEFAULT_EXTENSION: &str = ".lng";
    /// 默认激活语言前缀
    pub const DEFAULT_LANGUAGE: &str = "en";

    // 环境变量覆盖
    pub const ENV_BASEPATH: &str = "TRANSCRIBER_BASEPATH";
    pub const ENV_EXTENSION: &str = "TRANSCRIBER_EXTENSION";
    pub const ENV_LANGUAGE: &str = "TRANSCRIBER_LANG";

    /// 清单文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "transcriber.toml",
        ".transcriber.toml",
        "~/.config/transcriber/transcriber.toml",
        "/etc/transcriber/transcriber.toml",
    ];
}

/// 便利函数
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS.iter().any(|path| {
        let expanded = shellexpand::tilde(path);
        std::path::Path::new(expanded.as_ref()).exists()
    })
}
