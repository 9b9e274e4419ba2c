//! 简化的配置管理器
//!
//! 清单文件描述语言目录、命名策略与各语言的替换规则；
//! 管理器负责查找、解析、环境变量覆盖与校验，并据此
//! 组装注册表与转写器。

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TranscribeError, TranscribeResult};
use crate::language::{Language, LanguageRegistry};
use crate::transcriber::Transcriber;
use crate::translator::Translator;

use super::constants;

/// 一条替换规则（表数组承载，保住声明顺序）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Association {
    pub token: String,
    pub replacement: String,
}

/// 清单中的一种语言
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguageSpec {
    pub prefix: String,
    pub name: String,
    pub filename: String,
    #[serde(default)]
    pub associations: Vec<Association>,
}

/// 引擎清单
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    pub basepath: String,
    pub extension: String,
    pub default_language: String,
    pub languages: Vec<LanguageSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            basepath: constants::DEFAULT_BASEPATH.to_string(),
            extension: constants::DEFAULT_EXTENSION.to_string(),
            default_language: constants::DEFAULT_LANGUAGE.to_string(),
            languages: vec![
                LanguageSpec {
                    prefix: "sv".to_string(),
                    name: "Swedish".to_string(),
                    filename: "sv".to_string(),
                    associations: Vec::new(),
                },
                LanguageSpec {
                    prefix: "en".to_string(),
                    name: "English".to_string(),
                    filename: "en".to_string(),
                    associations: Vec::new(),
                },
            ],
        }
    }
}

impl EngineConfig {
    /// 校验清单
    pub fn validate(&self) -> TranscribeResult<()> {
        if self.languages.is_empty() {
            return Err(TranscribeError::Config("语言列表不能为空".to_string()));
        }

        if !self.extension.starts_with('.') {
            return Err(TranscribeError::Config(format!(
                "扩展名必须以点开头: '{}'",
                self.extension
            )));
        }

        for (i, lang) in self.languages.iter().enumerate() {
            if lang.prefix.trim().is_empty() {
                return Err(TranscribeError::Config(format!("第 {} 个语言缺少前缀", i)));
            }
            if self.languages[..i]
                .iter()
                .any(|earlier| earlier.prefix == lang.prefix)
            {
                return Err(TranscribeError::Config(format!(
                    "语言前缀重复: '{}'",
                    lang.prefix
                )));
            }
        }

        if !self
            .languages
            .iter()
            .any(|lang| lang.prefix == self.default_language)
        {
            return Err(TranscribeError::Config(format!(
                "默认语言 '{}' 不在语言列表中",
                self.default_language
            )));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        if let Ok(basepath) = std::env::var(constants::ENV_BASEPATH) {
            tracing::info!("环境变量覆盖语言目录: {}", basepath);
            self.basepath = basepath;
        }
        if let Ok(extension) = std::env::var(constants::ENV_EXTENSION) {
            self.extension = extension;
        }
        if let Ok(lang) = std::env::var(constants::ENV_LANGUAGE) {
            self.default_language = lang;
        }
    }
}

/// 简化的配置管理器
pub struct ConfigManager {
    config: EngineConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器：搜索清单、应用覆盖、校验
    pub fn new() -> TranscribeResult<Self> {
        let mut config = Self::search_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 从给定清单直接构建（内嵌场景用；不应用环境变量覆盖）
    pub fn from_config(config: EngineConfig) -> TranscribeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 获取配置
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 组装语言注册表（声明顺序保留）
    pub fn build_registry(&self) -> TranscribeResult<LanguageRegistry> {
        LanguageRegistry::from_languages(self.config.languages.iter().map(|spec| {
            let translator = Translator::from_pairs(
                spec.associations
                    .iter()
                    .map(|a| (a.token.as_str(), a.replacement.clone())),
            );
            Language::new(&spec.prefix, &spec.name, &spec.filename, translator)
        }))
    }

    /// 组装转写器：默认语言立即装载
    pub fn build_transcriber(&self) -> TranscribeResult<(LanguageRegistry, Transcriber)> {
        let registry = self.build_registry()?;
        let lang = registry
            .find(&self.config.default_language)
            .ok_or_else(|| {
                TranscribeError::Config(format!(
                    "默认语言 '{}' 不在注册表中",
                    self.config.default_language
                ))
            })?;
        let transcriber = Transcriber::new(&self.config.basepath, &self.config.extension, lang)?;
        Ok((registry, transcriber))
    }

    /// 在搜索路径上查找清单文件
    fn search_config() -> TranscribeResult<EngineConfig> {
        for path in constants::CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                tracing::info!("加载清单文件: {}", expanded);
                return Self::load_from_file(expanded.as_ref());
            }
        }

        tracing::info!("未找到清单文件，使用默认配置");
        Ok(EngineConfig::default())
    }

    /// 从指定文件加载清单
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TranscribeResult<EngineConfig> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TranscribeError::Config(format!("读取清单文件失败: {}", e)))?;

        let config: EngineConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// 生成示例清单文件
    pub fn generate_example_config<P: AsRef<Path>>(path: P) -> TranscribeResult<()> {
        let config = EngineConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranscribeError::Config(format!("序列化清单失败: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| TranscribeError::Config(format!("写入清单文件失败: {}", e)))?;

        Ok(())
    }
}
