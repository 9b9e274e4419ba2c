// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use transcriber::config::{Association, EngineConfig, LanguageSpec};
use transcriber::{Language, LanguageRegistry, Transcriber, Translator};

/// 测试环境：临时语言目录加上按需写入的源文件
pub struct TestEnvironment {
    dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp language dir"),
        }
    }

    pub fn basepath(&self) -> &Path {
        self.dir.path()
    }

    /// 写入一个 `.lng` 源文件，每个元素一行
    pub fn write_source(&self, stem: &str, lines: &[&str]) -> PathBuf {
        let path = self.source_path(stem);
        let mut content = String::new();
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(&path, content).expect("write language source");
        path
    }

    /// 删除一个源文件（模拟只在首次加载时可解析的源）
    pub fn remove_source(&self, stem: &str) {
        fs::remove_file(self.source_path(stem)).expect("remove language source");
    }

    pub fn source_path(&self, stem: &str) -> PathBuf {
        self.dir.path().join(format!("{}.lng", stem))
    }

    /// 以给定语言启动转写器
    pub fn transcriber(&self, lang: Arc<Language>) -> Transcriber {
        Transcriber::new(self.basepath(), ".lng", lang).expect("bootstrap transcriber")
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// 瑞典语/英语双语注册表（英语带一条整词替换，便于观察翻译生效）
pub fn bilingual_registry() -> LanguageRegistry {
    LanguageRegistry::from_languages([
        Language::plain("sv", "Swedish", "sv"),
        Language::new(
            "en",
            "English",
            "en",
            Translator::from_pairs([("colour", "color")]),
        ),
    ])
    .expect("build bilingual registry")
}

/// 与 bilingual_registry 对应的清单（用于配置层测试）
pub fn bilingual_manifest(basepath: &Path) -> EngineConfig {
    EngineConfig {
        basepath: basepath.to_string_lossy().into_owned(),
        extension: ".lng".to_string(),
        default_language: "sv".to_string(),
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
                associations: vec![Association {
                    token: "colour".to_string(),
                    replacement: "color".to_string(),
                }],
            },
        ],
    }
}
