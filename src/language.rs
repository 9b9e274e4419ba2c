//! 语言定义与语言注册表
//!
//! 语言的规范身份是短前缀 `prefix`：相等性、哈希与缓存分区
//! 全部使用它，展示名 `name` 仅用于呈现与用户选择。

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use crate::address::Address;
use crate::error::{TranscribeError, TranscribeResult};
use crate::translator::Translator;

/// 定义一种语言
///
/// 每种语言独占一个 [`Translator`]，并以非拥有方式记录曾经在它
/// 名下加载过的转写地址（仅供自省，绝不用于隐式释放或失效）。
#[derive(Debug)]
pub struct Language {
    prefix: String,
    name: String,
    filename: String,
    translator: Translator,
    // 记账集合：转写条目本体归 Cache 所有
    loaded_addresses: RwLock<BTreeSet<Address>>,
}

impl Language {
    /// 创建语言定义
    ///
    /// `prefix` 是短而稳定的键，`filename` 是源文件名主干（不含扩展名）。
    pub fn new(prefix: &str, name: &str, filename: &str, translator: Translator) -> Self {
        Self {
            prefix: prefix.to_string(),
            name: name.to_string(),
            filename: filename.to_string(),
            translator,
            loaded_addresses: RwLock::new(BTreeSet::new()),
        }
    }

    /// 不带替换规则的语言定义
    pub fn plain(prefix: &str, name: &str, filename: &str) -> Self {
        Self::new(prefix, name, filename, Translator::new())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// 应用本语言的替换规则
    pub fn translate(&self, text: &str) -> String {
        self.translator.translate(text)
    }

    /// 标识符是否指向本语言（大小写不敏感，两端空白忽略）
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim().to_lowercase();
        identifier == self.prefix.to_lowercase() || identifier == self.name.to_lowercase()
    }

    /// 记录一个曾在本语言名下加载过的地址（记账，不拥有）
    pub(crate) fn register_unit(&self, address: Address) {
        self.loaded_addresses
            .write()
            .expect("loaded_addresses lock")
            .insert(address);
    }

    /// 曾在本语言名下加载过的条目数量
    pub fn loaded_unit_count(&self) -> usize {
        self.loaded_addresses
            .read()
            .expect("loaded_addresses lock")
            .len()
    }

    /// 曾在本语言名下加载过的地址快照
    pub fn loaded_addresses(&self) -> Vec<Address> {
        self.loaded_addresses
            .read()
            .expect("loaded_addresses lock")
            .iter()
            .copied()
            .collect()
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
    }
}

impl Eq for Language {}

impl std::hash::Hash for Language {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.prefix.hash(state);
    }
}

/// 可用语言的有序注册表
///
/// 游戏/应用层通过它枚举语言并按用户输入选择，
/// 迭代顺序等于声明顺序。
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<Arc<Language>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从语言列表构建注册表，前缀重复时报配置错误
    pub fn from_languages<I>(languages: I) -> TranscribeResult<Self>
    where
        I: IntoIterator<Item = Language>,
    {
        let mut registry = Self::new();
        for lang in languages {
            registry.register(lang)?;
        }
        Ok(registry)
    }

    /// 注册一种语言；前缀必须唯一
    pub fn register(&mut self, language: Language) -> TranscribeResult<()> {
        if self
            .languages
            .iter()
            .any(|existing| existing.prefix() == language.prefix())
        {
            return Err(TranscribeError::Config(format!(
                "语言前缀重复: '{}'",
                language.prefix()
            )));
        }
        tracing::debug!("注册语言: {} ({})", language.name(), language.prefix());
        self.languages.push(Arc::new(language));
        Ok(())
    }

    /// 按前缀或展示名查找语言（大小写不敏感，两端空白忽略）
    pub fn find(&self, identifier: &str) -> Option<Arc<Language>> {
        self.languages
            .iter()
            .find(|lang| lang.matches(identifier))
            .cloned()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.find(identifier).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Language>> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
