//! 简单句式替换器
//!
//! 按插入顺序对文本做整词替换，不做部分匹配。

use regex::{NoExpand, Regex};

/// 一条替换规则：整词匹配的令牌与其替换文本
#[derive(Debug, Clone)]
struct Association {
    pattern: Regex,
    replacement: String,
}

/// 自动翻译并替换简单句式
///
/// 规则按插入顺序依次应用，后面的替换能看到前面替换的结果；
/// 对固定的映射，`translate` 是其输入的纯函数。
#[derive(Debug, Clone, Default)]
pub struct Translator {
    associations: Vec<Association>,
}

impl Translator {
    /// 创建空的替换器（translate 为恒等变换）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 (令牌, 替换) 对构建替换器，保留给定顺序
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let mut translator = Self::new();
        for (token, replacement) in pairs {
            translator.associate(token.as_ref(), replacement);
        }
        translator
    }

    /// 追加一条替换规则
    ///
    /// 令牌按字面量处理；`\b` 边界保证嵌在长词里的令牌不被替换。
    pub fn associate<T: Into<String>>(&mut self, token: &str, replacement: T) {
        // 空令牌没有可匹配的整词，直接忽略
        if token.is_empty() {
            return;
        }
        let pattern = format!(r"\b{}\b", regex::escape(token));
        // escape 后的字面量模式总能编译
        let pattern = Regex::new(&pattern).expect("escaped literal pattern");
        self.associations.push(Association {
            pattern,
            replacement: replacement.into(),
        });
    }

    /// 规则条数
    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }

    /// 对文本应用全部替换规则
    pub fn translate(&self, text: &str) -> String {
        let mut text = text.to_string();
        for assoc in &self.associations {
            // NoExpand: 替换文本按字面量处理，$ 不作捕获组引用
            text = assoc
                .pattern
                .replace_all(&text, NoExpand(assoc.replacement.as_str()))
                .into_owned();
        }
        text
    }
}
