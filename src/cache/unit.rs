//! 转写条目
//!
//! 一个条目以地址为身份，按语言键保存已计算的译文，
//! 并用并行的有效性集合区分"已缓存"与"当前有效"。

use std::collections::{HashMap, HashSet};

use crate::address::Address;
use crate::error::{TranscribeError, TranscribeResult};
use crate::language::Language;

/// 一条转写（单行或一段行区间）
///
/// 文本按短语言键（`Language::prefix`）存放；语言对象不作键，
/// 也不被条目持有，避免引用环。
#[derive(Debug, Clone)]
pub struct Transcription {
    address: Address,
    text: HashMap<String, String>,
    loaded_for: HashSet<String>,
    loads: u64,
}

impl Transcription {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            text: HashMap::new(),
            loaded_for: HashSet::new(),
            loads: 0,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// 从行缓冲为给定语言解析并缓存译文
    ///
    /// 解析失败（越界）时条目保持原状。成功后该语言键进入有效集合，
    /// 并在语言侧登记本地址（记账）。
    pub fn load(&mut self, lang: &Language, lines: &[String]) -> TranscribeResult<()> {
        let raw = self.address.resolve(lines)?;
        let translated = lang.translate(&raw);

        lang.register_unit(self.address);
        self.text.insert(lang.prefix().to_string(), translated);
        self.loaded_for.insert(lang.prefix().to_string());
        self.loads += 1;
        Ok(())
    }

    /// 该语言键当前是否有效
    pub fn is_loaded_for(&self, lang_key: &str) -> bool {
        self.loaded_for.contains(lang_key)
    }

    /// 取给定语言的缓存文本
    ///
    /// 语言键不在有效集合时返回 [`TranscribeError::NotLoaded`]，
    /// 即使陈旧文本仍留存也不返回它。
    pub fn text_for(&self, lang_key: &str) -> TranscribeResult<&str> {
        if !self.loaded_for.contains(lang_key) {
            return Err(TranscribeError::NotLoaded {
                lang_key: lang_key.to_string(),
            });
        }
        // 有效集合是文本表的子集
        Ok(self.text[lang_key].as_str())
    }

    /// 软失效：仅把语言键移出有效集合，文本留存不回收
    ///
    /// 下一次经由缓存的 get 会重新走加载路径。缓存自身从不调用它；
    /// 这是给需要强制刷新（如源文件热更新）的调用方的扩展点。
    pub fn evict(&mut self, lang_key: &str) -> bool {
        self.loaded_for.remove(lang_key)
    }

    /// 累计加载次数（可观测的重载计数）
    pub fn load_count(&self) -> u64 {
        self.loads
    }

    /// 已缓存文本的语言键数量（含已软失效的）
    pub fn cached_lang_count(&self) -> usize {
        self.text.len()
    }
}
