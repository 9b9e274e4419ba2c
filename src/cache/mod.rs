//! 地址 × 语言两级记忆引擎
//!
//! 缓存持有当前语言的原始行缓冲与按地址索引的转写条目表。
//! 换语言只整体替换行缓冲（`clear_buffer`），条目表保留：
//! 已为某语言算出的译文在语言热切换后直接复用，不再重算。

pub mod policy;
pub mod unit;

use std::collections::HashMap;

use crate::address::Address;
use crate::error::{TranscribeError, TranscribeResult};
use crate::language::Language;

pub use policy::CapacityPolicy;
pub use unit::Transcription;

// ============================================================================
// 统计
// ============================================================================

/// 缓存统计信息
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub loads: u64,
    pub total_entries: usize,
}

impl CacheStats {
    /// 计算缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_requests as f64
        }
    }

    /// 重置统计信息
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// 缓存本体
// ============================================================================

/// 每个转写器独占一个缓存
///
/// 不变式：行缓冲只要处于已填充状态，其内容就对应当前激活语言
/// （由转写器在换语言时保证）。因此"条目未对当前语言生效"
/// 必然意味着"所需原文就在当前缓冲里"，步骤 3 的重载才是正确的。
#[derive(Debug, Default)]
pub struct Cache {
    lines: Vec<String>,
    populated: bool,
    transcriptions: HashMap<Address, Transcription>,
    stats: CacheStats,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整体替换原始行缓冲并标记已填充
    pub fn read(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.populated = true;
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// 当前行缓冲的行数
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 取给定地址在激活语言下的文本
    ///
    /// 1. 未填充则报 [`TranscribeError::NotReady`]；
    /// 2. 地址无条目：建条目、为激活语言加载、入表、返回；
    /// 3. 有条目但未对激活语言生效：从当前缓冲重载；
    /// 4. 否则直接返回缓存文本，不触碰缓冲。
    pub fn get(&mut self, address: Address, lang: &Language) -> TranscribeResult<String> {
        if !self.populated {
            return Err(TranscribeError::NotReady);
        }
        self.stats.total_requests += 1;

        if let Some(unit) = self.transcriptions.get_mut(&address) {
            if unit.is_loaded_for(lang.prefix()) {
                self.stats.cache_hits += 1;
            } else {
                tracing::debug!("条目未对语言 {} 生效，重载: 地址 {}", lang.prefix(), address);
                unit.load(lang, &self.lines)?;
                self.stats.cache_misses += 1;
                self.stats.loads += 1;
            }
            return Ok(unit.text_for(lang.prefix())?.to_string());
        }

        // 首次请求该地址：加载成功才入表
        tracing::debug!("缓存未命中，新建转写: 地址 {} 语言 {}", address, lang.prefix());
        let mut unit = Transcription::new(address);
        unit.load(lang, &self.lines)?;
        self.stats.cache_misses += 1;
        self.stats.loads += 1;

        let text = unit.text_for(lang.prefix())?.to_string();
        self.transcriptions.insert(address, unit);
        self.stats.total_entries = self.transcriptions.len();
        Ok(text)
    }

    /// 丢弃行缓冲与填充标志；条目表不动（换语言时用）
    pub fn clear_buffer(&mut self) {
        self.lines.clear();
        self.populated = false;
    }

    /// 完全重置：行缓冲、填充标志与条目表全部清空
    pub fn clear_all(&mut self) {
        self.lines.clear();
        self.populated = false;
        self.transcriptions.clear();
        self.stats.total_entries = 0;
    }

    /// 对指定条目做软失效（透传给条目的 evict）
    ///
    /// 返回是否确实存在该地址的条目。容量策略产出的被挤出对
    /// 由调用方喂到这里；缓存自身从不自动调用。
    pub fn evict_unit(&mut self, address: Address, lang_key: &str) -> bool {
        match self.transcriptions.get_mut(&address) {
            Some(unit) => unit.evict(lang_key),
            None => false,
        }
    }

    /// 条目数（每个曾被请求过的地址一个）
    pub fn unit_count(&self) -> usize {
        self.transcriptions.len()
    }

    /// 只读访问某地址的条目（自省/测试用）
    pub fn unit(&self, address: Address) -> Option<&Transcription> {
        self.transcriptions.get(&address)
    }

    /// 获取统计信息快照
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.transcriptions.len();
        stats
    }
}
