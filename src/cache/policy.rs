//! 可选的容量策略
//!
//! 条目表默认单调增长，引擎自身从不回收。需要约束内存的调用方
//! 可以用本策略跟踪 (地址, 语言) 对的使用，在超过容量时得到被
//! 挤出的对，再自行喂给 [`Cache::evict_unit`](super::Cache::evict_unit)
//! 做软失效。策略与软失效原语保持分离：前者管容量，后者管正确性。

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::address::Address;
use crate::error::{TranscribeError, TranscribeResult};

/// (地址, 语言键) 对上的 LRU 容量策略
#[derive(Debug)]
pub struct CapacityPolicy {
    entries: LruCache<(Address, String), ()>,
}

impl CapacityPolicy {
    /// 创建容量策略；容量为 0 时报配置错误
    pub fn new(capacity: usize) -> TranscribeResult<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| TranscribeError::Config("容量策略的容量不能为0".to_string()))?;
        Ok(Self {
            entries: LruCache::new(capacity),
        })
    }

    /// 记录一次使用
    ///
    /// 超过容量时返回被挤出的 (地址, 语言键) 对，由调用方决定
    /// 是否据此软失效对应条目。
    pub fn touch(&mut self, address: Address, lang_key: &str) -> Option<(Address, String)> {
        self.entries
            .push((address, lang_key.to_string()), ())
            .map(|(pair, _)| pair)
            // push 对已存在键返回旧值，不算挤出
            .filter(|(addr, key)| !(*addr == address && key == lang_key))
    }

    /// 当前跟踪的对数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 容量上限
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}
