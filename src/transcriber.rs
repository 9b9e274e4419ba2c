//! 转写器：激活语言与源加载的编排者
//!
//! 源路径由命名策略确定：`basepath / (语言文件名主干 + 扩展名)`。
//! 换语言时只丢行缓冲不丢条目表，已算出的译文跨热切换存活。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::address::Address;
use crate::cache::{Cache, CacheStats, Transcription};
use crate::error::{TranscribeError, TranscribeResult};
use crate::language::Language;

/// 面向调用方的转写入口
///
/// 持有基路径与扩展名策略、当前激活语言和恰好一个 [`Cache`]。
/// 所有 I/O 为同步阻塞调用，失败不在内部重试。
#[derive(Debug)]
pub struct Transcriber {
    basepath: PathBuf,
    extension: String,
    lang: Arc<Language>,
    cache: Cache,
}

impl Transcriber {
    /// 创建转写器并立即装载给定语言的源
    ///
    /// 源文件打不开时返回 [`TranscribeError::SourceNotFound`]，
    /// 错误里带着计算出的路径。
    pub fn new<P: AsRef<Path>>(
        basepath: P,
        extension: &str,
        lang: Arc<Language>,
    ) -> TranscribeResult<Self> {
        let mut transcriber = Self {
            basepath: basepath.as_ref().to_path_buf(),
            extension: extension.to_string(),
            lang,
            cache: Cache::new(),
        };
        transcriber.load()?;
        tracing::info!("转写器就绪: 激活语言 {}", transcriber.lang.prefix());
        Ok(transcriber)
    }

    /// 当前源文件的派生路径（只读属性）
    pub fn path(&self) -> PathBuf {
        self.basepath
            .join(format!("{}{}", self.lang.filename(), self.extension))
    }

    /// 当前激活语言
    pub fn language(&self) -> &Arc<Language> {
        &self.lang
    }

    /// 切换激活语言
    ///
    /// 丢弃行缓冲、换语言、重新装载新语言的源。条目表不清空：
    /// 其他语言名下已缓存的译文保持有效。
    pub fn set_language(&mut self, lang: Arc<Language>) -> TranscribeResult<()> {
        self.cache.clear_buffer();
        tracing::info!("切换语言: {} -> {}", self.lang.prefix(), lang.prefix());
        self.lang = lang;
        self.load()
    }

    /// 取给定地址在激活语言下的文本
    pub fn get(&mut self, address: Address) -> TranscribeResult<String> {
        self.cache.get(address, &self.lang)
    }

    /// 完全失效：条目表与行缓冲全部清空
    ///
    /// 调用方确知磁盘上的源变了、要正确性不要缓存复用时使用。
    pub fn reset(&mut self) {
        tracing::info!("重置转写缓存");
        self.cache.clear_all();
    }

    /// 对指定 (地址, 语言) 做软失效，透传给缓存
    pub fn evict(&mut self, address: Address, lang_key: &str) -> bool {
        self.cache.evict_unit(address, lang_key)
    }

    /// 缓存统计快照
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// 条目数量（自省用）
    pub fn unit_count(&self) -> usize {
        self.cache.unit_count()
    }

    /// 只读访问某地址的条目（自省/测试用）
    pub fn unit(&self, address: Address) -> Option<&Transcription> {
        self.cache.unit(address)
    }

    /// 当前源的行数
    pub fn line_count(&self) -> usize {
        self.cache.line_count()
    }

    /// 把激活语言的源整体读入行缓冲
    fn load(&mut self) -> TranscribeResult<()> {
        let path = self.path();
        let content = fs::read_to_string(&path)
            .map_err(|_| TranscribeError::SourceNotFound { path: path.clone() })?;

        // 行保留各自的终止符，0 起始编址
        let lines: Vec<String> = content.split_inclusive('\n').map(String::from).collect();
        tracing::debug!("装载转写源: {} ({} 行)", path.display(), lines.len());
        self.cache.read(lines);
        Ok(())
    }
}
