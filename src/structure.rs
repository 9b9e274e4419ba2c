//! 共享源上的相对寻址视图
//!
//! 多种语言的文本块拼在同一个物理编号的资源里时，
//! 结构体知道自己的逻辑第 0 行在全局编号里的起点，
//! 调用方只用相对地址就能取到本语言的文本。

use std::sync::Arc;

use crate::address::Address;
use crate::error::TranscribeResult;
use crate::language::Language;
use crate::transcriber::Transcriber;

/// 绑定到某语言与偏移量的只读视图
///
/// 借用转写器而不拥有它，生命周期受借用约束，不可能比
/// 转写器活得久。按需创建即可，视图自身没有独立状态。
#[derive(Debug)]
pub struct Structure<'a> {
    transcriber: &'a mut Transcriber,
    lang: Arc<Language>,
    offset: usize,
}

impl<'a> Structure<'a> {
    /// 创建视图：`offset` 是本视图逻辑第 0 行的全局行号
    pub fn new(transcriber: &'a mut Transcriber, lang: Arc<Language>, offset: usize) -> Self {
        Self {
            transcriber,
            lang,
            offset,
        }
    }

    pub fn language(&self) -> &Arc<Language> {
        &self.lang
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 相对地址换算成转写器的全局地址
    pub fn translate_address(&self, local: Address) -> Address {
        local.offset(self.offset)
    }

    /// 取相对地址处的文本
    ///
    /// 转写器的激活语言与本视图不一致时先切换过去。
    /// 这是可观测的副作用，可能触发一次源重载。
    pub fn get(&mut self, local: Address) -> TranscribeResult<String> {
        if self.transcriber.language() != &self.lang {
            self.transcriber.set_language(Arc::clone(&self.lang))?;
        }
        self.transcriber.get(self.translate_address(local))
    }
}
