//! 逻辑行定位器
//!
//! 把"单行"与"行区间"两种写法规范化成同一种半开区间键，
//! 使缓存键相等性不依赖地址的拼写方式。

use std::fmt;

use crate::error::{TranscribeError, TranscribeResult};

/// 指向文本源的逻辑行地址，规范化为半开区间 `[start, end)`
///
/// 唯一的构造路径是 [`Address::line`] 与 [`Address::range`]，
/// 缺失的区间终点在构造时立即默认为 `start + 1`。因此
/// `line(5)`、`range(5, None)` 与 `range(5, Some(6))` 是同一个缓存键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    start: usize,
    end: usize,
}

impl Address {
    /// 单行地址（0 起始）
    pub fn line(index: usize) -> Self {
        Self {
            start: index,
            end: index + 1,
        }
    }

    /// 行区间地址；`end` 为 `None` 时立即规范化为 `start + 1`
    pub fn range(start: usize, end: Option<usize>) -> Self {
        Self {
            start,
            end: end.unwrap_or(start + 1),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// 地址覆盖的行数
    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// 按给定偏移整体平移（Structure 的相对寻址）
    pub fn offset(&self, by: usize) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }

    /// 在行缓冲上解析出原始文本
    ///
    /// 空区间（`start == end`）返回空串而不是错误；非空区间越界时
    /// 返回 [`TranscribeError::OutOfRange`]，附带违规索引与有效范围。
    /// 选中的行保留各自的行终止符拼接，然后恰好剥去一个结尾终止符。
    pub fn resolve(&self, lines: &[String]) -> TranscribeResult<String> {
        if self.start == self.end {
            return Ok(String::new());
        }

        let len = lines.len();
        let bounds = (0, len.saturating_sub(1));
        if self.start >= len {
            return Err(TranscribeError::OutOfRange {
                index: self.start,
                bounds,
            });
        }
        if self.end > len {
            return Err(TranscribeError::OutOfRange {
                index: self.end - 1,
                bounds,
            });
        }

        let text: String = lines[self.start..self.end].concat();
        Ok(strip_one_terminator(&text).to_string())
    }
}

/// 恰好剥去一个结尾行终止符（`\r\n` 算一个），其余保留
fn strip_one_terminator(text: &str) -> &str {
    if let Some(stripped) = text.strip_suffix("\r\n") {
        stripped
    } else if let Some(stripped) = text.strip_suffix('\n') {
        stripped
    } else {
        text
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width() == 1 {
            write!(f, "{}", self.start)
        } else {
            write!(f, "[{}, {})", self.start, self.end)
        }
    }
}
