//! 每族记录条数上限

/// 单族上限；0 表示不限制
///
/// 各族各自持有一份拷贝，状态不跨族、不跨运行。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLimit {
    max: usize,
}

impl RecordLimit {
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    pub fn unlimited() -> Self {
        Self { max: 0 }
    }

    /// 已收 `count` 条时是否到达上限
    pub fn reached(self, count: usize) -> bool {
        self.max != 0 && count >= self.max
    }
}

impl Default for RecordLimit {
    fn default() -> Self {
        Self::unlimited()
    }
}
