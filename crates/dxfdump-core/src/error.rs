//! 错误定义
//!
//! 分两层：`DumpError` 是致命层（加载失败中止全局，产物写失败中止
//! 该产物）；`RecordError` 是实体层，提取器就地消化，从不外传。

use std::path::PathBuf;

use thiserror::Error;

/// 致命错误
#[derive(Error, Debug)]
pub enum DumpError {
    /// 文档无法解析或版本不受支持，中止整个运行
    #[error("failed to load drawing {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// 单个产物写入失败，仅该产物作废
    #[error("failed to write artifact {name}: {message}")]
    Artifact { name: &'static str, message: String },
}

/// 实体级错误：无法构造最小身份时丢弃该实体
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("{kind} entity has an empty {field}")]
    MissingIdentity {
        kind: &'static str,
        field: &'static str,
    },
}
