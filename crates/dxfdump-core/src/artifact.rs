//! 产物序列化
//!
//! 每族一个 JSON 数组产物；文件名带阶段前缀，按管线顺序排序稳定。
//! 输出为 2 空格缩进的 pretty JSON，非 ASCII 字符按 UTF-8 原样写出，
//! 相同输入 + 相同上限 → 字节级一致。

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::DumpError;

pub const META: &str = "00_meta.json";
pub const LAYERS: &str = "01_layers.json";
pub const BLOCKS: &str = "02_blocks.json";
pub const INSERTS: &str = "10_inserts.json";
pub const LWPOLYLINES: &str = "11_lwpolylines.json";
pub const POLYLINES: &str = "12_polylines.json";
pub const LINES: &str = "13_lines.json";
pub const ARCS: &str = "14_arcs.json";
pub const CIRCLES: &str = "15_circles.json";
pub const TEXTS: &str = "16_texts.json";
pub const MTEXTS: &str = "17_mtexts.json";
pub const DIMENSIONS: &str = "18_dimensions.json";

/// 写出一个产物；失败只作废该产物，不影响其余产物
pub fn write<T: Serialize>(out_dir: &Path, name: &'static str, value: &T) -> Result<(), DumpError> {
    fs::create_dir_all(out_dir).map_err(|e| artifact_error(name, e))?;
    let path = out_dir.join(name);
    let file = File::create(&path).map_err(|e| artifact_error(name, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| artifact_error(name, e))?;
    writer.flush().map_err(|e| artifact_error(name, e))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn artifact_error(name: &'static str, error: impl std::fmt::Display) -> DumpError {
    DumpError::Artifact {
        name,
        message: error.to_string(),
    }
}
