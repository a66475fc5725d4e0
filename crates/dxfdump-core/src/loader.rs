//! 文档加载
//!
//! 整个运行只打开一次；加载失败是唯一允许中止全局的错误。加载完成后
//! 图纸只读，可被全部提取器无锁共享。

use std::path::{Path, PathBuf};

use dxf::enums::AcadVersion;
use dxf::Drawing;
use tracing::info;

use crate::error::DumpError;
use crate::flags::{self, LayerFlagAccess};

/// 已加载的图纸及其来源路径
pub struct DrawingSource {
    pub path: PathBuf,
    pub drawing: Drawing,
    flags: &'static dyn LayerFlagAccess,
}

impl DrawingSource {
    /// 打开并解析 DXF 文件；解析失败或版本不受支持时返回致命 Load 错误
    pub fn open(path: &Path) -> Result<Self, DumpError> {
        let drawing = Drawing::load_file(path).map_err(|e| DumpError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let source = Self::from_drawing(path.to_path_buf(), drawing);
        info!(
            "Loaded {} ({:?}, {} modelspace entities)",
            source.path.display(),
            source.version(),
            source.drawing.entities().count()
        );
        Ok(source)
    }

    /// 由内存中的图纸构造来源；图层标志适配器在此一次性选定
    pub fn from_drawing(path: PathBuf, drawing: Drawing) -> Self {
        let flags = flags::select(drawing.header.version);
        Self {
            path,
            drawing,
            flags,
        }
    }

    pub fn version(&self) -> AcadVersion {
        self.drawing.header.version
    }

    /// 加载时选定的图层标志适配器
    pub fn layer_flags(&self) -> &'static dyn LayerFlagAccess {
        self.flags
    }
}
