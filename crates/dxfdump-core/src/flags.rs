//! 图层布尔标志的版本适配
//!
//! 不同图纸版本对 on/frozen/locked/plottable 的承载方式不同（打印
//! 标志和线宽字段到 R2000 才进入图层表）。加载时按检测到的版本一次性
//! 选定适配器，之后统一走固定的能力集；读取永不失败，版本不承载的
//! 能力返回 Unknown。

use dxf::enums::AcadVersion;
use dxf::tables::Layer;

use crate::value::TriState;

/// 固定能力集，每项三态
pub trait LayerFlagAccess: Sync {
    fn is_off(&self, layer: &Layer) -> TriState;
    fn is_frozen(&self, layer: &Layer) -> TriState;
    fn is_locked(&self, layer: &Layer) -> TriState;
    fn is_plottable(&self, layer: &Layer) -> TriState;
    fn lineweight(&self, layer: &Layer) -> Option<i16>;
}

/// R2000 及之后：四项能力齐备
pub struct ModernLayerFlags;

impl LayerFlagAccess for ModernLayerFlags {
    fn is_off(&self, layer: &Layer) -> TriState {
        // 图层表里颜色为负值表示图层关闭
        TriState::from(layer.color.is_turned_off())
    }

    fn is_frozen(&self, layer: &Layer) -> TriState {
        TriState::from(layer.is_frozen())
    }

    fn is_locked(&self, layer: &Layer) -> TriState {
        TriState::from(layer.is_locked())
    }

    fn is_plottable(&self, layer: &Layer) -> TriState {
        TriState::from(layer.is_layer_plotted)
    }

    fn lineweight(&self, layer: &Layer) -> Option<i16> {
        Some(layer.line_weight.raw_value())
    }
}

/// R2000 之前：打印标志与线宽尚不存在于文件中
pub struct LegacyLayerFlags;

impl LayerFlagAccess for LegacyLayerFlags {
    fn is_off(&self, layer: &Layer) -> TriState {
        TriState::from(layer.color.is_turned_off())
    }

    fn is_frozen(&self, layer: &Layer) -> TriState {
        TriState::from(layer.is_frozen())
    }

    fn is_locked(&self, layer: &Layer) -> TriState {
        TriState::from(layer.is_locked())
    }

    fn is_plottable(&self, _layer: &Layer) -> TriState {
        TriState::Unknown
    }

    fn lineweight(&self, _layer: &Layer) -> Option<i16> {
        None
    }
}

/// 按版本选定适配器，整个运行只选一次
pub fn select(version: AcadVersion) -> &'static dyn LayerFlagAccess {
    if is_modern(version) {
        &ModernLayerFlags
    } else {
        &LegacyLayerFlags
    }
}

fn is_modern(version: AcadVersion) -> bool {
    matches!(
        version,
        AcadVersion::R2000
            | AcadVersion::R2004
            | AcadVersion::R2007
            | AcadVersion::R2010
            | AcadVersion::R2013
            | AcadVersion::R2018
    )
}
