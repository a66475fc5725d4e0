//! 各实体族的归一化记录
//!
//! 记录是不可变快照：提取后写盘即弃，除了在输出列表中的位置外
//! 不携带任何身份。图层引用只是自由字符串，不与图层表校验。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{Coord2, Coord3, TriState};

/// 文档元信息（每次运行一条）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub path: String,
    /// 版本字符串，如 "R2010"
    pub version: String,
    /// $INSUNITS 原始单位码（0=无单位, 4=mm, 6=m），不做单位换算
    pub units_code: i32,
    pub limits_min: Option<Coord3>,
    pub limits_max: Option<Coord3>,
    pub layouts: Vec<String>,
    pub modelspace_entities: usize,
}

/// 图层：可见性标志均为三态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRecord {
    pub name: String,
    pub color: Option<i16>,
    pub linetype: Option<String>,
    pub lineweight: Option<i16>,
    pub on: TriState,
    pub frozen: TriState,
    pub locked: TriState,
    pub plottable: TriState,
}

/// 块定义：基点 + 内部实体类型直方图（含 `<unknown>` 桶）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    pub name: String,
    pub base_point: Option<Coord3>,
    pub entity_type_counts: BTreeMap<String, u64>,
}

/// 块引用（INSERT），属性映射可为空
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRecord {
    pub block_name: String,
    pub layer: String,
    pub insert: Coord3,
    pub rotation_deg: Option<f64>,
    pub scale: Coord3,
    pub attribs: BTreeMap<String, String>,
}

/// 轻量多段线：只保留 (x, y)，bulge/宽度按约定丢弃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LwPolylineRecord {
    pub layer: String,
    pub closed: bool,
    pub points: Vec<Coord2>,
}

/// 传统多段线：显式 VERTEX 子实体的三维坐标，闭合性三态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolylineRecord {
    pub layer: String,
    pub closed: TriState,
    pub points: Vec<Coord3>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub layer: String,
    pub start: Coord3,
    pub end: Coord3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcRecord {
    pub layer: String,
    pub center: Coord3,
    pub radius: Option<f64>,
    pub start_angle_deg: Option<f64>,
    pub end_angle_deg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleRecord {
    pub layer: String,
    pub center: Coord3,
    pub radius: Option<f64>,
}

/// 单行文字
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRecord {
    pub layer: String,
    pub text: Option<String>,
    pub insert: Coord3,
    pub height: Option<f64>,
    pub rotation_deg: Option<f64>,
}

/// 多行文字
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MTextRecord {
    pub layer: String,
    pub text: Option<String>,
    pub insert: Coord3,
    pub char_height: Option<f64>,
    pub rotation_deg: Option<f64>,
    /// 换行参考宽度
    pub width: Option<f64>,
}

/// 标注
///
/// `measurement_recomputed` 显式标记测量值是从定义点重算得到，
/// 还是沿用文件里的存量字段（重算不可行时的回退）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub layer: String,
    pub dimtype: i32,
    pub text: Option<String>,
    pub measurement: Option<f64>,
    pub measurement_recomputed: bool,
    pub defpoint: Option<Coord3>,
}
