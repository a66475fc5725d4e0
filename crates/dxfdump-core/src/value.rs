//! 共享的数值/坐标转换与三态标志
//!
//! 字段级提取失败在这一层被吸收：读不出来的分量变成 `None`（落盘为
//! null），坐标元组永远保持定长——3 分量点始终 3 个元素，LWPOLYLINE
//! 顶点始终 2 个元素，缺失处补 null 而不是截短。

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 三态标志：true / false / 未知（落盘为 null）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    Yes,
    No,
    Unknown,
}

impl TriState {
    pub fn as_option(self) -> Option<bool> {
        match self {
            TriState::Yes => Some(true),
            TriState::No => Some(false),
            TriState::Unknown => None,
        }
    }

    /// 取反，Unknown 保持 Unknown
    pub fn negate(self) -> Self {
        match self {
            TriState::Yes => TriState::No,
            TriState::No => TriState::Yes,
            TriState::Unknown => TriState::Unknown,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::Yes
        } else {
            TriState::No
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(v) => TriState::from(v),
            None => TriState::Unknown,
        }
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_option() {
            Some(v) => serializer.serialize_bool(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<bool>::deserialize(deserializer)?.into())
    }
}

/// 定长 3 分量坐标，分量不可读时为 null
pub type Coord3 = [Option<f64>; 3];

/// 定长 2 分量坐标（LWPOLYLINE 顶点）
pub type Coord2 = [Option<f64>; 2];

/// 数值字段的统一入口：非有限值视为读取失败
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

pub fn coord3(point: &dxf::Point) -> Coord3 {
    [finite(point.x), finite(point.y), finite(point.z)]
}

pub fn coord2(x: f64, y: f64) -> Coord2 {
    [finite(x), finite(y)]
}

/// 文本内容读不出/为空时为 null，记录本身仍然保留
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_rejects_nan_and_inf() {
        assert_eq!(finite(2.5), Some(2.5));
        assert_eq!(finite(f64::NAN), None);
        assert_eq!(finite(f64::INFINITY), None);
        assert_eq!(finite(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_coord3_null_fills_bad_components() {
        let point = dxf::Point::new(1.0, f64::NAN, 3.0);
        let coord = coord3(&point);
        // 坐标保持定长，坏分量补 null
        assert_eq!(coord.len(), 3);
        assert_eq!(coord, [Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_tristate_serializes_as_bool_or_null() {
        assert_eq!(serde_json::to_string(&TriState::Yes).unwrap(), "true");
        assert_eq!(serde_json::to_string(&TriState::No).unwrap(), "false");
        assert_eq!(serde_json::to_string(&TriState::Unknown).unwrap(), "null");
    }

    #[test]
    fn test_tristate_negate_keeps_unknown() {
        assert_eq!(TriState::Yes.negate(), TriState::No);
        assert_eq!(TriState::No.negate(), TriState::Yes);
        assert_eq!(TriState::Unknown.negate(), TriState::Unknown);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("标高"), Some("标高".to_string()));
    }
}
