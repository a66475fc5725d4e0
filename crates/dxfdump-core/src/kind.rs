//! 实体类型的封闭枚举
//!
//! 字符串键的类型分派在这里收敛为带标签的枚举：新增可识别的实体族
//! 是编译期决定；未覆盖的类型显式落入 `Unknown`，在块直方图中计入
//! `<unknown>` 桶。

use dxf::entities::EntityType;

/// 已识别的实体族 + 兜底 Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Line,
    Circle,
    Arc,
    Ellipse,
    LwPolyline,
    Polyline,
    Insert,
    Text,
    MText,
    Point,
    Solid,
    Spline,
    Dimension,
    Attribute,
    Unknown,
}

impl EntityKind {
    /// 对应的 DXF 类型名；Unknown 即直方图的 `<unknown>` 桶
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Line => "LINE",
            EntityKind::Circle => "CIRCLE",
            EntityKind::Arc => "ARC",
            EntityKind::Ellipse => "ELLIPSE",
            EntityKind::LwPolyline => "LWPOLYLINE",
            EntityKind::Polyline => "POLYLINE",
            EntityKind::Insert => "INSERT",
            EntityKind::Text => "TEXT",
            EntityKind::MText => "MTEXT",
            EntityKind::Point => "POINT",
            EntityKind::Solid => "SOLID",
            EntityKind::Spline => "SPLINE",
            EntityKind::Dimension => "DIMENSION",
            EntityKind::Attribute => "ATTRIB",
            EntityKind::Unknown => "<unknown>",
        }
    }
}

/// 把 dxf crate 的实体变体归类到封闭的实体族
pub fn classify(specific: &EntityType) -> EntityKind {
    match specific {
        EntityType::Line(_) => EntityKind::Line,
        EntityType::Circle(_) => EntityKind::Circle,
        EntityType::Arc(_) => EntityKind::Arc,
        EntityType::Ellipse(_) => EntityKind::Ellipse,
        EntityType::LwPolyline(_) => EntityKind::LwPolyline,
        EntityType::Polyline(_) => EntityKind::Polyline,
        EntityType::Insert(_) => EntityKind::Insert,
        EntityType::Text(_) => EntityKind::Text,
        EntityType::MText(_) => EntityKind::MText,
        EntityType::ModelPoint(_) => EntityKind::Point,
        EntityType::Solid(_) => EntityKind::Solid,
        EntityType::Spline(_) => EntityKind::Spline,
        EntityType::RotatedDimension(_)
        | EntityType::RadialDimension(_)
        | EntityType::DiameterDimension(_)
        | EntityType::AngularThreePointDimension(_)
        | EntityType::OrdinateDimension(_) => EntityKind::Dimension,
        EntityType::Attribute(_) => EntityKind::Attribute,
        _ => EntityKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxf::entities::{Circle, Line, Ray};

    #[test]
    fn test_classify_known_kinds() {
        assert_eq!(
            classify(&EntityType::Line(Line::default())),
            EntityKind::Line
        );
        assert_eq!(
            classify(&EntityType::Circle(Circle::default())),
            EntityKind::Circle
        );
    }

    #[test]
    fn test_unrecognized_kind_folds_into_unknown() {
        let kind = classify(&EntityType::Ray(Ray::default()));
        assert_eq!(kind, EntityKind::Unknown);
        assert_eq!(kind.name(), "<unknown>");
    }

    #[test]
    fn test_names_match_dxf_type_strings() {
        assert_eq!(EntityKind::LwPolyline.name(), "LWPOLYLINE");
        assert_eq!(EntityKind::Insert.name(), "INSERT");
        assert_eq!(EntityKind::MText.name(), "MTEXT");
    }
}
