//! 各实体族的提取器
//!
//! 共同契约：`<family>(source, limit) -> 按文档顺序的记录列表`
//! （元信息每次运行一条）。提取器之间相互独立、只读共享图纸。
//!
//! 容错：单个字段读不出 → 该字段为 null；单个实体无法构造最小身份
//! → 仅丢弃该实体并告警，同族与他族不受影响。

use std::collections::BTreeMap;

use dxf::entities::{Entity, EntityType};
use dxf::enums::DimensionType;
use dxf::objects::ObjectType;
use dxf::Point;
use tracing::warn;

use crate::error::RecordError;
use crate::kind;
use crate::limit::RecordLimit;
use crate::loader::DrawingSource;
use crate::record::{
    ArcRecord, BlockRecord, CircleRecord, DimensionRecord, DocumentMeta, InsertRecord,
    LayerRecord, LineRecord, LwPolylineRecord, MTextRecord, PolylineRecord, TextRecord,
};
use crate::value::{coord2, coord3, finite, non_empty, TriState};

/// 文档元信息
pub fn meta(source: &DrawingSource) -> DocumentMeta {
    let header = &source.drawing.header;
    let layouts = source
        .drawing
        .objects()
        .filter_map(|obj| match &obj.specific {
            ObjectType::Layout(layout) => Some(layout.layout_name.clone()),
            _ => None,
        })
        .collect();
    DocumentMeta {
        path: source.path.display().to_string(),
        version: format!("{:?}", header.version),
        units_code: header.default_drawing_units as i32,
        limits_min: Some(coord3(&header.minimum_drawing_limits)),
        limits_max: Some(coord3(&header.maximum_drawing_limits)),
        layouts,
        modelspace_entities: source.drawing.entities().count(),
    }
}

/// 图层表
pub fn layers(source: &DrawingSource, limit: RecordLimit) -> Vec<LayerRecord> {
    let access = source.layer_flags();
    let mut records = Vec::new();
    for layer in source.drawing.layers() {
        if limit.reached(records.len()) {
            break;
        }
        records.push(LayerRecord {
            name: layer.name.clone(),
            color: layer.color.index().map(|c| c as i16),
            linetype: non_empty(&layer.line_type_name),
            lineweight: access.lineweight(layer),
            on: access.is_off(layer).negate(),
            frozen: access.is_frozen(layer),
            locked: access.is_locked(layer),
            plottable: access.is_plottable(layer),
        });
    }
    records
}

/// 块定义：内部实体类型直方图 + 基点
pub fn blocks(source: &DrawingSource, limit: RecordLimit) -> Vec<BlockRecord> {
    let mut records = Vec::new();
    for block in source.drawing.blocks() {
        if limit.reached(records.len()) {
            break;
        }
        if block.name.is_empty() {
            skip_entity(RecordError::MissingIdentity {
                kind: "BLOCK",
                field: "name",
            });
            continue;
        }
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for entity in &block.entities {
            // 每个内含实体计数一次；不认识的类型折入 <unknown> 桶
            let name = kind::classify(&entity.specific).name();
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
        records.push(BlockRecord {
            name: block.name.clone(),
            base_point: Some(coord3(&block.base_point)),
            entity_type_counts: counts,
        });
    }
    records
}

/// 块引用：属性子实体折叠为 tag -> text 映射，tag 读不出的条目跳过
pub fn inserts(source: &DrawingSource, limit: RecordLimit) -> Vec<InsertRecord> {
    scan(source, limit, |entity| {
        let EntityType::Insert(insert) = &entity.specific else {
            return None;
        };
        if insert.name.is_empty() {
            skip_entity(RecordError::MissingIdentity {
                kind: "INSERT",
                field: "name",
            });
            return None;
        }
        let mut attribs = BTreeMap::new();
        for att in insert.attributes() {
            if att.attribute_tag.is_empty() {
                continue;
            }
            attribs.insert(att.attribute_tag.clone(), att.value.clone());
        }
        Some(InsertRecord {
            block_name: insert.name.clone(),
            layer: entity.common.layer.clone(),
            insert: coord3(&insert.location),
            rotation_deg: finite(insert.rotation),
            scale: [
                finite(insert.x_scale_factor),
                finite(insert.y_scale_factor),
                finite(insert.z_scale_factor),
            ],
            attribs,
        })
    })
}

/// 轻量多段线：只取 (x, y)；bulge 与宽度属于曲线重建，按约定丢弃
pub fn lwpolylines(source: &DrawingSource, limit: RecordLimit) -> Vec<LwPolylineRecord> {
    scan(source, limit, |entity| {
        let EntityType::LwPolyline(poly) = &entity.specific else {
            return None;
        };
        Some(LwPolylineRecord {
            layer: entity.common.layer.clone(),
            closed: poly.is_closed(),
            points: poly.vertices.iter().map(|v| coord2(v.x, v.y)).collect(),
        })
    })
}

/// 传统多段线：VERTEX 子实体的三维坐标
///
/// 网格/多面体变体的闭合性不是单一布尔，报告 Unknown。
pub fn polylines(source: &DrawingSource, limit: RecordLimit) -> Vec<PolylineRecord> {
    scan(source, limit, |entity| {
        let EntityType::Polyline(poly) = &entity.specific else {
            return None;
        };
        let closed = if poly.flags & (0x10 | 0x40) != 0 {
            TriState::Unknown
        } else {
            TriState::from(poly.is_closed())
        };
        Some(PolylineRecord {
            layer: entity.common.layer.clone(),
            closed,
            points: poly.vertices().map(|v| coord3(&v.location)).collect(),
        })
    })
}

pub fn lines(source: &DrawingSource, limit: RecordLimit) -> Vec<LineRecord> {
    scan(source, limit, |entity| {
        let EntityType::Line(line) = &entity.specific else {
            return None;
        };
        Some(LineRecord {
            layer: entity.common.layer.clone(),
            start: coord3(&line.p1),
            end: coord3(&line.p2),
        })
    })
}

pub fn arcs(source: &DrawingSource, limit: RecordLimit) -> Vec<ArcRecord> {
    scan(source, limit, |entity| {
        let EntityType::Arc(arc) = &entity.specific else {
            return None;
        };
        Some(ArcRecord {
            layer: entity.common.layer.clone(),
            center: coord3(&arc.center),
            radius: finite(arc.radius),
            start_angle_deg: finite(arc.start_angle),
            end_angle_deg: finite(arc.end_angle),
        })
    })
}

pub fn circles(source: &DrawingSource, limit: RecordLimit) -> Vec<CircleRecord> {
    scan(source, limit, |entity| {
        let EntityType::Circle(circle) = &entity.specific else {
            return None;
        };
        Some(CircleRecord {
            layer: entity.common.layer.clone(),
            center: coord3(&circle.center),
            radius: finite(circle.radius),
        })
    })
}

/// 单行文字：各字段独立读取，内容为空时记 null 但记录保留
pub fn texts(source: &DrawingSource, limit: RecordLimit) -> Vec<TextRecord> {
    scan(source, limit, |entity| {
        let EntityType::Text(text) = &entity.specific else {
            return None;
        };
        Some(TextRecord {
            layer: entity.common.layer.clone(),
            text: non_empty(&text.value),
            insert: coord3(&text.location),
            height: finite(text.text_height),
            rotation_deg: finite(text.rotation),
        })
    })
}

/// 多行文字
pub fn mtexts(source: &DrawingSource, limit: RecordLimit) -> Vec<MTextRecord> {
    scan(source, limit, |entity| {
        let EntityType::MText(mtext) = &entity.specific else {
            return None;
        };
        Some(MTextRecord {
            layer: entity.common.layer.clone(),
            text: non_empty(&mtext.text),
            insert: coord3(&mtext.insertion_point),
            char_height: finite(mtext.initial_text_height),
            rotation_deg: finite(mtext.rotation_angle),
            width: finite(mtext.reference_rectangle_width),
        })
    })
}

/// 标注：先按标注类型从定义点重算测量值；重算不可行时沿用文件中的
/// 存量字段，并在记录上显式标记。重算失败从不丢记录。
pub fn dimensions(source: &DrawingSource, limit: RecordLimit) -> Vec<DimensionRecord> {
    scan(source, limit, |entity| {
        let base = dimension_base(&entity.specific)?;
        let recomputed = recompute_measurement(&entity.specific);
        if recomputed.is_none() {
            warn!(
                "dimension measurement not recomputable, falling back to stored value (type {:?})",
                base.dimension_type
            );
        }
        Some(DimensionRecord {
            layer: entity.common.layer.clone(),
            dimtype: base.dimension_type as i32,
            text: override_text(&base.text),
            measurement: recomputed.or_else(|| finite(base.actual_measurement)),
            measurement_recomputed: recomputed.is_some(),
            defpoint: Some(coord3(&base.definition_point_1)),
        })
    })
}

/// 逐实体扫描的公共骨架：保持文档顺序，到达上限即停止产出
fn scan<R>(
    source: &DrawingSource,
    limit: RecordLimit,
    mut pick: impl FnMut(&Entity) -> Option<R>,
) -> Vec<R> {
    let mut records = Vec::new();
    for entity in source.drawing.entities() {
        if limit.reached(records.len()) {
            break;
        }
        if let Some(record) = pick(entity) {
            records.push(record);
        }
    }
    records
}

fn skip_entity(error: RecordError) {
    warn!("skipping entity: {error}");
}

fn dimension_base(specific: &EntityType) -> Option<&dxf::entities::DimensionBase> {
    match specific {
        EntityType::RotatedDimension(d) => Some(&d.dimension_base),
        EntityType::RadialDimension(d) => Some(&d.dimension_base),
        EntityType::DiameterDimension(d) => Some(&d.dimension_base),
        EntityType::AngularThreePointDimension(d) => Some(&d.dimension_base),
        EntityType::OrdinateDimension(d) => Some(&d.dimension_base),
        _ => None,
    }
}

/// `"<>"` 占位与空串都表示没有覆盖文本
fn override_text(text: &str) -> Option<String> {
    if text.is_empty() || text == "<>" {
        None
    } else {
        Some(text.to_string())
    }
}

/// 按标注类型从定义点重算测量值；无法重算的类型返回 None
fn recompute_measurement(specific: &EntityType) -> Option<f64> {
    match specific {
        EntityType::RotatedDimension(d) => {
            let p1 = &d.definition_point_2;
            let p2 = &d.definition_point_3;
            if matches!(d.dimension_base.dimension_type, DimensionType::Aligned) {
                finite(distance(p1, p2))
            } else {
                // 旋转式标注量取两引出点在尺寸线方向上的投影
                let angle = d.rotation_angle.to_radians();
                finite(((p2.x - p1.x) * angle.cos() + (p2.y - p1.y) * angle.sin()).abs())
            }
        }
        EntityType::RadialDimension(d) => {
            finite(distance(&d.dimension_base.definition_point_1, &d.definition_point_2))
        }
        // 10 与 15 是圆上一对对径点，距离即直径
        EntityType::DiameterDimension(d) => {
            finite(distance(&d.dimension_base.definition_point_1, &d.definition_point_2))
        }
        EntityType::AngularThreePointDimension(d) => {
            let vertex = &d.definition_point_4;
            let a = (d.definition_point_2.x - vertex.x, d.definition_point_2.y - vertex.y);
            let b = (d.definition_point_3.x - vertex.x, d.definition_point_3.y - vertex.y);
            if (a.0 == 0.0 && a.1 == 0.0) || (b.0 == 0.0 && b.1 == 0.0) {
                return None;
            }
            let cross = a.0 * b.1 - a.1 * b.0;
            let dot = a.0 * b.0 + a.1 * b.1;
            finite(cross.atan2(dot).abs().to_degrees())
        }
        // 坐标式标注的 UCS 原点不在文件里，无法重算
        _ => None,
    }
}

fn distance(a: &Point, b: &Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2) + (b.z - a.z).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxf::entities::{
        Arc as DxfArc, Circle as DxfCircle, Insert, Line as DxfLine, RadialDimension,
        RotatedDimension, Text as DxfText,
    };
    use dxf::enums::AcadVersion;
    use dxf::Drawing;

    fn entity_on_layer(specific: EntityType, layer: &str) -> Entity {
        let mut entity = Entity::new(specific);
        entity.common.layer = layer.to_string();
        entity
    }

    fn source_with(entities: Vec<Entity>) -> DrawingSource {
        let mut drawing = Drawing::new();
        drawing.header.version = AcadVersion::R2010;
        for entity in entities {
            drawing.add_entity(entity);
        }
        DrawingSource::from_drawing("test.dxf".into(), drawing)
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> EntityType {
        let mut line = DxfLine::default();
        line.p1 = Point::new(x1, y1, 0.0);
        line.p2 = Point::new(x2, y2, 0.0);
        EntityType::Line(line)
    }

    #[test]
    fn test_lines_and_circles_extract_independently() {
        let mut circle = DxfCircle::default();
        circle.center = Point::new(5.0, 5.0, 0.0);
        circle.radius = 2.0;
        let source = source_with(vec![
            entity_on_layer(line(0.0, 0.0, 10.0, 0.0), "0"),
            entity_on_layer(EntityType::Circle(circle), "0"),
        ]);

        let lines = lines(&source, RecordLimit::unlimited());
        assert_eq!(
            serde_json::to_string(&lines).expect("Failed to serialize"),
            r#"[{"layer":"0","start":[0.0,0.0,0.0],"end":[10.0,0.0,0.0]}]"#
        );
        let circles = circles(&source, RecordLimit::unlimited());
        assert_eq!(
            serde_json::to_string(&circles).expect("Failed to serialize"),
            r#"[{"layer":"0","center":[5.0,5.0,0.0],"radius":2.0}]"#
        );
    }

    #[test]
    fn test_arc_angles_stay_in_degrees() {
        let mut arc = DxfArc::default();
        arc.center = Point::new(1.0, 1.0, 0.0);
        arc.radius = 3.0;
        arc.start_angle = 15.0;
        arc.end_angle = 195.0;
        let source = source_with(vec![entity_on_layer(EntityType::Arc(arc), "geom")]);

        let records = arcs(&source, RecordLimit::unlimited());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_angle_deg, Some(15.0));
        assert_eq!(records[0].end_angle_deg, Some(195.0));
    }

    #[test]
    fn test_insert_ceiling_keeps_first_in_document_order() {
        let mut entities = Vec::new();
        for i in 1..=5 {
            let mut insert = Insert::default();
            insert.name = format!("B{i}");
            entities.push(entity_on_layer(EntityType::Insert(insert), "0"));
        }
        let source = source_with(entities);

        let capped = inserts(&source, RecordLimit::new(1));
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].block_name, "B1");

        let all = inserts(&source, RecordLimit::unlimited());
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_unnamed_insert_dropped_without_affecting_siblings() {
        let mut unnamed = Insert::default();
        unnamed.name = String::new();
        let mut named = Insert::default();
        named.name = "DOOR".to_string();
        let source = source_with(vec![
            entity_on_layer(EntityType::Insert(unnamed), "0"),
            entity_on_layer(EntityType::Insert(named), "0"),
        ]);

        let records = inserts(&source, RecordLimit::unlimited());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].block_name, "DOOR");
    }

    #[test]
    fn test_empty_text_content_is_null_but_record_kept() {
        let mut text = DxfText::default();
        text.value = String::new();
        text.location = Point::new(1.0, 2.0, 0.0);
        text.text_height = 2.5;
        let source = source_with(vec![entity_on_layer(EntityType::Text(text), "annot")]);

        let records = texts(&source, RecordLimit::unlimited());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, None);
        assert_eq!(records[0].height, Some(2.5));
    }

    #[test]
    fn test_nan_coordinate_null_fills_component() {
        let source = source_with(vec![entity_on_layer(line(f64::NAN, 0.0, 10.0, 0.0), "0")]);
        let records = lines(&source, RecordLimit::unlimited());
        assert_eq!(records.len(), 1);
        // 元组保持 3 分量，坏分量为 null
        assert_eq!(records[0].start, [None, Some(0.0), Some(0.0)]);
    }

    #[test]
    fn test_aligned_dimension_measurement_recomputed() {
        let mut dim = RotatedDimension::default();
        dim.dimension_base.dimension_type = DimensionType::Aligned;
        dim.dimension_base.actual_measurement = -1.0;
        dim.definition_point_2 = Point::new(0.0, 0.0, 0.0);
        dim.definition_point_3 = Point::new(3.0, 4.0, 0.0);
        let source = source_with(vec![entity_on_layer(
            EntityType::RotatedDimension(dim),
            "dims",
        )]);

        let records = dimensions(&source, RecordLimit::unlimited());
        assert_eq!(records.len(), 1);
        assert!(records[0].measurement_recomputed);
        assert!((records[0].measurement.expect("Missing measurement") - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_radial_dimension_measures_center_to_curve_point() {
        let mut dim = RadialDimension::default();
        dim.dimension_base.definition_point_1 = Point::new(0.0, 0.0, 0.0);
        dim.definition_point_2 = Point::new(2.0, 0.0, 0.0);
        let source = source_with(vec![entity_on_layer(
            EntityType::RadialDimension(dim),
            "dims",
        )]);

        let records = dimensions(&source, RecordLimit::unlimited());
        assert!((records[0].measurement.expect("Missing measurement") - 2.0).abs() < 1e-9);
        assert!(records[0].measurement_recomputed);
    }

    #[test]
    fn test_override_text_placeholder_is_null() {
        assert_eq!(override_text(""), None);
        assert_eq!(override_text("<>"), None);
        assert_eq!(override_text("Ø50"), Some("Ø50".to_string()));
    }

    #[test]
    fn test_families_do_not_cross_contaminate() {
        let mut circle = DxfCircle::default();
        circle.center = Point::new(0.0, 0.0, 0.0);
        circle.radius = 1.0;
        let source = source_with(vec![
            entity_on_layer(line(0.0, 0.0, 1.0, 1.0), "0"),
            entity_on_layer(EntityType::Circle(circle), "0"),
        ]);

        assert_eq!(lines(&source, RecordLimit::unlimited()).len(), 1);
        assert_eq!(circles(&source, RecordLimit::unlimited()).len(), 1);
        assert!(texts(&source, RecordLimit::unlimited()).is_empty());
        assert!(inserts(&source, RecordLimit::unlimited()).is_empty());
    }
}
