//! 几何提取
//!
//! 单次遍历展平结果，为每个顶点生成一条 [`RawElement`]：
//! - 面：`Face` 类，属性为显式颜色号，ByLayer 时取调用方给定的默认厚度
//! - 折线（直线、圆弧、圆、椭圆、多段线）：`Edge` 类，ByLayer 时属性为 0
//! - 点：单独收集，只进入节点表
//!
//! 换算系数只作用于坐标，不作用于属性。

use crate::entity::Ordinal;
use crate::flatten::{FlatEntity, Primitive};
use crate::math::Point3;

/// 原始单元类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 板（面）的顶点
    Face,
    /// 杆件链的顶点
    Edge,
}

/// 带来源信息的顶点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawElement {
    /// 已换算的坐标
    pub position: Point3,
    /// 源实体序号
    pub ordinal: Ordinal,
    /// 厚度或截面号
    pub attribute: f64,
    pub kind: ElementKind,
}

/// 提取结果
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// 按文档顺序排列的顶点
    pub elements: Vec<RawElement>,
    /// 独立点（已换算）
    pub points: Vec<Point3>,
}

/// 提取顶点
pub fn extract(flat: &[FlatEntity], scale: f64, default_thickness: f64) -> Extraction {
    let mut extraction = Extraction::default();

    for entity in flat {
        match &entity.primitive {
            Primitive::Face(vertices) => {
                let attribute = entity.color.attribute_or(default_thickness);
                push_group(
                    &mut extraction,
                    entity.ordinal,
                    vertices,
                    scale,
                    attribute,
                    ElementKind::Face,
                );
            }
            Primitive::Chain(vertices) => {
                let attribute = entity.color.attribute_or(0.0);
                push_group(
                    &mut extraction,
                    entity.ordinal,
                    vertices,
                    scale,
                    attribute,
                    ElementKind::Edge,
                );
            }
            Primitive::Point(position) => {
                extraction.points.push(position * scale);
            }
        }
    }

    tracing::debug!(
        elements = extraction.elements.len(),
        points = extraction.points.len(),
        scale,
        "几何提取完成"
    );
    extraction
}

fn push_group(
    extraction: &mut Extraction,
    ordinal: Ordinal,
    vertices: &[Point3],
    scale: f64,
    attribute: f64,
    kind: ElementKind,
) {
    extraction
        .elements
        .extend(vertices.iter().map(|vertex| RawElement {
            position: vertex * scale,
            ordinal,
            attribute,
            kind,
        }));
}
