//! 实体展平
//!
//! 多段线爆炸为直线/圆弧段，圆弧、圆和椭圆离散为折线。
//! 展平结果沿用源实体的序号和颜色，坐标仍为文档单位（WCS）。

use crate::entity::{Entity, Ordinal};
use crate::geometry::Geometry;
use crate::math::Point3;
use crate::options::TessellationOptions;
use crate::properties::ColorCode;

/// 展平后的图元
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// 面的顶点
    Face(Vec<Point3>),
    /// 按走向排列的折线顶点
    Chain(Vec<Point3>),
    /// 独立点
    Point(Point3),
}

/// 展平后的实体
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntity {
    pub ordinal: Ordinal,
    pub color: ColorCode,
    pub primitive: Primitive,
}

/// 展平单个实体
pub fn flatten_entity(entity: &Entity, options: &TessellationOptions) -> FlatEntity {
    let primitive = match &entity.geometry {
        Geometry::Face(face) => Primitive::Face(face.vertices.clone()),
        Geometry::Line(line) => Primitive::Chain(vec![line.start, line.end]),
        Geometry::Arc(arc) => Primitive::Chain(arc.sample_points(options)),
        Geometry::Circle(circle) => Primitive::Chain(circle.sample_points(options)),
        Geometry::Ellipse(ellipse) => Primitive::Chain(ellipse.sample_points(options)),
        Geometry::Polyline(polyline) => Primitive::Chain(polyline.sample_points(options)),
        Geometry::Point(point) => Primitive::Point(point.position),
    };

    FlatEntity {
        ordinal: entity.ordinal,
        color: entity.color,
        primitive,
    }
}

/// 按文档顺序展平全部实体
pub fn flatten(entities: &[Entity], options: &TessellationOptions) -> Vec<FlatEntity> {
    let flat: Vec<FlatEntity> = entities
        .iter()
        .map(|entity| flatten_entity(entity, options))
        .collect();

    tracing::debug!(
        entities = entities.len(),
        vertices = flat.iter().map(|f| f.vertex_count()).sum::<usize>(),
        "实体展平完成"
    );
    flat
}

impl FlatEntity {
    /// 顶点数
    pub fn vertex_count(&self) -> usize {
        match &self.primitive {
            Primitive::Face(vertices) | Primitive::Chain(vertices) => vertices.len(),
            Primitive::Point(_) => 1,
        }
    }
}
