//! DXF文件导入
//!
//! 基于 `dxf` crate 解析，只转换模型空间中的以下实体：
//! 3DFACE、LINE、ARC、CIRCLE、ELLIPSE、LWPOLYLINE、POLYLINE、POINT。
//! 其他实体跳过，但仍占用序号。

use crate::document::Document;
use crate::error::FileError;
use dxf::entities::{Entity as DxfEntity, EntityType};
use dxf::enums::AcadVersion;
use std::io::Cursor;
use zmesh_core::entity::{Entity, Ordinal};
use zmesh_core::geometry::{
    Arc, Circle, Ellipse, Face, Geometry, Line, Point, Polyline, PolylineVertex,
};
use zmesh_core::math::{Point3, Vector3};
use zmesh_core::properties::ColorCode;
use zmesh_core::units::Unit;

/// 接受的文件扩展名
pub const DXF_EXTENSION: &str = "dxf";

// POLYLINE 标志位
const POLYLINE_3D: i32 = 8;
const POLYGON_MESH: i32 = 16;
const POLYFACE_MESH: i32 = 64;

/// 拆分文件名为（基础名，扩展名），空格替换为下划线
pub fn split_filename(filename: &str) -> Result<(String, String), FileError> {
    let sanitized = filename.replace(' ', "_");
    match sanitized.rsplit_once('.') {
        Some((base, extension)) if !base.is_empty() => {
            Ok((base.to_string(), extension.to_string()))
        }
        _ => Err(FileError::Format(format!(
            "missing file extension in '{filename}'"
        ))),
    }
}

/// 从内存读取 DXF
pub fn load(bytes: &[u8], filename: &str) -> Result<Document, FileError> {
    let (base_name, extension) = split_filename(filename)?;
    if !extension.eq_ignore_ascii_case(DXF_EXTENSION) {
        return Err(FileError::Format(format!(
            "expected a .{DXF_EXTENSION} file, got .{extension}"
        )));
    }

    std::str::from_utf8(bytes)
        .map_err(|e| FileError::Format(format!("content is not valid UTF-8: {e}")))?;

    let drawing = dxf::Drawing::load(&mut Cursor::new(bytes)).map_err(map_dxf_error)?;

    if drawing.header.version < AcadVersion::R2007 {
        return Err(FileError::Format(format!(
            "DXF version {:?} is older than AutoCAD 2007",
            drawing.header.version
        )));
    }

    let unit = Unit::from_insunits(drawing.header.default_drawing_units as i16);
    let mut document = Document::new(base_name, unit);
    document.version = format!("{:?}", drawing.header.version);

    let (model_space, paper_space): (Vec<_>, Vec<_>) = drawing
        .entities()
        .partition(|entity| !entity.common.is_in_paper_space);
    if !paper_space.is_empty() {
        tracing::warn!(count = paper_space.len(), "忽略图纸空间实体");
    }
    for (ordinal, entity) in model_space.into_iter().enumerate() {
        match convert_dxf_entity(entity, ordinal + 1) {
            Some(converted) => document.add_entity(converted),
            None => document.mark_skipped(),
        }
    }

    tracing::info!(
        file = filename,
        version = %document.version,
        unit = %document.unit,
        entities = document.entity_count(),
        skipped = document.skipped_count(),
        "DXF读取完成"
    );

    Ok(document)
}

/// 结构性解析错误为损坏，其余原样透传
fn map_dxf_error(error: dxf::DxfError) -> FileError {
    use dxf::DxfError;
    let passthrough = matches!(
        error,
        DxfError::IoError(_) | DxfError::ImageError(_) | DxfError::WrongItemType
    );
    if passthrough {
        FileError::Load(error.to_string())
    } else {
        FileError::Corruption(error.to_string())
    }
}

fn point(p: &dxf::Point) -> Point3 {
    Point3::new(p.x, p.y, p.z)
}

fn vector(v: &dxf::Vector) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

fn color_code(color: &dxf::Color) -> ColorCode {
    if color.is_by_layer() {
        ColorCode::ByLayer
    } else {
        // ByBlock 等非索引颜色按 0 处理
        ColorCode::Index(color.index().map(i16::from).unwrap_or(0))
    }
}

/// 将DXF实体转换为核心实体
fn convert_dxf_entity(entity: &DxfEntity, ordinal: Ordinal) -> Option<Entity> {
    let geometry = match &entity.specific {
        EntityType::Face3D(face) => Geometry::Face(Face::from_corners([
            point(&face.first_corner),
            point(&face.second_corner),
            point(&face.third_corner),
            point(&face.fourth_corner),
        ])),

        EntityType::Line(line) => Geometry::Line(Line::new(point(&line.p1), point(&line.p2))),

        EntityType::Arc(arc) => Geometry::Arc(
            Arc::new(
                point(&arc.center),
                arc.radius,
                arc.start_angle.to_radians(),
                arc.end_angle.to_radians(),
            )
            .with_normal(vector(&arc.normal)),
        ),

        EntityType::Circle(circle) => Geometry::Circle(
            Circle::new(point(&circle.center), circle.radius).with_normal(vector(&circle.normal)),
        ),

        EntityType::Ellipse(ellipse) => Geometry::Ellipse(
            Ellipse::arc(
                point(&ellipse.center),
                vector(&ellipse.major_axis),
                ellipse.minor_axis_ratio,
                ellipse.start_parameter,
                ellipse.end_parameter,
            )
            .with_normal(vector(&ellipse.normal)),
        ),

        EntityType::LwPolyline(lwpoly) => {
            // 标高记录在组码 38，由公共字段承载
            let elevation = entity.common.elevation;
            let vertices = lwpoly
                .vertices
                .iter()
                .map(|v| PolylineVertex::with_bulge(Point3::new(v.x, v.y, elevation), v.bulge))
                .collect();
            Geometry::Polyline(
                Polyline::new(vertices, lwpoly.is_closed())
                    .with_normal(vector(&lwpoly.extrusion_direction)),
            )
        }

        EntityType::Polyline(poly) => {
            if poly.flags & (POLYGON_MESH | POLYFACE_MESH) != 0 {
                tracing::warn!(ordinal, "跳过多边形网格 POLYLINE");
                return None;
            }
            if poly.flags & POLYLINE_3D != 0 {
                let vertices = poly
                    .vertices()
                    .map(|v| PolylineVertex::new(point(&v.location)))
                    .collect();
                Geometry::Polyline(Polyline::new(vertices, poly.is_closed()))
            } else {
                let elevation = poly.location.z;
                let vertices = poly
                    .vertices()
                    .map(|v| {
                        PolylineVertex::with_bulge(
                            Point3::new(v.location.x, v.location.y, elevation),
                            v.bulge,
                        )
                    })
                    .collect();
                Geometry::Polyline(
                    Polyline::new(vertices, poly.is_closed()).with_normal(vector(&poly.normal)),
                )
            }
        }

        EntityType::ModelPoint(model_point) => {
            let location = &model_point.location;
            Geometry::Point(Point::new(location.x, location.y, location.z))
        }

        _ => return None,
    };

    Some(Entity::new(ordinal, geometry).with_color(color_code(&entity.common.color)))
}
