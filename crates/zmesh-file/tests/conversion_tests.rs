//! DXF → 节点/杆件/板 转换集成测试
//!
//! 用 `dxf` crate 构建图纸，保存到内存后走完整转换流程。

use dxf::entities::{
    Arc, Circle, Ellipse, Entity, EntityType, Face3D, Line, LwPolyline, ModelPoint, Polyline, Text,
    Vertex,
};
use dxf::enums::{AcadVersion, Units};
use dxf::{Color, Drawing, LwPolylineVertex, Point, Vector};
use std::io::{Cursor, Read};
use zmesh_core::geometry::Geometry;
use zmesh_file::convert::Conversion;
use zmesh_file::{convert, dxf_io, ConversionRequest, ConvertOptions, FileError, OutputMode};

fn drawing(units: Units) -> Drawing {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2010;
    drawing.header.default_drawing_units = units;
    drawing
}

fn save(drawing: &Drawing) -> Vec<u8> {
    let mut buffer = Vec::new();
    drawing.save(&mut buffer).expect("save drawing");
    buffer
}

fn line(p1: (f64, f64, f64), p2: (f64, f64, f64)) -> Entity {
    let mut line = Line::default();
    line.p1 = Point::new(p1.0, p1.1, p1.2);
    line.p2 = Point::new(p2.0, p2.1, p2.2);
    Entity::new(EntityType::Line(line))
}

fn triangle() -> Entity {
    let mut face = Face3D::default();
    face.first_corner = Point::new(0.0, 0.0, 0.0);
    face.second_corner = Point::new(1.0, 0.0, 0.0);
    face.third_corner = Point::new(0.0, 1.0, 0.0);
    face.fourth_corner = Point::new(0.0, 1.0, 0.0);
    Entity::new(EntityType::Face3D(face))
}

fn text() -> Entity {
    let mut text = Text::default();
    text.value = "label".to_string();
    Entity::new(EntityType::Text(text))
}

/// 顶点为 (x, y, bulge)
fn lw_polyline(vertices: &[(f64, f64, f64)]) -> LwPolyline {
    let mut polyline = LwPolyline::default();
    for &(x, y, bulge) in vertices {
        let mut vertex = LwPolylineVertex::default();
        vertex.x = x;
        vertex.y = y;
        vertex.bulge = bulge;
        polyline.vertices.push(vertex);
    }
    polyline
}

/// 重型 POLYLINE，顶点为 (x, y, z, bulge)
fn heavy_polyline(drawing: &mut Drawing, flags: i32, vertices: &[(f64, f64, f64, f64)]) -> Entity {
    let mut polyline = Polyline::default();
    polyline.flags = flags;
    for &(x, y, z, bulge) in vertices {
        let mut vertex = Vertex::new(Point::new(x, y, z));
        vertex.bulge = bulge;
        polyline.add_vertex(drawing, vertex);
    }
    Entity::new(EntityType::Polyline(polyline))
}

fn run(bytes: &[u8], filename: &str, mode: OutputMode) -> Result<Conversion, FileError> {
    let request = ConversionRequest {
        filename,
        bytes,
        default_thickness: 5.0,
        mode,
    };
    convert(&request, &ConvertOptions::default())
}

fn run_text(drawing: &Drawing) -> String {
    let conversion = run(&save(drawing), "model.dxf", OutputMode::Single).expect("conversion");
    assert_eq!(conversion.output.name, "model.txt");
    String::from_utf8(conversion.output.bytes).expect("utf-8 output")
}

#[test]
fn test_millimeter_line_is_scaled_to_meters() {
    let mut drawing = drawing(Units::Millimeters);
    drawing.add_entity(line((0.0, 0.0, 0.0), (1000.0, 0.0, 0.0)));

    let text = run_text(&drawing);
    assert_eq!(
        text,
        "Wezly\r\n1 0,0 0,0 0,0\r\n2 1,0 0,0 0,0\r\nPrety\r\n1 1 2 0 0 0 0\r\n"
    );
}

#[test]
fn test_centimeter_scale() {
    let mut drawing = drawing(Units::Centimeters);
    drawing.add_entity(line((0.0, 0.0, 0.0), (0.0, 250.0, 0.0)));

    let text = run_text(&drawing);
    assert!(text.contains("2 0,0 2,5 0,0\r\n"), "{text}");
}

#[test]
fn test_triangle_face_uses_default_thickness() {
    let mut drawing = drawing(Units::Unitless);
    drawing.add_entity(triangle());

    let text = run_text(&drawing);
    assert_eq!(
        text,
        "Wezly\r\n\
         1 0,0 0,0 0,0\r\n\
         2 1,0 0,0 0,0\r\n\
         3 0,0 1,0 0,0\r\n\
         Plaskie\r\n\
         1 1 2 3 0 0 0,05\r\n"
    );
}

#[test]
fn test_face_color_overrides_thickness() {
    let mut drawing = drawing(Units::Unitless);
    let mut face = triangle();
    face.common.color = Color::from_index(20);
    drawing.add_entity(face);

    let text = run_text(&drawing);
    assert!(text.ends_with("Plaskie\r\n1 1 2 3 0 0 0,2\r\n"), "{text}");
}

#[test]
fn test_polyline_chain_ordering() {
    let mut drawing = drawing(Units::Unitless);
    // 不支持的实体也占用序号，不影响分组
    drawing.add_entity(text());

    let polyline = lw_polyline(&[
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (2.0, 1.0, 0.0),
    ]);
    let mut entity = Entity::new(EntityType::LwPolyline(polyline));
    entity.common.color = Color::from_index(3);
    drawing.add_entity(entity);

    let text = run_text(&drawing);
    assert!(
        text.ends_with("Prety\r\n1 1 2 0 0 0 3\r\n2 2 3 0 0 0 3\r\n3 3 4 0 0 0 3\r\n"),
        "{text}"
    );
}

#[test]
fn test_identical_entities_share_nodes() {
    let mut drawing = drawing(Units::Unitless);
    drawing.add_entity(line((0.0, 0.0, 0.0), (2.0, 0.0, 0.0)));
    drawing.add_entity(line((0.0, 0.0, 0.0), (2.0, 0.0, 0.0)));
    drawing.add_entity(line((2.0, 0.0, 0.0), (2.0, 3.0, 0.0)));

    let conversion = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap();
    assert_eq!(conversion.nodes, 3);
    assert_eq!(conversion.bars, 3);
    assert_eq!(conversion.plates, 0);
}

#[test]
fn test_distinct_coordinates_round_trip() {
    let mut drawing = drawing(Units::Unitless);
    drawing.add_entity(line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));
    drawing.add_entity(line((5.0, 5.0, 5.0), (6.0, 5.0, 5.0)));
    let mut point = ModelPoint::default();
    point.location = Point::new(9.0, 9.0, 9.0);
    drawing.add_entity(Entity::new(EntityType::ModelPoint(point)));

    let conversion = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap();
    assert_eq!(conversion.nodes, 5);
    assert_eq!(conversion.bars, 2);

    let text = String::from_utf8(conversion.output.bytes).unwrap();
    assert!(text.contains("5 9,0 9,0 9,0\r\n"), "{text}");
}

#[test]
fn test_circle_becomes_closed_bar_loop() {
    let mut drawing = drawing(Units::Unitless);
    let mut circle = Circle::default();
    circle.center = Point::new(0.0, 0.0, 0.0);
    circle.radius = 1.0;
    let mut entity = Entity::new(EntityType::Circle(circle));
    entity.common.color = Color::from_index(12);
    drawing.add_entity(entity);

    let conversion = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap();
    // 默认 6° 步长：60 个节点，60 根杆件首尾相连
    assert_eq!(conversion.nodes, 60);
    assert_eq!(conversion.bars, 60);
    let text = String::from_utf8(conversion.output.bytes).unwrap();
    assert!(text.contains("60 60 1 0 0 0 12\r\n"), "{text}");
}

#[test]
fn test_paper_space_entities_are_ignored() {
    let mut drawing = drawing(Units::Unitless);
    drawing.add_entity(line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));
    let mut paper = line((7.0, 7.0, 0.0), (8.0, 7.0, 0.0));
    paper.common.is_in_paper_space = true;
    drawing.add_entity(paper);

    let conversion = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap();
    assert_eq!(conversion.nodes, 2);
}

#[test]
fn test_unsupported_entities_only() {
    let mut drawing = drawing(Units::Unitless);
    drawing.add_entity(text());

    let err = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap_err();
    assert!(matches!(err, FileError::EmptyGeometry), "{err:?}");
}

#[test]
fn test_wrong_extension_is_rejected() {
    let mut drawing = drawing(Units::Unitless);
    drawing.add_entity(line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));

    let err = run(&save(&drawing), "model.txt", OutputMode::Single).unwrap_err();
    assert!(matches!(err, FileError::Format(_)), "{err:?}");
}

#[test]
fn test_non_utf8_is_rejected() {
    let mut bytes = save(&drawing(Units::Unitless));
    bytes.extend_from_slice(&[0xc3, 0x28]);

    let err = run(&bytes, "model.dxf", OutputMode::Single).unwrap_err();
    assert!(matches!(err, FileError::Format(_)), "{err:?}");
}

#[test]
fn test_pre_2007_version_is_rejected() {
    let mut drawing = drawing(Units::Unitless);
    drawing.header.version = AcadVersion::R2000;
    drawing.add_entity(line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));

    let err = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap_err();
    assert!(matches!(err, FileError::Format(_)), "{err:?}");
}

#[test]
fn test_archive_output() {
    let mut drawing = drawing(Units::Millimeters);
    drawing.add_entity(line((0.0, 0.0, 0.0), (1000.0, 0.0, 0.0)));
    drawing.add_entity(triangle());

    let conversion = run(&save(&drawing), "my model.DXF", OutputMode::Archive).unwrap();
    assert_eq!(conversion.output.name, "my_model.zip");

    let mut archive = zip::ZipArchive::new(Cursor::new(conversion.output.bytes)).unwrap();
    assert_eq!(archive.len(), 3);

    let mut nodes = String::new();
    archive
        .by_name("Wezly-my_model.txt")
        .unwrap()
        .read_to_string(&mut nodes)
        .unwrap();
    assert!(nodes.starts_with("Wezly\r\n1 0,0 0,0 0,0\r\n2 1,0 0,0 0,0\r\n"));

    let mut plates = String::new();
    archive
        .by_name("Plaskie-my_model.txt")
        .unwrap()
        .read_to_string(&mut plates)
        .unwrap();
    // 三角形 (0,0,0)(1,0,0)(0,1,0) 按毫米缩放后为 (0,0,0)(0.001,0,0)(0,0.001,0)
    assert_eq!(plates, "Plaskie\r\n1 1 3 4 0 0 0,05\r\n");
}

#[test]
fn test_lwpolyline_elevation() {
    let mut drawing = drawing(Units::Unitless);
    let mut entity = Entity::new(EntityType::LwPolyline(lw_polyline(&[
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
    ])));
    entity.common.elevation = 2.0;
    drawing.add_entity(entity);

    let text = run_text(&drawing);
    assert_eq!(
        text,
        "Wezly\r\n1 0,0 0,0 2,0\r\n2 1,0 0,0 2,0\r\nPrety\r\n1 1 2 0 0 0 0\r\n"
    );
}

#[test]
fn test_lwpolyline_bulge_becomes_arc() {
    let mut drawing = drawing(Units::Unitless);
    // 凸度 1：(0,0) 到 (2,0) 的逆时针半圆，经过 (1,-1)
    drawing.add_entity(Entity::new(EntityType::LwPolyline(lw_polyline(&[
        (0.0, 0.0, 1.0),
        (2.0, 0.0, 0.0),
    ]))));

    let conversion = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap();
    assert_eq!(conversion.nodes, 31);
    assert_eq!(conversion.bars, 30);
    let text = String::from_utf8(conversion.output.bytes).unwrap();
    assert!(text.starts_with("Wezly\r\n1 0,0 0,0 0,0\r\n"), "{text}");
    assert!(text.contains("16 1,0 -1,0 0,0\r\n"), "{text}");
    assert!(text.contains("31 2,0 0,0 0,0\r\n"), "{text}");
}

#[test]
fn test_arc_angles_are_degrees() {
    let mut drawing = drawing(Units::Unitless);
    drawing.add_entity(Entity::new(EntityType::Arc(Arc::new(
        Point::new(0.0, 0.0, 0.0),
        1.0,
        0.0,
        90.0,
    ))));

    let conversion = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap();
    // 90° 扫掠，6° 步长：15 段
    assert_eq!(conversion.nodes, 16);
    assert_eq!(conversion.bars, 15);
    let text = String::from_utf8(conversion.output.bytes).unwrap();
    assert!(text.starts_with("Wezly\r\n1 1,0 0,0 0,0\r\n"), "{text}");
    assert!(text.contains("16 0,0 1,0 0,0\r\n"), "{text}");
}

#[test]
fn test_full_ellipse() {
    let mut drawing = drawing(Units::Unitless);
    let mut ellipse = Ellipse::default();
    ellipse.center = Point::new(0.0, 0.0, 0.0);
    ellipse.major_axis = Vector::new(2.0, 0.0, 0.0);
    ellipse.minor_axis_ratio = 0.5;
    let mut entity = Entity::new(EntityType::Ellipse(ellipse));
    entity.common.color = Color::from_index(7);
    drawing.add_entity(entity);

    let conversion = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap();
    assert_eq!(conversion.nodes, 60);
    assert_eq!(conversion.bars, 60);
    let text = String::from_utf8(conversion.output.bytes).unwrap();
    assert!(text.contains("16 0,0 1,0 0,0\r\n"), "{text}");
    assert!(text.contains("31 -2,0 0,0 0,0\r\n"), "{text}");
    assert!(text.contains("60 60 1 0 0 0 7\r\n"), "{text}");
}

#[test]
fn test_heavy_2d_polyline_uses_elevation_and_bulge() {
    let mut drawing = drawing(Units::Unitless);
    let mut entity = heavy_polyline(
        &mut drawing,
        0,
        &[(0.0, 0.0, 0.0, 1.0), (2.0, 0.0, 0.0, 0.0)],
    );
    if let EntityType::Polyline(polyline) = &mut entity.specific {
        polyline.location = Point::new(0.0, 0.0, 3.0);
    }
    drawing.add_entity(entity);

    let conversion = run(&save(&drawing), "model.dxf", OutputMode::Single).unwrap();
    assert_eq!(conversion.nodes, 31);
    assert_eq!(conversion.bars, 30);
    let text = String::from_utf8(conversion.output.bytes).unwrap();
    assert!(text.starts_with("Wezly\r\n1 0,0 0,0 3,0\r\n"), "{text}");
    assert!(text.contains("16 1,0 -1,0 3,0\r\n"), "{text}");
}

#[test]
fn test_heavy_3d_polyline() {
    let mut drawing = drawing(Units::Unitless);
    let entity = heavy_polyline(
        &mut drawing,
        8,
        &[(0.0, 0.0, 0.0, 0.0), (1.0, 0.0, 1.0, 0.0), (1.0, 1.0, 2.0, 0.0)],
    );
    drawing.add_entity(entity);

    let text = run_text(&drawing);
    assert_eq!(
        text,
        "Wezly\r\n\
         1 0,0 0,0 0,0\r\n\
         2 1,0 0,0 1,0\r\n\
         3 1,0 1,0 2,0\r\n\
         Prety\r\n\
         1 1 2 0 0 0 0\r\n\
         2 2 3 0 0 0 0\r\n"
    );
}

#[test]
fn test_mesh_polylines_are_skipped_but_numbered() {
    let mut drawing = drawing(Units::Unitless);
    let square = [
        (5.0, 5.0, 0.0, 0.0),
        (6.0, 5.0, 0.0, 0.0),
        (6.0, 6.0, 0.0, 0.0),
        (5.0, 6.0, 0.0, 0.0),
    ];
    let polyface = heavy_polyline(&mut drawing, 64, &square);
    drawing.add_entity(polyface);
    let polygon_mesh = heavy_polyline(&mut drawing, 16, &square);
    drawing.add_entity(polygon_mesh);
    drawing.add_entity(line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));

    let bytes = save(&drawing);
    let document = dxf_io::load(&bytes, "model.dxf").unwrap();
    assert_eq!(document.skipped_count(), 2);
    let entities = document.entities();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].ordinal, 3);
    assert!(matches!(entities[0].geometry, Geometry::Line(_)));

    let conversion = run(&bytes, "model.dxf", OutputMode::Single).unwrap();
    assert_eq!(conversion.nodes, 2);
    assert_eq!(conversion.bars, 1);
}

#[test]
fn test_zero_length_line_keeps_its_bar() {
    let mut drawing = drawing(Units::Unitless);
    drawing.add_entity(line((1.0, 1.0, 0.0), (1.0001, 1.0, 0.0)));

    let text = run_text(&drawing);
    assert_eq!(text, "Wezly\r\n1 1,0 1,0 0,0\r\nPrety\r\n1 1 1 0 0 0 0\r\n");
}
