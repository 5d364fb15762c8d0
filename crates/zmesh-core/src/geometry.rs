//! 几何图元定义
//!
//! 支持的基本图元：
//! - 三维面 (Face)
//! - 线段 (Line)
//! - 圆弧 (Arc)
//! - 圆 (Circle)
//! - 椭圆 (Ellipse)
//! - 多段线 (Polyline)
//! - 点 (Point)
//!
//! 圆、圆弧和二维多段线的坐标位于 OCS 中，离散时转换为 WCS。

use crate::math::{Point3, Vector3, EPSILON};
use crate::options::TessellationOptions;
use crate::transform::Ocs;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// 几何类型枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Face(Face),
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline(Polyline),
    Point(Point),
}

/// 三维面（3 或 4 个顶点）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub vertices: Vec<Point3>,
}

impl Face {
    /// 由 DXF 的四个角点创建，第三、四角点重合时为三角形
    pub fn from_corners(corners: [Point3; 4]) -> Self {
        let [a, b, c, d] = corners;
        let mut vertices = vec![a, b, c];
        if (d - c).norm() > EPSILON {
            vertices.push(d);
        }
        Self { vertices }
    }
}

/// 点
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub position: Point3,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// 线段
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }
}

/// 圆
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Circle {
    /// 圆心（OCS）
    pub center: Point3,
    pub radius: f64,
    /// 拉伸方向
    pub normal: Vector3,
}

impl Circle {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius,
            normal: Vector3::z(),
        }
    }

    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = normal;
        self
    }

    /// 离散为闭合点列（首尾重合），WCS 坐标
    pub fn sample_points(&self, options: &TessellationOptions) -> Vec<Point3> {
        let segments = options.segments_for(TAU);
        let ocs = Ocs::from_normal(self.normal);
        sample_circular(&self.center, self.radius, 0.0, TAU, segments)
            .iter()
            .map(|p| ocs.to_wcs(p))
            .collect()
    }
}

/// 圆弧（逆时针，从起始角到终止角）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arc {
    /// 圆心（OCS）
    pub center: Point3,
    pub radius: f64,
    /// 起始角度（弧度）
    pub start_angle: f64,
    /// 终止角度（弧度）
    pub end_angle: f64,
    /// 拉伸方向
    pub normal: Vector3,
}

impl Arc {
    pub fn new(center: Point3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            normal: Vector3::z(),
        }
    }

    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = normal;
        self
    }

    /// 获取扫掠角度，起止角重合时视为整圆
    pub fn sweep_angle(&self) -> f64 {
        let sweep = (self.end_angle - self.start_angle).rem_euclid(TAU);
        if sweep < EPSILON {
            TAU
        } else {
            sweep
        }
    }

    /// 离散为点列，WCS 坐标
    pub fn sample_points(&self, options: &TessellationOptions) -> Vec<Point3> {
        let sweep = self.sweep_angle();
        let ocs = Ocs::from_normal(self.normal);
        sample_circular(
            &self.center,
            self.radius,
            self.start_angle,
            sweep,
            options.segments_for(sweep),
        )
        .iter()
        .map(|p| ocs.to_wcs(p))
        .collect()
    }
}

/// 在 OCS 平面内采样圆弧，`sweep` 为负时顺时针
fn sample_circular(
    center: &Point3,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    segments: usize,
) -> Vec<Point3> {
    (0..=segments)
        .map(|i| {
            let angle = start_angle + sweep * (i as f64) / (segments as f64);
            Point3::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
                center.z,
            )
        })
        .collect()
}

// ========== 椭圆 (Ellipse) ==========

/// 椭圆
///
/// 使用 DXF 兼容的参数化方式，中心和长轴均为 WCS：
/// - 中心点 + 长轴端点（相对向量）+ 短轴比例
/// - 起始/终止参数用于椭圆弧
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ellipse {
    /// 中心点
    pub center: Point3,
    /// 长轴端点（相对于中心的向量）
    pub major_axis: Vector3,
    /// 拉伸方向
    pub normal: Vector3,
    /// 短轴与长轴的比例 (0.0 < ratio <= 1.0)
    pub ratio: f64,
    /// 起始参数（弧度，0.0 表示长轴正方向）
    pub start_param: f64,
    /// 终止参数（弧度，2π 表示完整椭圆）
    pub end_param: f64,
}

impl Ellipse {
    /// 创建椭圆弧
    pub fn arc(
        center: Point3,
        major_axis: Vector3,
        ratio: f64,
        start_param: f64,
        end_param: f64,
    ) -> Self {
        Self {
            center,
            major_axis,
            normal: Vector3::z(),
            ratio: ratio.clamp(EPSILON, 1.0),
            start_param,
            end_param,
        }
    }

    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = normal;
        self
    }

    /// 短轴端点向量（WCS）
    pub fn minor_axis(&self) -> Vector3 {
        let normal = if self.normal.norm() < EPSILON {
            Vector3::z()
        } else {
            self.normal.normalize()
        };
        normal.cross(&self.major_axis) * self.ratio
    }

    /// 参数跨度，(0, 2π]
    pub fn param_span(&self) -> f64 {
        let span = (self.end_param - self.start_param).rem_euclid(TAU);
        if span < EPSILON {
            TAU
        } else {
            span
        }
    }

    /// 获取椭圆上指定参数的点
    ///
    /// 参数 t 是椭圆的参数化角度，不是真正的几何角度
    pub fn point_at_param(&self, t: f64) -> Point3 {
        self.center + self.major_axis * t.cos() + self.minor_axis() * t.sin()
    }

    /// 离散为点列
    pub fn sample_points(&self, options: &TessellationOptions) -> Vec<Point3> {
        let span = self.param_span();
        let segments = options.segments_for(span);
        (0..=segments)
            .map(|i| self.point_at_param(self.start_param + span * (i as f64) / (segments as f64)))
            .collect()
    }
}

// ========== 多段线 (Polyline) ==========

/// 多段线顶点
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PolylineVertex {
    pub point: Point3,
    /// 凸度（0 表示直线段）
    pub bulge: f64,
}

impl PolylineVertex {
    pub fn new(point: Point3) -> Self {
        Self { point, bulge: 0.0 }
    }

    pub fn with_bulge(point: Point3, bulge: f64) -> Self {
        Self { point, bulge }
    }
}

/// 多段线
///
/// 二维多段线的顶点位于 OCS（z 为标高），三维多段线的 `normal` 为 Z 轴。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<PolylineVertex>,
    pub closed: bool,
    pub normal: Vector3,
}

impl Polyline {
    pub fn new(vertices: Vec<PolylineVertex>, closed: bool) -> Self {
        Self {
            vertices,
            closed,
            normal: Vector3::z(),
        }
    }

    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = normal;
        self
    }

    /// 获取段数
    pub fn segment_count(&self) -> usize {
        if self.vertices.len() < 2 {
            0
        } else if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// 爆炸为独立的线段/圆弧（OCS 坐标，保持顶点顺序）
    pub fn explode(&self) -> Vec<PolylineSegment> {
        let mut result = Vec::with_capacity(self.segment_count());

        for i in 0..self.segment_count() {
            let v1 = &self.vertices[i];
            let v2 = &self.vertices[(i + 1) % self.vertices.len()];

            let segment = if v1.bulge.abs() < EPSILON {
                None
            } else {
                BulgeArc::from_vertices(v1, v2).map(PolylineSegment::Arc)
            };
            // 弦长为零的凸度段回退到直线
            result.push(
                segment.unwrap_or_else(|| PolylineSegment::Line(Line::new(v1.point, v2.point))),
            );
        }

        result
    }

    /// 离散为连续点列（WCS），相邻段的公共顶点只出现一次
    pub fn sample_points(&self, options: &TessellationOptions) -> Vec<Point3> {
        let ocs = Ocs::from_normal(self.normal);
        let segments = self.explode();
        if segments.is_empty() {
            return self.vertices.iter().map(|v| ocs.to_wcs(&v.point)).collect();
        }

        let mut points: Vec<Point3> = Vec::new();
        for segment in &segments {
            let part = match segment {
                PolylineSegment::Line(line) => vec![line.start, line.end],
                PolylineSegment::Arc(arc) => arc.sample_points(options),
            };
            let skip = usize::from(!points.is_empty());
            points.extend(part.into_iter().skip(skip));
        }
        points.iter().map(|p| ocs.to_wcs(p)).collect()
    }
}

/// 多段线分解后的单段
#[derive(Debug, Clone, Copy)]
pub enum PolylineSegment {
    Line(Line),
    Arc(BulgeArc),
}

/// 由凸度定义的圆弧段（OCS），`sweep` 带符号，正值为逆时针
#[derive(Debug, Clone, Copy)]
pub struct BulgeArc {
    pub start: Point3,
    pub end: Point3,
    pub center: Point3,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl BulgeArc {
    /// 将顶点对转换为圆弧
    fn from_vertices(v1: &PolylineVertex, v2: &PolylineVertex) -> Option<Self> {
        let chord = v2.point - v1.point;
        let chord_len = (chord.x * chord.x + chord.y * chord.y).sqrt();

        if chord_len < EPSILON {
            return None;
        }

        let bulge = v1.bulge;
        let s = chord_len / 2.0;
        let h = s * bulge; // 弧高

        let radius = (s * s + h * h) / (2.0 * h.abs());
        let d = radius - h.abs(); // 圆心到弦的距离

        // 弦的垂直方向
        let perp = if bulge > 0.0 {
            Vector3::new(-chord.y, chord.x, 0.0) / chord_len
        } else {
            Vector3::new(chord.y, -chord.x, 0.0) / chord_len
        };

        let mid = Point3::new(
            (v1.point.x + v2.point.x) / 2.0,
            (v1.point.y + v2.point.y) / 2.0,
            v1.point.z,
        );
        let center = mid + perp * d;
        let start_angle = (v1.point.y - center.y).atan2(v1.point.x - center.x);

        Some(Self {
            start: v1.point,
            end: Point3::new(v2.point.x, v2.point.y, v1.point.z),
            center,
            radius,
            start_angle,
            sweep: 4.0 * bulge.atan(),
        })
    }

    /// 离散为点列（OCS），首尾点精确取顶点
    pub fn sample_points(&self, options: &TessellationOptions) -> Vec<Point3> {
        let mut points = sample_circular(
            &self.center,
            self.radius,
            self.start_angle,
            self.sweep,
            options.segments_for(self.sweep),
        );
        if let Some(first) = points.first_mut() {
            *first = self.start;
        }
        if let Some(last) = points.last_mut() {
            *last = self.end;
        }
        points
    }
}
