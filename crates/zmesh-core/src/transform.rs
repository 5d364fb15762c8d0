//! 对象坐标系（OCS）变换
//!
//! DXF 中圆、圆弧和二维多段线的坐标保存在由拉伸方向（法向量）定义的
//! 对象坐标系中，这里使用 DXF 的任意轴算法将其转换到世界坐标系（WCS）。

use crate::math::{Matrix3, Point3, Vector3, EPSILON};
use serde::{Deserialize, Serialize};

/// 任意轴算法的阈值
const ARBITRARY_AXIS_LIMIT: f64 = 1.0 / 64.0;

/// 对象坐标系
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ocs {
    /// 列向量依次为 OCS 的 X、Y、Z 轴（世界坐标）
    basis: Matrix3,
    identity: bool,
}

impl Ocs {
    /// 与世界坐标系重合的 OCS
    pub fn world() -> Self {
        Self {
            basis: Matrix3::identity(),
            identity: true,
        }
    }

    /// 由拉伸方向创建 OCS
    ///
    /// 零长度法向量按 (0, 0, 1) 处理。
    pub fn from_normal(normal: Vector3) -> Self {
        let length = normal.norm();
        if length < EPSILON {
            return Self::world();
        }
        let az = normal / length;
        if (az - Vector3::z()).norm() < EPSILON {
            return Self::world();
        }

        let ax = if az.x.abs() < ARBITRARY_AXIS_LIMIT && az.y.abs() < ARBITRARY_AXIS_LIMIT {
            Vector3::y().cross(&az)
        } else {
            Vector3::z().cross(&az)
        }
        .normalize();
        let ay = az.cross(&ax).normalize();

        Self {
            basis: Matrix3::from_columns(&[ax, ay, az]),
            identity: false,
        }
    }

    /// OCS 坐标转换为 WCS 坐标
    pub fn to_wcs(&self, point: &Point3) -> Point3 {
        if self.identity {
            return *point;
        }
        Point3::from(self.basis * point.coords)
    }
}

impl Default for Ocs {
    fn default() -> Self {
        Self::world()
    }
}
