//! 源实体
//!
//! 每个实体在读取时按文档顺序获得一个从 1 开始的序号（ordinal）。
//! 多段线爆炸、曲线离散产生的所有图元都沿用源实体的序号，
//! 因此序号必须在爆炸之前分配。

use crate::geometry::Geometry;
use crate::properties::ColorCode;
use serde::{Deserialize, Serialize};

/// 源实体序号（从 1 开始）
pub type Ordinal = usize;

/// CAD实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// 文档中的序号
    pub ordinal: Ordinal,

    /// 几何类型和数据（文档单位）
    pub geometry: Geometry,

    /// 颜色号
    pub color: ColorCode,
}

impl Entity {
    /// 创建新实体
    pub fn new(ordinal: Ordinal, geometry: Geometry) -> Self {
        Self {
            ordinal,
            geometry,
            color: ColorCode::ByLayer,
        }
    }

    /// 使用指定的颜色
    pub fn with_color(mut self, color: ColorCode) -> Self {
        self.color = color;
        self
    }
}
