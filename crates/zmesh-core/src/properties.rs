//! 实体属性定义
//!
//! 颜色号在转换中承载单元属性：板的厚度（颜色号 / 100 即米）
//! 和杆件的截面号。

use serde::{Deserialize, Serialize};

/// AutoCAD 颜色号（ACI）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorCode {
    /// 颜色跟随图层（ByLayer, 256），由调用方提供默认值
    #[default]
    ByLayer,
    /// 显式颜色号（ByBlock 记为 0）
    Index(i16),
}

impl ColorCode {
    /// 解析属性值，ByLayer 时使用 `fallback`
    pub fn attribute_or(&self, fallback: f64) -> f64 {
        match self {
            ColorCode::ByLayer => fallback,
            ColorCode::Index(code) => f64::from(*code),
        }
    }
}
