//! 单位系统
//!
//! 根据 DXF 头部的 `$INSUNITS` 选择长度换算系数，输出统一为米。
//! 只区分毫米和厘米，其余单位（包括无单位）按已经是米处理，
//! 这是与现有分析软件约定一致的近似。

use serde::{Deserialize, Serialize};

/// 绘图单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Unit {
    /// 毫米
    Millimeter,
    /// 厘米
    Centimeter,
    /// 其他单位（含无单位），不做换算
    #[default]
    Unscaled,
}

impl Unit {
    /// 从 `$INSUNITS` 代码解析
    pub fn from_insunits(code: i16) -> Self {
        match code {
            4 => Unit::Millimeter,
            5 => Unit::Centimeter,
            _ => Unit::Unscaled,
        }
    }

    /// 坐标换算系数
    pub fn scale_factor(&self) -> f64 {
        match self {
            Unit::Millimeter => 1e-3,
            Unit::Centimeter => 1e-2,
            Unit::Unscaled => 1.0,
        }
    }

    /// 获取单位符号
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Unscaled => "",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Unscaled => write!(f, "unscaled"),
            other => write!(f, "{}", other.symbol()),
        }
    }
}
