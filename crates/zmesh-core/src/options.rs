//! 转换参数
//!
//! 所有可调参数都通过这些结构显式传入，核心不依赖任何全局状态。

use crate::math::EPSILON;
use serde::{Deserialize, Serialize};

/// 曲线离散参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TessellationOptions {
    /// 相邻离散点之间的最大圆心角（度）
    pub max_step_angle_deg: f64,
    /// 每条曲线的最少分段数
    pub min_segments: usize,
}

impl TessellationOptions {
    /// 最小允许步长，防止配置为 0 时分段数爆炸
    const MIN_STEP_DEG: f64 = 0.1;

    /// 给定扫掠角（弧度，可为负）所需的分段数
    pub fn segments_for(&self, sweep: f64) -> usize {
        let step = self.max_step_angle_deg.max(Self::MIN_STEP_DEG).to_radians();
        let ratio = sweep.abs() / step;
        let segments = (ratio - EPSILON).ceil().max(0.0) as usize;
        segments.max(self.min_segments).max(1)
    }
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            max_step_angle_deg: 6.0,
            min_segments: 4,
        }
    }
}

/// 网格生成参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// 节点坐标保留的小数位数（去重键）
    pub decimals: u32,
    /// 板单元节点列数，不足时补 0
    pub plate_width: usize,
    /// 颜色号到厚度（米）的除数
    pub thickness_divisor: f64,
    /// 曲线离散参数
    pub tessellation: TessellationOptions,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            decimals: 3,
            plate_width: 5,
            thickness_divisor: 100.0,
            tessellation: TessellationOptions::default(),
        }
    }
}
