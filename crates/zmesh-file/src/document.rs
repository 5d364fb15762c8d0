//! 读取后的 CAD 文档

use zmesh_core::entity::Entity;
use zmesh_core::units::Unit;

/// CAD文档（只读，单次转换内有效）
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// 输出文件的基础名（空格已替换为下划线）
    pub base_name: String,

    /// 图纸单位
    pub unit: Unit,

    /// DXF 版本
    pub version: String,

    /// 模型空间实体，按文档顺序
    entities: Vec<Entity>,

    /// 跳过的不支持实体数
    skipped: usize,
}

impl Document {
    /// 创建新文档
    pub fn new(base_name: impl Into<String>, unit: Unit) -> Self {
        Self {
            base_name: base_name.into(),
            unit,
            ..Default::default()
        }
    }

    /// 添加实体
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// 记录一个跳过的实体
    pub(crate) fn mark_skipped(&mut self) {
        self.skipped += 1;
    }

    /// 获取所有实体
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// 获取实体数量
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// 跳过的实体数量
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// 坐标换算系数
    pub fn scale_factor(&self) -> f64 {
        self.unit.scale_factor()
    }
}
