//! ZMesh 核心
//!
//! 将 CAD 图元转换为有限元风格的网格描述：节点、杆件和板。
//!
//! # 处理流程
//!
//! - `units`: 按图纸单位确定坐标换算系数
//! - `flatten`: 多段线爆炸、曲线离散（保留源实体序号）
//! - `extract`: 逐顶点提取坐标和属性（颜色号）
//! - `mesh`: 节点去重，按序号分组生成杆件和板
//!
//! # 示例
//!
//! ```rust
//! use zmesh_core::prelude::*;
//!
//! let line = Line::new(Point3::origin(), Point3::new(1000.0, 0.0, 0.0));
//! let entities = vec![Entity::new(1, Geometry::Line(line))];
//!
//! let options = MeshOptions::default();
//! let flat = flatten(&entities, &options.tessellation);
//! let extraction = extract(&flat, Unit::Millimeter.scale_factor(), 5.0);
//! let mesh = MeshBuilder::new(options).build(&extraction).unwrap();
//!
//! assert_eq!(mesh.nodes.len(), 2);
//! assert_eq!(mesh.bars.len(), 1);
//! ```

pub mod entity;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod options;
pub mod properties;
pub mod transform;
pub mod units;

pub use error::MeshError;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::entity::{Entity, Ordinal};
    pub use crate::error::MeshError;
    pub use crate::extract::{extract, ElementKind, Extraction, RawElement};
    pub use crate::flatten::{flatten, FlatEntity, Primitive};
    pub use crate::geometry::{
        Arc, Circle, Ellipse, Face, Geometry, Line, Point, Polyline, PolylineVertex,
    };
    pub use crate::math::{Point3, Vector3};
    pub use crate::mesh::{Bar, Mesh, MeshBuilder, NodeId, NodeTable, Plate};
    pub use crate::options::{MeshOptions, TessellationOptions};
    pub use crate::properties::ColorCode;
    pub use crate::units::Unit;
}
