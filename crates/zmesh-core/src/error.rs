//! 网格生成错误定义

use crate::entity::Ordinal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("no convertible geometry found")]
    EmptyGeometry,

    #[error("face #{ordinal} has {count} vertices, at most {max} are supported")]
    PlateTooLarge {
        ordinal: Ordinal,
        count: usize,
        max: usize,
    },
}
