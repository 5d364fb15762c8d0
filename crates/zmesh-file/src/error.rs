//! 文件操作错误定义

use thiserror::Error;
use zmesh_core::MeshError;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 扩展名错误、非 UTF-8 内容或 2007 之前的版本
    #[error("Invalid file format: {0}")]
    Format(String),

    /// 结构损坏的 DXF
    #[error("Corruption detected: {0}")]
    Corruption(String),

    #[error("No convertible geometry found")]
    EmptyGeometry,

    /// 其他读取错误，原样保留诊断信息
    #[error("{0}")]
    Load(String),

    #[error("Input too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("Mesh error: {0}")]
    Mesh(MeshError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl From<MeshError> for FileError {
    fn from(error: MeshError) -> Self {
        match error {
            MeshError::EmptyGeometry => FileError::EmptyGeometry,
            other => FileError::Mesh(other),
        }
    }
}

impl FileError {
    /// 面向最终用户的提示（与原网页服务的提示一致）
    pub fn user_message(&self) -> String {
        match self {
            FileError::Format(_) => "Wybierz plik w formacie DXF minimum 2007.".to_string(),
            FileError::Corruption(_) => "Niepoprawny lub zepsuty plik.".to_string(),
            FileError::EmptyGeometry => "Nieprawidłowa geometria.".to_string(),
            FileError::TooLarge { limit, .. } => {
                format!("Plik jest za duży (maksymalnie {} MB).", limit / (1024 * 1024))
            }
            other => other.to_string(),
        }
    }
}
