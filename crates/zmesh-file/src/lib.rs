//! ZMesh 文件处理
//!
//! 支持：
//! - `.dxf` 读取（2007 及以上版本，UTF-8）
//! - 节点/杆件/板表格导出（单个文本文件或 zip）

pub mod convert;
pub mod document;
pub mod dxf_io;
pub mod error;
pub mod export;

pub use convert::{convert, ConversionRequest, ConvertOptions};
pub use document::Document;
pub use error::FileError;
pub use export::{OutputFile, OutputMode};
