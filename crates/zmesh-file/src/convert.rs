//! 一次完整的转换
//!
//! 读取 → 单位换算 → 展平 → 提取 → 构建网格 → 导出。
//! 要么三张表全部生成，要么整体失败，不返回部分结果。

use crate::document::Document;
use crate::dxf_io;
use crate::error::FileError;
use crate::export::{self, OutputFile, OutputMode};
use serde::{Deserialize, Serialize};
use zmesh_core::extract::extract;
use zmesh_core::flatten::flatten;
use zmesh_core::mesh::{Mesh, MeshBuilder};
use zmesh_core::options::MeshOptions;

/// 默认输入大小上限（16 MiB）
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// 转换参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// 输入大小上限（字节）
    pub max_input_bytes: usize,
    /// 网格参数
    pub mesh: MeshOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            mesh: MeshOptions::default(),
        }
    }
}

/// 调用方提交的转换请求
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    /// 原始文件名
    pub filename: &'a str,
    /// 文件内容
    pub bytes: &'a [u8],
    /// 面颜色为 ByLayer 时使用的厚度（颜色号单位）
    pub default_thickness: f64,
    pub mode: OutputMode,
}

/// 转换结果
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: OutputFile,
    pub nodes: usize,
    pub bars: usize,
    pub plates: usize,
}

/// 由已读取的文档构建网格
pub fn build_mesh(
    document: &Document,
    default_thickness: f64,
    options: &MeshOptions,
) -> Result<Mesh, FileError> {
    let flat = flatten(document.entities(), &options.tessellation);
    let extraction = extract(&flat, document.scale_factor(), default_thickness);
    let mesh = MeshBuilder::new(*options).build(&extraction)?;
    Ok(mesh)
}

/// 执行转换
pub fn convert(
    request: &ConversionRequest<'_>,
    options: &ConvertOptions,
) -> Result<Conversion, FileError> {
    if request.bytes.len() > options.max_input_bytes {
        return Err(FileError::TooLarge {
            size: request.bytes.len(),
            limit: options.max_input_bytes,
        });
    }

    let document = dxf_io::load(request.bytes, request.filename)?;
    let mesh = build_mesh(&document, request.default_thickness, &options.mesh)?;
    let output = export::package(&mesh, &document.base_name, request.mode)?;

    let extents = mesh.extents().size();
    tracing::info!(
        output = %output.name,
        nodes = mesh.nodes.len(),
        bars = mesh.bars.len(),
        plates = mesh.plates.len(),
        extent_x = extents.x,
        extent_y = extents.y,
        extent_z = extents.z,
        "转换完成"
    );

    Ok(Conversion {
        output,
        nodes: mesh.nodes.len(),
        bars: mesh.bars.len(),
        plates: mesh.plates.len(),
    })
}
