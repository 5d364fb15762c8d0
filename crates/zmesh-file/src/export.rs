//! 导出模块
//!
//! 将节点、杆件和板三张表写成分析软件读取的文本格式：
//! 第一行为表名，之后每行一条记录，首列为从 1 开始的行号，
//! 字段以空格分隔，小数点使用逗号，行尾为 CRLF。空表不输出。

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};
use zmesh_core::mesh::{Bar, Mesh, NodeTable, Plate};

/// 行尾
const LINE_END: &str = "\r\n";

/// 输出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// 三张表合并为一个文本文件
    #[default]
    Single,
    /// 每张表一个文件，打包为 zip
    Archive,
}

/// 表格类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Nodes,
    Bars,
    Plates,
}

impl Table {
    /// 输出顺序
    pub const ALL: [Table; 3] = [Table::Nodes, Table::Bars, Table::Plates];

    /// 表名（文件头和压缩包内文件名前缀）
    pub fn title(&self) -> &'static str {
        match self {
            Table::Nodes => "Wezly",
            Table::Bars => "Prety",
            Table::Plates => "Plaskie",
        }
    }

    /// 压缩包内的文件名
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{}-{}.txt", self.title(), base_name)
    }
}

/// 导出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// 格式化小数：逗号作小数点，至少保留一位小数
pub fn format_decimal(value: f64) -> String {
    // 消除 -0.0
    let value = if value == 0.0 { 0.0 } else { value };
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text.replace('.', ",")
}

fn push_row(out: &mut String, fields: &[String]) {
    out.push_str(&fields.join(" "));
    out.push_str(LINE_END);
}

fn render_rows<T>(title: &str, rows: &[T], fields: impl Fn(&T) -> Vec<String>) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(rows.len() * 32);
    out.push_str(title);
    out.push_str(LINE_END);
    for (i, row) in rows.iter().enumerate() {
        let mut line = vec![(i + 1).to_string()];
        line.extend(fields(row));
        push_row(&mut out, &line);
    }
    Some(out)
}

fn render_nodes(nodes: &NodeTable) -> Option<String> {
    let points: Vec<_> = nodes.iter().map(|(_, p)| *p).collect();
    render_rows(Table::Nodes.title(), &points, |p| {
        vec![format_decimal(p.x), format_decimal(p.y), format_decimal(p.z)]
    })
}

fn render_bars(bars: &[Bar]) -> Option<String> {
    // wI wJ wK Kier Mat Prz
    render_rows(Table::Bars.title(), bars, |bar| {
        vec![
            bar.start.to_string(),
            bar.end.to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            bar.section.to_string(),
        ]
    })
}

fn render_plates(plates: &[Plate]) -> Option<String> {
    // w1..w5 g[m]
    render_rows(Table::Plates.title(), plates, |plate| {
        let mut fields: Vec<String> = plate.nodes.iter().map(ToString::to_string).collect();
        fields.push(format_decimal(plate.thickness));
        fields
    })
}

/// 渲染单张表，空表返回 `None`
pub fn render_table(mesh: &Mesh, table: Table) -> Option<String> {
    match table {
        Table::Nodes => render_nodes(&mesh.nodes),
        Table::Bars => render_bars(&mesh.bars),
        Table::Plates => render_plates(&mesh.plates),
    }
}

/// 按输出方式打包
pub fn package(mesh: &Mesh, base_name: &str, mode: OutputMode) -> Result<OutputFile, FileError> {
    let tables: Vec<(Table, String)> = Table::ALL
        .iter()
        .filter_map(|&table| render_table(mesh, table).map(|text| (table, text)))
        .collect();

    match mode {
        OutputMode::Single => {
            let bytes = tables
                .iter()
                .flat_map(|(_, text)| text.as_bytes().iter().copied())
                .collect();
            Ok(OutputFile {
                name: format!("{base_name}.txt"),
                bytes,
            })
        }
        OutputMode::Archive => {
            let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            for (table, text) in &tables {
                writer.start_file(table.file_name(base_name), options)?;
                writer.write_all(text.as_bytes())?;
            }
            let bytes = writer.finish()?.into_inner();
            Ok(OutputFile {
                name: format!("{base_name}.zip"),
                bytes,
            })
        }
    }
}
