//! 节点去重与单元生成
//!
//! 节点表按首次出现的顺序编号（从 1 开始）：先是所有单元顶点，再是独立点。
//! 坐标舍入到固定小数位后作为去重键，舍入后相同的坐标共用一个节点号。
//!
//! 杆件和板按源实体序号分组（显式的有序多重映射），
//! 组内属性取最小值，防止同一条链上颜色不一致。

use crate::entity::Ordinal;
use crate::error::MeshError;
use crate::extract::{ElementKind, Extraction};
use crate::math::{quantize, BoundingBox3, Point3};
use crate::options::MeshOptions;
use std::collections::{BTreeMap, HashMap};

/// 节点号（从 1 开始，0 表示空位）
pub type NodeId = usize;

/// 去重键：舍入后的整数坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeKey([i64; 3]);

/// 节点表
#[derive(Debug, Clone)]
pub struct NodeTable {
    factor: f64,
    nodes: Vec<Point3>,
    index: HashMap<NodeKey, NodeId>,
}

impl NodeTable {
    /// 创建空节点表，坐标保留 `decimals` 位小数
    pub fn new(decimals: u32) -> Self {
        Self {
            factor: 10f64.powi(decimals as i32),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn key(&self, point: &Point3) -> NodeKey {
        let q = |v: f64| quantize(v, self.factor);
        NodeKey([q(point.x), q(point.y), q(point.z)])
    }

    /// 插入坐标，返回节点号；已存在时返回原节点号
    pub fn insert(&mut self, point: &Point3) -> NodeId {
        let key = self.key(point);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let [x, y, z] = key.0;
        self.nodes.push(Point3::new(
            x as f64 / self.factor,
            y as f64 / self.factor,
            z as f64 / self.factor,
        ));
        let id = self.nodes.len();
        self.index.insert(key, id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 按节点号顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Point3)> {
        self.nodes.iter().enumerate().map(|(i, p)| (i + 1, p))
    }
}

/// 杆件单元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub start: NodeId,
    pub end: NodeId,
    /// 截面号（组内最小颜色号）
    pub section: i64,
}

/// 板单元
#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    /// 节点号，右侧补 0 到固定列数
    pub nodes: Vec<NodeId>,
    /// 厚度（米）
    pub thickness: f64,
}

/// 转换得到的网格
#[derive(Debug, Clone)]
pub struct Mesh {
    pub nodes: NodeTable,
    pub bars: Vec<Bar>,
    pub plates: Vec<Plate>,
}

impl Mesh {
    /// 节点范围
    pub fn extents(&self) -> BoundingBox3 {
        BoundingBox3::from_points(self.nodes.iter().map(|(_, p)| p))
    }
}

/// 同一序号下的节点和最小属性
#[derive(Debug)]
struct Group {
    nodes: Vec<NodeId>,
    min_attribute: f64,
}

impl Group {
    fn push(&mut self, node: NodeId, attribute: f64) {
        self.nodes.push(node);
        self.min_attribute = self.min_attribute.min(attribute);
    }
}

impl Default for Group {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            min_attribute: f64::INFINITY,
        }
    }
}

/// 网格构建器
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    options: MeshOptions,
}

impl MeshBuilder {
    pub fn new(options: MeshOptions) -> Self {
        Self { options }
    }

    /// 由提取结果构建节点表、杆件和板
    pub fn build(&self, extraction: &Extraction) -> Result<Mesh, MeshError> {
        let mut nodes = NodeTable::new(self.options.decimals);
        let mut edges: BTreeMap<Ordinal, Group> = BTreeMap::new();
        let mut faces: BTreeMap<Ordinal, Group> = BTreeMap::new();

        for element in &extraction.elements {
            let id = nodes.insert(&element.position);
            let groups = match element.kind {
                ElementKind::Edge => &mut edges,
                ElementKind::Face => &mut faces,
            };
            groups
                .entry(element.ordinal)
                .or_default()
                .push(id, element.attribute);
        }
        for point in &extraction.points {
            nodes.insert(point);
        }

        if nodes.is_empty() {
            return Err(MeshError::EmptyGeometry);
        }

        let bars = self.build_bars(&edges);
        let plates = self.build_plates(&faces)?;

        tracing::debug!(
            nodes = nodes.len(),
            bars = bars.len(),
            plates = plates.len(),
            "网格构建完成"
        );

        Ok(Mesh {
            nodes,
            bars,
            plates,
        })
    }

    fn build_bars(&self, edges: &BTreeMap<Ordinal, Group>) -> Vec<Bar> {
        let mut bars = Vec::new();
        for (&ordinal, group) in edges {
            let section = group.min_attribute.trunc() as i64;
            for pair in group.nodes.windows(2) {
                // 零长度杆件照常输出，只记录警告
                if pair[0] == pair[1] {
                    tracing::warn!(ordinal, node = pair[0], "杆件两端舍入后重合");
                }
                bars.push(Bar {
                    start: pair[0],
                    end: pair[1],
                    section,
                });
            }
        }
        bars
    }

    fn build_plates(&self, faces: &BTreeMap<Ordinal, Group>) -> Result<Vec<Plate>, MeshError> {
        let width = self.options.plate_width;
        let mut plates = Vec::with_capacity(faces.len());
        for (&ordinal, group) in faces {
            if group.nodes.len() > width {
                return Err(MeshError::PlateTooLarge {
                    ordinal,
                    count: group.nodes.len(),
                    max: width,
                });
            }
            let mut nodes = group.nodes.clone();
            nodes.resize(width, 0);
            plates.push(Plate {
                nodes,
                thickness: group.min_attribute / self.options.thickness_divisor,
            });
        }
        Ok(plates)
    }
}
