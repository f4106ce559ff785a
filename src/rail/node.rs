//! 节点类型
//!
//! 拓扑中的一个点，记录进入/离开它的区段。没有出边的节点即终点。

use super::id::{NodeId, SectionId};
use std::collections::BTreeSet;

/// 拓扑节点（加载后不可变）
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    label: String,
    pub(crate) in_links: BTreeSet<SectionId>,
    pub(crate) out_links: BTreeSet<SectionId>,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            in_links: BTreeSet::new(),
            out_links: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn in_links(&self) -> &BTreeSet<SectionId> {
        &self.in_links
    }

    pub fn out_links(&self) -> &BTreeSet<SectionId> {
        &self.out_links
    }

    /// 没有出边：到达此处的列车运行结束。
    pub fn is_terminal(&self) -> bool {
        self.out_links.is_empty()
    }
}
