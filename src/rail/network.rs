//! 线网拓扑
//!
//! 节点、区段与资源的 arena。区段只持有资源 id，通过 `Network` 查找，
//! 避免区段与资源之间的所有权环。

use std::collections::HashMap;

use super::id::{NodeId, ResourceId, SectionId, TrainId};
use super::node::Node;
use super::resource::Resource;
use super::section::Section;
use crate::sim::SimTime;
use tracing::debug;

/// 线网拓扑与资源目录
#[derive(Debug, Default, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    sections: Vec<Section>,
    resources: Vec<Resource>,
    node_labels: HashMap<String, NodeId>,
    /// 按列车划分的路线节点，见 `add_route_node`
    route_nodes: HashMap<(TrainId, String), NodeId>,
    resource_names: HashMap<String, ResourceId>,
}

impl Network {
    /// 添加节点；同名节点已存在时返回已有 id。
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        if let Some(&id) = self.node_labels.get(&label) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, label.clone()));
        self.node_labels.insert(label, id);
        id
    }

    /// 添加属于 `train` 路线图的节点；同一列车内按标签去重。
    ///
    /// 各列车的路线图互不相交，终点判定（无出边）只看本列车的区段。
    pub fn add_route_node(&mut self, train: TrainId, label: impl Into<String>) -> NodeId {
        let label = label.into();
        if let Some(&id) = self.route_nodes.get(&(train, label.clone())) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, label.clone()));
        self.route_nodes.insert((train, label), id);
        id
    }

    /// 添加资源
    pub fn add_resource(
        &mut self,
        name: impl Into<String>,
        release_delay: SimTime,
        following_allowed: bool,
    ) -> ResourceId {
        let name = name.into();
        let id = ResourceId(self.resources.len());
        self.resources
            .push(Resource::new(id, name.clone(), release_delay, following_allowed));
        self.resource_names.insert(name, id);
        id
    }

    /// 为 `train` 添加一条 `from -> to` 的区段，并登记到两端节点的出入边。
    pub fn add_section(
        &mut self,
        train: TrainId,
        from: NodeId,
        to: NodeId,
        minimum_running_time: SimTime,
        occupations: Vec<ResourceId>,
    ) -> SectionId {
        let id = SectionId(self.sections.len());
        self.sections.push(Section {
            id,
            name: id.0.to_string(),
            route_path: id.0.to_string(),
            train,
            start: from,
            end: to,
            minimum_running_time,
            occupations,
            requirement: None,
            penalty: 0.0,
        });
        self.nodes[from.0].out_links.insert(id);
        self.nodes[to.0].in_links.insert(id);
        debug!(section = %id, %train, from = %from, to = %to, "添加区段");
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.node_labels.get(label).copied()
    }

    pub fn route_node(&self, train: TrainId, label: &str) -> Option<NodeId> {
        self.route_nodes.get(&(train, label.to_string())).copied()
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    pub fn section_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.0]
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn resource(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }

    pub fn resource_mut(&mut self, id: ResourceId) -> &mut Resource {
        &mut self.resources[id.0]
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resource_by_name(&self, name: &str) -> Option<ResourceId> {
        self.resource_names.get(name).copied()
    }

    /// 按区段的占用关系重建资源到区段的反向链接。
    pub fn link_sections(&mut self) {
        for resource in &mut self.resources {
            resource.sections.clear();
        }
        for section in &self.sections {
            for &rid in &section.occupations {
                let linked = &mut self.resources[rid.0].sections;
                if !linked.contains(&section.id) {
                    linked.push(section.id);
                }
            }
        }
    }

    /// 所有资源恢复为空闲、无人持有。
    pub fn free_all_resources(&mut self) {
        for resource in &mut self.resources {
            resource.reset();
        }
    }

    /// `section` 的所有资源是否都对 `train` 可用。
    pub fn is_section_free_for(&self, section: SectionId, train: TrainId) -> bool {
        self.sections[section.0]
            .occupations
            .iter()
            .all(|rid| self.resources[rid.0].is_free_for(train))
    }
}
