//! 列车
//!
//! 列车持有自己的候选区段（可有多条备选路径）、起点与最早出发时刻，
//! 以及运行中累积的解。

use std::collections::BTreeSet;

use super::id::{NodeId, SectionId, TrainId};
use super::network::Network;
use super::solution::Solution;
use crate::sim::{Event, SimTime};

/// 列车
#[derive(Debug, Clone)]
pub struct Train {
    id: TrainId,
    label: String,
    start: NodeId,
    earliest_start: SimTime,
    sections: Vec<SectionId>,
    /// 正在某节点等待时为 `Some`，已进入区段后为 `None`
    position: Option<NodeId>,
    pub solution: Solution,
}

impl Train {
    pub fn new(id: TrainId, label: impl Into<String>, start: NodeId, earliest_start: SimTime) -> Self {
        Self {
            id,
            label: label.into(),
            start,
            earliest_start,
            sections: Vec::new(),
            position: None,
            solution: Solution::default(),
        }
    }

    pub fn id(&self) -> TrainId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn earliest_start(&self) -> SimTime {
        self.earliest_start
    }

    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn add_section(&mut self, section: SectionId) {
        self.sections.push(section);
    }

    pub fn position(&self) -> Option<NodeId> {
        self.position
    }

    pub(crate) fn set_position(&mut self, node: Option<NodeId>) {
        self.position = node;
    }

    /// 起始事件：在起点、最早出发时刻进入节点。
    pub fn start_event(&self) -> Event {
        Event::EnterNode {
            time: self.earliest_start,
            train: self.id,
            node: self.start,
            previous_section: None,
        }
    }

    /// 本列车从 `node` 出发的全部区段（按声明顺序）。
    pub fn sections_from<'a>(
        &'a self,
        node: NodeId,
        network: &'a Network,
    ) -> impl Iterator<Item = SectionId> + 'a {
        self.sections
            .iter()
            .copied()
            .filter(move |&sid| network.section(sid).start == node)
    }

    /// 从 `node` 出发、所有资源都对本列车可用的区段。
    pub fn get_next_free_sections(&self, node: NodeId, network: &Network) -> Vec<SectionId> {
        self.sections_from(node, network)
            .filter(|&sid| network.is_section_free_for(sid, self.id))
            .collect()
    }

    /// 当前阻挡本列车的列车：它们正持有本列车在等待节点的某个候选区段的资源。
    pub fn blocked_by(&self, network: &Network) -> BTreeSet<TrainId> {
        let mut blockers = BTreeSet::new();
        let Some(node) = self.position else {
            return blockers;
        };
        for sid in self.sections_from(node, network) {
            for &rid in &network.section(sid).occupations {
                if let Some(holder) = network.resource(rid).current_holder() {
                    if holder != self.id {
                        blockers.insert(holder);
                    }
                }
            }
        }
        blockers
    }
}
