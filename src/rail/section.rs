//! 区段类型
//!
//! 两个节点之间可通行的一条边，绑定若干资源占用和可选的时刻要求。

use super::id::{NodeId, ResourceId, SectionId, TrainId};
use crate::sim::SimTime;

/// 时刻要求种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    /// 停站：须停留至少 `min_stopping_time`
    Halt,
    /// 通过：只约束进入/离开时刻
    Pass,
}

/// 区段上的时刻要求
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    pub marker: String,
    pub kind: RequirementKind,
    pub entry_earliest: Option<SimTime>,
    pub entry_latest: Option<SimTime>,
    pub exit_earliest: Option<SimTime>,
    pub exit_latest: Option<SimTime>,
    pub min_stopping_time: SimTime,
    pub entry_delay_weight: f64,
    pub exit_delay_weight: f64,
}

impl Requirement {
    /// 一个只带标记的通过要求，其余字段为空。
    pub fn pass(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            kind: RequirementKind::Pass,
            entry_earliest: None,
            entry_latest: None,
            exit_earliest: None,
            exit_latest: None,
            min_stopping_time: SimTime::ZERO,
            entry_delay_weight: 1.0,
            exit_delay_weight: 1.0,
        }
    }

    /// 停站要求
    pub fn halt(marker: impl Into<String>, min_stopping_time: SimTime) -> Self {
        Self {
            kind: RequirementKind::Halt,
            min_stopping_time,
            ..Self::pass(marker)
        }
    }

    pub fn is_halt(&self) -> bool {
        self.kind == RequirementKind::Halt
    }

    pub fn with_entry_window(
        mut self,
        earliest: Option<SimTime>,
        latest: Option<SimTime>,
    ) -> Self {
        self.entry_earliest = earliest;
        self.entry_latest = latest;
        self
    }

    pub fn with_exit_window(mut self, earliest: Option<SimTime>, latest: Option<SimTime>) -> Self {
        self.exit_earliest = earliest;
        self.exit_latest = latest;
        self
    }
}

/// 轨道区段
#[derive(Debug, Clone)]
pub struct Section {
    pub id: SectionId,
    /// 实例中的区段编号（输出用）
    pub name: String,
    /// 所属线路路径编号（输出用）
    pub route_path: String,
    pub train: TrainId,
    pub start: NodeId,
    pub end: NodeId,
    pub minimum_running_time: SimTime,
    /// 按顺序占用的资源
    pub occupations: Vec<ResourceId>,
    pub requirement: Option<Requirement>,
    /// 选路惩罚（计入目标函数）
    pub penalty: f64,
}

impl Section {
    pub fn uses(&self, resource: ResourceId) -> bool {
        self.occupations.contains(&resource)
    }

    pub fn halt_requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref().filter(|r| r.is_halt())
    }
}
