//! 仿真事件
//!
//! 五类列车事件的带标签联合，按时间（同一时刻按入队顺序）执行。

use super::time::SimTime;
use crate::rail::{NodeId, ResourceId, SectionId, TrainId};
use serde::Serialize;

/// 事件种类（无字段，用于日志与轨迹记录）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    EnterNode,
    LeaveNode,
    EnterStation,
    LeaveStation,
    ReleaseResource,
}

/// 列车事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// 列车到达节点，需要选择下一区段（或在终点结束）
    EnterNode {
        time: SimTime,
        train: TrainId,
        node: NodeId,
        previous_section: Option<SectionId>,
    },
    /// 列车已确定下一区段（或结束），腾出上一区段的资源
    LeaveNode {
        time: SimTime,
        train: TrainId,
        node: NodeId,
        previous_section: Option<SectionId>,
        next_section: Option<SectionId>,
    },
    /// 列车进站停车
    EnterStation {
        time: SimTime,
        train: TrainId,
        section: SectionId,
    },
    /// 列车出站
    LeaveStation {
        time: SimTime,
        train: TrainId,
        section: SectionId,
    },
    /// 追踪间隔结束，检查资源能否释放
    ReleaseResource {
        time: SimTime,
        train: TrainId,
        resource: ResourceId,
        emitted_at: SimTime,
    },
}

impl Event {
    pub fn time(&self) -> SimTime {
        match self {
            Event::EnterNode { time, .. }
            | Event::LeaveNode { time, .. }
            | Event::EnterStation { time, .. }
            | Event::LeaveStation { time, .. }
            | Event::ReleaseResource { time, .. } => *time,
        }
    }

    pub fn train(&self) -> TrainId {
        match self {
            Event::EnterNode { train, .. }
            | Event::LeaveNode { train, .. }
            | Event::EnterStation { train, .. }
            | Event::LeaveStation { train, .. }
            | Event::ReleaseResource { train, .. } => *train,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::EnterNode { .. } => EventKind::EnterNode,
            Event::LeaveNode { .. } => EventKind::LeaveNode,
            Event::EnterStation { .. } => EventKind::EnterStation,
            Event::LeaveStation { .. } => EventKind::LeaveStation,
            Event::ReleaseResource { .. } => EventKind::ReleaseResource,
        }
    }
}
