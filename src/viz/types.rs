use serde::{Deserialize, Serialize};

/// 可视化事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 实例元信息（作为 t=0 的第一条事件）
    Meta {
        nodes: Vec<VizNodeInfo>,
        resources: Vec<VizResourceInfo>,
        trains: Vec<VizTrainInfo>,
    },
    /// 列车到达节点
    EnterNode { node: usize },
    /// 没有可用区段，列车原地等待后重试
    Wait { node: usize, blocked_by: Vec<usize> },
    /// 列车进入区段并占用其资源
    EnterSection { node: usize, section: usize },
    /// 列车腾出上一区段中不再需要的资源
    Vacate { resource: usize },
    /// 追踪间隔结束时的释放检查
    Release { resource: usize, freed: bool },
    /// 停站开始
    EnterStation { section: usize },
    /// 停站结束
    LeaveStation { section: usize },
    /// 列车到达终点
    Done { node: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizNodeInfo {
    pub id: usize,
    pub label: String,
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizResourceInfo {
    pub id: usize,
    pub name: String,
    /// 追踪间隔（秒）
    pub release_delay_s: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizTrainInfo {
    pub id: usize,
    pub label: String,
    pub sections: usize,
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizEvent {
    /// 仿真时间（秒，和 `SimTime.0` 同口径）
    pub t_s: u64,
    pub train: Option<usize>,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
