//! 外部控制钩子
//!
//! 运行循环在处理每个 `EnterNode` 事件之前询问 `Controller`；返回 `true`
//! 时循环把该事件留在队列中并返回 `RunOutcome::Paused`，下一次 `run_with`
//! 会直接处理这个事件而不再询问。

use super::time::SimTime;
use crate::rail::{NodeId, TrainId, Train};

/// 暂停决策接口
pub trait Controller {
    fn pause_before(&mut self, train: &Train, node: NodeId, now: SimTime) -> bool;
}

/// 从不暂停
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverPause;

impl Controller for NeverPause {
    fn pause_before(&mut self, _train: &Train, _node: NodeId, _now: SimTime) -> bool {
        false
    }
}

impl<F> Controller for F
where
    F: FnMut(&Train, NodeId, SimTime) -> bool,
{
    fn pause_before(&mut self, train: &Train, node: NodeId, now: SimTime) -> bool {
        self(train, node, now)
    }
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// 事件队列已清空
    Completed {
        end: SimTime,
        score: f64,
        completed: usize,
        total: usize,
    },
    /// 控制器请求在该 `EnterNode` 之前暂停；事件仍在队列中
    Paused {
        at: SimTime,
        train: TrainId,
        node: NodeId,
    },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}
