//! 调度策略（Dispatchers）
//!
//! 仿真器在列车到达非终点节点时，把候选区段交给调度器选择；
//! 候选为空时列表中只有一个 `None` 哨兵。调度器返回 `None` 表示让列车等待。

use crate::rail::{Network, SectionId, Train};
use crate::sim::Deadlock;

mod first_free;
mod min_penalty;

pub use first_free::FirstFree;
pub use min_penalty::MinPenalty;

/// 冲突消解策略
pub trait Dispatcher {
    /// 在候选区段中选择一个；`None` 表示等待。
    fn choose(
        &mut self,
        candidates: &[Option<SectionId>],
        train: &Train,
        network: &Network,
    ) -> Option<SectionId>;

    /// 运行因互相阻塞中止后、调用方重试之前调用，可用于调整策略参数。
    fn on_deadlock(&mut self, _deadlock: &Deadlock) {}
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn choose(
        &mut self,
        candidates: &[Option<SectionId>],
        train: &Train,
        network: &Network,
    ) -> Option<SectionId> {
        (**self).choose(candidates, train, network)
    }

    fn on_deadlock(&mut self, deadlock: &Deadlock) {
        (**self).on_deadlock(deadlock)
    }
}
