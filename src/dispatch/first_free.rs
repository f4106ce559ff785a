use super::Dispatcher;
use crate::rail::{Network, SectionId, Train};
use crate::sim::Deadlock;
use tracing::debug;

/// 选择第一个可用候选；`shift` 把起点向后轮转，用于重试时换一种选择顺序。
#[derive(Debug, Default, Clone)]
pub struct FirstFree {
    pub shift: usize,
}

impl FirstFree {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dispatcher for FirstFree {
    fn choose(
        &mut self,
        candidates: &[Option<SectionId>],
        _train: &Train,
        _network: &Network,
    ) -> Option<SectionId> {
        let live: Vec<SectionId> = candidates.iter().flatten().copied().collect();
        if live.is_empty() {
            return None;
        }
        Some(live[self.shift % live.len()])
    }

    fn on_deadlock(&mut self, deadlock: &Deadlock) {
        self.shift = self.shift.wrapping_add(1);
        debug!(shift = self.shift, train = %deadlock.train, "轮转候选顺序");
    }
}
