use super::Dispatcher;
use crate::rail::{Network, SectionId, Train};

/// 选择惩罚最小的候选；相同时取最短运行时间，再相同时取声明顺序靠前者。
#[derive(Debug, Default, Clone, Copy)]
pub struct MinPenalty;

impl Dispatcher for MinPenalty {
    fn choose(
        &mut self,
        candidates: &[Option<SectionId>],
        _train: &Train,
        network: &Network,
    ) -> Option<SectionId> {
        candidates.iter().flatten().copied().min_by(|&a, &b| {
            let (sa, sb) = (network.section(a), network.section(b));
            sa.penalty
                .total_cmp(&sb.penalty)
                .then_with(|| sa.minimum_running_time.cmp(&sb.minimum_running_time))
        })
    }
}
