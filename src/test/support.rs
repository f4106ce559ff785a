use crate::rail::{Network, ResourceId, Train, TrainId};
use crate::sim::{SimTime, Simulator};
use std::collections::BTreeMap;

/// (进入, 离开, 列车)；同一列车连续占用的区间会合并。
pub(crate) type Hold = (SimTime, SimTime, TrainId);

pub(crate) fn hold_intervals(sim: &Simulator) -> BTreeMap<ResourceId, Vec<Hold>> {
    let net = sim.network();
    let mut out: BTreeMap<ResourceId, Vec<Hold>> = BTreeMap::new();
    for train in sim.trains() {
        for realized in train.solution.sections() {
            let exit = realized.exit_time.expect("section closed");
            for &rid in &net.section(realized.section).occupations {
                let list = out.entry(rid).or_default();
                match list.last_mut() {
                    Some(last) if last.2 == train.id() && last.1 == realized.entry_time => {
                        last.1 = exit;
                    }
                    _ => list.push((realized.entry_time, exit, train.id())),
                }
            }
        }
    }
    for list in out.values_mut() {
        list.sort();
    }
    out
}

/// 回放整次运行：每个资源同一时刻至多一列车占用，换车时满足追踪间隔。
pub(crate) fn assert_exclusive_with_headway(sim: &Simulator) {
    for (rid, holds) in hold_intervals(sim) {
        let delay = sim.network().resource(rid).release_delay();
        for pair in holds.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.2 == b.2 {
                assert!(b.0 >= a.1, "{rid}: {a:?} overlaps {b:?}");
            } else {
                assert!(
                    b.0 >= a.1.saturating_add(delay),
                    "{rid}: {b:?} enters before headway after {a:?}"
                );
            }
        }
    }
}

/// 一条 `blocks` 个闭塞的直线，`trains` 列车同时从 N0 出发依次通过。
pub(crate) fn build_line(blocks: usize, trains: usize, delay: SimTime) -> (Network, Vec<Train>) {
    let mut net = Network::default();
    let resources: Vec<ResourceId> = (0..blocks)
        .map(|i| net.add_resource(format!("R{i}"), delay, false))
        .collect();
    let nodes: Vec<_> = (0..=blocks).map(|i| net.add_node(format!("N{i}"))).collect();

    let mut out = Vec::new();
    for t in 0..trains {
        let id = TrainId(t);
        let mut train = Train::new(id, format!("T{t}"), nodes[0], SimTime::ZERO);
        for b in 0..blocks {
            let sid = net.add_section(id, nodes[b], nodes[b + 1], SimTime::from_secs(45), vec![resources[b]]);
            train.add_section(sid);
        }
        out.push(train);
    }
    (net, out)
}
