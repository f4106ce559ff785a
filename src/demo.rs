//! 演示场景
//!
//! 内置的小型线网构建函数，供命令行演示与测试使用。

use crate::instance::Instance;
use crate::rail::{Network, Train, TrainId};
use crate::sim::SimTime;

/// 追踪间隔场景配置
#[derive(Debug, Clone)]
pub struct HeadwayOpts {
    /// 共享资源的追踪间隔
    pub release_delay: SimTime,
    /// 每条区段的最小运行时间
    pub running_time: SimTime,
    /// 第二列车的最早出发时刻
    pub follower_start: SimTime,
}

impl Default for HeadwayOpts {
    fn default() -> Self {
        Self {
            release_delay: SimTime::from_secs(120),
            running_time: SimTime::from_secs(60),
            follower_start: SimTime::from_secs(90),
        }
    }
}

/// 构建追踪间隔场景
///
/// 拓扑结构：S -[R]-> M -[QA]-> EA，以及 S -[R]-> M -[QB]-> EB。
/// 列车 A 在 0 时刻出发，列车 B 在 `follower_start` 出发，两车都要经过资源 R。
pub fn build_headway_pair(opts: &HeadwayOpts) -> Instance {
    let mut network = Network::default();
    let shared = network.add_resource("R", opts.release_delay, false);
    let qa = network.add_resource("QA", opts.release_delay, false);
    let qb = network.add_resource("QB", opts.release_delay, false);

    let s = network.add_node("S");
    let m = network.add_node("M");
    let ea = network.add_node("EA");
    let eb = network.add_node("EB");

    let a = TrainId(0);
    let b = TrainId(1);
    let a1 = network.add_section(a, s, m, opts.running_time, vec![shared]);
    let a2 = network.add_section(a, m, ea, opts.running_time, vec![qa]);
    let b1 = network.add_section(b, s, m, opts.running_time, vec![shared]);
    let b2 = network.add_section(b, m, eb, opts.running_time, vec![qb]);

    let mut leader = Train::new(a, "A", s, SimTime::ZERO);
    leader.add_section(a1);
    leader.add_section(a2);
    let mut follower = Train::new(b, "B", s, opts.follower_start);
    follower.add_section(b1);
    follower.add_section(b2);

    Instance {
        label: "headway_pair".to_string(),
        hash: 1,
        network,
        trains: vec![leader, follower],
    }
}

/// 单线交会场景配置
#[derive(Debug, Clone)]
pub struct CrossingOpts {
    pub release_delay: SimTime,
    pub running_time: SimTime,
    /// 反向列车的最早出发时刻；为 0 时两车同时进入单线，互相阻塞
    pub opposing_start: SimTime,
}

impl Default for CrossingOpts {
    fn default() -> Self {
        Self {
            release_delay: SimTime::from_secs(30),
            running_time: SimTime::from_secs(60),
            opposing_start: SimTime::ZERO,
        }
    }
}

/// 构建单线交会场景
///
/// 西端闭塞 RW、单线 RS、东端闭塞 RE。东行列车 A：WA -[RW]-> X1 -[RS,RE]-> X2 -[RE]-> EA；
/// 西行列车 B：EB -[RE]-> X2 -[RS,RW]-> X1 -[RW]-> WB。
pub fn build_single_track_crossing(opts: &CrossingOpts) -> Instance {
    let mut network = Network::default();
    let rw = network.add_resource("RW", opts.release_delay, false);
    let rs = network.add_resource("RS", opts.release_delay, false);
    let re = network.add_resource("RE", opts.release_delay, false);

    let wa = network.add_node("WA");
    let eb = network.add_node("EB");
    let x1 = network.add_node("X1");
    let x2 = network.add_node("X2");
    let ea = network.add_node("EA");
    let wb = network.add_node("WB");

    let a = TrainId(0);
    let b = TrainId(1);
    let t = opts.running_time;
    let mut east = Train::new(a, "east", wa, SimTime::ZERO);
    for sid in [
        network.add_section(a, wa, x1, t, vec![rw]),
        network.add_section(a, x1, x2, t, vec![rs, re]),
        network.add_section(a, x2, ea, t, vec![re]),
    ] {
        east.add_section(sid);
    }
    let mut west = Train::new(b, "west", eb, opts.opposing_start);
    for sid in [
        network.add_section(b, eb, x2, t, vec![re]),
        network.add_section(b, x2, x1, t, vec![rs, rw]),
        network.add_section(b, x1, wb, t, vec![rw]),
    ] {
        west.add_section(sid);
    }

    Instance {
        label: "single_track_crossing".to_string(),
        hash: 2,
        network,
        trains: vec![east, west],
    }
}
