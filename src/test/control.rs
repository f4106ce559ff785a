use crate::demo::{HeadwayOpts, build_headway_pair};
use crate::dispatch::FirstFree;
use crate::rail::{NodeId, Train, TrainId};
use crate::sim::{Event, RunOutcome, SimConfig, SimTime, Simulator};

fn headway_sim() -> Simulator {
    build_headway_pair(&HeadwayOpts::default()).into_simulator(FirstFree::new(), SimConfig::default())
}

#[test]
fn controller_pauses_before_enter_node_without_losing_it() {
    let mut sim = headway_sim();
    let mut asked = Vec::new();
    let mut pause_for_b = |train: &Train, _node: NodeId, now: SimTime| {
        asked.push((train.id(), now));
        train.id() == TrainId(1)
    };

    let outcome = sim.run_with(&mut pause_for_b).expect("run");
    let s = sim.network().node_by_label("S").expect("node S");
    assert_eq!(
        outcome,
        RunOutcome::Paused {
            at: SimTime(90),
            train: TrainId(1),
            node: s,
        }
    );
    let top = sim.peek().expect("event kept");
    assert!(matches!(
        top.event(),
        Event::EnterNode { train: TrainId(1), time: SimTime(90), .. }
    ));
    assert!(!sim.is_done());

    // 恢复后直接处理被暂停的事件；下一次重试（120）会再次暂停
    let outcome = sim.run_with(&mut pause_for_b).expect("resume");
    assert!(matches!(
        outcome,
        RunOutcome::Paused {
            at: SimTime(120),
            ..
        }
    ));
    assert!(sim.waiting().contains(&TrainId(1)));
    assert!(asked.iter().filter(|(t, at)| *t == TrainId(1) && *at == SimTime(90)).count() == 1);
}

#[test]
fn paused_and_resumed_run_matches_uninterrupted_run() {
    let mut plain = headway_sim();
    plain.run().expect("run");

    let mut paused = headway_sim();
    let mut pauses = 0;
    loop {
        let mut every_enter = |_: &Train, _: NodeId, _: SimTime| true;
        match paused.run_with(&mut every_enter).expect("run") {
            RunOutcome::Paused { .. } => pauses += 1,
            RunOutcome::Completed { .. } => break,
        }
    }
    assert!(pauses >= 5);
    assert_eq!(paused.create_output(), plain.create_output());
}
