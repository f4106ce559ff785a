use crate::demo::{CrossingOpts, build_single_track_crossing};
use crate::dispatch::{Dispatcher, FirstFree};
use crate::rail::TrainId;
use crate::sim::{Deadlock, RunOutcome, SimConfig, SimError, SimTime};

#[test]
fn opposing_trains_on_single_track_raise_mutual_blocking() {
    let mut sim = build_single_track_crossing(&CrossingOpts::default())
        .into_simulator(FirstFree::new(), SimConfig::default());

    let err = sim.run().unwrap_err();
    assert!(err.is_blocking());
    assert_eq!(
        err,
        SimError::MutualBlocking(Deadlock {
            time: SimTime(60),
            train: TrainId(1),
            other: TrainId(0),
            completed: 0,
            total: 2,
        })
    );
    assert!(!sim.is_done());
    assert!(sim.waiting().contains(&TrainId(0)));
}

#[test]
fn staggered_opposing_train_completes() {
    let opts = CrossingOpts {
        opposing_start: SimTime(600),
        ..CrossingOpts::default()
    };
    let mut sim = build_single_track_crossing(&opts).into_simulator(FirstFree::new(), SimConfig::default());
    let outcome = sim.run().expect("run");
    assert_eq!(
        outcome,
        RunOutcome::Completed {
            end: SimTime(810),
            score: 0.0,
            completed: 2,
            total: 2,
        }
    );
    super::support::assert_exclusive_with_headway(&sim);
}

#[test]
fn reset_after_deadlock_restores_a_clean_run() {
    let mut sim = build_single_track_crossing(&CrossingOpts::default())
        .into_simulator(FirstFree::new(), SimConfig::default());
    let err = sim.run().unwrap_err();
    let deadlock = err.deadlock().cloned().expect("blocking error");

    sim.dispatcher_mut().on_deadlock(&deadlock);
    sim.reset();
    assert_eq!(sim.now(), SimTime::ZERO);
    assert_eq!(sim.pending_events(), 2);
    assert_eq!(sim.completed_trains(), 0);
    assert!(sim.waiting().is_empty());
    assert!(sim.network().resources().iter().all(|r| r.is_free()));
    assert!(sim.trains().iter().all(|t| t.solution.sections().is_empty()));

    // 只有一条候选路径，换序后仍然阻塞
    assert!(sim.run().unwrap_err().is_blocking());
}

#[test]
fn first_free_rotates_after_deadlock() {
    let mut d = FirstFree::new();
    let deadlock = Deadlock {
        time: SimTime(60),
        train: TrainId(0),
        other: TrainId(1),
        completed: 0,
        total: 2,
    };
    d.on_deadlock(&deadlock);
    d.on_deadlock(&deadlock);
    assert_eq!(d.shift, 2);
}

#[test]
fn runaway_simulation_hits_horizon() {
    let config = SimConfig {
        max_time: SimTime(100),
        ..SimConfig::default()
    };
    let opts = CrossingOpts {
        opposing_start: SimTime(600),
        ..CrossingOpts::default()
    };
    let mut sim = build_single_track_crossing(&opts).into_simulator(FirstFree::new(), config);
    let err = sim.run().unwrap_err();
    assert_eq!(
        err,
        SimError::HorizonExceeded {
            time: SimTime(120),
            max_time: SimTime(100),
        }
    );
    assert!(!err.is_blocking());
}
