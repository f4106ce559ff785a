use crate::dispatch::FirstFree;
use crate::instance::{DurationSpec, Instance, InstanceError, InstanceSpec};
use crate::rail::RequirementKind;
use crate::sim::{RunOutcome, SimConfig, SimTime};

const HALT_INSTANCE: &str = r#"
{
    "label": "halt_demo",
    "hash": 1234,
    "resources": [
        { "id": "R1", "release_time": 30 },
        { "id": "R2", "release_time": 30, "following_allowed": false }
    ],
    "trains": [
        {
            "id": "IC 1",
            "earliest_start": "00:00:00",
            "sections": [
                {
                    "id": "1",
                    "route_path": "p1",
                    "from": "A",
                    "to": "B",
                    "minimum_running_time": 60,
                    "resource_occupations": ["R1"],
                    "requirement": {
                        "marker": "STA",
                        "entry_earliest": "00:02:00",
                        "exit_earliest": "00:04:00",
                        "exit_latest": "00:04:30",
                        "min_stopping_time": 60
                    }
                },
                {
                    "id": "2",
                    "from": "B",
                    "to": "C",
                    "minimum_running_time": 90,
                    "resource_occupations": ["R2"],
                    "penalty": 1.5
                }
            ]
        }
    ]
}
"#;

#[test]
fn instance_parses_sections_and_requirements() {
    let spec: InstanceSpec = serde_json::from_str(HALT_INSTANCE).expect("parse instance");
    assert_eq!(spec.trains[0].sections.len(), 2);
    assert_eq!(spec.trains[0].sections[1].requirement.as_ref().map(|r| r.marker.as_str()), None);

    let inst = Instance::from_spec(&spec).expect("load instance");
    assert_eq!(inst.label, "halt_demo");
    assert_eq!(inst.hash, 1234);
    assert_eq!(inst.network.nodes().len(), 3);
    assert_eq!(inst.network.resources().len(), 2);
    assert_eq!(inst.trains.len(), 1);

    let train = &inst.trains[0];
    assert_eq!(train.label(), "IC 1");
    assert_eq!(inst.network.node(train.start()).label(), "A");

    let s1 = inst.network.section(train.sections()[0]);
    assert_eq!(s1.name, "1");
    assert_eq!(s1.route_path, "p1");
    let req = s1.requirement.as_ref().expect("requirement");
    assert_eq!(req.kind, RequirementKind::Halt);
    assert_eq!(req.entry_earliest, Some(SimTime(120)));
    assert_eq!(req.exit_latest, Some(SimTime(270)));
    assert_eq!(req.entry_delay_weight, 1.0);

    let s2 = inst.network.section(train.sections()[1]);
    assert_eq!(s2.route_path, "2");
    assert_eq!(s2.penalty, 1.5);
    let r1 = inst.network.resource_by_name("R1").expect("R1");
    assert_eq!(inst.network.resource(r1).sections(), &[s1.id]);
    assert!(inst.network.node(s2.end).is_terminal());
}

#[test]
fn halt_section_waits_for_earliest_entry_and_exit() {
    let mut sim = Instance::from_json(HALT_INSTANCE)
        .expect("load instance")
        .into_simulator(FirstFree::new(), SimConfig::default());
    sim.run().expect("run");

    let sections = sim.trains()[0].solution.sections();
    // 运行 60 秒，但最早 120 进站；停站 60 秒，但最早 240 出站
    assert_eq!(sections[0].entry_time, SimTime(0));
    assert_eq!(sections[0].exit_time, Some(SimTime(240)));
    assert_eq!(sections[1].entry_time, SimTime(240));
    assert_eq!(sections[1].exit_time, Some(SimTime(330)));
    // 仅选路惩罚
    assert_eq!(sim.compute_score(), 1.5);

    let out = sim.create_output();
    assert_eq!(out.problem_instance_label, "halt_demo");
    let run = &out.train_runs[0];
    assert_eq!(run.service_intention_id, "IC 1");
    assert_eq!(run.train_run_sections[0].section_requirement.as_deref(), Some("STA"));
    assert_eq!(run.train_run_sections[0].route_path, "p1");
    assert_eq!(run.train_run_sections[1].exit_time.as_deref(), Some("00:05:30"));
}

#[test]
fn unknown_resource_is_rejected() {
    let raw = r#"{ "label": "x", "resources": [],
        "trains": [ { "id": "T", "sections": [
            { "id": "1", "from": "A", "to": "B", "minimum_running_time": 1, "resource_occupations": ["NOPE"] }
        ] } ] }"#;
    match Instance::from_json(raw) {
        Err(InstanceError::UnknownResource { resource, .. }) => assert_eq!(resource, "NOPE"),
        other => panic!("expected unknown resource, got {other:?}"),
    }
}

#[test]
fn bad_time_and_empty_train_are_rejected() {
    let raw = r#"{ "label": "x", "resources": [],
        "trains": [ { "id": "T", "earliest_start": "7 o'clock", "sections": [
            { "id": "1", "from": "A", "to": "B", "minimum_running_time": 1 }
        ] } ] }"#;
    assert!(matches!(Instance::from_json(raw), Err(InstanceError::BadTime { .. })));

    let raw = r#"{ "label": "x", "resources": [], "trains": [ { "id": "T", "sections": [] } ] }"#;
    assert!(matches!(Instance::from_json(raw), Err(InstanceError::EmptyTrain(id)) if id == "T"));

    assert!(matches!(Instance::from_json("{"), Err(InstanceError::Json(_))));
}

/// A 的终点 M 正是 B 继续出发的节点
const SHARED_TERMINUS: &str = r#"
{
    "label": "shared_terminus",
    "resources": [
        { "id": "R", "release_time": 30 },
        { "id": "Q", "release_time": 30 }
    ],
    "trains": [
        {
            "id": "A",
            "sections": [
                { "id": "a1", "from": "S", "to": "M", "minimum_running_time": 60, "resource_occupations": ["R"] }
            ]
        },
        {
            "id": "B",
            "earliest_start": "00:10:00",
            "sections": [
                { "id": "b1", "from": "S", "to": "M", "minimum_running_time": 60, "resource_occupations": ["R"] },
                { "id": "b2", "from": "M", "to": "E", "minimum_running_time": 60, "resource_occupations": ["Q"] }
            ]
        }
    ]
}
"#;

#[test]
fn train_ends_at_node_another_train_continues_from() {
    let inst = Instance::from_json(SHARED_TERMINUS).expect("load instance");
    let a_end = inst.network.section(inst.trains[0].sections()[0]).end;
    let b_mid = inst.network.section(inst.trains[1].sections()[0]).end;
    assert_ne!(a_end, b_mid);
    assert_eq!(inst.network.node(a_end).label(), "M");
    assert!(inst.network.node(a_end).is_terminal());
    assert!(!inst.network.node(b_mid).is_terminal());

    let mut sim = inst.into_simulator(FirstFree::new(), SimConfig::default());
    let outcome = sim.run().expect("run");
    assert!(matches!(
        outcome,
        RunOutcome::Completed { completed: 2, total: 2, .. }
    ));

    let a = sim.trains()[0].solution.sections();
    assert_eq!(a[0].exit_time, Some(SimTime(60)));
    let b = sim.trains()[1].solution.sections();
    assert_eq!(b[0].entry_time, SimTime(600));
    assert_eq!(b[1].exit_time, Some(SimTime(720)));
}

#[test]
fn iso_durations_are_accepted_alongside_seconds() {
    let raw = r#"{ "label": "iso", "resources": [ { "id": "R", "release_time": "PT2M" } ],
        "trains": [ { "id": "T", "sections": [
            { "id": "1", "from": "A", "to": "B", "minimum_running_time": "PT1M30S", "resource_occupations": ["R"],
              "requirement": { "marker": "STA", "min_stopping_time": "PT45S" } },
            { "id": "2", "from": "B", "to": "C", "minimum_running_time": 20 }
        ] } ] }"#;
    let inst = Instance::from_json(raw).expect("load instance");
    let r = inst.network.resource_by_name("R").expect("R");
    assert_eq!(inst.network.resource(r).release_delay(), SimTime(120));

    let train = &inst.trains[0];
    let s1 = inst.network.section(train.sections()[0]);
    assert_eq!(s1.minimum_running_time, SimTime(90));
    let req = s1.requirement.as_ref().expect("requirement");
    assert_eq!(req.kind, RequirementKind::Halt);
    assert_eq!(req.min_stopping_time, SimTime(45));
    assert_eq!(inst.network.section(train.sections()[1]).minimum_running_time, SimTime(20));

    assert_eq!(DurationSpec::Iso("PT0S".into()).to_secs(), Some(0));
    assert_eq!(DurationSpec::Iso("PT1H2M3S".into()).to_secs(), Some(3_723));
    assert_eq!(DurationSpec::Iso("P1DT1S".into()).to_secs(), Some(86_401));
    assert_eq!(DurationSpec::Iso("PT53.9S".into()).to_secs(), Some(53));
    assert_eq!(DurationSpec::Iso("PT".into()).to_secs(), None);
    assert_eq!(DurationSpec::Iso("30S".into()).to_secs(), None);

    let bad = r#"{ "label": "x", "resources": [ { "id": "R", "release_time": "soon" } ], "trains": [] }"#;
    assert!(matches!(Instance::from_json(bad), Err(InstanceError::BadDuration(_))));
}
