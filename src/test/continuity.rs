use crate::dispatch::FirstFree;
use crate::rail::{Network, Train, TrainId};
use crate::sim::{SimConfig, SimTime, Simulator};
use crate::viz::VizEventKind;

#[test]
fn resource_carried_into_next_section_is_not_released() {
    let mut net = Network::default();
    let r1 = net.add_resource("R1", SimTime(30), false);
    let r2 = net.add_resource("R2", SimTime(30), false);
    let r3 = net.add_resource("R3", SimTime(30), false);
    let n: Vec<_> = ["A", "B", "C", "D"].iter().map(|l| net.add_node(*l)).collect();

    let id = TrainId(0);
    let mut train = Train::new(id, "IC1", n[0], SimTime::ZERO);
    train.add_section(net.add_section(id, n[0], n[1], SimTime(60), vec![r1, r2]));
    train.add_section(net.add_section(id, n[1], n[2], SimTime(60), vec![r2, r3]));
    train.add_section(net.add_section(id, n[2], n[3], SimTime(60), vec![r3]));

    let mut sim = Simulator::new(net, vec![train], FirstFree::new(), SimConfig::default()).with_viz();
    sim.run().expect("run");

    let vacated: Vec<(u64, usize)> = sim
        .viz
        .as_ref()
        .expect("viz enabled")
        .events
        .iter()
        .filter_map(|e| match e.kind {
            VizEventKind::Vacate { resource } => Some((e.t_s, resource)),
            _ => None,
        })
        .collect();
    assert_eq!(
        vacated,
        vec![(60, r1.0), (120, r2.0), (180, r3.0)],
        "each resource is vacated exactly once, when the train stops using it"
    );

    let net = sim.network();
    for rid in [r1, r2, r3] {
        assert!(net.resource(rid).is_free(), "{rid} released after run");
    }
    assert_eq!(net.resource(r2).last_vacate_time(), Some(SimTime(120)));
}
