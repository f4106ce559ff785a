//! 仿真器
//!
//! 离散事件仿真器：维护当前时间与事件队列，解释列车状态机
//! （到达节点 → 区段内 → 可选停站 → 下一节点 → … → 终点），
//! 并通过资源状态机处理列车之间对轨道资源的争用。

use super::config::SimConfig;
use super::control::{Controller, NeverPause, RunOutcome};
use super::error::{Deadlock, SimError};
use super::event::Event;
use super::output::{Schedule, TrainRun, TrainRunSection};
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use crate::dispatch::Dispatcher;
use crate::rail::{Network, NodeId, ResourceId, SectionId, Train, TrainId};
use crate::viz::{
    VizEvent, VizEventKind, VizLogger, VizNodeInfo, VizResourceInfo, VizTrainInfo,
};
use std::collections::{BTreeSet, BinaryHeap};
use tracing::{debug, info, trace, warn};

/// 列车运行仿真器
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,

    network: Network,
    trains: Vec<Train>,
    dispatcher: Box<dyn Dispatcher>,
    config: SimConfig,

    /// 下一次周期性状态日志的时间水位
    next_report: Option<SimTime>,
    waiting: BTreeSet<TrainId>,
    done: bool,
    /// 上次暂停时留在队首的 `EnterNode` 事件序列号，恢复时不再询问控制器
    resume_seq: Option<u64>,

    label: String,
    hash: i64,
    pub viz: Option<VizLogger>,
}

impl Simulator {
    /// 创建仿真器并立即初始化（播种每列车的起始事件）。
    ///
    /// `trains[i]` 的 id 必须是 `TrainId(i)`。
    pub fn new(
        network: Network,
        trains: Vec<Train>,
        dispatcher: impl Dispatcher + 'static,
        config: SimConfig,
    ) -> Self {
        let mut sim = Self {
            now: SimTime::ZERO,
            next_seq: 0,
            q: BinaryHeap::new(),
            network,
            trains,
            dispatcher: Box::new(dispatcher),
            config,
            next_report: None,
            waiting: BTreeSet::new(),
            done: false,
            resume_seq: None,
            label: String::new(),
            hash: 0,
            viz: None,
        };
        sim.initialize();
        sim
    }

    /// 设置输出中的实例标签与哈希。
    pub fn with_instance(mut self, label: impl Into<String>, hash: i64) -> Self {
        self.label = label.into();
        self.hash = hash;
        self
    }

    /// 开启事件轨迹记录，并重新初始化以写入元信息。
    pub fn with_viz(mut self) -> Self {
        self.viz = Some(VizLogger::default());
        self.initialize();
        self
    }

    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn train(&self, id: TrainId) -> Result<&Train, SimError> {
        self.trains.get(id.0).ok_or(SimError::UnknownTrain(id))
    }

    fn train_mut(&mut self, id: TrainId) -> Result<&mut Train, SimError> {
        self.trains.get_mut(id.0).ok_or(SimError::UnknownTrain(id))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn dispatcher_mut(&mut self) -> &mut dyn Dispatcher {
        self.dispatcher.as_mut()
    }

    /// 当前正在等待可用区段的列车
    pub fn waiting(&self) -> &BTreeSet<TrainId> {
        &self.waiting
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn pending_events(&self) -> usize {
        self.q.len()
    }

    /// 队首事件（不出队）
    pub fn peek(&self) -> Option<&ScheduledEvent> {
        self.q.peek()
    }

    pub fn completed_trains(&self) -> usize {
        self.trains.iter().filter(|t| t.solution.is_done()).count()
    }

    /// 所有列车目标函数之和
    pub fn compute_score(&self) -> f64 {
        self.trains
            .iter()
            .map(|t| t.solution.compute_objective(&self.network))
            .sum()
    }

    /// 重建事件队列与资源-区段链接，清空运行状态，并为每列车播种起始事件。
    ///
    /// 资源占用状态不在此重置，见 `free_all_resources`。
    pub fn initialize(&mut self) {
        self.q = BinaryHeap::new();
        self.next_seq = 0;
        self.now = SimTime::ZERO;
        self.next_report = None;
        self.waiting.clear();
        self.done = false;
        self.resume_seq = None;

        self.network.link_sections();
        for train in &mut self.trains {
            train.solution.clear();
            train.set_position(None);
        }
        let starts: Vec<Event> = self.trains.iter().map(Train::start_event).collect();
        for ev in starts {
            self.schedule(ev);
        }

        if let Some(viz) = self.viz.as_mut() {
            viz.clear();
        }
        self.emit_viz_meta();
        debug!(trains = self.trains.len(), queue_size = self.q.len(), "仿真已初始化");
    }

    /// 所有资源恢复为空闲。
    pub fn free_all_resources(&mut self) {
        self.network.free_all_resources();
    }

    /// 重试前的完整重置：释放资源并重新初始化。
    pub fn reset(&mut self) {
        self.free_all_resources();
        self.initialize();
    }

    /// 调度事件（按事件自带时间）
    pub fn schedule(&mut self, ev: Event) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        let at = ev.time();
        trace!(now = %self.now, at = %at, seq, kind = ?ev.kind(), "调度事件");
        self.q.push(ScheduledEvent { at, seq, ev });
    }

    /// 运行直到事件队列为空。
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        self.run_with(&mut NeverPause)
    }

    /// 运行直到事件队列为空，或控制器要求在某个 `EnterNode` 之前暂停。
    #[tracing::instrument(skip(self, controller), fields(label = %self.label))]
    pub fn run_with(&mut self, controller: &mut dyn Controller) -> Result<RunOutcome, SimError> {
        info!(queue_size = self.q.len(), "▶️  开始运行仿真");

        loop {
            let Some(top) = self.q.peek() else {
                break;
            };
            let (at, seq) = (top.at, top.seq);
            if let Event::EnterNode { train, node, .. } = top.ev {
                if self.resume_seq != Some(seq) {
                    let t = self.train(train)?;
                    if controller.pause_before(t, node, at) {
                        debug!(%train, node = %node, at = %at, "控制器请求暂停");
                        self.resume_seq = Some(seq);
                        return Ok(RunOutcome::Paused { at, train, node });
                    }
                }
            }

            let Some(item) = self.q.pop() else {
                break;
            };
            self.resume_seq = None;
            self.run_next(item)?;
        }

        self.done = true;
        let outcome = RunOutcome::Completed {
            end: self.now,
            score: self.compute_score(),
            completed: self.completed_trains(),
            total: self.trains.len(),
        };
        info!(final_time = %self.now, ?outcome, "✅ 仿真完成");
        Ok(outcome)
    }

    /// 只执行队首的一个事件；队列为空时返回 `None`。
    pub fn step(&mut self) -> Result<Option<SimTime>, SimError> {
        let Some(item) = self.q.pop() else {
            self.done = true;
            return Ok(None);
        };
        let at = item.at;
        self.resume_seq = None;
        self.run_next(item)?;
        Ok(Some(at))
    }

    fn run_next(&mut self, item: ScheduledEvent) -> Result<(), SimError> {
        let ScheduledEvent { at, seq, ev } = item;
        if at > self.config.max_time {
            return Err(SimError::HorizonExceeded {
                time: at,
                max_time: self.config.max_time,
            });
        }
        self.now = at;
        self.report_progress(at);

        debug!(
            now = %at,
            seq,
            kind = ?ev.kind(),
            train = %ev.train(),
            remaining_queue = self.q.len(),
            "执行事件"
        );

        match ev {
            Event::EnterNode {
                time,
                train,
                node,
                previous_section,
            } => self.take_action(time, train, node, previous_section),
            Event::LeaveNode {
                time,
                train,
                previous_section,
                next_section,
                ..
            } => self.release_previous_section(time, train, previous_section, next_section),
            Event::ReleaseResource {
                train,
                resource,
                emitted_at,
                ..
            } => {
                self.free_resource(train, resource, emitted_at);
                Ok(())
            }
            Event::EnterStation {
                time,
                train,
                section,
            } => {
                let (stop, earliest_exit) = self
                    .network
                    .section(section)
                    .halt_requirement()
                    .map(|r| (r.min_stopping_time, r.exit_earliest.unwrap_or(SimTime::ZERO)))
                    .unwrap_or((SimTime::ZERO, SimTime::ZERO));
                let leave = earliest_exit.max(time.saturating_add(stop));
                self.viz_push(Some(train), VizEventKind::EnterStation { section: section.0 });
                self.schedule(Event::LeaveStation {
                    time: leave,
                    train,
                    section,
                });
                Ok(())
            }
            Event::LeaveStation {
                time,
                train,
                section,
            } => {
                self.viz_push(Some(train), VizEventKind::LeaveStation { section: section.0 });
                let end = self.network.section(section).end;
                self.schedule(Event::EnterNode {
                    time,
                    train,
                    node: end,
                    previous_section: Some(section),
                });
                Ok(())
            }
        }
    }

    /// 周期性状态日志：处理的事件时间越过水位时输出等待列车数与当前得分。
    fn report_progress(&mut self, at: SimTime) {
        match self.next_report {
            None => self.next_report = Some(at),
            Some(mark) if mark < at => {
                info!(
                    time = %at,
                    waiting = self.waiting.len(),
                    score = self.compute_score(),
                    "⏱️  运行状态"
                );
                self.next_report = Some(mark.saturating_add(self.config.report_interval));
            }
            Some(_) => {}
        }
    }

    /// 列车到达节点：终点则结束；否则交给调度器选择下一区段，或等待后重试。
    #[tracing::instrument(skip_all, fields(at = %at, train = %train_id, node = %node))]
    fn take_action(
        &mut self,
        at: SimTime,
        train_id: TrainId,
        node: NodeId,
        previous_section: Option<SectionId>,
    ) -> Result<(), SimError> {
        self.viz_push(Some(train_id), VizEventKind::EnterNode { node: node.0 });

        if self.network.node(node).is_terminal() {
            self.schedule(Event::LeaveNode {
                time: at,
                train: train_id,
                node,
                previous_section,
                next_section: None,
            });
            self.waiting.remove(&train_id);
            let train = self.train_mut(train_id)?;
            train.set_position(None);
            train.solution.leave_section(at);
            info!(train = %train.label(), "🏁 列车到达终点");
            self.viz_push(Some(train_id), VizEventKind::Done { node: node.0 });
            return Ok(());
        }

        self.train_mut(train_id)?.set_position(Some(node));
        let train = &self.trains[train_id.0];
        let mut candidates: Vec<Option<SectionId>> = train
            .get_next_free_sections(node, &self.network)
            .into_iter()
            .map(Some)
            .collect();
        if candidates.is_empty() {
            candidates.push(None);
        }
        let choice = self.dispatcher.choose(&candidates, train, &self.network);
        trace!(?candidates, ?choice, "调度器决策");

        let Some(section) = choice else {
            return self.wait(at, train_id, node, previous_section);
        };
        if !candidates.contains(&Some(section)) {
            return Err(SimError::InvalidChoice {
                train: train_id,
                section,
            });
        }

        self.waiting.remove(&train_id);
        let train = &mut self.trains[train_id.0];
        train.set_position(None);
        train.solution.enter_section(section, at);
        let occupations = self.network.section(section).occupations.clone();
        for rid in occupations {
            self.network.resource_mut(rid).enter(train_id, at)?;
        }
        debug!(section = %section, "进入区段");
        self.viz_push(
            Some(train_id),
            VizEventKind::EnterSection {
                node: node.0,
                section: section.0,
            },
        );

        self.schedule(Event::LeaveNode {
            time: at,
            train: train_id,
            node,
            previous_section,
            next_section: Some(section),
        });
        let next = self.next_event(train_id, section, at);
        self.schedule(next);
        Ok(())
    }

    /// 列车被阻挡：检查互相阻塞，否则登记等待并在 `retry_delay` 后重试。
    fn wait(
        &mut self,
        at: SimTime,
        train_id: TrainId,
        node: NodeId,
        previous_section: Option<SectionId>,
    ) -> Result<(), SimError> {
        let blockers = self.trains[train_id.0].blocked_by(&self.network);
        for &other in &blockers {
            if self.train(other)?.blocked_by(&self.network).contains(&train_id) {
                let deadlock = Deadlock {
                    time: at,
                    train: train_id,
                    other,
                    completed: self.completed_trains(),
                    total: self.trains.len(),
                };
                warn!(
                    train = %train_id,
                    other = %other,
                    completed = deadlock.completed,
                    total = deadlock.total,
                    "⛔ 互相阻塞"
                );
                return Err(SimError::MutualBlocking(deadlock));
            }
        }

        self.waiting.insert(train_id);
        debug!(?blockers, waiting = self.waiting.len(), "无可用区段，等待重试");
        self.viz_push(
            Some(train_id),
            VizEventKind::Wait {
                node: node.0,
                blocked_by: blockers.iter().map(|t| t.0).collect(),
            },
        );
        self.schedule(Event::EnterNode {
            time: at.saturating_add(self.config.retry_delay),
            train: train_id,
            node,
            previous_section,
        });
        Ok(())
    }

    /// 进入区段后的下一个事件：停站要求则进站，否则在运行时间后到达终端节点。
    fn next_event(&self, train: TrainId, section: SectionId, now: SimTime) -> Event {
        let s = self.network.section(section);
        let next_time = now.saturating_add(s.minimum_running_time);
        if let Some(req) = s.halt_requirement() {
            let time = req.entry_earliest.unwrap_or(SimTime::ZERO).max(next_time);
            return Event::EnterStation {
                time,
                train,
                section,
            };
        }
        Event::EnterNode {
            time: next_time,
            train,
            node: s.end,
            previous_section: Some(section),
        }
    }

    /// 腾出上一区段的资源；下一区段继续使用的资源不释放。
    fn release_previous_section(
        &mut self,
        at: SimTime,
        train: TrainId,
        previous_section: Option<SectionId>,
        next_section: Option<SectionId>,
    ) -> Result<(), SimError> {
        let Some(previous) = previous_section else {
            return Ok(());
        };
        let occupations = self.network.section(previous).occupations.clone();
        for rid in occupations {
            if next_section.is_some_and(|next| self.network.section(next).uses(rid)) {
                continue;
            }
            let resource = self.network.resource_mut(rid);
            resource.exit(train, at)?;
            let release_at = at.saturating_add(resource.release_delay());
            self.viz_push(Some(train), VizEventKind::Vacate { resource: rid.0 });
            self.schedule(Event::ReleaseResource {
                time: release_at,
                train,
                resource: rid,
                emitted_at: at,
            });
        }
        Ok(())
    }

    fn free_resource(&mut self, train: TrainId, resource: ResourceId, emitted_at: SimTime) {
        let freed = self.network.resource_mut(resource).release(emitted_at);
        self.viz_push(
            Some(train),
            VizEventKind::Release {
                resource: resource.0,
                freed,
            },
        );
    }

    /// 生成时刻表输出
    pub fn create_output(&self) -> Schedule {
        let train_runs = self
            .trains
            .iter()
            .map(|train| TrainRun {
                service_intention_id: train.label().to_string(),
                train_run_sections: train
                    .solution
                    .sections()
                    .iter()
                    .map(|realized| {
                        let section = self.network.section(realized.section);
                        TrainRunSection {
                            entry_time: realized.entry_time.humanize(),
                            exit_time: realized.exit_time.map(SimTime::humanize),
                            route: train.label().to_string(),
                            route_section_id: section.name.clone(),
                            route_path: section.route_path.clone(),
                            section_requirement: section
                                .requirement
                                .as_ref()
                                .map(|r| r.marker.clone()),
                        }
                    })
                    .collect(),
            })
            .collect();

        Schedule {
            problem_instance_label: self.label.clone(),
            problem_instance_hash: self.hash,
            hash: self.hash,
            train_runs,
        }
    }

    fn viz_push(&mut self, train: Option<TrainId>, kind: VizEventKind) {
        if let Some(viz) = self.viz.as_mut() {
            viz.push(VizEvent {
                t_s: self.now.0,
                train: train.map(|t| t.0),
                kind,
            });
        }
    }

    /// 写入实例元信息（作为第一条轨迹事件）
    fn emit_viz_meta(&mut self) {
        if self.viz.is_none() {
            return;
        }
        let nodes = self
            .network
            .nodes()
            .iter()
            .map(|n| VizNodeInfo {
                id: n.id().0,
                label: n.label().to_string(),
                terminal: n.is_terminal(),
            })
            .collect();
        let resources = self
            .network
            .resources()
            .iter()
            .map(|r| VizResourceInfo {
                id: r.id().0,
                name: r.name().to_string(),
                release_delay_s: r.release_delay().0,
            })
            .collect();
        let trains = self
            .trains
            .iter()
            .map(|t| VizTrainInfo {
                id: t.id().0,
                label: t.label().to_string(),
                sections: t.sections().len(),
            })
            .collect();
        self.viz_push(
            None,
            VizEventKind::Meta {
                nodes,
                resources,
                trains,
            },
        );
    }
}
