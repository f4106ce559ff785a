//! 实例加载
//!
//! 把 `InstanceSpec` 转换为线网 arena 与列车列表。

use super::spec::{DurationSpec, InstanceSpec, RequirementSpec};
use crate::dispatch::Dispatcher;
use crate::rail::{Network, Requirement, RequirementKind, Train, TrainId};
use crate::sim::{SimConfig, SimTime, Simulator};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 实例加载错误
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid instance json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid time {value:?}: {source}")]
    BadTime {
        value: String,
        source: chrono::ParseError,
    },
    #[error("invalid duration {0:?}")]
    BadDuration(DurationSpec),
    #[error("train {train} section {section} uses unknown resource {resource}")]
    UnknownResource {
        train: String,
        section: String,
        resource: String,
    },
    #[error("train {train} starts at unknown node {node}")]
    UnknownNode { train: String, node: String },
    #[error("train {0} has no sections")]
    EmptyTrain(String),
}

/// 加载后的实例
#[derive(Debug, Clone)]
pub struct Instance {
    pub label: String,
    pub hash: i64,
    pub network: Network,
    pub trains: Vec<Train>,
}

impl Instance {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| InstanceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, InstanceError> {
        let spec: InstanceSpec = serde_json::from_str(raw)?;
        Self::from_spec(&spec)
    }

    pub fn from_spec(spec: &InstanceSpec) -> Result<Self, InstanceError> {
        let mut network = Network::default();
        for r in &spec.resources {
            network.add_resource(&r.id, duration(&r.release_time)?, r.following_allowed);
        }

        let mut trains = Vec::with_capacity(spec.trains.len());
        for (idx, ts) in spec.trains.iter().enumerate() {
            let train_id = TrainId(idx);
            let first = ts
                .sections
                .first()
                .ok_or_else(|| InstanceError::EmptyTrain(ts.id.clone()))?;
            let earliest_start = parse_opt_time(ts.earliest_start.as_deref())?.unwrap_or(SimTime::ZERO);

            let mut section_ids = Vec::with_capacity(ts.sections.len());
            for ss in &ts.sections {
                let mut occupations = Vec::with_capacity(ss.resource_occupations.len());
                for name in &ss.resource_occupations {
                    let rid = network.resource_by_name(name).ok_or_else(|| {
                        InstanceError::UnknownResource {
                            train: ts.id.clone(),
                            section: ss.id.clone(),
                            resource: name.clone(),
                        }
                    })?;
                    occupations.push(rid);
                }
                let from = network.add_route_node(train_id, &ss.from);
                let to = network.add_route_node(train_id, &ss.to);
                let sid = network.add_section(
                    train_id,
                    from,
                    to,
                    duration(&ss.minimum_running_time)?,
                    occupations,
                );
                let requirement = ss.requirement.as_ref().map(build_requirement).transpose()?;
                let section = network.section_mut(sid);
                section.name = ss.id.clone();
                section.route_path = ss.route_path.clone().unwrap_or_else(|| ss.id.clone());
                section.penalty = ss.penalty;
                section.requirement = requirement;
                section_ids.push(sid);
            }

            let start_label = ts.start_node.as_deref().unwrap_or(first.from.as_str());
            let start = network
                .route_node(train_id, start_label)
                .ok_or_else(|| InstanceError::UnknownNode {
                    train: ts.id.clone(),
                    node: start_label.to_string(),
                })?;
            let mut train = Train::new(train_id, ts.id.clone(), start, earliest_start);
            for sid in section_ids {
                train.add_section(sid);
            }
            debug!(train = %ts.id, sections = ts.sections.len(), start = %start_label, "加载列车");
            trains.push(train);
        }

        network.link_sections();
        info!(
            label = %spec.label,
            resources = network.resources().len(),
            nodes = network.nodes().len(),
            sections = network.sections().len(),
            trains = trains.len(),
            "📦 实例已加载"
        );
        Ok(Self {
            label: spec.label.clone(),
            hash: spec.hash,
            network,
            trains,
        })
    }

    /// 用该实例构造仿真器
    pub fn into_simulator(
        self,
        dispatcher: impl Dispatcher + 'static,
        config: SimConfig,
    ) -> Simulator {
        Simulator::new(self.network, self.trains, dispatcher, config)
            .with_instance(self.label, self.hash)
    }
}

fn parse_opt_time(value: Option<&str>) -> Result<Option<SimTime>, InstanceError> {
    value
        .map(|v| {
            SimTime::parse_hms(v).map_err(|source| InstanceError::BadTime {
                value: v.to_string(),
                source,
            })
        })
        .transpose()
}

fn duration(spec: &DurationSpec) -> Result<SimTime, InstanceError> {
    spec.to_secs()
        .map(SimTime::from_secs)
        .ok_or_else(|| InstanceError::BadDuration(spec.clone()))
}

fn build_requirement(spec: &RequirementSpec) -> Result<Requirement, InstanceError> {
    let min_stopping_time = duration(&spec.min_stopping_time)?;
    let kind = if min_stopping_time > SimTime::ZERO {
        RequirementKind::Halt
    } else {
        RequirementKind::Pass
    };
    Ok(Requirement {
        marker: spec.marker.clone(),
        kind,
        entry_earliest: parse_opt_time(spec.entry_earliest.as_deref())?,
        entry_latest: parse_opt_time(spec.entry_latest.as_deref())?,
        exit_earliest: parse_opt_time(spec.exit_earliest.as_deref())?,
        exit_latest: parse_opt_time(spec.exit_latest.as_deref())?,
        min_stopping_time,
        entry_delay_weight: spec.entry_delay_weight,
        exit_delay_weight: spec.exit_delay_weight,
    })
}
