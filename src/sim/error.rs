//! 错误类型
//!
//! 资源不变量破坏、互相阻塞（死锁）与仿真失控等错误。

use crate::rail::{ResourceId, SectionId, TrainId};
use crate::sim::SimTime;
use std::fmt;
use thiserror::Error;

/// 资源状态机不变量被破坏：说明事件序列本身有 bug，不可在本次运行内恢复。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("resource {resource} is held by {holder}, {train} cannot enter")]
    AlreadyHeld {
        resource: ResourceId,
        holder: TrainId,
        train: TrainId,
    },
    #[error("resource {resource} is not occupied, {train} cannot exit")]
    NotHeld { resource: ResourceId, train: TrainId },
    #[error("resource {resource} was last held by {last_holder:?}, not {train}")]
    WrongHolder {
        resource: ResourceId,
        last_holder: Option<TrainId>,
        train: TrainId,
    },
}

/// 互相阻塞的诊断信息，供调用方记录进度并决定是否重试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadlock {
    pub time: SimTime,
    pub train: TrainId,
    pub other: TrainId,
    pub completed: usize,
    pub total: usize,
}

impl fmt::Display for Deadlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<->{} at {}: {}/{} trains done",
            self.train, self.other, self.time, self.completed, self.total
        )
    }
}

/// 仿真运行错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("mutual blocking {0}")]
    MutualBlocking(Deadlock),
    #[error("event at {time} exceeds max simulated time {max_time}")]
    HorizonExceeded { time: SimTime, max_time: SimTime },
    #[error("dispatcher chose {section} for {train}, which was not offered")]
    InvalidChoice { train: TrainId, section: SectionId },
    #[error("unknown train {0}")]
    UnknownTrain(TrainId),
}

impl SimError {
    /// 是否为调用方可重试的阻塞类错误。
    pub fn is_blocking(&self) -> bool {
        matches!(self, SimError::MutualBlocking(_))
    }

    pub fn deadlock(&self) -> Option<&Deadlock> {
        match self {
            SimError::MutualBlocking(d) => Some(d),
            _ => None,
        }
    }
}
