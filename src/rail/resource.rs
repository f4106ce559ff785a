//! 资源类型
//!
//! 一段需要独占使用的轨道。列车离开后须经过 `release_delay`（追踪间隔）
//! 才能被另一列车占用；同一列车可以直接重新进入。

use super::id::{ResourceId, SectionId, TrainId};
use crate::sim::{ResourceError, SimTime};
use tracing::trace;

/// 轨道资源及其占用状态
#[derive(Debug, Clone)]
pub struct Resource {
    id: ResourceId,
    name: String,
    release_delay: SimTime,
    /// 数据中存在；当前所有实例均为 false，即离开后总要等满 `release_delay`。
    following_allowed: bool,
    /// 使用该资源的区段（由 `Network::link_sections` 重建）
    pub(crate) sections: Vec<SectionId>,

    free: bool,
    current_holder: Option<TrainId>,
    last_holder: Option<TrainId>,
    last_vacate_time: Option<SimTime>,
}

impl Resource {
    pub fn new(
        id: ResourceId,
        name: impl Into<String>,
        release_delay: SimTime,
        following_allowed: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            release_delay,
            following_allowed,
            sections: Vec::new(),
            free: true,
            current_holder: None,
            last_holder: None,
            last_vacate_time: None,
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn release_delay(&self) -> SimTime {
        self.release_delay
    }

    pub fn following_allowed(&self) -> bool {
        self.following_allowed
    }

    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn current_holder(&self) -> Option<TrainId> {
        self.current_holder
    }

    pub fn last_holder(&self) -> Option<TrainId> {
        self.last_holder
    }

    pub fn last_vacate_time(&self) -> Option<SimTime> {
        self.last_vacate_time
    }

    /// 资源对 `train` 是否可用：空闲，或最后使用者就是它自己。
    pub fn is_free_for(&self, train: TrainId) -> bool {
        self.free || self.last_holder == Some(train)
    }

    /// 列车占用资源。允许同一列车重入；不同列车同时占用属于不变量破坏。
    pub fn enter(&mut self, train: TrainId, at: SimTime) -> Result<(), ResourceError> {
        match self.current_holder {
            Some(holder) if holder != train => {
                return Err(ResourceError::AlreadyHeld {
                    resource: self.id,
                    holder,
                    train,
                });
            }
            _ => {}
        }
        trace!(resource = %self.name, %train, at = %at, "占用资源");
        self.free = false;
        self.current_holder = Some(train);
        self.last_holder = Some(train);
        Ok(())
    }

    /// 列车离开资源：清除持有者并记录离开时间，资源此时仍不空闲。
    pub fn exit(&mut self, train: TrainId, at: SimTime) -> Result<(), ResourceError> {
        if self.free {
            return Err(ResourceError::NotHeld {
                resource: self.id,
                train,
            });
        }
        if self.last_holder != Some(train) {
            return Err(ResourceError::WrongHolder {
                resource: self.id,
                last_holder: self.last_holder,
                train,
            });
        }
        trace!(resource = %self.name, %train, at = %at, "离开资源");
        self.current_holder = None;
        self.last_vacate_time = Some(at);
        Ok(())
    }

    /// 延迟释放检查：`release_time` 不早于最近一次离开时间且无人持有时才置为空闲。
    ///
    /// 返回本次调用是否让资源变为空闲。
    pub fn release(&mut self, release_time: SimTime) -> bool {
        let Some(vacated) = self.last_vacate_time else {
            return false;
        };
        if release_time < vacated || self.current_holder.is_some() || self.free {
            return false;
        }
        trace!(resource = %self.name, release_time = %release_time, "资源释放");
        self.free = true;
        true
    }

    /// 重置占用状态（重新运行前调用）。
    pub fn reset(&mut self) {
        self.free = true;
        self.current_holder = None;
        self.last_holder = None;
        self.last_vacate_time = None;
    }
}
