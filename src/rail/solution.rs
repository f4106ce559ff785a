//! 列车解
//!
//! 记录每列车实际经过的区段及进入/离开时刻，并据此计算目标函数。

use super::id::SectionId;
use super::network::Network;
use crate::sim::SimTime;

/// 一条已实现的区段记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealizedSection {
    pub section: SectionId,
    pub entry_time: SimTime,
    /// 列车进入下一区段（或到达终点）时填入
    pub exit_time: Option<SimTime>,
}

/// 单列车的解记录器
#[derive(Debug, Clone, Default)]
pub struct Solution {
    sections: Vec<RealizedSection>,
    done: bool,
}

impl Solution {
    /// 进入新区段；上一条仍未关闭的区段在同一时刻离开。
    pub fn enter_section(&mut self, section: SectionId, entry_time: SimTime) {
        self.close_open(entry_time);
        self.sections.push(RealizedSection {
            section,
            entry_time,
            exit_time: None,
        });
    }

    /// 到达终点：关闭最后一条区段并标记完成。
    pub fn leave_section(&mut self, exit_time: SimTime) {
        self.close_open(exit_time);
        self.done = true;
    }

    fn close_open(&mut self, at: SimTime) {
        if let Some(last) = self.sections.last_mut() {
            if last.exit_time.is_none() {
                last.exit_time = Some(at);
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn sections(&self) -> &[RealizedSection] {
        &self.sections
    }

    pub fn clear(&mut self) {
        self.sections.clear();
        self.done = false;
    }

    /// 目标函数（分钟）：各时刻要求的加权超时之和，加上选路惩罚。
    pub fn compute_objective(&self, network: &Network) -> f64 {
        let mut score = 0.0;
        for realized in &self.sections {
            let section = network.section(realized.section);
            score += section.penalty;
            let Some(req) = &section.requirement else {
                continue;
            };
            if let Some(latest) = req.entry_latest {
                let late = realized.entry_time.saturating_sub(latest);
                score += req.entry_delay_weight * late.secs() as f64 / 60.0;
            }
            if let (Some(latest), Some(exit)) = (req.exit_latest, realized.exit_time) {
                let late = exit.saturating_sub(latest);
                score += req.exit_delay_weight * late.secs() as f64 / 60.0;
            }
        }
        score
    }
}
