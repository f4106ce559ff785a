//! 仿真参数

use super::time::SimTime;

/// 仿真参数
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// 列车无可用区段时，重新尝试进入节点的间隔
    pub retry_delay: SimTime,
    /// 周期性状态日志的仿真时间间隔
    pub report_interval: SimTime,
    /// 事件时间超过该值即判定仿真失控
    pub max_time: SimTime,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            retry_delay: SimTime::from_secs(30),
            report_interval: SimTime::from_mins(10),
            max_time: SimTime::from_hours(10),
        }
    }
}
