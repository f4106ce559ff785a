//! 仿真时间类型
//!
//! 定义仿真时间（秒）及其单位转换、人类可读格式。

use chrono::{NaiveTime, Timelike};
use std::fmt;

const SECS_PER_DAY: u64 = 86_400;

/// 仿真时间（秒，从运营日零点起算）。时长同样用 `SimTime` 表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn from_secs(s: u64) -> SimTime {
        SimTime(s)
    }
    pub fn from_mins(m: u64) -> SimTime {
        SimTime(m.saturating_mul(60))
    }
    pub fn from_hours(h: u64) -> SimTime {
        SimTime(h.saturating_mul(3_600))
    }

    pub fn secs(self) -> u64 {
        self.0
    }

    /// `self + d`，溢出时饱和。
    pub fn saturating_add(self, d: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(d.0))
    }

    /// `self - other`，不足时取 0。
    pub fn saturating_sub(self, other: SimTime) -> SimTime {
        SimTime(self.0.saturating_sub(other.0))
    }

    /// 格式化为 `HH:MM:SS`；超过一天时小时数继续累加（如 `25:00:00`）。
    pub fn humanize(self) -> String {
        if self.0 < SECS_PER_DAY {
            if let Some(t) = NaiveTime::from_num_seconds_from_midnight_opt(self.0 as u32, 0) {
                return t.format("%H:%M:%S").to_string();
            }
        }
        format!(
            "{:02}:{:02}:{:02}",
            self.0 / 3_600,
            (self.0 / 60) % 60,
            self.0 % 60
        )
    }

    /// 解析 `HH:MM:SS` 形式的时刻。
    pub fn parse_hms(s: &str) -> Result<SimTime, chrono::ParseError> {
        let t = NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")?;
        Ok(SimTime(u64::from(t.num_seconds_from_midnight())))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.humanize())
    }
}
