//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件：仿真时间、事件、调度队列与仿真器，
//! 以及错误类型、运行参数、外部控制钩子和时刻表输出。

// 子模块声明
mod config;
mod control;
mod error;
mod event;
mod output;
mod scheduled_event;
mod simulator;
mod time;

// 重新导出公共接口
pub use config::SimConfig;
pub use control::{Controller, NeverPause, RunOutcome};
pub use error::{Deadlock, ResourceError, SimError};
pub use event::{Event, EventKind};
pub use output::{Schedule, TrainRun, TrainRunSection};
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
