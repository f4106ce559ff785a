//! 可视化事件记录（用于离线回放）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：不引入复杂依赖/运行时服务
//! - **可回放**：支持按时间轴逐条重放，按列车/资源过滤

mod types;

pub use types::{VizEvent, VizEventKind, VizLogger, VizNodeInfo, VizResourceInfo, VizTrainInfo};
