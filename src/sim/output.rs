//! 时刻表输出
//!
//! 每列车按顺序列出经过的区段及进出时刻，附带实例标识。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub problem_instance_label: String,
    pub problem_instance_hash: i64,
    pub hash: i64,
    pub train_runs: Vec<TrainRun>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRun {
    pub service_intention_id: String,
    pub train_run_sections: Vec<TrainRunSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRunSection {
    pub entry_time: String,
    /// 未到达终点的列车，最后一条区段没有离开时刻
    pub exit_time: Option<String>,
    pub route: String,
    pub route_section_id: String,
    pub route_path: String,
    pub section_requirement: Option<String>,
}
