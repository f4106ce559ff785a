//! 问题实例
//!
//! JSON 格式的线网与列车数据及其加载器。

mod load;
mod spec;

pub use load::{Instance, InstanceError};
pub use spec::{DurationSpec, InstanceSpec, RequirementSpec, ResourceSpec, SectionSpec, TrainSpec};
