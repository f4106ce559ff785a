//! 线网模块
//!
//! 轨道资源、拓扑节点、区段、列车及其解。

mod id;
mod network;
mod node;
mod resource;
mod section;
mod solution;
mod train;

pub use id::{NodeId, ResourceId, SectionId, TrainId};
pub use network::Network;
pub use node::Node;
pub use resource::Resource;
pub use section::{Requirement, RequirementKind, Section};
pub use solution::{RealizedSection, Solution};
pub use train::Train;
