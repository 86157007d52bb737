//! 工具箱：注册表、三个固定工具与分发器

pub mod best_move;
pub mod dispatcher;
pub mod moves;
pub mod registry;

pub use best_move::BestMoveTool;
pub use dispatcher::ToolDispatcher;
pub use moves::{CommitAgentMoveTool, RegisterHumanMoveTool};
pub use registry::{Tool, ToolRegistry};
