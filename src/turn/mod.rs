//! 回合层：推理步骤与状态机循环

pub mod loop_;
pub mod planner;

pub use loop_::{TurnController, MAX_TURN_CYCLES};
pub use planner::Planner;
