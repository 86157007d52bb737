//! 棋局层：局面跟踪与着法校验
//!
//! 规则判定（合法着法集、走子应用）委托给 shakmaty，本层只做
//! FEN 文本 <-> 规则引擎的转换与校验结果的组织。

pub mod position;
pub mod validate;

pub use position::{apply, legal_moves, ChessError, STARTING_FEN};
pub use validate::{validate, MoveOutcome};
