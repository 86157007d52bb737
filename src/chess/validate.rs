//! 着法校验：合法则给出新局面，非法则给出可行动的拒绝文本
//!
//! 校验失败不是致命错误：拒绝文本会成为工具结果回到对话里，
//! 让 LLM 在下一个推理步骤自行纠正。

use crate::chess::position::{self, ChessError};

/// 拒绝文本中列举的合法着法上限
const LEGAL_MOVE_SAMPLE: usize = 10;

/// 校验结果：接受（规范着法 + 新局面）或拒绝（原因文本）
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted {
        canonical_move: String,
        new_position: String,
    },
    Rejected {
        reason: String,
    },
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

/// 校验 mv 在 fen 下是否合法。从不 panic：格式错误与非法着法都变成 Rejected。
pub fn validate(mv: &str, fen: &str) -> MoveOutcome {
    let mv = mv.trim();
    match position::apply(fen, mv) {
        Ok(new_position) => MoveOutcome::Accepted {
            canonical_move: mv.to_string(),
            new_position,
        },
        Err(ChessError::IllegalMove { .. }) => MoveOutcome::Rejected {
            reason: illegal_move_reason(mv, fen),
        },
        Err(e) => MoveOutcome::Rejected {
            reason: format!("ERROR: {e}"),
        },
    }
}

/// 非法着法的拒绝文本：附合法着法样例（至多 10 个，更多时加省略号）
fn illegal_move_reason(mv: &str, fen: &str) -> String {
    let legal = position::legal_moves(fen).unwrap_or_default();
    let mut sample = legal
        .iter()
        .take(LEGAL_MOVE_SAMPLE)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if legal.len() > LEGAL_MOVE_SAMPLE {
        sample.push_str(", ...");
    }
    format!(
        "ERROR: Illegal move '{mv}' in position {fen}. Legal moves include: {sample}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::STARTING_FEN;

    #[test]
    fn test_validate_accepts_legal_move() {
        match validate("e2e4", STARTING_FEN) {
            MoveOutcome::Accepted {
                canonical_move,
                new_position,
            } => {
                assert_eq!(canonical_move, "e2e4");
                assert!(new_position.contains(" b "));
            }
            MoveOutcome::Rejected { reason } => panic!("unexpected rejection: {reason}"),
        }
    }

    #[test]
    fn test_validate_rejects_illegal_move_with_hints() {
        match validate("e2e5", STARTING_FEN) {
            MoveOutcome::Rejected { reason } => {
                assert!(reason.contains("Illegal move 'e2e5'"));
                assert!(reason.contains("Legal moves include:"));
                // 起始局面有 20 个合法着法，样例被截断
                assert!(reason.ends_with(", ..."));
            }
            MoveOutcome::Accepted { .. } => panic!("e2e5 should be rejected"),
        }
    }

    #[test]
    fn test_validate_rejects_malformed_move() {
        match validate("pawn takes e4", STARTING_FEN) {
            MoveOutcome::Rejected { reason } => {
                assert!(reason.contains("Invalid move format"));
            }
            MoveOutcome::Accepted { .. } => panic!("garbage should be rejected"),
        }
    }

    #[test]
    fn test_validate_accepts_promotion() {
        let fen = "7k/4P3/8/8/8/8/8/4K3 w - - 0 1";
        match validate("e7e8q", fen) {
            MoveOutcome::Accepted { new_position, .. } => {
                let placement = new_position.split(' ').next().unwrap();
                assert!(placement.contains('Q'));
                assert!(!placement.contains('P'));
            }
            MoveOutcome::Rejected { reason } => panic!("unexpected rejection: {reason}"),
        }
    }

    #[test]
    fn test_short_legal_move_list_has_no_ellipsis() {
        // 只王对只王加一兵的残局，合法着法不超过 10 个
        let fen = "7k/8/8/8/8/8/7P/7K b - - 0 1";
        match validate("h8h1", fen) {
            MoveOutcome::Rejected { reason } => {
                assert!(!reason.contains("..."));
            }
            MoveOutcome::Accepted { .. } => panic!("h8h1 should be rejected"),
        }
    }
}
