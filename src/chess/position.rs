//! 局面跟踪：FEN 上应用 UCI 着法
//!
//! apply 是纯函数，不持有状态；新局面由调用方（Tool Dispatcher）写回
//! ConversationState。着法记法为 <from><to>[promotion]，王车易位用王的
//! 移动表示（e1g1 / e1c1 / e8g8 / e8c8）。

use shakmaty::fen::Fen;
use shakmaty::uci::Uci;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};
use thiserror::Error;

/// 标准起始局面
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// 局面/着法错误：FEN 不可读、着法格式错误、着法不合法
#[derive(Error, Debug)]
pub enum ChessError {
    #[error("Invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("Invalid move format '{mv}': {reason}")]
    MalformedMove { mv: String, reason: String },

    #[error("Illegal move: {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },
}

/// 解析 FEN 为规则引擎局面
fn parse_position(fen: &str) -> Result<Chess, ChessError> {
    let setup: Fen = fen
        .parse()
        .map_err(|e| ChessError::InvalidFen(format!("{e}")))?;
    setup
        .into_position(CastlingMode::Standard)
        .map_err(|e| ChessError::InvalidFen(format!("{e}")))
}

/// 在 fen 上应用 UCI 着法，返回新局面 FEN。
/// 着法不在合法集内返回 IllegalMove，不可解析返回 MalformedMove。
pub fn apply(fen: &str, mv: &str) -> Result<String, ChessError> {
    let pos = parse_position(fen)?;
    let uci: Uci = mv.parse().map_err(|e| ChessError::MalformedMove {
        mv: mv.to_string(),
        reason: format!("{e}"),
    })?;
    let chess_move = uci.to_move(&pos).map_err(|_| ChessError::IllegalMove {
        mv: mv.to_string(),
        fen: fen.to_string(),
    })?;
    let next = pos.play(&chess_move).map_err(|_| ChessError::IllegalMove {
        mv: mv.to_string(),
        fen: fen.to_string(),
    })?;
    Ok(Fen::from_position(next, EnPassantMode::Legal).to_string())
}

/// 局面的合法着法集（UCI 文本，规则引擎的稳定顺序）
pub fn legal_moves(fen: &str) -> Result<Vec<String>, ChessError> {
    let pos = parse_position(fen)?;
    Ok(pos
        .legal_moves()
        .iter()
        .map(|m| m.to_uci(CastlingMode::Standard).to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_opening_move() {
        let next = apply(STARTING_FEN, "e2e4").unwrap();
        let fields: Vec<&str> = next.split(' ').collect();
        assert_eq!(fields.len(), 6);
        // 轮到黑方，e4 有子（第 4 横排含 "4P3"）
        assert_eq!(fields[1], "b");
        assert_eq!(fields[0], "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
    }

    #[test]
    fn test_apply_rejects_illegal_move() {
        let err = apply(STARTING_FEN, "e2e5").unwrap_err();
        assert!(matches!(err, ChessError::IllegalMove { .. }));
    }

    #[test]
    fn test_apply_rejects_malformed_move() {
        let err = apply(STARTING_FEN, "knight to f3").unwrap_err();
        assert!(matches!(err, ChessError::MalformedMove { .. }));
    }

    #[test]
    fn test_apply_promotion() {
        let fen = "7k/4P3/8/8/8/8/8/4K3 w - - 0 1";
        let next = apply(fen, "e7e8q").unwrap();
        let placement = next.split(' ').next().unwrap();
        assert!(placement.starts_with("4Q2k"));
        assert!(!placement.contains('P'));
    }

    #[test]
    fn test_apply_castling_as_king_move() {
        let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
        let next = apply(fen, "e1g1").unwrap();
        let placement = next.split(' ').next().unwrap();
        // 王到 g1、车到 f1
        assert!(placement.ends_with("R4RK1"));
    }

    #[test]
    fn test_apply_is_deterministic() {
        let moves = ["e2e4", "e7e5", "g1f3", "b8c6"];
        let replay = || {
            let mut fen = STARTING_FEN.to_string();
            for mv in moves {
                fen = apply(&fen, mv).unwrap();
            }
            fen
        };
        assert_eq!(replay(), replay());
    }

    #[test]
    fn test_legal_moves_starting_position() {
        let moves = legal_moves(STARTING_FEN).unwrap();
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&"e2e4".to_string()));
        assert!(!moves.contains(&"e2e5".to_string()));
    }

    #[test]
    fn test_invalid_fen() {
        assert!(matches!(
            apply("not a fen", "e2e4"),
            Err(ChessError::InvalidFen(_))
        ));
    }
}
