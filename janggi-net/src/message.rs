use serde::{Deserialize, Serialize};

use janggi_core::Game;

/// A message exchanged between the two players.
///
/// Coordinates travel as algebraic strings so a peer that ignores the
/// snapshot can still replay moves through [`Game::make_move`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Full game snapshot. The host sends one when the connection opens.
    Sync { game: Game },
    Move { source: String, destination: String },
    /// The sender is leaving.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_tags() {
        let json = serde_json::to_string(&Message::Quit).unwrap();
        assert_eq!(json, r#"{"type":"quit"}"#);

        let json = serde_json::to_string(&Message::Move {
            source: "E7".to_string(),
            destination: "E6".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"move","source":"E7","destination":"E6"}"#);
    }

    #[test]
    fn test_sync_carries_game() {
        let mut game = Game::new();
        assert!(game.make_move("A7", "B7"));

        let json = serde_json::to_string(&Message::Sync { game: game.clone() }).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Message::Sync { game });
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<Message>(r#"{"type":"resign"}"#).is_err());
    }
}
