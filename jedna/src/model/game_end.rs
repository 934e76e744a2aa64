//! Terminal report of a finished game ([`GameEnd`]).

use jedna_elements::prelude::*;

/// Minimum score awarded to the winner of a game.
pub const MIN_GAME_SCORE: u32 = 30;

/// How a game ended and what it was worth.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameEnd {
    /// The player whose hand emptied.
    pub winner: PlayerId,

    /// Sum of every other hand's value, before the floor.
    pub raw_score: u32,

    /// Awarded score: `max(raw_score, MIN_GAME_SCORE)`.
    pub score: u32,

    /// Remaining hand value per player, in seating order at game end. The
    /// winner's entry is 0.
    pub hand_values: Vec<(PlayerId, u32)>,
}

impl GameEnd {
    pub fn from_hands(winner: PlayerId, players: &[Player]) -> GameEnd {
        let hand_values: Vec<(PlayerId, u32)> =
            players.iter().map(|p| (p.id.clone(), p.hand.value())).collect();
        let raw_score = hand_values.iter().map(|(_, v)| v).sum();
        GameEnd {
            winner,
            raw_score,
            score: raw_score.max(MIN_GAME_SCORE),
            hand_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use jedna_elements::card::c;

    #[test]
    fn score_floor_applies_to_small_pots() {
        let mut loser = Player::new("p2");
        loser.hand.add(c!("b5"));
        let players = [Player::new("p1"), loser];

        let end = GameEnd::from_hands("p1".into(), &players);
        assert_eq!(end.raw_score, 5);
        assert_eq!(end.score, 30);
    }

    #[test]
    fn score_above_floor_is_kept() {
        let mut loser = Player::new("p2");
        loser.hand.add_all([c!("wd4"), c!("w")]);
        let players = [Player::new("p1"), loser];

        let end = GameEnd::from_hands("p1".into(), &players);
        assert_eq!(end.raw_score, 100);
        assert_eq!(end.score, 100);
    }

    #[test]
    fn empty_loser_hands_still_pay_the_floor() {
        let players = [Player::new("p1"), Player::new("p2")];
        let end = GameEnd::from_hands("p1".into(), &players);
        assert_eq!(end.raw_score, 0);
        assert_eq!(end.score, 30);
    }
}
