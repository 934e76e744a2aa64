//! The draw stack and the discard pile.
//!
//! Both are plain card stacks (top = end of the backing vector). The one piece
//! of shared logic is [`draw_with_reshuffle`]: when the draw stack runs dry,
//! everything under the discard's top card is scrubbed of chosen colors,
//! shuffled, and slid under the remaining deck.

use rand::seq::SliceRandom;
use rand::Rng;
use strum::IntoEnumIterator;

use crate::card::{Card, Color, Figure};

/// Size of the standard set: per non-wild color one 0 and two each of 1..9,
/// DrawTwo, Skip, Reverse; plus four Wild and four WildDrawFour.
pub const STANDARD_DECK_SIZE: usize = 108;

/// Face-down draw stack.
#[derive(Clone, Debug, Default)]
pub struct Deck(Vec<Card>);

impl Deck {
    pub fn empty() -> Deck {
        Deck(Vec::new())
    }

    /// Builds the standard 108-card set, unshuffled.
    pub fn standard() -> Deck {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
        for color in Color::iter().filter(|c| !c.is_wild()) {
            cards.push(Card::new(color, Figure::Digit(0)).unwrap());
            for n in 1..=9 {
                for _ in 0..2 {
                    cards.push(Card::new(color, Figure::Digit(n)).unwrap());
                }
            }
            for figure in [Figure::DrawTwo, Figure::Skip, Figure::Reverse] {
                for _ in 0..2 {
                    cards.push(Card::new(color, figure).unwrap());
                }
            }
        }
        for _ in 0..4 {
            cards.push(Card::wild());
            cards.push(Card::wild_draw_four());
        }
        Deck(cards)
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Deck {
        Deck(cards.into_iter().collect())
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.0.shuffle(rng);
    }

    /// Takes the top card, if any.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }

    /// Slides cards under the whole stack; the current top stays on top.
    pub fn place_under(&mut self, cards: impl IntoIterator<Item = Card>) {
        let mut bottom: Vec<Card> = cards.into_iter().collect();
        bottom.append(&mut self.0);
        self.0 = bottom;
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }
}

/// Face-up discard pile.
#[derive(Clone, Debug, Default)]
pub struct DiscardPile(Vec<Card>);

impl DiscardPile {
    pub fn new() -> DiscardPile {
        DiscardPile(Vec::new())
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> DiscardPile {
        DiscardPile(cards.into_iter().collect())
    }

    pub fn place(&mut self, card: Card) {
        self.0.push(card);
    }

    /// The most recently placed card.
    pub fn top(&self) -> Option<Card> {
        self.0.last().copied()
    }

    /// Removes everything under the top card, scrubbing chosen colors off
    /// recovered wilds. The top card stays.
    pub fn take_under_top(&mut self) -> Vec<Card> {
        if self.0.len() <= 1 {
            return Vec::new();
        }
        let top = self.0.pop().unwrap();
        let under = self.0.drain(..).map(Card::clear_color).collect();
        self.0.push(top);
        under
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }
}

/// Draws `n` cards, reshuffling the discard (minus its top card) under the
/// deck if the deck alone cannot cover the request. When even the combined
/// supply falls short, returns what exists; the caller continues play.
pub fn draw_with_reshuffle(
    deck: &mut Deck,
    discard: &mut DiscardPile,
    n: usize,
    rng: &mut impl Rng,
) -> Vec<Card> {
    if deck.len() < n {
        let mut recovered = discard.take_under_top();
        recovered.shuffle(rng);
        deck.place_under(recovered);
    }
    let mut drawn = Vec::with_capacity(n);
    for _ in 0..n {
        match deck.draw() {
            Some(card) => drawn.push(card),
            None => break,
        }
    }
    drawn
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::card::c;

    fn count_sorted(cards: impl IntoIterator<Item = Card>) -> Vec<(String, usize)> {
        cards
            .into_iter()
            .map(|card| card.to_string())
            .sorted()
            .dedup_with_count()
            .map(|(count, notation)| (notation, count))
            .collect()
    }

    #[test]
    fn standard_deck_composition() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), STANDARD_DECK_SIZE);

        let counts = count_sorted(deck.cards().iter().copied());
        for (notation, count) in &counts {
            let expected = match notation.as_str() {
                "w" | "wd4" => 4,
                n if n.ends_with('0') => 1,
                _ => 2,
            };
            assert_eq!(*count, expected, "wrong count for {notation}");
        }
        // 4 colors x (1 zero + 9 digits + 3 actions) + 2 wild kinds
        assert_eq!(counts.len(), 4 * 13 + 2);
    }

    #[test]
    fn draw_takes_from_the_top() {
        let mut deck = Deck::from_cards([c!("r1"), c!("r2"), c!("r3")]);
        assert_eq!(deck.draw(), Some(c!("r3")));
        assert_eq!(deck.draw(), Some(c!("r2")));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn place_under_keeps_top() {
        let mut deck = Deck::from_cards([c!("r1")]);
        deck.place_under([c!("b1"), c!("b2")]);
        assert_eq!(deck.draw(), Some(c!("r1")));
    }

    #[test]
    fn reshuffle_keeps_discard_top_and_conserves_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::from_cards([c!("r1")]);
        let mut discard =
            DiscardPile::from_cards([c!("g3"), c!("b8"), c!("y2"), c!("r5")]);

        let drawn = draw_with_reshuffle(&mut deck, &mut discard, 3, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert_eq!(discard.top(), Some(c!("r5")));
        assert_eq!(discard.len(), 1);
        // conservation: 5 cards in, 5 cards out
        assert_eq!(drawn.len() + deck.len() + discard.len(), 5);
    }

    #[test]
    fn reshuffle_scrubs_chosen_colors() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut deck = Deck::empty();
        let mut discard = DiscardPile::from_cards([
            Card::wild().with_color(Color::Red),
            Card::wild_draw_four().with_color(Color::Blue),
            c!("g4"),
        ]);

        let drawn = draw_with_reshuffle(&mut deck, &mut discard, 2, &mut rng);
        assert_eq!(drawn.len(), 2);
        for card in &drawn {
            if card.is_wild() {
                assert_eq!(card.color(), Color::Wild);
            }
        }
    }

    #[test]
    fn short_supply_returns_what_exists() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut deck = Deck::from_cards([c!("r1")]);
        let mut discard = DiscardPile::from_cards([c!("r5")]);

        // top card never leaves the discard, so only one card can be produced
        let drawn = draw_with_reshuffle(&mut deck, &mut discard, 4, &mut rng);
        assert_eq!(drawn, vec![c!("r1")]);
        assert_eq!(discard.top(), Some(c!("r5")));

        // and a completely dry table produces nothing
        let drawn = draw_with_reshuffle(&mut deck, &mut discard, 4, &mut rng);
        assert!(drawn.is_empty());
    }
}
