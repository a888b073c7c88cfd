// Flippable stitch reference cards

use crate::errors::{StitchError, StitchResult};
use crate::stitch::Stitch;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub front: String,
    pub back: String,
    pub flipped: bool,
}

impl Card {
    pub fn new(title: impl Into<String>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            front: front.into(),
            back: back.into(),
            flipped: false,
        }
    }

    /// Text on the side currently facing up
    pub fn visible_text(&self) -> &str {
        if self.flipped {
            &self.back
        } else {
            &self.front
        }
    }

    pub fn toggle(&mut self) {
        self.flipped = !self.flipped;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDeck {
    cards: Vec<Card>,
}

impl CardDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Flip a card over, returning whether it now shows its back
    pub fn flip(&mut self, index: usize) -> StitchResult<bool> {
        let card_count = self.cards.len();
        let card = self
            .cards
            .get_mut(index)
            .ok_or(StitchError::InvalidCard { index, card_count })?;
        card.toggle();
        debug!("🃏 Card '{}' flipped: {}", card.title, card.flipped);
        Ok(card.flipped)
    }
}

impl Default for CardDeck {
    /// One reference card per stitch in the palette
    fn default() -> Self {
        let cards = Stitch::ALL
            .iter()
            .map(|stitch| {
                let back = match stitch {
                    Stitch::Sc => "Insert hook, yarn over, pull up a loop, yarn over, pull through both loops.",
                    Stitch::Dc => "Yarn over, insert hook, pull up a loop, then (yarn over, pull through two) twice.",
                    Stitch::Hdc => "Yarn over, insert hook, pull up a loop, yarn over, pull through all three loops.",
                };
                Card::new(
                    stitch.label(),
                    format!("{} ({})", stitch.label(), stitch.tag()),
                    back,
                )
            })
            .collect();
        Self::new(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_toggles() {
        let mut deck = CardDeck::default();
        assert_eq!(deck.len(), 3);
        assert!(deck.flip(1).unwrap());
        assert_eq!(deck.cards()[1].visible_text(), deck.cards()[1].back);
        assert!(!deck.flip(1).unwrap());
        assert_eq!(deck.cards()[1].visible_text(), deck.cards()[1].front);
    }

    #[test]
    fn test_flip_unknown_card() {
        let mut deck = CardDeck::default();
        let err = deck.flip(7).unwrap_err();
        assert!(matches!(err, StitchError::InvalidCard { index: 7, card_count: 3 }));
    }
}
