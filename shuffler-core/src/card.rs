use crate::ShuffleError;
use std::fmt;
use std::str::FromStr;

/// The four suits, in the order a fresh deck is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    /// All suits in deck order
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Convert from numeric index (0-3)
    pub fn from_index(index: usize) -> Option<Self> {
        Suit::ALL.get(index).copied()
    }

    /// Get the suit as a character symbol
    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// Card ranks from Ace up to King
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    /// All ranks from Ace to King
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Convert from position within a suit (0 = Ace, 12 = King)
    pub fn from_index(index: usize) -> Option<Self> {
        Rank::ALL.get(index).copied()
    }

    /// Printed rank: A, 2-10, J, Q, K
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card standing in for one of the first 52 items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const DECK_SIZE: usize = 52;

    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    /// Create a card from an item index (0-51)
    /// Index is calculated as: suit * 13 + rank position, spades first
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Self::DECK_SIZE {
            return None;
        }
        let suit = Suit::from_index(index / 13)?;
        let rank = Rank::from_index(index % 13)?;
        Some(Card::new(suit, rank))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// How items are labelled when shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Face {
    /// Playing cards for the first 52 items, numbers beyond that
    #[default]
    Card,
    /// 1-based numbers for every item
    Number,
}

impl Face {
    pub fn as_str(&self) -> &'static str {
        match self {
            Face::Card => "card",
            Face::Number => "number",
        }
    }

    /// Label for item `index` under this face.
    pub fn label(&self, index: usize) -> String {
        match (self, Card::from_index(index)) {
            (Face::Card, Some(card)) => card.to_string(),
            _ => (index + 1).to_string(),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Face {
    type Err = ShuffleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Face::Card),
            "number" => Ok(Face::Number),
            _ => Err(ShuffleError::InvalidFace(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_index_conversion() {
        for i in 0..52 {
            let card = Card::from_index(i).unwrap();
            assert_eq!(card.suit, Suit::ALL[i / 13]);
            assert_eq!(card.rank, Rank::ALL[i % 13]);
        }
        assert_eq!(Card::from_index(52), None);
    }

    #[test]
    fn test_deck_layout() {
        assert_eq!(Card::from_index(0).unwrap().to_string(), "A♠");
        assert_eq!(Card::from_index(12).unwrap().to_string(), "K♠");
        assert_eq!(Card::from_index(13).unwrap().to_string(), "A♥");
        assert_eq!(Card::from_index(35).unwrap().to_string(), "10♦");
        assert_eq!(Card::from_index(51).unwrap().to_string(), "K♣");
    }

    #[test]
    fn test_face_labels() {
        assert_eq!(Face::Card.label(10), "J♠");
        assert_eq!(Face::Card.label(52), "53");
        assert_eq!(Face::Number.label(0), "1");
        assert_eq!(Face::Number.label(99), "100");
    }

    #[test]
    fn test_face_parsing() {
        assert_eq!("card".parse::<Face>().unwrap(), Face::Card);
        assert_eq!("number".parse::<Face>().unwrap(), Face::Number);
        assert_eq!(
            "tarot".parse::<Face>(),
            Err(ShuffleError::InvalidFace("tarot".to_string()))
        );
        assert_eq!(Face::Number.to_string(), "number");
    }
}
