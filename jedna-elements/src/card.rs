//! [`Card`] — the (color, figure) identity of one card, plus its public notation.
//!
//! The notation is the wire format of the whole system: `r5`, `g+2`, `ys`,
//! `w`, `wr`, `wd4`, `wd4b`. Parsing is case-insensitive and the inverse of
//! formatting; `ww` is accepted as a historical spelling of a bare wild.

use core::fmt::{Display, Formatter};
use core::str::FromStr;

use strum::EnumIter;

/// Card color.
///
/// `Wild` doubles as the "no color chosen yet" marker on wild cards: a wild
/// card is created with `Wild` and gets a concrete color attached when played.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, EnumIter)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Wild,
}

impl Color {
    pub const fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }

    /// The notation letter; empty for the unassigned wild marker.
    pub const fn letter(self) -> &'static str {
        match self {
            Color::Red => "r",
            Color::Green => "g",
            Color::Blue => "b",
            Color::Yellow => "y",
            Color::Wild => "",
        }
    }

    pub const fn from_letter(c: char) -> Option<Color> {
        match c {
            'r' => Some(Color::Red),
            'g' => Some(Color::Green),
            'b' => Some(Color::Blue),
            'y' => Some(Color::Yellow),
            _ => None,
        }
    }
}

/// Card figure.
///
/// The digit payload is only ever 0..=9; [`Card::new`] enforces this.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Figure {
    Digit(u8),
    DrawTwo,
    Skip,
    Reverse,
    Wild,
    WildDrawFour,
}

impl Figure {
    /// Wild and WildDrawFour; the figures that carry a chosen color.
    pub const fn is_wild(self) -> bool {
        matches!(self, Figure::Wild | Figure::WildDrawFour)
    }
}

/// One card.
///
/// Invariants enforced on creation:
/// - wild figures start with [`Color::Wild`] (a chosen color may be attached
///   later via [`Card::with_color`]);
/// - non-wild figures require a concrete color;
/// - digits are 0..=9.
///
/// ## Optional `serde` support
///
/// The public notation string is used as the serialization format, which keeps
/// the wire protocol readable and round-trippable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Card {
    color: Color,
    figure: Figure,
}

impl Card {
    pub const fn new(color: Color, figure: Figure) -> Option<Card> {
        match figure {
            Figure::Wild | Figure::WildDrawFour => {
                if color.is_wild() { Some(Card { color, figure }) } else { None }
            }
            Figure::Digit(n) => {
                if n <= 9 && !color.is_wild() { Some(Card { color, figure }) } else { None }
            }
            _ => {
                if color.is_wild() { None } else { Some(Card { color, figure }) }
            }
        }
    }

    /// A bare wild card (no chosen color).
    pub const fn wild() -> Card {
        Card { color: Color::Wild, figure: Figure::Wild }
    }

    /// A bare wild-draw-four card (no chosen color).
    pub const fn wild_draw_four() -> Card {
        Card { color: Color::Wild, figure: Figure::WildDrawFour }
    }

    /// The effective color: for a played wild this is the chosen color.
    pub const fn color(self) -> Color {
        self.color
    }

    pub const fn figure(self) -> Figure {
        self.figure
    }

    /// Scalar point value: digits count face value, Skip/Reverse/DrawTwo are
    /// worth 20, wilds 50.
    pub const fn value(self) -> u32 {
        match self.figure {
            Figure::Digit(n) => n as u32,
            Figure::DrawTwo | Figure::Skip | Figure::Reverse => 20,
            Figure::Wild | Figure::WildDrawFour => 50,
        }
    }

    pub const fn is_wild(self) -> bool {
        self.figure.is_wild()
    }

    /// Cards that open or escalate a war: DrawTwo and WildDrawFour.
    pub const fn is_offensive(self) -> bool {
        matches!(self.figure, Figure::DrawTwo | Figure::WildDrawFour)
    }

    /// Cards that may legally appear in a draw-two war: DrawTwo, Reverse
    /// (color permitting) and WildDrawFour.
    pub const fn is_war_playable(self) -> bool {
        matches!(self.figure, Figure::DrawTwo | Figure::Reverse | Figure::WildDrawFour)
    }

    /// Attaches a chosen color to a wild card; no-op color change otherwise.
    pub const fn with_color(self, color: Color) -> Card {
        Card { color, figure: self.figure }
    }

    /// Scrubs the chosen color off a wild card, restoring the unassigned
    /// marker. Used when discards are reshuffled back into the deck.
    pub const fn clear_color(self) -> Card {
        if self.figure.is_wild() {
            Card { color: Color::Wild, figure: self.figure }
        } else {
            self
        }
    }

    /// Whether `candidate` may be played on `self` in the normal game state:
    /// any wild, or a color match on the effective color, or a figure match.
    pub fn matches(self, candidate: Card) -> bool {
        candidate.is_wild() || candidate.color == self.color || candidate.figure == self.figure
    }

    /// Whether two hand cards count as "identical" for a double play, and
    /// whether a requested card refers to a held one: wild cards compare by
    /// figure alone (the chosen color is not part of their identity).
    pub fn same_identity(self, other: Card) -> bool {
        if self.is_wild() || other.is_wild() {
            self.figure == other.figure
        } else {
            self == other
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.figure {
            Figure::Digit(n) => write!(f, "{}{}", self.color.letter(), n),
            Figure::DrawTwo => write!(f, "{}+2", self.color.letter()),
            Figure::Skip => write!(f, "{}s", self.color.letter()),
            Figure::Reverse => write!(f, "{}r", self.color.letter()),
            Figure::Wild => write!(f, "w{}", self.color.letter()),
            Figure::WildDrawFour => write!(f, "wd4{}", self.color.letter()),
        }
    }
}

/// Error from parsing a card notation string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseCardError(pub String);

impl Display for ParseCardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "not a card notation: {:?}", self.0)
    }
}

impl std::error::Error for ParseCardError {}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.to_ascii_lowercase();
        let err = || ParseCardError(s.to_string());

        // Wild spellings first; `wd4` must win over `w` + suffix.
        if let Some(rest) = text.strip_prefix("wd4") {
            let color = parse_wild_suffix(rest).ok_or_else(err)?;
            return Ok(Card { color, figure: Figure::WildDrawFour });
        }
        if text == "ww" {
            // historical spelling of a bare wild
            return Ok(Card::wild());
        }
        if let Some(rest) = text.strip_prefix('w') {
            let color = parse_wild_suffix(rest).ok_or_else(err)?;
            return Ok(Card { color, figure: Figure::Wild });
        }

        let mut chars = text.chars();
        let color = chars
            .next()
            .and_then(Color::from_letter)
            .ok_or_else(err)?;
        let figure = match chars.as_str() {
            "+2" => Figure::DrawTwo,
            "s" => Figure::Skip,
            "r" => Figure::Reverse,
            rest => {
                let n = match rest.as_bytes() {
                    [d @ b'0'..=b'9'] => *d - b'0',
                    _ => return Err(err()),
                };
                Figure::Digit(n)
            }
        };
        Ok(Card { color, figure })
    }
}

fn parse_wild_suffix(rest: &str) -> Option<Color> {
    let mut chars = rest.chars();
    match chars.next() {
        None => Some(Color::Wild),
        Some(c) if chars.next().is_none() => Color::from_letter(c),
        _ => None,
    }
}

// Blanket adaptors for various ways of converting to/from strings.

impl TryFrom<&str> for Card {
    type Error = ParseCardError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Card {
    type Error = ParseCardError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

/// Shortcut for creating a card literal through its notation.
///
/// Example:
/// ```
/// use jedna_elements::card::*;
/// assert_eq!(c!("r5"), Card::new(Color::Red, Figure::Digit(5)).unwrap());
/// ```
#[macro_export]
macro_rules! c {
    ($s:expr) => {{
        use core::str::FromStr;
        $crate::card::Card::from_str($s).unwrap()
    }};
}
pub use c;
