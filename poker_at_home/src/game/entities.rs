//! Validated table entities.
//!
//! Every entity here is an immutable value object: a constructor either
//! returns a fully valid instance or a [`StateError`] naming the violated
//! constraint. There are no setters, and a fresh set of entities is built
//! for every incoming state sync.

use serde::{Serialize, Serializer};
use std::{collections::HashMap, fmt, str::FromStr};
use uuid::Uuid;

use super::errors::StateError;

/// Type alias for whole-currency amounts. All stacks, bets, and pots are
/// whole chips; fractional cents never appear on the wire.
pub type Chips = u32;

/// Card value, deuce through ace. Tens are written `T`, aces rank high.
pub type Value = u8;

/// Narrow a raw payload integer into a chip amount.
fn chips(field: &'static str, value: i64) -> Result<Chips, StateError> {
    Chips::try_from(value).map_err(|_| StateError::InvalidAmount { field, value })
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

impl TryFrom<char> for Suit {
    type Error = StateError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'h' => Ok(Self::Hearts),
            'd' => Ok(Self::Diamonds),
            's' => Ok(Self::Spades),
            'c' => Ok(Self::Clubs),
            _ => Err(StateError::InvalidSuit(c)),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Hearts => 'h',
            Self::Diamonds => 'd',
            Self::Spades => 's',
            Self::Clubs => 'c',
        };
        write!(f, "{repr}")
    }
}

/// A playing card, parsed from its fixed two-character wire code
/// (rank then suit, e.g. `Ah` or `Td`).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card {
    value: Value,
    suit: Suit,
}

impl Card {
    pub fn value(&self) -> Value {
        self.value
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }
}

fn value_from_char(c: char) -> Result<Value, StateError> {
    match c {
        'A' => Ok(14),
        'K' => Ok(13),
        'Q' => Ok(12),
        'J' => Ok(11),
        'T' => Ok(10),
        '2'..='9' => Ok(c as u8 - b'0'),
        _ => Err(StateError::InvalidRank(c)),
    }
}

impl FromStr for Card {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(value), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(StateError::InvalidCard(s.to_string()));
        };
        let value = value_from_char(value)?;
        let suit = Suit::try_from(suit)?;
        Ok(Self { value, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self.value {
            14 => "A".to_string(),
            13 => "K".to_string(),
            12 => "Q".to_string(),
            11 => "J".to_string(),
            10 => "T".to_string(),
            v => v.to_string(),
        };
        write!(f, "{value}{}", self.suit)
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// An opaque, globally unique player identifier issued by the server.
///
/// Two ids are equal iff their underlying UUIDs are equal. Roles the server
/// does not report yet (dealer, blinds) are represented as `Option<PlayerId>`
/// rather than a reserved sentinel id.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for PlayerId {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Uuid::parse_str(s).map_err(|_| StateError::InvalidPlayerId(s.to_string()))?;
        Ok(Self(id))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for PlayerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One player's seat as of the latest state sync.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerGameState {
    cards: [Option<Card>; 2],
    folded: bool,
    stack: Chips,
    bet: Chips,
    pot_share: Chips,
}

impl PlayerGameState {
    /// Build a seat state. `cards` must hold exactly two entries; unknown
    /// hole cards are `None`. Amounts are rejected unless nonnegative.
    pub fn new(
        cards: Vec<Option<Card>>,
        folded: bool,
        stack: i64,
        bet: i64,
        pot_share: i64,
    ) -> Result<Self, StateError> {
        let cards: [Option<Card>; 2] = cards
            .try_into()
            .map_err(|cards: Vec<Option<Card>>| StateError::HoleCardCount(cards.len()))?;
        Ok(Self {
            cards,
            folded,
            stack: chips("stack", stack)?,
            bet: chips("bet", bet)?,
            pot_share: chips("pot_share", pot_share)?,
        })
    }

    /// The player's hole cards, if they have been revealed.
    pub fn cards(&self) -> [Option<Card>; 2] {
        self.cards
    }

    pub fn folded(&self) -> bool {
        self.folded
    }

    pub fn stack(&self) -> Chips {
        self.stack
    }

    pub fn bet(&self) -> Chips {
        self.bet
    }

    pub fn pot_share(&self) -> Chips {
        self.pot_share
    }

    /// Whether the player appears to be all-in. The server never states this
    /// outright; an empty stack with chips committed to the pot is read as
    /// all-in. This is an approximation, not a protocol guarantee.
    pub fn is_all_in(&self) -> bool {
        self.stack == 0 && self.pot_share > 0
    }
}

/// Chips at stake, possibly attributed to the players eligible for them.
///
/// The share map may be empty when per-player attribution has not been
/// computed upstream.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Pot {
    amount: Chips,
    player_shares: HashMap<PlayerId, Chips>,
}

impl Pot {
    pub fn new(amount: i64, player_shares: HashMap<PlayerId, i64>) -> Result<Self, StateError> {
        let amount = chips("pot amount", amount)?;
        let player_shares = player_shares
            .into_iter()
            .map(|(id, share)| Ok((id, chips("pot share", share)?)))
            .collect::<Result<HashMap<_, _>, StateError>>()?;
        Ok(Self {
            amount,
            player_shares,
        })
    }

    pub fn amount(&self) -> Chips {
        self.amount
    }

    pub fn player_shares(&self) -> &HashMap<PlayerId, Chips> {
        &self.player_shares
    }
}

/// The table state every player can see: pots, board, and blinds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SharedGameState {
    pot_total: Chips,
    pots: Vec<Pot>,
    board_cards: Vec<Card>,
    small_blind: Chips,
    big_blind: Chips,
}

impl SharedGameState {
    /// Build the shared table state. `pots` must be non-empty (the main pot
    /// always exists) and the board must show 3 to 5 cards.
    pub fn new(
        pot_total: i64,
        pots: Vec<Pot>,
        board_cards: Vec<Card>,
        small_blind: i64,
        big_blind: i64,
    ) -> Result<Self, StateError> {
        if pots.is_empty() {
            return Err(StateError::NoPots);
        }
        if !(3..=5).contains(&board_cards.len()) {
            return Err(StateError::BoardCardCount(board_cards.len()));
        }
        Ok(Self {
            pot_total: chips("pot", pot_total)?,
            pots,
            board_cards,
            small_blind: chips("smallBlindAmount", small_blind)?,
            big_blind: chips("bigBlindAmount", big_blind)?,
        })
    }

    pub fn pot_total(&self) -> Chips {
        self.pot_total
    }

    /// The pots in play, main pot first.
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn board_cards(&self) -> &[Card] {
        &self.board_cards
    }

    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }
}

/// A full snapshot of the table, rebuilt from scratch on every state sync.
///
/// Dealer and blind seat references are `None` until the server starts
/// reporting them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GameState {
    shared: SharedGameState,
    player_states: HashMap<PlayerId, PlayerGameState>,
    dealer_player: Option<PlayerId>,
    small_blind_player: Option<PlayerId>,
    big_blind_player: Option<PlayerId>,
    active_player: Option<PlayerId>,
}

impl GameState {
    /// Assemble a snapshot from already-validated parts.
    pub fn new(
        shared: SharedGameState,
        player_states: HashMap<PlayerId, PlayerGameState>,
        dealer_player: Option<PlayerId>,
        small_blind_player: Option<PlayerId>,
        big_blind_player: Option<PlayerId>,
        active_player: Option<PlayerId>,
    ) -> Self {
        Self {
            shared,
            player_states,
            dealer_player,
            small_blind_player,
            big_blind_player,
            active_player,
        }
    }

    pub fn shared(&self) -> &SharedGameState {
        &self.shared
    }

    pub fn player_states(&self) -> &HashMap<PlayerId, PlayerGameState> {
        &self.player_states
    }

    pub fn dealer_player(&self) -> Option<PlayerId> {
        self.dealer_player
    }

    pub fn small_blind_player(&self) -> Option<PlayerId> {
        self.small_blind_player
    }

    pub fn big_blind_player(&self) -> Option<PlayerId> {
        self.big_blind_player
    }

    /// The player currently required to act, if anyone.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active_player
    }
}
