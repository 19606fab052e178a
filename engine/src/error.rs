use thiserror::Error;

use crate::card::CardKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("battle log unavailable: logging was disabled for this battle")]
    LoggingDisabled,
    #[error("card {0} is not in the catalog")]
    UnknownCard(u32),
    #[error("card {id} is not a {expected}")]
    WrongCardKind { id: u32, expected: CardKind },
    #[error("card {id} has no level {level} (max {max})")]
    InvalidLevel { id: u32, level: u8, max: u8 },
}
