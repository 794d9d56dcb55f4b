//! Addon tokens
//!
//! Addons are requested as `"<addon_id>:<quantity>"` tokens.

use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while parsing an addon token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddonTokenError {
    /// The token has no `:` separator.
    #[error("invalid addon format `{0}`: expected `<addon_id>:<quantity>`")]
    MissingSeparator(String),

    /// The addon id is not a UUID.
    #[error("invalid addon id in `{0}`")]
    InvalidId(String),

    /// The quantity is not a positive integer.
    #[error("invalid addon quantity in `{0}`")]
    InvalidQuantity(String),
}

/// A parsed addon request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddonToken {
    /// Requested addon.
    pub addon_id: Uuid,

    /// Number of units, at least one.
    pub quantity: u32,
}

impl FromStr for AddonToken {
    type Err = AddonTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let Some((id, quantity)) = token.split_once(':') else {
            return Err(AddonTokenError::MissingSeparator(token.to_owned()));
        };

        let addon_id = Uuid::parse_str(id.trim())
            .map_err(|_ignored| AddonTokenError::InvalidId(token.to_owned()))?;

        let quantity = quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or_else(|| AddonTokenError::InvalidQuantity(token.to_owned()))?;

        Ok(Self { addon_id, quantity })
    }
}

/// Parse a list of addon tokens, failing on the first malformed one.
///
/// # Errors
///
/// Returns the [`AddonTokenError`] of the first malformed token.
pub fn parse_addon_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<AddonToken>, AddonTokenError> {
    tokens.iter().map(|token| token.as_ref().parse()).collect()
}
