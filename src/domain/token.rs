//! Token identifiers and the two-token pair every pool trades.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a token tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TokenId(uuid::Uuid);

impl TokenId {
    /// Creates a new random `TokenId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `TokenId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for TokenId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

/// The asset/usdc token pair a pool holds reserves of.
///
/// Every pool in an orbit must carry an identical pair; this is enforced
/// at orbit registration time, not at swap time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// The volatile "asset" side of the pair.
    pub asset: TokenId,
    /// The stable "usdc" side of the pair.
    pub usdc: TokenId,
}

impl TokenPair {
    /// Creates a new pair.
    #[must_use]
    pub const fn new(asset: TokenId, usdc: TokenId) -> Self {
        Self { asset, usdc }
    }

    /// Returns the input-side token for the given trade direction.
    #[must_use]
    pub const fn token_in(&self, asset_to_usdc: bool) -> TokenId {
        if asset_to_usdc { self.asset } else { self.usdc }
    }

    /// Returns the output-side token for the given trade direction.
    #[must_use]
    pub const fn token_out(&self, asset_to_usdc: bool) -> TokenId {
        if asset_to_usdc { self.usdc } else { self.asset }
    }
}
