//! Pool state, constant-product pricing with a price-offset multiplier,
//! and liquidity accounting.
//!
//! A pool holds two reserves (asset and usdc), a signed basis-point price
//! offset, and per-provider liquidity shares. Reserves are an internal
//! ledger: the pool owns a custody account on the token ledger, and only
//! `bootstrap`, `supplicate`, `mint`, `burn`, and `donate` move reserves in
//! lockstep with custody. Tokens pushed at the custody account directly do
//! not change reserves.
//!
//! Pricing is integer-only and order-sensitive: the raw constant-product
//! division floors first, then the offset scaling floors, independently.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::fees::BPS_DENOMINATOR;
use crate::domain::ledger::TokenLedger;
use crate::domain::math::mul_div;
use crate::domain::{AccountId, PoolId, TokenPair};
use crate::error::EngineError;

/// Maximum absolute price offset in basis points.
pub const MAX_OFFSET_BPS: i32 = 10_000;

/// A two-token constant-product pool with an asymmetric price offset.
#[derive(Debug, Clone)]
pub struct Pool {
    pool_id: PoolId,
    pair: TokenPair,
    custody: AccountId,
    reserve_asset: u128,
    reserve_usdc: u128,
    target_offset_bps: i32,
    initialized: bool,
    total_liquidity: u128,
    liquidity_of: HashMap<AccountId, u128>,
    swap_count: u64,
    total_volume: u128,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
}

impl Pool {
    /// Creates an empty, uninitialized pool for `pair` with a fresh custody
    /// account.
    #[must_use]
    pub fn new(pair: TokenPair) -> Self {
        let now = Utc::now();
        Self {
            pool_id: PoolId::new(),
            pair,
            custody: AccountId::new(),
            reserve_asset: 0,
            reserve_usdc: 0,
            target_offset_bps: 0,
            initialized: false,
            total_liquidity: 0,
            liquidity_of: HashMap::new(),
            swap_count: 0,
            total_volume: 0,
            created_at: now,
            last_modified_at: now,
        }
    }

    /// The pool's identifier.
    #[must_use]
    pub const fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    /// The token pair this pool trades.
    #[must_use]
    pub const fn pair(&self) -> TokenPair {
        self.pair
    }

    /// The custody account holding the pool's token balances.
    #[must_use]
    pub const fn custody(&self) -> AccountId {
        self.custody
    }

    /// Current asset-side reserve.
    #[must_use]
    pub const fn reserve_asset(&self) -> u128 {
        self.reserve_asset
    }

    /// Current usdc-side reserve.
    #[must_use]
    pub const fn reserve_usdc(&self) -> u128 {
        self.reserve_usdc
    }

    /// The configured price offset in basis points.
    #[must_use]
    pub const fn target_offset_bps(&self) -> i32 {
        self.target_offset_bps
    }

    /// Whether the pool has been bootstrapped.
    #[must_use]
    pub const fn initialized(&self) -> bool {
        self.initialized
    }

    /// Total liquidity units outstanding.
    #[must_use]
    pub const fn total_liquidity(&self) -> u128 {
        self.total_liquidity
    }

    /// Liquidity units owned by `account`.
    #[must_use]
    pub fn liquidity_of(&self, account: AccountId) -> u128 {
        self.liquidity_of.get(&account).copied().unwrap_or(0)
    }

    /// Number of swaps executed against this pool.
    #[must_use]
    pub const fn swap_count(&self) -> u64 {
        self.swap_count
    }

    /// Cumulative swap input volume.
    #[must_use]
    pub const fn total_volume(&self) -> u128 {
        self.total_volume
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation timestamp.
    #[must_use]
    pub const fn last_modified_at(&self) -> DateTime<Utc> {
        self.last_modified_at
    }

    /// Seeds the pool exactly once with initial reserves and the price
    /// offset, pulling both amounts from `from` into custody and minting
    /// the seed liquidity (1:1 with deposited value) to `from`.
    ///
    /// The seed mint keeps the seeder's claim on the reserves: without it
    /// the first subsequent mint would own the entire pool.
    ///
    /// # Errors
    ///
    /// - [`EngineError::AlreadyInitialized`] on a second bootstrap.
    /// - [`EngineError::InvalidAmount`] if either amount is zero.
    /// - [`EngineError::InvalidOffset`] if `|offset_bps| > 10000`.
    /// - [`EngineError::AmountOverflow`] if the deposited value overflows.
    /// - [`EngineError::InsufficientBalance`] if `from` cannot fund it.
    pub fn bootstrap(
        &mut self,
        ledger: &mut TokenLedger,
        from: AccountId,
        amount_asset: u128,
        amount_usdc: u128,
        offset_bps: i32,
    ) -> Result<(), EngineError> {
        if self.initialized {
            return Err(EngineError::AlreadyInitialized(self.pool_id));
        }
        if amount_asset == 0 || amount_usdc == 0 {
            return Err(EngineError::InvalidAmount(
                "bootstrap amounts must be non-zero".to_string(),
            ));
        }
        if offset_bps.abs() > MAX_OFFSET_BPS {
            return Err(EngineError::InvalidOffset(offset_bps));
        }
        let seed_liquidity = amount_asset
            .checked_add(amount_usdc)
            .ok_or(EngineError::AmountOverflow)?;
        ledger.transfer(self.pair.asset, from, self.custody, amount_asset)?;
        ledger.transfer(self.pair.usdc, from, self.custody, amount_usdc)?;
        self.reserve_asset = amount_asset;
        self.reserve_usdc = amount_usdc;
        self.target_offset_bps = offset_bps;
        self.initialized = true;
        self.total_liquidity = seed_liquidity;
        self.liquidity_of.insert(from, seed_liquidity);
        self.touch();
        Ok(())
    }

    /// Quotes the output of a swap without mutating any state.
    ///
    /// The raw constant-product quote floors first, then the offset factor
    /// (`10000 + offset` asset-in, `10000 - offset` usdc-in) floors again.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Uninitialized`] before bootstrap.
    /// - [`EngineError::ZeroAmount`] on zero input.
    /// - [`EngineError::EmptyReserves`] if either reserve is zero.
    /// - [`EngineError::AmountOverflow`] on intermediate overflow.
    pub fn quote(&self, asset_to_usdc: bool, amount_in: u128) -> Result<u128, EngineError> {
        if !self.initialized {
            return Err(EngineError::Uninitialized(self.pool_id));
        }
        if amount_in == 0 {
            return Err(EngineError::ZeroAmount);
        }
        if self.reserve_asset == 0 || self.reserve_usdc == 0 {
            return Err(EngineError::EmptyReserves(self.pool_id));
        }
        let (reserve_in, reserve_out) = if asset_to_usdc {
            (self.reserve_asset, self.reserve_usdc)
        } else {
            (self.reserve_usdc, self.reserve_asset)
        };
        let denominator = reserve_in
            .checked_add(amount_in)
            .ok_or(EngineError::AmountOverflow)?;
        let raw_out = mul_div(amount_in, reserve_out, denominator)?;
        let offset = i64::from(self.target_offset_bps);
        let factor_signed = if asset_to_usdc {
            10_000 + offset
        } else {
            10_000 - offset
        };
        // Never negative: |offset| <= 10000 is enforced at bootstrap.
        let factor = u128::try_from(factor_signed).unwrap_or(0);
        mul_div(raw_out, factor, BPS_DENOMINATOR)
    }

    /// Executes one swap: pulls `amount_in` from `payer` into custody,
    /// pays the quoted output to `to`, and moves reserves accordingly.
    ///
    /// Returns the output amount.
    ///
    /// # Errors
    ///
    /// Everything [`Pool::quote`] returns, plus
    /// [`EngineError::SlippageExceeded`] when the output is below
    /// `min_amount_out`, [`EngineError::InsufficientLiquidity`] when a
    /// premium-scaled quote exceeds the output-side reserve, and
    /// [`EngineError::InsufficientBalance`] when `payer` cannot fund the
    /// input.
    #[allow(clippy::too_many_arguments)]
    pub fn supplicate(
        &mut self,
        ledger: &mut TokenLedger,
        to: AccountId,
        payer: AccountId,
        asset_to_usdc: bool,
        amount_in: u128,
        min_amount_out: u128,
    ) -> Result<u128, EngineError> {
        let amount_out = self.quote(asset_to_usdc, amount_in)?;
        let reserve_out = if asset_to_usdc {
            self.reserve_usdc
        } else {
            self.reserve_asset
        };
        if amount_out > reserve_out {
            return Err(EngineError::InsufficientLiquidity);
        }
        if amount_out < min_amount_out {
            return Err(EngineError::SlippageExceeded {
                min_amount_out,
                actual: amount_out,
            });
        }
        let token_in = self.pair.token_in(asset_to_usdc);
        let token_out = self.pair.token_out(asset_to_usdc);
        ledger.transfer(token_in, payer, self.custody, amount_in)?;
        if asset_to_usdc {
            self.reserve_asset = self
                .reserve_asset
                .checked_add(amount_in)
                .ok_or(EngineError::AmountOverflow)?;
            self.reserve_usdc -= amount_out;
        } else {
            self.reserve_usdc = self
                .reserve_usdc
                .checked_add(amount_in)
                .ok_or(EngineError::AmountOverflow)?;
            self.reserve_asset -= amount_out;
        }
        ledger.transfer(token_out, self.custody, to, amount_out)?;
        self.swap_count += 1;
        self.total_volume = self.total_volume.saturating_add(amount_in);
        self.touch();
        Ok(amount_out)
    }

    /// Donates `amount` from `from` into the input-side reserve for the
    /// given trade direction, with no output.
    ///
    /// A zero-amount donation is a no-op.
    ///
    /// # Errors
    ///
    /// [`EngineError::InsufficientBalance`] if `from` cannot fund it, and
    /// [`EngineError::AmountOverflow`] on reserve overflow.
    pub fn donate(
        &mut self,
        ledger: &mut TokenLedger,
        from: AccountId,
        asset_to_usdc: bool,
        amount: u128,
    ) -> Result<(), EngineError> {
        if amount == 0 {
            return Ok(());
        }
        let token_in = self.pair.token_in(asset_to_usdc);
        ledger.transfer(token_in, from, self.custody, amount)?;
        let reserve = if asset_to_usdc {
            &mut self.reserve_asset
        } else {
            &mut self.reserve_usdc
        };
        *reserve = reserve.checked_add(amount).ok_or(EngineError::AmountOverflow)?;
        self.touch();
        Ok(())
    }

    /// Deposits both desired amounts from `from` and credits liquidity
    /// units to `to`.
    ///
    /// Mints proportionally to existing total liquidity over existing
    /// total value. The 1:1 seed branch only applies when every unit has
    /// been burned away; the normal seed happens at bootstrap.
    ///
    /// Returns the liquidity units minted.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Uninitialized`] before bootstrap.
    /// - [`EngineError::InvalidAmount`] if either amount is zero, or the
    ///   proportional share rounds to zero.
    /// - [`EngineError::InsufficientBalance`] if `from` cannot fund it.
    pub fn mint(
        &mut self,
        ledger: &mut TokenLedger,
        from: AccountId,
        to: AccountId,
        amount_asset: u128,
        amount_usdc: u128,
    ) -> Result<u128, EngineError> {
        if !self.initialized {
            return Err(EngineError::Uninitialized(self.pool_id));
        }
        if amount_asset == 0 || amount_usdc == 0 {
            return Err(EngineError::InvalidAmount(
                "mint amounts must be non-zero".to_string(),
            ));
        }
        let deposit_value = amount_asset
            .checked_add(amount_usdc)
            .ok_or(EngineError::AmountOverflow)?;
        let minted = if self.total_liquidity == 0 {
            deposit_value
        } else {
            let existing_value = self
                .reserve_asset
                .checked_add(self.reserve_usdc)
                .ok_or(EngineError::AmountOverflow)?;
            mul_div(deposit_value, self.total_liquidity, existing_value)?
        };
        if minted == 0 {
            return Err(EngineError::InvalidAmount(
                "deposit too small to mint a share".to_string(),
            ));
        }
        ledger.transfer(self.pair.asset, from, self.custody, amount_asset)?;
        ledger.transfer(self.pair.usdc, from, self.custody, amount_usdc)?;
        self.reserve_asset = self
            .reserve_asset
            .checked_add(amount_asset)
            .ok_or(EngineError::AmountOverflow)?;
        self.reserve_usdc = self
            .reserve_usdc
            .checked_add(amount_usdc)
            .ok_or(EngineError::AmountOverflow)?;
        self.total_liquidity = self
            .total_liquidity
            .checked_add(minted)
            .ok_or(EngineError::AmountOverflow)?;
        let share = self.liquidity_of.entry(to).or_insert(0);
        *share = share.checked_add(minted).ok_or(EngineError::AmountOverflow)?;
        self.touch();
        Ok(minted)
    }

    /// Burns `liquidity` units owned by `from` and pays out the
    /// proportional share of both reserves.
    ///
    /// Returns `(asset_out, usdc_out)`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroAmount`] on a zero burn.
    /// - [`EngineError::InsufficientLiquidity`] if `from` owns less than
    ///   `liquidity`.
    pub fn burn(
        &mut self,
        ledger: &mut TokenLedger,
        from: AccountId,
        liquidity: u128,
    ) -> Result<(u128, u128), EngineError> {
        if liquidity == 0 {
            return Err(EngineError::ZeroAmount);
        }
        let owned = self.liquidity_of(from);
        if liquidity > owned {
            return Err(EngineError::InsufficientLiquidity);
        }
        let asset_out = mul_div(self.reserve_asset, liquidity, self.total_liquidity)?;
        let usdc_out = mul_div(self.reserve_usdc, liquidity, self.total_liquidity)?;
        self.liquidity_of.insert(from, owned - liquidity);
        self.total_liquidity -= liquidity;
        self.reserve_asset -= asset_out;
        self.reserve_usdc -= usdc_out;
        ledger.transfer(self.pair.asset, self.custody, from, asset_out)?;
        ledger.transfer(self.pair.usdc, self.custody, from, usdc_out)?;
        self.touch();
        Ok((asset_out, usdc_out))
    }

    /// Moves liquidity units between owners without touching reserves.
    ///
    /// Used by the rebate skim to reassign freshly minted units.
    ///
    /// # Errors
    ///
    /// [`EngineError::InsufficientLiquidity`] if `from` owns less than
    /// `amount`.
    pub fn transfer_liquidity(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), EngineError> {
        if amount == 0 {
            return Ok(());
        }
        let owned = self.liquidity_of(from);
        if amount > owned {
            return Err(EngineError::InsufficientLiquidity);
        }
        self.liquidity_of.insert(from, owned - amount);
        let share = self.liquidity_of.entry(to).or_insert(0);
        *share = share.checked_add(amount).ok_or(EngineError::AmountOverflow)?;
        Ok(())
    }

    fn touch(&mut self) {
        self.last_modified_at = Utc::now();
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::TokenId;

    fn seeded_pool(
        reserve_asset: u128,
        reserve_usdc: u128,
        offset_bps: i32,
    ) -> (Pool, TokenLedger, AccountId) {
        let pair = TokenPair::new(TokenId::new(), TokenId::new());
        let mut pool = Pool::new(pair);
        let mut ledger = TokenLedger::new();
        let funder = AccountId::new();
        ledger.credit(pair.asset, funder, u128::MAX / 4).unwrap();
        ledger.credit(pair.usdc, funder, u128::MAX / 4).unwrap();
        pool.bootstrap(&mut ledger, funder, reserve_asset, reserve_usdc, offset_bps)
            .unwrap();
        (pool, ledger, funder)
    }

    #[test]
    fn bootstrap_is_once_only() {
        let (mut pool, mut ledger, funder) = seeded_pool(1_000, 1_000, 0);
        let result = pool.bootstrap(&mut ledger, funder, 1, 1, 0);
        assert!(matches!(result, Err(EngineError::AlreadyInitialized(_))));
    }

    #[test]
    fn bootstrap_rejects_out_of_bounds_offset() {
        let pair = TokenPair::new(TokenId::new(), TokenId::new());
        let mut pool = Pool::new(pair);
        let mut ledger = TokenLedger::new();
        let funder = AccountId::new();
        ledger.credit(pair.asset, funder, 1_000).unwrap();
        ledger.credit(pair.usdc, funder, 1_000).unwrap();
        let result = pool.bootstrap(&mut ledger, funder, 100, 100, 10_001);
        assert!(matches!(result, Err(EngineError::InvalidOffset(10_001))));
        let result = pool.bootstrap(&mut ledger, funder, 100, 100, -10_001);
        assert!(matches!(result, Err(EngineError::InvalidOffset(-10_001))));
        // Exactly +/-10000 is allowed.
        assert!(pool.bootstrap(&mut ledger, funder, 100, 100, 10_000).is_ok());
    }

    #[test]
    fn quote_requires_bootstrap() {
        let pool = Pool::new(TokenPair::new(TokenId::new(), TokenId::new()));
        assert!(matches!(
            pool.quote(true, 10),
            Err(EngineError::Uninitialized(_))
        ));
    }

    #[test]
    fn negative_offset_premium_and_discount_sides() {
        // offset -5000: usdc->asset scales by 15000/10000, asset->usdc by
        // 5000/10000, each step flooring independently.
        let (pool, _, _) = seeded_pool(1_000_000, 2_000_000, -5_000);
        let x: u128 = 10_000;

        let raw_usdc_in = x * 1_000_000 / (2_000_000 + x);
        let expected_premium = raw_usdc_in * 15_000 / 10_000;
        assert_eq!(pool.quote(false, x).unwrap(), expected_premium);

        let raw_asset_in = x * 2_000_000 / (1_000_000 + x);
        let expected_discount = raw_asset_in * 5_000 / 10_000;
        assert_eq!(pool.quote(true, x).unwrap(), expected_discount);
    }

    #[test]
    fn positive_offset_inverts_the_premium_side() {
        let (pool, _, _) = seeded_pool(1_000_000, 2_000_000, 5_000);
        let x: u128 = 10_000;

        let raw_asset_in = x * 2_000_000 / (1_000_000 + x);
        assert_eq!(pool.quote(true, x).unwrap(), raw_asset_in * 15_000 / 10_000);

        let raw_usdc_in = x * 1_000_000 / (2_000_000 + x);
        assert_eq!(pool.quote(false, x).unwrap(), raw_usdc_in * 5_000 / 10_000);
    }

    #[test]
    fn zero_offset_is_raw_constant_product() {
        let (pool, _, _) = seeded_pool(1_000, 4_000, 0);
        // 100 * 4000 / (1000 + 100) = 363.63 -> 363
        assert_eq!(pool.quote(true, 100).unwrap(), 363);
    }

    #[test]
    fn output_is_monotone_in_input() {
        let (pool, _, _) = seeded_pool(5_000, 7_000, -2_500);
        let mut previous = 0;
        for amount_in in [1u128, 10, 100, 1_000, 10_000, 100_000] {
            let out = pool.quote(true, amount_in).unwrap();
            assert!(out >= previous, "output decreased at input {amount_in}");
            previous = out;
        }
    }

    #[test]
    fn tiny_swap_yields_zero_but_still_moves_the_input_reserve() {
        // Seed 100/100, offset 0, swap 1 asset in: floor(1*100/101) = 0.
        let (mut pool, mut ledger, funder) = seeded_pool(100, 100, 0);
        let trader = AccountId::new();
        ledger.transfer(pool.pair().asset, funder, trader, 1).unwrap();

        let out = pool
            .supplicate(&mut ledger, trader, trader, true, 1, 0)
            .unwrap();
        assert_eq!(out, 0);
        assert_eq!(pool.reserve_asset(), 101);
        assert_eq!(pool.reserve_usdc(), 100);
        assert_eq!(ledger.balance_of(pool.pair().asset, trader), 0);

        // The same swap with min_amount_out > 0 fails on slippage.
        ledger.transfer(pool.pair().asset, funder, trader, 1).unwrap();
        let result = pool.supplicate(&mut ledger, trader, trader, true, 1, 1);
        assert!(matches!(
            result,
            Err(EngineError::SlippageExceeded {
                min_amount_out: 1,
                actual: 0,
            })
        ));
        // Failed swap left nothing behind.
        assert_eq!(pool.reserve_asset(), 101);
        assert_eq!(ledger.balance_of(pool.pair().asset, trader), 1);
    }

    #[test]
    fn supplicate_conserves_value() {
        let (mut pool, mut ledger, funder) = seeded_pool(1_000_000, 1_000_000, 0);
        let trader = AccountId::new();
        let recipient = AccountId::new();
        ledger
            .transfer(pool.pair().asset, funder, trader, 50_000)
            .unwrap();

        let out = pool
            .supplicate(&mut ledger, recipient, trader, true, 50_000, 0)
            .unwrap();
        // 50000 * 1000000 / 1050000 = 47619
        assert_eq!(out, 47_619);
        assert_eq!(pool.reserve_asset(), 1_050_000);
        assert_eq!(pool.reserve_usdc(), 1_000_000 - 47_619);
        assert_eq!(ledger.balance_of(pool.pair().asset, trader), 0);
        assert_eq!(ledger.balance_of(pool.pair().usdc, recipient), 47_619);
        assert_eq!(pool.swap_count(), 1);
        assert_eq!(pool.total_volume(), 50_000);
    }

    #[test]
    fn round_trip_never_yields_free_output() {
        let (mut pool, mut ledger, funder) = seeded_pool(1_000_000, 1_000_000, 0);
        let trader = AccountId::new();
        let start: u128 = 10_000;
        ledger
            .transfer(pool.pair().asset, funder, trader, start)
            .unwrap();

        let usdc = pool
            .supplicate(&mut ledger, trader, trader, true, start, 0)
            .unwrap();
        let asset_back = pool
            .supplicate(&mut ledger, trader, trader, false, usdc, 0)
            .unwrap();
        assert!(asset_back <= start, "round trip created value");
    }

    #[test]
    fn direct_custody_transfer_does_not_move_reserves() {
        let (pool, mut ledger, funder) = seeded_pool(500, 500, 0);
        ledger
            .transfer(pool.pair().asset, funder, pool.custody(), 10_000)
            .unwrap();
        assert_eq!(pool.reserve_asset(), 500);
        assert_eq!(pool.reserve_usdc(), 500);
    }

    #[test]
    fn donation_raises_only_the_input_side() {
        let (mut pool, mut ledger, funder) = seeded_pool(500, 500, 0);
        pool.donate(&mut ledger, funder, true, 100).unwrap();
        assert_eq!(pool.reserve_asset(), 600);
        assert_eq!(pool.reserve_usdc(), 500);
        pool.donate(&mut ledger, funder, false, 25).unwrap();
        assert_eq!(pool.reserve_usdc(), 525);
    }

    #[test]
    fn bootstrap_mints_seed_liquidity_to_the_seeder() {
        let (pool, _, funder) = seeded_pool(1_000_000, 1_000_000, 0);
        assert_eq!(pool.total_liquidity(), 2_000_000);
        assert_eq!(pool.liquidity_of(funder), 2_000_000);
    }

    #[test]
    fn dust_mint_and_burn_returns_only_its_own_share() {
        let (mut pool, mut ledger, funder) = seeded_pool(1_000_000, 1_000_000, 0);
        let attacker = AccountId::new();
        ledger.transfer(pool.pair().asset, funder, attacker, 1).unwrap();
        ledger.transfer(pool.pair().usdc, funder, attacker, 1).unwrap();

        let minted = pool.mint(&mut ledger, attacker, attacker, 1, 1).unwrap();
        assert_eq!(minted, 2);

        // Burning the dust share pays out 1+1, never the seeded reserves.
        let (asset_out, usdc_out) = pool.burn(&mut ledger, attacker, 2).unwrap();
        assert_eq!(asset_out, 1);
        assert_eq!(usdc_out, 1);
        assert_eq!(pool.reserve_asset(), 1_000_000);
        assert_eq!(pool.reserve_usdc(), 1_000_000);
        assert_eq!(pool.total_liquidity(), 2_000_000);
        assert_eq!(pool.liquidity_of(funder), 2_000_000);
    }

    #[test]
    fn mint_is_proportional_to_existing_value() {
        let (mut pool, mut ledger, funder) = seeded_pool(1_000, 1_000, 0);
        let lp = AccountId::new();
        ledger.transfer(pool.pair().asset, funder, lp, 1_000).unwrap();
        ledger.transfer(pool.pair().usdc, funder, lp, 1_000).unwrap();

        // Donations double the value backing the 2000 seeded units, so a
        // 1000+1000 deposit mints 2000 * 2000 / 4000 = 1000.
        pool.donate(&mut ledger, funder, true, 1_000).unwrap();
        pool.donate(&mut ledger, funder, false, 1_000).unwrap();
        let minted = pool.mint(&mut ledger, lp, lp, 1_000, 1_000).unwrap();
        assert_eq!(minted, 1_000);
        assert_eq!(pool.total_liquidity(), 3_000);
        assert_eq!(pool.liquidity_of(lp), 1_000);
    }

    #[test]
    fn mint_reseeds_after_a_full_burn() {
        let (mut pool, mut ledger, funder) = seeded_pool(1_000, 1_000, 0);
        pool.burn(&mut ledger, funder, 2_000).unwrap();
        assert_eq!(pool.total_liquidity(), 0);
        assert_eq!(pool.reserve_asset(), 0);

        // With every unit burned away the next mint seeds 1:1 again.
        let minted = pool.mint(&mut ledger, funder, funder, 1_000, 1_000).unwrap();
        assert_eq!(minted, 2_000);
    }

    #[test]
    fn mint_requires_bootstrap_and_non_zero_amounts() {
        let mut pool = Pool::new(TokenPair::new(TokenId::new(), TokenId::new()));
        let mut ledger = TokenLedger::new();
        let lp = AccountId::new();
        assert!(matches!(
            pool.mint(&mut ledger, lp, lp, 1, 1),
            Err(EngineError::Uninitialized(_))
        ));

        let (mut pool, mut ledger, funder) = seeded_pool(1_000, 1_000, 0);
        assert!(matches!(
            pool.mint(&mut ledger, funder, funder, 0, 1),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn burn_pays_out_the_proportional_share() {
        let (mut pool, mut ledger, funder) = seeded_pool(1_000, 1_000, 0);
        let lp = AccountId::new();
        ledger.transfer(pool.pair().asset, funder, lp, 1_000).unwrap();
        ledger.transfer(pool.pair().usdc, funder, lp, 1_000).unwrap();
        pool.mint(&mut ledger, lp, lp, 1_000, 1_000).unwrap();

        // lp owns 2000 of 4000 units; reserves are 2000/2000.
        let (asset_out, usdc_out) = pool.burn(&mut ledger, lp, 1_000).unwrap();
        assert_eq!(asset_out, 500);
        assert_eq!(usdc_out, 500);
        assert_eq!(pool.total_liquidity(), 3_000);
        assert_eq!(pool.reserve_asset(), 1_500);
        assert_eq!(ledger.balance_of(pool.pair().asset, lp), 500);

        assert!(matches!(
            pool.burn(&mut ledger, lp, 1_001),
            Err(EngineError::InsufficientLiquidity)
        ));
    }

    #[test]
    fn liquidity_transfer_moves_shares_only() {
        let (mut pool, mut ledger, funder) = seeded_pool(1_000, 1_000, 0);
        let lp = AccountId::new();
        let vault = AccountId::new();
        ledger.transfer(pool.pair().asset, funder, lp, 1_000).unwrap();
        ledger.transfer(pool.pair().usdc, funder, lp, 1_000).unwrap();
        pool.mint(&mut ledger, lp, lp, 1_000, 1_000).unwrap();

        pool.transfer_liquidity(lp, vault, 500).unwrap();
        assert_eq!(pool.liquidity_of(lp), 1_500);
        assert_eq!(pool.liquidity_of(vault), 500);
        assert_eq!(pool.total_liquidity(), 4_000);
        assert!(matches!(
            pool.transfer_liquidity(vault, lp, 501),
            Err(EngineError::InsufficientLiquidity)
        ));
    }
}
