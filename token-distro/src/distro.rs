//! Token distribution (vesting) calculator.
//!
//! A distributor unlocks `initial_amount` at `start_time`, holds the rest
//! until `cliff_time`, then releases `locked_amount` linearly until
//! `end_time`. The linear part is interpolated over the whole
//! `[start_time, end_time]` span, matching the on-chain distributor: at the
//! first instant after the cliff the released share already accounts for the
//! time spent inside the cliff.
//!
//! Every query takes `now` explicitly; nothing is cached between calls.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::amount::TokenAmount;
use crate::config::{StreamType, SECONDS_PER_WEEK};
use crate::errors::DistroError;
use crate::time::{Timestamp, MS_PER_SECOND};
use crate::types::{Balances, TokenDistroInfo};

/// Frozen view over one distribution schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenDistroHelper {
    contract_address: String,
    initial_amount: TokenAmount,
    locked_amount: TokenAmount,
    total_tokens: TokenAmount,
    start_time: Timestamp,
    cliff_time: Timestamp,
    end_time: Timestamp,
    duration: i64,
    stream_type: StreamType,
}

impl TokenDistroHelper {
    /// Normalize a raw schedule payload.
    ///
    /// # Errors
    /// * `InvalidAmount` / `NegativeAmount` - an amount is malformed
    /// * `InvalidTimestamp` - an instant is malformed
    /// * `InvalidSchedule` - `end_time` is before `start_time`
    pub fn new(info: TokenDistroInfo, stream_type: Option<StreamType>) -> Result<Self, DistroError> {
        let TokenDistroInfo {
            contract_address,
            initial_amount,
            locked_amount,
            total_tokens,
            start_time,
            cliff_time,
            end_time,
        } = info;

        let initial_amount = initial_amount.into_amount()?;
        let locked_amount = locked_amount.into_amount()?;
        let total_tokens = total_tokens.into_amount()?;
        let start_time = start_time.into_timestamp()?;
        let cliff_time = cliff_time.into_timestamp()?;
        let end_time = end_time.into_timestamp()?;

        if end_time < start_time {
            return Err(DistroError::InvalidSchedule);
        }
        let duration = end_time
            .checked_sub(start_time)
            .ok_or(DistroError::InvalidTimestamp)?;

        let stream_type = stream_type.unwrap_or_default();
        log::debug!(
            "token distro {contract_address} ({stream_type}): start={start_time} cliff={cliff_time} end={end_time} total={total_tokens}"
        );

        Ok(TokenDistroHelper {
            contract_address,
            initial_amount,
            locked_amount,
            total_tokens,
            start_time,
            cliff_time,
            end_time,
            duration,
            stream_type,
        })
    }

    pub fn from_json(json: &str, stream_type: Option<StreamType>) -> Result<Self, DistroError> {
        Self::new(TokenDistroInfo::from_json(json)?, stream_type)
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub fn initial_amount(&self) -> &TokenAmount {
        &self.initial_amount
    }

    pub fn locked_amount(&self) -> &TokenAmount {
        &self.locked_amount
    }

    pub fn total_tokens(&self) -> &TokenAmount {
        &self.total_tokens
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn cliff_time(&self) -> Timestamp {
        self.cliff_time
    }

    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    /// `end_time - start_time` in milliseconds.
    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn stream_type(&self) -> StreamType {
        self.stream_type
    }

    /// Milliseconds until `end_time`, never negative.
    pub fn time_remaining(&self, now: Timestamp) -> i64 {
        self.end_time.saturating_sub(now).max(0)
    }

    /// Milliseconds until `start_time`, never negative.
    pub fn time_until_start(&self, now: Timestamp) -> i64 {
        self.start_time.saturating_sub(now).max(0)
    }

    /// True once `now` is strictly past `start_time`.
    pub fn has_started(&self, now: Timestamp) -> bool {
        now > self.start_time
    }

    /// Elapsed share of the schedule in `[0, 100]`.
    ///
    /// A zero-length schedule is complete from `start_time` onward.
    pub fn percent_complete(&self, now: Timestamp) -> BigDecimal {
        if self.duration == 0 {
            if now < self.start_time {
                return BigDecimal::zero();
            }
            return BigDecimal::from(100);
        }
        let elapsed = (self.duration - self.time_remaining(now)).max(0);
        BigDecimal::from(elapsed) * BigDecimal::from(100) / BigDecimal::from(self.duration)
    }

    /// Amount unlocked across the whole schedule at `now`.
    pub fn globally_claimable_at(&self, now: Timestamp) -> TokenAmount {
        if now < self.start_time {
            return TokenAmount::zero();
        }
        // Checked before the cliff so that `now == end_time` is always a
        // full release, also when the cliff sits on the end.
        if now >= self.end_time {
            return self.total_tokens.clone();
        }
        if now <= self.cliff_time {
            return self.initial_amount.clone();
        }

        // start <= now < end, so duration > 0 here.
        let delta_time = BigInt::from(now - self.start_time);
        let released = self
            .locked_amount
            .mul_div(&delta_time, &BigInt::from(self.duration))
            .unwrap_or_default();
        &self.initial_amount + &released
    }

    /// Share of `amount` that is unlocked at `now`, truncated toward zero.
    pub fn liquid_part(&self, amount: &TokenAmount, now: Timestamp) -> TokenAmount {
        self.globally_claimable_at(now)
            .mul_div(amount.as_bigint(), self.total_tokens.as_bigint())
            .unwrap_or_default()
    }

    /// Share of `amount` still waiting to stream out.
    pub fn locked_part(&self, amount: &TokenAmount, now: Timestamp) -> TokenAmount {
        amount - &self.liquid_part(amount, now)
    }

    /// Tokens per second at which the locked part of `amount` unlocks.
    pub fn stream_part_per_second(&self, amount: &TokenAmount, now: Timestamp) -> BigDecimal {
        let remaining = self.time_remaining(now);
        if remaining <= 0 {
            return BigDecimal::zero();
        }
        let to_finish = BigDecimal::from(remaining) / BigDecimal::from(MS_PER_SECOND);
        self.locked_part(amount, now).to_decimal() / to_finish
    }

    pub fn stream_part_per_week(&self, amount: &TokenAmount, now: Timestamp) -> BigDecimal {
        self.stream_part_per_second(amount, now) * BigDecimal::from(SECONDS_PER_WEEK)
    }

    /// What the user can claim right now on this helper's stream.
    ///
    /// Negative when the recorded claim is ahead of the unlocked share (stale
    /// snapshot, pending confirmation); the caller decides how to show it.
    pub fn user_claimable_at(&self, balances: &Balances, now: Timestamp) -> TokenAmount {
        let stream = balances.stream(self.stream_type);
        let claimable = &self.liquid_part(stream.allocated, now) - stream.claimed;
        if claimable.is_negative() {
            let (allocated_field, claimed_field) = self.stream_type.field_names();
            log::warn!(
                "{} claimed more than unlocked: {}={} {}={} claimable={}",
                self.contract_address,
                allocated_field,
                stream.allocated,
                claimed_field,
                stream.claimed,
                claimable
            );
        }
        claimable
    }

    /// Unlocked share of total supply, in percent.
    pub fn global_release_percentage(&self, now: Timestamp) -> BigDecimal {
        if self.total_tokens.is_zero() {
            return BigDecimal::zero();
        }
        self.globally_claimable_at(now).to_decimal() * BigDecimal::from(100)
            / self.total_tokens.to_decimal()
    }
}
