//! Pricing

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{Currency, EUR, GBP, INR, USD},
};
use thiserror::Error;

/// Errors that can occur while converting or summing prices.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// Amount is negative or does not fit in minor units.
    #[error("invalid price amount: {0}")]
    InvalidAmount(Decimal),

    /// Currency code is not one of the supported codes.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Multiplying a unit price by a quantity overflowed (minor units, quantity).
    #[error("price overflow multiplying {0} by {1}")]
    Overflow(i64, u32),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Resolve an ISO currency code (e.g. "INR") to a currency.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes other than INR, GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => Ok(INR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        _ => Err(PriceError::UnknownCurrency(code.to_string())),
    }
}

/// Convert a decimal amount in major units into money, rounding to the currency's minor unit.
///
/// # Errors
///
/// Returns [`PriceError::InvalidAmount`] if the amount is negative or too large.
pub fn money_from_decimal(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::InvalidAmount(amount));
    }

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(PriceError::InvalidAmount(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Convert money back into a decimal amount in major units.
pub fn money_to_decimal(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] if the result does not fit in minor units.
pub fn line_total<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PriceError> {
    let minor_units = unit_price.to_minor_units();

    let total = minor_units
        .checked_mul(i64::from(quantity))
        .ok_or(PriceError::Overflow(minor_units, quantity))?;

    Ok(Money::from_minor(total, unit_price.currency()))
}

/// Sums a list of amounts, starting from zero in the given currency.
///
/// # Errors
///
/// Returns [`PriceError::Money`] if any amount is in a different currency.
pub fn total_price<'a>(
    amounts: impl IntoIterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PriceError> {
    let total = amounts
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, amount| acc.add(amount))?;

    Ok(total)
}
