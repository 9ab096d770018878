//! Wallet Input Helpers
//!
//! Checks used by wallet send screens before they hand user input to the rest of
//! the crate: recipient address validation, amount parsing and extraction of an
//! address from a scanned QR payload. These helpers answer yes/no for the UI;
//! the trust engine still performs its own validation.

use thiserror::Error;

use crate::address::Address;

/// Decimal places of ether (1 ether = 10^18 wei).
pub const ETHER_DECIMALS: usize = 18;

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// URI scheme used by EIP-681 payment requests.
const ETHEREUM_URI_SCHEME: &str = "ethereum:";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid character '{0}' in amount")]
    InvalidCharacter(char),

    #[error("Amount has {0} decimal places, at most 18 are allowed")]
    TooManyDecimals(usize),

    #[error("Amount is too large")]
    Overflow,
}

/// Whether `address` is a well-formed 20-byte hex address.
pub fn is_address_valid(address: &str) -> bool {
    Address::parse(address).is_ok()
}

/// Converts a decimal ether amount such as `"1.25"` to wei.
///
/// Plain decimal notation only: digits with at most one `.`, no sign and no
/// exponent. Amounts finer than one wei are rejected rather than truncated.
pub fn eth_to_wei(amount: &str) -> Result<u128, AmountError> {
    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::Empty);
    }
    if let Some(bad) = whole
        .chars()
        .chain(fraction.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(AmountError::InvalidCharacter(bad));
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(AmountError::TooManyDecimals(fraction.len()));
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| AmountError::Overflow)?
            .checked_mul(WEI_PER_ETHER)
            .ok_or(AmountError::Overflow)?
    };

    let fraction_wei = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = ETHER_DECIMALS);
        padded.parse::<u128>().map_err(|_| AmountError::Overflow)?
    };

    whole_wei
        .checked_add(fraction_wei)
        .ok_or(AmountError::Overflow)
}

/// Whether `amount` is a valid ether amount for a transfer.
pub fn is_valid_eth_amount(amount: &str) -> bool {
    eth_to_wei(amount).is_ok()
}

/// Pulls the recipient address out of a scanned QR payload.
///
/// Accepts a bare address or an EIP-681 style URI, for example
/// `ethereum:0xabc...@1?value=1e18` or `ethereum:pay-0xabc...`.
///
/// # Returns
///
/// * `Some(Address)` - Payload carries a well-formed address
/// * `None` - No address could be found
pub fn extract_address_from_qr_string(payload: &str) -> Option<Address> {
    let payload = payload.trim();
    let target = match payload.get(..ETHEREUM_URI_SCHEME.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(ETHEREUM_URI_SCHEME) => {
            &payload[ETHEREUM_URI_SCHEME.len()..]
        }
        _ => payload,
    };
    let target = target.strip_prefix("pay-").unwrap_or(target);
    let end = target.find(['@', '?', '/']).unwrap_or(target.len());

    Address::parse(&target[..end]).ok()
}
