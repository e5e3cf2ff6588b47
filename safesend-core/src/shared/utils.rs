//! Utility functions for SafeSend
//!
//! Address validation and hex helpers shared by the core modules.

use crate::shared::constants::ADDRESS_HEX_LENGTH;
use crate::shared::error::SafeSendError;
use ethers::types::Address;
use ethers::utils::to_checksum;

/// Parse an Ethereum address.
///
/// Accepts 40 hex digits with an optional `0x` prefix. All-lowercase and
/// all-uppercase input is taken as-is; mixed-case input must carry a valid
/// EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, SafeSendError> {
    let hex_part = input.strip_prefix("0x").unwrap_or(input);

    if hex_part.len() != ADDRESS_HEX_LENGTH {
        return Err(SafeSendError::invalid_recipient(format!(
            "{:?} must be {} hex characters long",
            input, ADDRESS_HEX_LENGTH
        )));
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SafeSendError::invalid_recipient(format!(
            "{:?} contains invalid hex characters",
            input
        )));
    }

    let bytes = hex::decode(hex_part)
        .map_err(|e| SafeSendError::invalid_recipient(format!("{:?}: {}", input, e)))?;
    let address = Address::from_slice(&bytes);

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = to_checksum(&address, None);
        if checksummed[2..] != *hex_part {
            return Err(SafeSendError::invalid_recipient(format!(
                "{:?} has an invalid checksum",
                input
            )));
        }
    }

    Ok(address)
}

/// Whether `input` is a well-formed address (see [`parse_address`]).
pub fn is_valid_address(input: &str) -> bool {
    parse_address(input).is_ok()
}

/// EIP-55 checksummed rendering of an address.
pub fn checksum_address(address: &Address) -> String {
    to_checksum(address, None)
}

/// Convert bytes to hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
