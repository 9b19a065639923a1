//! Dotted-quad address arithmetic.
//!
//! This file contains the integer conversions the allocator builds on.
//! All block math in the crate goes through `addr_to_u32`/`u32_to_addr`
//! so that octet handling lives in exactly one place.

/// Errors raised while parsing a dotted-quad address
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("malformed address '{0}': expected four octets in 0-255")]
    MalformedAddress(String),
}

/// Convert a dotted-quad IPv4 address string to its u32 value.
///
/// Fails with [`AddressError::MalformedAddress`] unless the string has
/// exactly four parts and every part parses to an octet in 0-255.
pub fn addr_to_u32(addr: &str) -> Result<u32, AddressError> {
    let parts: Vec<&str> = addr.split('.').collect();
    if parts.len() != 4 {
        return Err(AddressError::MalformedAddress(addr.to_string()));
    }

    let mut value: u32 = 0;
    for part in parts {
        let octet: u8 = part
            .parse()
            .map_err(|_| AddressError::MalformedAddress(addr.to_string()))?;
        value = (value << 8) | u32::from(octet);
    }
    Ok(value)
}

/// Convert a u32 value back to its dotted-quad string form.
///
/// Total for every input; exact inverse of [`addr_to_u32`].
pub fn u32_to_addr(value: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (value >> 24) & 0xff,
        (value >> 16) & 0xff,
        (value >> 8) & 0xff,
        value & 0xff
    )
}
