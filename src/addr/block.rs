//! CIDR address block value type.

use serde::{Serialize, Serializer};

use super::math::{addr_to_u32, u32_to_addr, AddressError};

/// An IPv4 network block in CIDR notation.
///
/// Immutable once constructed. The base address is stored as a u32 so
/// block arithmetic stays integer-only; formatting happens at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressBlock {
    base: u32,
    prefix: u8,
}

impl AddressBlock {
    /// Build a block from an already-converted base address and prefix.
    pub fn new(base: u32, prefix: u8) -> Self {
        AddressBlock { base, prefix }
    }

    /// Parse a block from CIDR notation, e.g. "10.10.0.0/16".
    ///
    /// The prefix part is parsed leniently here; policy checks on the
    /// prefix value (16 for top-level, 20 for subnets) belong to the
    /// allocator, which owns that invariant.
    pub fn parse(cidr: &str) -> Result<Self, AddressError> {
        let (addr, prefix) = cidr
            .split_once('/')
            .ok_or_else(|| AddressError::MalformedAddress(cidr.to_string()))?;
        let base = addr_to_u32(addr)?;
        let prefix: u8 = prefix
            .parse()
            .ok()
            .filter(|p| *p <= 32)
            .ok_or_else(|| AddressError::MalformedAddress(cidr.to_string()))?;
        Ok(AddressBlock { base, prefix })
    }

    /// Base address as a u32.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Prefix length.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Number of addresses covered by this block.
    ///
    /// Widened to u64 so a /0 block does not overflow.
    pub fn size(&self) -> u64 {
        1u64 << (32 - self.prefix)
    }

    /// First address past the end of this block.
    pub fn end(&self) -> u64 {
        u64::from(self.base) + self.size()
    }

    /// Whether `other` lies entirely inside this block.
    pub fn contains(&self, other: &AddressBlock) -> bool {
        other.base >= self.base && other.end() <= self.end()
    }

    /// Whether this block and `other` share any address.
    pub fn overlaps(&self, other: &AddressBlock) -> bool {
        u64::from(self.base) < other.end() && u64::from(other.base) < self.end()
    }
}

impl std::fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", u32_to_addr(self.base), self.prefix)
    }
}

impl Serialize for AddressBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
