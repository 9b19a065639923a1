//! Address arithmetic and tier/zone allocation module.
//!
//! This module handles the addressing half of the planner: dotted-quad
//! conversions, the CIDR block value type, and the deterministic
//! partition of the top-level block across tiers and zones.

pub mod allocator;
pub mod block;
pub mod math;

// Re-export commonly used types
pub use allocator::{
    allocate_tiers, Allocation, AllocationError, Tier, TierBlock, SUBNET_PREFIX,
    TOP_LEVEL_PREFIX, ZONE_COUNT,
};
pub use block::AddressBlock;
pub use math::{addr_to_u32, u32_to_addr, AddressError};
