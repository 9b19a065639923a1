//! Tier/zone address allocation.
//!
//! This file carves the top-level /16 into the fixed set of /20 blocks
//! the topology is built over. Assignment is strictly sequential so the
//! same input block always produces the same layout.

use log::debug;

use super::block::AddressBlock;

/// Prefix length required of the top-level block.
pub const TOP_LEVEL_PREFIX: u8 = 16;

/// Prefix length of every derived subnet block (4096 addresses each).
pub const SUBNET_PREFIX: u8 = 20;

/// Number of placement zones per tier. Zones are late-bound platform
/// tokens and are only ever addressed by position.
pub const ZONE_COUNT: usize = 2;

/// Network tier classification for subnet allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Internet-facing tier with public subnets
    Web,
    /// Egress-only private tier
    App,
    /// Fully isolated tier with no route out of the network
    Data,
}

impl Tier {
    /// All tiers in allocation order.
    pub const ALL: [Tier; 3] = [Tier::Web, Tier::App, Tier::Data];

    /// Lowercase tier name used in deterministic resource naming.
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Web => "web",
            Tier::App => "app",
            Tier::Data => "data",
        }
    }

    /// Whether subnets in this tier are publicly reachable.
    pub fn is_public(&self) -> bool {
        matches!(self, Tier::Web)
    }
}

/// Errors raised while partitioning the top-level block
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("top-level block must be a /{TOP_LEVEL_PREFIX}, got /{0}")]
    InvalidTopLevelPrefix(u8),
}

/// One allocated tier/zone block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierBlock {
    pub tier: Tier,
    pub zone_index: usize,
    pub block: AddressBlock,
}

/// The complete tier/zone partition of a top-level block.
///
/// Entries are ordered Web zone 0, Web zone 1, App zone 0, App zone 1,
/// Data zone 0, Data zone 1 and never reordered after allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    blocks: Vec<TierBlock>,
}

impl Allocation {
    /// All allocated blocks in allocation order.
    pub fn blocks(&self) -> &[TierBlock] {
        &self.blocks
    }

    /// Blocks belonging to one tier, in zone order.
    pub fn tier_blocks(&self, tier: Tier) -> impl Iterator<Item = &TierBlock> {
        self.blocks.iter().filter(move |b| b.tier == tier)
    }
}

/// Partition a top-level /16 block into the fixed tier/zone layout.
///
/// Blocks are assigned sequentially from the base of the top-level
/// block, tier-major (Web, App, Data) and zone-minor (0, 1). The six
/// /20 blocks occupy the first 24,576 addresses; the remainder of the
/// /16 is left untouched as expansion reserve.
pub fn allocate_tiers(top_level: &AddressBlock) -> Result<Allocation, AllocationError> {
    if top_level.prefix() != TOP_LEVEL_PREFIX {
        return Err(AllocationError::InvalidTopLevelPrefix(top_level.prefix()));
    }

    let subnet_size = 1u32 << (32 - SUBNET_PREFIX);
    let mut next_base = top_level.base();
    let mut blocks = Vec::with_capacity(Tier::ALL.len() * ZONE_COUNT);

    for tier in Tier::ALL {
        for zone_index in 0..ZONE_COUNT {
            let block = AddressBlock::new(next_base, SUBNET_PREFIX);
            debug!(
                "Allocated block {} to tier {} zone {}",
                block,
                tier.name(),
                zone_index
            );
            blocks.push(TierBlock {
                tier,
                zone_index,
                block,
            });
            next_base += subnet_size;
        }
    }

    Ok(Allocation { blocks })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocate(cidr: &str) -> Allocation {
        let top = AddressBlock::parse(cidr).unwrap();
        allocate_tiers(&top).unwrap()
    }

    #[test]
    fn test_rejects_non_16_prefix() {
        let top = AddressBlock::parse("10.10.0.0/24").unwrap();
        assert_eq!(
            allocate_tiers(&top),
            Err(AllocationError::InvalidTopLevelPrefix(24))
        );

        let top = AddressBlock::parse("10.0.0.0/8").unwrap();
        assert_eq!(
            allocate_tiers(&top),
            Err(AllocationError::InvalidTopLevelPrefix(8))
        );
    }

    #[test]
    fn test_concrete_layout() {
        let allocation = allocate("10.10.0.0/16");
        let rendered: Vec<(Tier, usize, String)> = allocation
            .blocks()
            .iter()
            .map(|b| (b.tier, b.zone_index, b.block.to_string()))
            .collect();

        assert_eq!(
            rendered,
            vec![
                (Tier::Web, 0, "10.10.0.0/20".to_string()),
                (Tier::Web, 1, "10.10.16.0/20".to_string()),
                (Tier::App, 0, "10.10.32.0/20".to_string()),
                (Tier::App, 1, "10.10.48.0/20".to_string()),
                (Tier::Data, 0, "10.10.64.0/20".to_string()),
                (Tier::Data, 1, "10.10.80.0/20".to_string()),
            ]
        );
    }

    #[test]
    fn test_blocks_disjoint_and_contained() {
        let top = AddressBlock::parse("172.20.0.0/16").unwrap();
        let allocation = allocate_tiers(&top).unwrap();
        let blocks = allocation.blocks();

        assert_eq!(blocks.len(), 6);
        for (i, a) in blocks.iter().enumerate() {
            assert!(top.contains(&a.block), "{} not inside {}", a.block, top);
            assert_eq!(a.block.prefix(), SUBNET_PREFIX);
            for b in &blocks[i + 1..] {
                assert!(
                    !a.block.overlaps(&b.block),
                    "{} overlaps {}",
                    a.block,
                    b.block
                );
            }
        }

        // The six blocks fill the first 24,576 addresses exactly.
        let last = blocks.last().unwrap().block;
        assert_eq!(last.end() - u64::from(top.base()), 24_576);
    }

    #[test]
    fn test_allocation_is_deterministic() {
        let top = AddressBlock::parse("10.10.0.0/16").unwrap();
        let first = allocate_tiers(&top).unwrap();
        let second = allocate_tiers(&top).unwrap();
        assert_eq!(first.blocks(), second.blocks());
    }

    #[test]
    fn test_tier_blocks_filter() {
        let allocation = allocate("10.10.0.0/16");
        let app: Vec<_> = allocation.tier_blocks(Tier::App).collect();
        assert_eq!(app.len(), 2);
        assert_eq!(app[0].zone_index, 0);
        assert_eq!(app[1].zone_index, 1);
        assert_eq!(app[0].block.to_string(), "10.10.32.0/20");
    }
}
