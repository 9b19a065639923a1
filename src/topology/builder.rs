//! Core topology construction.
//!
//! This file turns an [`Allocation`] into the routing graph: the network
//! container, the internet gateway, one route table per tier, and the
//! subnets with their table associations. Later pipeline stages extend
//! the value this stage returns; nothing here is mutated in place after
//! the stage completes.

use log::info;

use crate::addr::{AddressBlock, Allocation, Tier};
use crate::graph::{InternetGateway, Route, RouteTable, RouteTarget, Subnet, Vpc};

/// Catch-all destination used by default routes.
pub const DEFAULT_DESTINATION: &str = "0.0.0.0/0";

/// The core resource graph produced by the build stage.
///
/// NAT placement, endpoints, and the sharing plan are layered on by the
/// later stages; each stage consumes this value and returns a new one.
#[derive(Debug, Clone)]
pub struct CoreTopology {
    pub vpc: Vpc,
    pub gateway: InternetGateway,
    pub route_tables: Vec<RouteTable>,
    pub subnets: Vec<Subnet>,
}

impl CoreTopology {
    /// The route table serving one tier.
    pub fn route_table(&self, tier: Tier) -> &RouteTable {
        // One table per tier is constructed unconditionally below.
        self.route_tables
            .iter()
            .find(|rt| rt.tier == tier)
            .expect("route table exists for every tier")
    }

    fn route_table_mut(&mut self, tier: Tier) -> &mut RouteTable {
        self.route_tables
            .iter_mut()
            .find(|rt| rt.tier == tier)
            .expect("route table exists for every tier")
    }
}

/// Logical subnet id for a tier/zone position.
///
/// Zone identifiers are late-bound platform tokens, so the suffix is
/// derived from the zone's position, never its literal value.
pub fn subnet_id(environment: &str, tier: Tier, zone_index: usize) -> String {
    format!("{}-{}-az{}", environment, tier.name(), zone_index)
}

/// Build the core topology over an allocation.
pub fn build_topology(
    environment: &str,
    top_level: &AddressBlock,
    allocation: &Allocation,
) -> CoreTopology {
    let vpc = Vpc {
        id: format!("{}-vpc", environment),
        cidr: *top_level,
        enable_dns_resolution: true,
    };

    // The gateway is attached explicitly. Containers declared without a
    // built-in subnet layout do not get an implicit gateway.
    let gateway = InternetGateway {
        id: format!("{}-igw", environment),
        vpc_id: vpc.id.clone(),
    };

    let route_tables = Tier::ALL
        .iter()
        .map(|tier| RouteTable {
            id: format!("{}-{}-rtb", environment, tier.name()),
            tier: *tier,
            routes: Vec::new(),
            subnet_ids: Vec::new(),
        })
        .collect();

    let mut topology = CoreTopology {
        vpc,
        gateway,
        route_tables,
        subnets: Vec::with_capacity(allocation.blocks().len()),
    };

    for tier_block in allocation.blocks() {
        let subnet = Subnet {
            id: subnet_id(environment, tier_block.tier, tier_block.zone_index),
            tier: tier_block.tier,
            zone_index: tier_block.zone_index,
            cidr: tier_block.block,
            public: tier_block.tier.is_public(),
        };
        topology
            .route_table_mut(tier_block.tier)
            .subnet_ids
            .push(subnet.id.clone());
        topology.subnets.push(subnet);
    }

    // Only the Web tier routes straight to the gateway.
    topology
        .route_table_mut(Tier::Web)
        .routes
        .push(Route {
            destination: DEFAULT_DESTINATION.to_string(),
            target: RouteTarget::InternetGateway,
        });

    info!(
        "Built core topology: {} subnets, {} route tables in {}",
        topology.subnets.len(),
        topology.route_tables.len(),
        topology.vpc.cidr
    );

    topology
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::allocate_tiers;

    fn build(cidr: &str) -> CoreTopology {
        let top = AddressBlock::parse(cidr).unwrap();
        let allocation = allocate_tiers(&top).unwrap();
        build_topology("test", &top, &allocation)
    }

    #[test]
    fn test_container_and_gateway() {
        let topology = build("10.10.0.0/16");
        assert_eq!(topology.vpc.id, "test-vpc");
        assert!(topology.vpc.enable_dns_resolution);
        assert_eq!(topology.gateway.vpc_id, "test-vpc");
    }

    #[test]
    fn test_one_route_table_per_tier() {
        let topology = build("10.10.0.0/16");
        assert_eq!(topology.route_tables.len(), 3);
        for tier in Tier::ALL {
            let rt = topology.route_table(tier);
            assert_eq!(rt.subnet_ids.len(), 2);
        }
    }

    #[test]
    fn test_subnets_follow_allocation() {
        let topology = build("10.10.0.0/16");
        assert_eq!(topology.subnets.len(), 6);

        let web0 = &topology.subnets[0];
        assert_eq!(web0.id, "test-web-az0");
        assert_eq!(web0.cidr.to_string(), "10.10.0.0/20");
        assert!(web0.public);

        let data1 = &topology.subnets[5];
        assert_eq!(data1.id, "test-data-az1");
        assert_eq!(data1.cidr.to_string(), "10.10.80.0/20");
        assert!(!data1.public);
    }

    #[test]
    fn test_only_web_tier_is_public() {
        let topology = build("10.10.0.0/16");
        for subnet in &topology.subnets {
            assert_eq!(subnet.public, subnet.tier == Tier::Web);
        }
    }

    #[test]
    fn test_default_route_on_web_only() {
        let topology = build("10.10.0.0/16");

        let web_defaults: Vec<_> = topology.route_table(Tier::Web).default_routes().collect();
        assert_eq!(web_defaults.len(), 1);
        assert_eq!(web_defaults[0].target, RouteTarget::InternetGateway);

        assert_eq!(topology.route_table(Tier::App).routes.len(), 0);
        assert_eq!(topology.route_table(Tier::Data).routes.len(), 0);
    }

    #[test]
    fn test_associations_reference_existing_subnets() {
        let topology = build("10.10.0.0/16");
        for rt in &topology.route_tables {
            for id in &rt.subnet_ids {
                let subnet = topology.subnets.iter().find(|s| &s.id == id).unwrap();
                assert_eq!(subnet.tier, rt.tier);
            }
        }
    }
}
