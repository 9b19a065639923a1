//! NAT egress placement.
//!
//! This file chooses where the egress compute instance lives and wires
//! the App tier's default route through it. The Data tier is left with
//! no default route at all; it has no path out of the network.

use log::info;

use crate::addr::Tier;
use crate::graph::{IngressRule, InstanceIdentity, NatPlacement, Route, RouteTarget};

use super::builder::{CoreTopology, DEFAULT_DESTINATION};

/// Managed capability grant giving the instance remote session access.
const SESSION_ACCESS_POLICY: &str = "AmazonSSMManagedInstanceCore";

/// Errors raised while placing the egress instance
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NatError {
    #[error("no public subnet available for egress placement")]
    NoPublicSubnet,
}

/// Place the NAT instance and route the App tier through it.
///
/// Placement is deterministic: the first public subnet in allocation
/// order hosts the instance. No failover or multi-zone redundancy is
/// planned. The inbound trust rule covers the entire top-level block
/// rather than just the App tier; the Data tier has no route to the
/// instance regardless, but reviewers narrowing the rule should start
/// here.
pub fn place_nat(
    mut topology: CoreTopology,
    environment: &str,
    instance_type: &str,
    user_data: String,
) -> Result<(CoreTopology, NatPlacement), NatError> {
    let host_subnet = topology
        .subnets
        .iter()
        .find(|s| s.public)
        .ok_or(NatError::NoPublicSubnet)?;

    let nat = NatPlacement {
        id: format!("{}-nat", environment),
        subnet_id: host_subnet.id.clone(),
        instance_type: instance_type.to_string(),
        identity: InstanceIdentity {
            id: format!("{}-nat-role", environment),
            managed_policies: vec![SESSION_ACCESS_POLICY.to_string()],
        },
        ingress: IngressRule {
            protocol: "-1".to_string(),
            source_cidr: topology.vpc.cidr.to_string(),
        },
        // The platform drops forwarded packets while the check is on.
        source_dest_check: false,
        user_data,
    };

    info!(
        "Placed NAT instance {} on subnet {}",
        nat.id, nat.subnet_id
    );

    let app_table = topology
        .route_tables
        .iter_mut()
        .find(|rt| rt.tier == Tier::App)
        .expect("route table exists for every tier");
    app_table.routes.push(Route {
        destination: DEFAULT_DESTINATION.to_string(),
        target: RouteTarget::NatInstance,
    });

    Ok((topology, nat))
}
