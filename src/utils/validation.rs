//! Plan validation utilities.
//!
//! This module re-verifies the structural invariants of a finished plan
//! before it is written out. A correct pipeline never produces a plan
//! that fails these checks; they exist so a regression surfaces here,
//! with a typed error, instead of inside the provisioning engine.

use std::collections::HashSet;

use crate::addr::{Tier, ZONE_COUNT};
use crate::graph::{NetworkPlan, RouteTarget};

/// Structural defects detectable in a finished plan
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlanCheckError {
    #[error("expected {expected} subnets, found {found}")]
    WrongSubnetCount { expected: usize, found: usize },
    #[error("expected one route table per tier, found {0}")]
    WrongRouteTableCount(usize),
    #[error("subnet {0} lies outside the top-level block")]
    SubnetOutsideBlock(String),
    #[error("subnets {0} and {1} overlap")]
    OverlappingSubnets(String, String),
    #[error("route table {table} references unknown subnet {subnet}")]
    DanglingAssociation { table: String, subnet: String },
    #[error("route table {table} has {found} default route(s), expected {expected}")]
    WrongDefaultRouteCount {
        table: String,
        expected: usize,
        found: usize,
    },
    #[error("route table {table} default route has unexpected target")]
    WrongDefaultRouteTarget { table: String },
    #[error("NAT placement references unknown or non-public subnet {0}")]
    BadNatPlacement(String),
    #[error("sharing plan covers {found} subnets, expected {expected}")]
    IncompleteSharingPlan { expected: usize, found: usize },
}

/// Check every structural invariant of a finished plan.
pub fn check_plan(plan: &NetworkPlan) -> Result<(), PlanCheckError> {
    let expected_subnets = Tier::ALL.len() * ZONE_COUNT;
    if plan.subnets.len() != expected_subnets {
        return Err(PlanCheckError::WrongSubnetCount {
            expected: expected_subnets,
            found: plan.subnets.len(),
        });
    }
    if plan.route_tables.len() != Tier::ALL.len() {
        return Err(PlanCheckError::WrongRouteTableCount(plan.route_tables.len()));
    }

    for (i, a) in plan.subnets.iter().enumerate() {
        if !plan.vpc.cidr.contains(&a.cidr) {
            return Err(PlanCheckError::SubnetOutsideBlock(a.id.clone()));
        }
        for b in &plan.subnets[i + 1..] {
            if a.cidr.overlaps(&b.cidr) {
                return Err(PlanCheckError::OverlappingSubnets(
                    a.id.clone(),
                    b.id.clone(),
                ));
            }
        }
    }

    let subnet_ids: HashSet<&str> = plan.subnets.iter().map(|s| s.id.as_str()).collect();
    for table in &plan.route_tables {
        for subnet in &table.subnet_ids {
            if !subnet_ids.contains(subnet.as_str()) {
                return Err(PlanCheckError::DanglingAssociation {
                    table: table.id.clone(),
                    subnet: subnet.clone(),
                });
            }
        }
    }

    for (tier, expected, target) in [
        (Tier::Web, 1, Some(RouteTarget::InternetGateway)),
        (Tier::App, 1, Some(RouteTarget::NatInstance)),
        (Tier::Data, 0, None),
    ] {
        let table = plan
            .route_table(tier)
            .ok_or(PlanCheckError::WrongRouteTableCount(plan.route_tables.len()))?;
        let defaults: Vec<_> = table.default_routes().collect();
        if defaults.len() != expected {
            return Err(PlanCheckError::WrongDefaultRouteCount {
                table: table.id.clone(),
                expected,
                found: defaults.len(),
            });
        }
        if let Some(expected_target) = target {
            if defaults[0].target != expected_target {
                return Err(PlanCheckError::WrongDefaultRouteTarget {
                    table: table.id.clone(),
                });
            }
        }
    }

    let nat_host_public = plan
        .subnets
        .iter()
        .any(|s| s.id == plan.nat.subnet_id && s.public);
    if !nat_host_public {
        return Err(PlanCheckError::BadNatPlacement(plan.nat.subnet_id.clone()));
    }

    if let Some(sharing) = &plan.sharing {
        if sharing.subnet_ids.len() != expected_subnets {
            return Err(PlanCheckError::IncompleteSharingPlan {
                expected: expected_subnets,
                found: sharing.subnet_ids.len(),
            });
        }
    }

    Ok(())
}
