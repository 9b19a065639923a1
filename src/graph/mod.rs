//! Plan graph module.
//!
//! This module contains the typed resource nodes the planner emits and
//! the provisioning engine consumes.

pub mod types;

// Re-export key types for easier access
pub use types::{
    EndpointService, IngressRule, InstanceIdentity, InternetGateway, NatPlacement, NetworkPlan,
    Route, RouteTable, RouteTarget, SharingPlan, Subnet, Vpc, VpcEndpoint,
};
