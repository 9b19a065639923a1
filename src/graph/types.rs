//! Plan graph type definitions.
//!
//! This module contains the typed resource nodes that make up a finished
//! network plan. The provisioning engine consumes these structures as
//! plain data; none of them carry behavior beyond construction, and the
//! whole graph is immutable once planning completes.

use serde::Serialize;

use crate::addr::{AddressBlock, Tier};

// ============================================================================
// Core Topology Types
// ============================================================================

/// The network container every other resource lives in.
#[derive(Serialize, Debug, Clone)]
pub struct Vpc {
    /// Logical id, derived from the environment prefix
    pub id: String,
    /// Top-level address block
    pub cidr: AddressBlock,
    /// Container-level DNS resolution, always enabled for this layout
    pub enable_dns_resolution: bool,
}

/// The internet gateway providing bidirectional reachability for
/// public subnets.
///
/// Created and attached explicitly; the engine must not rely on the
/// container implicitly creating one, because containers declared
/// without a built-in subnet layout do not get one.
#[derive(Serialize, Debug, Clone)]
pub struct InternetGateway {
    /// Logical id
    pub id: String,
    /// Id of the [`Vpc`] this gateway is attached to
    pub vpc_id: String,
}

/// A placement unit bound to one block, one zone, and one tier.
#[derive(Serialize, Debug, Clone)]
pub struct Subnet {
    /// Logical id, derived from environment prefix, tier, and zone position
    pub id: String,
    /// Tier this subnet belongs to
    pub tier: Tier,
    /// Positional zone reference; the engine resolves it to a concrete
    /// platform zone identifier at provisioning time
    pub zone_index: usize,
    /// Address block assigned to this subnet
    pub cidr: AddressBlock,
    /// Whether instances here receive public addresses (Web tier only)
    pub public: bool,
}

/// Target of a route entry.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RouteTarget {
    /// The internet gateway
    InternetGateway,
    /// The NAT egress instance
    NatInstance,
    /// A service endpoint, referenced by logical id
    VpcEndpoint(String),
}

/// A single `(destination, target)` routing entry.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Destination CIDR, e.g. "0.0.0.0/0"
    pub destination: String,
    /// Where matching traffic is sent
    pub target: RouteTarget,
}

/// Per-tier route table.
#[derive(Serialize, Debug, Clone)]
pub struct RouteTable {
    /// Logical id
    pub id: String,
    /// Tier this table routes for
    pub tier: Tier,
    /// Route entries, appended in pipeline order
    pub routes: Vec<Route>,
    /// Ids of the subnets associated with this table
    pub subnet_ids: Vec<String>,
}

impl RouteTable {
    /// Routes whose destination is the catch-all "0.0.0.0/0".
    pub fn default_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|r| r.destination == "0.0.0.0/0")
    }
}

// ============================================================================
// Egress and Endpoint Types
// ============================================================================

/// Identity descriptor for the NAT instance.
///
/// Scoped to the minimum external management capability the instance
/// needs: remote session access, nothing broader.
#[derive(Serialize, Debug, Clone)]
pub struct InstanceIdentity {
    /// Logical id of the identity/role
    pub id: String,
    /// Managed capability grants attached to the identity
    pub managed_policies: Vec<String>,
}

/// Network-permission rule attached to the NAT instance.
#[derive(Serialize, Debug, Clone)]
pub struct IngressRule {
    /// Protocol selector; "-1" means all protocols
    pub protocol: String,
    /// Source address range the rule trusts
    pub source_cidr: String,
}

/// The chosen egress compute placement.
#[derive(Serialize, Debug, Clone)]
pub struct NatPlacement {
    /// Logical id
    pub id: String,
    /// Id of the public subnet hosting the instance
    pub subnet_id: String,
    /// Instance size, from configuration
    pub instance_type: String,
    /// Identity granted to the instance
    pub identity: InstanceIdentity,
    /// Inbound trust rule for forwarded traffic
    pub ingress: IngressRule,
    /// Must be false for the instance to forward packets; the platform
    /// drops forwarded traffic when the check is enabled
    pub source_dest_check: bool,
    /// Opaque bootstrap payload, attached verbatim
    pub user_data: String,
}

/// External data services reachable through a gateway endpoint.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EndpointService {
    S3,
    DynamoDb,
}

impl EndpointService {
    /// Short service token used in service names and logical ids.
    pub fn token(&self) -> &'static str {
        match self {
            EndpointService::S3 => "s3",
            EndpointService::DynamoDb => "dynamodb",
        }
    }
}

/// A service-reachability shortcut attached to a route table.
#[derive(Serialize, Debug, Clone)]
pub struct VpcEndpoint {
    /// Logical id, derived from the environment prefix
    pub id: String,
    /// Which service this endpoint reaches
    pub service: EndpointService,
    /// Fully qualified service name resolved against the configured region
    pub service_name: String,
    /// Id of the route table the endpoint is wired into
    pub route_table_id: String,
}

// ============================================================================
// Sharing Plan
// ============================================================================

/// Cross-boundary grant of subnet visibility to external trust domains.
///
/// Only produced when principals are configured; consumers receive it as
/// an `Option` so its absence cannot be overlooked.
#[derive(Serialize, Debug, Clone)]
pub struct SharingPlan {
    /// Logical id of the share
    pub id: String,
    /// Every planned subnet, across all three tiers. This deliberately
    /// includes the isolated Data tier; operators granting access must
    /// be aware the grant is not scoped to routable tiers.
    pub subnet_ids: Vec<String>,
    /// Target boundary identifiers receiving read access
    pub principals: Vec<String>,
    /// Always false: only identifiers inside the planner's own
    /// organizational hierarchy are accepted, enforced by the
    /// provisioning engine
    pub allow_external_principals: bool,
}

// ============================================================================
// Plan Root
// ============================================================================

/// The complete, immutable network plan handed to the provisioning engine.
#[derive(Serialize, Debug, Clone)]
pub struct NetworkPlan {
    /// Network container
    pub vpc: Vpc,
    /// Internet gateway
    pub gateway: InternetGateway,
    /// One route table per tier, in tier order
    pub route_tables: Vec<RouteTable>,
    /// All subnets, in allocation order
    pub subnets: Vec<Subnet>,
    /// NAT egress placement
    pub nat: NatPlacement,
    /// Service endpoints, wired to the App route table
    pub endpoints: Vec<VpcEndpoint>,
    /// Cross-boundary sharing plan, absent when no principals configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing: Option<SharingPlan>,
}

impl NetworkPlan {
    /// The route table serving one tier.
    pub fn route_table(&self, tier: Tier) -> Option<&RouteTable> {
        self.route_tables.iter().find(|rt| rt.tier == tier)
    }
}
