//! Service endpoint attachment.
//!
//! Appends the two data-service gateway endpoints to the App route
//! table. Once that table exists this stage cannot fail.

use log::info;

use crate::addr::Tier;
use crate::graph::{EndpointService, Route, RouteTarget, VpcEndpoint};

use super::builder::CoreTopology;

/// Services the App tier reaches without traversing the NAT instance.
const SERVICES: [EndpointService; 2] = [EndpointService::S3, EndpointService::DynamoDb];

/// Attach the data-service endpoints to the App route table.
///
/// Each endpoint route's destination carries the qualified service name;
/// the provisioning engine resolves it to the provider's prefix list.
pub fn attach_endpoints(
    mut topology: CoreTopology,
    environment: &str,
    region: &str,
) -> (CoreTopology, Vec<VpcEndpoint>) {
    let app_table_id = topology.route_table(Tier::App).id.clone();

    let endpoints: Vec<VpcEndpoint> = SERVICES
        .iter()
        .map(|service| VpcEndpoint {
            id: format!("{}-app-{}-endpoint", environment, service.token()),
            service: *service,
            service_name: format!("com.amazonaws.{}.{}", region, service.token()),
            route_table_id: app_table_id.clone(),
        })
        .collect();

    let app_table = topology
        .route_tables
        .iter_mut()
        .find(|rt| rt.tier == Tier::App)
        .expect("route table exists for every tier");
    for endpoint in &endpoints {
        app_table.routes.push(Route {
            destination: endpoint.service_name.clone(),
            target: RouteTarget::VpcEndpoint(endpoint.id.clone()),
        });
        info!("Attached endpoint {} to {}", endpoint.id, app_table_id);
    }

    (topology, endpoints)
}
