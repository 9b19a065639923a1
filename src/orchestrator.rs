//! Planning orchestrator.
//!
//! This module coordinates the overall planning process, managing the
//! flow from validated configuration through the pipeline stages to the
//! plan files handed to the provisioning engine. Each stage consumes the
//! previous stage's output value and returns a new one; construction
//! order is fixed so no stage can reference a node that does not exist
//! yet.

use crate::addr::{allocate_tiers, AddressBlock};
use crate::config::Config;
use crate::graph::{NetworkPlan, Subnet};
use crate::topology::{attach_endpoints, build_topology, place_nat, plan_sharing};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Run the full planning pipeline for a validated configuration.
pub fn plan_network(config: &Config, bootstrap_payload: String) -> Result<NetworkPlan> {
    plan_network_from_parts(
        &config.general.environment,
        &config.network.cidr,
        &config.network.region,
        config.nat_instance_type(),
        bootstrap_payload,
        config.sharing_principals(),
    )
}

/// Pipeline entry point over bare inputs.
///
/// Stage order matters: the NAT stage needs the Web route table and the
/// first public subnet, the endpoint stage needs the App route table,
/// and the sharing stage needs the complete subnet set.
pub fn plan_network_from_parts(
    environment: &str,
    cidr: &str,
    region: &str,
    nat_instance_type: &str,
    bootstrap_payload: String,
    sharing_principals: &[String],
) -> Result<NetworkPlan> {
    let top_level = AddressBlock::parse(cidr)
        .wrap_err_with(|| format!("Failed to parse top-level block '{}'", cidr))?;

    let allocation = allocate_tiers(&top_level)?;
    info!(
        "Allocated {} tier/zone blocks from {}",
        allocation.blocks().len(),
        top_level
    );

    let topology = build_topology(environment, &top_level, &allocation);
    let (topology, nat) = place_nat(topology, environment, nat_instance_type, bootstrap_payload)?;
    let (topology, endpoints) = attach_endpoints(topology, environment, region);
    let sharing = plan_sharing(environment, &topology.subnets, sharing_principals);

    Ok(NetworkPlan {
        vpc: topology.vpc,
        gateway: topology.gateway,
        route_tables: topology.route_tables,
        subnets: topology.subnets,
        nat,
        endpoints,
        sharing,
    })
}

/// Compact human-oriented view of a plan, written alongside the full
/// JSON graph.
#[derive(Serialize, Debug)]
struct PlanSummary<'a> {
    environment: &'a str,
    vpc_cidr: String,
    subnets: Vec<SubnetSummary<'a>>,
    nat_subnet: &'a str,
    endpoints: Vec<&'a str>,
    shared_with: Vec<&'a str>,
}

#[derive(Serialize, Debug)]
struct SubnetSummary<'a> {
    id: &'a str,
    cidr: String,
    public: bool,
}

fn summarize<'a>(environment: &'a str, plan: &'a NetworkPlan) -> PlanSummary<'a> {
    PlanSummary {
        environment,
        vpc_cidr: plan.vpc.cidr.to_string(),
        subnets: plan
            .subnets
            .iter()
            .map(|s: &Subnet| SubnetSummary {
                id: &s.id,
                cidr: s.cidr.to_string(),
                public: s.public,
            })
            .collect(),
        nat_subnet: &plan.nat.subnet_id,
        endpoints: plan.endpoints.iter().map(|e| e.id.as_str()).collect(),
        shared_with: plan
            .sharing
            .iter()
            .flat_map(|s| s.principals.iter().map(|p| p.as_str()))
            .collect(),
    }
}

/// Write the plan files the provisioning engine and operators consume.
///
/// `network_plan.json` is the machine-readable graph;
/// `plan_summary.yaml` is the short operator-facing view.
pub fn write_plan(environment: &str, plan: &NetworkPlan, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create output directory {:?}", output_dir))?;

    let plan_path = output_dir.join("network_plan.json");
    let plan_json = serde_json::to_string_pretty(plan)?;
    fs::write(&plan_path, plan_json)
        .wrap_err_with(|| format!("Failed to write plan file {:?}", plan_path))?;
    info!("Wrote network plan: {:?}", plan_path);

    let summary_path = output_dir.join("plan_summary.yaml");
    let summary_yaml = serde_yaml::to_string(&summarize(environment, plan))?;
    fs::write(&summary_path, summary_yaml)
        .wrap_err_with(|| format!("Failed to write summary file {:?}", summary_path))?;
    info!("Wrote plan summary: {:?}", summary_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::Tier;
    use crate::graph::RouteTarget;

    fn plan(principals: &[String]) -> NetworkPlan {
        plan_network_from_parts(
            "test",
            "10.10.0.0/16",
            "us-east-1",
            "t3.micro",
            String::new(),
            principals,
        )
        .unwrap()
    }

    #[test]
    fn test_pipeline_assembles_complete_plan() {
        let plan = plan(&[]);
        assert_eq!(plan.subnets.len(), 6);
        assert_eq!(plan.route_tables.len(), 3);
        assert_eq!(plan.endpoints.len(), 2);
        assert!(plan.sharing.is_none());
    }

    #[test]
    fn test_pipeline_rejects_bad_prefix_before_building() {
        let result = plan_network_from_parts(
            "test",
            "10.10.0.0/24",
            "us-east-1",
            "t3.micro",
            String::new(),
            &[],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_pipeline_rejects_malformed_cidr() {
        let result = plan_network_from_parts(
            "test",
            "10.10.0/16",
            "us-east-1",
            "t3.micro",
            String::new(),
            &[],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_default_route_placement_across_tiers() {
        let plan = plan(&[]);

        let web: Vec<_> = plan
            .route_table(Tier::Web)
            .unwrap()
            .default_routes()
            .collect();
        assert_eq!(web.len(), 1);
        assert_eq!(web[0].target, RouteTarget::InternetGateway);

        let app: Vec<_> = plan
            .route_table(Tier::App)
            .unwrap()
            .default_routes()
            .collect();
        assert_eq!(app.len(), 1);
        assert_eq!(app[0].target, RouteTarget::NatInstance);

        assert_eq!(
            plan.route_table(Tier::Data)
                .unwrap()
                .default_routes()
                .count(),
            0
        );
    }

    #[test]
    fn test_sharing_present_with_principals() {
        let plan = plan(&["111111111111".to_string()]);
        let sharing = plan.sharing.unwrap();
        assert_eq!(sharing.subnet_ids.len(), 6);
    }

    #[test]
    fn test_plan_serializes_with_stable_ids() {
        let plan = plan(&[]);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"test-vpc\""));
        assert!(json.contains("\"test-web-az0\""));
        assert!(json.contains("\"test-data-az1\""));
        assert!(json.contains("\"10.10.80.0/20\""));
        // Absent sharing plan is omitted, not null.
        assert!(!json.contains("\"sharing\""));
    }

    #[test]
    fn test_write_plan_outputs_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(&[]);
        write_plan("test", &plan, dir.path()).unwrap();

        assert!(dir.path().join("network_plan.json").exists());
        assert!(dir.path().join("plan_summary.yaml").exists());

        let summary = std::fs::read_to_string(dir.path().join("plan_summary.yaml")).unwrap();
        assert!(summary.contains("test-web-az0"));
        assert!(summary.contains("10.10.0.0/16"));
    }
}
