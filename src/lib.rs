//! # Tiernet - Planning utility for segmented virtual network topologies
//!
//! This library plans a segmented three-tier virtual network: given one
//! top-level /16 address block and a fixed tier/zone layout, it
//! deterministically partitions the address space and constructs a
//! dependency-ordered graph of routing and egress resources over that
//! partition, before anything is provisioned.
//!
//! ## Overview
//!
//! Planning is a single synchronous pass. The allocator carves the top-level
//! block into six /20 blocks (three tiers, two zones each); the topology
//! stages then derive the network container, internet gateway, per-tier
//! route tables, subnets, NAT egress placement, service endpoints, and an
//! optional cross-boundary sharing plan. The finished [`graph::NetworkPlan`]
//! is an immutable value handed to an external provisioning engine, which
//! realizes each node as an actual resource and resolves positional zone
//! references to concrete platform zone identifiers.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: Type-safe configuration structures and validation
//! - `config_loader`: Configuration file and bootstrap payload loading
//! - `addr`: Address arithmetic and tier/zone block allocation
//! - `graph`: Typed resource nodes handed to the provisioning engine
//! - `topology`: Pipeline stages deriving the resource graph
//! - `utils`: Structural validation of the finished plan
//! - `orchestrator`: High-level coordination of the planning pipeline
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tiernet::{config_loader, orchestrator};
//! use std::path::Path;
//!
//! // Load configuration from YAML file
//! let config_path = Path::new("config.yaml");
//! let config = config_loader::load_config(config_path)?;
//! let payload = config_loader::load_bootstrap_payload(&config, config_path)?;
//!
//! // Run the planning pipeline
//! let plan = orchestrator::plan_network(&config, payload)?;
//! tiernet::utils::check_plan(&plan)?;
//!
//! // Write plan files for the provisioning engine
//! orchestrator::write_plan(&config.general.environment, &plan, Path::new("plan_output"))?;
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! general:
//!   environment: staging
//!   log_level: info
//!
//! network:
//!   cidr: "10.10.0.0/16"   # must be a /16
//!   region: us-east-1
//!
//! nat:
//!   instance_type: t3.micro
//!   bootstrap_script: nat_bootstrap.sh
//!
//! sharing:
//!   principals: ["111111111111"]   # optional; absent => no sharing plan
//! ```
//!
//! ## Error Handling
//!
//! Library components raise typed `thiserror` errors
//! ([`addr::AddressError`], [`addr::AllocationError`],
//! [`config::ValidationError`], [`utils::PlanCheckError`]); the
//! orchestration layer composes them through `color_eyre` with context.
//! All failures are deterministic, so there are no retry semantics: the
//! caller must correct the input.

pub mod addr;
pub mod config;
pub mod config_loader;
pub mod graph;
pub mod orchestrator;
pub mod topology;
pub mod utils;
