//! Cross-boundary sharing plan.
//!
//! Builds the subnet-sharing grant for external account identifiers.
//! No principals configured means no plan at all, which is a valid
//! configuration rather than an error.

use log::{info, warn};

use crate::graph::{SharingPlan, Subnet};

/// Build the sharing plan covering the finished subnet set.
///
/// Returns `None` for an empty principal list. A non-empty list yields
/// one plan referencing every subnet across all three tiers, with
/// external-principal acceptance disabled; only identifiers inside the
/// planner's own organizational hierarchy are usable, enforced by the
/// provisioning engine.
pub fn plan_sharing(
    environment: &str,
    subnets: &[Subnet],
    principals: &[String],
) -> Option<SharingPlan> {
    if principals.is_empty() {
        info!("No sharing principals configured; skipping sharing plan");
        return None;
    }

    // The grant covers the isolated Data tier as well.
    warn!(
        "Sharing all {} subnets (including the isolated data tier) with {} principal(s)",
        subnets.len(),
        principals.len()
    );

    Some(SharingPlan {
        id: format!("{}-subnet-share", environment),
        subnet_ids: subnets.iter().map(|s| s.id.clone()).collect(),
        principals: principals.to_vec(),
        allow_external_principals: false,
    })
}
