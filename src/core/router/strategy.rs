//! Highest-weight selection strategy
//!
//! Picks exactly one deployment from a healthy snapshot using a four-tier,
//! short-circuiting fallback:
//!
//! 1. **Weight** - highest `weight`, if any deployment has `weight > 0`
//! 2. **RPM** - highest requests-per-minute limit, if any is set
//! 3. **TPM** - highest tokens-per-minute limit, if any is set
//! 4. **Default** - the first deployment of the snapshot
//!
//! Ties inside a tier resolve to the first deployment in snapshot order.
//! Selection is a single linear scan per tier and never touches shared state,
//! so it can run concurrently from any number of request tasks.

use super::deployment::Deployment;
use super::error::RouterError;
use std::fmt;
use tracing::{info, warn};

/// Which tier produced the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionTier {
    Weight,
    Rpm,
    Tpm,
    Default,
}

impl SelectionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Rpm => "rpm",
            Self::Tpm => "tpm",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for SelectionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selected deployment together with the tier that chose it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub deployment: &'a Deployment,
    pub tier: SelectionTier,
    /// Position of the deployment in the snapshot
    pub index: usize,
}

/// Select one deployment from `healthy` for `model`
///
/// Fails with [`RouterError::EmptyPool`] when `healthy` is empty.
pub fn select<'a>(healthy: &'a [Deployment], model: &str) -> Result<&'a Deployment, RouterError> {
    select_with_tier(healthy, model).map(|selection| selection.deployment)
}

/// Like [`select`], but also reports which tier decided
pub fn select_with_tier<'a>(
    healthy: &'a [Deployment],
    model: &str,
) -> Result<Selection<'a>, RouterError> {
    let Some(first) = healthy.first() else {
        warn!(model, "no healthy deployments available");
        return Err(RouterError::EmptyPool(model.to_string()));
    };

    let (index, tier) = if let Some(index) = first_max(healthy, |d| d.params.weight(), 0.0) {
        (index, SelectionTier::Weight)
    } else if let Some(index) = first_max(healthy, |d| d.params.rpm(), 0.0) {
        (index, SelectionTier::Rpm)
    } else if let Some(index) = first_max(healthy, |d| d.params.tpm(), 0.0) {
        (index, SelectionTier::Tpm)
    } else {
        (0, SelectionTier::Default)
    };

    let deployment = healthy.get(index).unwrap_or(first);
    info!(
        model,
        deployment_id = %deployment.id,
        tier = %tier,
        candidates = healthy.len(),
        "selected deployment"
    );

    Ok(Selection {
        deployment,
        tier,
        index,
    })
}

/// Index of the first deployment holding the maximum metric, if that maximum exceeds `zero`
fn first_max<K, F>(healthy: &[Deployment], metric: F, zero: K) -> Option<usize>
where
    K: PartialOrd + Copy,
    F: Fn(&Deployment) -> K,
{
    let mut best: Option<(usize, K)> = None;

    for (index, deployment) in healthy.iter().enumerate() {
        let value = metric(deployment);
        if value <= zero {
            continue;
        }
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }

    best.map(|(index, _)| index)
}
