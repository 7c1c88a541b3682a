//! Merging derived identity attributes into an existing claims set.

use claimsmith_identity::WorkloadId;

use crate::claims::{claims_to_structured, ClaimValue, Claims, SerializationError, StructuredMap};

/// Claim carrying the full identity string.
pub const SPIFFE_ID_CLAIM: &str = "spiffe-id";
/// Claim carrying the trust domain.
pub const TRUST_DOMAIN_CLAIM: &str = "trust-domain";
/// Claim carrying the workload path.
pub const WORKLOAD_CLAIM: &str = "workload";

/// Attributes derived from a workload identity for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAttributes {
    pub spiffe_id: String,
    pub trust_domain: String,
    pub workload: String,
}

impl DerivedAttributes {
    /// Build the attributes from the raw identity string and its parsed parts.
    pub fn new(spiffe_id: &str, id: &WorkloadId) -> Self {
        Self {
            spiffe_id: spiffe_id.to_string(),
            trust_domain: id.trust_domain.clone(),
            workload: id.path.clone(),
        }
    }

    /// The three derived claims, keyed by their fixed claim names.
    pub fn into_claims(self) -> Claims {
        Claims::from([
            (SPIFFE_ID_CLAIM.to_string(), ClaimValue::String(self.spiffe_id)),
            (
                TRUST_DOMAIN_CLAIM.to_string(),
                ClaimValue::String(self.trust_domain),
            ),
            (WORKLOAD_CLAIM.to_string(), ClaimValue::String(self.workload)),
        ])
    }
}

/// Merge `derived` into `existing`, derived values winning on key collisions.
///
/// An absent `existing` set is treated as empty. Every existing key not named
/// in `derived` is carried through unchanged.
pub fn compose(
    existing: Option<Claims>,
    derived: Claims,
) -> Result<StructuredMap, SerializationError> {
    let mut claims = existing.unwrap_or_default();
    claims.extend(derived);
    claims_to_structured(&claims)
}
