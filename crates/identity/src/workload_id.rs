//! Decomposition of workload identity strings.

use crate::error::{IdentityError, IdentityResult};
use serde::{Deserialize, Serialize};

/// Scheme prefix every workload identity string must carry.
pub const SCHEME_PREFIX: &str = "spiffe://";

/// A parsed workload identity.
///
/// Both parts are non-empty. `trust_domain` never contains `/`; `path` keeps
/// any further `/` characters verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkloadId {
    /// Authority component naming the trust boundary
    pub trust_domain: String,
    /// Remainder after the trust domain, without the leading `/`
    pub path: String,
}

impl WorkloadId {
    /// Parse an identity string of the form `spiffe://<domain>/<path>`.
    pub fn parse(id: &str) -> IdentityResult<Self> {
        let (trust_domain, path) = parse_trust_domain_and_workload(id)?;
        Ok(Self {
            trust_domain: trust_domain.to_string(),
            path: path.to_string(),
        })
    }
}

impl std::str::FromStr for WorkloadId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for WorkloadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}/{}", SCHEME_PREFIX, self.trust_domain, self.path)
    }
}

/// Split an identity string into borrowed `(trust_domain, path)` parts.
pub fn parse_trust_domain_and_workload(id: &str) -> IdentityResult<(&str, &str)> {
    let malformed = |reason| IdentityError::Malformed {
        id: id.to_string(),
        reason,
    };

    let rest = id
        .strip_prefix(SCHEME_PREFIX)
        .ok_or_else(|| malformed("invalid SPIFFE ID format"))?;

    match rest.split_once('/') {
        Some((domain, path)) if !domain.is_empty() && !path.is_empty() => Ok((domain, path)),
        _ => Err(malformed(
            "SPIFFE ID must contain both a trust domain and a workload path",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_valid_id() {
        let id = WorkloadId::parse("spiffe://example.org/workload").unwrap();
        assert_eq!(id.trust_domain, "example.org");
        assert_eq!(id.path, "workload");
    }

    #[test]
    fn test_nested_path_kept_verbatim() {
        let id = WorkloadId::parse("spiffe://example.org/ns/prod/sa/api/").unwrap();
        assert_eq!(id.trust_domain, "example.org");
        assert_eq!(id.path, "ns/prod/sa/api/");
    }

    #[test]
    fn test_missing_prefix_fails() {
        let err = WorkloadId::parse("invalid-spiffe-id").unwrap_err();
        assert_eq!(
            err,
            IdentityError::Malformed {
                id: "invalid-spiffe-id".to_string(),
                reason: "invalid SPIFFE ID format",
            }
        );
        assert!(WorkloadId::parse("http://example.org/workload").is_err());
        assert!(WorkloadId::parse("SPIFFE://example.org/workload").is_err());
    }

    #[test]
    fn test_near_miss_prefixes_fail() {
        for raw in ["spiffe:", "spiffe:/x", "spiffe//x", "spiffe:/example.org/workload"] {
            assert!(WorkloadId::parse(raw).is_err(), "{}", raw);
        }
    }

    #[test]
    fn test_missing_workload_path_fails() {
        assert!(WorkloadId::parse("spiffe://example.org").is_err());
        assert!(WorkloadId::parse("spiffe://example.org/").is_err());
    }

    #[test]
    fn test_missing_trust_domain_fails() {
        assert!(WorkloadId::parse("spiffe:///workload").is_err());
        assert!(WorkloadId::parse("spiffe://").is_err());
        assert!(WorkloadId::parse("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let raw = "spiffe://example.org/ns/default";
        let id: WorkloadId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_error_message_includes_id() {
        let err = WorkloadId::parse("spiffe:///workload").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("spiffe:///workload"));
        assert!(msg.contains("trust domain"));
    }

    #[test]
    fn test_serde_shape() {
        let id = WorkloadId::parse("spiffe://example.org/workload").unwrap();
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"trust_domain": "example.org", "path": "workload"})
        );
    }

    proptest! {
        #[test]
        fn prop_well_formed_ids_decompose(
            domain in "[a-z0-9.-]{1,32}",
            path in "[a-zA-Z0-9._/-]{1,64}",
        ) {
            let raw = format!("spiffe://{}/{}", domain, path);
            let id = WorkloadId::parse(&raw).unwrap();
            prop_assert_eq!(id.trust_domain, domain);
            prop_assert_eq!(id.path, path);
        }

        #[test]
        fn prop_ids_without_prefix_fail(raw in "[^s].*") {
            prop_assert!(WorkloadId::parse(&raw).is_err());
        }

        #[test]
        fn prop_near_miss_prefixes_fail(
            prefix in prop::sample::select(vec![
                "spiffe:/", "spiffe:", "spiffe//", "spiffe", "spiffe:\\\\",
                "Spiffe://", " spiffe://", "spife://", "spiffe;//", "spiffe://",
            ]),
            rest in "[a-z0-9.][a-z0-9./-]{0,32}",
        ) {
            let raw = format!("{}{}", prefix, rest);
            let parsed = WorkloadId::parse(&raw);
            if prefix == "spiffe://" {
                let decomposable = rest
                    .split_once('/')
                    .map_or(false, |(domain, path)| !domain.is_empty() && !path.is_empty());
                prop_assert_eq!(parsed.is_ok(), decomposable);
            } else {
                prop_assert!(parsed.is_err(), "{} parsed", raw);
            }
        }
    }
}
