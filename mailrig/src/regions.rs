//! Static region table used when live discovery is unavailable.

/// Region codes returned when `DescribeRegions` is denied or fails.
///
/// Discovery degradation is deliberate: the pipeline itself never needs the
/// live list, so a stale-but-plausible table beats a propagated failure.
pub const FALLBACK_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "eu-south-1",
    "me-south-1",
    "me-central-1",
    "sa-east-1",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_contains_primary_regions() {
        assert!(FALLBACK_REGIONS.contains(&"us-east-1"));
        assert!(FALLBACK_REGIONS.contains(&"eu-north-1"));
    }

    #[test]
    fn test_fallback_has_no_duplicates() {
        let unique: std::collections::HashSet<_> = FALLBACK_REGIONS.iter().collect();
        assert_eq!(unique.len(), FALLBACK_REGIONS.len());
    }
}
