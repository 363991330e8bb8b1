//! Deterministic resource naming.
//!
//! Every derived name is a pure function of the sanitized project slug plus
//! a fixed suffix, and every ARN is templated from values the caller already
//! holds. Nothing here performs a lookup; correctness depends on exact
//! agreement between the templated ARN and the created resource's name.

/// Sanitizes a project name into a resource-safe slug.
///
/// Lowercases, replaces any character outside `[a-z0-9-]` with `-`, and
/// trims leading/trailing dashes. Idempotent: sanitizing a slug returns it
/// unchanged.
#[must_use]
pub fn sanitize_project_name(name: &str) -> String {
    let replaced: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    replaced.trim_matches('-').to_string()
}

/// Name of the dead-letter queue for a project slug.
#[must_use]
pub fn dlq_name(slug: &str) -> String {
    format!("{slug}-email-dlq")
}

/// Name of the main event queue for a project slug.
#[must_use]
pub fn queue_name(slug: &str) -> String {
    format!("{slug}-email-queue")
}

/// Name of the email-events topic for a project slug.
#[must_use]
pub fn topic_name(slug: &str) -> String {
    format!("{slug}-email-events")
}

/// Name of the sending configuration set for a project slug.
#[must_use]
pub fn configuration_set_name(slug: &str) -> String {
    format!("{slug}-emailing")
}

/// Name of the event destination attached to the configuration set.
#[must_use]
pub fn event_destination_name(slug: &str) -> String {
    format!("{slug}-email-events")
}

/// Templates an ARN from parts known to the caller.
#[must_use]
pub fn build_arn(service: &str, region: &str, account_id: &str, resource: &str) -> String {
    format!("arn:aws:{service}:{region}:{account_id}:{resource}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_and_lowercases() {
        assert_eq!(sanitize_project_name("My App!"), "my-app");
        assert_eq!(sanitize_project_name("Prod_2024 (EU)"), "prod-2024--eu");
    }

    #[test]
    fn test_sanitize_trims_edge_dashes() {
        assert_eq!(sanitize_project_name("--edge--"), "edge");
        assert_eq!(sanitize_project_name("!!!"), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["My App!", "already-clean", "Prod_2024 (EU)", "  spaced  "] {
            let once = sanitize_project_name(name);
            assert_eq!(sanitize_project_name(&once), once);
        }
    }

    #[test]
    fn test_sanitize_output_charset() {
        let slug = sanitize_project_name("Wéird Ünïcode & Symbols #1");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_resource_name_suffixes() {
        assert_eq!(dlq_name("my-app"), "my-app-email-dlq");
        assert_eq!(queue_name("my-app"), "my-app-email-queue");
        assert_eq!(topic_name("my-app"), "my-app-email-events");
        assert_eq!(configuration_set_name("my-app"), "my-app-emailing");
    }

    #[test]
    fn test_build_arn_template_order() {
        let arn = build_arn("sqs", "eu-north-1", "123456789012", "my-app-email-queue");
        assert_eq!(arn, "arn:aws:sqs:eu-north-1:123456789012:my-app-email-queue");

        let parts: Vec<&str> = arn.split(':').collect();
        assert_eq!(parts[3], "eu-north-1");
        assert_eq!(parts[4], "123456789012");
        assert_eq!(parts[5], "my-app-email-queue");
    }
}
