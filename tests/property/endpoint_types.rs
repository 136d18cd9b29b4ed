//! Endpoint type normalization accepts exactly three names.

use dashboard_contexts::context::{normalize_endpoint_type, EndpointType};
use proptest::prelude::*;

/// Anything other than the three URL kinds is rejected
#[test]
fn test_unknown_names_are_rejected() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[A-Za-z_]{0,16}", |name| {
            let upper = name.to_uppercase();
            if upper == "PUBLICURL" || upper == "INTERNALURL" || upper == "ADMINURL" {
                return Ok(());
            }
            prop_assert!(normalize_endpoint_type(&name).is_err());
            Ok(())
        })
        .unwrap();
}

/// Case never matters
#[test]
fn test_known_names_in_any_case() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(0usize..3, proptest::collection::vec(any::<bool>(), 11)),
            |(idx, mask)| {
                let (name, expected) = [
                    ("publicurl", EndpointType::Public),
                    ("internalurl", EndpointType::Internal),
                    ("adminurl", EndpointType::Admin),
                ][idx];
                let mixed: String = name
                    .chars()
                    .zip(mask.iter().cycle())
                    .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
                    .collect();
                prop_assert_eq!(normalize_endpoint_type(&mixed).unwrap(), expected);
                Ok(())
            },
        )
        .unwrap();
}
