//! Ordering and tie-break guarantees that must not depend on input order.

use dashboard_contexts::config::CharmConfig;
use dashboard_contexts::context::{
    ContextGenerator, Environment, IdentityAuthContext, PluginSettingsContext,
};
use dashboard_contexts::host::LocalHost;
use dashboard_contexts::network::StaticAddresses;
use dashboard_contexts::relation::{RelationSnapshot, DASHBOARD_PLUGIN, IDENTITY_SERVICE};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn generate<G: ContextGenerator>(generator: G, relations: &RelationSnapshot) -> G::Output {
    let root = tempfile::TempDir::new().unwrap();
    let config = CharmConfig::default();
    let network = StaticAddresses::default();
    let host = LocalHost::rooted(root.path());
    let env = Environment {
        config: &config,
        relations,
        network: &network,
        host: &host,
    };
    generator.generate(&env).unwrap()
}

proptest! {
    #[test]
    fn test_fragments_render_in_ascending_priority(
        priorities in proptest::collection::btree_set(0u32..10_000, 1..8),
        seed in any::<u64>(),
    ) {
        let mut shuffled: Vec<u32> = priorities.iter().copied().collect();
        // deterministic shuffle driven by the seed
        let len = shuffled.len();
        for i in 0..len {
            let j = ((seed.rotate_left(i as u32) as usize) ^ i) % len;
            shuffled.swap(i, j);
        }

        let mut relations = RelationSnapshot::new("openstack-dashboard/0");
        for (n, priority) in shuffled.iter().enumerate() {
            let rid = format!("dashboard-plugin:{}", n);
            let unit = format!("plugin-{}/0", priority);
            let priority = priority.to_string();
            relations = relations.with_unit(
                DASHBOARD_PLUGIN,
                &rid,
                &unit,
                [("local-settings", "X = 1"), ("priority", priority.as_str())],
            );
        }

        let ctxt = generate(PluginSettingsContext, &relations);
        let expected: Vec<String> = priorities
            .iter()
            .map(|p| format!("# plugin-{}/0\nX = 1", p))
            .collect();
        prop_assert_eq!(ctxt.settings, expected);
    }

    #[test]
    fn test_the_single_complete_record_is_always_chosen(
        incomplete_before in 0usize..4,
        incomplete_after in 0usize..4,
    ) {
        let mut relations = RelationSnapshot::new("openstack-dashboard/0");
        let mut n = 0;
        for _ in 0..incomplete_before {
            relations = relations.with_unit(
                IDENTITY_SERVICE,
                "identity-service:1",
                &format!("keystone/{}", n),
                [("service_host", "10.0.0.1")],
            );
            n += 1;
        }
        relations = relations.with_unit(
            IDENTITY_SERVICE,
            "identity-service:1",
            &format!("keystone/{}", n),
            [("service_host", "10.9.9.9"), ("service_port", "5000")],
        );
        n += 1;
        for _ in 0..incomplete_after {
            relations = relations.with_unit(
                IDENTITY_SERVICE,
                "identity-service:1",
                &format!("keystone/{}", n),
                [("service_port", "35357")],
            );
            n += 1;
        }

        let ctxt = generate(IdentityAuthContext, &relations);
        let service = ctxt.service.unwrap();
        prop_assert_eq!(service.service_host, "10.9.9.9");
        prop_assert_eq!(service.service_port, "5000");
    }

    #[test]
    fn test_regions_present_iff_two_distinct_pairs(
        hosts in proptest::collection::vec(0u8..3, 1..5),
        names in proptest::collection::vec(0u8..3, 1..5),
    ) {
        let mut relations = RelationSnapshot::new("openstack-dashboard/0");
        let mut pairs = BTreeSet::new();
        for (n, (host, name)) in hosts.iter().zip(names.iter().cycle()).enumerate() {
            let host = format!("10.0.0.{}", host);
            let region = format!("Region{}", name);
            pairs.insert((host.clone(), region.clone()));
            relations = relations.with_unit(
                IDENTITY_SERVICE,
                "identity-service:1",
                &format!("keystone/{}", n),
                [
                    ("service_host", host.as_str()),
                    ("service_port", "5000"),
                    ("region", region.as_str()),
                ],
            );
        }

        let ctxt = generate(IdentityAuthContext, &relations);
        prop_assert_eq!(ctxt.regions.is_some(), pairs.len() > 1);
        if let Some(regions) = ctxt.regions {
            prop_assert_eq!(regions.len(), pairs.len());
            let mut sorted = regions.clone();
            sorted.sort();
            prop_assert_eq!(regions, sorted);
        }
    }
}
