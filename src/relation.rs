//! Relation data access.
//!
//! Generators never talk to the deployment agent directly; they read relation
//! state through [`RelationStore`].

use crate::error::ContextError;
use std::collections::BTreeMap;

mod snapshot;

pub use snapshot::{RelationEntry, RelationSnapshot, UnitEntry};

/// Relation names the dashboard charm reads.
pub const CLUSTER: &str = "cluster";
pub const IDENTITY_SERVICE: &str = "identity-service";
pub const DASHBOARD_PLUGIN: &str = "dashboard-plugin";
pub const WEBSSO_FID_SERVICE_PROVIDER: &str = "websso-fid-service-provider";
pub const CERTIFICATES: &str = "certificates";

/// Settings one remote unit published on one relation.
pub type RelationData = BTreeMap<String, String>;

/// Read-only view of the unit's relations.
pub trait RelationStore {
    /// Name of the unit the hook runs on, e.g. `openstack-dashboard/0`.
    fn local_unit(&self) -> &str;

    /// Relation ids established for a relation name, in establishment order.
    fn relation_ids(&self, relation: &str) -> Result<Vec<String>, ContextError>;

    /// Remote units participating in a relation id.
    fn related_units(&self, rid: &str) -> Result<Vec<String>, ContextError>;

    /// Data a remote unit published on a relation id.
    fn relation_get(&self, rid: &str, unit: &str) -> Result<RelationData, ContextError>;
}

/// `unit/0` → `unit-0`, the form used for labels and file names.
pub fn sanitize_unit_name(unit: &str) -> String {
    unit.replace('/', "-")
}

/// First related unit of each relation id, with its data.
///
/// Relation ids without units are skipped. All units of an application are
/// expected to publish the same settings, so one per id is enough.
pub fn first_unit_data(
    store: &dyn RelationStore,
    relation: &str,
) -> Result<Vec<(String, RelationData)>, ContextError> {
    let mut collected = Vec::new();
    for rid in store.relation_ids(relation)? {
        let units = store.related_units(&rid)?;
        let Some(unit) = units.into_iter().next() else {
            continue;
        };
        let data = store.relation_get(&rid, &unit)?;
        collected.push((unit, data));
    }
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_unit_name() {
        assert_eq!(sanitize_unit_name("openstack-dashboard/2"), "openstack-dashboard-2");
    }

    #[test]
    fn test_first_unit_data_skips_empty_relations() {
        let snapshot = RelationSnapshot::new("openstack-dashboard/0")
            .with_relation(DASHBOARD_PLUGIN, "dashboard-plugin:1")
            .with_unit(
                DASHBOARD_PLUGIN,
                "dashboard-plugin:2",
                "plugin-a/0",
                [("priority", "10")],
            )
            .with_unit(
                DASHBOARD_PLUGIN,
                "dashboard-plugin:2",
                "plugin-a/1",
                [("priority", "20")],
            );

        let data = first_unit_data(&snapshot, DASHBOARD_PLUGIN).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].0, "plugin-a/0");
        assert_eq!(data[0].1.get("priority").map(String::as_str), Some("10"));
    }
}
