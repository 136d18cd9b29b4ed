//! Shared setup for integration tests: one owned copy of every port.

use dashboard_contexts::config::CharmConfig;
use dashboard_contexts::context::Environment;
use dashboard_contexts::host::LocalHost;
use dashboard_contexts::network::{NetworkConfig, StaticAddresses};
use dashboard_contexts::relation::RelationSnapshot;
use tempfile::TempDir;

pub struct Unit {
    pub config: CharmConfig,
    pub relations: RelationSnapshot,
    pub network: StaticAddresses,
    pub host: LocalHost,
    _root: TempDir,
}

impl Unit {
    /// A dashboard unit at 10.5.0.10 with no relations and a scratch root.
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        Self {
            config: CharmConfig::default(),
            relations: RelationSnapshot::new("openstack-dashboard/0"),
            network: StaticAddresses::new(NetworkConfig {
                private_address: Some("10.5.0.10".to_string()),
                ..NetworkConfig::default()
            }),
            host: LocalHost::rooted(root.path()),
            _root: root,
        }
    }

    pub fn env(&self) -> Environment<'_> {
        Environment {
            config: &self.config,
            relations: &self.relations,
            network: &self.network,
            host: &self.host,
        }
    }
}
