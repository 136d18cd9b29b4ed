//! In-memory relation state, loadable from TOML or JSON.

use super::{RelationData, RelationStore};
use crate::error::ContextError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Relation state captured at one point in time.
///
/// ```toml
/// local-unit = "openstack-dashboard/0"
///
/// [[relations.identity-service]]
/// id = "identity-service:4"
///
/// [[relations.identity-service.units]]
/// name = "keystone/0"
/// data = { service_host = "10.5.0.20", service_port = "5000" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RelationSnapshot {
    #[serde(default)]
    pub local_unit: String,

    /// Relation ids per relation name, in establishment order
    #[serde(default)]
    pub relations: BTreeMap<String, Vec<RelationEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationEntry {
    pub id: String,

    #[serde(default)]
    pub units: Vec<UnitEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEntry {
    pub name: String,

    #[serde(default)]
    pub data: RelationData,
}

impl RelationSnapshot {
    pub fn new(local_unit: impl Into<String>) -> Self {
        Self {
            local_unit: local_unit.into(),
            relations: BTreeMap::new(),
        }
    }

    /// Read a snapshot; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ContextError> {
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    /// Ensure a relation id exists, even with no units.
    pub fn with_relation(mut self, relation: &str, rid: &str) -> Self {
        self.entry_mut(relation, rid);
        self
    }

    /// Add a unit and its data under a relation id, creating the id if needed.
    pub fn with_unit<'a, I>(mut self, relation: &str, rid: &str, unit: &str, data: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let data = data
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.entry_mut(relation, rid).units.push(UnitEntry {
            name: unit.to_string(),
            data,
        });
        self
    }

    fn entry_mut(&mut self, relation: &str, rid: &str) -> &mut RelationEntry {
        let entries = self.relations.entry(relation.to_string()).or_default();
        let pos = match entries.iter().position(|e| e.id == rid) {
            Some(pos) => pos,
            None => {
                entries.push(RelationEntry {
                    id: rid.to_string(),
                    units: Vec::new(),
                });
                entries.len() - 1
            }
        };
        &mut entries[pos]
    }

    fn find(&self, rid: &str) -> Result<&RelationEntry, ContextError> {
        self.relations
            .values()
            .flatten()
            .find(|entry| entry.id == rid)
            .ok_or_else(|| ContextError::Relation(format!("Unknown relation id: {}", rid)))
    }
}

impl RelationStore for RelationSnapshot {
    fn local_unit(&self) -> &str {
        &self.local_unit
    }

    fn relation_ids(&self, relation: &str) -> Result<Vec<String>, ContextError> {
        Ok(self
            .relations
            .get(relation)
            .map(|entries| entries.iter().map(|e| e.id.clone()).collect())
            .unwrap_or_default())
    }

    fn related_units(&self, rid: &str) -> Result<Vec<String>, ContextError> {
        Ok(self
            .find(rid)?
            .units
            .iter()
            .map(|u| u.name.clone())
            .collect())
    }

    fn relation_get(&self, rid: &str, unit: &str) -> Result<RelationData, ContextError> {
        self.find(rid)?
            .units
            .iter()
            .find(|u| u.name == unit)
            .map(|u| u.data.clone())
            .ok_or_else(|| {
                ContextError::Relation(format!("Unit {} is not related on {}", unit, rid))
            })
    }
}
