//! Extra local_settings stanzas contributed by dashboard plugins.

use super::{ContextGenerator, Environment};
use crate::error::ContextError;
use crate::relation::{first_unit_data, DASHBOARD_PLUGIN};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Rendered stanzas, lowest priority first
    pub settings: Vec<String>,
}

/// One plugin's contribution.
#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    unit: String,
    priority: f64,
    text: String,
}

impl Fragment {
    fn render(&self) -> String {
        format!("# {}\n{}", self.unit, self.text)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PluginSettingsContext;

impl ContextGenerator for PluginSettingsContext {
    type Output = PluginSettings;

    fn name(&self) -> &'static str {
        "local_settings"
    }

    fn description(&self) -> &'static str {
        "plugin local_settings fragments ordered by priority"
    }

    fn generate(&self, env: &Environment<'_>) -> Result<PluginSettings, ContextError> {
        let mut fragments = Vec::new();

        for (unit, data) in first_unit_data(env.relations, DASHBOARD_PLUGIN)? {
            let (Some(text), Some(priority)) = (data.get("local-settings"), data.get("priority"))
            else {
                debug!(unit = %unit, "Plugin has not published settings yet");
                continue;
            };
            let priority = match priority.trim().parse::<f64>() {
                Ok(p) if p.is_finite() => p,
                _ => {
                    warn!(unit = %unit, priority = %priority, "Ignoring plugin settings with non-numeric priority");
                    continue;
                }
            };
            fragments.push(Fragment {
                unit,
                priority,
                text: text.clone(),
            });
        }

        // Vec::sort_by is stable, so equal priorities keep relation order
        fragments.sort_by(|a, b| a.priority.total_cmp(&b.priority));

        Ok(PluginSettings {
            settings: fragments.iter().map(Fragment::render).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::Fixture;

    #[test]
    fn test_no_plugins_gives_empty_settings() {
        let fx = Fixture::new();
        let ctxt = PluginSettingsContext.generate(&fx.env()).unwrap();
        assert_eq!(
            serde_json::to_value(&ctxt).unwrap(),
            serde_json::json!({"settings": []})
        );
    }

    #[test]
    fn test_sorted_by_priority() {
        let mut fx = Fixture::new();
        fx.relations = fx
            .relations
            .with_unit(
                DASHBOARD_PLUGIN,
                "dashboard-plugin:3",
                "designate-dashboard/0",
                [("local-settings", "DESIGNATE = True"), ("priority", "90")],
            )
            .with_unit(
                DASHBOARD_PLUGIN,
                "dashboard-plugin:5",
                "octavia-dashboard/0",
                [("local-settings", "OCTAVIA = True"), ("priority", "10")],
            )
            .with_unit(
                DASHBOARD_PLUGIN,
                "dashboard-plugin:5",
                "octavia-dashboard/1",
                [("local-settings", "SECOND_UNIT = True"), ("priority", "1")],
            )
            .with_unit(
                DASHBOARD_PLUGIN,
                "dashboard-plugin:8",
                "magnum-dashboard/0",
                [("priority", "5")],
            );

        let ctxt = PluginSettingsContext.generate(&fx.env()).unwrap();
        assert_eq!(
            ctxt.settings,
            vec![
                "# octavia-dashboard/0\nOCTAVIA = True".to_string(),
                "# designate-dashboard/0\nDESIGNATE = True".to_string(),
            ]
        );
    }

    #[test]
    fn test_numeric_not_lexicographic_order() {
        let mut fx = Fixture::new();
        fx.relations = fx
            .relations
            .with_unit(
                DASHBOARD_PLUGIN,
                "dashboard-plugin:1",
                "a/0",
                [("local-settings", "A"), ("priority", "100")],
            )
            .with_unit(
                DASHBOARD_PLUGIN,
                "dashboard-plugin:2",
                "b/0",
                [("local-settings", "B"), ("priority", "20")],
            );

        let ctxt = PluginSettingsContext.generate(&fx.env()).unwrap();
        assert_eq!(ctxt.settings, vec!["# b/0\nB", "# a/0\nA"]);
    }

    #[test]
    fn test_non_numeric_priority_is_skipped() {
        let mut fx = Fixture::new();
        fx.relations = fx.relations.with_unit(
            DASHBOARD_PLUGIN,
            "dashboard-plugin:1",
            "a/0",
            [("local-settings", "A"), ("priority", "high")],
        );

        let ctxt = PluginSettingsContext.generate(&fx.env()).unwrap();
        assert!(ctxt.settings.is_empty());
    }
}
