//! Multi-region identity deployments.

use super::test_utils::Unit;
use dashboard_contexts::context::{ContextGenerator, IdentityAuthContext};
use dashboard_contexts::relation::IDENTITY_SERVICE;
use serde_json::json;

#[test]
fn test_two_keystones_in_two_regions() {
    let mut unit = Unit::new();
    unit.config.endpoint_type = Some("internalURL,publicURL".to_string());
    unit.config.default_domain = Some("admin_domain".to_string());
    unit.relations = unit
        .relations
        .with_unit(
            IDENTITY_SERVICE,
            "identity-service:4",
            "keystone/0",
            [
                ("service_host", "10.5.0.20"),
                ("service_port", "5000"),
                ("api_version", "3"),
                ("region", "RegionOne"),
            ],
        )
        .with_unit(
            IDENTITY_SERVICE,
            "identity-service:12",
            "keystone-east/0",
            [
                ("service_host", "2001:db8::30"),
                ("service_port", "5000"),
                ("service_protocol", "https"),
                ("api_version", "3"),
                ("region", "RegionEast"),
            ],
        );

    let ctxt = IdentityAuthContext.generate(&unit.env()).unwrap();
    assert_eq!(
        serde_json::to_value(&ctxt).unwrap(),
        json!({
            "service_port": "5000",
            "service_host": "10.5.0.20",
            "service_protocol": "http",
            "api_version": "3",
            "regions": [
                {"endpoint": "http://10.5.0.20:5000/v2.0", "title": "RegionOne"},
                {"endpoint": "https://[2001:db8::30]:5000/v2.0", "title": "RegionEast"},
            ],
            "primary_endpoint": "internalURL",
            "secondary_endpoint": "publicURL",
        })
    );
}

#[test]
fn test_incomplete_records_do_not_contribute_regions() {
    let mut unit = Unit::new();
    unit.relations = unit
        .relations
        .with_unit(
            IDENTITY_SERVICE,
            "identity-service:4",
            "keystone/0",
            [
                ("service_host", "10.5.0.20"),
                ("service_port", "5000"),
                ("region", "RegionOne"),
            ],
        )
        .with_unit(
            IDENTITY_SERVICE,
            "identity-service:4",
            "keystone/1",
            [("service_host", "10.5.0.21"), ("region", "RegionTwo")],
        );

    let ctxt = IdentityAuthContext.generate(&unit.env()).unwrap();
    assert!(ctxt.regions.is_none());
    assert_eq!(ctxt.service.unwrap().service_host, "10.5.0.20");
}
