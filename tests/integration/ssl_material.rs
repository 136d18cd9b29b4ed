//! SSL material flowing from the identity relation to disk and into apache.

use super::test_utils::Unit;
use dashboard_contexts::context::web_server::{LOCAL_CERT_FILE, LOCAL_KEY_FILE};
use dashboard_contexts::context::{ContextGenerator, WebServerContext, WebServerSslContext};
use dashboard_contexts::relation::IDENTITY_SERVICE;
use std::fs;
use std::path::Path;

#[test]
fn test_identity_issued_certificate_enables_ssl() {
    let mut unit = Unit::new();
    unit.config.enforce_ssl = true;
    unit.relations = unit.relations.with_unit(
        IDENTITY_SERVICE,
        "identity-service:4",
        "keystone/0",
        [
            ("ca_cert", "Y2E="),
            ("ssl_cert_10.5.0.10", "Y2VydA=="),
            ("ssl_key_10.5.0.10", "a2V5"),
        ],
    );

    let ssl = WebServerSslContext.generate(&unit.env()).unwrap();
    assert!(ssl.ssl_configured);
    assert_eq!(
        fs::read_to_string(unit.host.resolve(Path::new(LOCAL_CERT_FILE))).unwrap(),
        "cert"
    );
    assert_eq!(
        fs::read_to_string(unit.host.resolve(Path::new(LOCAL_KEY_FILE))).unwrap(),
        "key"
    );

    let apache = WebServerContext.generate(&unit.env()).unwrap();
    assert!(apache.enforce_ssl);
}

#[test]
fn test_enforce_ssl_without_material_does_not_fail() {
    let mut unit = Unit::new();
    unit.config.enforce_ssl = true;

    let apache = WebServerContext.generate(&unit.env()).unwrap();
    assert!(!apache.enforce_ssl);

    let ssl = WebServerSslContext.generate(&unit.env()).unwrap();
    assert!(!ssl.ssl_configured);
    assert!(ssl.ssl_cert.is_none());
}

#[test]
fn test_bad_base64_material_is_reported() {
    let mut unit = Unit::new();
    unit.config.ssl_ca = Some("@@not base64@@".to_string());

    assert!(WebServerSslContext.generate(&unit.env()).is_err());
}
