//! Transport and wire-format handling for the Monit status endpoint.
//!
//! The probe talks to `GET /_status?format=xml` exactly once and turns the
//! response document into a [`ServiceSet`] keyed by service name.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::errors::ProbeError;

/// One monitored unit as reported by Monit. `status` is 0 when the service
/// is up; `monitor` is 1 when Monit is actively monitoring it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub status: i64,
    pub monitor: i64,
    pub group: String,
}

/// Services keyed by name. Monit does not emit duplicate names in practice;
/// if a document ever contains one, the last entry wins.
pub type ServiceSet = BTreeMap<String, ServiceRecord>;

#[derive(Debug, Deserialize)]
struct StatusDocument {
    #[serde(rename = "service", default)]
    services: Vec<ServiceElement>,
}

#[derive(Debug, Deserialize)]
struct ServiceElement {
    name: String,
    status: i64,
    monitor: i64,
    #[serde(default)]
    group: String,
}

/// Extract every `monit/service` element from the raw status document.
///
/// Sibling blocks such as `monit/server` are ignored; a document without
/// any `service` element yields an empty set rather than an error.
pub fn parse_services(xml: &str) -> Result<ServiceSet, ProbeError> {
    let document: StatusDocument = quick_xml::de::from_str(xml)?;

    let mut services = ServiceSet::new();
    for service in document.services {
        services.insert(
            service.name,
            ServiceRecord {
                status: service.status,
                monitor: service.monitor,
                group: service.group,
            },
        );
    }

    Ok(services)
}

#[async_trait]
pub trait StatusProvider: Send + Sync {
    async fn fetch_status(&self) -> Result<String, ProbeError>;
}

#[derive(Debug, Clone)]
pub struct HttpMonitClient {
    status_url: String,
    user: Option<String>,
    password: Option<String>,
    http: reqwest::Client,
}

impl HttpMonitClient {
    pub fn new(config: &Config) -> Self {
        Self {
            status_url: config.status_url(),
            user: config.user.clone(),
            password: config.password.clone(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl StatusProvider for HttpMonitClient {
    async fn fetch_status(&self) -> Result<String, ProbeError> {
        debug!(url = %self.status_url, "querying monit status endpoint");

        let mut request = self.http.get(&self.status_url);
        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProbeError::UnexpectedStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_services, ProbeError, ServiceRecord};

    const REPORT: &str = "<monit>\
        <server><id>abc</id><uptime>12345</uptime></server>\
        <service type=\"3\"><name>nginx</name><status>0</status><monitor>1</monitor><group>web</group></service>\
        <service type=\"3\"><name>postgres</name><status>512</status><monitor>1</monitor><group>db</group></service>\
        </monit>";

    #[test]
    fn extracts_service_elements_and_ignores_server_block() {
        let services = parse_services(REPORT).expect("report should parse");

        assert_eq!(services.len(), 2);
        assert_eq!(
            services.get("nginx"),
            Some(&ServiceRecord {
                status: 0,
                monitor: 1,
                group: "web".to_string(),
            })
        );
        assert_eq!(
            services.get("postgres"),
            Some(&ServiceRecord {
                status: 512,
                monitor: 1,
                group: "db".to_string(),
            })
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = parse_services(REPORT).expect("report should parse");
        let second = parse_services(REPORT).expect("report should parse");
        assert_eq!(first, second);
    }

    #[test]
    fn missing_group_defaults_to_empty() {
        let services = parse_services(
            "<monit><service><name>cron</name><status>0</status><monitor>1</monitor></service></monit>",
        )
        .expect("report should parse");

        assert_eq!(services.get("cron").map(|s| s.group.as_str()), Some(""));
    }

    #[test]
    fn duplicate_names_keep_the_last_entry() {
        let services = parse_services(
            "<monit>\
             <service><name>web</name><status>0</status><monitor>1</monitor><group>a</group></service>\
             <service><name>web</name><status>1</status><monitor>0</monitor><group>b</group></service>\
             </monit>",
        )
        .expect("report should parse");

        assert_eq!(services.len(), 1);
        assert_eq!(
            services.get("web"),
            Some(&ServiceRecord {
                status: 1,
                monitor: 0,
                group: "b".to_string(),
            })
        );
    }

    #[test]
    fn document_without_services_yields_empty_set() {
        let services = parse_services("<monit><server><id>abc</id></server></monit>")
            .expect("report should parse");
        assert!(services.is_empty());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse_services("<monit><service><name>web</name>")
            .expect_err("expected parse error");
        assert!(matches!(err, ProbeError::XmlParse(_)));
        assert_eq!(err.to_string(), "XML Parse Error");
    }

    #[test]
    fn non_integer_status_is_a_parse_error() {
        let err = parse_services(
            "<monit><service><name>web</name><status>up</status><monitor>1</monitor></service></monit>",
        )
        .expect_err("expected parse error");
        assert!(matches!(err, ProbeError::XmlParse(_)));
    }
}
