//! Service selection, health evaluation, and summary rendering.

use crate::monit_client::ServiceSet;

const SERVICE_UP: i64 = 0;
const SERVICE_MONITORED: i64 = 1;

/// Verdict ordering follows the Nagios plugin convention; the derived `Ord`
/// makes severity aggregation a plain maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

/// Final probe verdict: aggregated severity plus the failure messages
/// collected while evaluating each service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub messages: Vec<String>,
}

impl Report {
    pub fn summary_line(&self) -> String {
        if self.messages.is_empty() {
            "OK".to_string()
        } else {
            self.messages.join(", ")
        }
    }
}

/// Keep only the services matching the requested group and/or name. When
/// both selectors are set a service must satisfy both. A fresh map is built
/// rather than removing entries from the set being traversed.
pub fn filter_services(
    services: ServiceSet,
    group: Option<&str>,
    service: Option<&str>,
) -> ServiceSet {
    services
        .into_iter()
        .filter(|(name, record)| {
            group.is_none_or(|group| record.group == group)
                && service.is_none_or(|service| name == service)
        })
        .collect()
}

/// Fold every service's monitored and status checks into one verdict.
///
/// The running severity starts unset: an empty set means nothing was ever
/// checked, which is a probe failure rather than a healthy result, so the
/// sentinel escalates to UNKNOWN with a `Plugin Error!` message. A set where
/// every check passes resolves explicitly to OK.
pub fn evaluate(services: &ServiceSet) -> Report {
    let mut verdict: Option<Severity> = None;
    let mut messages = Vec::new();

    for (name, service) in services {
        let monitored = service.monitor == SERVICE_MONITORED;
        if !monitored {
            messages.push(format!("{name} not monitored"));
        }
        verdict = raise(verdict, check_outcome(monitored));

        let up = service.status == SERVICE_UP;
        if !up {
            messages.push(format!("{name} down"));
        }
        verdict = raise(verdict, check_outcome(up));
    }

    match verdict {
        Some(severity) => Report { severity, messages },
        None => {
            messages.push("Plugin Error!".to_string());
            Report {
                severity: Severity::Unknown,
                messages,
            }
        }
    }
}

fn check_outcome(healthy: bool) -> Severity {
    if healthy {
        Severity::Ok
    } else {
        Severity::Critical
    }
}

fn raise(current: Option<Severity>, contribution: Severity) -> Option<Severity> {
    Some(match current {
        Some(severity) => severity.max(contribution),
        None => contribution,
    })
}
