use thiserror::Error;

/// Failures that abort the probe before any service is evaluated.
///
/// Every variant maps to the UNKNOWN exit code; the display string is the
/// diagnostic line printed for monitoring frameworks, so the wording of
/// `UnexpectedStatus` and `XmlParse` is fixed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Got {0} Error")]
    UnexpectedStatus(u16),
    #[error("failed to reach monit status endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("XML Parse Error")]
    XmlParse(#[from] quick_xml::DeError),
}
