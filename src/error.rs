use serde::Serialize;

use crate::{acquirer::AcquireError, resolver::ResolveError};

/// Which step of the download pipeline gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ResolutionFailure,
    AcquisitionFailure,
}

/// Failure reported to the caller. Both kinds travel in the same envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ResolutionFailure => "resolution_failure",
            FailureKind::AcquisitionFailure => "acquisition_failure",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<ResolveError> for FetchError {
    fn from(e: ResolveError) -> Self {
        Self {
            kind: FailureKind::ResolutionFailure,
            message: e.to_string(),
        }
    }
}

impl From<AcquireError> for FetchError {
    fn from(e: AcquireError) -> Self {
        Self {
            kind: FailureKind::AcquisitionFailure,
            message: e.to_string(),
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
