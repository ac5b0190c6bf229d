use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::library::SignatureLibrary;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobMappingError {
    #[error("Analysis job name is blank")]
    BlankJobName,

    #[error("Analysis job '{0}' does not name a known signature library")]
    UnknownJob(String),

    #[error("Invalid job request '{0}': expected NAME=VERSION")]
    InvalidRequest(String),
}

/// An analysis job selected for this run and the release it should use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub job_name: String,
    pub requested_version: String,
}

impl JobRequest {
    pub fn new(job_name: impl Into<String>, requested_version: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            requested_version: requested_version.into(),
        }
    }
}

impl FromStr for JobRequest {
    type Err = JobMappingError;

    /// Parse `NAME=VERSION` (e.g. `pfam=32.0`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, version)) if !version.trim().is_empty() => {
                Ok(Self::new(name.trim(), version.trim()))
            }
            _ => Err(JobMappingError::InvalidRequest(s.to_string())),
        }
    }
}

impl fmt::Display for JobRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.job_name, self.requested_version)
    }
}

/// Requested release version per signature library, for one run.
///
/// `None` as the filter means no jobs were selected, so every library and
/// version is accepted. A filter with no entries accepts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobVersionIndex {
    filter: Option<HashMap<SignatureLibrary, String>>,
}

impl JobVersionIndex {
    /// Index that accepts every library at every version
    pub fn unrestricted() -> Self {
        Self { filter: None }
    }

    /// Build the index from the caller's job selection.
    ///
    /// # Errors
    ///
    /// Returns `JobMappingError::BlankJobName` or `JobMappingError::UnknownJob`
    /// if any job cannot be mapped to a library. The whole selection is
    /// rejected; there is no partial index.
    pub fn build(jobs: Option<&[JobRequest]>) -> Result<Self, JobMappingError> {
        let Some(jobs) = jobs else {
            return Ok(Self::unrestricted());
        };

        let mut filter = HashMap::with_capacity(jobs.len());
        for job in jobs {
            if job.job_name.trim().is_empty() {
                return Err(JobMappingError::BlankJobName);
            }
            let library = SignatureLibrary::lookup_job(&job.job_name)
                .ok_or_else(|| JobMappingError::UnknownJob(job.job_name.clone()))?;

            debug!(
                "Job: {} -> library: {} version: {}",
                job.job_name, library, job.requested_version
            );

            if let Some(previous) = filter.insert(library, job.requested_version.clone()) {
                if previous != job.requested_version {
                    warn!(
                        "Library {} requested at both {} and {}; using {}",
                        library, previous, job.requested_version, job.requested_version
                    );
                }
            }
        }

        Ok(Self {
            filter: Some(filter),
        })
    }

    /// True if a job selection was supplied
    pub fn is_restricted(&self) -> bool {
        self.filter.is_some()
    }

    /// Version requested for a library, if the selection names it
    pub fn requested_version(&self, library: SignatureLibrary) -> Option<&str> {
        self.filter
            .as_ref()
            .and_then(|f| f.get(&library))
            .map(String::as_str)
    }

    /// True if hits for this library release are in scope for the run
    pub fn accepts(&self, library: SignatureLibrary, version: &str) -> bool {
        match &self.filter {
            None => true,
            Some(filter) => filter.get(&library).is_some_and(|v| v == version),
        }
    }

    /// Human-readable summary for diagnostics
    pub fn describe(&self) -> String {
        match &self.filter {
            None => "all libraries, any version".to_string(),
            Some(filter) if filter.is_empty() => "no libraries".to_string(),
            Some(filter) => {
                let mut entries: Vec<_> = filter.iter().collect();
                entries.sort();
                entries
                    .into_iter()
                    .map(|(lib, version)| format!("{lib}={version}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    }
}
