use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::StationRecord;
use crate::register::payload::record_payload;
use crate::utils::constants::API_KEY_HEADER;
use crate::utils::progress::ProgressReporter;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("station-register/", env!("CARGO_PKG_VERSION"));

/// Everything one submission run needs, passed in by the caller
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub api_url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Uploaded file the records came from, for log context
    pub source_file: Option<PathBuf>,
}

impl SubmissionContext {
    pub fn from_settings(settings: &Settings, source_file: Option<PathBuf>) -> Result<Self> {
        let api_url = settings
            .api_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ProcessingError::MissingData("register API URL (api_url)".to_string()))?;
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProcessingError::MissingData("register API key (api_key)".to_string()))?;

        Ok(Self {
            api_url,
            api_key,
            timeout: Duration::from_secs(settings.request_timeout_secs),
            source_file,
        })
    }
}

/// Result of posting one station to the register
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// 201: the register created the station
    Created { id: String, local_id: Option<String> },
    /// 409: a matching station is already registered
    AlreadyExists { id: String },
    /// Any other response
    Failed { status: u16, message: String },
    /// No response: connection, timeout or body read failure
    Unreachable { message: String },
}

impl SubmissionOutcome {
    /// Classify a register response from its status and body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let json: Option<Value> = serde_json::from_str(body).ok();
        let field = |names: &[&str]| text_field(json.as_ref(), names);

        match status {
            StatusCode::CREATED => SubmissionOutcome::Created {
                id: field(&["id", "station_id"][..]).unwrap_or_default(),
                local_id: field(&["local_id", "station_localid"][..]),
            },
            StatusCode::CONFLICT => SubmissionOutcome::AlreadyExists {
                id: field(&["id", "existing_id", "station_id"][..]).unwrap_or_default(),
            },
            other => SubmissionOutcome::Failed {
                status: other.as_u16(),
                message: field(&["message", "detail", "error"][..])
                    .unwrap_or_else(|| body.trim().to_string()),
            },
        }
    }
}

/// First of `names` present in a JSON object as a string or number
fn text_field(json: Option<&Value>, names: &[&str]) -> Option<String> {
    let object = json?;
    names.iter().find_map(|name| match object.get(*name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionSummary {
    pub created: usize,
    pub already_exists: usize,
    pub failed: usize,
    pub outcomes: Vec<(String, SubmissionOutcome)>,
}

impl SubmissionSummary {
    fn record(&mut self, name: &str, outcome: SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Created { .. } => self.created += 1,
            SubmissionOutcome::AlreadyExists { .. } => self.already_exists += 1,
            SubmissionOutcome::Failed { .. } | SubmissionOutcome::Unreachable { .. } => {
                self.failed += 1
            }
        }
        self.outcomes.push((name.to_string(), outcome));
    }

    pub fn summary(&self) -> String {
        format!(
            "Created: {}\nAlready registered: {}\nFailed: {}",
            self.created, self.already_exists, self.failed
        )
    }
}

/// Client for the national station register REST API
pub struct RegisterClient {
    http_client: reqwest::Client,
    context: SubmissionContext,
}

impl RegisterClient {
    pub fn new(context: SubmissionContext) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(context.timeout)
            .build()?;

        Ok(Self::with_http_client(context, http_client))
    }

    pub fn with_http_client(context: SubmissionContext, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            context,
        }
    }

    /// Create a new station and get its identifier back
    pub async fn post(&self, record: &StationRecord) -> Result<SubmissionOutcome> {
        let payload = record_payload(record);
        debug!(
            station = %record.preferred_name,
            attributes = payload.len(),
            "Posting station to register"
        );

        let response = self
            .http_client
            .post(&self.context.api_url)
            .header(API_KEY_HEADER, &self.context.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let outcome = SubmissionOutcome::from_response(status, &body);

        if let SubmissionOutcome::Failed { status, message } = &outcome {
            warn!(
                station = %record.preferred_name,
                status,
                message = %message,
                "Register rejected station"
            );
        }
        Ok(outcome)
    }

    /// Change station attributes; not offered by the register
    pub async fn put(&self, _record: &StationRecord) -> Result<SubmissionOutcome> {
        Err(ProcessingError::Unsupported(
            "updating stations in the register".to_string(),
        ))
    }

    /// Erase a station; not offered by the register
    pub async fn delete(&self, _id: &str) -> Result<()> {
        Err(ProcessingError::Unsupported(
            "deleting stations from the register".to_string(),
        ))
    }

    /// Post records one at a time, in order. Transport failures are recorded
    /// per station and the batch carries on.
    pub async fn submit_all(
        &self,
        records: &[&StationRecord],
        progress: Option<&ProgressReporter>,
    ) -> Result<SubmissionSummary> {
        let mut summary = SubmissionSummary::default();

        for record in records {
            if let Some(p) = progress {
                p.set_message(&format!("Submitting {}", record.preferred_name));
            }
            let outcome = match self.post(record).await {
                Ok(outcome) => outcome,
                Err(ProcessingError::Http(e)) => {
                    warn!(
                        station = %record.preferred_name,
                        error = %e,
                        "Register could not be reached"
                    );
                    SubmissionOutcome::Unreachable {
                        message: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            };
            summary.record(&record.preferred_name, outcome);
            if let Some(p) = progress {
                p.increment(1);
            }
        }

        info!(
            source = ?self.context.source_file,
            created = summary.created,
            already_exists = summary.already_exists,
            failed = summary.failed,
            "Finished register submission"
        );
        Ok(summary)
    }
}
