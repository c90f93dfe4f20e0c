use reqwest::StatusCode;

/// Failures talking to the Cloud Foundry API. `context` names the app, org or
/// space the call was acting on.
#[derive(Debug, thiserror::Error)]
pub enum CfError {
    #[error("{context}: {source}")]
    Request {
        context: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{context}, response code: {status}, body: {body}")]
    UnexpectedStatus {
        context: String,
        status: StatusCode,
        body: String,
    },
    #[error("{context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid access token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

impl CfError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CfError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
