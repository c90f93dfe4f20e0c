use crate::cf::CfError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("pod namespace not found")]
    MissingNamespace,
    #[error("pod name not found")]
    MissingName,
    #[error("pod {pod} has no containers")]
    NoContainers { pod: String },
    #[error("too many containers in pod {pod}: {count}, only one is supported")]
    TooManyContainers { pod: String, count: usize },
    #[error("Error starting app {app}")]
    StartApp {
        app: String,
        #[source]
        source: CfError,
    },
    #[error(transparent)]
    Platform(#[from] CfError),
}

impl ProviderError {
    /// Errors caused by the pod itself rather than by the platform.
    pub fn is_invalid_pod(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingNamespace
                | ProviderError::MissingName
                | ProviderError::NoContainers { .. }
                | ProviderError::TooManyContainers { .. }
        )
    }

    /// The message followed by every cause not already part of it.
    pub fn detail(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !msg.contains(&text) {
                msg.push_str(": ");
                msg.push_str(&text);
            }
            source = cause.source();
        }
        msg
    }
}
