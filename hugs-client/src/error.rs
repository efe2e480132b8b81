use crate::api;

/// Why a mutation did not go through. Callers are expected to treat any of
/// these as "nothing changed remotely".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] api::Error),

    #[error("remote store did not accept the update")]
    Network(#[source] anyhow::Error),
}

impl Error {
    /// The request never left the client
    pub fn is_rejected_locally(&self) -> bool {
        matches!(self, Error::Api(_))
    }
}
