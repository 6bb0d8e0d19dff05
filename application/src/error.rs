use domain::ApiError;
use thiserror::Error;

/// Shown when the failure carries no text meant for the customer.
pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão com o servidor";

#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected locally, before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Nenhuma sessão ativa")]
    NoSession,

    /// Order submission stopped at line `accepted + 1` of `total`.
    #[error("order submission stopped after {accepted} of {total} lines: {source}")]
    Submission {
        accepted: usize,
        total: usize,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AppError {
    /// Text for the error toast.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(message) | AppError::NotFound(message) => message.clone(),
            AppError::NoSession => self.to_string(),
            AppError::Submission { source, .. } | AppError::Api(source) => api_message(source),
        }
    }
}

fn api_message(err: &ApiError) -> String {
    err.server_message()
        .unwrap_or(CONNECTION_ERROR_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_calls_show_server_text() {
        let err = AppError::from(ApiError::rejected(400, "Mesa não está disponível."));
        assert_eq!(err.user_message(), "Mesa não está disponível.");
    }

    #[test]
    fn transport_failures_show_generic_text() {
        let err = AppError::from(ApiError::transport("connection refused"));
        assert_eq!(err.user_message(), CONNECTION_ERROR_MESSAGE);

        let err = AppError::from(ApiError::Decode("missing field `mesa`".into()));
        assert_eq!(err.user_message(), CONNECTION_ERROR_MESSAGE);
    }

    #[test]
    fn local_errors_show_their_own_text() {
        assert_eq!(
            AppError::Validation("Por favor, preencha todos os campos".into()).user_message(),
            "Por favor, preencha todos os campos"
        );
        assert_eq!(AppError::NoSession.user_message(), "Nenhuma sessão ativa");
    }
}
