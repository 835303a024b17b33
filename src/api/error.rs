use thiserror::Error;

/// Why a coin fetch failed. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// No base URL configured, or it does not form an absolute http(s) URL.
    /// Raised before any request is sent.
    #[error("Coin service address is missing or invalid")]
    InvalidEndpoint,

    /// The server answered with something other than 200.
    #[error("Coin service unavailable (HTTP {0})")]
    ServiceUnavailable(u16),

    /// The body was not a list of well-formed coin records.
    #[error("Could not read coin data: {0}")]
    DecodingFailure(String),

    /// Connection, timeout and any other transport failure.
    #[error("Could not reach coin service: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct() {
        let messages = [
            NetworkError::InvalidEndpoint.to_string(),
            NetworkError::ServiceUnavailable(503).to_string(),
            NetworkError::DecodingFailure("eof".into()).to_string(),
            NetworkError::Unknown("refused".into()).to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(messages[1], "Coin service unavailable (HTTP 503)");
    }
}
