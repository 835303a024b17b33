use async_trait::async_trait;
use reqwest::Url;

use super::NetworkError;
use crate::types::CoinRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Coins,
}

impl Endpoint {
    /// Appended verbatim to the base URL. The coin list lives at the base itself.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Coins => "",
        }
    }

    pub fn url(self, base_url: Option<&str>) -> Result<Url, NetworkError> {
        let base = base_url
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or(NetworkError::InvalidEndpoint)?;
        let url = Url::parse(&format!("{}{}", base, self.path()))
            .map_err(|_| NetworkError::InvalidEndpoint)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(NetworkError::InvalidEndpoint),
        }
    }
}

/// Source of coin records.
#[async_trait]
pub trait CoinRepository: Send + Sync {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Vec<CoinRecord>, NetworkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coins_url_is_the_base_url() {
        let url = Endpoint::Coins
            .url(Some("https://example.com/api/coins.json"))
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/coins.json");
    }

    #[test]
    fn missing_or_blank_base_is_invalid() {
        assert_eq!(Endpoint::Coins.url(None), Err(NetworkError::InvalidEndpoint));
        assert_eq!(Endpoint::Coins.url(Some("   ")), Err(NetworkError::InvalidEndpoint));
    }

    #[test]
    fn relative_or_non_http_base_is_invalid() {
        assert_eq!(
            Endpoint::Coins.url(Some("www.sampleurl.com")),
            Err(NetworkError::InvalidEndpoint)
        );
        assert_eq!(
            Endpoint::Coins.url(Some("ftp://example.com/coins")),
            Err(NetworkError::InvalidEndpoint)
        );
    }
}
