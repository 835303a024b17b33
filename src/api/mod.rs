mod error;
mod http;
mod repository;

pub use error::NetworkError;
pub use http::HttpCoinRepository;
pub use repository::{CoinRepository, Endpoint};
