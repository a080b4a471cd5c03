use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Provider error: {0}")]
    ProviderFailed(String),

    #[error("Invalid price for {symbol}: {price}")]
    InvalidPrice { symbol: String, price: String },
}
