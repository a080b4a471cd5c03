use coinfolio_core::constants::DEFAULT_QUOTE_CURRENCY;

pub struct Config {
    pub quote_currency: String,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let quote_currency = lookup("COINFOLIO_QUOTE_CURRENCY")
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_QUOTE_CURRENCY.to_string());
        let log_format = lookup("COINFOLIO_LOG_FORMAT").unwrap_or_else(|| "text".into());
        Self {
            quote_currency,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.quote_currency, "EUR");
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn test_reads_overrides() {
        let vars = HashMap::from([
            ("COINFOLIO_QUOTE_CURRENCY", " usdc "),
            ("COINFOLIO_LOG_FORMAT", "json"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.quote_currency, "USDC");
        assert_eq!(config.log_format, "json");
    }
}
