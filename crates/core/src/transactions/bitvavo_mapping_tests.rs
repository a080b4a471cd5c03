#[cfg(test)]
mod tests {
    use crate::transactions::{
        normalize_history, normalize_history_item, BitvavoHistoryItem, BitvavoHistoryPage,
        TransactionType, TRANSACTION_SOURCE_BITVAVO,
    };
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn item(tx_type: &str) -> BitvavoHistoryItem {
        BitvavoHistoryItem {
            transaction_id: format!("{}-1", tx_type),
            executed_at: "2024-02-10T08:30:00.000Z".to_string(),
            tx_type: tx_type.to_string(),
            price_currency: Some("EUR".to_string()),
            ..Default::default()
        }
    }

    fn with_received(mut item: BitvavoHistoryItem, currency: &str, amount: &str) -> BitvavoHistoryItem {
        item.received_currency = Some(currency.to_string());
        item.received_amount = Some(amount.to_string());
        item
    }

    fn with_sent(mut item: BitvavoHistoryItem, currency: &str, amount: &str) -> BitvavoHistoryItem {
        item.sent_currency = Some(currency.to_string());
        item.sent_amount = Some(amount.to_string());
        item
    }

    fn tx_type_of(item: &BitvavoHistoryItem) -> TransactionType {
        let tx = normalize_history_item(item).unwrap().unwrap();
        TransactionType::from_str(&tx.transaction_type).unwrap()
    }

    #[test]
    fn test_buy_uses_received_leg() {
        let mut buy = with_sent(with_received(item("buy"), "btc", "0.25"), "EUR", "10000");
        buy.price_amount = Some("40000".to_string());
        buy.fees_amount = Some("25".to_string());

        let tx = normalize_history_item(&buy).unwrap().unwrap();
        assert_eq!(tx.transaction_type, "BUY");
        assert_eq!(tx.asset_symbol, "BTC");
        assert_eq!(tx.quantity, Some(dec!(0.25)));
        assert_eq!(tx.price_per_unit, Some(dec!(40000)));
        assert_eq!(tx.fee, Some(dec!(25)));
        assert_eq!(tx.id.as_deref(), Some("ext:buy-1"));
        assert_eq!(tx.external_id.as_deref(), Some("buy-1"));
        assert_eq!(tx.source.as_deref(), Some(TRANSACTION_SOURCE_BITVAVO));

        let engine_tx = tx.into_transaction().unwrap();
        assert_eq!(engine_tx.transaction_type, TransactionType::Buy);
    }

    #[test]
    fn test_sell_uses_sent_leg() {
        let sell = with_received(with_sent(item("sell"), "ETH", "1.5"), "EUR", "4500");
        let tx = normalize_history_item(&sell).unwrap().unwrap();
        assert_eq!(tx.transaction_type, "SELL");
        assert_eq!(tx.asset_symbol, "ETH");
        assert_eq!(tx.quantity, Some(dec!(1.5)));
        assert_eq!(tx.price_per_unit, Some(dec!(0)));
    }

    #[test]
    fn test_withdrawal_becomes_transfer_out() {
        let withdrawal = with_sent(item("withdrawal"), "SOL", "3");
        let tx = normalize_history_item(&withdrawal).unwrap().unwrap();
        assert_eq!(tx.transaction_type, "TRANSFER_OUT");
        assert_eq!(tx.asset_symbol, "SOL");
        assert_eq!(tx.quantity, Some(dec!(3)));
    }

    #[test]
    fn test_cancelled_withdrawal_is_skipped() {
        let cancelled = with_sent(item("withdrawal_cancelled"), "SOL", "3");
        assert!(normalize_history_item(&cancelled).unwrap().is_none());
    }

    #[test]
    fn test_income_types() {
        assert_eq!(
            tx_type_of(&with_received(item("deposit"), "BTC", "0.1")),
            TransactionType::Deposit
        );
        assert_eq!(
            tx_type_of(&with_received(item("staking"), "DOT", "0.4")),
            TransactionType::StakingReward
        );
        assert_eq!(
            tx_type_of(&with_received(item("fixed_staking"), "DOT", "0.4")),
            TransactionType::StakingReward
        );
        for credit in [
            "affiliate",
            "distribution",
            "rebate",
            "loan",
            "manually_assigned_bitvavo",
            "external_transferred_funds",
        ] {
            assert_eq!(
                tx_type_of(&with_received(item(credit), "EUR", "5")),
                TransactionType::TransferIn,
                "{} should map to TRANSFER_IN",
                credit
            );
        }
    }

    #[test]
    fn test_internal_transfer_direction() {
        let inbound = with_received(item("internal_transfer"), "ADA", "100");
        let tx = normalize_history_item(&inbound).unwrap().unwrap();
        assert_eq!(tx.transaction_type, "TRANSFER_IN");
        assert_eq!(tx.quantity, Some(dec!(100)));

        let outbound = with_sent(item("internal_transfer"), "ADA", "40");
        let tx = normalize_history_item(&outbound).unwrap().unwrap();
        assert_eq!(tx.transaction_type, "TRANSFER_OUT");
        assert_eq!(tx.asset_symbol, "ADA");
        assert_eq!(tx.quantity, Some(dec!(40)));
    }

    #[test]
    fn test_unknown_type_defaults_to_transfer_in() {
        let odd = with_received(item("airdrop_v2"), "XYZ", "7");
        let tx = normalize_history_item(&odd).unwrap().unwrap();
        assert_eq!(tx.transaction_type, "TRANSFER_IN");
        assert_eq!(tx.quantity, Some(dec!(7)));
        assert_eq!(tx.price_per_unit, Some(dec!(0)));
    }

    #[test]
    fn test_bad_executed_at_is_an_error() {
        let mut bad = with_received(item("buy"), "BTC", "1");
        bad.executed_at = "not a date".to_string();
        assert!(normalize_history_item(&bad).is_err());
    }

    #[test]
    fn test_missing_currency_is_an_error() {
        assert!(normalize_history_item(&item("deposit")).is_err());
    }

    #[test]
    fn test_normalize_page_skips_failures() {
        let json = r#"{
            "items": [
                {"transactionId": "a", "executedAt": "2024-01-01T00:00:00Z", "type": "buy",
                 "priceCurrency": "EUR", "priceAmount": "100", "receivedCurrency": "BTC", "receivedAmount": "1",
                 "sentCurrency": "EUR", "sentAmount": "100", "feesCurrency": "EUR", "feesAmount": "0.25"},
                {"transactionId": "b", "executedAt": "2024-01-02T00:00:00Z", "type": "withdrawal_cancelled",
                 "sentCurrency": "BTC", "sentAmount": "1"},
                {"transactionId": "c", "executedAt": "garbage", "type": "sell",
                 "sentCurrency": "BTC", "sentAmount": "1"}
            ],
            "currentPage": 1,
            "totalPages": 1,
            "maxItems": 100
        }"#;
        let page: BitvavoHistoryPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 1);

        let normalized = normalize_history(&page.items);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].external_id.as_deref(), Some("a"));
        assert_eq!(normalized[0].fee, Some(dec!(0.25)));
    }
}
