use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a customer in the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub i32);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for CustomerId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Stocks the trading service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ticker {
    Google,
    Apple,
    Microsoft,
    Amazon,
}

/// Direction of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

// -- Lookup --

/// Quantity of a single stock held by a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: Ticker,
    pub quantity: i32,
}

/// Customer profile returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInformation {
    /// Customer identifier
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Cash balance available for buying
    pub balance: i32,
    /// Stocks currently held
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

// -- Trade --

/// Order sent to the customer service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTradeRequest {
    /// Stock to trade
    pub ticker: Ticker,
    /// Unit price agreed for the trade
    pub price: i32,
    /// Number of shares
    pub quantity: i32,
    /// Buy or sell
    pub action: TradeAction,
}

impl StockTradeRequest {
    /// Total amount moved by this trade, `None` if it does not fit in an `i32`
    pub const fn total_price(&self) -> Option<i32> {
        self.price.checked_mul(self.quantity)
    }
}

/// Confirmation of an executed trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTradeResponse {
    pub customer_id: CustomerId,
    pub ticker: Ticker,
    pub price: i32,
    pub quantity: i32,
    pub action: TradeAction,
    pub total_price: i32,
    /// Customer balance after the trade settled
    pub balance: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_request_uses_upper_case_enums() {
        let request = StockTradeRequest {
            ticker: Ticker::Apple,
            price: 120,
            quantity: 3,
            action: TradeAction::Buy,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "ticker": "APPLE",
                "price": 120,
                "quantity": 3,
                "action": "BUY"
            })
        );
        assert_eq!(request.total_price(), Some(360));
    }

    #[test]
    fn total_price_overflow_is_none() {
        let request = StockTradeRequest {
            ticker: Ticker::Amazon,
            price: 100_000,
            quantity: 100_000,
            action: TradeAction::Buy,
        };

        assert_eq!(request.total_price(), None);
    }

    #[test]
    fn trade_response_reads_camel_case() {
        let response: StockTradeResponse = serde_json::from_value(serde_json::json!({
            "customerId": 7,
            "ticker": "GOOGLE",
            "price": 100,
            "quantity": 2,
            "action": "SELL",
            "totalPrice": 200,
            "balance": 10_200
        }))
        .unwrap();

        assert_eq!(response.customer_id, CustomerId(7));
        assert_eq!(response.action, TradeAction::Sell);
        assert_eq!(response.total_price, 200);
    }

    #[test]
    fn customer_without_holdings_defaults_to_empty() {
        let customer: CustomerInformation = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Sam",
            "balance": 10_000
        }))
        .unwrap();

        assert!(customer.holdings.is_empty());
        assert_eq!(customer.id.to_string(), "1");
    }
}
