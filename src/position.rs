use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub stock_code: String,
    pub stock_name: String,
    pub quantity: i64,
    pub cost_price: f64,
    pub current_price: f64,
    // Supplied as-is, never recomputed from quantity * price
    pub market_value: f64,
    pub profit: f64,
    pub profit_percentage: f64,
    pub account: String,
}

impl Position {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stock_code: impl Into<String>,
        stock_name: impl Into<String>,
        quantity: i64,
        cost_price: f64,
        current_price: f64,
        market_value: f64,
        profit: f64,
        profit_percentage: f64,
        account: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            stock_code: stock_code.into(),
            stock_name: stock_name.into(),
            quantity,
            cost_price,
            current_price,
            market_value,
            profit,
            profit_percentage,
            account: account.into(),
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.profit > 0.0
    }

    /// Built-in sample holdings across an A-share and a US-equity account.
    ///
    /// Every call returns fresh ids.
    pub fn samples() -> Vec<Position> {
        vec![
            Position::new("600000", "浦发银行", 1000, 10.5, 11.2, 11200.0, 700.0, 6.67, "A股账户"),
            Position::new("601318", "中国平安", 500, 60.2, 58.4, 29200.0, -900.0, -2.99, "A股账户"),
            Position::new("000001", "平安银行", 2000, 15.8, 16.5, 33000.0, 1400.0, 4.43, "A股账户"),
            Position::new("AAPL", "苹果公司", 50, 150.2, 175.6, 8780.0, 1270.0, 16.91, "美股账户"),
            Position::new("MSFT", "微软", 30, 280.5, 275.2, 8256.0, -159.0, -1.89, "美股账户"),
        ]
    }
}
