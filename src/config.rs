use crate::position::Position;
use crate::price_history::TimeRange;
use crate::query::{PositionQuery, SortOrder};
use crate::repository::PositionRepository;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    #[serde(default = "default_positions")]
    pub positions: Vec<PositionConfig>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

/// One holding as written in the config file; ids are assigned on load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionConfig {
    pub stock_code: String,
    pub stock_name: String,
    pub quantity: i64,
    pub cost_price: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub profit: f64,
    pub profit_percentage: f64,
    pub account: String,
}

/// Profit-percentage thresholds for risk and action rules.
///
/// Comparisons are strict: a value equal to a threshold falls into the
/// next band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_high_risk_below")]
    pub high_risk_below: f64,
    #[serde(default = "default_medium_risk_below")]
    pub medium_risk_below: f64,
    #[serde(default = "default_stop_loss_below")]
    pub stop_loss_below: f64,
    #[serde(default = "default_watch_below")]
    pub watch_below: f64,
    #[serde(default = "default_take_profit_above")]
    pub take_profit_above: f64,
}

/// Initial list and chart selections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub account_filter: Option<String>,
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub time_range: TimeRange,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            high_risk_below: default_high_risk_below(),
            medium_risk_below: default_medium_risk_below(),
            stop_loss_below: default_stop_loss_below(),
            watch_below: default_watch_below(),
            take_profit_above: default_take_profit_above(),
        }
    }
}

fn default_high_risk_below() -> f64 {
    -10.0
}
fn default_medium_risk_below() -> f64 {
    0.0
}
fn default_stop_loss_below() -> f64 {
    -15.0
}
fn default_watch_below() -> f64 {
    -5.0
}
fn default_take_profit_above() -> f64 {
    20.0
}

fn default_positions() -> Vec<PositionConfig> {
    Position::samples().iter().map(PositionConfig::from).collect()
}

impl From<&Position> for PositionConfig {
    fn from(position: &Position) -> Self {
        Self {
            stock_code: position.stock_code.clone(),
            stock_name: position.stock_name.clone(),
            quantity: position.quantity,
            cost_price: position.cost_price,
            current_price: position.current_price,
            market_value: position.market_value,
            profit: position.profit,
            profit_percentage: position.profit_percentage,
            account: position.account.clone(),
        }
    }
}

impl PositionConfig {
    pub fn to_position(&self) -> Position {
        Position::new(
            self.stock_code.clone(),
            self.stock_name.clone(),
            self.quantity,
            self.cost_price,
            self.current_price,
            self.market_value,
            self.profit,
            self.profit_percentage,
            self.account.clone(),
        )
    }
}

impl ViewConfig {
    pub fn query(&self) -> PositionQuery {
        PositionQuery {
            account_filter: self.account_filter.clone(),
            search_text: self.search_text.clone(),
            sort_order: self.sort_order,
        }
    }
}

impl InsightConfig {
    /// Read a JSON config, falling back to the built-in defaults when the
    /// file does not exist. A file that exists but fails to parse is an error.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file {} not found, using built-in sample portfolio", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            "Loaded {} positions from {}",
            config.positions.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: InsightConfig = serde_json::from_str(json)?;
        config.warn_on_suspect_positions();
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compose the session repository; every position gets a fresh id
    pub fn build_repository(&self) -> PositionRepository {
        PositionRepository::new(self.positions.iter().map(PositionConfig::to_position).collect())
    }

    // Positions are display data, so odd values are reported but kept
    fn warn_on_suspect_positions(&self) {
        for position in &self.positions {
            if position.stock_code.trim().is_empty() || position.stock_name.trim().is_empty() {
                warn!(
                    "Position in account {} has an empty code or name",
                    position.account
                );
            }
            if !position.profit_percentage.is_finite() {
                warn!(
                    "Position {} has non-finite profit percentage {}",
                    position.stock_code, position.profit_percentage
                );
            }
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            positions: default_positions(),
            analysis: AnalysisConfig::default(),
            view: ViewConfig::default(),
        }
    }
}
