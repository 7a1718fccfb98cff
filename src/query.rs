//! Position list filtering and sorting
//!
//! Turns the raw position collection plus the user's account, search and sort
//! choices into the list a front-end displays.

use crate::position::Position;
use crate::repository::PositionSource;
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    None,
    ProfitAscending,
    ProfitDescending,
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "default" => Ok(SortOrder::None),
            "asc" | "ascending" | "profit_ascending" => Ok(SortOrder::ProfitAscending),
            "desc" | "descending" | "profit_descending" => Ok(SortOrder::ProfitDescending),
            other => Err(anyhow::anyhow!("Invalid sort order: {}", other)),
        }
    }
}

/// User-chosen list parameters, owned by the front-end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionQuery {
    #[serde(default)]
    pub account_filter: Option<String>,
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl PositionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account_filter = Some(account.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn sort(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }
}

pub struct PositionQueryEngine;

impl PositionQueryEngine {
    /// Filter by account, then by search text, then sort by profit.
    ///
    /// The input slice is left untouched; sorting is stable so ties keep
    /// their filtered order.
    pub fn query(
        positions: &[Position],
        account_filter: Option<&str>,
        search_text: &str,
        sort_order: SortOrder,
    ) -> Vec<Position> {
        let needle = search_text.to_lowercase();

        let mut result: Vec<Position> = positions
            .iter()
            .filter(|p| account_filter.is_none_or(|account| p.account == account))
            .filter(|p| needle.is_empty() || matches_search(p, &needle))
            .cloned()
            .collect();

        match sort_order {
            SortOrder::ProfitAscending => {
                result.sort_by(|a, b| profit_key(a).total_cmp(&profit_key(b)))
            }
            SortOrder::ProfitDescending => {
                result.sort_by(|a, b| profit_key(b).total_cmp(&profit_key(a)))
            }
            SortOrder::None => {}
        }

        debug!(
            "Position query account={:?} search={:?} sort={:?}: {} of {} positions",
            account_filter,
            search_text,
            sort_order,
            result.len(),
            positions.len()
        );

        result
    }

    pub fn run(positions: &[Position], query: &PositionQuery) -> Vec<Position> {
        Self::query(
            positions,
            query.account_filter.as_deref(),
            &query.search_text,
            query.sort_order,
        )
    }

    pub fn query_source(source: &dyn PositionSource, query: &PositionQuery) -> Vec<Position> {
        Self::run(&source.positions(), query)
    }
}

// -0.0 + 0.0 is 0.0, so signed zeros compare equal and keep their order
fn profit_key(position: &Position) -> f64 {
    position.profit + 0.0
}

// `needle` is already lowercased
fn matches_search(position: &Position, needle: &str) -> bool {
    position.stock_code.to_lowercase().contains(needle)
        || position.stock_name.to_lowercase().contains(needle)
}
