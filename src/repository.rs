use crate::position::Position;
use log::debug;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Read-only access to a collection of positions
#[cfg_attr(test, mockall::automock)]
pub trait PositionSource {
    /// Positions in their stable insertion order
    fn positions(&self) -> Vec<Position>;

    /// Distinct account labels, sorted ascending
    fn accounts(&self) -> Vec<String> {
        distinct_accounts(&self.positions())
    }
}

/// Holds the canonical position collection for a session.
///
/// The collection is injected at construction and never changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct PositionRepository {
    positions: Vec<Position>,
}

impl PositionRepository {
    pub fn new(positions: Vec<Position>) -> Self {
        debug!("Position repository initialised with {} positions", positions.len());
        Self { positions }
    }

    pub fn with_samples() -> Self {
        Self::new(Position::samples())
    }

    pub fn all_positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn accounts(&self) -> Vec<String> {
        distinct_accounts(&self.positions)
    }

    pub fn get(&self, id: Uuid) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    /// First position whose code matches exactly
    pub fn find_by_code(&self, stock_code: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.stock_code == stock_code)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl PositionSource for PositionRepository {
    fn positions(&self) -> Vec<Position> {
        self.positions.clone()
    }

    fn accounts(&self) -> Vec<String> {
        PositionRepository::accounts(self)
    }
}

fn distinct_accounts(positions: &[Position]) -> Vec<String> {
    positions
        .iter()
        .map(|p| p.account.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
