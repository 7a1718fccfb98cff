use crate::config::AnalysisConfig;
use crate::position::Position;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskRating {
    High,
    Medium,
    Low,
}

/// Presentation emphasis of a risk rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskSeverity {
    Critical, // red
    Warning,  // orange
    Positive, // green
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    StopLoss,
    Watch,
    TakeProfit,
    Hold,
}

/// Presentation emphasis of a recommended action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionCategory {
    Critical,      // red
    Caution,       // orange
    Informational, // blue
    Positive,      // green
}

impl RiskRating {
    pub fn severity(&self) -> RiskSeverity {
        match self {
            RiskRating::High => RiskSeverity::Critical,
            RiskRating::Medium => RiskSeverity::Warning,
            RiskRating::Low => RiskSeverity::Positive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskRating::High => "High Risk",
            RiskRating::Medium => "Medium Risk",
            RiskRating::Low => "Low Risk",
        }
    }
}

impl RecommendedAction {
    pub fn category(&self) -> ActionCategory {
        match self {
            RecommendedAction::StopLoss => ActionCategory::Critical,
            RecommendedAction::Watch => ActionCategory::Caution,
            RecommendedAction::TakeProfit => ActionCategory::Informational,
            RecommendedAction::Hold => ActionCategory::Positive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendedAction::StopLoss => "Consider stop-loss",
            RecommendedAction::Watch => "Hold and observe",
            RecommendedAction::TakeProfit => "Consider realizing gains",
            RecommendedAction::Hold => "Hold",
        }
    }
}

impl RiskSeverity {
    pub fn color_name(&self) -> &'static str {
        match self {
            RiskSeverity::Critical => "red",
            RiskSeverity::Warning => "orange",
            RiskSeverity::Positive => "green",
        }
    }
}

impl ActionCategory {
    pub fn color_name(&self) -> &'static str {
        match self {
            ActionCategory::Critical => "red",
            ActionCategory::Caution => "orange",
            ActionCategory::Informational => "blue",
            ActionCategory::Positive => "green",
        }
    }
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAnalysis {
    pub risk_rating: RiskRating,
    pub risk_severity: RiskSeverity,
    pub recommended_action: RecommendedAction,
    pub action_category: ActionCategory,
    pub narrative: String,
}

/// Rule-based recommendation for a single position.
///
/// Every rule reads `profit_percentage` only. A NaN percentage fails each
/// comparison and therefore lands on Low risk and Hold.
#[derive(Debug, Clone, Default)]
pub struct PositionAnalyzer {
    config: AnalysisConfig,
}

impl PositionAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, position: &Position) -> PositionAnalysis {
        let risk_rating = self.risk_rating(position.profit_percentage);
        let recommended_action = self.recommended_action(position.profit_percentage);

        debug!(
            "Analysis {}: {:.2}% -> {:?} / {:?}",
            position.stock_code, position.profit_percentage, risk_rating, recommended_action
        );

        PositionAnalysis {
            risk_rating,
            risk_severity: risk_rating.severity(),
            recommended_action,
            action_category: recommended_action.category(),
            narrative: Self::narrative(position),
        }
    }

    pub fn risk_rating(&self, profit_percentage: f64) -> RiskRating {
        if profit_percentage < self.config.high_risk_below {
            RiskRating::High
        } else if profit_percentage < self.config.medium_risk_below {
            RiskRating::Medium
        } else {
            RiskRating::Low
        }
    }

    /// First match wins: stop-loss is checked before watch.
    pub fn recommended_action(&self, profit_percentage: f64) -> RecommendedAction {
        if profit_percentage < self.config.stop_loss_below {
            RecommendedAction::StopLoss
        } else if profit_percentage < self.config.watch_below {
            RecommendedAction::Watch
        } else if profit_percentage > self.config.take_profit_above {
            RecommendedAction::TakeProfit
        } else {
            RecommendedAction::Hold
        }
    }

    pub fn narrative(position: &Position) -> String {
        if position.is_profitable() {
            format!(
                "This position is currently profitable with a return of {:.2}%. \
                 Recent price action has been steady; continue holding and observing.",
                position.profit_percentage
            )
        } else {
            format!(
                "This position is currently at a loss of {:.2}%. \
                 Recent price action has been weak; monitor it closely and consider \
                 a stop-loss or averaging down to lower the cost basis.",
                position.profit_percentage.abs()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_with(profit: f64, profit_percentage: f64) -> Position {
        Position::new("TEST", "Test Co", 100, 10.0, 10.0, 1000.0, profit, profit_percentage, "main")
    }

    #[test]
    fn test_risk_bands() {
        let analyzer = PositionAnalyzer::default();
        assert_eq!(analyzer.risk_rating(-10.01), RiskRating::High);
        assert_eq!(analyzer.risk_rating(-10.0), RiskRating::Medium);
        assert_eq!(analyzer.risk_rating(-0.01), RiskRating::Medium);
        assert_eq!(analyzer.risk_rating(0.0), RiskRating::Low);
        assert_eq!(analyzer.risk_rating(500.0), RiskRating::Low);
    }

    #[test]
    fn test_action_precedence() {
        let analyzer = PositionAnalyzer::default();
        assert_eq!(analyzer.recommended_action(-15.01), RecommendedAction::StopLoss);
        assert_eq!(analyzer.recommended_action(-15.0), RecommendedAction::Watch);
        assert_eq!(analyzer.recommended_action(-5.0), RecommendedAction::Hold);
        assert_eq!(analyzer.recommended_action(20.0), RecommendedAction::Hold);
        assert_eq!(analyzer.recommended_action(20.01), RecommendedAction::TakeProfit);
    }

    #[test]
    fn test_nan_falls_through_to_defaults() {
        let analysis = PositionAnalyzer::default().analyze(&position_with(f64::NAN, f64::NAN));
        assert_eq!(analysis.risk_rating, RiskRating::Low);
        assert_eq!(analysis.recommended_action, RecommendedAction::Hold);
        assert!(analysis.narrative.contains("at a loss"));
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(RecommendedAction::StopLoss.category(), ActionCategory::Critical);
        assert_eq!(RecommendedAction::Watch.category(), ActionCategory::Caution);
        assert_eq!(RecommendedAction::TakeProfit.category(), ActionCategory::Informational);
        assert_eq!(RecommendedAction::Hold.category(), ActionCategory::Positive);
        assert_eq!(ActionCategory::Informational.color_name(), "blue");
        assert_eq!(RiskRating::Medium.severity().color_name(), "orange");
    }

    #[test]
    fn test_narrative_formats_two_decimals() {
        let profitable = PositionAnalyzer::narrative(&position_with(10.0, 3.14159));
        assert!(profitable.contains("profitable"));
        assert!(profitable.contains("3.14%"));

        // Profitability follows `profit`, the percentage is only reported
        let flat = PositionAnalyzer::narrative(&position_with(0.0, 1.5));
        assert!(flat.contains("at a loss of 1.50%"));
    }

    #[test]
    fn test_custom_thresholds() {
        let analyzer = PositionAnalyzer::new(AnalysisConfig {
            take_profit_above: 10.0,
            ..AnalysisConfig::default()
        });
        assert_eq!(analyzer.recommended_action(16.91), RecommendedAction::TakeProfit);
        assert_eq!(analyzer.config().stop_loss_below, -15.0);
    }
}
