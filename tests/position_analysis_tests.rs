use anyhow::Result;
use trade_insight::analysis::{ActionCategory, PositionAnalyzer, RecommendedAction, RiskRating, RiskSeverity};
use trade_insight::position::Position;
use trade_insight::repository::PositionRepository;

#[cfg(test)]
mod position_analysis_tests {
    use super::*;
    use proptest::prelude::*;

    fn position_at(profit_percentage: f64) -> Position {
        let profit = profit_percentage * 10.0;
        Position::new("TEST", "Test Co", 100, 10.0, 10.0, 1000.0, profit, profit_percentage, "main")
    }

    #[test]
    fn test_threshold_boundary_scenarios() {
        let analyzer = PositionAnalyzer::default();

        let deep_loss = analyzer.analyze(&position_at(-20.0));
        assert_eq!(deep_loss.risk_rating, RiskRating::High);
        assert_eq!(deep_loss.recommended_action, RecommendedAction::StopLoss);
        assert_eq!(deep_loss.risk_severity, RiskSeverity::Critical);
        assert_eq!(deep_loss.action_category, ActionCategory::Critical);

        let moderate_loss = analyzer.analyze(&position_at(-8.0));
        assert_eq!(moderate_loss.risk_rating, RiskRating::Medium);
        assert_eq!(moderate_loss.recommended_action, RecommendedAction::Watch);
        assert_eq!(moderate_loss.action_category, ActionCategory::Caution);

        let small_gain = analyzer.analyze(&position_at(6.67));
        assert_eq!(small_gain.risk_rating, RiskRating::Low);
        assert_eq!(small_gain.recommended_action, RecommendedAction::Hold);
        assert_eq!(small_gain.action_category, ActionCategory::Positive);

        let large_gain = analyzer.analyze(&position_at(25.0));
        assert_eq!(large_gain.risk_rating, RiskRating::Low);
        assert_eq!(large_gain.recommended_action, RecommendedAction::TakeProfit);
        assert_eq!(large_gain.action_category, ActionCategory::Informational);
    }

    #[test]
    fn test_sample_600000_holds() -> Result<()> {
        let repository = PositionRepository::with_samples();
        let position = repository
            .find_by_code("600000")
            .ok_or_else(|| anyhow::anyhow!("missing sample 600000"))?;

        let analysis = PositionAnalyzer::default().analyze(position);
        assert_eq!(analysis.risk_rating, RiskRating::Low);
        assert_eq!(analysis.recommended_action, RecommendedAction::Hold);
        assert!(analysis.narrative.contains("profitable"));
        assert!(analysis.narrative.contains("6.67%"));
        Ok(())
    }

    #[test]
    fn test_loss_narrative_reports_absolute_value() -> Result<()> {
        let repository = PositionRepository::with_samples();
        let position = repository
            .find_by_code("601318")
            .ok_or_else(|| anyhow::anyhow!("missing sample 601318"))?;
        assert_eq!(position.profit, -900.0);

        let analysis = PositionAnalyzer::default().analyze(position);
        assert!(analysis.narrative.contains("2.99%"), "narrative: {}", analysis.narrative);
        assert!(!analysis.narrative.contains("-2.99%"), "narrative: {}", analysis.narrative);
        assert!(analysis.narrative.contains("stop-loss"));
        assert_eq!(analysis.risk_rating, RiskRating::Medium);
        assert_eq!(analysis.recommended_action, RecommendedAction::Hold);
        Ok(())
    }

    #[test]
    fn test_extreme_values_are_defined() {
        let analyzer = PositionAnalyzer::default();

        let crash = analyzer.analyze(&position_at(f64::NEG_INFINITY));
        assert_eq!(crash.risk_rating, RiskRating::High);
        assert_eq!(crash.recommended_action, RecommendedAction::StopLoss);

        let moon = analyzer.analyze(&position_at(f64::MAX));
        assert_eq!(moon.risk_rating, RiskRating::Low);
        assert_eq!(moon.recommended_action, RecommendedAction::TakeProfit);
    }

    proptest! {
        #[test]
        fn prop_risk_matches_bands(pct in -1.0e6f64..1.0e6) {
            let rating = PositionAnalyzer::default().risk_rating(pct);
            let expected = if pct < -10.0 {
                RiskRating::High
            } else if pct < 0.0 {
                RiskRating::Medium
            } else {
                RiskRating::Low
            };
            prop_assert_eq!(rating, expected);
        }

        #[test]
        fn prop_action_category_is_lookup(pct in -1.0e6f64..1.0e6) {
            let analysis = PositionAnalyzer::default().analyze(&position_at(pct));
            prop_assert_eq!(analysis.action_category, analysis.recommended_action.category());
            prop_assert_eq!(analysis.risk_severity, analysis.risk_rating.severity());
        }

        #[test]
        fn prop_action_matches_ladder(
            pct in any::<f64>().prop_filter("finite percentage", |v| v.is_finite())
        ) {
            let action = PositionAnalyzer::default().recommended_action(pct);
            let expected = if pct < -15.0 {
                RecommendedAction::StopLoss
            } else if pct < -5.0 {
                RecommendedAction::Watch
            } else if pct > 20.0 {
                RecommendedAction::TakeProfit
            } else {
                RecommendedAction::Hold
            };
            prop_assert_eq!(action, expected);
        }

        #[test]
        fn prop_action_bands_around_thresholds(pct in -30.0f64..30.0) {
            let action = PositionAnalyzer::default().recommended_action(pct);
            match action {
                RecommendedAction::StopLoss => prop_assert!(pct < -15.0),
                RecommendedAction::Watch => prop_assert!((-15.0..-5.0).contains(&pct)),
                RecommendedAction::Hold => prop_assert!((-5.0..=20.0).contains(&pct)),
                RecommendedAction::TakeProfit => prop_assert!(pct > 20.0),
            }
        }

        #[test]
        fn prop_stop_loss_dominates_watch(pct in -1.0e6f64..-15.0001) {
            let action = PositionAnalyzer::default().recommended_action(pct);
            prop_assert_eq!(action, RecommendedAction::StopLoss);
        }

        #[test]
        fn prop_narrative_never_shows_negative_percentage(pct in -1.0e4f64..1.0e4) {
            let narrative = PositionAnalyzer::narrative(&position_at(pct));
            let reported = format!("{:.2}%", pct.abs());
            prop_assert!(narrative.contains(&reported), "{} missing {}", narrative, reported);
        }
    }
}
