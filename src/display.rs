//! Plain-text rendering of positions, analyses and price series for the
//! terminal front-end

use crate::analysis::PositionAnalysis;
use crate::position::Position;
use crate::price_history::PriceSeriesView;
use std::fmt;

pub const CURRENCY_SYMBOL: &str = "¥";

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn trend_arrow(position: &Position) -> &'static str {
    if position.is_profitable() { "↑" } else { "↓" }
}

pub fn format_header() -> String {
    format!(
        "{:<20} {:>8} {:>10} {:>10} {:>12} {:>12} {:>9}",
        "Code/Name", "Qty", "Cost", "Price", "Mkt Value", "P&L", "P&L %"
    )
}

pub fn format_row(position: &Position) -> String {
    let code_name = format!("{} {}", position.stock_code, position.stock_name);
    format!(
        "{:<20} {:>8} {:>10.2} {:>10.2} {:>12.0} {:>12.0} {:>9}",
        code_name,
        position.quantity,
        position.cost_price,
        position.current_price,
        position.market_value,
        position.profit,
        format_percentage(position.profit_percentage)
    )
}

pub fn format_table(positions: &[Position]) -> String {
    let mut out = format_header();
    for position in positions {
        out.push('\n');
        out.push_str(&format_row(position));
    }
    out
}

/// Detail card: holding summary, chart data and recommendation
pub struct DetailCard<'a> {
    pub position: &'a Position,
    pub analysis: &'a PositionAnalysis,
    pub series: &'a PriceSeriesView,
}

impl fmt::Display for DetailCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position;
        let analysis = self.analysis;
        let series = self.series;

        writeln!(
            f,
            "{} {}    {:.2} {} {}",
            position.stock_code,
            position.stock_name,
            position.current_price,
            trend_arrow(position),
            format_percentage(position.profit_percentage)
        )?;
        writeln!(
            f,
            "Quantity: {}    Market value: {}{:.2}",
            position.quantity, CURRENCY_SYMBOL, position.market_value
        )?;
        writeln!(
            f,
            "Cost: {}{:.2}    P&L: {}{:.2}",
            CURRENCY_SYMBOL, position.cost_price, CURRENCY_SYMBOL, position.profit
        )?;
        writeln!(
            f,
            "Account: {}    P&L %: {}",
            position.account,
            format_percentage(position.profit_percentage)
        )?;

        writeln!(
            f,
            "\nPrice history (y-axis {:.2} - {:.2}, label every {} days)",
            series.y_axis_min, series.y_axis_max, series.tick_stride_days
        )?;
        if series.visible_points.is_empty() {
            writeln!(f, "  (no data in range)")?;
        }
        for point in &series.visible_points {
            writeln!(f, "  {}  {:.2}", point.date.format("%m-%d"), point.price)?;
        }

        writeln!(
            f,
            "\nRisk rating: {} [{}]",
            analysis.risk_rating,
            analysis.risk_severity.color_name()
        )?;
        writeln!(
            f,
            "Recommended action: {} [{}]",
            analysis.recommended_action,
            analysis.action_category.color_name()
        )?;
        write!(f, "Analysis: {}", analysis.narrative)
    }
}

pub fn format_detail(
    position: &Position,
    analysis: &PositionAnalysis,
    series: &PriceSeriesView,
) -> String {
    DetailCard {
        position,
        analysis,
        series,
    }
    .to_string()
}
