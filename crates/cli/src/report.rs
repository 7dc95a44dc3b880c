#![allow(clippy::format_push_string)]

use gex_options_manager::{MonitorReport, TradeStats};
use gex_signals::Evaluation;

const RULE: &str = "═══════════════════════════════════════════════════════════════\n";
const SECTION: &str = "───────────────────────────────────────────────────────────────\n";

pub struct ReportFormatter;

impl ReportFormatter {
    #[must_use]
    pub fn evaluation(eval: &Evaluation) -> String {
        let mut output = String::new();
        header(&mut output, "GAMMA REGIME EVALUATION");

        let snap = &eval.snapshot;
        output.push_str("Market\n");
        output.push_str(SECTION);
        output.push_str(&format!("Spot:                  {:.2}\n", snap.spot_price));
        output.push_str(&format!("Day:                   {}\n", snap.day_of_week));
        output.push_str(&format!("VIX:                   {:.2}\n", snap.vix));
        output.push_str(&format!("Net GEX:               {:+.2}B\n", snap.net_gex_billions));
        output.push_str(&format!("Volume Ratio:          {:.2}x\n", snap.volume_ratio));
        output.push_str(&format!("IV Rank:               {}\n", snap.iv_rank));
        output.push('\n');

        output.push_str("Regime\n");
        output.push_str(SECTION);
        output.push_str(&format!("Regime:                {}\n", eval.regime));
        output.push_str(&format!("                       {}\n", eval.regime.description()));
        output.push('\n');

        let walls = &eval.walls;
        output.push_str("Walls\n");
        output.push_str(SECTION);
        output.push_str(&format!(
            "Call Wall:             {}\n",
            wall_line(walls.call_wall_strike, walls.distance_to_call_pct)
        ));
        output.push_str(&format!(
            "Put Wall:              {}\n",
            wall_line(walls.put_wall_strike, walls.distance_to_put_pct)
        ));
        output.push_str(&format!(
            "Flip:                  {:.2} ({:+.2}%)\n",
            walls.flip_point, walls.distance_to_flip_pct
        ));
        if let Some(pin) = &walls.pin {
            output.push_str(&format!(
                "Pin Likelihood:        {:.0}% (advisory)\n",
                pin.likelihood * 100.0
            ));
        }
        output.push('\n');

        let signal = &eval.signal;
        output.push_str("Signal\n");
        output.push_str(SECTION);
        output.push_str(&format!("Direction:             {}\n", signal.direction));
        output.push_str(&format!("Score:                 {:.1}\n", signal.score));
        output.push_str(&format!("Confidence:            {}%\n", signal.confidence_pct));
        for line in &signal.rationale {
            output.push_str(&format!("  - {line}\n"));
        }
        output.push('\n');

        if let Some(trap) = &eval.trap {
            output.push_str("Trap\n");
            output.push_str(SECTION);
            output.push_str(&format!("Type:                  {}\n", trap.trap_type));
            output.push_str(&format!("Crowd:                 {}\n", trap.retail_narrative));
            output.push_str(&format!("Reality:               {}\n", trap.mechanical_reality));
            output.push('\n');
        }

        let rec = &eval.recommendation;
        output.push_str("Recommendation\n");
        output.push_str(SECTION);
        output.push_str(&format!("Strategy:              {}\n", rec.strategy));
        output.push_str(&format!("Direction:             {}\n", rec.direction));
        output.push_str(&format!("Confidence:            {}%\n", rec.confidence_pct));
        for line in &rec.reasoning {
            output.push_str(&format!("  - {line}\n"));
        }

        if !eval.warnings.is_empty() {
            output.push('\n');
            output.push_str("Warnings\n");
            output.push_str(SECTION);
            for warning in &eval.warnings {
                output.push_str(&format!("  ! {warning}\n"));
            }
        }

        output.push_str(RULE);
        output
    }

    #[must_use]
    pub fn positions(report: &MonitorReport) -> String {
        let mut output = String::new();
        header(&mut output, "POSITION STATUS");

        for pos in &report.positions {
            let a = &pos.assessment;
            output.push_str(&format!("#{} {}\n", pos.id, pos.ticker));
            output.push_str(SECTION);
            output.push_str(&format!("Status:                {}\n", a.status));
            output.push_str(&format!(
                "Premium Captured:      {}% (expected {}%)\n",
                a.premium_captured_pct, a.expected_decay_pct
            ));
            output.push_str(&format!("Wall Reaction:         {}\n", a.wall_reaction));
            output.push_str(&format!("                       {}\n", a.summary));
            output.push('\n');
        }

        output.push_str("Summary\n");
        output.push_str(SECTION);
        output.push_str(&format!("Positions:             {}\n", report.positions.len()));
        for (status, count) in &report.counts {
            output.push_str(&format!("{:<23}{count}\n", format!("{status}:")));
        }
        output.push_str(&format!("To Close:              {}\n", report.to_close().count()));

        output.push_str(RULE);
        output
    }

    #[must_use]
    pub fn stats(stats: &TradeStats) -> String {
        let mut output = String::new();
        header(&mut output, "TRADE STATISTICS");

        output.push_str(&format!("Total Trades:          {}\n", stats.trades));
        output.push_str(&format!("Wins / Losses:         {} / {}\n", stats.wins, stats.losses));
        output.push_str(&format!("Win Rate:              {:.2}%\n", stats.win_rate * 100.0));
        output.push_str(&format!("Avg Win:               ${:.2}\n", stats.avg_win));
        output.push_str(&format!("Avg Loss:              ${:.2}\n", stats.avg_loss));
        output.push_str(&format!("Risk/Reward:           {:.2}\n", stats.risk_reward));
        output.push_str(&format!("Expectancy:            ${:.2}\n", stats.expectancy));

        output.push_str(RULE);
        output
    }
}

fn header(output: &mut String, title: &str) {
    output.push('\n');
    output.push_str(RULE);
    output.push_str(&format!("{title:^63}\n"));
    output.push_str(RULE);
    output.push('\n');
}

fn wall_line(strike: Option<f64>, distance_pct: Option<f64>) -> String {
    match (strike, distance_pct) {
        (Some(strike), Some(distance)) => format!("{strike:.2} ({distance:+.2}%)"),
        _ => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gex_core::{RawMarketSnapshot, StatusConfig, TradingDay};
    use gex_options_manager::{evaluate_positions, PositionSnapshot, TrackedPosition};
    use rust_decimal_macros::dec;

    #[test]
    fn evaluation_report_has_every_section() {
        let raw = RawMarketSnapshot::new(500.0)
            .with_vix(22.0)
            .with_net_gex(-2.5)
            .with_flip_point(505.0)
            .with_walls(510.0, 490.0)
            .with_volume_ratio(2.4)
            .with_iv_rank(60)
            .with_day(TradingDay::Mon);
        let eval = gex_signals::evaluate(&raw, None).unwrap();
        let text = ReportFormatter::evaluation(&eval);

        for section in ["GAMMA REGIME EVALUATION", "Regime", "Walls", "Signal", "Recommendation"] {
            assert!(text.contains(section), "missing {section}");
        }
        assert!(text.contains("BEARISH"));
        assert!(text.contains("NEGATIVE_GAMMA_DIP_BUY"));
    }

    #[test]
    fn evaluation_report_lists_warnings() {
        let raw = RawMarketSnapshot::new(500.0).with_day(TradingDay::Mon);
        let eval = gex_signals::evaluate(&raw, None).unwrap();
        let text = ReportFormatter::evaluation(&eval);
        assert!(text.contains("Warnings"));
        assert!(text.contains("Call Wall:             n/a"));
    }

    #[test]
    fn position_report_tallies() {
        let book = vec![TrackedPosition {
            id: 3,
            ticker: "SPY".to_string(),
            snapshot: PositionSnapshot {
                current_price: dec!(100),
                wall_strike: dec!(98),
                volume_ratio: 1.2,
                entry_premium: dec!(2.00),
                current_premium: dec!(1.90),
                iv_rank: 70,
                days_in_trade: 1,
            },
        }];
        let report = evaluate_positions(&book, &StatusConfig::default());
        let text = ReportFormatter::positions(&report);
        assert!(text.contains("#3 SPY"));
        assert!(text.contains("STOP_OUT"));
        assert!(text.contains("Wall Reaction:         BROKE"));
        assert!(text.contains("To Close:              1"));
    }

    #[test]
    fn stats_report() {
        let stats = TradeStats::from_pnls(&[dec!(100), dec!(-50)]);
        let text = ReportFormatter::stats(&stats);
        assert!(text.contains("Win Rate:              50.00%"));
        assert!(text.contains("Risk/Reward:           2.00"));
    }
}
