use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::runner::RunReport;
use crate::scoring::{CalculatorKind, CalculatorResult, Verdict};

const SEPARATOR_WIDTH: usize = 60;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub fn format_header(total: usize) -> String {
    format!("Processing {} players\n{}", total, separator())
}

/// Verdict label in brackets, or `None` for grades.
fn verdict_label(verdict: &Verdict) -> Option<&'static str> {
    match verdict {
        Verdict::Bust { is_bust: true } => Some("[BUST]"),
        Verdict::Bust { is_bust: false } => Some("[NOT BUST]"),
        Verdict::Steal { is_steal: true, .. } => Some("[STEAL]"),
        Verdict::Steal { is_steal: false, .. } => Some("[NOT STEAL]"),
        Verdict::Grade => None,
    }
}

/// One console line per player.
///
/// `[BUST] Name (Tier C): 0.8123` for verdicts, `Name (Tier C): 0.642` for grades.
pub fn format_result_line(result: &CalculatorResult, use_colors: bool) -> String {
    let body = match result.verdict {
        Verdict::Grade => format!("{} (Tier {}): {:.3}", result.player_name, result.tier, result.score),
        _ => format!("{} (Tier {}): {:.4}", result.player_name, result.tier, result.score),
    };

    let Some(label) = verdict_label(&result.verdict) else {
        return body;
    };

    if !use_colors {
        return format!("{} {}", label, body);
    }

    match result.verdict.flagged() {
        Some(true) => match result.verdict {
            Verdict::Bust { .. } => format!("{} {}", label.red().bold(), body),
            _ => format!("{} {}", label.green().bold(), body),
        },
        _ => format!("{} {}", label.dimmed(), body),
    }
}

pub fn format_results(results: &[CalculatorResult], use_colors: bool) -> String {
    results
        .iter()
        .map(|result| format_result_line(result, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_summary(report: &RunReport) -> String {
    let total = report.total();
    let flagged = report.flagged_count();

    match report.kind {
        CalculatorKind::Bust => format!(
            "Summary: {} busts, {} non-busts out of {} players",
            flagged,
            total - flagged,
            total
        ),
        CalculatorKind::Steal => format!(
            "Summary: {} steals, {} non-steals out of {} players",
            flagged,
            total - flagged,
            total
        ),
        CalculatorKind::Grade => match report.average_score() {
            Some(average) => format!("Summary: average grade {:.3} across {} players", average, total),
            None => "Summary: no players graded".to_string(),
        },
    }
}

pub fn format_footer(dry_run: bool) -> &'static str {
    if dry_run {
        "(Dry run - no database updates made)"
    } else {
        "(Database updated)"
    }
}

/// Full console rendering of a run.
pub fn format_report(report: &RunReport, use_colors: bool) -> String {
    let mut sections = vec![format_header(report.total())];
    if !report.results.is_empty() {
        sections.push(format_results(&report.results, use_colors));
    }
    sections.push(separator());
    sections.push(format_summary(report));
    sections.push(format_footer(report.dry_run).to_string());
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{DraftSlot, PlayerStats};
    use crate::tier::Tier;

    fn result(name: &str, tier: Tier, score: f64, verdict: Verdict) -> CalculatorResult {
        let player = PlayerStats::new(1, name, "WR", DraftSlot::Drafted { round: 1, pick: 20 });
        CalculatorResult::new(&player, tier, score, verdict)
    }

    fn report(kind: CalculatorKind, results: Vec<CalculatorResult>) -> RunReport {
        RunReport {
            kind,
            dry_run: true,
            results,
            statements_issued: 0,
        }
    }

    #[test]
    fn test_bust_lines() {
        let bust = result("Jane Doe", Tier::C, 0.81234, Verdict::Bust { is_bust: true });
        assert_eq!(format_result_line(&bust, false), "[BUST] Jane Doe (Tier C): 0.8123");

        let fine = result("John Roe", Tier::B, 0.2, Verdict::Bust { is_bust: false });
        assert_eq!(format_result_line(&fine, false), "[NOT BUST] John Roe (Tier B): 0.2000");
    }

    #[test]
    fn test_steal_lines() {
        let steal = result(
            "Late Gem",
            Tier::M,
            1.0,
            Verdict::Steal {
                is_steal: true,
                auto_steal: true,
            },
        );
        assert_eq!(format_result_line(&steal, false), "[STEAL] Late Gem (Tier M): 1.0000");

        let not = result(
            "Early Pick",
            Tier::A,
            0.0,
            Verdict::Steal {
                is_steal: false,
                auto_steal: false,
            },
        );
        assert_eq!(format_result_line(&not, false), "[NOT STEAL] Early Pick (Tier A): 0.0000");
    }

    #[test]
    fn test_grade_line_has_three_decimals_and_no_label() {
        let graded = result("Solid Starter", Tier::C, 0.6421, Verdict::Grade);
        assert_eq!(format_result_line(&graded, false), "Solid Starter (Tier C): 0.642");
        assert_eq!(format_result_line(&graded, true), "Solid Starter (Tier C): 0.642");
    }

    #[test]
    fn test_undrafted_tier_label() {
        let walk_on = result("Walk On", Tier::Udfa, 0.0, Verdict::Bust { is_bust: false });
        assert!(format_result_line(&walk_on, false).contains("(Tier UDFA)"));
    }

    #[test]
    fn test_colored_line_keeps_text() {
        let bust = result("Jane Doe", Tier::C, 0.9, Verdict::Bust { is_bust: true });
        let line = format_result_line(&bust, true);
        assert!(line.contains("BUST"));
        assert!(line.contains("Jane Doe (Tier C): 0.9000"));
    }

    #[test]
    fn test_summaries() {
        let busts = report(
            CalculatorKind::Bust,
            vec![
                result("A", Tier::A, 0.9, Verdict::Bust { is_bust: true }),
                result("B", Tier::B, 0.1, Verdict::Bust { is_bust: false }),
                result("C", Tier::C, 0.2, Verdict::Bust { is_bust: false }),
            ],
        );
        assert_eq!(format_summary(&busts), "Summary: 1 busts, 2 non-busts out of 3 players");

        let steals = report(
            CalculatorKind::Steal,
            vec![result(
                "D",
                Tier::N,
                0.7,
                Verdict::Steal {
                    is_steal: true,
                    auto_steal: false,
                },
            )],
        );
        assert_eq!(format_summary(&steals), "Summary: 1 steals, 0 non-steals out of 1 players");

        let grades = report(
            CalculatorKind::Grade,
            vec![
                result("E", Tier::D, 0.5, Verdict::Grade),
                result("F", Tier::E, 0.7, Verdict::Grade),
            ],
        );
        assert_eq!(format_summary(&grades), "Summary: average grade 0.600 across 2 players");
        assert_eq!(
            format_summary(&report(CalculatorKind::Grade, Vec::new())),
            "Summary: no players graded"
        );
    }

    #[test]
    fn test_report_layout() {
        let run = report(
            CalculatorKind::Bust,
            vec![result("A", Tier::A, 0.9, Verdict::Bust { is_bust: true })],
        );
        let text = format_report(&run, false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Processing 1 players");
        assert_eq!(lines[1], "-".repeat(60));
        assert_eq!(lines[2], "[BUST] A (Tier A): 0.9000");
        assert_eq!(lines[3], "-".repeat(60));
        assert_eq!(lines[4], "Summary: 1 busts, 0 non-busts out of 1 players");
        assert_eq!(lines[5], "(Dry run - no database updates made)");
    }

    #[test]
    fn test_footer() {
        assert_eq!(format_footer(false), "(Database updated)");
    }
}
