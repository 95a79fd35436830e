use std::path::{Path, PathBuf};

use draft_signal::config::{load_config, Config};
use draft_signal::player::{DraftSlot, PlayerStats};
use draft_signal::provider::{FileProvider, PlayerDataProvider, PlayerFilter};
use draft_signal::runner::{run_calculator, RunOptions};
use draft_signal::scoring::{build_calculator, score_roster, validate_config, CalculatorKind, Verdict};
use draft_signal::tier::{Tier, TierResolver};

fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn shipped() -> Config {
    load_config(Some(manifest_dir().join("config"))).unwrap()
}

fn fixture_path() -> PathBuf {
    manifest_dir().join("tests/fixtures/players.json")
}

fn steady_starter(seasons: u32) -> PlayerStats {
    let mut player = PlayerStats::new(
        500,
        "Steady Starter",
        "DT",
        DraftSlot::Drafted {
            round: 2,
            pick: 48,
        },
    );
    let stint = &mut player.first_stint;
    stint.av = 12;
    stint.games_played = 50;
    stint.games_started = 30;
    stint.reg_snaps = 1500;
    stint.st_snaps = 60;
    stint.reg_snap_pct = 48.0;
    stint.st_snap_pct = 6.0;
    stint.seasons_played = seasons;
    stint.awards.pro_bowls = 1;
    player
}

#[test]
fn test_shipped_config_is_valid() {
    let config = shipped();
    assert!(validate_config(&config.tiers, &config.scoring).is_ok());
}

#[test]
fn test_shipped_tier_mappings() {
    let resolver = TierResolver::new(shipped().tiers);

    assert_eq!(resolver.resolve(1, 1), Tier::A);
    for pick in 2..=5 {
        assert_eq!(resolver.resolve(pick, 1), Tier::B);
    }
    assert_eq!(resolver.resolve(100, 3), Tier::J);
    assert_eq!(resolver.resolve(101, 3), Tier::K);
    assert_eq!(resolver.resolve(260, 8), Tier::O);
    assert_eq!(resolver.resolve(60, 2), Tier::I);
    assert_eq!(resolver.resolve_slot(DraftSlot::Undrafted), Tier::Udfa);
}

#[test]
fn test_zero_games_bust_and_grade() {
    let config = shipped();
    let resolver = TierResolver::new(config.tiers.clone());
    let mut player = steady_starter(0);
    player.first_stint.games_played = 0;

    let bust = build_calculator(CalculatorKind::Bust, &resolver, &config.scoring).calculate(&player);
    assert_eq!(bust.score, 1.0);
    assert_eq!(bust.verdict, Verdict::Bust { is_bust: true });

    let grade = build_calculator(CalculatorKind::Grade, &resolver, &config.scoring).calculate(&player);
    assert_eq!(grade.score, 0.0);
}

#[test]
fn test_first_overall_pick_is_never_a_steal() {
    let config = shipped();
    let resolver = TierResolver::new(config.tiers.clone());
    let mut player = steady_starter(8);
    player.draft = DraftSlot::Drafted { round: 1, pick: 1 };
    player.first_stint.av = 120;
    player.first_stint.awards.first_team_all_pros = 5;

    let result = build_calculator(CalculatorKind::Steal, &resolver, &config.scoring).calculate(&player);
    assert_eq!(result.score, 0.0);
    assert_eq!(
        result.verdict,
        Verdict::Steal {
            is_steal: false,
            auto_steal: false
        }
    );
}

#[test]
fn test_round_five_all_pro_is_auto_steal() {
    let config = shipped();
    let resolver = TierResolver::new(config.tiers.clone());
    let mut player = steady_starter(3);
    player.draft = DraftSlot::Drafted { round: 5, pick: 150 };
    player.first_stint.awards.first_team_all_pros = 2;

    let result = build_calculator(CalculatorKind::Steal, &resolver, &config.scoring).calculate(&player);
    assert_eq!(result.tier, Tier::M);
    assert_eq!(result.score, 1.0);
    assert_eq!(
        result.verdict,
        Verdict::Steal {
            is_steal: true,
            auto_steal: true
        }
    );
}

#[test]
fn test_scores_stay_in_unit_interval() {
    let config = shipped();
    let resolver = TierResolver::new(config.tiers.clone());

    let mut roster = Vec::new();
    for seasons in 0..=10 {
        for (round, pick) in [(1, 1), (1, 12), (2, 50), (3, 99), (4, 120), (7, 250)] {
            let mut player = steady_starter(seasons);
            player.draft = DraftSlot::Drafted { round, pick };
            player.first_stint.av = (seasons * 9) as i32;
            player.first_stint.awards.first_team_all_pros = seasons / 3;
            roster.push(player);
        }
    }

    for kind in [CalculatorKind::Bust, CalculatorKind::Steal, CalculatorKind::Grade] {
        let calculator = build_calculator(kind, &resolver, &config.scoring);
        for result in score_roster(calculator.as_ref(), &roster) {
            assert!(
                (0.0..=1.0).contains(&result.score),
                "{} score {} out of range",
                kind,
                result.score
            );
        }
    }
}

#[test]
fn test_seasons_played_monotonicity() {
    let config = shipped();
    let resolver = TierResolver::new(config.tiers.clone());
    let bust = build_calculator(CalculatorKind::Bust, &resolver, &config.scoring);
    let steal = build_calculator(CalculatorKind::Steal, &resolver, &config.scoring);
    let grade = build_calculator(CalculatorKind::Grade, &resolver, &config.scoring);

    let mut previous = (f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for seasons in 1..=8 {
        let player = steady_starter(seasons);
        let current = (
            bust.calculate(&player).score,
            steal.calculate(&player).score,
            grade.calculate(&player).score,
        );
        assert!(current.0 <= previous.0, "bust rose at {} seasons", seasons);
        assert!(current.1 >= previous.1, "steal fell at {} seasons", seasons);
        assert!(current.2 >= previous.2, "grade fell at {} seasons", seasons);
        previous = current;
    }
}

#[test]
fn test_scoring_is_idempotent() {
    let config = shipped();
    let resolver = TierResolver::new(config.tiers.clone());
    let roster: Vec<PlayerStats> = (1..=6).map(steady_starter).collect();

    for kind in [CalculatorKind::Bust, CalculatorKind::Steal, CalculatorKind::Grade] {
        let calculator = build_calculator(kind, &resolver, &config.scoring);
        assert_eq!(
            score_roster(calculator.as_ref(), &roster),
            score_roster(calculator.as_ref(), &roster)
        );
    }
}

#[test]
fn test_special_teams_rescue_lowers_bust_score() {
    let config = shipped();
    let resolver = TierResolver::new(config.tiers.clone());

    let mut player = PlayerStats::new(
        104,
        "Core Special Teamer",
        "LB",
        DraftSlot::Drafted {
            round: 7,
            pick: 240,
        },
    );
    player.first_stint.games_played = 30;
    player.first_stint.reg_snaps = 40;
    player.first_stint.st_snaps = 700;
    player.first_stint.reg_snap_pct = 2.0;
    player.first_stint.st_snap_pct = 55.0;
    player.first_stint.seasons_played = 2;

    let rescued = build_calculator(CalculatorKind::Bust, &resolver, &config.scoring).calculate(&player);

    let mut without = config.scoring.clone();
    without.bust.rescue.floors.set(Tier::O, 0.0);
    let plain = build_calculator(CalculatorKind::Bust, &resolver, &without).calculate(&player);

    assert_eq!(rescued.tier, Tier::O);
    assert!(rescued.score < plain.score);
}

#[tokio::test]
async fn test_fixture_provider_run() {
    let config = shipped();
    let provider = FileProvider::new(fixture_path());

    let players = provider.fetch_players(&PlayerFilter::default()).await.unwrap();
    assert_eq!(players.len(), 5);
    assert!(players[4].is_undrafted());

    let report = run_calculator(&provider, &config, CalculatorKind::Bust, RunOptions::default())
        .await
        .unwrap();
    assert!(report.dry_run);
    assert_eq!(report.total(), 5);

    let by_id = |id: i64| report.results.iter().find(|r| r.player_id == id).unwrap();
    assert_eq!(by_id(101).verdict, Verdict::Bust { is_bust: false });
    assert_eq!(by_id(102).verdict, Verdict::Bust { is_bust: true });
    assert_eq!(by_id(102).score, 1.0);
    assert_eq!(by_id(105).tier, Tier::Udfa);
    assert_eq!(by_id(105).score, 0.0);
}

#[tokio::test]
async fn test_fixture_steals_for_one_team() {
    let config = shipped();
    let provider = FileProvider::new(fixture_path());
    let options = RunOptions {
        persist: false,
        filter: PlayerFilter {
            team_id: Some(5),
            draft_year: Some(2019),
        },
    };

    let report = run_calculator(&provider, &config, CalculatorKind::Steal, options)
        .await
        .unwrap();
    assert_eq!(report.total(), 1);
    assert_eq!(report.results[0].player_name, "Fifth Round Star");
    assert_eq!(report.flagged_count(), 1);
}
