use super::config::{CareerLengthCurve, ScoringConfig, SuccessWeights};
use super::engine::{Calculator, CalculatorKind, CalculatorResult, Verdict};
use super::factors::{
    clamp_unit, longevity_factor, round4, usage_score, UsageBucket, UsageRatios,
    BUST_SEASONS_FLOOR, COUNT_FLOOR,
};
use crate::player::PlayerStats;
use crate::tier::{Tier, TierResolver};

/// How much draft capital a player's position carries for bust purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftCapital {
    /// Quarterback taken in one of the configured early tiers.
    Quarterback,
    /// Kicker or punter taken in an early round.
    Specialist,
    Standard,
}

impl DraftCapital {
    fn classify(player: &PlayerStats, tier: Tier, config: &ScoringConfig) -> Self {
        let bust = &config.bust;
        if player.is_quarterback() && bust.qb.early_tiers.contains(tier) {
            return DraftCapital::Quarterback;
        }
        let early_round = player
            .draft
            .round()
            .is_some_and(|round| round <= bust.specialist.high_capital_max_round);
        if player.is_specialist() && early_round {
            return DraftCapital::Specialist;
        }
        DraftCapital::Standard
    }

    fn av_multiplier(self, config: &ScoringConfig) -> f64 {
        match self {
            DraftCapital::Quarterback => config.bust.qb.expected_av_multiplier,
            DraftCapital::Specialist => config.bust.specialist.expected_av_multiplier,
            DraftCapital::Standard => 1.0,
        }
    }

    fn weights(self, config: &ScoringConfig) -> SuccessWeights {
        match self {
            DraftCapital::Quarterback => config.bust.qb.weights,
            DraftCapital::Specialist => config.bust.specialist.weights,
            DraftCapital::Standard => config.bust.weights,
        }
    }
}

/// Scores how far a drafted player fell short of their tier's baseline.
///
/// The score is `1 - success * career_length`, so higher means more of a bust.
pub struct BustCalculator<'a> {
    resolver: &'a TierResolver,
    config: &'a ScoringConfig,
}

impl<'a> BustCalculator<'a> {
    pub fn new(resolver: &'a TierResolver, config: &'a ScoringConfig) -> Self {
        Self { resolver, config }
    }

    /// Credit special-teams contributors in the latest tiers who never posted AV.
    fn rescued_av(&self, player: &PlayerStats, tier: Tier, expected_av: f64) -> f64 {
        let av = player.first_stint.av as f64;
        let rescue = &self.config.bust.rescue;
        let floor = rescue.floors.get(tier);

        if floor <= 0.0
            || av > 0.0
            || player.first_stint.games_played < rescue.min_games
            || player.first_stint.st_snap_pct < rescue.min_st_pct
        {
            return av;
        }
        av.max(expected_av * floor)
    }

    fn career_length_factor(&self, seasons_played: u32, expected_seasons: f64) -> f64 {
        let seasons = seasons_played as f64;
        match self.config.bust.career_length {
            CareerLengthCurve::Longevity => longevity_factor(seasons, expected_seasons),
            CareerLengthCurve::Linear if seasons_played == 0 => 0.0,
            CareerLengthCurve::Linear => (seasons / expected_seasons).min(1.0),
        }
    }

    fn bust_score(&self, player: &PlayerStats, tier: Tier) -> f64 {
        let config = self.config;
        let expected = config.expectations.get(tier);
        let capital = DraftCapital::classify(player, tier, config);

        let expected_av = (expected.av * capital.av_multiplier(config)).max(COUNT_FLOOR);
        let av = self.rescued_av(player, tier, expected_av);
        let av_ratio = (av / expected_av).min(1.0);

        let bucket = UsageBucket::for_tier(tier, config.early_round_tiers, config.late_round_tiers);
        let usage = usage_score(&UsageRatios::from_stint(&player.first_stint, &expected), bucket);

        let weights = capital.weights(config);
        let success = clamp_unit(weights.av * av_ratio + weights.usage * usage);

        let expected_seasons = expected.seasons.max(BUST_SEASONS_FLOOR);
        let career = self.career_length_factor(player.first_stint.seasons_played, expected_seasons);
        let success = clamp_unit(success * career);

        1.0 - success
    }
}

impl Calculator for BustCalculator<'_> {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Bust
    }

    fn calculate(&self, player: &PlayerStats) -> CalculatorResult {
        let tier = self.resolver.resolve_slot(player.draft);

        if player.is_undrafted() {
            return CalculatorResult::new(player, tier, 0.0, Verdict::Bust { is_bust: false });
        }
        if player.first_stint.games_played == 0 {
            return CalculatorResult::new(player, tier, 1.0, Verdict::Bust { is_bust: true });
        }

        let score = self.bust_score(player, tier);
        let is_bust = score >= self.config.bust.thresholds.get(tier);
        CalculatorResult::new(player, tier, round4(score), Verdict::Bust { is_bust })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Awards, DraftSlot};
    use crate::scoring::config::TierExpectations;
    use crate::tier::TierConfig;

    fn config() -> ScoringConfig {
        let mut config = ScoringConfig::default();
        for tier in Tier::ALL {
            config.expectations.set(
                tier,
                TierExpectations {
                    av: 20.0,
                    reg_snaps: 2000.0,
                    st_snaps: 200.0,
                    reg_pct: 60.0,
                    st_pct: 20.0,
                    seasons: 4.0,
                },
            );
        }
        config
    }

    fn drafted(position: &str, round: u32, pick: u32) -> PlayerStats {
        let mut player = PlayerStats::new(7, "Test Player", position, DraftSlot::Drafted { round, pick });
        player.first_stint.games_played = 40;
        player.first_stint.games_started = 20;
        player.first_stint.av = 10;
        player.first_stint.reg_snaps = 1000;
        player.first_stint.reg_snap_pct = 30.0;
        player.first_stint.st_snaps = 100;
        player.first_stint.st_snap_pct = 10.0;
        player.first_stint.seasons_played = 4;
        player
    }

    fn calculate(config: &ScoringConfig, player: &PlayerStats) -> CalculatorResult {
        let resolver = TierResolver::new(TierConfig::standard());
        BustCalculator::new(&resolver, config).calculate(player)
    }

    #[test]
    fn test_zero_games_is_automatic_bust() {
        let config = config();
        let mut player = drafted("WR", 1, 3);
        player.first_stint.games_played = 0;
        player.first_stint.av = 90;
        player.first_stint.awards = Awards {
            mvps: 3,
            ..Awards::default()
        };

        let result = calculate(&config, &player);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.verdict, Verdict::Bust { is_bust: true });
        assert_eq!(result.tier, Tier::B);
    }

    #[test]
    fn test_undrafted_is_never_a_bust() {
        let config = config();
        let mut player = drafted("LB", 1, 1);
        player.draft = DraftSlot::Undrafted;
        player.first_stint.games_played = 0;

        let result = calculate(&config, &player);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.tier, Tier::Udfa);
        assert_eq!(result.verdict, Verdict::Bust { is_bust: false });
    }

    #[test]
    fn test_standard_player_score() {
        let config = config();
        // Tier C, early usage bucket.
        let player = drafted("WR", 1, 8);
        // av ratio 0.5; usage 0.6*0.5 + 0.3*0.5 + 0.05*0.5 + 0.05*0.5 = 0.5
        // success 0.6*0.5 + 0.4*0.5 = 0.5; career factor 1
        let result = calculate(&config, &player);
        assert_eq!(result.tier, Tier::C);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.verdict, Verdict::Bust { is_bust: false });
    }

    #[test]
    fn test_high_performer_is_not_a_bust() {
        let config = config();
        let mut player = drafted("RB", 1, 20);
        player.first_stint.av = 60;
        player.first_stint.reg_snaps = 5000;
        player.first_stint.reg_snap_pct = 80.0;
        player.first_stint.st_snaps = 400;
        player.first_stint.st_snap_pct = 30.0;

        let result = calculate(&config, &player);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.verdict, Verdict::Bust { is_bust: false });
    }

    #[test]
    fn test_low_producer_crosses_threshold() {
        let config = config();
        let mut player = drafted("WR", 1, 8);
        player.first_stint.av = 1;
        player.first_stint.reg_snaps = 50;
        player.first_stint.reg_snap_pct = 3.0;
        player.first_stint.st_snaps = 0;
        player.first_stint.st_snap_pct = 0.0;

        let result = calculate(&config, &player);
        assert!(result.score >= 0.7);
        assert_eq!(result.verdict, Verdict::Bust { is_bust: true });
    }

    #[test]
    fn test_early_quarterback_faces_higher_bar() {
        let config = config();
        let receiver = drafted("WR", 1, 8);
        let quarterback = drafted("QB", 1, 8);

        // QB: expected av 26, ratio 10/26; success 0.8*ratio + 0.2*0.5
        let expected = 1.0 - (0.8 * (10.0 / 26.0) + 0.2 * 0.5);
        let result = calculate(&config, &quarterback);
        assert!((result.score - round4(expected)).abs() < 1e-9);
        assert!(result.score > calculate(&config, &receiver).score);
    }

    #[test]
    fn test_late_quarterback_uses_standard_weights() {
        let config = config();
        // Tier G is outside the early QB tiers.
        let quarterback = drafted("QB", 2, 40);
        let linebacker = drafted("LB", 2, 40);
        assert_eq!(
            calculate(&config, &quarterback).score,
            calculate(&config, &linebacker).score
        );
    }

    #[test]
    fn test_early_specialist_uses_specialist_weights() {
        let config = config();
        let kicker = drafted("K", 3, 70);
        let late_kicker = drafted("K", 4, 120);

        // Round 3, pick 70: tier J, mid bucket usage.
        // usage 0.45*0.5 + 0.25*0.5 + 0.15*0.5 + 0.15*0.5 = 0.5
        // expected av 26; success 0.7*(10/26) + 0.3*0.5
        let expected = 1.0 - (0.7 * (10.0 / 26.0) + 0.3 * 0.5);
        let result = calculate(&config, &kicker);
        assert_eq!(result.tier, Tier::J);
        assert!((result.score - round4(expected)).abs() < 1e-9);

        // Round 4 is past the high-capital cutoff; standard formula.
        let result = calculate(&config, &late_kicker);
        assert_eq!(result.tier, Tier::L);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_special_teams_rescue_in_latest_tiers() {
        let config = config();
        let mut player = drafted("LB", 7, 230);
        player.first_stint.av = 0;
        player.first_stint.games_played = 30;
        player.first_stint.st_snap_pct = 40.0;

        let rescued = calculate(&config, &player);

        // Same player in tier L gets no rescue.
        let mut unrescued_player = player.clone();
        unrescued_player.draft = DraftSlot::Drafted { round: 4, pick: 120 };
        let unrescued = calculate(&config, &unrescued_player);

        assert_eq!(rescued.tier, Tier::O);
        assert_eq!(unrescued.tier, Tier::L);
        // Tier O floor: av counts as half of expected.
        assert!(rescued.score < unrescued.score);
        assert!((unrescued.score - rescued.score - 0.6 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_special_teams_rescue_requires_games_and_share() {
        let config = config();
        let mut player = drafted("LB", 7, 230);
        player.first_stint.av = 0;
        player.first_stint.games_played = 11;
        player.first_stint.st_snap_pct = 40.0;
        let short_games = calculate(&config, &player);

        player.first_stint.games_played = 30;
        player.first_stint.st_snap_pct = 19.9;
        let low_share = calculate(&config, &player);

        player.first_stint.st_snap_pct = 20.0;
        let rescued = calculate(&config, &player);

        assert!(rescued.score < short_games.score);
        assert!(rescued.score < low_share.score);
    }

    #[test]
    fn test_longevity_scales_success() {
        let config = config();
        let mut player = drafted("WR", 1, 8);
        player.first_stint.seasons_played = 2;

        // success 0.5 * (0.5 + 0.5 * 2/4)
        let result = calculate(&config, &player);
        assert_eq!(result.score, 0.625);
    }

    #[test]
    fn test_linear_career_curve() {
        let mut config = config();
        config.bust.career_length = CareerLengthCurve::Linear;
        let mut player = drafted("WR", 1, 8);

        player.first_stint.seasons_played = 2;
        assert_eq!(calculate(&config, &player).score, 0.75);

        player.first_stint.seasons_played = 0;
        let result = calculate(&config, &player);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.verdict, Verdict::Bust { is_bust: true });
    }

    #[test]
    fn test_more_seasons_never_raise_bust_score() {
        let config = config();
        let mut player = drafted("TE", 2, 50);
        let mut previous = f64::MAX;
        for seasons in 0..8 {
            player.first_stint.seasons_played = seasons;
            let score = calculate(&config, &player).score;
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_per_tier_threshold() {
        let mut config = config();
        config.bust.thresholds.set(Tier::C, 0.45);
        let player = drafted("WR", 1, 8);
        let result = calculate(&config, &player);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.verdict, Verdict::Bust { is_bust: true });
    }

    fn with_expectation(config: &mut ScoringConfig, tier: Tier, update: impl Fn(&mut TierExpectations)) {
        let mut expected = config.expectations.get(tier);
        update(&mut expected);
        config.expectations.set(tier, expected);
    }

    #[test]
    fn test_expected_av_floored_after_multiplier() {
        // Tier C: the QB multiplier turns 0.5 into 0.65, which is floored to 1.
        let mut quarterback = drafted("QB", 1, 8);
        quarterback.first_stint.av = 0;
        let mut kicker = drafted("K", 3, 70);
        kicker.first_stint.av = 0;

        for expected_av in [0.0, 0.5] {
            let mut config = config();
            with_expectation(&mut config, Tier::C, |e| e.av = expected_av);
            with_expectation(&mut config, Tier::J, |e| e.av = expected_av);

            // av ratio 0, usage 0.5: success 0.2 * 0.5 for the QB, 0.3 * 0.5 for the kicker
            assert_eq!(calculate(&config, &quarterback).score, 0.9);
            assert_eq!(calculate(&config, &kicker).score, 0.85);
        }
    }

    #[test]
    fn test_tiny_expected_seasons_floored() {
        let mut player = drafted("WR", 1, 8);
        player.first_stint.seasons_played = 0;

        for expected_seasons in [0.0, 0.05] {
            let mut config = config();
            with_expectation(&mut config, Tier::C, |e| e.seasons = expected_seasons);

            // Floored at 0.1: longevity 0.5, success 0.5 * 0.5
            assert_eq!(calculate(&config, &player).score, 0.75);
        }
    }

    #[test]
    fn test_linear_curve_with_tiny_expected_seasons() {
        let mut config = config();
        config.bust.career_length = CareerLengthCurve::Linear;
        with_expectation(&mut config, Tier::C, |e| e.seasons = 0.05);
        let mut player = drafted("WR", 1, 8);

        player.first_stint.seasons_played = 1;
        assert_eq!(calculate(&config, &player).score, 0.5);

        player.first_stint.seasons_played = 0;
        assert_eq!(calculate(&config, &player).score, 1.0);
    }
}
