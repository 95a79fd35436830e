//! Player statistics query.
//!
//! Every first-stint aggregate only counts seasons with the drafting team
//! before the first season spent anywhere else.

use serde_json::Value;

use super::{PlayerFilter, Statement};

/// Draft classes left out unless a year is asked for explicitly.
pub const EXCLUDED_DRAFT_YEARS: [i32; 11] = [2008, 2009, 2010, 2011, 2012, 2013, 2014, 2015, 2016, 2024, 2025];

pub const PLAYER_QUERY: &str = r#"WITH first_other AS (
    SELECT
        pts.player_id,
        MIN(pts.season_year) AS first_other_year
    FROM player_team_seasons pts
    JOIN players p2 ON p2.id = pts.player_id
    WHERE pts.team_id != p2.draft_team_id
    GROUP BY pts.player_id
)
SELECT
    p.id,
    p.draft_year,
    p.draft_team_id,
    p.draft_round,
    p.overall_pick,
    p.name AS player_name,
    p.position,
    COALESCE(p.first_stint_mvps, 0) AS first_stint_mvps,
    COALESCE(p.first_stint_dpoys, 0) AS first_stint_dpoys,
    COALESCE(p.first_stint_opoys, 0) AS first_stint_opoys,
    COALESCE(p.first_stint_ap1s, 0) AS first_stint_ap1s,
    COALESCE(p.first_stint_ap2s, 0) AS first_stint_ap2s,
    COALESCE(p.first_stint_pbs, 0) AS first_stint_pbs,
    COALESCE(p.oroy, 0) AS oroy,
    COALESCE(p.droy, 0) AS droy,
    COALESCE(SUM(CASE
        WHEN pts.team_id = p.draft_team_id
          AND (fo.first_other_year IS NULL OR pts.season_year < fo.first_other_year)
        THEN COALESCE(pts.av, 0) ELSE 0 END), 0) AS first_stint_av,
    COALESCE(SUM(CASE
        WHEN pts.team_id = p.draft_team_id
          AND (fo.first_other_year IS NULL OR pts.season_year < fo.first_other_year)
        THEN COALESCE(pts.games_played, 0) ELSE 0 END), 0) AS first_stint_games_played,
    COALESCE(SUM(CASE
        WHEN pts.team_id = p.draft_team_id
          AND (fo.first_other_year IS NULL OR pts.season_year < fo.first_other_year)
        THEN COALESCE(pts.games_started, 0) ELSE 0 END), 0) AS first_stint_games_started,
    COALESCE(SUM(CASE
        WHEN pts.team_id = p.draft_team_id
          AND (fo.first_other_year IS NULL OR pts.season_year < fo.first_other_year)
        THEN COALESCE(pts.offense_snaps, 0) + COALESCE(pts.defense_snaps, 0) ELSE 0 END), 0) AS first_stint_reg_snaps,
    COALESCE(SUM(CASE
        WHEN pts.team_id = p.draft_team_id
          AND (fo.first_other_year IS NULL OR pts.season_year < fo.first_other_year)
        THEN COALESCE(pts.st_snaps, 0) ELSE 0 END), 0) AS first_stint_st_snaps,
    COALESCE(AVG(CASE
        WHEN pts.team_id = p.draft_team_id
          AND (fo.first_other_year IS NULL OR pts.season_year < fo.first_other_year)
        THEN COALESCE(pts.offense_snap_percentage, 0) + COALESCE(pts.defense_snap_percentage, 0)
        ELSE NULL END), 0) AS first_stint_reg_snap_pct,
    COALESCE(AVG(CASE
        WHEN pts.team_id = p.draft_team_id
          AND (fo.first_other_year IS NULL OR pts.season_year < fo.first_other_year)
        THEN COALESCE(pts.st_snap_percentage, 0) ELSE NULL END), 0) AS first_stint_st_snap_pct,
    COALESCE(COUNT(DISTINCT CASE
        WHEN pts.team_id = p.draft_team_id
          AND (fo.first_other_year IS NULL OR pts.season_year < fo.first_other_year)
          AND COALESCE(pts.games_played, 0) > 0
        THEN pts.season_year ELSE NULL END), 0) AS first_stint_seasons_played
FROM players p
LEFT JOIN player_team_seasons pts ON pts.player_id = p.id
LEFT JOIN first_other fo ON fo.player_id = p.id"#;

/// Append the filter's `WHERE` clause and grouping to [`PLAYER_QUERY`].
pub fn build_player_query(filter: &PlayerFilter) -> Statement {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(team_id) = filter.team_id {
        conditions.push("p.draft_team_id = ?".to_string());
        params.push(Value::from(team_id));
    }

    match filter.draft_year {
        Some(year) => {
            conditions.push("p.draft_year = ?".to_string());
            params.push(Value::from(year));
        }
        None => {
            let years: Vec<String> = EXCLUDED_DRAFT_YEARS.iter().map(|y| y.to_string()).collect();
            conditions.push(format!("p.draft_year NOT IN ({})", years.join(",")));
        }
    }

    let sql = format!(
        "{}\nWHERE {}\nGROUP BY p.id, p.draft_team_id",
        PLAYER_QUERY,
        conditions.join(" AND ")
    );
    Statement::new(sql, params)
}
