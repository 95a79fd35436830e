use serde::de::{self, Deserializer};
use serde::Deserialize;

use super::stats::{Awards, DraftSlot, FirstStint, PlayerStats};

/// Wire shape for a player.
///
/// Accepts both the camelCase fixture format (`firstStintAv`, `overallPick`)
/// and the snake_case rows returned by the SQL API (`first_stint_av`,
/// `overall_pick`, `player_name`). Numeric columns tolerate ints, floats,
/// numeric strings and null; flag columns accept booleans or 0/1.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: i64,
    #[serde(alias = "player_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub position: String,

    #[serde(default, alias = "draft_year", deserialize_with = "lenient::opt_integer")]
    pub draft_year: Option<i64>,
    #[serde(default, alias = "draft_round", deserialize_with = "lenient::opt_integer")]
    pub draft_round: Option<i64>,
    #[serde(default, alias = "overall_pick", deserialize_with = "lenient::opt_integer")]
    pub overall_pick: Option<i64>,
    #[serde(default, alias = "draft_team_id", deserialize_with = "lenient::opt_integer")]
    pub draft_team_id: Option<i64>,

    #[serde(default, alias = "first_stint_av", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_av: i64,
    #[serde(default, alias = "first_stint_games_played", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_games_played: i64,
    #[serde(default, alias = "first_stint_games_started", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_games_started: i64,
    #[serde(default, alias = "first_stint_reg_snaps", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_reg_snaps: i64,
    #[serde(default, alias = "first_stint_st_snaps", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_st_snaps: i64,
    #[serde(default, alias = "first_stint_reg_snap_pct", deserialize_with = "lenient::float")]
    pub first_stint_reg_snap_pct: f64,
    #[serde(default, alias = "first_stint_st_snap_pct", deserialize_with = "lenient::float")]
    pub first_stint_st_snap_pct: f64,
    #[serde(default, alias = "first_stint_seasons_played", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_seasons_played: i64,

    #[serde(default, alias = "first_stint_mvps", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_mvps: i64,
    #[serde(default, alias = "first_stint_pbs", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_pbs: i64,
    #[serde(default, alias = "first_stint_ap1s", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_ap1s: i64,
    #[serde(default, alias = "first_stint_ap2s", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_ap2s: i64,
    #[serde(default, alias = "first_stint_opoys", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_opoys: i64,
    #[serde(default, alias = "first_stint_dpoys", deserialize_with = "lenient::integer_or_zero")]
    pub first_stint_dpoys: i64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub oroy: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub droy: bool,
}

fn to_count(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

fn to_optional_count(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

impl From<PlayerRecord> for PlayerStats {
    fn from(record: PlayerRecord) -> Self {
        let draft = DraftSlot::from_parts(
            to_optional_count(record.draft_round),
            to_optional_count(record.overall_pick),
        );

        PlayerStats {
            id: record.id,
            name: record.name,
            position: record.position,
            draft_year: record.draft_year.and_then(|y| i32::try_from(y).ok()),
            draft_team_id: record.draft_team_id,
            draft,
            first_stint: FirstStint {
                av: record
                    .first_stint_av
                    .clamp(i32::MIN as i64, i32::MAX as i64) as i32,
                games_played: to_count(record.first_stint_games_played),
                games_started: to_count(record.first_stint_games_started),
                reg_snaps: to_count(record.first_stint_reg_snaps),
                st_snaps: to_count(record.first_stint_st_snaps),
                reg_snap_pct: record.first_stint_reg_snap_pct,
                st_snap_pct: record.first_stint_st_snap_pct,
                seasons_played: to_count(record.first_stint_seasons_played),
                awards: Awards {
                    mvps: to_count(record.first_stint_mvps),
                    dpoys: to_count(record.first_stint_dpoys),
                    opoys: to_count(record.first_stint_opoys),
                    first_team_all_pros: to_count(record.first_stint_ap1s),
                    second_team_all_pros: to_count(record.first_stint_ap2s),
                    pro_bowls: to_count(record.first_stint_pbs),
                    oroy: record.oroy,
                    droy: record.droy,
                },
            },
        }
    }
}

mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    impl Scalar {
        fn as_f64<E: de::Error>(&self) -> Result<f64, E> {
            match self {
                Scalar::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
                Scalar::Int(n) => Ok(*n as f64),
                Scalar::Float(f) => Ok(*f),
                Scalar::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::custom(format!("expected a number, got '{}'", s))),
            }
        }

        fn as_i64<E: de::Error>(&self) -> Result<i64, E> {
            match self {
                Scalar::Int(n) => Ok(*n),
                Scalar::Text(s) => match s.trim().parse::<i64>() {
                    Ok(n) => Ok(n),
                    Err(_) => self.as_f64::<E>().map(|f| f.trunc() as i64),
                },
                other => other.as_f64::<E>().map(|f| f.trunc() as i64),
            }
        }
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Scalar::deserialize(deserializer)?.as_i64()
    }

    pub fn opt_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Option::<Scalar>::deserialize(deserializer)?
            .map(|s| s.as_i64())
            .transpose()
    }

    pub fn integer_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(opt_integer(deserializer)?.unwrap_or(0))
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<Scalar>::deserialize(deserializer)?
            .map(|s| s.as_f64::<D::Error>())
            .transpose()?
            .unwrap_or(0.0))
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(Option::<Scalar>::deserialize(deserializer)?
            .map(|s| s.as_f64::<D::Error>())
            .transpose()?
            .is_some_and(|v| v != 0.0))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
