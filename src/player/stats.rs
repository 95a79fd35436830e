use serde::Deserialize;

use super::record::PlayerRecord;

/// Where a player entered the league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSlot {
    Drafted { round: u32, pick: u32 },
    Undrafted,
}

impl DraftSlot {
    /// Both parts must be present for a drafted slot; anything else is undrafted.
    pub fn from_parts(round: Option<u32>, pick: Option<u32>) -> Self {
        match (round, pick) {
            (Some(round), Some(pick)) => DraftSlot::Drafted { round, pick },
            _ => DraftSlot::Undrafted,
        }
    }

    pub fn round(self) -> Option<u32> {
        match self {
            DraftSlot::Drafted { round, .. } => Some(round),
            DraftSlot::Undrafted => None,
        }
    }

    pub fn pick(self) -> Option<u32> {
        match self {
            DraftSlot::Drafted { pick, .. } => Some(pick),
            DraftSlot::Undrafted => None,
        }
    }

    pub fn is_undrafted(self) -> bool {
        matches!(self, DraftSlot::Undrafted)
    }
}

/// Award tallies accrued during the first stint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Awards {
    pub mvps: u32,
    pub dpoys: u32,
    pub opoys: u32,
    pub first_team_all_pros: u32,
    pub second_team_all_pros: u32,
    pub pro_bowls: u32,
    pub oroy: bool,
    pub droy: bool,
}

/// Production while on the drafting team, before joining any other team.
///
/// Snap percentages are on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FirstStint {
    pub av: i32,
    pub games_played: u32,
    pub games_started: u32,
    pub reg_snaps: u32,
    pub st_snaps: u32,
    pub reg_snap_pct: f64,
    pub st_snap_pct: f64,
    pub seasons_played: u32,
    pub awards: Awards,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PlayerRecord")]
pub struct PlayerStats {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub draft_year: Option<i32>,
    pub draft_team_id: Option<i64>,
    pub draft: DraftSlot,
    pub first_stint: FirstStint,
}

impl PlayerStats {
    /// A player with no recorded production; callers fill in `first_stint`.
    pub fn new(id: i64, name: impl Into<String>, position: impl Into<String>, draft: DraftSlot) -> Self {
        Self {
            id,
            name: name.into(),
            position: position.into(),
            draft_year: None,
            draft_team_id: None,
            draft,
            first_stint: FirstStint::default(),
        }
    }

    pub fn is_undrafted(&self) -> bool {
        self.draft.is_undrafted()
    }

    pub fn is_quarterback(&self) -> bool {
        self.position.trim().eq_ignore_ascii_case("QB")
    }

    /// Kickers (`K`/`PK`) and punters (`P`).
    pub fn is_specialist(&self) -> bool {
        let position = self.position.trim();
        ["K", "PK", "P"]
            .iter()
            .any(|code| position.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_slot_requires_both_parts() {
        assert_eq!(
            DraftSlot::from_parts(Some(2), Some(40)),
            DraftSlot::Drafted { round: 2, pick: 40 }
        );
        assert_eq!(DraftSlot::from_parts(None, None), DraftSlot::Undrafted);
        assert_eq!(DraftSlot::from_parts(Some(2), None), DraftSlot::Undrafted);
        assert_eq!(DraftSlot::from_parts(None, Some(40)), DraftSlot::Undrafted);
    }

    #[test]
    fn test_draft_slot_accessors() {
        let slot = DraftSlot::Drafted { round: 3, pick: 90 };
        assert_eq!(slot.round(), Some(3));
        assert_eq!(slot.pick(), Some(90));
        assert!(!slot.is_undrafted());
        assert_eq!(DraftSlot::Undrafted.round(), None);
        assert!(DraftSlot::Undrafted.is_undrafted());
    }

    #[test]
    fn test_position_helpers() {
        let mut player = PlayerStats::new(1, "Test", "qb", DraftSlot::Undrafted);
        assert!(player.is_quarterback());
        assert!(!player.is_specialist());

        for code in ["K", "pk", "P"] {
            player.position = code.to_string();
            assert!(player.is_specialist(), "{} should be a specialist", code);
            assert!(!player.is_quarterback());
        }

        player.position = "LS".to_string();
        assert!(!player.is_specialist());
    }
}
