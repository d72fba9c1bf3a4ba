use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for teams.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

/// Identifier wrapper for registered players.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Competitive divisions recognised by the league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryCode {
    Mixgold,
    Mixsilver,
    Vargold,
    Varsilver,
    Femgold,
    Femsilver,
    Varmast,
    Femmast,
    Mixmast,
    Varjuv,
    Femjuv,
    Mixinf,
}

impl CategoryCode {
    pub const fn ordered() -> [CategoryCode; 12] {
        [
            CategoryCode::Mixgold,
            CategoryCode::Mixsilver,
            CategoryCode::Vargold,
            CategoryCode::Varsilver,
            CategoryCode::Femgold,
            CategoryCode::Femsilver,
            CategoryCode::Varmast,
            CategoryCode::Femmast,
            CategoryCode::Mixmast,
            CategoryCode::Varjuv,
            CategoryCode::Femjuv,
            CategoryCode::Mixinf,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            CategoryCode::Mixgold => "mixgold",
            CategoryCode::Mixsilver => "mixsilver",
            CategoryCode::Vargold => "vargold",
            CategoryCode::Varsilver => "varsilver",
            CategoryCode::Femgold => "femgold",
            CategoryCode::Femsilver => "femsilver",
            CategoryCode::Varmast => "varmast",
            CategoryCode::Femmast => "femmast",
            CategoryCode::Mixmast => "mixmast",
            CategoryCode::Varjuv => "varjuv",
            CategoryCode::Femjuv => "femjuv",
            CategoryCode::Mixinf => "mixinf",
        }
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category code '{0}'")]
pub struct UnknownCategoryCode(pub String);

impl FromStr for CategoryCode {
    type Err = UnknownCategoryCode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        CategoryCode::ordered()
            .into_iter()
            .find(|code| code.code() == normalized)
            .ok_or_else(|| UnknownCategoryCode(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const fn label(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub category: CategoryCode,
}

/// Roster slot a player holds on one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub team: TeamId,
    pub jersey_number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// National document; positions 5-10 carry YYMMDD and position 11 the sex code.
    pub document: String,
    #[serde(default)]
    pub memberships: Vec<Membership>,
}

impl Player {
    pub fn membership_for(&self, team: &TeamId) -> Option<&Membership> {
        self.memberships.iter().find(|slot| &slot.team == team)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Scheduled,
    Finished,
}

/// Whether a match counts toward one side's standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Official,
    Friendly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideClassification {
    pub home: MatchKind,
    pub away: MatchKind,
}

impl Default for SideClassification {
    fn default() -> Self {
        Self {
            home: MatchKind::Official,
            away: MatchKind::Official,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home: TeamId,
    pub away: TeamId,
    pub tournament: TournamentId,
    pub category: CategoryCode,
    pub scheduled_at: DateTime<Utc>,
    pub state: MatchState,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub classification: SideClassification,
    #[serde(default)]
    pub plays: Vec<Play>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.state == MatchState::Finished
    }

    /// The other side of the match, or `None` when `team` did not play in it.
    pub fn opponent_of(&self, team: &TeamId) -> Option<&TeamId> {
        if &self.home == team {
            Some(&self.away)
        } else if &self.away == team {
            Some(&self.home)
        } else {
            None
        }
    }

    /// Points `(scored, allowed)` from the perspective of `team`.
    pub fn points_for(&self, team: &TeamId) -> Option<(u32, u32)> {
        if &self.home == team {
            Some((self.score.home, self.score.away))
        } else if &self.away == team {
            Some((self.score.away, self.score.home))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    pub minute: u8,
    pub second: u8,
    pub period: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayKind {
    CompletedPass,
    IncompletePass,
    Run,
    Sack,
    Interception,
    Tackle,
    ExtraPoint,
    TwoPointConversion,
    Safety,
    Penalty,
}

impl PlayKind {
    /// Defensive plays are made by the side without possession.
    pub const fn is_defensive(self) -> bool {
        matches!(
            self,
            PlayKind::Sack | PlayKind::Interception | PlayKind::Tackle | PlayKind::Safety
        )
    }
}

/// Snapshot of the player a play or passing line is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

/// Who a play is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayActor {
    Team,
    Player(PlayerRef),
}

/// Quarterback counters recorded on a passing play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassingLine {
    pub passer: PlayerRef,
    #[serde(default)]
    pub completions: u32,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub interceptions: u32,
    #[serde(default)]
    pub touchdowns: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    #[serde(default)]
    pub touchdown: bool,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub passing: Option<PassingLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub sequence: u32,
    #[serde(default)]
    pub clock: GameClock,
    /// Team in possession when the play happened.
    pub team: TeamId,
    pub kind: PlayKind,
    pub actor: PlayActor,
    #[serde(default)]
    pub outcome: PlayOutcome,
}
