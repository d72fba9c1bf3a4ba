use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::super::domain::{CategoryCode, Player, PlayerId, Team, TeamId};
use super::{EligibilityEngine, RefusalReason};

/// One requested roster slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub player_id: PlayerId,
    #[serde(default)]
    pub jersey_number: Option<u8>,
}

/// Why a roster registration is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistrationRefusal {
    #[error("player is already registered with team {team}")]
    AlreadyOnTeam { team: TeamId },
    #[error("player already plays {category} with team {team}")]
    CategoryConflict { team: TeamId, category: CategoryCode },
    #[error("{reason}")]
    Ineligible { reason: RefusalReason },
    #[error("jersey number {number} is already worn by {holder}")]
    JerseyNumberTaken { number: u8, holder: PlayerId },
    #[error("player {player} appears more than once in the batch")]
    DuplicateEntry { player: PlayerId },
    #[error("player {player} is not registered in the league")]
    UnknownPlayer { player: PlayerId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationVerdict {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RegistrationRefusal>,
}

impl RegistrationVerdict {
    fn new(
        player_id: PlayerId,
        team: &Team,
        jersey_number: Option<u8>,
        reason: Option<RegistrationRefusal>,
    ) -> Self {
        Self {
            player_id,
            team_id: team.id.clone(),
            allowed: reason.is_none(),
            jersey_number,
            reason,
        }
    }
}

/// Team to category lookup, built once and shared across a batch.
#[derive(Debug, Clone, Default)]
pub struct TeamCategoryIndex {
    categories: HashMap<TeamId, CategoryCode>,
}

impl TeamCategoryIndex {
    pub fn from_teams<'a, I>(teams: I) -> Self
    where
        I: IntoIterator<Item = &'a Team>,
    {
        let categories = teams
            .into_iter()
            .map(|team| (team.id.clone(), team.category))
            .collect();
        Self { categories }
    }

    pub fn category_of(&self, team: &TeamId) -> Option<CategoryCode> {
        self.categories.get(team).copied()
    }
}

/// Check one player against the roster rules of `team`.
///
/// `roster` holds the players currently registered with `team`.
pub fn check_registration(
    engine: &EligibilityEngine,
    player: &Player,
    team: &Team,
    jersey_number: Option<u8>,
    roster: &[Player],
    index: &TeamCategoryIndex,
    today: NaiveDate,
) -> RegistrationVerdict {
    let reason = registration_refusal(engine, player, team, jersey_number, roster, index, today);
    RegistrationVerdict::new(player.id.clone(), team, jersey_number, reason)
}

fn registration_refusal(
    engine: &EligibilityEngine,
    player: &Player,
    team: &Team,
    jersey_number: Option<u8>,
    roster: &[Player],
    index: &TeamCategoryIndex,
    today: NaiveDate,
) -> Option<RegistrationRefusal> {
    if player.membership_for(&team.id).is_some() {
        return Some(RegistrationRefusal::AlreadyOnTeam {
            team: team.id.clone(),
        });
    }

    for membership in &player.memberships {
        match index.category_of(&membership.team) {
            Some(category) if category == team.category => {
                return Some(RegistrationRefusal::CategoryConflict {
                    team: membership.team.clone(),
                    category,
                });
            }
            Some(_) => {}
            None => warn!(
                player = %player.id,
                team = %membership.team,
                "membership references a team missing from the index"
            ),
        }
    }

    let verdict = engine.can_join_category(&player.document, team.category, today);
    if let Some(reason) = verdict.reason {
        return Some(RegistrationRefusal::Ineligible { reason });
    }

    let number = jersey_number?;
    roster
        .iter()
        .filter(|member| member.id != player.id)
        .find(|member| {
            member
                .membership_for(&team.id)
                .is_some_and(|slot| slot.jersey_number == number)
        })
        .map(|holder| RegistrationRefusal::JerseyNumberTaken {
            number,
            holder: holder.id.clone(),
        })
}

/// Check a batch of registrations for one team.
///
/// Each entry is first checked as a single registration. Later entries lose
/// to earlier accepted ones when they repeat a player or a jersey number.
pub fn check_batch(
    engine: &EligibilityEngine,
    team: &Team,
    requests: &[RegistrationRequest],
    candidates: &[Player],
    roster: &[Player],
    index: &TeamCategoryIndex,
    today: NaiveDate,
) -> Vec<RegistrationVerdict> {
    let by_id: HashMap<&PlayerId, &Player> =
        candidates.iter().map(|player| (&player.id, player)).collect();
    let mut seen_players: HashSet<&PlayerId> = HashSet::new();
    let mut claimed_numbers: HashMap<u8, PlayerId> = HashMap::new();

    requests
        .iter()
        .map(|request| {
            let RegistrationRequest {
                player_id,
                jersey_number,
            } = request;

            if !seen_players.insert(player_id) {
                return RegistrationVerdict::new(
                    player_id.clone(),
                    team,
                    *jersey_number,
                    Some(RegistrationRefusal::DuplicateEntry {
                        player: player_id.clone(),
                    }),
                );
            }

            let Some(player) = by_id.get(player_id) else {
                return RegistrationVerdict::new(
                    player_id.clone(),
                    team,
                    *jersey_number,
                    Some(RegistrationRefusal::UnknownPlayer {
                        player: player_id.clone(),
                    }),
                );
            };

            let verdict =
                check_registration(engine, player, team, *jersey_number, roster, index, today);
            let (true, Some(number)) = (verdict.allowed, jersey_number) else {
                return verdict;
            };
            if let Some(holder) = claimed_numbers.get(number) {
                return RegistrationVerdict::new(
                    player_id.clone(),
                    team,
                    Some(*number),
                    Some(RegistrationRefusal::JerseyNumberTaken {
                        number: *number,
                        holder: holder.clone(),
                    }),
                );
            }
            claimed_numbers.insert(*number, player_id.clone());
            verdict
        })
        .collect()
}
