use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::league::domain::{
    CategoryCode, Match, MatchId, MatchKind, MatchState, Membership, PassingLine, Play,
    PlayActor, PlayKind, PlayOutcome, Player, PlayerId, PlayerRef, Score, SideClassification,
    Team, TeamId, TournamentId,
};
use crate::league::eligibility::CategoryRuleBook;
use crate::league::repository::{LeagueRepository, RepositoryError};
use crate::league::service::LeagueService;

pub(super) const TOURNAMENT: &str = "apertura-2024";

pub(super) fn tournament() -> TournamentId {
    TournamentId(TOURNAMENT.to_string())
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

pub(super) fn team(id: &str, name: &str, category: CategoryCode) -> Team {
    Team {
        id: TeamId(id.to_string()),
        name: name.to_string(),
        image: Some(format!("https://img.example/{id}.png")),
        category,
    }
}

pub(super) fn teams() -> Vec<Team> {
    vec![
        team("halcones", "Halcones", CategoryCode::Mixgold),
        team("toros", "Toros", CategoryCode::Mixgold),
        team("lobos", "Lobos", CategoryCode::Mixgold),
        team("coyotes", "Coyotes", CategoryCode::Vargold),
        team("veteranos", "Veteranos", CategoryCode::Varmast),
    ]
}

pub(super) fn player_ref(id: &str, name: &str) -> PlayerRef {
    PlayerRef {
        id: PlayerId(id.to_string()),
        name: name.to_string(),
    }
}

pub(super) fn game(
    id: &str,
    home: &str,
    away: &str,
    day: u32,
    score: (u32, u32),
    classification: (MatchKind, MatchKind),
) -> Match {
    Match {
        id: MatchId(id.to_string()),
        home: TeamId(home.to_string()),
        away: TeamId(away.to_string()),
        tournament: tournament(),
        category: CategoryCode::Mixgold,
        scheduled_at: Utc
            .with_ymd_and_hms(2024, 3, day, 18, 0, 0)
            .single()
            .expect("valid kickoff"),
        state: MatchState::Finished,
        score: Score {
            home: score.0,
            away: score.1,
        },
        classification: SideClassification {
            home: classification.0,
            away: classification.1,
        },
        plays: Vec::new(),
    }
}

pub(super) fn official(id: &str, home: &str, away: &str, day: u32, score: (u32, u32)) -> Match {
    game(
        id,
        home,
        away,
        day,
        score,
        (MatchKind::Official, MatchKind::Official),
    )
}

pub(super) fn player_play(
    sequence: u32,
    possession: &str,
    kind: PlayKind,
    player: PlayerRef,
    points: u32,
) -> Play {
    Play {
        sequence,
        clock: Default::default(),
        team: TeamId(possession.to_string()),
        kind,
        actor: PlayActor::Player(player),
        outcome: PlayOutcome {
            touchdown: points >= 6,
            points,
            passing: None,
        },
    }
}

pub(super) fn pass_play(
    sequence: u32,
    possession: &str,
    kind: PlayKind,
    actor: PlayActor,
    passer: PlayerRef,
    line: (u32, u32, u32, u32),
    points: u32,
) -> Play {
    let (completions, attempts, touchdowns, interceptions) = line;
    Play {
        sequence,
        clock: Default::default(),
        team: TeamId(possession.to_string()),
        kind,
        actor,
        outcome: PlayOutcome {
            touchdown: touchdowns > 0,
            points,
            passing: Some(PassingLine {
                passer,
                completions,
                attempts,
                interceptions,
                touchdowns,
            }),
        },
    }
}

pub(super) fn player(id: &str, name: &str, document: &str, memberships: &[(&str, u8)]) -> Player {
    Player {
        id: PlayerId(id.to_string()),
        name: name.to_string(),
        document: document.to_string(),
        memberships: memberships
            .iter()
            .map(|(team, number)| Membership {
                team: TeamId(team.to_string()),
                jersey_number: *number,
            })
            .collect(),
    }
}

/// Players used by the registration scenarios.
pub(super) fn players() -> Vec<Player> {
    vec![
        // male, born 1985-04-12
        player("p-ruben", "Rubén", "GOMR850412HDFRRN09", &[("coyotes", 12)]),
        // female, born 1992-09-30
        player("p-ana", "Ana", "LOPA920930MDFPRN01", &[("halcones", 7)]),
        // male, born 1995-01-20
        player("p-diego", "Diego", "SADI950120HDFNNG02", &[]),
        // female, born 2001-11-02
        player("p-sofia", "Sofía", "MESO011102MDFRRF03", &[("toros", 3)]),
        player("p-broken", "Sin Documento", "XX", &[]),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    teams: Arc<Mutex<Vec<Team>>>,
    players: Arc<Mutex<HashMap<PlayerId, Player>>>,
    matches: Arc<Mutex<Vec<Match>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(teams: Vec<Team>, players: Vec<Player>, matches: Vec<Match>) -> Self {
        Self {
            teams: Arc::new(Mutex::new(teams)),
            players: Arc::new(Mutex::new(
                players
                    .into_iter()
                    .map(|player| (player.id.clone(), player))
                    .collect(),
            )),
            matches: Arc::new(Mutex::new(matches)),
        }
    }
}

impl LeagueRepository for MemoryRepository {
    fn team(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError> {
        let guard = self.teams.lock().expect("teams mutex poisoned");
        Ok(guard.iter().find(|team| &team.id == id).cloned())
    }

    fn teams(&self) -> Result<Vec<Team>, RepositoryError> {
        Ok(self.teams.lock().expect("teams mutex poisoned").clone())
    }

    fn player(&self, id: &PlayerId) -> Result<Option<Player>, RepositoryError> {
        let guard = self.players.lock().expect("players mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, RepositoryError> {
        let guard = self.players.lock().expect("players mutex poisoned");
        Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }

    fn roster(&self, team: &TeamId) -> Result<Vec<Player>, RepositoryError> {
        let guard = self.players.lock().expect("players mutex poisoned");
        Ok(guard
            .values()
            .filter(|player| player.membership_for(team).is_some())
            .cloned()
            .collect())
    }

    fn matches(&self, tournament: &TournamentId) -> Result<Vec<Match>, RepositoryError> {
        let guard = self.matches.lock().expect("matches mutex poisoned");
        Ok(guard
            .iter()
            .filter(|game| &game.tournament == tournament)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl LeagueRepository for UnavailableRepository {
    fn team(&self, _id: &TeamId) -> Result<Option<Team>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn teams(&self) -> Result<Vec<Team>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn player(&self, _id: &PlayerId) -> Result<Option<Player>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn players(&self, _ids: &[PlayerId]) -> Result<Vec<Player>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn roster(&self, _team: &TeamId) -> Result<Vec<Player>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn matches(&self, _tournament: &TournamentId) -> Result<Vec<Match>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// A short season: Halcones win both official games; their 30-0 friendly
/// counts only for Lobos.
pub(super) fn season() -> Vec<Match> {
    let mut opener = official("m-1", "halcones", "toros", 2, (21, 14));
    opener.plays = vec![
        pass_play(
            1,
            "halcones",
            PlayKind::CompletedPass,
            PlayActor::Player(player_ref("p-ana", "Ana")),
            player_ref("p-luis", "Luis"),
            (1, 1, 1, 0),
            6,
        ),
        player_play(2, "halcones", PlayKind::ExtraPoint, player_ref("p-ana", "Ana"), 1),
        player_play(3, "halcones", PlayKind::Tackle, player_ref("p-marco", "Marco"), 0),
        player_play(4, "halcones", PlayKind::Sack, player_ref("p-marco", "Marco"), 0),
        pass_play(
            5,
            "toros",
            PlayKind::Interception,
            PlayActor::Player(player_ref("p-ivan", "Iván")),
            player_ref("p-sofia", "Sofía"),
            (0, 1, 0, 1),
            0,
        ),
        player_play(6, "halcones", PlayKind::Run, player_ref("p-beto", "Beto"), 6),
        player_play(7, "toros", PlayKind::Tackle, player_ref("p-ivan", "Iván"), 0),
        pass_play(
            8,
            "halcones",
            PlayKind::IncompletePass,
            PlayActor::Team,
            player_ref("p-luis", "Luis"),
            (0, 1, 0, 0),
            0,
        ),
        // possession credited to a team that is not playing
        player_play(9, "lobos", PlayKind::Run, player_ref("p-x", "Fantasma"), 6),
    ];

    let mut second = official("m-2", "lobos", "halcones", 9, (12, 26));
    second.plays = vec![
        pass_play(
            1,
            "halcones",
            PlayKind::CompletedPass,
            PlayActor::Player(player_ref("p-beto", "Beto")),
            player_ref("p-luis", "Luis"),
            (3, 4, 1, 0),
            6,
        ),
        player_play(2, "halcones", PlayKind::Tackle, player_ref("p-nico", "Nico"), 0),
    ];

    let mut friendly = game(
        "m-3",
        "halcones",
        "lobos",
        16,
        (30, 0),
        (MatchKind::Friendly, MatchKind::Official),
    );
    friendly.plays = vec![
        player_play(1, "halcones", PlayKind::Run, player_ref("p-beto", "Beto"), 6),
        player_play(2, "halcones", PlayKind::Tackle, player_ref("p-nico", "Nico"), 0),
    ];

    let mut scheduled = official("m-4", "toros", "lobos", 23, (0, 0));
    scheduled.state = MatchState::Scheduled;

    let draw = official("m-5", "toros", "lobos", 20, (14, 14));

    let mut other_tournament = official("m-6", "halcones", "toros", 5, (0, 40));
    other_tournament.tournament = TournamentId("clausura-2023".to_string());

    vec![opener, second, friendly, scheduled, draw, other_tournament]
}

pub(super) fn build_service(
    matches: Vec<Match>,
) -> (Arc<LeagueService<MemoryRepository>>, MemoryRepository) {
    let repository = MemoryRepository::seeded(teams(), players(), matches);
    let service = Arc::new(LeagueService::new(
        Arc::new(repository.clone()),
        CategoryRuleBook::standard(),
        5,
    ));
    (service, repository)
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
