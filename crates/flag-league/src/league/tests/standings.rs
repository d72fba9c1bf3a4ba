use super::common::*;
use crate::league::domain::{CategoryCode, MatchKind, TeamId};
use crate::league::stats::StatsAggregator;

fn aggregator() -> StatsAggregator {
    StatsAggregator::default()
}

#[test]
fn standings_rank_by_wins_then_differential() {
    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &teams(), &season());

    let order: Vec<&str> = table.rows.iter().map(|row| row.team_id.0.as_str()).collect();
    assert_eq!(order, vec!["halcones", "toros", "lobos"]);
    assert_eq!(table.category_label, "Mixto Gold");

    let halcones = &table.rows[0];
    assert_eq!(halcones.position, 1);
    assert_eq!(halcones.games_played, 2);
    assert_eq!(halcones.wins, 2);
    assert_eq!(halcones.losses, 0);
    assert_eq!(halcones.points_for, 47);
    assert_eq!(halcones.points_against, 26);
    assert_eq!(halcones.point_differential, 21);
    assert_eq!(halcones.average_points, 23.5);

    let toros = &table.rows[1];
    assert_eq!((toros.wins, toros.losses, toros.draws), (0, 1, 1));
    assert_eq!(toros.point_differential, -7);

    let lobos = &table.rows[2];
    assert_eq!(lobos.position, 3);
    assert_eq!(lobos.games_played, 3, "friendly for halcones is official for lobos");
    assert_eq!((lobos.points_for, lobos.points_against), (26, 70));
    assert_eq!(lobos.average_points, 8.7);
}

#[test]
fn friendly_side_is_excluded_entirely() {
    let matches = vec![
        official("m-1", "halcones", "toros", 2, (21, 14)),
        game(
            "m-2",
            "halcones",
            "lobos",
            9,
            (30, 0),
            (MatchKind::Friendly, MatchKind::Friendly),
        ),
    ];
    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &teams(), &matches);
    let row = table
        .row_for(&TeamId("halcones".to_string()))
        .expect("halcones listed");

    assert_eq!(row.games_played, 1);
    assert_eq!(row.wins, 1);
    assert_eq!(row.losses, 0);
    assert_eq!(row.points_for, 21);
    assert_eq!(row.points_against, 14);
}

#[test]
fn mixed_classification_counts_for_official_side_only() {
    let matches = vec![game(
        "m-1",
        "halcones",
        "toros",
        2,
        (21, 14),
        (MatchKind::Official, MatchKind::Friendly),
    )];
    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &teams(), &matches);

    let halcones = table.row_for(&TeamId("halcones".to_string())).expect("row");
    let toros = table.row_for(&TeamId("toros".to_string())).expect("row");
    assert_eq!(halcones.games_played, 1);
    assert_eq!(toros.games_played, 0);
    assert_eq!(toros.points_against, 0);
}

#[test]
fn rows_sum_exactly_over_official_finished_matches() {
    let matches = season();
    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &teams(), &matches);

    for row in &table.rows {
        let counted: Vec<_> = matches
            .iter()
            .filter(|game| game.tournament == tournament() && game.is_finished())
            .filter(|game| crate::league::stats::is_official_for(game, &row.team_id))
            .collect();
        let points_for: u64 = counted
            .iter()
            .filter_map(|game| game.points_for(&row.team_id))
            .map(|(scored, _)| u64::from(scored))
            .sum();
        let points_against: u64 = counted
            .iter()
            .filter_map(|game| game.points_for(&row.team_id))
            .map(|(_, allowed)| u64::from(allowed))
            .sum();

        assert!(row.wins + row.losses <= counted.len() as u32);
        assert_eq!(row.games_played as usize, counted.len());
        assert_eq!(row.points_for, points_for, "{}", row.team_id);
        assert_eq!(row.points_against, points_against, "{}", row.team_id);
    }
}

#[test]
fn teams_without_games_are_listed_with_zero_average() {
    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &teams(), &[]);
    assert_eq!(table.rows.len(), 3);
    assert!(table.rows.iter().all(|row| row.games_played == 0));
    assert!(table.rows.iter().all(|row| row.average_points == 0.0));
    let names: Vec<&str> = table.rows.iter().map(|row| row.team_name.as_str()).collect();
    assert_eq!(names, vec!["Halcones", "Lobos", "Toros"], "ties fall back to name");
}

#[test]
fn ties_on_wins_and_differential_break_on_points_for() {
    let matches = vec![
        official("m-1", "halcones", "lobos", 2, (30, 20)),
        official("m-2", "toros", "lobos", 3, (20, 10)),
    ];
    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &teams(), &matches);
    let order: Vec<&str> = table.rows.iter().map(|row| row.team_id.0.as_str()).collect();
    assert_eq!(order, vec!["halcones", "toros", "lobos"]);
}

#[test]
fn malformed_matches_are_skipped_and_counted() {
    let mut broken = official("m-9", "toros", "toros", 4, (50, 0));
    broken.plays.clear();
    let mut matches = season();
    matches.push(broken);

    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &teams(), &matches);
    assert_eq!(table.skipped_records, 1);
    let toros = table.row_for(&TeamId("toros".to_string())).expect("row");
    assert_eq!(toros.points_for, 28);
}

#[test]
fn large_scores_accumulate_without_wrapping() {
    let matches = vec![
        official("m-1", "halcones", "lobos", 2, (u32::MAX, 0)),
        official("m-2", "halcones", "toros", 9, (5, u32::MAX)),
    ];
    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &teams(), &matches);
    let halcones = table.row_for(&TeamId("halcones".to_string())).expect("row");

    assert_eq!(halcones.points_for, u64::from(u32::MAX) + 5);
    assert_eq!(halcones.points_against, u64::from(u32::MAX));
    assert_eq!(halcones.point_differential, 5);
    assert_eq!((halcones.wins, halcones.losses), (1, 1));
}

#[test]
fn repeated_team_ids_yield_a_single_row() {
    let mut listed = teams();
    listed.push(team("toros", "Toros B", CategoryCode::Mixgold));
    listed.insert(1, team("halcones", "Halcones Reserva", CategoryCode::Mixgold));

    let table = aggregator().standings(&tournament(), CategoryCode::Mixgold, &listed, &season());
    let ids: Vec<&str> = table.rows.iter().map(|row| row.team_id.0.as_str()).collect();
    assert_eq!(ids, vec!["halcones", "toros", "lobos"]);
    assert_eq!(table.rows[0].team_name, "Halcones");
    assert_eq!(table.rows[1].team_name, "Toros");
    let positions: Vec<usize> = table.rows.iter().map(|row| row.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}
