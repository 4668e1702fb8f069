use crate::client::MlbApi;
use crate::statsapi::{WireBoxPlayer, WireBoxTeam, WirePlay, WireTeam};
use crate::translate::{batting_event_kr, pitching_event_kr};
use crate::{BattingLine, InningEvent, PitchingLine, PlayerGamePerformance, roster};
use log::{debug, warn};

/// Per-player performance summaries for one game.
///
/// The boxscore fetch is load-bearing: if it fails the whole call returns
/// empty. The play-by-play fetch is best-effort: if it fails, players are
/// still returned with empty `inning_events`.
pub async fn fetch_performances(
    api: &MlbApi,
    game_pk: u64,
    player_ids: &[u32],
) -> Vec<PlayerGamePerformance> {
    let feed = match api.fetch_live_feed(game_pk).await {
        Ok(feed) => feed,
        Err(e) => {
            warn!("game {game_pk}: live feed fetch failed: {e}");
            return Vec::new();
        }
    };
    let Some(boxscore) = feed.live_data.and_then(|l| l.boxscore) else {
        debug!("game {game_pk}: no boxscore in feed");
        return Vec::new();
    };

    let feed_teams = feed.game_data.and_then(|g| g.teams);
    let (feed_home, feed_away) = match feed_teams {
        Some(t) => (t.home, t.away),
        None => (None, None),
    };
    let box_teams = boxscore.teams.unwrap_or_default();

    let mut performances = Vec::new();
    let sides = [
        (box_teams.home, feed_home, "홈"),
        (box_teams.away, feed_away, "원정"),
    ];
    for (box_team, feed_team, fallback_name) in sides {
        let Some(box_team) = box_team else { continue };
        let team_name = side_team_name(feed_team.as_ref(), &box_team, fallback_name);

        let mut matched: Vec<PlayerGamePerformance> = box_team
            .players
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, player)| {
                let id = player
                    .person
                    .as_ref()
                    .and_then(|p| p.id)
                    .or_else(|| key.trim_start_matches("ID").parse().ok())?;
                if player_ids.contains(&id) {
                    Some(build_performance(id, &player, &team_name))
                } else {
                    None
                }
            })
            .collect();
        matched.sort_by_key(|p| p.mlb_id);
        performances.append(&mut matched);
    }

    if performances.is_empty() {
        return performances;
    }

    match api.fetch_play_by_play(game_pk).await {
        Ok(pbp) => {
            let plays = pbp.all_plays.unwrap_or_default();
            for perf in &mut performances {
                perf.inning_events = collect_inning_events(&plays, perf);
            }
        }
        Err(e) => warn!("game {game_pk}: play-by-play fetch failed: {e}"),
    }

    performances
}

/// The live feed names the clubs twice; prefer the gameData copy, then the
/// boxscore's, then the bare side label.
fn side_team_name(feed_team: Option<&WireTeam>, box_team: &WireBoxTeam, fallback: &str) -> String {
    feed_team
        .and_then(|t| t.name.clone())
        .or_else(|| box_team.team.as_ref().and_then(|t| t.name.clone()))
        .unwrap_or_else(|| fallback.to_owned())
}

/// One boxscore entry → performance line.
///
/// `played` ORs every appearance signal the feed exposes. The fields are
/// inconsistently populated upstream; a zero-stat line for someone who did
/// appear beats silently dropping them.
fn build_performance(mlb_id: u32, player: &WireBoxPlayer, team: &str) -> PlayerGamePerformance {
    let game_status = player.game_status.as_ref();
    let batting = player.stats.as_ref().and_then(|s| s.batting.as_ref());
    let pitching = player.stats.as_ref().and_then(|s| s.pitching.as_ref());

    let played = game_status.and_then(|g| g.is_current_batter).unwrap_or(false)
        || game_status.and_then(|g| g.is_current_pitcher).unwrap_or(false)
        || game_status.and_then(|g| g.is_on_bench) == Some(false)
        || batting.map(|b| b.at_bats.is_some()).unwrap_or(false)
        || batting.and_then(|b| b.plate_appearances).map(|pa| pa > 0).unwrap_or(false)
        || pitching.map(|p| p.innings_pitched.is_some()).unwrap_or(false)
        || player.all_positions.as_ref().map(|p| !p.is_empty()).unwrap_or(false)
        || player.batting_order.is_some();

    let batting_line = batting
        .filter(|b| b.at_bats.is_some() || b.plate_appearances.is_some())
        .map(|b| BattingLine {
            plate_appearances: b.plate_appearances.unwrap_or(0),
            at_bats: b.at_bats.unwrap_or(0),
            hits: b.hits.unwrap_or(0),
            runs: b.runs.unwrap_or(0),
            rbi: b.rbi.unwrap_or(0),
            home_runs: b.home_runs.unwrap_or(0),
            strikeouts: b.strike_outs.unwrap_or(0),
            walks: b.base_on_balls.unwrap_or(0),
        });

    // A pitching line needs actual innings; "0.0" means warmed up, not used.
    let pitching_line = pitching
        .filter(|p| {
            p.innings_pitched
                .as_deref()
                .and_then(|ip| ip.parse::<f32>().ok())
                .map(|ip| ip > 0.0)
                .unwrap_or(false)
        })
        .map(|p| PitchingLine {
            innings_pitched: p.innings_pitched.clone().unwrap_or_default(),
            hits: p.hits.unwrap_or(0),
            runs: p.runs.unwrap_or(0),
            earned_runs: p.earned_runs.unwrap_or(0),
            strikeouts: p.strike_outs.unwrap_or(0),
            walks: p.base_on_balls.unwrap_or(0),
            home_runs: p.home_runs.unwrap_or(0),
        });

    let position = player
        .position
        .as_ref()
        .and_then(|p| p.abbreviation.clone())
        .or_else(|| {
            player
                .all_positions
                .as_ref()
                .and_then(|v| v.first())
                .and_then(|p| p.abbreviation.clone())
        })
        .unwrap_or_default();

    // "300" encodes third in the order; pinch appearances get 301, 302, …
    let batting_order = player
        .batting_order
        .as_deref()
        .and_then(|o| o.parse::<u32>().ok())
        .map(|o| (o / 100) as u8);

    PlayerGamePerformance {
        mlb_id,
        name_kr: roster::korean_name(mlb_id).to_owned(),
        name_en: player
            .person
            .as_ref()
            .and_then(|p| p.full_name.clone())
            .unwrap_or_default(),
        team: team.to_owned(),
        position,
        batting_order,
        played,
        batting: batting_line,
        pitching: pitching_line,
        inning_events: Vec::new(),
    }
}

/// Walk the play list once per player: plays they batted in, plus — for
/// players with a pitching line — plays they pitched in, each translated
/// through the matching vocabulary.
fn collect_inning_events(plays: &[WirePlay], perf: &PlayerGamePerformance) -> Vec<InningEvent> {
    let mut events = Vec::new();
    for play in plays {
        let Some(matchup) = play.matchup.as_ref() else { continue };
        let batter_id = matchup.batter.as_ref().and_then(|b| b.id);
        let pitcher_id = matchup.pitcher.as_ref().and_then(|p| p.id);

        let (event_kr, opposing) = if batter_id == Some(perf.mlb_id) {
            let event = play_event(play);
            (
                batting_event_kr(event).to_owned(),
                matchup.pitcher.as_ref().and_then(|p| p.full_name.clone()),
            )
        } else if perf.pitching.is_some() && pitcher_id == Some(perf.mlb_id) {
            let event = play_event(play);
            (
                pitching_event_kr(event).to_owned(),
                matchup.batter.as_ref().and_then(|b| b.full_name.clone()),
            )
        } else {
            continue;
        };

        let about = play.about.as_ref();
        events.push(InningEvent {
            inning: about.and_then(|a| a.inning).unwrap_or(0),
            half_kr: match about.and_then(|a| a.half_inning.as_deref()) {
                Some("top") => "초",
                _ => "말",
            },
            event_kr,
            description: play
                .result
                .as_ref()
                .and_then(|r| r.description.clone())
                .unwrap_or_default(),
            rbi: play.result.as_ref().and_then(|r| r.rbi).unwrap_or(0),
            opposing_player: opposing.unwrap_or_default(),
        });
    }
    events
}

fn play_event(play: &WirePlay) -> &str {
    play.result
        .as_ref()
        .and_then(|r| r.event.as_deref())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statsapi::{
        WireBattingStats, WireBoxGameStatus, WireBoxStats, WirePersonRef, WirePitchingStats,
    };

    fn box_player(batting: Option<WireBattingStats>, pitching: Option<WirePitchingStats>) -> WireBoxPlayer {
        WireBoxPlayer {
            person: Some(WirePersonRef {
                id: Some(673490),
                full_name: Some("Ha-Seong Kim".into()),
                primary_number: Some("7".into()),
            }),
            stats: Some(WireBoxStats { batting, pitching }),
            ..Default::default()
        }
    }

    #[test]
    fn zero_at_bat_plate_appearance_counts_as_played() {
        // atBats=0, plateAppearances=1, no batting order, not on the bench.
        let mut player = box_player(
            Some(WireBattingStats {
                plate_appearances: Some(1),
                at_bats: Some(0),
                ..Default::default()
            }),
            None,
        );
        player.game_status = Some(WireBoxGameStatus {
            is_on_bench: Some(false),
            ..Default::default()
        });

        let perf = build_performance(673490, &player, "샌디에이고 파드리스");
        assert!(perf.played);
        let batting = perf.batting.expect("batting line must be populated");
        assert_eq!(batting.at_bats, 0);
        assert_eq!(batting.plate_appearances, 1);
        assert!(perf.pitching.is_none());
    }

    #[test]
    fn bench_player_with_no_signals_is_not_played() {
        let mut player = box_player(None, None);
        player.game_status = Some(WireBoxGameStatus {
            is_on_bench: Some(true),
            ..Default::default()
        });
        let perf = build_performance(673490, &player, "팀");
        assert!(!perf.played);
        assert!(perf.batting.is_none());
    }

    #[test]
    fn pitching_line_requires_positive_innings() {
        let warmed_up = box_player(
            None,
            Some(WirePitchingStats { innings_pitched: Some("0.0".into()), ..Default::default() }),
        );
        let perf = build_performance(673490, &warmed_up, "팀");
        // Recorded innings count as an appearance signal even at 0.0 …
        assert!(perf.played);
        // … but the line itself needs actual work.
        assert!(perf.pitching.is_none());

        let pitched = box_player(
            None,
            Some(WirePitchingStats {
                innings_pitched: Some("5.2".into()),
                strike_outs: Some(7),
                ..Default::default()
            }),
        );
        let perf = build_performance(673490, &pitched, "팀");
        let line = perf.pitching.expect("pitching line must be populated");
        assert_eq!(line.innings_pitched, "5.2");
        assert_eq!(line.strikeouts, 7);
    }

    #[test]
    fn batting_order_decodes_the_hundreds_encoding() {
        let mut player = box_player(None, None);
        player.batting_order = Some("300".into());
        let perf = build_performance(673490, &player, "팀");
        assert_eq!(perf.batting_order, Some(3));
        assert!(perf.played, "an assigned batting order alone means the player appeared");
    }

    fn feed_body() -> &'static str {
        r#"{
            "gameData": {"teams": {
                "home": {"id": 135, "name": "San Diego Padres"},
                "away": {"id": 119, "name": "Los Angeles Dodgers"}
            }},
            "liveData": {"boxscore": {"teams": {
                "home": {"team": {"id": 135, "name": "San Diego Padres"}, "players": {
                    "ID673490": {
                        "person": {"id": 673490, "fullName": "Ha-Seong Kim"},
                        "position": {"abbreviation": "SS"},
                        "battingOrder": "600",
                        "gameStatus": {"isOnBench": false},
                        "stats": {"batting": {"atBats": 4, "hits": 2, "plateAppearances": 4, "rbi": 1}}
                    },
                    "ID999999": {
                        "person": {"id": 999999, "fullName": "Somebody Else"},
                        "stats": {"batting": {"atBats": 3}}
                    }
                }},
                "away": {"team": {"id": 119, "name": "Los Angeles Dodgers"}, "players": {}}
            }}}
        }"#
    }

    #[tokio::test]
    async fn boxscore_failure_empties_the_call() {
        let mut server = mockito::Server::new_async().await;
        let _feed = server
            .mock("GET", "/game/775296/feed/live")
            .with_status(500)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let perfs = fetch_performances(&api, 775296, &[673490]).await;
        assert!(perfs.is_empty());
    }

    #[tokio::test]
    async fn play_by_play_failure_degrades_to_empty_events() {
        let mut server = mockito::Server::new_async().await;
        let _feed = server
            .mock("GET", "/game/775296/feed/live")
            .with_body(feed_body())
            .create_async()
            .await;
        let _pbp = server
            .mock("GET", "/game/775296/playByPlay")
            .with_status(500)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let perfs = fetch_performances(&api, 775296, &[673490]).await;

        assert_eq!(perfs.len(), 1);
        assert_eq!(perfs[0].mlb_id, 673490);
        assert_eq!(perfs[0].team, "San Diego Padres");
        assert!(perfs[0].played);
        assert!(perfs[0].inning_events.is_empty());
    }

    #[tokio::test]
    async fn inning_events_come_from_the_batter_matched_plays() {
        let mut server = mockito::Server::new_async().await;
        let _feed = server
            .mock("GET", "/game/775296/feed/live")
            .with_body(feed_body())
            .create_async()
            .await;
        let _pbp = server
            .mock("GET", "/game/775296/playByPlay")
            .with_body(
                r#"{"allPlays": [
                    {"result": {"event": "Double", "description": "Ha-Seong Kim doubles.", "rbi": 1},
                     "about": {"inning": 3, "halfInning": "bottom"},
                     "matchup": {"batter": {"id": 673490, "fullName": "Ha-Seong Kim"},
                                 "pitcher": {"id": 477132, "fullName": "Clayton Kershaw"}}},
                    {"result": {"event": "Strikeout", "description": "Somebody strikes out."},
                     "about": {"inning": 4, "halfInning": "top"},
                     "matchup": {"batter": {"id": 999999, "fullName": "Somebody Else"},
                                 "pitcher": {"id": 477132, "fullName": "Clayton Kershaw"}}}
                ]}"#,
            )
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let perfs = fetch_performances(&api, 775296, &[673490]).await;

        assert_eq!(perfs.len(), 1);
        let events = &perfs[0].inning_events;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_kr, "2루타");
        assert_eq!(events[0].inning_label(), "3회 말");
        assert_eq!(events[0].rbi, 1);
        assert_eq!(events[0].opposing_player, "Clayton Kershaw");
    }
}
