//! Head-to-head agent match harness.
//!
//! Runs two `Agent` implementations against each other through the `Game`
//! state machine: observe, choose, apply, resolve any promotion, report the
//! transition to the mover, repeat until the game ends or the ply cap hits.

use chrono::{DateTime, TimeDelta, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::agents::agent_trait::Agent;
use crate::agents::observation::{reward_for, Observation, Transition};
use crate::chess_errors::ChessErrors;
use crate::game::game::{ApplyOutcome, Game, Phase, PromotionResolution};
use crate::game::game_config::GameConfig;
use crate::game::promotion::PromotionRequest;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::GameStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    LightWinCheckmate,
    DarkWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWinCheckmate { player: PlayerId, color: Color },
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub game: GameConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            game: GameConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub played_moves: Vec<String>,
    pub light_move_count: u32,
    pub dark_move_count: u32,
    pub light_total_time_ns: u128,
    pub dark_total_time_ns: u128,
    pub captured_material: [u32; 2],
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// `info string` lines from both agents and the harness, in order.
    pub log: Vec<String>,
}

impl MatchResult {
    pub fn plies(&self) -> u32 {
        self.light_move_count + self.dark_move_count
    }

    pub fn wall_time(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play one match from the standard position. `light` moves first.
pub fn play_match(
    light: &mut dyn Agent,
    dark: &mut dyn Agent,
    config: &MatchConfig,
) -> Result<MatchResult, ChessErrors> {
    play_match_from_board(Board::standard(), light, dark, config)
}

/// Play one match from a caller-provided position.
pub fn play_match_from_board(
    start: Board,
    light: &mut dyn Agent,
    dark: &mut dyn Agent,
    config: &MatchConfig,
) -> Result<MatchResult, ChessErrors> {
    light.new_game();
    dark.new_game();

    let mut game = Game::from_board(start, config.game.clone())?;
    let started_at = Utc::now();
    let mut log = vec![format!(
        "info string match light {} dark {} max_plies {}",
        light.name(),
        dark.name(),
        config.max_plies
    )];
    let mut played_moves = Vec::<String>::new();
    let mut move_counts = [0u32; 2];
    let mut total_time_ns = [0u128; 2];

    for _ in 0..config.max_plies {
        if game.is_over() {
            break;
        }

        let mover = game.side_to_move();
        let agent: &mut dyn Agent = match mover {
            Color::Light => &mut *light,
            Color::Dark => &mut *dark,
        };

        let before = Observation::from_game(&game);
        let started = Instant::now();
        let out = agent.choose_move(&before).map_err(ChessErrors::AgentFailure)?;
        total_time_ns[mover.index()] = total_time_ns[mover.index()].saturating_add(started.elapsed().as_nanos());
        move_counts[mover.index()] = move_counts[mover.index()].saturating_add(1);
        log.extend(out.info_lines);

        let chosen = match out.chosen {
            Some(mv) => mv,
            None => *game
                .legal_moves()
                .first()
                .ok_or_else(|| ChessErrors::AgentFailure("no legal move to fall back on".to_owned()))?,
        };
        if !game.legal_moves().contains(&chosen) {
            return Err(ChessErrors::AgentFailure(format!(
                "{} returned illegal move {}",
                agent.name(),
                chosen.long_algebraic()
            )));
        }

        let record = match game.apply_move(chosen.piece, chosen.to)? {
            ApplyOutcome::Applied(record) => record,
            ApplyOutcome::PromotionPending(_) => {
                let resolution =
                    game.resolve_promotion(&mut |request: &PromotionRequest| agent.choose_promotion(request))?;
                match resolution {
                    PromotionResolution::Completed(record) => record,
                    PromotionResolution::StillPending => {
                        return Err(ChessErrors::AgentFailure(format!(
                            "{} left the promotion on {} unresolved",
                            agent.name(),
                            chosen.to
                        )));
                    }
                }
            }
            ApplyOutcome::Rejected(reason) => {
                return Err(ChessErrors::AgentFailure(format!(
                    "{} move {} rejected: {reason:?}",
                    agent.name(),
                    chosen.long_algebraic()
                )));
            }
        };

        let lan = record.long_algebraic();
        let mut line = format!("info string ply {} {} {}", record.ply, mover.name(), lan);
        if let Some(victim) = record.captured {
            line.push_str(&format!(" captures {}", victim.kind.letter()));
        }
        if record.status_after != GameStatus::Ongoing {
            line.push_str(&format!(" status {:?}", record.status_after));
        }
        log.push(line);
        played_moves.push(lan);

        let transition = Transition {
            before,
            chosen: record.mv,
            promoted_to: record.promoted_to.map(|(_, kind)| kind),
            reward: reward_for(&record),
            after: Observation::from_game(&game),
            terminal: game.is_over(),
        };
        agent.observe_transition(&transition);
    }

    let outcome = match game.phase() {
        Phase::GameOver(GameStatus::Checkmate { winner: Color::Light }) => MatchOutcome::LightWinCheckmate,
        Phase::GameOver(GameStatus::Checkmate { winner: Color::Dark }) => MatchOutcome::DarkWinCheckmate,
        Phase::GameOver(_) => MatchOutcome::DrawStalemate,
        _ => MatchOutcome::DrawMaxPlies,
    };
    log.push(format!("info string result {:?} plies {}", outcome, game.ply()));

    Ok(MatchResult {
        outcome,
        captured_material: [
            game.captured_material(Color::Light),
            game.captured_material(Color::Dark),
        ],
        final_board: game.board().clone(),
        played_moves,
        light_move_count: move_counts[Color::Light.index()],
        dark_move_count: move_counts[Color::Dark.index()],
        light_total_time_ns: total_time_ns[Color::Light.index()],
        dark_total_time_ns: total_time_ns[Color::Dark.index()],
        started_at,
        finished_at: Utc::now(),
        log,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Factories receive the per-game seed. Player colors are randomized each
/// game, deterministically from `base_seed`.
pub fn play_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> Result<MatchSeriesStats, ChessErrors>
where
    F1: Fn(u64) -> Box<dyn Agent>,
    F2: Fn(u64) -> Box<dyn Agent>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_light = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (light, dark) = if player1_is_light {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} light={} dark={}",
                i + 1,
                config.games,
                seed,
                light,
                dark
            );
        }

        let mut player1 = player1_factory(seed);
        let mut player2 = player2_factory(seed.wrapping_mul(31).wrapping_add(7));
        let result = if player1_is_light {
            play_match(player1.as_mut(), player2.as_mut(), &config.per_game)?
        } else {
            play_match(player2.as_mut(), player1.as_mut(), &config.per_game)?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_light {
            (
                result.light_move_count,
                result.dark_move_count,
                result.light_total_time_ns,
                result.dark_total_time_ns,
            )
        } else {
            (
                result.dark_move_count,
                result.light_move_count,
                result.dark_total_time_ns,
                result.light_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winner = match result.outcome {
            MatchOutcome::LightWinCheckmate => Some(Color::Light),
            MatchOutcome::DarkWinCheckmate => Some(Color::Dark),
            MatchOutcome::DrawStalemate | MatchOutcome::DrawMaxPlies => None,
        };
        let mapped = match winner {
            Some(color) => {
                let player1_won = (color == Color::Light) == player1_is_light;
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWinCheckmate { player, color }
            }
            None => {
                stats.draws += 1;
                if result.outcome == MatchOutcome::DrawStalemate {
                    SeriesOutcome::DrawStalemate
                } else {
                    SeriesOutcome::DrawMaxPlies
                }
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} plies={} p1_wins={} p2_wins={} draws={}\n",
                i + 1,
                config.games,
                mapped,
                result.plies(),
                stats.player1_wins,
                stats.player2_wins,
                stats.draws
            );
        }
    }

    stats.player1_avg_move_time_ms = avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms = avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats.player1_total_time_ns.saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}
