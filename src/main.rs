//! Trapezirque headless runner
//!
//! Loads a level, drives the simulation with a scripted input stream and
//! prints a JSON summary of the run. Useful for replaying seeds and checking
//! levels without a renderer.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use trapezirque::consts::TICK_RATE;
use trapezirque::persistence::{self, CommandOutcome, Snapshot};
use trapezirque::platform::{InputAction, InputEvent, InputState};
use trapezirque::sim::{FrameView, GameState, LevelFile, SpatialTileIndex, tick};
use trapezirque::{LevelError, Settings};

/// Run a trapezirque session without a window
#[derive(Parser, Debug)]
#[command(name = "trapezirque")]
#[command(about = "Run a circus platformer session headless and report the outcome")]
struct Cli {
    /// Settings file (JSON); missing fields use defaults
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Level file, overrides the settings
    #[arg(long)]
    level: Option<PathBuf>,

    /// Ticks to simulate
    #[arg(long, default_value_t = 60 * TICK_RATE as u64)]
    ticks: u64,

    /// Run seed, overrides the settings
    #[arg(long)]
    seed: Option<u64>,

    /// Use the random-hole fallback map
    #[arg(long)]
    legacy_map: bool,

    /// Press jump every N ticks (0 disables)
    #[arg(long, default_value_t = 45)]
    jump_every: u64,

    /// Continue from the saved snapshot in the save slot
    #[arg(long)]
    resume: bool,

    /// Print the final frame view instead of the summary
    #[arg(long)]
    dump_frame: bool,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    score: u64,
    record: u64,
    game_over: bool,
    player_x: f32,
    player_y: f32,
}

fn build_session(settings: &Settings) -> Result<GameState, LevelError> {
    if settings.legacy_map {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let tilemap = SpatialTileIndex::random_holes(&mut rng);
        log::info!("Using random-hole map ({} tiles)", tilemap.len());
        return Ok(GameState::with_display(
            tilemap,
            settings.seed,
            settings.balloon_count,
            settings.display_size(),
        ));
    }
    let level = LevelFile::load(&settings.level_path)?;
    GameState::from_level_with_display(
        level,
        settings.seed,
        settings.balloon_count,
        settings.display_size(),
    )
}

/// Ticks after letting go before the pilot tries to grab again
const REGRAB_COOLDOWN: u64 = 30;

/// Scripted player: runs right, hops on a fixed cadence and holds grab
/// while airborne so trapezes get caught on the way past.
#[derive(Debug)]
struct Pilot {
    jump_every: u64,
    released_at: Option<u64>,
}

impl Pilot {
    fn new(jump_every: u64) -> Self {
        Self {
            jump_every,
            released_at: None,
        }
    }

    fn drive(&mut self, input: &mut InputState, state: &GameState, t: u64) {
        if t == 0 {
            input.apply(InputEvent::Pressed(InputAction::MoveRight));
        }
        if self.jump_every > 0 && t % self.jump_every == 0 {
            input.apply(InputEvent::Pressed(InputAction::Jump));
        }

        if let Some(index) = state.player.riding_trapeze {
            // Let go while the swing is carrying us forward
            let forward = state
                .trapezes
                .get(index)
                .is_none_or(|tr| tr.release_velocity().x > 1.0);
            if forward {
                input.apply(InputEvent::Released(InputAction::Grab));
                self.released_at = Some(t);
            }
            return;
        }

        let cooled = self
            .released_at
            .is_none_or(|at| t.saturating_sub(at) >= REGRAB_COOLDOWN);
        if cooled && state.player.air_time > 0 {
            input.apply(InputEvent::Pressed(InputAction::Grab));
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings);
    if let Some(level) = cli.level {
        settings.level_path = level;
    }
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    settings.legacy_map |= cli.legacy_map;

    log::info!("Trapezirque starting with seed {}", settings.seed);
    let mut state = build_session(&settings)?;

    if let Some(previous) = persistence::load(&settings.save_path) {
        state.record = previous.record.max(previous.score);
        log::info!("Record to beat: {}", state.record);
    }

    let mut input = InputState::new();
    if cli.resume {
        input.apply(InputEvent::Pressed(InputAction::Load));
    }
    let mut pilot = Pilot::new(cli.jump_every);
    for t in 0..cli.ticks {
        pilot.drive(&mut input, &state, t);
        let stop = input
            .take_commands()
            .into_iter()
            .map(|c| persistence::handle_command(&mut state, c, &settings.save_path))
            .fold(false, |stop, outcome| stop || outcome == CommandOutcome::Stop);
        if stop {
            break;
        }
        tick(&mut state, &input.take_tick_input());
        for event in &state.events {
            log::debug!("tick {}: {:?}", state.time_ticks, event);
        }
        if state.is_over() {
            break;
        }
        if state.time_ticks % (10 * TICK_RATE as u64) == 0 {
            log::info!(
                "tick {}: x={:.0} score={}",
                state.time_ticks,
                state.player.body.pos.x,
                state.score
            );
        }
    }

    if let Err(e) = persistence::save(&settings.save_path, &Snapshot::capture(&state)) {
        log::warn!("Could not save session: {}", e);
    }

    if cli.dump_frame {
        println!("{}", serde_json::to_string_pretty(&FrameView::capture(&state))?);
    } else {
        let summary = RunSummary {
            seed: state.seed,
            ticks: state.time_ticks,
            score: state.score,
            record: state.record.max(state.score),
            game_over: state.is_over(),
            player_x: state.player.body.pos.x,
            player_y: state.player.body.pos.y,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
