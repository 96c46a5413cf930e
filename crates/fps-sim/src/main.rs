//! Headless run of the first-person controller in a small test arena.
//!
//! Drives one player through a scripted timeline at a fixed 60 Hz step:
//! open a door, jump, turn and press a switch, then die and wait for the
//! level reload.
//!
//! Run with: `cargo run -p fps-sim -- --log-level debug`

mod game_loop;
mod level;
mod script;
mod sinks;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use fps_config::{CliArgs, Config, default_config_dir};
use fps_input::{ActionState, PlayerInput};
use fps_player::{
    Collaborators, HealthCommand, Level, PlayerController, PlayerError, ScheduledEvent,
    SchedulerHandle,
};
use glam::{Quat, Vec3};
use tracing::{error, info, warn};

use game_loop::FixedStep;
use level::{ArenaMover, ArenaStats, SimLevel, build_arena};
use script::Script;
use sinks::{LogAnimator, LogHealthBar, LogUseHint, RecordingCamera};

/// CLI arguments for the simulation binary.
#[derive(Parser, Debug)]
#[command(name = "fps-sim", about = "Headless first-person controller simulation")]
struct SimArgs {
    #[command(flatten)]
    common: CliArgs,

    /// Number of fixed simulation steps to run.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Frame rate fed to the fixed-step accumulator.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

/// Everything one run owns.
struct Sim {
    /// Config as read from disk, before CLI overrides.
    file_config: Config,
    /// Config the player is spawned with.
    config: Config,
    overrides: CliArgs,
    config_dir: Option<PathBuf>,
    stats: Rc<ArenaStats>,
    scheduler: SchedulerHandle,
    level: SimLevel,
    camera: Rc<Cell<Quat>>,
    player: PlayerController,
    actions: ActionState,
    script: Script,
    tick: u64,
    deaths: u32,
}

impl Sim {
    /// `config_dir` is the directory whose `config.ron` produced `file_config`;
    /// it is re-read on every level reload.
    fn new(
        file_config: Config,
        overrides: CliArgs,
        config_dir: Option<PathBuf>,
    ) -> Result<Self, PlayerError> {
        let mut config = file_config.clone();
        config.apply_cli_overrides(&overrides);

        let stats = Rc::new(ArenaStats::default());
        let scheduler = SchedulerHandle::new();
        let camera = Rc::new(Cell::new(Quat::IDENTITY));
        let player = spawn_player(&config, &stats, &scheduler, &camera)?;
        Ok(Self {
            file_config,
            config,
            overrides,
            config_dir,
            level: SimLevel::new(stats.clone()),
            stats,
            scheduler,
            camera,
            player,
            actions: ActionState::new(),
            script: Script::demo(),
            tick: 0,
            deaths: 0,
        })
    }

    fn step(&mut self, dt: f32) -> Result<(), PlayerError> {
        self.actions.begin_frame();
        let look_delta = self.script.apply(self.tick, &mut self.actions);
        let damage = self.script.damage_at(self.tick);
        if damage > 0.0 {
            self.player.queue_health(HealthCommand::Damage(damage));
        }

        let was_dead = self.player.is_dead();
        let input = PlayerInput::from_actions(&self.actions, look_delta);
        self.player.tick(&input, dt);
        if !was_dead && self.player.is_dead() {
            self.deaths += 1;
        }

        for fired in self.scheduler.advance(dt) {
            match fired.event {
                ScheduledEvent::ReloadLevel if fired.owner == self.player.id() => {
                    self.level.reload_current_level();
                    self.refresh_config();
                    self.player =
                        spawn_player(&self.config, &self.stats, &self.scheduler, &self.camera)?;
                }
                ScheduledEvent::ReloadLevel => {
                    warn!(owner = ?fired.owner, "reload timer from a stale player");
                }
            }
        }

        self.tick += 1;
        Ok(())
    }

    /// Pick up edits to `config.ron` made since the last load. Invalid or
    /// unreadable files keep the current config.
    fn refresh_config(&mut self) {
        let Some(dir) = &self.config_dir else {
            return;
        };
        match self.file_config.reload(dir) {
            Ok(Some(reloaded)) => {
                let mut config = reloaded.clone();
                config.apply_cli_overrides(&self.overrides);
                if let Err(e) = config.validate() {
                    warn!("Ignoring reloaded config: {e}");
                    return;
                }
                info!("Respawning with reloaded config");
                self.file_config = reloaded;
                self.config = config;
            }
            Ok(None) => {}
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }
}

/// Build a fresh arena and a player standing at its spawn point.
fn spawn_player(
    config: &Config,
    stats: &Rc<ArenaStats>,
    scheduler: &SchedulerHandle,
    camera: &Rc<Cell<Quat>>,
) -> Result<PlayerController, PlayerError> {
    let collaborators = Collaborators::new(
        RecordingCamera::new(camera.clone()),
        ArenaMover::new(Vec3::ZERO, 0.0),
    )
    .with_ray_caster(build_arena(stats))
    .with_health_display(LogHealthBar::default())
    .with_use_hint(LogUseHint::default())
    .with_animator(LogAnimator::default());

    PlayerController::new(config, Quat::IDENTITY, collaborators, scheduler.clone())
}

/// Load `config.ron` from `--config` (created if missing), else from the
/// default directory when present, else use defaults. Also returns the
/// directory the config came from, if any.
fn load_config(args: &CliArgs) -> (Config, Option<PathBuf>) {
    let (dir, create) = match &args.config {
        Some(dir) => (Some(dir.clone()), true),
        None => (default_config_dir(), false),
    };

    match dir {
        Some(dir) if create || dir.join("config.ron").exists() => {
            match Config::load_or_create(&dir) {
                Ok(config) => (config, Some(dir)),
                Err(e) => {
                    eprintln!("Failed to load config from {}: {e}; using defaults", dir.display());
                    (Config::default(), None)
                }
            }
        }
        _ => (Config::default(), None),
    }
}

fn run(
    file_config: Config,
    config_dir: Option<PathBuf>,
    args: &SimArgs,
) -> Result<(), PlayerError> {
    let mut sim = Sim::new(file_config, args.common.clone(), config_dir)?;
    let mut game_loop = FixedStep::new();
    let frame_time = 1.0 / args.fps.max(1.0);
    let mut outcome = Ok(());

    while outcome.is_ok() && game_loop.update_count() < args.ticks {
        let mut budget = args.ticks - game_loop.update_count();
        game_loop.frame(frame_time, |dt, _| {
            if budget == 0 || outcome.is_err() {
                return;
            }
            budget -= 1;
            outcome = sim.step(dt as f32);
        });
    }
    outcome?;

    info!(
        "Ran {} steps ({:.2}s simulated, {} frames at {:.0} fps)",
        sim.tick,
        game_loop.total_sim_time(),
        game_loop.frame_count(),
        args.fps
    );
    info!(
        "Doors toggled: {} | Switches pressed: {} | Deaths: {} | Reloads: {}",
        sim.stats.door_toggles.get(),
        sim.stats.switch_presses.get(),
        sim.deaths,
        sim.stats.reloads.get()
    );
    let (yaw, pitch) = (sim.player.look().yaw(), sim.player.look().pitch());
    info!(
        "Final health {:.0}/{:.0} ({:.0}%), yaw {yaw:.1}, pitch {pitch:.1}, camera {:?}",
        sim.player.health(),
        sim.player.max_health(),
        sim.player.health_fraction() * 100.0,
        sim.camera.get()
    );
    Ok(())
}

fn main() {
    let args = SimArgs::parse();

    let (file_config, config_dir) = load_config(&args.common);
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args.common);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    fps_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    info!("fps-sim: {} steps", args.ticks);
    info!(
        "Look: sensitivity {:.1}x{:.1} | Use-scan: {}",
        config.look.sensitivity_x, config.look.sensitivity_y, config.interaction.can_use_usables
    );

    if let Err(e) = run(file_config, config_dir, &args) {
        error!("Simulation failed: {e}");
        std::process::exit(1);
    }
}
