use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use duel::{
    init_logging, Collider, DamageEvent, Direction, Entity, Intent, PlayerStats, Rectangle,
    Resolution, Vector2D, World, WorldConfig, WorldSettings,
};
use log::info;

/// Runs a scripted two-player duel without rendering.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Screen resolution as WIDTHxHEIGHT [default: 1920x1080]
    #[arg(long)]
    resolution: Option<Resolution>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// JSON file with world settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_settings(args: &Args) -> Result<WorldSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            WorldSettings::from_json(&json)
                .with_context(|| format!("parsing settings in {}", path.display()))?
        }
        None => WorldSettings::default(),
    };
    if let Some(resolution) = args.resolution {
        settings.resolution = resolution;
    }
    Ok(settings)
}

fn demo_level(config: WorldConfig) -> Result<World> {
    let width = f64::from(config.resolution.width);
    let height = f64::from(config.resolution.height);
    let spawns = vec![
        Vector2D::new(width * 0.25, height * 0.5),
        Vector2D::new(width * 0.75, height * 0.5),
    ];
    let mut world = World::new(config, "demo", spawns).context("building demo level")?;
    let floor = Rectangle::new(width * 0.8, height * 0.05).context("sizing floor")?;
    world.add(Entity::collidable(
        Vector2D::new(width * 0.5, height * 0.1),
        Collider::solid(floor),
    ));
    world
        .spawn_players(&[PlayerStats::default(), PlayerStats::default()])
        .context("spawning players")?;
    Ok(world)
}

/// Players walk towards each other, then apart, in two-second cycles.
fn scripted_intents(frame: u32, fps: u32) -> [Intent; 2] {
    let inward = (frame / fps.max(1).saturating_mul(2)) % 2 == 0;
    let (first, second) = if inward {
        (Direction::Right, Direction::Left)
    } else {
        (Direction::Left, Direction::Right)
    };
    [
        Intent {
            player: 0,
            direction: first,
        },
        Intent {
            player: 1,
            direction: second,
        },
    ]
}

/// Both players take a hit every three seconds, starting on the first frame.
fn damage_due(frame: u32, fps: u32) -> bool {
    frame % fps.max(1).saturating_mul(3) == 0
}

fn log_summary(world: &mut World) {
    for index in 0..2 {
        let Some(player) = world.player_mut(index) else {
            continue;
        };
        if let Some(readout) = player.take_health_change() {
            info!(
                "player {index} health {}/{} tint {:?}",
                readout.current, readout.starting, readout.tint
            );
        }
        info!(
            "player {index} at {} moving {}",
            player.position,
            player.velocity().unwrap_or_default()
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "fps must be a positive number, got {}",
        args.fps
    );
    let settings = load_settings(&args)?;
    let config = WorldConfig::from_settings(&settings).context("validating world settings")?;
    let mut world = demo_level(config)?;

    let dt = args.fps.recip();
    let whole_fps = duel::numeric::truncate_to_i32(args.fps).max(1).unsigned_abs();
    for frame in 0..args.frames {
        if damage_due(frame, whole_fps) {
            let targets: Vec<_> = (0..2).filter_map(|index| world.player_id(index)).collect();
            world.damage_inbox_mut().extend(
                targets
                    .into_iter()
                    .map(|target| DamageEvent { target, amount: -10 }),
            );
        }
        world.update(dt, &scripted_intents(frame, whole_fps));
        if world.tick() % u64::from(whole_fps) == 0 {
            info!("tick {}", world.tick());
            log_summary(&mut world);
        }
    }
    info!("finished {} frames of {:?}", args.frames, world.name());
    Ok(())
}
