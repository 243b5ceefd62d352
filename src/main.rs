//! Musu headless entry point
//!
//! Runs the simulation without a renderer: loads a level and settings,
//! feeds a scripted input pattern through a fixed number of ticks, and logs
//! what happened. Useful for profiling and for eyeballing level behaviour
//! with `RUST_LOG=debug`.
//!
//! Usage: `musu [LEVEL_FILE] [SETTINGS_JSON]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use musu::anim::SpriteAnimator;
    use musu::consts::FRAME_DT;
    use musu::level::{DEMO_LEVEL, Tile};
    use musu::sim::{Command, GameEvent, GameState, ManualClock, TickInput, tick};
    use musu::{Level, Settings};

    /// Simulated frames per run (ten seconds at 60 Hz)
    const FRAMES: u64 = 600;

    env_logger::init();
    log::info!("Musu (headless) starting...");

    let mut args = std::env::args().skip(1);

    let level = match args.next() {
        Some(path) => Level::load(&path),
        None => Level::parse(DEMO_LEVEL),
    };
    let level = match level {
        Ok(level) => level,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let settings = args.next().map(Settings::load).unwrap_or_default();
    log::info!(
        "Level {}x{}: {} enemies, {} bricks, {} ground tiles",
        level.cols,
        level.rows,
        level.count(Tile::Enemy),
        level.count(Tile::Brick),
        level.count(Tile::Ground)
    );

    let mut state = GameState::new(level, settings);
    let mut animator = SpriteAnimator::new();
    let clock = ManualClock::new();
    let dt = Duration::from_secs_f32(FRAME_DT);

    let mut kills = 0u32;
    let mut deaths = 0u32;

    for frame in 0..FRAMES {
        // Walk right, hop every second, throw a fireball every half second
        let mut commands = vec![Command::Right];
        if frame % 60 == 0 {
            commands.push(Command::Up);
        }
        let input = TickInput {
            commands,
            run: frame % 120 >= 60,
            fire: frame % 30 == 0,
            ..Default::default()
        };

        clock.advance(dt);
        let result = tick(&mut state, &input, &clock, &mut animator);

        for event in &result.events {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::PlayerDied => deaths += 1,
                GameEvent::LevelReloaded => log::info!("Frame {frame}: level reloaded"),
                _ => {}
            }
        }
        animator.retain(|id| state.actor(id).is_some());
    }

    log::info!(
        "Ran {FRAMES} frames: score {}, {kills} kills, {deaths} deaths, camera at {:.1}",
        state.score,
        state.camera_x
    );
    log::info!(
        "{} actors ({} scene tiles), {} removals pending",
        state.actors.len(),
        state.scene().count(),
        state.cull.len()
    );
    println!("{}", state.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is embedded by a host renderer on the web; nothing to run here
}
