//! Stack Tower entry point
//!
//! Native builds run a headless autopilot session and report the result.
//! The browser build enters through `host::web::start` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use stack_tower::host::headless::HeadlessHost;
    use stack_tower::{DifficultyPreset, TowerConfig};

    env_logger::init();
    log::info!("Stack Tower (native) starting...");

    // Usage: stack-tower [seed] [relaxed|classic|frantic]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let preset = args
        .next()
        .and_then(|s| DifficultyPreset::from_str(&s))
        .unwrap_or_default();

    let config = TowerConfig::from_preset(preset);
    let mut host = match HeadlessHost::with_autopilot(config, seed) {
        Ok(host) => host,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("Demo run with seed {} ({})", seed, preset.as_str());

    let score = host.run_until_game_over(200_000);
    let state = &host.state;
    let top = state.tower.last().map(|b| b.size).unwrap_or_default();

    println!("Seed:        {seed}");
    println!("Difficulty:  {}", preset.as_str());
    println!("Score:       {score}");
    println!("Phase:       {:?}", state.phase);
    println!("Ticks:       {}", state.time_ticks);
    println!("Final speed: {:.3}", state.speed());
    println!("Top block:   {:.2} x {:.2}", top.x, top.z);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is host::web::start, this is just to satisfy the compiler
}
