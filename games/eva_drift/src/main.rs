use magboots::{engine::toggle_debug_text, BootsConfig};

use crate::eva_game::EvaDriftGame;

pub mod eva_game;

const FIXED_DT: f32 = 0.02;
const RUN_SECONDS: f32 = 12.0;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match BootsConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => BootsConfig::default().with_attract_bodies(true),
    };

    toggle_debug_text();

    let mut game = match EvaDriftGame::new(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid boots config: {e}");
            std::process::exit(1);
        }
    };
    game.init();

    let steps = (RUN_SECONDS / FIXED_DT) as u32;
    for _ in 0..steps {
        game.update(FIXED_DT);
    }

    game.print_summary();
}
