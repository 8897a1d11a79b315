mod frame_input;
mod game_layout;
mod ui_render;
mod ui_text;
mod window_config;

use arena::{ContentPack, Game};
use arena_app::app_loop::AppState;
use arena_app::checkpoint_file::{self, CHECKPOINT_ENV_VAR};
use arena_app::seed::{SEED_ENV_VAR, generate_runtime_seed, resolve_seed};
use env_logger::{Builder, Env};
use macroquad::prelude::*;
use std::env;
use taffy::TaffyTree;

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let env_seed = env::var(SEED_ENV_VAR).ok();
    let seed = match resolve_seed(&args, env_seed.as_deref(), generate_runtime_seed()) {
        Ok(choice) => {
            log::info!("session seed {choice:?}");
            choice.value()
        }
        Err(err) => {
            log::error!("{err}");
            return;
        }
    };

    let checkpoint_path =
        checkpoint_file::resolve_path(env::var(CHECKPOINT_ENV_VAR).ok().as_deref());
    if checkpoint_path.is_none() {
        log::warn!("no data directory; progress will not be saved");
    }

    let content = ContentPack::build_default();
    let mut game = match checkpoint_path.as_deref().and_then(checkpoint_file::load_if_present) {
        Some(checkpoint) => Game::from_checkpoint(seed, &content, &checkpoint),
        None => Game::new(seed, &content),
    };
    let mut app = AppState::new(&game);

    let mut taffy = TaffyTree::new();
    let nodes = match game_layout::setup_layout(&mut taffy) {
        Ok(nodes) => nodes,
        Err(err) => {
            log::error!("layout setup failed: {err}");
            return;
        }
    };

    loop {
        clear_background(BLACK);
        match game_layout::compute_frame_layout(&mut taffy, &nodes, screen_width(), screen_height())
        {
            Ok(layout) => {
                let frame = frame_input::capture_frame_input(&layout);
                let dt_ms = (get_frame_time() * 1000.0).round() as u64;
                if let Some(saved) = app.tick(&mut game, &frame, dt_ms)
                    && let Some(path) = checkpoint_path.as_deref()
                    && let Err(err) = checkpoint_file::write_atomic(&saved, path)
                {
                    log::warn!("could not save checkpoint {}: {err}", path.display());
                }
                ui_render::draw_frame(&game, &app, seed, &layout);
            }
            Err(err) => log::error!("layout failed: {err}"),
        }
        next_frame().await
    }
}
