use clap::Parser;
use pairflip_core as game;
use wasm_bindgen::prelude::*;

mod canvas;
mod game_view;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of card columns
    #[arg(short, long, default_value_t = game::BoardConfig::DEFAULT_COLUMNS)]
    columns: game::Coord,

    /// Number of card rows
    #[arg(short, long, default_value_t = game::BoardConfig::DEFAULT_ROWS)]
    rows: game::Coord,
}

impl Args {
    fn board_config(&self) -> game::Result<game::BoardConfig> {
        game::BoardConfig::new(self.columns, self.rows)
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let config = args.board_config().expect("Invalid board size");

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    let props = game_view::GameProps {
        config,
        seed: args.seed,
    };
    yew::Renderer::<game_view::GameView>::with_root_and_props(root, props).render();
}
