mod logging;
mod session;
mod settings;

use anyhow::Context;
use clap::{Parser, Subcommand};
use homeward_core::{
    default_config_path, load_yaml, scale_rect, BattleTick, Navigator, PlannerState, RandomSource,
    SeededRandom, ThreadRandom, REFERENCE_SIZE,
};
use homeward_vision::{count_red_dots, frame_size, hp_bar_percent, load_frame, DEFAULT_MINIMAP};
use session::{DryRunController, ScriptedRecognizer, Session};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "homeward", version, about = "Dry-run driver for the return-to-anchor bot")]
struct Cli {
    /// Bot configuration (YAML). Defaults to the user config, then the built-in one.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to a daily file in this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a scripted session through the bot tick.
    Replay {
        session: PathBuf,
        /// Seed the click jitter for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Measure HP and count minimap dots on a screenshot.
    Inspect { screenshot: PathBuf },
    /// Plan a single return click from an OCR reading.
    Plan {
        /// OCR text of the current position, e.g. "430,1580".
        #[arg(long)]
        current: String,
        /// Anchor list overriding the configured one.
        #[arg(long)]
        anchor: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write the effective configuration to the user config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::setup(cli.verbose, cli.log_dir.as_deref());

    let config = settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Replay { session, seed } => {
            let session: Session = load_yaml(&session)
                .with_context(|| format!("loading session {}", session.display()))?;
            let navigator =
                Navigator::from_anchor_list(config.planner.clone(), &config.anchors, rng(seed))?;
            let mut bot = BattleTick::new(config.battle.clone(), navigator);
            let mut state = PlannerState::new();
            let mut recognizer = ScriptedRecognizer::new(session.frame);
            let mut controller = DryRunController::default();

            tracing::info!(ticks = session.ticks.len(), "Replaying session");
            for (i, observation) in session.ticks.into_iter().enumerate() {
                recognizer.load(observation);
                let outcome = bot.run(&mut state, &mut recognizer, &mut controller);
                let inputs: Vec<String> =
                    controller.drain().iter().map(|input| input.to_string()).collect();
                println!("#{:<3} {:?} [{}]", i + 1, outcome, inputs.join(", "));
            }
        }
        Command::Inspect { screenshot } => {
            let image = load_frame(&screenshot)
                .with_context(|| format!("loading {}", screenshot.display()))?;
            let size = frame_size(&image);

            let hp_roi = scale_rect(config.battle.hp_bar, REFERENCE_SIZE, size);
            let minimap_roi = scale_rect(DEFAULT_MINIMAP, REFERENCE_SIZE, size);

            println!("frame: {}x{}", size.width, size.height);
            println!("hp: {}%", hp_bar_percent(&image, hp_roi));
            println!("red dots: {}", count_red_dots(&image, minimap_roi));
        }
        Command::Plan {
            current,
            anchor,
            seed,
        } => {
            let anchors = anchor.unwrap_or(config.anchors);
            let mut navigator = Navigator::from_anchor_list(config.planner, &anchors, rng(seed))?;
            let mut state = PlannerState::new();

            match navigator.plan_text(&mut state, &current, config.battle.screen_center) {
                Some(point) => println!("click {}", point),
                None => println!("rest"),
            }
        }
        Command::InitConfig { force } => {
            let path = default_config_path();
            settings::write(&config, &path, force)?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

fn rng(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom::new()),
    }
}
