#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Lane Defence experience.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lane_defence_core::EngagementRule;
use lane_defence_director::{Director, DirectorConfig, Summary};
use lane_defence_rendering::{FrameInput, RenderingBackend, Schedule};
use lane_defence_rendering_macroquad::MacroquadBackend;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

#[derive(Parser, Debug)]
#[command(name = "lane-defence")]
#[command(about = "Defend five lanes against enemies marching in from the right")]
struct Cli {
    /// TOML file with rule overrides, a seed and the engagement rule
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for spawn rolls; a time-based seed is used when neither the flag nor the config sets one
    #[arg(long)]
    seed: Option<u64>,
    /// When defenders open fire
    #[arg(long, value_enum)]
    engagement: Option<CliEngagement>,
    /// Run without a window, stepping the simulation with no player input
    #[arg(long)]
    headless: bool,
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
    /// Render as fast as possible instead of syncing to the display
    #[arg(long)]
    no_vsync: bool,
    /// Log frame timing once per second
    #[arg(long)]
    show_fps: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliEngagement {
    Never,
    LaneAhead,
}

impl From<CliEngagement> for EngagementRule {
    fn from(value: CliEngagement) -> Self {
        match value {
            CliEngagement::Never => Self::Never,
            CliEngagement::LaneAhead => Self::LaneAhead,
        }
    }
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = resolve_config(&cli)?;
    let director = Director::new(config).context("invalid configuration")?;

    if cli.headless {
        let summary = run_headless(director, cli.frames);
        log_summary(&summary);
        Ok(())
    } else {
        run_windowed(director, &cli)
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn resolve_config(cli: &Cli) -> Result<DirectorConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DirectorConfig::default(),
    };

    config.seed = Some(cli.seed.or(config.seed).unwrap_or_else(time_seed));
    if let Some(engagement) = cli.engagement {
        config.engagement = engagement.into();
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<DirectorConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    DirectorConfig::from_toml_str(&source)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn run_headless(mut director: Director, frames: Option<u64>) -> Summary {
    let mut scene = match director.presentation() {
        Ok(presentation) => presentation.scene,
        Err(error) => {
            tracing::error!(%error, "failed to build scene");
            return director.summary();
        }
    };

    let mut stepped = 0u64;
    while frames.map_or(true, |budget| stepped < budget) {
        stepped += 1;
        if director.frame(FrameInput::default(), &mut scene) == Schedule::Halt {
            break;
        }
    }

    director.summary()
}

fn run_windowed(mut director: Director, cli: &Cli) -> Result<()> {
    let presentation = director
        .presentation()
        .context("failed to build initial scene")?;
    let backend = MacroquadBackend::new()
        .with_vsync(!cli.no_vsync)
        .with_show_fps(cli.show_fps);

    let budget = cli.frames;
    let mut stepped = 0u64;
    backend.run(presentation, move |input, scene| {
        if budget.is_some_and(|budget| stepped >= budget) {
            return Schedule::Halt;
        }
        stepped += 1;

        let schedule = director.frame(input, scene);
        if schedule == Schedule::Halt {
            log_summary(&director.summary());
        }
        schedule
    })
}

fn log_summary(summary: &Summary) {
    tracing::info!(
        frames = summary.frame,
        score = summary.score,
        resources = summary.resources,
        defenders = summary.defenders_placed,
        enemies = summary.enemies_spawned,
        projectiles = summary.projectiles_fired,
        game_over = summary.game_over,
        "session finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_into_overrides() {
        let cli = Cli::try_parse_from([
            "lane-defence",
            "--seed",
            "12",
            "--engagement",
            "never",
            "--headless",
            "--frames",
            "30",
        ])
        .expect("valid flags");

        let config = resolve_config(&cli).expect("no config file");
        assert_eq!(config.seed, Some(12));
        assert_eq!(config.engagement, EngagementRule::Never);
        assert!(cli.headless);
        assert_eq!(cli.frames, Some(30));
    }

    #[test]
    fn unknown_engagement_is_rejected() {
        assert!(Cli::try_parse_from(["lane-defence", "--engagement", "always"]).is_err());
    }

    #[test]
    fn headless_run_respects_frame_budget() {
        let director = Director::new(DirectorConfig {
            seed: Some(5),
            ..DirectorConfig::default()
        })
        .expect("valid config");

        let summary = run_headless(director, Some(120));

        assert_eq!(summary.frame, 120);
        assert_eq!(summary.enemies_spawned, 1);
        assert!(!summary.game_over);
    }

    #[test]
    fn headless_run_stops_after_breach() {
        let mut config = DirectorConfig {
            seed: Some(5),
            ..DirectorConfig::default()
        };
        config.rules.enemy_speed_min = 50.0;
        config.rules.enemy_speed_max = 50.0;
        let director = Director::new(config).expect("valid config");

        let summary = run_headless(director, None);

        assert!(summary.game_over);
        assert!(summary.frame < 100);
    }
}
