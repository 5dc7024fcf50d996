mod interactive;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use algo_visualiser_core::{
    parse_values, spawn_player, Algorithm, AlgorithmInput, AppConfig, ArraySnapshot, Frame,
    LoggingConfig, Player, PlayerHandle, SpeedPreset, TextRenderer, TokioClock, TransportView,
    VisualiserError,
};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::interactive::{Control, HELP};

fn main() -> algo_visualiser_core::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::List => {
            run_list();
            Ok(())
        }
        Commands::Frames { run } => run_frames(&run, &config),
        Commands::Play {
            run,
            speed,
            step,
            clear,
        } => run_play(&run, speed, step, clear, &config),
    }
}

fn load_config(path: Option<&Path>) -> algo_visualiser_core::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_list() {
    for algorithm in Algorithm::ALL {
        let target = if algorithm.requires_target() {
            " (needs --target)"
        } else {
            ""
        };
        println!("{:<16} {}{}", algorithm.name(), algorithm.category(), target);
    }
}

fn record(
    run: &RunArgs,
    config: &AppConfig,
) -> algo_visualiser_core::Result<Vec<Frame<ArraySnapshot>>> {
    let mut input = AlgorithmInput::new(parse_values(&run.input)?);
    input.target = run.target;

    run.algorithm.run(&input, &config.runner).inspect_err(|err| {
        tracing::warn!(algorithm = %run.algorithm, %err, "input rejected");
    })
}

fn run_frames(run: &RunArgs, config: &AppConfig) -> algo_visualiser_core::Result<()> {
    let frames = record(run, config)?;
    println!("{}", serde_json::to_string_pretty(&frames)?);
    Ok(())
}

fn run_play(
    run: &RunArgs,
    speed: Option<SpeedPreset>,
    step: bool,
    clear: bool,
    config: &AppConfig,
) -> algo_visualiser_core::Result<()> {
    let frames = record(run, config)?;
    let delay = speed
        .map(SpeedPreset::delay)
        .unwrap_or(Duration::from_millis(config.playback.speed_ms));
    tracing::info!(
        algorithm = %run.algorithm,
        frames = frames.len(),
        ?delay,
        step,
        "starting playback"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let player = Player::with_clock(TokioClock::new()).with_speed(delay);
        let handle = spawn_player(player);
        let total = frames.len();
        let mut shown = subscribe_renderer(&handle, run.algorithm, &frames, clear).await?;
        handle.load_frames(frames).await?;

        if step || !config.playback.autoplay {
            drive_interactively(&handle).await?;
        } else {
            handle.play().await?;
            while let Some(index) = shown.recv().await {
                if index + 1 == total {
                    break;
                }
            }
        }

        handle.shutdown().await?;
        handle.closed().await;
        Ok::<_, VisualiserError>(())
    })
}

/// Installs the terminal renderer as the player's consumer. The returned
/// receiver yields every index that was drawn.
async fn subscribe_renderer(
    handle: &PlayerHandle<ArraySnapshot>,
    algorithm: Algorithm,
    frames: &[Frame<ArraySnapshot>],
    clear: bool,
) -> algo_visualiser_core::Result<mpsc::UnboundedReceiver<usize>> {
    let descriptions: Arc<[String]> = frames.iter().map(|f| f.description.clone()).collect();
    let total = frames.len();
    let renderer = TextRenderer::new();
    let (shown, receiver) = mpsc::unbounded_channel();

    handle
        .subscribe(move |snapshot, index| {
            let description = descriptions.get(index).map(String::as_str).unwrap_or_default();
            if clear {
                print!("\x1b[2J\x1b[H");
            }
            println!(
                "{}",
                renderer.render(snapshot, description, index, total, algorithm.pseudocode())
            );
            let _ = shown.send(index);
        })
        .await?;
    Ok(receiver)
}

async fn drive_interactively(
    handle: &PlayerHandle<ArraySnapshot>,
) -> algo_visualiser_core::Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let control = match line.parse::<Control>() {
            Ok(control) => control,
            Err(err) => {
                println!("{err}\n{HELP}");
                continue;
            }
        };
        tracing::debug!(?control, "transport command");

        match control {
            Control::Next => handle.step_forward().await?,
            Control::Back => handle.step_backward().await?,
            Control::Play => handle.play().await?,
            Control::Pause => handle.pause().await?,
            Control::Seek(index) => handle.go_to_frame(index).await?,
            Control::Reset => handle.reset().await?,
            Control::Speed(preset) => handle.set_speed(preset.delay()).await?,
            Control::Status => {}
            Control::Quit => break,
        }
        print_status(handle).await?;
    }
    Ok(())
}

async fn print_status(handle: &PlayerHandle<ArraySnapshot>) -> algo_visualiser_core::Result<()> {
    let status = handle.status().await?;
    let view = TransportView::from_status(&status);
    println!(
        "[{:?}] frame {}/{} {:.0}% speed {}{}{}",
        status.state,
        status.current_frame + 1,
        status.total_frames,
        view.progress * 100.0,
        view.speed,
        if view.can_step_backward { "" } else { " (at start)" },
        if view.can_step_forward { "" } else { " (at end)" },
    );
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Step-by-step algorithm animations in the terminal",
    long_about = None
)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available algorithms.
    List,
    /// Run an algorithm and print its frames as JSON.
    Frames {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Run an algorithm and animate it in the terminal.
    Play {
        #[command(flatten)]
        run: RunArgs,
        /// Playback speed preset (0.5x, 1x, 1.5x, 2x, 3x).
        #[arg(short, long)]
        speed: Option<SpeedPreset>,
        /// Drive playback from stdin instead of autoplaying.
        #[arg(long)]
        step: bool,
        /// Clear the terminal before each frame.
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Algorithm name, see `list`.
    algorithm: Algorithm,
    /// Comma or space separated integers.
    #[arg(short, long)]
    input: String,
    /// Search target or coin change amount.
    #[arg(short, long, allow_negative_numbers = true)]
    target: Option<i64>,
}
