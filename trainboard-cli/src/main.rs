use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "trainboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one departure line as a PNG preview.
    Render(RenderArgs),
    /// Render one departure line and dump the framed animation envelope.
    Envelope(EnvelopeArgs),
    /// Dump a short device command envelope.
    Command(CommandArgs),
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Display config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Countdown or clock text, e.g. "12:34".
    #[arg(long)]
    clock: String,

    /// Destination label.
    #[arg(long)]
    label: String,

    /// Delay in minutes; 0 hides the badge.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    delay: i64,

    /// Platform number, 1-12.
    #[arg(long)]
    platform: Option<i64>,

    /// Horizontal label offset in pixels (negative scrolls left).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i32,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    frame: FrameArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct EnvelopeArgs {
    #[command(flatten)]
    frame: FrameArgs,

    /// Output file; envelopes are appended.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct CommandArgs {
    #[command(subcommand)]
    kind: DeviceCommandKind,

    /// Output file; envelopes are appended.
    #[arg(long, global = true)]
    out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum DeviceCommandKind {
    /// Erase every stored screen.
    Clear,
    /// Set brightness (0-100).
    Brightness {
        /// Brightness level.
        level: i64,
    },
    /// Switch the LED matrix on or off.
    Led {
        /// Desired state.
        state: LedState,
    },
    /// Delete one stored screen.
    Delete {
        /// Screen index (0-255).
        screen: i64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LedState {
    On,
    Off,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Envelope(args) => cmd_envelope(args).await,
        Command::Command(args) => cmd_command(args).await,
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<trainboard::DisplayConfig> {
    let cfg = match path {
        Some(p) => trainboard::DisplayConfig::from_path(p)
            .with_context(|| format!("load display config '{}'", p.display()))?,
        None => trainboard::DisplayConfig::default(),
    };
    Ok(cfg)
}

fn render_frame(
    args: &FrameArgs,
) -> anyhow::Result<(trainboard::DisplayConfig, trainboard::Canvas)> {
    let cfg = load_config(args.config.as_deref())?;
    let atlas = cfg
        .load_atlas()
        .with_context(|| format!("load glyph sheets from '{}'", cfg.assets_dir.display()))?;

    let mut req = trainboard::LayoutRequest::new(&args.clock, &args.label)
        .with_delay(args.delay)
        .with_text_offset(args.offset);
    if let Some(p) = args.platform {
        req = req.with_platform(p);
    }
    tracing::debug!(?req, width = cfg.width, height = cfg.height, "rendering frame");
    let canvas = cfg.compositor()?.render(&atlas, &req)?;
    Ok((cfg, canvas))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (_, canvas) = render_frame(&args.frame)?;
    ensure_parent_dir(&args.out)?;
    canvas.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

async fn cmd_envelope(args: EnvelopeArgs) -> anyhow::Result<()> {
    let (cfg, canvas) = render_frame(&args.frame)?;
    let envelope = trainboard::encode(std::slice::from_ref(&canvas), &cfg.encode_opts())?;
    ensure_parent_dir(&args.out)?;
    dump(&args.out, &[envelope]).await?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

async fn cmd_command(args: CommandArgs) -> anyhow::Result<()> {
    use trainboard::DeviceCommand;

    let cmd = match args.kind {
        DeviceCommandKind::Clear => DeviceCommand::Clear,
        DeviceCommandKind::Brightness { level } => DeviceCommand::brightness(level)?,
        DeviceCommandKind::Led { state } => DeviceCommand::SetLed(matches!(state, LedState::On)),
        DeviceCommandKind::Delete { screen } => DeviceCommand::delete_screen(screen)?,
    };
    let envelope = cmd.to_envelope()?;

    match args.out {
        Some(out) => {
            ensure_parent_dir(&out)?;
            dump(&out, &[envelope]).await?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let hex: Vec<String> = envelope
                .as_bytes()
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect();
            println!("{}", hex.join(" "));
        }
    }
    Ok(())
}

async fn dump(path: &Path, envelopes: &[trainboard::Envelope]) -> anyhow::Result<()> {
    let session = trainboard::DeviceSession::new(trainboard::FileTransport::new(path));
    session.connect().await?;
    session
        .send_all(envelopes)
        .await
        .with_context(|| format!("write envelopes to '{}'", path.display()))?;
    Ok(())
}
