use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};

use saccade::{
    Advance, PageRect, PageSource, ReaderSession, ReadingBounds, SaccadeResult, Settings,
    StdClock, pattern,
};

#[derive(Parser, Debug)]
#[command(name = "saccade", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a trajectory as JSON.
    Path(PathArgs),
    /// Play a trajectory headlessly, printing each emitted point.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Settings JSON; omitted fields take their defaults.
    #[arg(long = "settings")]
    settings_path: Option<PathBuf>,

    /// Page width in pixels.
    #[arg(long)]
    width: f64,

    /// Page height in pixels.
    #[arg(long)]
    height: f64,

    /// Seed for the randomized grid pattern (thread rng when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Settings JSON; omitted fields take their defaults.
    #[arg(long = "settings")]
    settings_path: Option<PathBuf>,

    /// Page width in pixels.
    #[arg(long)]
    width: f64,

    /// Page height in pixels.
    #[arg(long)]
    height: f64,

    /// Stop after this many points.
    #[arg(long)]
    limit: Option<usize>,

    /// Print without sleeping between points.
    #[arg(long)]
    no_wait: bool,
}

struct SinglePage {
    rect: PageRect,
}

impl PageSource for SinglePage {
    fn page_count(&self) -> u32 {
        1
    }

    fn page_rect(&self, _page: u32) -> SaccadeResult<PageRect> {
        Ok(self.rect)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Path(args) => cmd_path(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(p) => {
            let f = File::open(p).with_context(|| format!("open settings '{}'", p.display()))?;
            serde_json::from_reader(BufReader::new(f)).with_context(|| "parse settings JSON")?
        }
        None => Settings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    let settings = read_settings(args.settings_path.as_deref())?;
    let page = PageRect::new(0.0, 0.0, args.width, args.height);
    let bounds =
        ReadingBounds::from_page(page, settings.start_position, settings.end_position);

    let trajectory = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            pattern::generate_with_rng(bounds, &settings, &mut rng)
        }
        None => pattern::generate(bounds, &settings),
    };

    let json = serde_json::to_string_pretty(&trajectory)?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write trajectory '{}'", out.display()))?;
            eprintln!("wrote {} ({} points)", out.display(), trajectory.len());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    use saccade::Clock as _;

    let settings = read_settings(args.settings_path.as_deref())?;
    let source = SinglePage {
        rect: PageRect::new(0.0, 0.0, args.width, args.height),
    };

    let mut session = ReaderSession::new(settings)?;
    session.load_page(&source, 1)?;

    let mut clock = StdClock;
    let limit = args.limit.unwrap_or(usize::MAX);
    let mut emitted = 0usize;

    let mut tick = session.start()?;
    while emitted < limit {
        match session.advance(tick) {
            Advance::Emitted { point, delay, next } => {
                let meta = match point.meta {
                    Some(m) => serde_json::to_string(&m)?,
                    None => "-".to_string(),
                };
                println!(
                    "{emitted:6}  x={:8.1}  y={:8.1}  delay={:7.1}ms  {meta}",
                    point.x,
                    point.y,
                    delay.as_secs_f64() * 1000.0,
                );
                emitted += 1;
                if !args.no_wait {
                    clock.sleep(delay);
                }
                tick = next;
            }
            Advance::Finished | Advance::Stale => break,
        }
    }

    eprintln!("played {emitted} points");
    Ok(())
}
