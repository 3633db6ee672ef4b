use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use glyphweave::{
    Anomaly, CanvasSize, ComposeConfig, ComposedGlyph, LoadOptions, StrokeRecord, Subject,
    ToneClamp,
};

#[derive(Parser, Debug)]
#[command(name = "glyphweave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one folder of stroke images into a single glyph.
    Compose(ComposeArgs),
    /// Compose every sub-folder of a root directory.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct SharedArgs {
    /// Composition policy JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed overriding the one in the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep source tones instead of clamping strokes to black and white.
    #[arg(long, default_value_t = false)]
    no_tone: bool,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Folder holding `*.png` strokes and an optional `*.bmp` reference.
    #[arg(long)]
    strokes: PathBuf,

    /// Output image path; the extension selects the format.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width, overriding the reference image.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Canvas height, overriding the reference image.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Also write the placement report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(flatten)]
    shared: SharedArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Bmp,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Png => "png",
        }
    }
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Root directory whose sub-folders are subjects.
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving one image per subject.
    #[arg(long)]
    output: PathBuf,

    /// Compose subjects in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Bmp)]
    format: OutputFormat,

    #[command(flatten)]
    shared: SharedArgs,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    subject: &'a str,
    seed: u64,
    width: u32,
    height: u32,
    coverage: f64,
    fingerprint: String,
    strokes: &'a [StrokeRecord],
    anomalies: &'a [Anomaly],
}

impl<'a> Report<'a> {
    fn new(subject: &'a Subject, glyph: &'a ComposedGlyph) -> Self {
        Self {
            subject: &subject.name,
            seed: glyph.seed,
            width: glyph.image.width,
            height: glyph.image.height,
            coverage: glyph.coverage,
            fingerprint: format!("{:016x}", glyph.image.fingerprint()),
            strokes: &glyph.strokes,
            anomalies: &glyph.anomalies,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(shared: &SharedArgs) -> anyhow::Result<ComposeConfig> {
    let mut cfg = match &shared.config {
        Some(path) => ComposeConfig::from_path(path)?,
        None => ComposeConfig::default(),
    };
    if let Some(seed) = shared.seed {
        cfg.seed = Some(seed);
    }
    Ok(cfg)
}

fn load_options(shared: &SharedArgs) -> LoadOptions {
    LoadOptions {
        tone: (!shared.no_tone).then(ToneClamp::default),
        ..LoadOptions::default()
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.shared)?;
    let mut opts = load_options(&args.shared);
    if let (Some(w), Some(h)) = (args.width, args.height) {
        opts.canvas_override = Some(CanvasSize::new(w, h)?);
    }

    let subject = glyphweave::load_subject(&args.strokes, &opts)?;
    let glyph = glyphweave::compose(subject.canvas, &subject.strokes, &cfg)?;
    glyphweave::save_glyph(&glyph.image, &args.out)?;

    if let Some(report_path) = &args.report {
        write_report(report_path, &Report::new(&subject, &glyph))?;
    }

    eprintln!(
        "wrote {} (seed {}, coverage {:.4}, placed {}/{})",
        args.out.display(),
        glyph.seed,
        glyph.coverage,
        glyph.placed_count() + glyph.forced_count(),
        glyph.strokes.len()
    );
    Ok(())
}

fn write_report(path: &Path, report: &Report<'_>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create report dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serialize placement report")?;
    std::fs::write(path, json).with_context(|| format!("write report '{}'", path.display()))
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.shared)?;
    let opts = load_options(&args.shared);
    let base_seed = cfg.seed.unwrap_or_else(rand::random);

    let dirs = glyphweave::list_subjects(&args.input)?;
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("create output dir '{}'", args.output.display()))?;
    tracing::info!(subjects = dirs.len(), base_seed, parallel = args.parallel, "batch start");

    let run = |dir: &PathBuf| -> (PathBuf, anyhow::Result<()>) {
        let res = compose_subject(dir, &args.output, args.format, &cfg, &opts, base_seed);
        (dir.clone(), res)
    };

    let results: Vec<(PathBuf, anyhow::Result<()>)> = if args.parallel {
        if args.threads == Some(0) {
            anyhow::bail!("--threads must be >= 1 when set");
        }
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = args.threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build().context("build rayon thread pool")?;
        pool.install(|| dirs.par_iter().map(run).collect())
    } else {
        dirs.iter().map(run).collect()
    };

    let mut failed = 0usize;
    for (dir, res) in &results {
        if let Err(err) = res {
            failed += 1;
            tracing::error!(subject = %dir.display(), "{err:#}");
        }
    }
    eprintln!(
        "composed {}/{} subjects into {} (base seed {base_seed})",
        results.len() - failed,
        results.len(),
        args.output.display()
    );
    if failed > 0 {
        anyhow::bail!("{failed} subject(s) failed");
    }
    Ok(())
}

fn compose_subject(
    dir: &Path,
    out_dir: &Path,
    format: OutputFormat,
    cfg: &ComposeConfig,
    opts: &LoadOptions,
    base_seed: u64,
) -> anyhow::Result<()> {
    let subject = glyphweave::load_subject(dir, opts)?;
    let cfg = cfg
        .clone()
        .with_seed(glyphweave::subject_seed(base_seed, &subject.name));
    let glyph = glyphweave::compose(subject.canvas, &subject.strokes, &cfg)
        .with_context(|| format!("compose subject '{}'", subject.name))?;

    let out = out_dir.join(format!("{}.{}", subject.name, format.extension()));
    glyphweave::save_glyph(&glyph.image, &out)?;
    tracing::info!(
        subject = %subject.name,
        seed = glyph.seed,
        coverage = glyph.coverage,
        placed = glyph.placed_count() + glyph.forced_count(),
        strokes = glyph.strokes.len(),
        "subject composed"
    );
    Ok(())
}
