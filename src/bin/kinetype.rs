use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kinetype::{
    AnswerLog, AnswerSink as _, Backdrop, FixedAdvance, JsonFileAnswerStore, PaletteTable,
    PaletteTheme, ParleyMeasure, RecordingSurface, RunOptions, ScriptDef, TextMeasure,
    WordStream, animation::ease::Ease, theme::notifier::DEFAULT_TRANSITION,
};

#[derive(Parser, Debug)]
#[command(name = "kinetype", version)]
struct Cli {
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a script.
    Validate(ScriptArgs),
    /// Print the deterministic activation timeline of a script.
    Schedule(ScheduleArgs),
    /// Play a script headless against a recording surface.
    Simulate(SimulateArgs),
    /// Append one answer record to a store.
    Answer(AnswerArgs),
    /// Print every stored answer.
    Answers(StoreArgs),
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    script: ScriptArgs,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    script: ScriptArgs,

    /// Stage width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Frame rate of the simulated display.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Override the jitter seed from the script.
    #[arg(long)]
    seed: Option<u64>,

    /// Disable per-character jitter.
    #[arg(long)]
    no_jitter: bool,

    /// Measure words with this font instead of a fixed advance.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Extra faces registered next to `--font`, such as its bold cut; repeatable.
    #[arg(long = "face", requires = "font")]
    faces: Vec<PathBuf>,

    /// Font size in pixels (with `--font`).
    #[arg(long, default_value_t = 48.0)]
    font_size: f32,

    /// Advance per character in pixels (without `--font`).
    #[arg(long, default_value_t = 28.0)]
    advance: f64,

    /// Background transition easing (`linear`, `in_quad`, `out_quad`, `in_out_quad`,
    /// `out_cubic`, `in_out_cubic`).
    #[arg(long, value_parser = parse_ease, default_value = "in_out_quad")]
    ease: Ease,

    /// Write the run summary with per-frame snapshots to this JSON file.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pace frames against the wall clock.
    #[arg(long)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct StoreArgs {
    /// Answer store JSON file.
    #[arg(long)]
    store: PathBuf,
}

#[derive(Parser, Debug)]
struct AnswerArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Answer as `key=value`; repeatable.
    #[arg(long = "field", value_parser = parse_field, conflicts_with = "json")]
    fields: Vec<(String, String)>,

    /// Raw submission body: a flat JSON object of strings.
    #[arg(long)]
    json: Option<String>,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if k.is_empty() {
        return Err("field key must be non-empty".to_string());
    }
    Ok((k.to_string(), v.to_string()))
}

fn parse_ease(s: &str) -> Result<Ease, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unknown easing '{s}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Schedule(args) => cmd_schedule(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Answer(args) => cmd_answer(args),
        Command::Answers(args) => cmd_answers(args),
    }
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("kinetype={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: &Path) -> anyhow::Result<ScriptDef> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read script '{}'", path.display()))?;
    let def = ScriptDef::from_json_str(&text)
        .with_context(|| format!("parse script '{}'", path.display()))?;
    Ok(def)
}

fn cmd_validate(args: ScriptArgs) -> anyhow::Result<()> {
    let def = read_script(&args.script)?;
    let script = def.normalize()?;
    def.engine_config().validate()?;
    let phases = script.phases();
    println!(
        "ok: {} tokens, {} phases ({})",
        script.len(),
        phases.len(),
        phases.join(", ")
    );
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let def = read_script(&args.script.script)?;
    let script = def.normalize()?;
    let cfg = def.engine_config();
    cfg.validate()?;
    let schedule = kinetype::plan_schedule(&script, &cfg);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }
    for t in &schedule.tokens {
        let phase = t
            .phase
            .as_deref()
            .map(|p| format!("  [{p}]"))
            .unwrap_or_default();
        println!(
            "{:>8}ms  #{:<4} {:<24} per_char={}ms typing={}ms{phase}",
            t.activate_at.0, t.index, t.text, t.per_char.0, t.typing.0
        );
    }
    println!("{:>8}ms  complete", schedule.complete_at.0);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let def = read_script(&args.script.script)?;
    match &args.font {
        Some(path) => {
            let mut measure = ParleyMeasure::from_font_file(path, args.font_size)?;
            for face in &args.faces {
                let bytes = std::fs::read(face)
                    .with_context(|| format!("read font face '{}'", face.display()))?;
                measure = measure.with_face(&bytes)?;
            }
            simulate_with(&args, &def, measure)
        }
        None => simulate_with(&args, &def, FixedAdvance::new(args.advance)),
    }
}

fn simulate_with<M: TextMeasure>(
    args: &SimulateArgs,
    def: &ScriptDef,
    measure: M,
) -> anyhow::Result<()> {
    let script = def.normalize()?;
    let mut cfg = def.engine_config();
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if args.no_jitter {
        cfg = cfg.without_jitter();
    }

    let palettes = PaletteTable::builtin();
    let initial = script.phases().first().copied().unwrap_or("opening");
    let backdrop = palettes
        .get(initial)
        .map(|p| Backdrop::new(cfg.seed, p));
    let mut theme = PaletteTheme::new(palettes, initial, DEFAULT_TRANSITION)
        .context("built-in palette table is empty")?
        .with_ease(args.ease);
    if let Some(bd) = backdrop {
        theme = theme.with_backdrop(bd);
    }

    let mut stream = WordStream::new(
        script,
        cfg,
        RecordingSurface::new(args.width),
        measure,
        theme,
    )?;
    let opts = RunOptions::at_fps(args.fps)?.capture(args.out.is_some());
    let summary = if args.realtime {
        kinetype::run_realtime(&mut stream, opts)?
    } else {
        kinetype::run_virtual(&mut stream, opts)?
    };

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
    }
    println!(
        "frames={} activated={} evicted={} completed={} ended_at={}ms",
        summary.frames, summary.activated, summary.evicted, summary.completed, summary.ended_at.0
    );
    Ok(())
}

fn cmd_answer(args: AnswerArgs) -> anyhow::Result<()> {
    let fields: BTreeMap<String, String> = match &args.json {
        Some(body) => kinetype::parse_submission(body)?,
        None => args.fields.into_iter().collect(),
    };
    let mut store = JsonFileAnswerStore::new(&args.store.store);
    let record = store.submit(fields)?;
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}

fn cmd_answers(args: StoreArgs) -> anyhow::Result<()> {
    let store = JsonFileAnswerStore::new(&args.store);
    let log = AnswerLog {
        answers: store.list()?,
    };
    println!("{}", serde_json::to_string_pretty(&log)?);
    Ok(())
}
