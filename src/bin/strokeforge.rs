use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "strokeforge", version)]
struct Cli {
    /// Log authoring and packing diagnostics to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Author a DSL line and pack it.
    Pack(PackArgs),
    /// Author a DSL line and print a group's interpolated world transform.
    Sample(SampleArgs),
    /// Parse a DSL line and print the operations as JSON.
    Parse(ParseArgs),
}

#[derive(Parser, Debug)]
struct DslArgs {
    /// DSL line, e.g. "hi +0.5,0.5 *0.8 @0.25".
    #[arg(long)]
    dsl: String,

    /// Seed for random ranges.
    #[arg(long)]
    seed: Option<u64>,

    /// Fail on malformed tokens instead of dropping them.
    #[arg(long)]
    strict: bool,
}

impl DslArgs {
    fn options(&self) -> strokeforge::DslOptions {
        let mut opts = strokeforge::DslOptions {
            strictness: if self.strict {
                strokeforge::Strictness::Strict
            } else {
                strokeforge::Strictness::Lenient
            },
            ..strokeforge::DslOptions::default()
        };
        if let Some(seed) = self.seed {
            opts.seed = seed;
        }
        opts
    }

    fn author(&self) -> anyhow::Result<strokeforge::Builder> {
        let opts = self.options();
        let builder = strokeforge::Builder::author(|b| {
            strokeforge::author_line(b, &self.dsl, &opts).map(|_| ())
        })
        .with_context(|| format!("author dsl line '{}'", self.dsl))?;
        Ok(builder)
    }
}

#[derive(Parser, Debug)]
struct PackArgs {
    #[command(flatten)]
    dsl: DslArgs,

    /// Pack options JSON (default style, resolution).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the viewport width.
    #[arg(long)]
    width: Option<u32>,

    /// Override the viewport height.
    #[arg(long)]
    height: Option<u32>,

    /// Write the full packed output as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    dsl: DslArgs,

    /// Group index; negative counts from the end.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    group: isize,

    /// Animation progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Quadratic instead of linear interpolation.
    #[arg(long)]
    quadratic: bool,

    /// Treat the keyframes as a loop.
    #[arg(long = "loop")]
    looped: bool,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// DSL line to parse.
    #[arg(long)]
    dsl: String,

    /// Fail on malformed tokens instead of dropping them.
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Pack(args) => cmd_pack(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Parse(args) => cmd_parse(args),
    }
}

fn read_pack_options(path: &Path) -> anyhow::Result<strokeforge::PackOptions> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("read pack options '{}'", path.display()))?;
    let opts = strokeforge::PackOptions::from_json(&src)
        .with_context(|| format!("load pack options '{}'", path.display()))?;
    Ok(opts)
}

fn cmd_pack(args: PackArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => read_pack_options(path)?,
        None => strokeforge::PackOptions::default(),
    };
    if let Some(width) = args.width {
        opts.resolution.width = width;
    }
    if let Some(height) = args.height {
        opts.resolution.height = height;
    }

    let mut builder = args.dsl.author()?;
    let packed = strokeforge::pack(&mut builder, &opts)?;

    println!("control_points: {}", packed.control_points);
    println!("curves:         {}", packed.curve_count);
    println!("frames:         {}", packed.frame_count);
    println!("fingerprint:    {}", packed.fingerprint());
    println!(
        "positions:      sha256 {}",
        sha256_hex(&packed.positions.to_le_bytes())
    );

    if let Some(out) = &args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
        serde_json::to_writer(f, &packed)
            .with_context(|| format!("write packed json '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let builder = args.dsl.author()?;
    let opts = strokeforge::InterpOpts {
        mode: if args.quadratic {
            strokeforge::InterpMode::Quadratic
        } else {
            strokeforge::InterpMode::Linear
        },
        looped: args.looped,
    };
    let poses = builder.poses();
    let t = strokeforge::KeyframeInterpolator::new(&poses).world_transform_at(
        args.group,
        args.progress,
        opts,
    )?;
    println!("{}", serde_json::to_string_pretty(&t)?);
    Ok(())
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let opts = strokeforge::DslOptions {
        strictness: if args.strict {
            strokeforge::Strictness::Strict
        } else {
            strokeforge::Strictness::Lenient
        },
        ..strokeforge::DslOptions::default()
    };
    let script = strokeforge::parse_line(&args.dsl, &opts)?;
    println!("{}", serde_json::to_string_pretty(&script)?);
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
