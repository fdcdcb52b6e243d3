use clap::Parser;
use mp4geom::{Geometry, probe_file};

#[derive(Parser, Debug)]
#[command(version, about = "Print MP4 display geometry and playback rotation")]
struct Args {
    /// MP4/ISOBMFF file path
    path: String,

    /// Output as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Log filter (e.g. "debug"); falls back to RUST_LOG, then "warn"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut builder = env_logger::Builder::new();
    if let Some(ref filters) = args.log {
        builder.parse_filters(filters);
    } else if let Ok(ref filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(filters);
    } else {
        builder.parse_filters("warn");
    }
    builder.init();

    let geo = probe_file(&args.path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&geo)?);
    } else {
        println!("{}", format_human(&geo));
    }

    Ok(())
}

fn format_human(geo: &Geometry) -> String {
    format!("{}x{} rotate={}", geo.width, geo.height, geo.rotate)
}
