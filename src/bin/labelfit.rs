use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use labelfit_rs::text::{GlyphMeasurer, HeuristicMeasurer};
use labelfit_rs::{LabelDatum, TextAnchor, TextBox, TextLayout, VerticalAlign};
use labelfit_rs::{stats, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "labelfit",
    version,
    about = "Size, wrap & truncate label text to fit fixed boxes"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit every item of a JSON file (and optionally save layouts and print stats).
    Fit(FitArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct FitArgs {
    /// JSON array of items: {"id", "text", "width", "height", ...}
    #[arg(short, long)]
    input: PathBuf,
    /// Save layouts to file (format inferred by --format or extension). Prints JSON to stdout otherwise.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Default box width (default 200).
    #[arg(long, default_value_t = 200.0)]
    width: f64,
    /// Default box height (default 200).
    #[arg(long, default_value_t = 200.0)]
    height: f64,
    #[arg(long, default_value = "sans-serif")]
    font_family: String,
    #[arg(long, default_value = "400")]
    font_weight: String,
    /// Starting (or fixed) font size in pixels.
    #[arg(long, default_value_t = 10.0)]
    font_size: f64,
    #[arg(long, default_value_t = 8.0)]
    font_min: f64,
    #[arg(long, default_value_t = 50.0)]
    font_max: f64,
    /// Shrink the font between --font-min and --font-max until the text fits.
    #[arg(long, default_value_t = false)]
    resize: bool,
    /// Fixed line height in pixels (default 1.4 x font size).
    #[arg(long)]
    line_height: Option<f64>,
    /// Allow single words wider than the box.
    #[arg(long, default_value_t = false)]
    overflow: bool,
    /// top, middle or bottom
    #[arg(long, default_value = "top")]
    vertical_align: VerticalAlign,
    /// start, middle or end
    #[arg(long, default_value = "start")]
    text_anchor: TextAnchor,
    /// Maximum number of lines per item.
    #[arg(long)]
    max_lines: Option<usize>,
    /// When resizing cannot fit the text, truncate at --font-min instead of omitting the item.
    #[arg(long, default_value_t = false)]
    ellipsis_at_floor: bool,
    /// TTF/OTF file to measure with (registered under --font-family).
    #[arg(long)]
    font_file: Option<PathBuf>,
    /// Lay out items on all cores.
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Print a summary of the pass to stderr.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 2 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.2}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Fit(args) => cmd_fit(args),
    }
}

fn build_textbox(args: &FitArgs) -> Result<TextBox<LabelDatum>> {
    let base = TextBox::new(|d: &LabelDatum, _| d.text.clone())
        .width(args.width)
        .height(args.height)
        .font_family(args.font_family.clone())
        .font_weight(args.font_weight.clone())
        .font_size(args.font_size)
        .font_min(args.font_min)
        .font_max(args.font_max)
        .font_resize(args.resize)
        .line_height(args.line_height)
        .overflow(args.overflow)
        .vertical_align(args.vertical_align)
        .text_anchor(args.text_anchor)
        .max_lines(args.max_lines)
        .ellipsis_at_floor(args.ellipsis_at_floor);

    let base = match &args.font_file {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            GlyphMeasurer::register_font(&args.font_family, bytes)?;
            log::info!("measuring with {} as {:?}", path.display(), args.font_family);
            base.measurer(GlyphMeasurer::new())
        }
        None => base.measurer(HeuristicMeasurer::default()),
    };
    Ok(TextBox::for_labels(base))
}

fn run(textbox: &TextBox<LabelDatum>, items: &[LabelDatum], parallel: bool) -> Vec<TextLayout> {
    #[cfg(feature = "parallel")]
    if parallel {
        return textbox.layout_par(items);
    }
    #[cfg(not(feature = "parallel"))]
    if parallel {
        log::warn!("built without the `parallel` feature; laying out sequentially");
    }
    textbox.layout(items)
}

fn cmd_fit(args: FitArgs) -> Result<()> {
    let items = storage::load_labels(&args.input)?;
    let textbox = build_textbox(&args)?;
    let layouts = run(&textbox, &items, args.parallel);

    match args.out.as_ref() {
        Some(path) => {
            let fmt = match args.format {
                Some(OutFormat::Csv) => "csv",
                Some(OutFormat::Json) => "json",
                None => path.extension().and_then(|e| e.to_str()).unwrap_or("json"),
            }
            .to_ascii_lowercase();
            match fmt.as_str() {
                "csv" => storage::save_csv(&layouts, path)?,
                "json" => storage::save_json(&layouts, path)?,
                other => anyhow::bail!("unsupported format: {}", other),
            }
            eprintln!("Saved {} layouts to {}", layouts.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&layouts)?),
    }

    if args.stats {
        let s = stats::summarize(&layouts);
        eprintln!(
            "items={} shown={} omitted={} truncated={} lines={}  font min={} max={} mean={}",
            s.count,
            s.shown,
            s.omitted,
            s.truncated,
            s.total_lines,
            fmt_opt(s.min_font),
            fmt_opt(s.max_font),
            fmt_opt(s.mean_font)
        );
    }

    Ok(())
}
