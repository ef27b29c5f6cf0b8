use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use portfolio_charts::ChartConfig;
use portfolio_charts::data;
use portfolio_charts::style::parse_color_list;
use portfolio_charts::viz::{self, BarChartRequest, ChartRequest, ImageFormat, LineChartRequest};

#[derive(Parser, Debug)]
#[command(
    name = "pfchart",
    version,
    about = "Render portfolio line and bar charts with non-overlapping value labels"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Line chart with labels at each series' last value.
    Line(LineArgs),
    /// Grouped bar chart, one cluster per row.
    Bar(CommonArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Png,
    Svg,
}

impl From<OutFormat> for ImageFormat {
    fn from(f: OutFormat) -> Self {
        match f {
            OutFormat::Png => ImageFormat::Png,
            OutFormat::Svg => ImageFormat::Svg,
        }
    }
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// CSV file: first column row labels (dates), other columns numeric series.
    #[arg(short, long)]
    input: PathBuf,
    /// Chart title.
    #[arg(long, default_value = "")]
    title: String,
    /// Y-axis label.
    #[arg(long, default_value = "")]
    ylabel: String,
    /// Output directory prefix, including the trailing separator (e.g. "out/").
    #[arg(long, default_value = "")]
    filepath: String,
    /// Output file name without extension.
    #[arg(long)]
    filename: String,
    /// Series colors separated by comma or semicolon (letters, names or #rrggbb).
    #[arg(long)]
    colors: Option<String>,
    /// Legend labels separated by semicolons (defaults to column headers).
    #[arg(long)]
    labels: Option<String>,
    /// Output format (overrides the config file).
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Locale for number formatting, e.g. "en" or "de" (overrides the config file).
    #[arg(long)]
    locale: Option<String>,
    /// JSON file with rendering settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the computed labels to this file (.json or .csv).
    #[arg(long)]
    dump_labels: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LineArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Clamp the y-axis to the data's rounded min and max.
    #[arg(long, default_value_t = false)]
    squeeze: bool,
}

fn parse_labels(s: &str) -> Vec<String> {
    s.split(';').map(|x| x.trim().to_string()).collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Line(args) => cmd_line(args),
        Command::Bar(args) => cmd_bar(args),
    }
}

fn load_config(args: &CommonArgs) -> Result<ChartConfig> {
    let mut cfg = match &args.config {
        Some(p) => ChartConfig::from_json_file(p)?,
        None => ChartConfig::default(),
    };
    if let Some(f) = args.format {
        cfg.format = f.into();
    }
    if let Some(l) = &args.locale {
        cfg.locale = l.clone();
    }
    Ok(cfg)
}

fn chart_request<'a>(
    args: &CommonArgs,
    table: &'a portfolio_charts::Table,
) -> Result<ChartRequest<'a>> {
    let mut req = ChartRequest::new(
        table,
        args.title.clone(),
        args.ylabel.clone(),
        args.filepath.clone(),
        args.filename.clone(),
    )
    .with_config(load_config(args)?);
    if let Some(c) = &args.colors {
        let colors = parse_color_list(c).map_err(|e| anyhow::anyhow!("invalid --colors: {e}"))?;
        req = req.with_colors(colors);
    }
    if let Some(l) = &args.labels {
        req = req.with_legend_labels(parse_labels(l));
    }
    Ok(req)
}

fn dump_labels(path: &Path, chart: &viz::RenderedChart) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => data::save_labels_csv(chart, path)?,
        _ => data::save_labels_json(chart, path)?,
    }
    eprintln!("Saved labels to {}", path.display());
    Ok(())
}

fn cmd_line(args: LineArgs) -> Result<()> {
    let table = data::load_csv(&args.common.input)
        .with_context(|| format!("loading {}", args.common.input.display()))?;
    info!(
        "loaded {} rows x {} series from {}",
        table.n_rows(),
        table.n_columns(),
        args.common.input.display()
    );
    let req = LineChartRequest {
        chart: chart_request(&args.common, &table)?,
        squeeze: args.squeeze,
    };
    let rendered = viz::render_line_chart_detailed(&req)?;
    if let Some(p) = &args.common.dump_labels {
        dump_labels(p, &rendered)?;
    }
    println!("{}", rendered.path);
    Ok(())
}

fn cmd_bar(args: CommonArgs) -> Result<()> {
    let table = data::load_csv(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    info!(
        "loaded {} rows x {} series from {}",
        table.n_rows(),
        table.n_columns(),
        args.input.display()
    );
    let req = BarChartRequest {
        chart: chart_request(&args, &table)?,
    };
    let rendered = viz::render_bar_chart_detailed(&req)?;
    if let Some(p) = &args.dump_labels {
        dump_labels(p, &rendered)?;
    }
    println!("{}", rendered.path);
    Ok(())
}
