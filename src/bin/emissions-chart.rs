use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use emissions_chart::LegendRegistry;
use emissions_chart::tooltip::{LineKind, render_tooltip};
use emissions_chart::viz::{ChartOptions, LegendMode};
use emissions_chart::{chart, storage, viz};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "emissions-chart",
    version,
    about = "Render the Australian GHG emissions chart and resolve its tooltips"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart to an SVG or PNG file.
    Render(RenderArgs),
    /// Print the tooltip shown when hovering a year.
    Tooltip(TooltipArgs),
    /// Print the legend, grouped by category.
    Legend(LegendArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LegendPlacement {
    Right,
    Bottom,
    Hidden,
}

impl From<LegendPlacement> for LegendMode {
    fn from(p: LegendPlacement) -> Self {
        match p {
            LegendPlacement::Right => LegendMode::Right,
            LegendPlacement::Bottom => LegendMode::Bottom,
            LegendPlacement::Hidden => LegendMode::Hidden,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Dataset file (.csv or .json).
    #[arg(short, long)]
    data: PathBuf,
    /// Output image (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// Width of the image (default 1200).
    #[arg(long, default_value_t = 1200)]
    width: u32,
    /// Height of the image (default 700).
    #[arg(long, default_value_t = 700)]
    height: u32,
    /// Chart title; pass an empty string to omit it.
    #[arg(long, default_value = chart::DEFAULT_TITLE)]
    title: String,
    /// Draw the hover cursor and tooltip for this year.
    #[arg(long)]
    hover: Option<i32>,
    /// Legend registry JSON replacing the built-in series table.
    #[arg(long)]
    legend: Option<PathBuf>,
    /// Locale for numbers (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Where to draw the legend panel.
    #[arg(long, value_enum, default_value_t = LegendPlacement::Right)]
    legend_placement: LegendPlacement,
}

#[derive(Args, Debug)]
struct TooltipArgs {
    /// Dataset file (.csv or .json).
    #[arg(short, long)]
    data: PathBuf,
    /// Hovered year.
    #[arg(short, long)]
    year: i32,
    /// Legend registry JSON replacing the built-in series table.
    #[arg(long)]
    legend: Option<PathBuf>,
    /// Print the resolved tooltip as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Locale for numbers (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct LegendArgs {
    /// Legend registry JSON replacing the built-in series table.
    #[arg(long)]
    legend: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Tooltip(args) => cmd_tooltip(args),
        Command::Legend(args) => cmd_legend(args),
    }
}

/// Either the user's registry file or the built-in table.
fn with_registry<T>(
    path: Option<&Path>,
    f: impl FnOnce(&LegendRegistry) -> Result<T>,
) -> Result<T> {
    match path {
        Some(p) => f(&storage::load_registry(p)?),
        None => f(LegendRegistry::australia()),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let records = storage::load_records(&args.data)?;
    let options = ChartOptions {
        width: args.width,
        height: args.height,
        title: args.title,
        locale: args.locale,
        legend: args.legend_placement.into(),
        hover: args.hover,
    };
    with_registry(args.legend.as_deref(), |registry| {
        viz::plot_emissions(&records, registry, &args.out, &options)
    })?;
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}

fn cmd_tooltip(args: TooltipArgs) -> Result<()> {
    let records = storage::load_records(&args.data)?;
    let payload = chart::payload_for_year(&records, args.year);
    let fragment = with_registry(args.legend.as_deref(), |registry| {
        Ok(render_tooltip(
            true,
            &payload,
            args.year,
            registry,
            &records,
        ))
    })?;
    let Some(fragment) = fragment else {
        bail!("no data for year {}", args.year);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&fragment)?);
        return Ok(());
    }
    for line in fragment.lines(&args.locale) {
        let indent = match line.kind {
            LineKind::Title => "",
            LineKind::Section => "  ",
            LineKind::Heading => "    ",
            LineKind::Item => "      ",
        };
        println!("{}{}", indent, line.text);
    }
    Ok(())
}

fn cmd_legend(args: LegendArgs) -> Result<()> {
    with_registry(args.legend.as_deref(), |registry| {
        for group in registry.groups() {
            println!("{}", group.category.label().to_uppercase());
            for d in &group.items {
                let hint = d.description.as_deref().unwrap_or("");
                println!(
                    "  {:<20} {:<8} {:<8} {}",
                    d.name,
                    d.icon_style.as_str(),
                    d.color,
                    hint
                );
            }
        }
        Ok(())
    })
}
