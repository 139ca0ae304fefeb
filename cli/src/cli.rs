use std::path::PathBuf;

/// Average student loan balance choropleth
#[derive(clap::Parser, Debug)]
#[command(name = "loanmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON map configuration; keys not given keep their defaults
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Dataset CSV (path or URL), overrides the configuration
    #[arg(long, global = true)]
    pub data: Option<String>,

    /// State boundary TopoJSON (path or URL), overrides the configuration
    #[arg(long, global = true)]
    pub states: Option<String>,

    /// County boundary TopoJSON (path or URL), overrides the configuration
    #[arg(long, global = true)]
    pub counties: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render the national map or one state's counties to SVG
    Render(RenderArgs),

    /// List the race categories in selector order
    Categories,

    /// Print state means, or county values for one state
    Summary(SummaryArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Race category, defaults to "Pooled"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Two-digit state FIPS code to drill down into, e.g. 06
    #[arg(short, long)]
    pub state: Option<String>,

    /// Output SVG file, defaults to "./map.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Race category, defaults to "Pooled"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Two-digit state FIPS code; lists that state's counties
    #[arg(short, long)]
    pub state: Option<String>,
}
