use crate::infra::{load_service, parse_score};
use crate::report;
use crate::server;
use casn_rank::config::{AppConfig, DataConfig};
use casn_rank::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "casn-rank",
    about = "Rank CASN 2024 exam scores against published results",
    version
)]
struct Cli {
    /// Directory holding the result recap and reference lists
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank a score within one job position and province
    Rank(RankArgs),
    /// Summarise SKD scores across provinces and job positions
    Distribution(DistributionArgs),
    /// List valid provinces and job positions
    Reference,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Job-position label, e.g. "ANALIS PERKARA PERADILAN"
    #[arg(long)]
    pub(crate) jabatan: String,
    #[arg(long)]
    pub(crate) province: String,
    /// Final score (nilai akhir) to rank
    #[arg(long, value_parser = parse_score, allow_negative_numbers = true)]
    pub(crate) score: f64,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DistributionArgs {
    /// Province to include; repeat for several, omit for all
    #[arg(long = "province")]
    pub(crate) provinces: Vec<String>,
    /// Job-position label to include; repeat for several, omit for all
    #[arg(long)]
    pub(crate) jabatan: Vec<String>,
    /// Also print the SKD histogram for this province
    #[arg(long)]
    pub(crate) detail: Option<String>,
    /// Histogram bins for the province detail (5-30)
    #[arg(long)]
    pub(crate) bins: Option<usize>,
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, cli.data_dir).await,
        Command::Rank(args) => run_rank(args, data_config(cli.data_dir)?),
        Command::Distribution(args) => run_distribution(args, data_config(cli.data_dir)?),
        Command::Reference => run_reference(data_config(cli.data_dir)?),
    }
}

fn data_config(data_dir: Option<PathBuf>) -> Result<DataConfig, AppError> {
    let mut data = AppConfig::load()?.data;
    if let Some(directory) = data_dir {
        data.directory = directory;
    }
    Ok(data)
}

fn run_rank(args: RankArgs, data: DataConfig) -> Result<(), AppError> {
    let service = load_service(&data)?;
    let outcome = service.rank_by_label(&args.jabatan, &args.province, args.score)?;

    if args.json {
        println!("{}", to_json(&outcome)?);
    } else {
        print!("{}", report::RankReport(&outcome));
    }
    Ok(())
}

fn run_distribution(args: DistributionArgs, data: DataConfig) -> Result<(), AppError> {
    let service = load_service(&data)?;
    let filter = service.filter_from_labels(args.provinces, &args.jabatan);
    let outcome = service.distribution(&filter);
    let detail = args
        .detail
        .as_deref()
        .map(|province| service.province_detail(&filter, province, args.bins));

    if args.json {
        let payload = serde_json::json!({ "distribution": outcome, "province_detail": detail });
        println!("{}", to_json(&payload)?);
        return Ok(());
    }

    print!("{}", report::DistributionView(&outcome));
    if let (Some(province), Some(detail)) = (args.detail.as_deref(), detail.as_ref()) {
        print!("{}", report::ProvinceDetailView { province, outcome: detail });
    }
    Ok(())
}

fn run_reference(data: DataConfig) -> Result<(), AppError> {
    let service = load_service(&data)?;
    print!("{}", report::ReferenceListing(&service.reference()));
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}
