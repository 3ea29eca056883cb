use crate::auth::load_token;
use crate::catalog::AssetCatalog;
use crate::client::{ApiClient, ReqwestTransport, Transport};
use crate::config::ResolvedConfig;
use crate::errors::AppResult;
use crate::models::SaveOutcome;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::{info, warn};

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// What a single invocation does once the catalog is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Save every configured format of every survey (the default)
    SaveAll,
    /// Log every asset in the catalog
    List,
    /// Save one export of the asset with this uid
    Uid { uid: String, format: String },
    /// Save one export of the asset at this catalog position
    Index { index: usize, format: String },
}

pub fn build_command() -> Command<'static> {
    let format_arg = Arg::new("format")
        .short('f')
        .long("format")
        .help("Export format: 'csv' or 'xlsx'")
        .default_value("csv")
        .action(ArgAction::Set);

    Command::new("kobo-export")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .after_help("Without a subcommand every survey is saved as csv and xlsx into data/.\nThe API token is read from token.txt.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a TOML config file")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .subcommand(Command::new("list").about("List every asset owned by the account"))
        .subcommand(
            Command::new("uid")
                .about("Save one export of the asset with the given uid")
                .arg(
                    Arg::new("uid")
                        .help("Asset uid")
                        .required(true)
                        .action(ArgAction::Set),
                )
                .arg(format_arg.clone()),
        )
        .subcommand(
            Command::new("index")
                .about("Save one export of the asset at the given catalog position")
                .arg(
                    Arg::new("index")
                        .help("Zero-based position in the asset listing")
                        .required(true)
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(format_arg),
        )
}

/// Maps parsed arguments to the [`Action`] to run.
pub fn parse_action(matches: &ArgMatches) -> Action {
    let format_of = |sub: &ArgMatches| {
        sub.get_one::<String>("format")
            .cloned()
            .unwrap_or_else(|| "csv".to_string())
    };

    match matches.subcommand() {
        Some(("list", _)) => Action::List,
        Some(("uid", sub)) => Action::Uid {
            uid: sub
                .get_one::<String>("uid")
                .cloned()
                .unwrap_or_default(),
            format: format_of(sub),
        },
        Some(("index", sub)) => Action::Index {
            index: sub.get_one::<usize>("index").copied().unwrap_or_default(),
            format: format_of(sub),
        },
        _ => Action::SaveAll,
    }
}

/// Loads the TOML config named by `--config`, or the defaults when absent.
pub fn load_config(matches: &ArgMatches) -> AppResult<ResolvedConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            ResolvedConfig::from_toml_file(path)
        }
        None => Ok(ResolvedConfig::default()),
    }
}

/// Parses command-line arguments and runs the requested action.
///
/// With no arguments this loads `token.txt`, fetches the whole asset catalog and saves
/// every survey as csv and xlsx into `data/`.
///
/// # Errors
///
/// Returns an error if the config or token cannot be loaded, or if the catalog or an
/// export fails fatally. Unavailable exports and unknown uids are only logged.
pub async fn cli() -> AppResult<()> {
    let matches = build_command().get_matches();
    let config = load_config(&matches)?;
    let action = parse_action(&matches);

    let auth = load_token(&config.token_file).await?;
    let client = ApiClient::new(ReqwestTransport::default(), auth, config.api_url.clone());

    run_action(client, &config, &action).await
}

/// Fetches the catalog through `client` and executes `action` against it.
pub async fn run_action<T: Transport>(
    client: ApiClient<T>,
    config: &ResolvedConfig,
    action: &Action,
) -> AppResult<()> {
    let catalog = AssetCatalog::fetch(client, config.output_dir.clone()).await?;
    info!(
        assets = catalog.len(),
        surveys = catalog.surveys().len(),
        "Catalog fetched"
    );

    match action {
        Action::SaveAll => {
            let report = catalog.save_surveys_as(&config.formats).await?;
            if !report.skipped.is_empty() {
                warn!(
                    skipped = report.skipped.len(),
                    "Some exports could not be retrieved"
                );
            }
        }
        Action::List => print_catalog(&catalog),
        Action::Uid { uid, format } => {
            log_outcome(&catalog.save_uid(uid, format).await?);
        }
        Action::Index { index, format } => {
            log_outcome(&catalog.save_asset(*index, format).await?);
        }
    }

    Ok(())
}

fn print_catalog<T: Transport>(catalog: &AssetCatalog<T>) {
    for (index, asset) in catalog.assets().iter().enumerate() {
        info!(
            index = index,
            uid = %asset.uid,
            asset_type = %asset.asset_type,
            survey = asset.is_survey(),
            name = %asset.name,
            "Asset"
        );
    }
}

fn log_outcome(outcome: &SaveOutcome) {
    match outcome {
        SaveOutcome::Saved(path) => info!(file = %path.display(), "Export saved"),
        SaveOutcome::Skipped(reason) => warn!(reason = %reason, "No export saved"),
    }
}
