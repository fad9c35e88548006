//! parley - console front end for the command engine.
//!
//! Reads events from stdin (JSON-encoded events or plain chat lines) and
//! writes replies to stdout.

use parley::caps::PermissionGate;
use parley::components::ComponentRouter;
use parley::config::{self, Config};
use parley::handlers::builtin_commands;
use parley::handlers::core::Dispatcher;
use parley::l10n::{DirectorySource, LocalizationStore};
use parley::network::{ConsoleTransport, Gateway, OpenCapabilities};
use parley::state::{AdminRoster, BotState, Plugins};
use parley_proto::UserId;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(&config_path)?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        path = %config_path,
        prefix = %config.bot.prefix,
        default_locale = %config.bot.default_locale,
        "Starting parley"
    );

    let store = LocalizationStore::load(
        config.bot.default_locale.clone(),
        &DirectorySource::new(&config.locales.path),
    )?;
    for problem in store.validate() {
        warn!(error = %problem, code = problem.error_code(), "Localization problem");
    }

    let tree = builtin_commands().build()?;
    let plugins = Plugins::new(
        Arc::new(store),
        Arc::new(tree),
        Arc::new(ComponentRouter::new()),
    );

    let gate = PermissionGate::new(
        UserId::from(config.bot.user_id.as_str()),
        Arc::new(OpenCapabilities::new()),
    );
    let admins = AdminRoster::new(config.bot.admins.iter().map(|id| UserId::from(id.as_str())));
    let state = Arc::new(BotState::new(
        config.bot.prefix.clone(),
        Arc::new(ConsoleTransport::new(tokio::io::stdout())),
        gate,
        admins,
        plugins,
    ));

    let dispatcher = Arc::new(Dispatcher::new(state));
    let gateway = Gateway::new(
        BufReader::new(tokio::io::stdin()),
        dispatcher,
        config.bot.console_user.as_str(),
        config.bot.console_channel.as_str(),
    );

    tokio::select! {
        result = gateway.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    info!("Shutdown complete");
    Ok(())
}
