use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::environment::get_env_var_or;

const DEFAULT_CONSOLE_FILTER: &str = "info,reconcile=info,db_query=warn,seed_output=info,sqlx=warn";
const DEFAULT_LOG_DIR: &str = "logs";

pub fn configure_logging() {
    // RUST_LOG wins over the built-in console filter when set
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));

    // stdout carries command output only (preview JSON, normalize reports)
    let console_log = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);

    // File log keeps the reconciliation details the console hides
    let log_dir = get_env_var_or("SEED_LOG_DIR", DEFAULT_LOG_DIR);
    let file_appender = rolling::daily(log_dir, "country_seed.log");
    let file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(EnvFilter::new("reconcile=debug,info,sqlx=info"));

    tracing_subscriber::Registry::default()
        .with(console_log)
        .with(file_log)
        .init();
}
