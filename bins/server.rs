use std::process::ExitCode;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use server::errors::StartupError;
use tracing::{error, info};
use uuid::Uuid;

fn init_tracing(cfg: &AppConfig) {
    let format = cfg.logging.format.as_deref().map(LogFormat::parse).unwrap_or(LogFormat::Compact);
    init_logging(format, cfg.logging.level.as_deref());
    info!(service = "server", event = "logger_init", ?format, "tracing subscriber initialized");
}

fn main() -> ExitCode {
    // .env must be loaded before the config reads the environment
    dotenv().ok();

    let config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            let err = StartupError::InvalidConfig(format!("{e:#}"));
            error!(service = "server", event = "config_invalid", error = %err, "refusing to start");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = config.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        environment = %config.environment,
        threads = worker_threads.unwrap_or_default(),
        "server service starting"
    );

    match rt.block_on(server::run(config)) {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "server", event = "run_failed", %service_id, pid, error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
