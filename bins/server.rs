use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and LOG_FORMAT apply to the subscriber
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_default();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "products",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match configs::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "products", event = "config_invalid", error = %e, "config validation error");
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "products", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "products",
        event = "start",
        %service_id,
        pid,
        version,
        port = cfg.server.port,
        "products service starting"
    );

    rt.block_on(async move {
        match server::run(&cfg).await {
            Ok(()) => {
                info!(service = "products", event = "stop", %service_id, pid, "products service stopped");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "products", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
