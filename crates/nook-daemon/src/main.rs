//! nookd: the notes storage daemon.
//!
//! Single OS process running a Tokio async runtime. Front ends talk to it
//! with line-delimited JSON over a Unix socket in the data directory.

mod config;
mod rpc;

use std::sync::Arc;

use nook_service::{Command, EventBus, NotesService};
use tracing::{error, info};

use crate::config::DaemonConfig;
use crate::rpc::RpcServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = DaemonConfig::load()?;

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("nook={}", config.advanced.log_level).parse()?),
        )
        .init();

    info!("nook daemon starting");

    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir)?;

    // 3. Open database
    let db_path = data_dir.join("nook.db");
    let conn = nook_db::open(&db_path, config.storage.busy_timeout_ms)?;

    // 4. Build the service and make sure a tab exists
    let events = EventBus::new(config.events.capacity);
    let service = Arc::new(NotesService::new(conn, config.service_options(), events));
    let init = service.execute(Command::Init).await?;
    info!(device = %init["deviceId"], default_tab = %init["defaultTabId"], "storage ready");

    // 5. Start IPC server
    let socket_path = data_dir.join("nook.sock");
    let rpc_server = RpcServer::new(service, socket_path.clone());

    tokio::select! {
        result = rpc_server.run() => {
            if let Err(e) = result {
                error!("command server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
        }
    }

    // Clean up socket file
    let _ = std::fs::remove_file(&socket_path);

    info!("nook daemon stopped");
    Ok(())
}
