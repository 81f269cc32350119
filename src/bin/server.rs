use std::env;
use std::error::Error;
use std::sync::{Arc, Mutex};
use log::{debug, info, warn};
use tokio::signal;
use tokio::sync::broadcast;
use attendance_ledger::registrar::registrar_facade::RegistrarFacade;
use attendance_ledger::rest::http_server::spawn_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let db_path = env::var("ATTENDANCE_DB").unwrap_or_else(|_| String::from(":memory:"));
    let port = env::var("ATTENDANCE_PORT").ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(3000);

    let registrar = RegistrarFacade::new(db_path.as_str())?;
    let registrar = Arc::new(Mutex::new(registrar));

    let (tx, rx_http_server) = broadcast::channel(1);

    let http_server_handle = spawn_http_server(&registrar, rx_http_server, port);
    tokio::pin!(http_server_handle);

    loop {
        tokio::select! {
            _ = &mut http_server_handle => {
                info!("HTTP Server terminated");
                break;
            }
            s = signal::ctrl_c() => {
                match s {
                    Ok(()) => {
                        debug!("Termination signal received");
                        tx.send(())?;
                    },
                    Err(err) => {
                        warn!("Unable to listen for shutdown signal: {}", err);
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
