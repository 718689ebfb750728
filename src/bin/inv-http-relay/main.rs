mod logging;
mod reqwest_wrapper;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use inv2http::collector::HttpCollector;
use inv2http::config::Config;
use inv2http::inverter::Inverter;
use inv2http::supervisor::Supervisor;
use log::{error, info};
use reqwest_wrapper::ReqwestWrapper;

fn config_path() -> anyhow::Result<PathBuf> {
    // load configuration from current working dir, or relative to executable if former location fails
    let mut path = std::env::current_dir().context("can't retrieve current dir")?;
    path.push("config.toml");
    if !path.exists() {
        info!("{} does not exist. Trying relative path", path.display());
        path = std::env::current_exe().context("Unable to get current executable path")?;
        path.pop();
        path.push("config.toml");
    }
    Ok(path)
}

/// Resolves on Ctrl+C, or on SIGTERM where there is one.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let terminate = terminate();
        info!("Waiting for Ctrl+C or SIGTERM");
        tokio::select! {
            _ = ctrl_c() => {},
            _ = terminate => {},
        }
    }

    #[cfg(not(unix))]
    {
        info!("Waiting for Ctrl+C");
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}

// registers the handler before the returned future is first polled
#[cfg(unix)]
fn terminate() -> impl std::future::Future<Output = ()> {
    use tokio::signal::unix::{signal, SignalKind};

    let term = signal(SignalKind::terminate());
    async move {
        match term {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_logger();
    info!("Running revision: {}", env!("GIT_HASH"));
    if std::env::args().len() > 1 {
        error!("Arguments passed. Tool is configured by config.toml in its path");
    }

    let path = config_path()?;
    info!("loading configuration from {}", path.display());
    let config = Config::load(&path);
    if !config.is_valid() {
        bail!("configuration incomplete: inverter host and collector url are required");
    }

    info!(
        "inverter: {}:{}, collector: {}",
        config.inverter.host, config.inverter.port, config.collector.url
    );
    info!(
        "using update interval of {:.2}s",
        config.poll_interval as f64 / 1000.
    );

    let inverter = Inverter::new(&config.inverter);
    let collector = HttpCollector::<ReqwestWrapper>::new(&config.collector)?;
    let supervisor = Supervisor::start(
        inverter,
        collector,
        Duration::from_millis(config.poll_interval),
    )?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("unable to build signal runtime")?;
    runtime.block_on(shutdown_signal());

    supervisor.stop();
    supervisor.join();
    Ok(())
}
