use anyhow::Context;
use clap::Parser;

use fixpoint_app::{
    config::{Args, Settings},
    headless, logging, routes,
};
use fixpoint_channel::{Publisher, result_channel};
use fixpoint_plot::Poller;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let settings = Settings::resolve(&args)?;
    tracing::debug!(?settings, "resolved settings");

    let (publisher, subscriber) = result_channel();
    let poller = Poller::new(subscriber).with_samples(settings.samples);

    if settings.headless {
        run_headless(&settings, publisher, poller)
    } else {
        run_windowed(&settings, publisher, poller)
    }
}

/// Serves and polls on one runtime until interrupted.
fn run_headless(settings: &Settings, publisher: Publisher, poller: Poller) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    runtime.block_on(async {
        let (_, server) = routes::bind(settings.addr, publisher)
            .with_context(|| format!("failed to bind {}", settings.addr))?;
        tokio::spawn(server);

        tokio::select! {
            () = headless::run(poller, settings.poll_interval, headless::LogRenderer) => {}
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for interrupt")?;
                tracing::info!("shutting down");
            }
        }

        Ok(())
    })
}

/// Serves on a background thread while the window owns the main thread.
#[cfg(feature = "gui")]
fn run_windowed(settings: &Settings, publisher: Publisher, poller: Poller) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let (_, server) = {
        let _guard = runtime.enter();
        routes::bind(settings.addr, publisher.clone())
            .with_context(|| format!("failed to bind {}", settings.addr))?
    };

    std::thread::Builder::new()
        .name("http".to_owned())
        .spawn(move || runtime.block_on(server))
        .context("failed to spawn server thread")?;

    fixpoint_app::viewer::run(publisher, poller, settings.poll_interval)
        .map_err(|error| anyhow::anyhow!("viewer failed: {error}"))
}

#[cfg(not(feature = "gui"))]
fn run_windowed(settings: &Settings, publisher: Publisher, poller: Poller) -> anyhow::Result<()> {
    tracing::warn!("built without the `gui` feature, logging results instead");
    run_headless(settings, publisher, poller)
}
