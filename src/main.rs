//! shortcuts-host: in-process launcher shortcut host
//!
//! Wires a simulated native host to the coordinator:
//! - an optional cold-launch action from `SHORTCUTS_COLD_LAUNCH`
//! - one shortcut tap per line on stdin (`clear` removes all shortcuts)
//! - every delivered action is logged until SIGINT/SIGTERM

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use launcher_shortcuts::config::Config;
use launcher_shortcuts::lifecycle::ShutdownSignal;
use launcher_shortcuts::native::android::{AndroidShortcutHost, DynamicShortcut, Intent};
use launcher_shortcuts::native::ios::{IosShortcutHost, LaunchOptions, ShortcutItem};
use launcher_shortcuts::native::InMemoryShortcutService;
use launcher_shortcuts::relay::{self, Platform, RelaySender, ShortcutHost};
use launcher_shortcuts::{ShortcutCoordinator, ShortcutDescriptor};

type AndroidHost = AndroidShortcutHost<InMemoryShortcutService<DynamicShortcut>>;
type IosHost = IosShortcutHost<InMemoryShortcutService<ShortcutItem>>;

/// Native side of the simulated process
enum NativeHost {
    Android(Arc<AndroidHost>),
    Ios(Arc<IosHost>),
}

impl NativeHost {
    fn launch(platform: Platform, sink: RelaySender, cold_launch: Option<&str>) -> Self {
        let sink = Arc::new(sink);
        match platform {
            Platform::Android => {
                let host = AndroidHost::new(sink, InMemoryShortcutService::new());
                let intent = cold_launch.map_or_else(Intent::main, Intent::for_shortcut);
                host.gate().on_launch_intent(&intent);
                Self::Android(Arc::new(host))
            }
            Platform::Ios => {
                let host = IosHost::new(sink, InMemoryShortcutService::new());
                host.gate().did_finish_launching(&LaunchOptions {
                    shortcut_item: cold_launch.map(|id| ShortcutItem::new(id, id)),
                });
                Self::Ios(Arc::new(host))
            }
        }
    }

    fn host(&self) -> Arc<dyn ShortcutHost> {
        match self {
            Self::Android(host) => host.clone(),
            Self::Ios(host) => host.clone(),
        }
    }

    fn tap(&self, id: &str) {
        match self {
            Self::Android(host) => {
                host.gate().on_new_intent(&Intent::for_shortcut(id));
            }
            Self::Ios(host) => {
                host.gate().perform_action(&ShortcutItem::new(id, id));
            }
        }
    }
}

fn default_shortcuts() -> Vec<ShortcutDescriptor> {
    vec![
        ShortcutDescriptor::new("compose", "New message").with_icon("ic_compose"),
        ShortcutDescriptor::new("search", "Search").with_secondary_label("Search everything"),
        ShortcutDescriptor::new("settings", "Settings"),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "shortcuts-host starting"
    );

    let config = Config::load()?;
    info!(platform = %config.platform, cold_launch = ?config.cold_launch_action, "configuration loaded");

    let shutdown = ShutdownSignal::new();

    let (relay_tx, relay_rx) = relay::channel();
    let native = NativeHost::launch(
        config.platform,
        relay_tx,
        config.cold_launch_action.as_deref(),
    );

    let coordinator =
        ShortcutCoordinator::new(native.host(), relay_rx, config.coordinator_options());

    if let Err(e) = coordinator.initialize().await {
        error!(?e, "shortcuts unavailable");
        return Ok(());
    }

    if let Err(e) = coordinator.register_actions(default_shortcuts()).await {
        warn!(?e, "failed to register shortcuts");
    }

    match coordinator.await_cold_start_action().await {
        Ok(Some(action)) => info!(%action, "cold start from shortcut"),
        Ok(None) => info!("regular launch"),
        Err(e) => warn!(?e, "cold start query failed"),
    }

    let mut events = coordinator.event_stream()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("host ready, enter a shortcut id per line");

    loop {
        tokio::select! {
            action = events.recv() => {
                match action {
                    Some(action) => info!(%action, "shortcut activated"),
                    None => break,
                }
            }

            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line == "clear" {
                            if let Err(e) = coordinator.clear_actions().await {
                                warn!(?e, "failed to clear shortcuts");
                            }
                        } else if !line.is_empty() {
                            native.tap(line);
                        }
                    }
                    Ok(None) => {
                        info!("stdin closed");
                        break;
                    }
                    Err(e) => {
                        error!(?e, "failed to read stdin");
                        break;
                    }
                }
            }

            result = shutdown.wait() => {
                if let Err(e) = result {
                    error!(?e, "failed to install signal handlers");
                }
                info!("shutdown signal received");
                break;
            }
        }
    }

    info!("shutting down...");
    drop(events);
    coordinator.shutdown();
    info!("shortcuts-host stopped");

    Ok(())
}
