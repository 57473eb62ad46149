//! Shortcut event coordinator
//!
//! Owns the application-side pending slot and the listener registry.
//! Actions reach it through [`ActivationHandler`] and leave it through
//! [`ShortcutStream`] or [`ShortcutCoordinator::await_cold_start_action`].
//! Every listener has its own unbounded queue, so a slow listener never
//! loses actions.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::sync::{mpsc, watch, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::CoordinatorError;
use crate::events::ShortcutStream;
use crate::relay::{
    validate_batch, HostRequest, RelayReceiver, ShortcutDescriptor, ShortcutHost,
};

use super::filter::ActionFilter;
use super::handlers::ActivationHandler;

/// Construction options for [`ShortcutCoordinator`]
#[derive(Debug, Clone, Default)]
pub struct CoordinatorOptions {
    /// Denylist for incoming action identifiers
    pub filter: ActionFilter,
}

/// Progress of the one-shot initialization
#[derive(Debug, Clone, PartialEq, Eq)]
enum InitStatus {
    Pending,
    Done(Result<(), CoordinatorError>),
    Closed,
}

#[derive(Debug)]
struct Listener {
    id: u64,
    tx: mpsc::UnboundedSender<String>,
}

#[derive(Debug, Default)]
struct CoordinatorState {
    closed: bool,
    listeners: Vec<Listener>,
    next_listener_id: u64,
    has_listener: bool,
    pending: Option<String>,
    ready_signal_sent: bool,
    relay_task: Option<JoinHandle<()>>,
}

impl CoordinatorState {
    /// Forget listeners whose stream is gone
    fn prune(&mut self) {
        self.listeners.retain(|listener| !listener.tx.is_closed());
        self.has_listener = !self.listeners.is_empty();
    }

    /// Send `action` to every listener.
    ///
    /// Gives the action back when no listener accepted it.
    fn emit(&mut self, action: String) -> Result<(), String> {
        let mut delivered = false;
        self.listeners.retain(|listener| {
            let accepted = listener.tx.send(action.clone()).is_ok();
            delivered |= accepted;
            accepted
        });
        self.has_listener = !self.listeners.is_empty();

        if delivered {
            Ok(())
        } else {
            Err(action)
        }
    }

    fn park(&mut self, action: String) {
        if let Some(previous) = self.pending.replace(action) {
            debug!(%previous, "pending action overwritten");
        } else {
            debug!("action pending until a listener attaches");
        }
    }
}

struct Inner {
    host: Arc<dyn ShortcutHost>,
    filter: ActionFilter,
    state: Mutex<CoordinatorState>,
    inbound: Mutex<Option<RelayReceiver>>,
    init: OnceCell<Result<(), CoordinatorError>>,
    init_status: watch::Sender<InitStatus>,
}

/// Application-facing shortcut coordinator
///
/// Cloning yields another handle to the same coordinator.
#[derive(Clone)]
pub struct ShortcutCoordinator {
    inner: Arc<Inner>,
}

/// Non-owning handle held by activation handlers and streams
#[derive(Clone)]
pub struct WeakCoordinator {
    inner: Weak<Inner>,
}

impl WeakCoordinator {
    pub fn upgrade(&self) -> Option<ShortcutCoordinator> {
        self.inner.upgrade().map(|inner| ShortcutCoordinator { inner })
    }
}

impl ShortcutCoordinator {
    /// Create a coordinator talking to `host` and receiving from `inbound`
    pub fn new(
        host: Arc<dyn ShortcutHost>,
        inbound: RelayReceiver,
        options: CoordinatorOptions,
    ) -> Self {
        let (init_status, _) = watch::channel(InitStatus::Pending);

        Self {
            inner: Arc::new(Inner {
                host,
                filter: options.filter,
                state: Mutex::new(CoordinatorState::default()),
                inbound: Mutex::new(Some(inbound)),
                init: OnceCell::new(),
                init_status,
            }),
        }
    }

    pub fn downgrade(&self) -> WeakCoordinator {
        WeakCoordinator {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Handler that feeds actions from the given platform into this coordinator
    pub fn activation_handler(&self) -> ActivationHandler {
        ActivationHandler::for_platform(self.inner.host.platform(), self.downgrade())
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.inner.init.get(), Some(Ok(())))
    }

    pub fn ready_signal_sent(&self) -> bool {
        self.lock().ready_signal_sent
    }

    /// Peek at the pending action without consuming it
    pub fn pending_action(&self) -> Option<String> {
        self.lock().pending.clone()
    }

    /// Number of attached stream listeners
    pub fn listener_count(&self) -> usize {
        self.lock()
            .listeners
            .iter()
            .filter(|listener| !listener.tx.is_closed())
            .count()
    }

    /// Connect to the native host and collect the cold-launch action.
    ///
    /// Runs the platform calls once; concurrent and later callers share
    /// the outcome of the first run.
    pub async fn initialize(&self) -> Result<(), CoordinatorError> {
        if self.is_closed() {
            return Err(CoordinatorError::Closed);
        }

        self.inner
            .init
            .get_or_init(|| async {
                let outcome = self.run_setup().await;
                match &outcome {
                    Ok(()) => info!("shortcut coordinator initialized"),
                    Err(e) => warn!(?e, "shortcut coordinator initialization failed"),
                }
                self.inner.init_status.send_if_modified(|status| {
                    if *status == InitStatus::Pending {
                        *status = InitStatus::Done(outcome.clone());
                        true
                    } else {
                        false
                    }
                });
                outcome
            })
            .await
            .clone()
    }

    async fn run_setup(&self) -> Result<(), CoordinatorError> {
        // Become the target of native-originated calls
        let handler = self.activation_handler();
        let inbound = self
            .inner
            .inbound
            .lock()
            .map_err(|_| CoordinatorError::initialization("inbound relay poisoned"))?
            .take();

        let outcome = self.signal_ready_and_query().await;

        // Actions released by the ready signal are already queued on the
        // relay; ingest them before initialization resolves
        if let Some(mut receiver) = inbound {
            let drained = receiver.drain(&handler);
            debug!(drained, "inbound relay drained");

            let task = tokio::spawn(receiver.run(Arc::new(handler)));
            let mut state = self.lock();
            if state.closed {
                task.abort();
            } else {
                state.relay_task = Some(task);
            }
        }

        outcome
    }

    async fn signal_ready_and_query(&self) -> Result<(), CoordinatorError> {
        let host = Arc::clone(&self.inner.host);
        let platform = host.platform();

        host.dispatch(HostRequest::SetConsumerReady)
            .await
            .map_err(CoordinatorError::initialization)?;
        self.lock().ready_signal_sent = true;
        debug!(%platform, "consumer ready signal sent");

        if platform.supports_launch_query() {
            let launch = host
                .dispatch(HostRequest::GetLaunchAction)
                .await
                .map_err(CoordinatorError::initialization)?;

            if let Some(action) = launch.filter(|a| !a.is_empty()) {
                if self.inner.filter.is_denied(&action) {
                    info!(%action, "ignoring system launch action");
                } else {
                    debug!(%action, "cold launch action pending");
                    self.lock().pending = Some(action);
                }
            }
        }

        Ok(())
    }

    /// Wait for initialization, then take the pending action
    pub async fn await_cold_start_action(&self) -> Result<Option<String>, CoordinatorError> {
        let mut status_rx = self.inner.init_status.subscribe();
        let status = status_rx
            .wait_for(|status| *status != InitStatus::Pending)
            .await
            .map_err(|_| CoordinatorError::Closed)?
            .clone();

        match status {
            InitStatus::Done(Ok(())) => {
                let action = self.lock().pending.take();
                debug!(?action, "cold start action taken");
                Ok(action)
            }
            InitStatus::Done(Err(e)) => Err(e),
            InitStatus::Pending | InitStatus::Closed => Err(CoordinatorError::Closed),
        }
    }

    /// Attach a new listener.
    ///
    /// The first listener to attach receives the pending action, if any.
    pub fn event_stream(&self) -> Result<ShortcutStream, CoordinatorError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut state = self.lock();
            if state.closed {
                return Err(CoordinatorError::Closed);
            }
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.push(Listener { id, tx });
            id
        };

        let weak = self.downgrade();
        let stream = ShortcutStream::new(
            rx,
            Box::new(move || {
                if let Some(coordinator) = weak.upgrade() {
                    coordinator.detach_listener(id);
                }
            }),
        );

        self.notify_listeners_changed();
        Ok(stream)
    }

    fn detach_listener(&self, id: u64) {
        self.lock().listeners.retain(|listener| listener.id != id);
        self.notify_listeners_changed();
    }

    /// Re-evaluate the listener count and flush the pending action on the
    /// first attach.
    pub fn notify_listeners_changed(&self) {
        let mut state = self.lock();
        if state.closed {
            return;
        }

        let had_listener = state.has_listener;
        state.prune();

        if !had_listener && state.has_listener {
            if let Some(action) = state.pending.take() {
                debug!(%action, "replaying pending action to first listener");
                if let Err(action) = state.emit(action) {
                    state.pending = Some(action);
                }
            }
        }
    }

    /// Accept one action delivered from the native side
    pub(crate) fn ingest(&self, action: String) {
        if self.inner.filter.is_denied(&action) {
            info!(%action, "ignoring system action");
            return;
        }

        let mut state = self.lock();
        if state.closed {
            debug!(%action, "coordinator closed, dropping action");
            return;
        }

        state.prune();
        if state.listeners.is_empty() {
            state.park(action);
            return;
        }

        debug!(%action, "emitting action");
        if let Err(action) = state.emit(action) {
            // Every listener went away after the check above
            state.park(action);
        }
    }

    /// Replace the registered shortcut list; an empty list is a no-op
    pub async fn register_actions(
        &self,
        descriptors: Vec<ShortcutDescriptor>,
    ) -> Result<(), CoordinatorError> {
        if self.is_closed() {
            return Err(CoordinatorError::Closed);
        }
        if descriptors.is_empty() {
            debug!("no shortcuts to register");
            return Ok(());
        }

        validate_batch(&descriptors).map_err(CoordinatorError::registration)?;

        let count = descriptors.len();
        self.inner
            .host
            .dispatch(HostRequest::SetShortcutItems { items: descriptors })
            .await
            .map_err(CoordinatorError::registration)?;

        info!(count, "shortcuts registered");
        Ok(())
    }

    /// Remove every registered shortcut
    pub async fn clear_actions(&self) -> Result<(), CoordinatorError> {
        if self.is_closed() {
            return Err(CoordinatorError::Closed);
        }

        self.inner
            .host
            .dispatch(HostRequest::ClearShortcutItems)
            .await
            .map_err(CoordinatorError::registration)?;

        info!("shortcuts cleared");
        Ok(())
    }

    /// Close every stream and release initialization waiters.
    ///
    /// Terminal: the coordinator cannot be initialized again. Listeners
    /// still drain what was emitted before the call.
    pub fn shutdown(&self) {
        let task = {
            let mut state = self.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            state.listeners.clear();
            state.pending = None;
            state.has_listener = false;
            state.relay_task.take()
        };

        if let Some(task) = task {
            task.abort();
        }
        self.inner.init_status.send_replace(InitStatus::Closed);

        info!("shortcut coordinator shut down");
    }
}

impl std::fmt::Debug for ShortcutCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ShortcutCoordinator")
            .field("platform", &self.inner.host.platform())
            .field("closed", &state.closed)
            .field("listeners", &state.listeners.len())
            .field("pending", &state.pending)
            .field("ready_signal_sent", &state.ready_signal_sent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::error::HostError;
    use crate::relay::{self, ActionSink, LaunchActionApi, Platform, RelaySender};

    #[derive(Default)]
    struct MockHost {
        platform: Option<Platform>,
        launch_action: Mutex<Option<String>>,
        fail_ready: bool,
        fail_set: bool,
        set_calls: AtomicUsize,
        clear_calls: AtomicUsize,
        ready_calls: AtomicUsize,
        launch_calls: AtomicUsize,
    }

    impl MockHost {
        fn android() -> Self {
            Self {
                platform: Some(Platform::Android),
                ..Default::default()
            }
        }

        fn ios() -> Self {
            Self {
                platform: Some(Platform::Ios),
                ..Default::default()
            }
        }

        fn with_launch_action(self, action: &str) -> Self {
            *self.launch_action.lock().unwrap() = Some(action.to_string());
            self
        }
    }

    #[async_trait]
    impl ShortcutHost for MockHost {
        fn platform(&self) -> Platform {
            self.platform.unwrap_or(Platform::Android)
        }

        async fn set_shortcut_items(&self, _items: Vec<ShortcutDescriptor>) -> Result<(), HostError> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_set {
                return Err(HostError::Unavailable("shortcut manager missing".into()));
            }
            Ok(())
        }

        fn clear_shortcut_items(&self) -> Result<(), HostError> {
            self.clear_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn set_consumer_ready(&self) -> Result<(), HostError> {
            self.ready_calls.fetch_add(1, Ordering::SeqCst);
            // Give concurrent initializers a chance to interleave
            tokio::time::sleep(Duration::from_millis(5)).await;
            if self.fail_ready {
                return Err(HostError::Rejected("engine detached".into()));
            }
            Ok(())
        }

        fn get_launch_action(&self) -> Result<Option<String>, HostError> {
            self.launch_calls.fetch_add(1, Ordering::SeqCst);
            if self.platform() == Platform::Ios {
                return Err(HostError::Unsupported("ios"));
            }
            Ok(self.launch_action.lock().unwrap().take())
        }
    }

    fn create_coordinator(host: MockHost) -> (ShortcutCoordinator, Arc<MockHost>, RelaySender) {
        let host = Arc::new(host);
        let (tx, rx) = relay::channel();
        let coordinator = ShortcutCoordinator::new(host.clone(), rx, CoordinatorOptions::default());
        (coordinator, host, tx)
    }

    #[tokio::test]
    async fn test_cold_launch_action_returned_once() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android().with_launch_action("profile"));

        coordinator.initialize().await.unwrap();

        assert_eq!(
            coordinator.await_cold_start_action().await.unwrap().as_deref(),
            Some("profile")
        );
        assert_eq!(coordinator.await_cold_start_action().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_await_cold_start_waits_for_initialize() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android().with_launch_action("profile"));

        let waiter = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.await_cold_start_action().await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        coordinator.initialize().await.unwrap();
        assert_eq!(waiter.await.unwrap().unwrap().as_deref(), Some("profile"));
    }

    #[tokio::test]
    async fn test_concurrent_initialize_runs_setup_once() {
        let (coordinator, host, _tx) = create_coordinator(MockHost::android());

        let (a, b) = tokio::join!(coordinator.initialize(), coordinator.initialize());
        assert!(a.is_ok());
        assert!(b.is_ok());
        coordinator.initialize().await.unwrap();

        assert_eq!(host.ready_calls.load(Ordering::SeqCst), 1);
        assert_eq!(host.launch_calls.load(Ordering::SeqCst), 1);
        assert!(coordinator.is_initialized());
        assert!(coordinator.ready_signal_sent());
    }

    #[tokio::test]
    async fn test_ios_skips_launch_query() {
        let (coordinator, host, _tx) = create_coordinator(MockHost::ios());

        coordinator.initialize().await.unwrap();

        assert_eq!(host.ready_calls.load(Ordering::SeqCst), 1);
        assert_eq!(host.launch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_initialize_failure_is_shared() {
        let host = MockHost {
            fail_ready: true,
            ..MockHost::android()
        };
        let (coordinator, host, _tx) = create_coordinator(host);

        let (a, b) = tokio::join!(coordinator.initialize(), coordinator.await_cold_start_action());
        assert!(matches!(a, Err(CoordinatorError::Initialization { .. })));
        assert!(matches!(b, Err(CoordinatorError::Initialization { .. })));
        assert!(!coordinator.is_initialized());
        assert_eq!(host.ready_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pending_action_replayed_to_first_listener_only() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android());
        coordinator.activation_handler().launch_action("settings".into());
        assert_eq!(coordinator.pending_action().as_deref(), Some("settings"));

        let mut first = coordinator.event_stream().unwrap();
        let mut second = coordinator.event_stream().unwrap();

        assert_eq!(first.try_recv().as_deref(), Some("settings"));
        assert_eq!(second.try_recv(), None);
        assert_eq!(coordinator.pending_action(), None);
    }

    #[tokio::test]
    async fn test_live_actions_reach_every_listener() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android());
        let mut a = coordinator.event_stream().unwrap();
        let mut b = coordinator.event_stream().unwrap();

        let handler = coordinator.activation_handler();
        handler.launch_action("one".into());
        handler.launch_action("two".into());

        assert_eq!(a.recv().await.as_deref(), Some("one"));
        assert_eq!(a.recv().await.as_deref(), Some("two"));
        assert_eq!(b.try_recv().as_deref(), Some("one"));
        assert_eq!(b.try_recv().as_deref(), Some("two"));
        assert_eq!(coordinator.listener_count(), 2);
    }

    #[tokio::test]
    async fn test_pending_overwritten_while_no_listener() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android());
        let handler = coordinator.activation_handler();
        handler.launch_action("a".into());
        handler.launch_action("b".into());

        let mut stream = coordinator.event_stream().unwrap();
        assert_eq!(stream.try_recv().as_deref(), Some("b"));
        assert_eq!(stream.try_recv(), None);
    }

    #[tokio::test]
    async fn test_detached_listener_restores_pending_behaviour() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android());
        drop(coordinator.event_stream().unwrap());
        assert_eq!(coordinator.listener_count(), 0);

        coordinator.activation_handler().launch_action("later".into());
        assert_eq!(coordinator.pending_action().as_deref(), Some("later"));

        let mut stream = coordinator.event_stream().unwrap();
        assert_eq!(stream.try_recv().as_deref(), Some("later"));
    }

    #[tokio::test]
    async fn test_denylisted_actions_never_surface() {
        let (coordinator, _, _tx) =
            create_coordinator(MockHost::android().with_launch_action("android.intent.action.MAIN"));
        coordinator.initialize().await.unwrap();
        coordinator
            .activation_handler()
            .launch_action("android.intent.action.VIEW".into());

        assert_eq!(coordinator.await_cold_start_action().await.unwrap(), None);
        let mut stream = coordinator.event_stream().unwrap();
        assert_eq!(stream.try_recv(), None);
    }

    #[tokio::test]
    async fn test_custom_filter_is_applied() {
        let (tx, rx) = relay::channel();
        let options = CoordinatorOptions {
            filter: ActionFilter::new(|a| a.starts_with("internal:")),
        };
        let coordinator = ShortcutCoordinator::new(Arc::new(MockHost::ios()), rx, options);
        coordinator.initialize().await.unwrap();
        let mut stream = coordinator.event_stream().unwrap();

        tx.deliver("internal:debug").unwrap();
        tx.deliver("compose").unwrap();

        assert_eq!(stream.recv().await.as_deref(), Some("compose"));
    }

    #[tokio::test]
    async fn test_relay_actions_queued_before_initialize_are_pending() {
        let (coordinator, _, tx) = create_coordinator(MockHost::ios());
        tx.deliver("settings").unwrap();

        coordinator.initialize().await.unwrap();

        assert_eq!(coordinator.pending_action().as_deref(), Some("settings"));
        let mut stream = coordinator.event_stream().unwrap();
        assert_eq!(stream.recv().await.as_deref(), Some("settings"));
    }

    #[tokio::test]
    async fn test_slow_listener_receives_every_action() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android());
        let mut stream = coordinator.event_stream().unwrap();

        let handler = coordinator.activation_handler();
        for i in 0..1000 {
            handler.launch_action(format!("tap-{i}"));
        }

        for i in 0..1000 {
            assert_eq!(stream.recv().await, Some(format!("tap-{i}")));
        }
        assert_eq!(stream.try_recv(), None);
    }

    #[tokio::test]
    async fn test_action_kept_when_only_listener_closed() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android());
        let mut stale = coordinator.event_stream().unwrap();
        stale.close();

        coordinator.activation_handler().launch_action("settings".into());
        assert_eq!(stale.try_recv(), None);
        assert_eq!(coordinator.pending_action().as_deref(), Some("settings"));

        let mut fresh = coordinator.event_stream().unwrap();
        assert_eq!(fresh.try_recv().as_deref(), Some("settings"));
    }

    #[test]
    fn test_emit_returns_action_when_receiver_vanished() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = CoordinatorState {
            has_listener: true,
            ..Default::default()
        };
        state.listeners.push(Listener { id: 0, tx });
        drop(rx);

        assert_eq!(state.emit("settings".to_string()), Err("settings".to_string()));
        assert!(state.listeners.is_empty());
        assert!(!state.has_listener);
    }

    #[tokio::test]
    async fn test_register_empty_list_is_noop() {
        let (coordinator, host, _tx) = create_coordinator(MockHost::android());
        let _stream = coordinator.event_stream().unwrap();

        coordinator.register_actions(Vec::new()).await.unwrap();

        assert_eq!(host.set_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_failure_maps_to_registration_error() {
        let host = MockHost {
            fail_set: true,
            ..MockHost::android()
        };
        let (coordinator, host, _tx) = create_coordinator(host);

        let err = coordinator
            .register_actions(vec![ShortcutDescriptor::new("a", "A")])
            .await
            .unwrap_err();

        assert!(matches!(err, CoordinatorError::Registration { .. }));
        assert!(err.to_string().contains("shortcut manager missing"));
        assert_eq!(host.set_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_batch_never_reaches_host() {
        let (coordinator, host, _tx) = create_coordinator(MockHost::android());

        let err = coordinator
            .register_actions(vec![
                ShortcutDescriptor::new("a", "A"),
                ShortcutDescriptor::new("a", "B"),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, CoordinatorError::Registration { .. }));
        assert_eq!(host.set_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clear_actions_forwards() {
        let (coordinator, host, _tx) = create_coordinator(MockHost::android());
        coordinator.clear_actions().await.unwrap();
        assert_eq!(host.clear_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_is_terminal() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android());
        coordinator.initialize().await.unwrap();
        let mut stream = coordinator.event_stream().unwrap();

        coordinator.shutdown();
        coordinator.shutdown();

        assert_eq!(stream.recv().await, None);
        assert!(matches!(coordinator.event_stream(), Err(CoordinatorError::Closed)));
        assert_eq!(coordinator.initialize().await, Err(CoordinatorError::Closed));
        assert_eq!(
            coordinator.await_cold_start_action().await,
            Err(CoordinatorError::Closed)
        );
        assert_eq!(coordinator.clear_actions().await, Err(CoordinatorError::Closed));

        coordinator.activation_handler().launch_action("late".into());
        assert_eq!(coordinator.pending_action(), None);
    }

    #[tokio::test]
    async fn test_shutdown_releases_waiters() {
        let (coordinator, _, _tx) = create_coordinator(MockHost::android());
        let waiter = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.await_cold_start_action().await })
        };
        tokio::task::yield_now().await;

        coordinator.shutdown();

        assert_eq!(waiter.await.unwrap(), Err(CoordinatorError::Closed));
    }
}
