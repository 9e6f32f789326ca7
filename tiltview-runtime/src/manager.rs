use crate::client::{ClientCore, TelemetryUpdate};
use link::{LinkFactory, OpenLink, Shutdown};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TelemetryConfig {
    /// Cadence that turns push-driven arrival into pull-driven consumption.
    pub flush_interval: Duration,
    /// Fixed single-shot delay before reopening a dropped channel. The
    /// backend is local, so there is no exponential series; repeated
    /// failures just retry at this same interval.
    pub reconnect_backoff: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            flush_interval: Duration::from_millis(50),
            reconnect_backoff: Duration::from_millis(800),
        }
    }
}

#[derive(Debug)]
enum Command {
    SetStreaming(bool),
    Stop,
}

enum ManagerMsg {
    Control(Command),
    Inbound { session: u64, raw: String },
    Closed { session: u64 },
}

/// Control handle for the telemetry thread. Dropping it stops the thread,
/// so teardown happens on every exit path whether or not `stop` was called.
pub struct TelemetryHandle {
    tx: Sender<ManagerMsg>,
}

impl TelemetryHandle {
    pub fn set_streaming(&self, on: bool) {
        let _ = self.tx.send(ManagerMsg::Control(Command::SetStreaming(on)));
    }

    /// Idempotent: once the thread is gone further stops are no-ops.
    pub fn stop(&self) {
        let _ = self.tx.send(ManagerMsg::Control(Command::Stop));
    }
}

impl Drop for TelemetryHandle {
    fn drop(&mut self) {
        let _ = self.tx.send(ManagerMsg::Control(Command::Stop));
    }
}

/// Spawns the connection manager thread. It opens the push channel, routes
/// classified traffic through a [`ClientCore`], flushes on a fixed cadence
/// and reopens the channel after a fixed backoff whenever it drops. The
/// returned receiver yields UI-facing updates; the handle stops everything.
pub fn spawn_telemetry(
    factory: Box<dyn LinkFactory>,
    config: TelemetryConfig,
) -> (TelemetryHandle, Receiver<TelemetryUpdate>) {
    let (manager_tx, manager_rx) = mpsc::channel::<ManagerMsg>();
    let (update_tx, update_rx) = mpsc::channel::<TelemetryUpdate>();

    let reader_tx = manager_tx.clone();
    thread::spawn(move || {
        manager_loop(factory, config, manager_rx, reader_tx, update_tx);
    });

    (TelemetryHandle { tx: manager_tx }, update_rx)
}

fn manager_loop(
    factory: Box<dyn LinkFactory>,
    config: TelemetryConfig,
    manager_rx: Receiver<ManagerMsg>,
    reader_tx: Sender<ManagerMsg>,
    update_tx: Sender<TelemetryUpdate>,
) {
    let mut core = ClientCore::new();
    let mut session: u64 = 0;
    let mut reconnect_at: Option<Instant> = None;
    let mut next_flush = Instant::now() + config.flush_interval;

    // First open happens immediately; failures fall into the backoff path.
    let mut link_shutdown = open_session(factory.as_ref(), &mut session, &reader_tx, &update_tx);
    if link_shutdown.is_some() {
        log::info!("telemetry channel open");
    } else {
        reconnect_at = Some(Instant::now() + config.reconnect_backoff);
    }

    'manager: loop {
        let mut deadline = next_flush;
        if let Some(due) = reconnect_at {
            deadline = deadline.min(due);
        }
        let timeout = deadline.saturating_duration_since(Instant::now());

        match manager_rx.recv_timeout(timeout) {
            Ok(ManagerMsg::Control(Command::Stop)) => break 'manager,
            Ok(ManagerMsg::Control(Command::SetStreaming(on))) => {
                if let Some(update) = core.set_streaming(on) {
                    if update_tx.send(update).is_err() {
                        break 'manager;
                    }
                }
            }
            Ok(ManagerMsg::Inbound { session: s, raw }) if s == session => {
                if let Some(update) = core.handle_message(&raw) {
                    if update_tx.send(update).is_err() {
                        break 'manager;
                    }
                }
            }
            Ok(ManagerMsg::Closed { session: s }) if s == session => {
                log::warn!("telemetry channel dropped, retrying");
                link_shutdown = None;
                reconnect_at = Some(Instant::now() + config.reconnect_backoff);
                if update_tx.send(TelemetryUpdate::LinkDown).is_err() {
                    break 'manager;
                }
            }
            // Stale traffic from a session that was already torn down.
            Ok(ManagerMsg::Inbound { .. }) | Ok(ManagerMsg::Closed { .. }) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break 'manager,
        }

        let now = Instant::now();
        if reconnect_at.is_some_and(|due| now >= due) {
            match open_session(factory.as_ref(), &mut session, &reader_tx, &update_tx) {
                Some(shutdown) => {
                    link_shutdown = Some(shutdown);
                    reconnect_at = None;
                }
                None => reconnect_at = Some(now + config.reconnect_backoff),
            }
        }
        if now >= next_flush {
            for update in core.flush() {
                if update_tx.send(update).is_err() {
                    break 'manager;
                }
            }
            next_flush = now + config.flush_interval;
        }
    }

    // Release the reader parked in the open link, if any; it drops the
    // transport on its way out.
    if let Some(shutdown) = link_shutdown {
        shutdown.signal();
    }
    core.discard_buffered();
    log::info!("telemetry manager stopped");
}

/// Opens one link session and hands it to a reader thread. The session
/// counter fences off any traffic a dying reader might still deliver; the
/// returned shutdown releases the reader (and the transport it holds) when
/// the manager stops.
fn open_session(
    factory: &dyn LinkFactory,
    session: &mut u64,
    reader_tx: &Sender<ManagerMsg>,
    update_tx: &Sender<TelemetryUpdate>,
) -> Option<Shutdown> {
    match factory.open() {
        Ok(OpenLink { mut link, shutdown }) => {
            *session += 1;
            let id = *session;
            let tx = reader_tx.clone();
            thread::spawn(move || loop {
                match link.next_message() {
                    Ok(Some(raw)) => {
                        if tx.send(ManagerMsg::Inbound { session: id, raw }).is_err() {
                            break;
                        }
                    }
                    Ok(None) | Err(_) => {
                        let _ = tx.send(ManagerMsg::Closed { session: id });
                        break;
                    }
                }
            });
            let _ = update_tx.send(TelemetryUpdate::LinkUp);
            Some(shutdown)
        }
        Err(err) => {
            log::debug!("telemetry open failed: {err}");
            None
        }
    }
}
