use std::io::{self, BufRead, BufReader, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    #[error("open failed: {0}")]
    Open(String),
    #[error("read failed: {0}")]
    Read(String),
}

/// A live push channel delivering one JSON payload per message.
pub trait PushLink: Send {
    /// Blocks until the next message arrives. `Ok(None)` means the channel
    /// closed, either from the far end or through its [`Shutdown`]; errors
    /// mean it broke. Either way the link is spent and the caller must open
    /// a new one.
    fn next_message(&mut self) -> Result<Option<String>, LinkError>;
}

/// Close signal for one link. Links poll their transport with a short
/// timeout and return `Ok(None)` within one poll interval of the signal, so
/// a reader parked in `next_message` can be released from another thread.
#[derive(Clone, Debug, Default)]
pub struct Shutdown {
    flag: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_signalled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// A freshly opened push channel plus the handle that closes it.
pub struct OpenLink {
    pub link: Box<dyn PushLink>,
    pub shutdown: Shutdown,
}

/// Opens push channels. Each `open` yields a fresh link; the connection
/// manager calls it again after every drop.
pub trait LinkFactory: Send {
    fn open(&self) -> Result<OpenLink, LinkError>;
}

/// How long a blocked read waits before the shutdown flag is checked.
const HTTP_POLL_INTERVAL: Duration = Duration::from_millis(500);
const IN_PROCESS_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Server-sent-events link over plain HTTP. The backend keeps the response
/// open and writes `data: <json>` frames separated by blank lines. Reads use
/// a socket timeout so the shutdown flag is observed even on a quiet stream;
/// partial lines survive across those timeouts.
pub struct SseLink {
    reader: BufReader<Box<dyn Read + Send + Sync>>,
    shutdown: Shutdown,
    line: Vec<u8>,
    data: String,
}

impl SseLink {
    pub fn new(reader: Box<dyn Read + Send + Sync>, shutdown: Shutdown) -> Self {
        Self {
            reader: BufReader::new(reader),
            shutdown,
            line: Vec::new(),
            data: String::new(),
        }
    }
}

impl PushLink for SseLink {
    fn next_message(&mut self) -> Result<Option<String>, LinkError> {
        loop {
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    let trimmed = {
                        let text = String::from_utf8_lossy(&self.line);
                        text.trim_end_matches(['\r', '\n']).to_string()
                    };
                    self.line.clear();
                    if trimmed.is_empty() {
                        if self.data.is_empty() {
                            continue;
                        }
                        return Ok(Some(std::mem::take(&mut self.data)));
                    }
                    if let Some(payload) = trimmed.strip_prefix("data:") {
                        if !self.data.is_empty() {
                            self.data.push('\n');
                        }
                        self.data.push_str(payload.trim_start());
                    }
                    // `event:`, `id:`, `retry:` and comment lines carry
                    // nothing we use.
                }
                // A timed-out read leaves whatever arrived in `self.line`.
                Err(err)
                    if matches!(
                        err.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    if self.shutdown.is_signalled() {
                        return Ok(None);
                    }
                }
                Err(err) => return Err(LinkError::Read(err.to_string())),
            }
        }
    }
}

/// Factory for the production SSE channel.
pub struct HttpLinkFactory {
    url: String,
    agent: ureq::Agent,
}

impl HttpLinkFactory {
    pub fn new(url: impl Into<String>) -> Self {
        // Short read timeout so the link polls its shutdown flag; the stream
        // itself stays open indefinitely.
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(3))
            .timeout_read(HTTP_POLL_INTERVAL)
            .build();
        Self {
            url: url.into(),
            agent,
        }
    }
}

impl LinkFactory for HttpLinkFactory {
    fn open(&self) -> Result<OpenLink, LinkError> {
        let response = self
            .agent
            .get(&self.url)
            .set("Accept", "text/event-stream")
            .call()
            .map_err(|err| LinkError::Open(err.to_string()))?;
        log::debug!("push channel open: {}", self.url);
        let shutdown = Shutdown::new();
        Ok(OpenLink {
            link: Box::new(SseLink::new(response.into_reader(), shutdown.clone())),
            shutdown,
        })
    }
}

/// In-process link fed from a test or simulator thread. Dropping the sender
/// closes the channel the same way a dead socket would; the shutdown flag
/// closes it from the consuming side.
pub struct InProcessLink {
    receiver: Receiver<String>,
    shutdown: Shutdown,
}

impl InProcessLink {
    pub fn channel() -> (Sender<String>, InProcessLink) {
        let (sender, receiver) = mpsc::channel();
        (
            sender,
            InProcessLink {
                receiver,
                shutdown: Shutdown::new(),
            },
        )
    }

    pub fn shutdown(&self) -> Shutdown {
        self.shutdown.clone()
    }
}

impl PushLink for InProcessLink {
    fn next_message(&mut self) -> Result<Option<String>, LinkError> {
        loop {
            match self.receiver.recv_timeout(IN_PROCESS_POLL_INTERVAL) {
                Ok(message) => return Ok(Some(message)),
                Err(RecvTimeoutError::Timeout) => {
                    if self.shutdown.is_signalled() {
                        return Ok(None);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            }
        }
    }
}
