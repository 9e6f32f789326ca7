use crate::command::DeviceCommand;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_BAUD: u32 = 115200;

#[derive(thiserror::Error, Debug)]
pub enum ProtocolError {
    #[error("backend request failed: {0}")]
    Request(Box<ureq::Error>),
    #[error("backend response malformed: {0}")]
    Response(#[from] std::io::Error),
}

impl From<ureq::Error> for ProtocolError {
    fn from(err: ureq::Error) -> Self {
        ProtocolError::Request(Box::new(err))
    }
}

#[derive(Debug, Deserialize)]
struct PortsResponse {
    ports: Vec<String>,
}

/// Request/response client for the backend that owns the physical serial
/// port. Every call is synchronous; failures surface to the caller and are
/// never retried here.
pub struct BackendClient {
    base_url: String,
    agent: ureq::Agent,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(5))
            .build();
        Self {
            base_url: base_url.into(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the server-sent-events push channel.
    pub fn stream_url(&self) -> String {
        format!("{}/stream", self.base_url)
    }

    /// Lists serial ports visible to the backend.
    pub fn ports(&self) -> Result<Vec<String>, ProtocolError> {
        let response: PortsResponse = self
            .agent
            .get(&format!("{}/api/ports", self.base_url))
            .call()?
            .into_json()?;
        Ok(response.ports)
    }

    /// Asks the backend to open the serial port.
    pub fn connect(&self, port: &str, baud: u32) -> Result<(), ProtocolError> {
        self.agent
            .post(&format!("{}/api/connect", self.base_url))
            .send_json(serde_json::json!({ "port": port, "baud": baud }))?;
        log::info!("backend opened {port} at {baud} baud");
        Ok(())
    }

    /// Asks the backend to close the serial port.
    pub fn disconnect(&self) -> Result<(), ProtocolError> {
        self.agent
            .post(&format!("{}/api/disconnect", self.base_url))
            .send_json(serde_json::json!({}))?;
        log::info!("backend closed serial port");
        Ok(())
    }

    /// Sends one device command over the serial link.
    pub fn send(&self, command: &DeviceCommand) -> Result<(), ProtocolError> {
        let cmd = command.to_string();
        self.agent
            .post(&format!("{}/api/send", self.base_url))
            .send_json(serde_json::json!({ "cmd": cmd }))?;
        log::debug!("sent device command: {cmd}");
        Ok(())
    }
}
