//! Turning "an application is probably running" into a [`Session`].
//!
//! Discovery finds the port; pairing runs only when no API token is known.

mod discover;
mod pairing;

use log::info;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::api::{CancelToken, Session, Transport};

pub use discover::{DEFAULT_PORTS, DiscoveryError, PING_PATH, discover};
pub use pairing::{
    MAX_WAITING_POLLS, POLL_INTERVAL, Pairing, PairingError, PairingState, Sleeper, Step,
    ThreadSleeper, negotiate,
};

/// Errors from establishing a session.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("pairing with the application failed")]
    Pairing(#[from] PairingError),
}

/// An established session and whether its token was issued just now.
///
/// When `paired` is true the caller owns persisting `session.token()`.
#[derive(Debug)]
pub struct Connection<T: Transport> {
    pub session: Session<T>,
    pub paired: bool,
}

/// Discovery and pairing settings.
#[derive(Debug, Clone)]
pub struct Connector<S: Sleeper = ThreadSleeper> {
    ports: RangeInclusive<u16>,
    sleeper: S,
    cancel: CancelToken,
}

impl Default for Connector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector {
    pub fn new() -> Self {
        Self {
            ports: DEFAULT_PORTS,
            sleeper: ThreadSleeper,
            cancel: CancelToken::new(),
        }
    }
}

impl<S: Sleeper> Connector<S> {
    /// Replaces the port range to scan.
    pub fn ports(mut self, ports: RangeInclusive<u16>) -> Self {
        self.ports = ports;
        self
    }

    /// Replaces how the negotiator waits between polls.
    pub fn sleeper<S2: Sleeper>(self, sleeper: S2) -> Connector<S2> {
        Connector {
            ports: self.ports,
            sleeper,
            cancel: self.cancel,
        }
    }

    /// Shares `cancel` with discovery, pairing and the resulting session.
    pub fn cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Finds the application and authenticates against it.
    ///
    /// An empty or missing `api_token` triggers pairing. The port found here
    /// is used for the lifetime of the session; nothing re-discovers it.
    pub fn connect<T: Transport>(
        &self,
        transport: T,
        api_token: Option<&str>,
    ) -> Result<Connection<T>, ConnectError> {
        let port = discover(&transport, self.ports.clone(), &self.cancel)?;

        let (token, paired) = match api_token.filter(|t| !t.is_empty()) {
            Some(token) => (token.to_string(), false),
            None => {
                info!("event=pairing_start port={port}");
                let token = negotiate(&transport, port, &self.sleeper, &self.cancel)?;
                (token, true)
            }
        };

        let session = Session::new(transport, port, token).with_cancel(self.cancel.clone());
        Ok(Connection { session, paired })
    }
}
