//! Interactive pairing: trading a short-lived auth token for an API token.
//!
//! The application shows the user a prompt when an auth token is issued.
//! The client then polls until the user accepts or rejects, or until it
//! gives up after [`MAX_WAITING_POLLS`] "waiting" answers.

use log::{debug, info};
use serde::Deserialize;
use std::thread;
use std::time::Duration;
use thiserror::Error;

use crate::api::{
    ApiError, ApiResult, CancelToken, Method, Request, Response, Transport, decode,
    require_success,
};

/// "waiting" answers tolerated before giving up.
pub const MAX_WAITING_POLLS: u32 = 20;

/// Fixed delay between approval polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Errors that end a pairing negotiation.
#[derive(Debug, Error)]
pub enum PairingError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("request rejected")]
    Rejected,

    #[error("could not get an answer from user after {polls} polls")]
    NoAnswer { polls: u32 },

    #[error("unexpected authorization status '{0}'")]
    UnexpectedStatus(String),

    #[error("authorization accepted but no token was returned")]
    MissingToken,

    #[error("pairing already failed")]
    Finished,

    #[error("pairing cancelled")]
    Cancelled,
}

/// Where a negotiation stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingState {
    /// Nothing sent yet.
    RequestAuthToken,
    /// Auth token issued; `polls` "waiting" answers received so far.
    AwaitingApproval { auth_token: String, polls: u32 },
    /// The user approved; terminal.
    Accepted { api_token: String },
    /// A step failed; terminal.
    Failed,
}

/// What one call to [`Pairing::step`] achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    AuthTokenIssued,
    Waiting { polls: u32 },
    Accepted(String),
}

#[derive(Debug, Deserialize)]
struct AuthTokenBody {
    auth_token: String,
}

#[derive(Debug, Deserialize)]
struct CheckBody {
    status: String,
    #[serde(default)]
    token: Option<String>,
}

/// The pairing state machine. Each step sends exactly one request.
///
/// Sleeping between polls is left to the caller, see [`negotiate`].
pub struct Pairing<'t, T: Transport> {
    transport: &'t T,
    port: u16,
    state: PairingState,
}

impl<'t, T: Transport> Pairing<'t, T> {
    pub fn new(transport: &'t T, port: u16) -> Self {
        Self {
            transport,
            port,
            state: PairingState::RequestAuthToken,
        }
    }

    pub fn state(&self) -> &PairingState {
        &self.state
    }

    /// Advances the negotiation by one request.
    ///
    /// Any error moves the machine to [`PairingState::Failed`].
    pub fn step(&mut self) -> Result<Step, PairingError> {
        let result = self.advance();
        if result.is_err() {
            self.state = PairingState::Failed;
        }
        result
    }

    fn advance(&mut self) -> Result<Step, PairingError> {
        let (auth_token, polls) = match self.state.clone() {
            PairingState::RequestAuthToken => {
                let auth_token = self.request_auth_token()?;
                self.state = PairingState::AwaitingApproval {
                    auth_token,
                    polls: 0,
                };
                return Ok(Step::AuthTokenIssued);
            }
            PairingState::AwaitingApproval { auth_token, polls } => (auth_token, polls),
            PairingState::Accepted { api_token } => return Ok(Step::Accepted(api_token)),
            PairingState::Failed => return Err(PairingError::Finished),
        };

        let answer = self.check(&auth_token)?;
        match answer.status.as_str() {
            "accepted" => {
                let api_token = answer
                    .token
                    .filter(|t| !t.is_empty())
                    .ok_or(PairingError::MissingToken)?;
                info!("event=pairing_accepted polls={}", polls + 1);
                self.state = PairingState::Accepted {
                    api_token: api_token.clone(),
                };
                Ok(Step::Accepted(api_token))
            }
            "rejected" => {
                info!("event=pairing_rejected");
                Err(PairingError::Rejected)
            }
            "waiting" => {
                let polls = polls + 1;
                if polls >= MAX_WAITING_POLLS {
                    return Err(PairingError::NoAnswer { polls });
                }
                self.state = PairingState::AwaitingApproval { auth_token, polls };
                Ok(Step::Waiting { polls })
            }
            other => Err(PairingError::UnexpectedStatus(other.to_string())),
        }
    }

    fn request_auth_token(&self) -> Result<String, PairingError> {
        let response = self.send(Request::new(Method::Post, self.port, "/auth"))?;
        let body: AuthTokenBody = decode(response)?;
        Ok(body.auth_token)
    }

    fn check(&self, auth_token: &str) -> Result<CheckBody, PairingError> {
        let request =
            Request::new(Method::Get, self.port, "/auth/check").param("auth_token", auth_token);
        let response = self.send(request)?;
        Ok(decode(response)?)
    }

    fn send(&self, request: Request) -> ApiResult<Response> {
        require_success(self.transport.send(&request)?)
    }
}

/// Blocks the caller between polls.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Runs a full negotiation and returns the API token.
///
/// Sleeps [`POLL_INTERVAL`] after every "waiting" answer and checks
/// `cancel` before each request. The token is returned, never stored.
pub fn negotiate<T: Transport, S: Sleeper>(
    transport: &T,
    port: u16,
    sleeper: &S,
    cancel: &CancelToken,
) -> Result<String, PairingError> {
    let mut pairing = Pairing::new(transport, port);

    loop {
        if cancel.is_cancelled() {
            return Err(PairingError::Cancelled);
        }

        match pairing.step()? {
            Step::AuthTokenIssued => {
                info!("event=pairing_requested port={port} action=awaiting_user_approval");
            }
            Step::Waiting { polls } => {
                debug!("event=pairing_waiting polls={polls}");
                sleeper.sleep(POLL_INTERVAL);
            }
            Step::Accepted(api_token) => return Ok(api_token),
        }
    }
}
