//! Finding the application's API listener on the local machine.

use log::{debug, info};
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::api::{ApiError, ApiResult, CancelToken, Method, Request, Transport, require_success};

/// Ports the application may listen on, tried in ascending order.
pub const DEFAULT_PORTS: RangeInclusive<u16> = 41184..=41194;

/// Path answered by a running instance.
pub const PING_PATH: &str = "/ping";

/// Errors from port discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No port in the range answered the liveness probe.
    ///
    /// `last_error` is the failure of the last port tried, which is not
    /// necessarily why earlier ports failed.
    #[error("no running instance found on ports {first}-{last}")]
    NoInstance {
        first: u16,
        last: u16,
        #[source]
        last_error: Option<ApiError>,
    },

    #[error("discovery cancelled")]
    Cancelled,
}

/// Probes `ports` in order and returns the first one that answers.
///
/// Scanning stops at the first success; later ports are never contacted.
/// A failed probe is not fatal, the scan moves on and remembers the error.
pub fn discover<T: Transport>(
    transport: &T,
    ports: RangeInclusive<u16>,
    cancel: &CancelToken,
) -> Result<u16, DiscoveryError> {
    let (first, last) = (*ports.start(), *ports.end());
    let mut last_error = None;

    for port in ports {
        if cancel.is_cancelled() {
            return Err(DiscoveryError::Cancelled);
        }

        match probe(transport, port) {
            Ok(()) => {
                info!("event=instance_found port={port}");
                return Ok(port);
            }
            Err(err) => {
                debug!("event=probe_failed port={port} error={err}");
                last_error = Some(err);
            }
        }
    }

    Err(DiscoveryError::NoInstance {
        first,
        last,
        last_error,
    })
}

fn probe<T: Transport>(transport: &T, port: u16) -> ApiResult<()> {
    let response = transport.send(&Request::new(Method::Get, port, PING_PATH))?;
    require_success(response).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn first_port_answers() {
        let transport = ScriptedTransport::new().respond(200, "JoplinClipperServer");

        let port = discover(&transport, DEFAULT_PORTS, &CancelToken::new()).unwrap();

        assert_eq!(port, 41184);
        assert_eq!(transport.paths(), vec!["/ping"]);
    }

    #[test]
    fn stops_at_first_answering_port() {
        let transport = ScriptedTransport::new()
            .fail("connection refused")
            .fail("connection refused")
            .respond(503, "starting")
            .respond(200, "ok")
            .respond(200, "ok");

        let port = discover(&transport, DEFAULT_PORTS, &CancelToken::new()).unwrap();

        assert_eq!(port, 41187);
        let ports: Vec<_> = transport.requests().iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![41184, 41185, 41186, 41187]);
    }

    #[test]
    fn reports_last_error_when_nothing_answers() {
        // Ten refused connections, then an error status on the last port.
        let mut transport = ScriptedTransport::new();
        for _ in 41184..41194 {
            transport = transport.fail("connection refused");
        }
        let transport = transport.respond(500, "broken");

        let err = discover(&transport, DEFAULT_PORTS, &CancelToken::new()).unwrap_err();

        assert_eq!(transport.requests().len(), 11);
        match &err {
            DiscoveryError::NoInstance {
                first,
                last,
                last_error,
            } => {
                assert_eq!((*first, *last), (41184, 41194));
                assert_eq!(last_error.as_ref().and_then(ApiError::status), Some(500));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "no running instance found on ports 41184-41194"
        );
    }

    #[test]
    fn single_port_range() {
        let transport = ScriptedTransport::new().fail("connection refused");

        let err = discover(&transport, 41190..=41190, &CancelToken::new()).unwrap_err();

        assert!(matches!(
            err,
            DiscoveryError::NoInstance {
                first: 41190,
                last: 41190,
                last_error: Some(ApiError::Transport(_)),
            }
        ));
    }

    #[test]
    fn cancelled_before_first_probe() {
        let transport = ScriptedTransport::new();
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = discover(&transport, DEFAULT_PORTS, &cancel).unwrap_err();

        assert!(matches!(err, DiscoveryError::Cancelled));
        assert!(transport.requests().is_empty());
    }
}
