//! Outbound connectivity probing.
//!
//! The probe answers one question: can this host open a stream connection
//! to a well-known remote endpoint? Candidate addresses are tried in
//! resolution order; the first successful connection wins. Exhausting all
//! candidates is the [`Reachability::Unreachable`] outcome — a computed
//! result, not an error. Only the resolver failing is an error.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use sp_common::{Error, Result};
use tracing::{debug, warn};

/// Well-known probe endpoint.
pub const DEFAULT_PROBE_HOST: &str = "example.com";

/// Probe port (http).
pub const DEFAULT_PROBE_PORT: u16 = 80;

/// Default cap on how long one connect/send/receive may block.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    /// A connection was established to this address.
    Reachable { addr: SocketAddr },
    /// Every candidate address refused or timed out.
    Unreachable,
}

impl Reachability {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Reachability::Reachable { .. })
    }
}

/// Timeout policy for a probe run.
#[derive(Debug, Clone, Copy)]
pub struct ConnectivityOptions {
    /// Per-attempt socket timeout (connect, send, receive).
    pub attempt_timeout: Duration,
    /// Deadline across all candidate addresses. Without one, total latency
    /// is `attempt_timeout` times the candidate count.
    pub overall_deadline: Option<Duration>,
}

impl Default for ConnectivityOptions {
    fn default() -> Self {
        ConnectivityOptions {
            attempt_timeout: ATTEMPT_TIMEOUT,
            overall_deadline: None,
        }
    }
}

/// Resolve `host:port` for a stream socket and attempt a bounded-timeout
/// connection to each IPv4 candidate in resolution order.
pub fn check_connectivity(
    host: &str,
    port: u16,
    opts: ConnectivityOptions,
) -> Result<Reachability> {
    let started = Instant::now();

    let candidates: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| Error::Resolve {
            host: host.to_string(),
            port,
            source,
        })?
        .filter(SocketAddr::is_ipv4)
        .collect();
    debug!(host, port, candidates = candidates.len(), "resolved probe endpoint");

    for addr in candidates {
        let mut timeout = opts.attempt_timeout;
        if let Some(deadline) = opts.overall_deadline {
            let remaining = deadline.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                warn!(%addr, "overall connectivity deadline reached, giving up");
                break;
            }
            timeout = timeout.min(remaining);
        }

        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => {
                // Bound any further use of the socket as well.
                if let Err(err) = stream.set_read_timeout(Some(opts.attempt_timeout)) {
                    debug!(%addr, error = %err, "could not set receive timeout");
                }
                if let Err(err) = stream.set_write_timeout(Some(opts.attempt_timeout)) {
                    debug!(%addr, error = %err, "could not set send timeout");
                }
                debug!(%addr, "connected");
                return Ok(Reachability::Reachable { addr });
            }
            Err(err) => {
                debug!(%addr, error = %err, "connect failed, trying next candidate");
            }
        }
    }

    Ok(Reachability::Unreachable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn local_opts() -> ConnectivityOptions {
        ConnectivityOptions {
            attempt_timeout: Duration::from_millis(500),
            overall_deadline: Some(Duration::from_secs(2)),
        }
    }

    #[test]
    fn test_reachable_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let outcome = check_connectivity("127.0.0.1", port, local_opts()).unwrap();
        match outcome {
            Reachability::Reachable { addr } => assert_eq!(addr.port(), port),
            Reachability::Unreachable => panic!("listener should be reachable"),
        }
    }

    #[test]
    fn test_closed_port_is_unreachable_within_bound() {
        // Bind then drop to find a port that is almost certainly closed.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let started = Instant::now();
        let outcome = check_connectivity("127.0.0.1", port, local_opts()).unwrap();
        assert_eq!(outcome, Reachability::Unreachable);
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "probe must not hang past its bounds"
        );
    }

    #[test]
    fn test_zero_deadline_short_circuits() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let opts = ConnectivityOptions {
            attempt_timeout: Duration::from_millis(500),
            overall_deadline: Some(Duration::ZERO),
        };
        let outcome = check_connectivity("127.0.0.1", port, opts).unwrap();
        assert_eq!(outcome, Reachability::Unreachable);
    }

    #[test]
    fn test_unresolvable_host_is_an_error() {
        let err = check_connectivity("host.invalid", 80, local_opts()).unwrap_err();
        assert_eq!(err.category(), sp_common::ErrorCategory::Network);
    }
}
