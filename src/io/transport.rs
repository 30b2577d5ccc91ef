//! Datagram transport to and from the simulation.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

/// Largest frame the simulation sends.
const MAX_DATAGRAM: usize = 65_535;

/// Source of inbound frames and sink for outbound ones.
pub trait Transport {
    /// Waits up to one poll interval for a frame. `Ok(None)` means nothing
    /// arrived in time.
    fn receive(&mut self) -> io::Result<Option<String>>;

    fn send(&mut self, frame: &str) -> io::Result<()>;
}

/// UDP socket bound locally, replying to a fixed peer.
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddr,
    buf: Vec<u8>,
}

impl UdpTransport {
    /// Binds `bind` and sets the receive timeout to `poll_interval`.
    pub fn bind(bind: SocketAddr, peer: SocketAddr, poll_interval: Duration) -> io::Result<Self> {
        let socket = UdpSocket::bind(bind)?;
        socket.set_read_timeout(Some(poll_interval))?;
        Ok(Self {
            socket,
            peer,
            buf: vec![0; MAX_DATAGRAM],
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    #[must_use]
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl Transport for UdpTransport {
    fn receive(&mut self) -> io::Result<Option<String>> {
        match self.socket.recv_from(&mut self.buf) {
            Ok((n, _)) => Ok(Some(String::from_utf8_lossy(&self.buf[..n]).into_owned())),
            // Windows reports an unreachable peer on the next receive
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock
                        | io::ErrorKind::TimedOut
                        | io::ErrorKind::ConnectionReset
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn send(&mut self, frame: &str) -> io::Result<()> {
        self.socket.send_to(frame.as_bytes(), self.peer)?;
        Ok(())
    }
}
