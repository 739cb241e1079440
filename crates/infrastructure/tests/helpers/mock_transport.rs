#![allow(dead_code)]
use ferrous_resolv_application::ports::DatagramTransport;
use ferrous_resolv_domain::ResolveError;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Box<dyn Fn(&[u8]) -> Vec<u8> + Send>;

pub enum Reply {
    /// Nothing arrives before the deadline.
    Timeout,
    /// The read fails outright.
    Error,
    /// A fixed datagram.
    Datagram(Vec<u8>),
    /// A datagram computed from the last query written.
    Answer(Responder),
}

impl Reply {
    pub fn answer(f: impl Fn(&[u8]) -> Vec<u8> + Send + 'static) -> Self {
        Reply::Answer(Box::new(f))
    }
}

#[derive(Default)]
pub struct TransportLog {
    pub writes: Vec<Vec<u8>>,
    pub timeouts: Vec<Duration>,
    pub reads: usize,
    pub closed: bool,
}

/// In-memory transport replaying a fixed script of replies. Reads past the
/// end of the script time out.
pub struct ScriptedTransport {
    server: SocketAddr,
    replies: VecDeque<Reply>,
    log: Arc<Mutex<TransportLog>>,
    fail_writes: bool,
    fail_timeouts: bool,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> (Self, Arc<Mutex<TransportLog>>) {
        let log = Arc::new(Mutex::new(TransportLog::default()));
        let transport = Self {
            server: "192.0.2.53:53".parse().unwrap(),
            replies: replies.into(),
            log: log.clone(),
            fail_writes: false,
            fail_timeouts: false,
        };
        (transport, log)
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn failing_timeouts(mut self) -> Self {
        self.fail_timeouts = true;
        self
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }
}

impl DatagramTransport for ScriptedTransport {
    fn write(&mut self, datagram: &[u8]) -> Result<usize, ResolveError> {
        if self.fail_writes {
            return Err(ResolveError::Transport("write refused".into()));
        }
        self.log.lock().unwrap().writes.push(datagram.to_vec());
        Ok(datagram.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ResolveError> {
        let mut log = self.log.lock().unwrap();
        log.reads += 1;

        let datagram = match self.replies.pop_front() {
            None | Some(Reply::Timeout) => {
                return Err(ResolveError::TransportTimeout {
                    server: self.server,
                })
            }
            Some(Reply::Error) => return Err(ResolveError::Transport("read failed".into())),
            Some(Reply::Datagram(bytes)) => bytes,
            Some(Reply::Answer(respond)) => {
                let query = log.writes.last().cloned().unwrap_or_default();
                respond(&query)
            }
        };

        let n = datagram.len().min(buf.len());
        buf[..n].copy_from_slice(&datagram[..n]);
        Ok(n)
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), ResolveError> {
        if self.fail_timeouts {
            return Err(ResolveError::Transport("timeout refused".into()));
        }
        self.log.lock().unwrap().timeouts.push(timeout);
        Ok(())
    }

    fn close(&mut self) {
        self.log.lock().unwrap().closed = true;
    }
}
