#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const MOCK_ADDRESS: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);
pub const MOCK_PTR_NAME: &str = "example.com";

/// Queries whose first label is this get an empty answer section.
pub const MISSING_LABEL: &[u8] = b"missing";

/// UDP name server answering every A query with `MOCK_ADDRESS` and every
/// PTR query with `MOCK_PTR_NAME`.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let response = Self::build_mock_response(&buf[..len]);
                            if !response.is_empty() {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries_received(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn build_mock_response(query: &[u8]) -> Vec<u8> {
        if query.len() < 12 + 5 {
            return vec![];
        }

        let qtype = u16::from_be_bytes([query[query.len() - 4], query[query.len() - 3]]);
        let first_label_len = usize::from(query[12]);
        let missing = query.get(13..13 + first_label_len) == Some(MISSING_LABEL);

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&query[0..2]);
        response.extend_from_slice(&[0x81, 0x80]);
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, if missing { 0 } else { 1 }]);
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        response.extend_from_slice(&query[12..]);

        if missing {
            return response;
        }

        response.extend_from_slice(&[0xc0, 0x0c]);
        response.extend_from_slice(&qtype.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]);

        if qtype == 12 {
            let rdata = super::builders::wire_name(MOCK_PTR_NAME);
            response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            response.extend_from_slice(&rdata);
        } else {
            response.extend_from_slice(&[0x00, 0x04]);
            response.extend_from_slice(&MOCK_ADDRESS.octets());
        }

        response
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
