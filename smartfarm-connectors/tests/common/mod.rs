//! Test doubles for the uplink: a scripted Wi-Fi link and a minimal MQTT
//! broker speaking just enough of MQTT 3.1.1 to accept one session.

#![allow(dead_code)]

use std::net::IpAddr;
use std::time::Duration;

use smartfarm_connectors::{NetworkLink, WifiCredentials};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Link that obtains an address after a fixed number of empty polls
#[derive(Debug, Default)]
pub struct FakeLink {
    pub empty_polls: Option<u64>,
    pub address: Option<IpAddr>,
    pub activations: u32,
    pub associated_with: Vec<String>,
    pub polls: u64,
}

impl FakeLink {
    pub fn after_polls(empty_polls: u64, address: IpAddr) -> Self {
        Self {
            empty_polls: Some(empty_polls),
            address: Some(address),
            ..Self::default()
        }
    }

    /// Access point that is never reachable
    pub fn unreachable() -> Self {
        Self::default()
    }
}

impl NetworkLink for FakeLink {
    fn activate(&mut self) {
        self.activations += 1;
    }

    fn associate(&mut self, credentials: &WifiCredentials) {
        self.associated_with.push(credentials.ssid().to_string());
    }

    fn poll_address(&mut self) -> Option<IpAddr> {
        self.polls += 1;
        match self.empty_polls {
            Some(empty) if self.polls > empty => self.address,
            _ => None,
        }
    }
}

/// What the broker does once the handshake is answered
#[derive(Debug, Clone, Copy)]
pub enum AfterHandshake {
    /// Drop the connection immediately
    Close,
    /// Read this many more packets, then drop the connection
    Collect(usize),
}

/// Everything the broker saw
#[derive(Debug)]
pub struct BrokerLog {
    /// Control packets as (fixed header byte, body), CONNECT first
    pub packets: Vec<(u8, Vec<u8>)>,
    /// A second connection arrived after the first one ended
    pub reconnected: bool,
}

/// Start a one-session broker on an ephemeral port
///
/// `return_code` goes into the CONNACK; anything but 0 refuses the session.
pub async fn spawn_broker(return_code: u8, after: AfterHandshake) -> (u16, JoinHandle<std::io::Result<BrokerLog>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let task = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await?;
        let mut packets = vec![read_packet(&mut stream).await?];

        stream.write_all(&[0x20, 0x02, 0x00, return_code]).await?;
        stream.flush().await?;

        if return_code == 0 {
            if let AfterHandshake::Collect(count) = after {
                for _ in 0..count {
                    packets.push(read_packet(&mut stream).await?);
                }
            }
        }
        drop(stream);

        let reconnected = tokio::time::timeout(Duration::from_millis(300), listener.accept())
            .await
            .is_ok();
        Ok(BrokerLog { packets, reconnected })
    });

    (port, task)
}

/// A port nothing listens on
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

async fn read_packet(stream: &mut TcpStream) -> std::io::Result<(u8, Vec<u8>)> {
    let header = stream.read_u8().await?;
    let mut remaining = 0usize;
    let mut shift = 0;
    loop {
        let byte = stream.read_u8().await?;
        remaining |= usize::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }
    let mut body = vec![0; remaining];
    stream.read_exact(&mut body).await?;
    Ok((header, body))
}

/// Split a QoS 0 PUBLISH body into topic and payload
pub fn decode_publish(body: &[u8]) -> (String, Vec<u8>) {
    let topic_len = usize::from(u16::from_be_bytes([body[0], body[1]]));
    let topic = String::from_utf8(body[2..2 + topic_len].to_vec()).unwrap();
    (topic, body[2 + topic_len..].to_vec())
}
