//! Wi-Fi bring-up
//!
//! The node cannot do anything useful without a network, so joining is
//! unbounded: the interface is activated, association is requested once, and
//! the link is then polled at a fixed interval until it reports an address.
//! There is no timeout and no attempt limit. A node deployed out of range
//! simply waits there until the access point comes back.
//!
//! The platform side is abstracted by [`NetworkLink`]; on Linux it is backed
//! by NetworkManager, in tests by a scripted fake.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use heapless::String;
use log::{debug, info};
use thiserror::Error;

/// Maximum SSID length (IEEE 802.11 standard)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WiFi password length (WPA2 standard)
pub const MAX_PASSWORD_LEN: usize = 63;

/// Polls between two "still waiting" progress lines
const PROGRESS_EVERY: u64 = 30;

/// Rejected Wi-Fi credentials
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("SSID must not be empty")]
    EmptySsid,

    #[error("SSID is {0} bytes, at most 32 allowed")]
    SsidTooLong(usize),

    #[error("password is {0} bytes, at most 63 allowed")]
    PasswordTooLong(usize),
}

/// Network name and passphrase of the access point
#[derive(Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: String<MAX_SSID_LEN>,
    password: String<MAX_PASSWORD_LEN>,
}

impl WifiCredentials {
    /// Validate and store credentials; an empty password means an open network
    pub fn new(ssid: &str, password: &str) -> Result<Self, CredentialsError> {
        if ssid.is_empty() {
            return Err(CredentialsError::EmptySsid);
        }
        let ssid = String::try_from(ssid).map_err(|_| CredentialsError::SsidTooLong(ssid.len()))?;
        let password = String::try_from(password)
            .map_err(|_| CredentialsError::PasswordTooLong(password.len()))?;
        Ok(Self { ssid, password })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keeps the passphrase out of logs
impl fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &"***")
            .finish()
    }
}

/// Station-mode wireless interface
///
/// None of the operations report failure: a link that cannot associate just
/// never yields an address, and the caller keeps polling.
pub trait NetworkLink {
    /// Bring the interface up in station mode
    fn activate(&mut self);

    /// Request association with an access point
    fn associate(&mut self, credentials: &WifiCredentials);

    /// Current address, once associated and configured
    fn poll_address(&mut self) -> Option<IpAddr>;
}

impl<T: NetworkLink + ?Sized> NetworkLink for &mut T {
    fn activate(&mut self) {
        (**self).activate()
    }

    fn associate(&mut self, credentials: &WifiCredentials) {
        (**self).associate(credentials)
    }

    fn poll_address(&mut self) -> Option<IpAddr> {
        (**self).poll_address()
    }
}

/// An associated link together with the address it obtained
#[derive(Debug)]
pub struct NetworkHandle<L> {
    link: L,
    address: IpAddr,
}

impl<L> NetworkHandle<L> {
    /// Address assigned when the link came up
    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn into_link(self) -> L {
        self.link
    }
}

/// Join the access point, waiting as long as it takes
///
/// Polls `link` every `poll_interval` until it reports an address. Never
/// returns otherwise.
pub async fn connect_network<L: NetworkLink>(
    mut link: L,
    credentials: &WifiCredentials,
    poll_interval: Duration,
) -> NetworkHandle<L> {
    link.activate();
    link.associate(credentials);
    info!("Connecting to Wi-Fi network {:?}", credentials.ssid());

    let mut polls: u64 = 0;
    let address = loop {
        if let Some(address) = link.poll_address() {
            break address;
        }
        polls += 1;
        if polls % PROGRESS_EVERY == 0 {
            info!("Still waiting for {:?} after {} polls", credentials.ssid(), polls);
        } else {
            debug!("No address yet (poll {})", polls);
        }
        tokio::time::sleep(poll_interval).await;
    };

    info!("Wi-Fi connected, address {}", address);
    NetworkHandle { link, address }
}
