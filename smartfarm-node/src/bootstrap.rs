//! Two-phase start-up: network first, then the broker session
//!
//! The phases have opposite failure policies. Joining the network waits for
//! as long as it takes; opening the session is attempted once and its
//! failure is fatal for the process.

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use log::{error, info};
use smartfarm_connectors::{connect_network, NetworkHandle, NetworkLink, WifiCredentials};
use thiserror::Error;

/// Connections established at start-up, owned by the node for its lifetime
#[derive(Debug)]
pub struct NodeContext<L, C> {
    pub network: NetworkHandle<L>,
    pub session: C,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("messaging session could not be opened")]
    Messaging(#[source] Box<dyn StdError + Send + Sync>),
}

/// Bring the node online
///
/// `open_session` is only polled once the network is up, so passing an
/// unstarted connect future (e.g. `MqttConnector::connect(config)`) keeps
/// the ordering.
pub async fn bootstrap<L, C, E, F>(
    link: L,
    credentials: &WifiCredentials,
    poll_interval: Duration,
    open_session: F,
) -> Result<NodeContext<L, C>, BootstrapError>
where
    L: NetworkLink,
    F: Future<Output = Result<C, E>>,
    E: StdError + Send + Sync + 'static,
{
    let network = connect_network(link, credentials, poll_interval).await;

    match open_session.await {
        Ok(session) => {
            info!("Node online at {}", network.address());
            Ok(NodeContext { network, session })
        }
        Err(e) => {
            error!("Messaging bring-up failed: {}", e);
            Err(BootstrapError::Messaging(Box::new(e)))
        }
    }
}
