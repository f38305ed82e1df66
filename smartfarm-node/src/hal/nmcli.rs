use std::net::IpAddr;
use std::process::{Child, Command, Stdio};

use log::{debug, warn};
use smartfarm_connectors::{NetworkLink, WifiCredentials};

/// Station interface managed by NetworkManager through `nmcli`
///
/// Association runs in the background. If it ends without a connection
/// (access point out of range, wrong passphrase) it is started again on the
/// next poll, so the link keeps trying for as long as it is polled.
#[derive(Debug)]
pub struct NmcliLink {
    interface: String,
    credentials: Option<WifiCredentials>,
    association: Option<Child>,
}

impl NmcliLink {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            credentials: None,
            association: None,
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    fn start_association(&mut self) {
        let Some(credentials) = &self.credentials else {
            return;
        };
        let mut command = Command::new("nmcli");
        command
            .args(["--wait", "30", "device", "wifi", "connect", credentials.ssid()])
            .args(["ifname", &self.interface]);
        if !credentials.password().is_empty() {
            command.args(["password", credentials.password()]);
        }

        match command.stdout(Stdio::null()).stderr(Stdio::null()).spawn() {
            Ok(child) => self.association = Some(child),
            Err(e) => warn!("Cannot run nmcli: {}", e),
        }
    }

    /// Reap a finished association; restart it if it did not succeed
    fn check_association(&mut self) {
        let finished = match self.association.as_mut().map(Child::try_wait) {
            Some(Ok(Some(status))) => Some(status.success()),
            Some(Ok(None)) => None,
            Some(Err(e)) => {
                warn!("Lost track of nmcli: {}", e);
                Some(false)
            }
            // Spawn failed earlier
            None => Some(false),
        };

        if finished == Some(false) {
            debug!("Association with {} not established, retrying", self.interface);
            self.association = None;
            self.start_association();
        }
    }
}

impl NetworkLink for NmcliLink {
    fn activate(&mut self) {
        run_nmcli(&["radio", "wifi", "on"]);
        run_nmcli(&["device", "set", &self.interface, "managed", "yes"]);
    }

    fn associate(&mut self, credentials: &WifiCredentials) {
        self.credentials = Some(credentials.clone());
        self.start_association();
    }

    fn poll_address(&mut self) -> Option<IpAddr> {
        self.check_association();
        let output = Command::new("nmcli")
            .args(["-g", "IP4.ADDRESS", "device", "show", &self.interface])
            .output();
        match output {
            Ok(output) if output.status.success() => {
                parse_ip4_address(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                debug!("nmcli device show exited with {}", output.status);
                None
            }
            Err(e) => {
                warn!("Cannot run nmcli: {}", e);
                None
            }
        }
    }
}

impl Drop for NmcliLink {
    fn drop(&mut self) {
        if let Some(mut child) = self.association.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn run_nmcli(args: &[&str]) {
    match Command::new("nmcli").args(args).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("nmcli {} exited with {}", args.join(" "), status),
        Err(e) => warn!("Cannot run nmcli: {}", e),
    }
}

/// First address of `nmcli -g IP4.ADDRESS` output (`a.b.c.d/len | ...`)
fn parse_ip4_address(output: &str) -> Option<IpAddr> {
    output
        .split(['|', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .find_map(|entry| entry.split('/').next()?.parse().ok())
}
