//! Static reference data about well-known ports.
//! The history details view uses it to name the services behind open ports and
//! to highlight the ones the scan engine grades as risky.

use std::fmt;

/// How the scan engine weighs an open port when grading a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PortRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for PortRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRisk::Low => write!(f, "Low"),
            PortRisk::Medium => write!(f, "Medium"),
            PortRisk::High => write!(f, "High"),
        }
    }
}

pub struct ServiceDetail {
    pub port: u16,
    pub name: &'static str,
    pub risk: PortRisk,
}

static SERVICES: &[ServiceDetail] = &[
    ServiceDetail { port: 21, name: "FTP", risk: PortRisk::High },
    ServiceDetail { port: 22, name: "SSH", risk: PortRisk::Low },
    ServiceDetail { port: 23, name: "Telnet", risk: PortRisk::High },
    ServiceDetail { port: 25, name: "SMTP", risk: PortRisk::Medium },
    ServiceDetail { port: 53, name: "DNS", risk: PortRisk::Medium },
    ServiceDetail { port: 80, name: "HTTP", risk: PortRisk::Low },
    ServiceDetail { port: 110, name: "POP3", risk: PortRisk::Medium },
    ServiceDetail { port: 135, name: "RPC", risk: PortRisk::High },
    ServiceDetail { port: 139, name: "NetBIOS", risk: PortRisk::High },
    ServiceDetail { port: 143, name: "IMAP", risk: PortRisk::Medium },
    ServiceDetail { port: 443, name: "HTTPS", risk: PortRisk::Low },
    ServiceDetail { port: 445, name: "SMB", risk: PortRisk::High },
    ServiceDetail { port: 993, name: "IMAPS", risk: PortRisk::Medium },
    ServiceDetail { port: 995, name: "POP3S", risk: PortRisk::Medium },
    ServiceDetail { port: 1433, name: "MSSQL", risk: PortRisk::High },
    ServiceDetail { port: 1723, name: "PPTP", risk: PortRisk::Low },
    ServiceDetail { port: 3389, name: "RDP", risk: PortRisk::High },
    ServiceDetail { port: 5900, name: "VNC", risk: PortRisk::Low },
];

pub fn get_service_detail(port: u16) -> Option<&'static ServiceDetail> {
    SERVICES.iter().find(|s| s.port == port)
}

/// Service name for `port`, or "Unknown".
pub fn service_name(port: u16) -> &'static str {
    get_service_detail(port).map(|s| s.name).unwrap_or("Unknown")
}

pub fn port_risk(port: u16) -> PortRisk {
    get_service_detail(port).map(|s| s.risk).unwrap_or(PortRisk::Low)
}
