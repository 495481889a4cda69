//! Service metadata table
//!
//! Static definitions of the cluster's services. Pure display data; the
//! dashboard derives links from it per request.

/// One entry on the landing page
#[derive(Debug, Clone, Copy)]
pub struct ServiceLink {
    pub name: &'static str,
    pub port: u16,
    pub icon: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    /// Only reachable via an SSH tunnel; linked to the tunnel guide
    pub localhost_only: bool,
}

impl ServiceLink {
    /// URL for this service given the effective host
    pub fn url(&self, host: &str) -> String {
        if self.localhost_only {
            "/ssh-tunnel".to_string()
        } else {
            format!("http://{}:{}", host, self.port)
        }
    }
}

/// The configured services, in display order
pub const SERVICES: &[ServiceLink] = &[
    ServiceLink {
        name: "Jellyfin",
        port: 8096,
        icon: "film",
        description: "Media Server",
        color: "#00a4dc",
        localhost_only: false,
    },
    ServiceLink {
        name: "Home Assistant",
        port: 8123,
        icon: "home",
        description: "Home Automation",
        color: "#41bdf5",
        localhost_only: false,
    },
    ServiceLink {
        name: "Transmission",
        port: 9091,
        icon: "download",
        description: "Torrent Client",
        color: "#b50d0d",
        localhost_only: false,
    },
    ServiceLink {
        name: "Nextcloud",
        port: 8080,
        icon: "cloud",
        description: "Cloud Storage",
        color: "#0082c9",
        localhost_only: false,
    },
    ServiceLink {
        name: "Syncthing",
        port: 8384,
        icon: "sync",
        description: "File Sync",
        color: "#0891d1",
        localhost_only: false,
    },
    ServiceLink {
        name: "MeshChat",
        port: 8000,
        icon: "comments",
        description: "Mesh Network Chat",
        color: "#6366f1",
        localhost_only: false,
    },
    ServiceLink {
        name: "Grafana",
        port: 3000,
        icon: "chart-line",
        description: "Monitoring Dashboards",
        color: "#f46800",
        localhost_only: false,
    },
    ServiceLink {
        name: "Prometheus",
        port: 9090,
        icon: "database",
        description: "Metrics Store",
        color: "#e6522c",
        localhost_only: false,
    },
    ServiceLink {
        name: "i2pd Console",
        port: 7070,
        icon: "user-secret",
        description: "I2P Router (SSH Tunnel)",
        color: "#9333ea",
        localhost_only: true,
    },
];
