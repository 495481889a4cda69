//! Page rendering
//!
//! Plain HTML strings; no templating engine. The interesting part is the
//! guide/platform model — the markup is display glue.

use crate::config::DashboardConfig;
use crate::metrics::SystemStats;
use crate::services::ServiceLink;

/// Client platforms the setup guides cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Windows,
    Linux,
    Macos,
}

impl Platform {
    /// Parse a path segment into a platform
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "android" => Some(Self::Android),
            "windows" => Some(Self::Windows),
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::Macos),
            _ => None,
        }
    }

    /// The path segment for this platform
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Macos => "macos",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::Macos => "macOS",
        }
    }
}

/// Setup guides served by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guide {
    Wireguard,
    SshTunnel,
}

impl Guide {
    /// Platforms this guide has instructions for
    pub fn platforms(&self) -> &'static [Platform] {
        match self {
            Self::Wireguard => &[
                Platform::Android,
                Platform::Windows,
                Platform::Linux,
                Platform::Macos,
            ],
            Self::SshTunnel => &[Platform::Linux, Platform::Macos, Platform::Windows],
        }
    }

    /// Resolve a path segment against this guide's allow-list
    pub fn platform(&self, segment: &str) -> Option<Platform> {
        Platform::parse(segment).filter(|p| self.platforms().contains(p))
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Wireguard => "/wireguard",
            Self::SshTunnel => "/ssh-tunnel",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Wireguard => "WireGuard VPN Setup",
            Self::SshTunnel => "SSH Tunnel Setup",
        }
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; background: #111827; color: #e5e7eb; margin: 2rem; }}\n\
         a {{ color: inherit; text-decoration: none; }}\n\
         .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(14rem, 1fr)); gap: 1rem; }}\n\
         .card {{ border-radius: 0.5rem; padding: 1rem; background: #1f2937; border-left: 4px solid var(--accent); }}\n\
         .stats span {{ margin-right: 1.5rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n"
    )
}

fn stat(value: &Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v, unit),
        None => "unknown".to_string(),
    }
}

/// The landing page: service links plus system stats
pub fn index(host: &str, services: &[ServiceLink], stats: &SystemStats) -> String {
    let mut cards = String::new();
    for service in services {
        cards.push_str(&format!(
            "<a class=\"card\" style=\"--accent: {color}\" href=\"{url}\">\
             <strong>{name}</strong><br>\
             <small data-icon=\"{icon}\">{description}</small>\
             </a>\n",
            color = service.color,
            url = service.url(host),
            name = service.name,
            icon = service.icon,
            description = service.description,
        ));
    }

    let stats_line = format!(
        "<p class=\"stats\">\
         <span>CPU: {cpu}</span>\
         <span>Memory: {memory} of {memory_total}</span>\
         <span>Disk: {disk} of {disk_total}</span>\
         <span>Uptime: {uptime}</span>\
         </p>",
        cpu = stat(&stats.cpu, "%"),
        memory = stat(&stats.memory, "%"),
        memory_total = stat(&stats.memory_total_gb, " GB"),
        disk = stat(&stats.disk, "%"),
        disk_total = stat(&stats.disk_total_gb, " GB"),
        uptime = stats.uptime.as_deref().unwrap_or("unknown"),
    );

    page(
        "Homelab",
        &format!(
            "<h1>Homelab</h1>\n{stats_line}\n<div class=\"grid\">\n{cards}</div>\n"
        ),
    )
}

/// A guide's index page: links to each supported platform
pub fn guide_index(guide: Guide) -> String {
    let mut links = String::new();
    for platform in guide.platforms() {
        links.push_str(&format!(
            "<li><a href=\"{}/{}\">{}</a></li>\n",
            guide.path(),
            platform.slug(),
            platform.title(),
        ));
    }

    page(
        guide.title(),
        &format!(
            "<h1>{}</h1>\n<p>Pick your platform:</p>\n<ul>\n{}</ul>\n<p><a href=\"/\">Back to dashboard</a></p>\n",
            guide.title(),
            links
        ),
    )
}

/// Platform-specific guide instructions
pub fn guide_platform(guide: Guide, platform: Platform, config: &DashboardConfig) -> String {
    let body = match guide {
        Guide::Wireguard => format!(
            "<h1>{title} on {platform}</h1>\n\
             <ol>\n\
             <li>Install the WireGuard client for {platform}.</li>\n\
             <li>Import the tunnel configuration from your administrator.</li>\n\
             <li>Set the endpoint to <code>{server}:{port}</code>.</li>\n\
             <li>Activate the tunnel and open the dashboard.</li>\n\
             </ol>\n\
             <p><a href=\"{back}\">Other platforms</a></p>\n",
            title = guide.title(),
            platform = platform.title(),
            server = config.wireguard.server,
            port = config.wireguard.port,
            back = guide.path(),
        ),
        Guide::SshTunnel => format!(
            "<h1>{title} on {platform}</h1>\n\
             <p>Forward the console port over SSH:</p>\n\
             <pre>ssh -L 7070:localhost:7070 {user}@{host}</pre>\n\
             <p>Then browse to <code>http://localhost:7070</code>.</p>\n\
             <p><a href=\"{back}\">Other platforms</a></p>\n",
            title = guide.title(),
            platform = platform.title(),
            user = config.ssh.user,
            host = config.ssh.host,
            back = guide.path(),
        ),
    };

    page(guide.title(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SERVICES;

    #[test]
    fn platform_parse_is_exact() {
        assert_eq!(Platform::parse("linux"), Some(Platform::Linux));
        assert_eq!(Platform::parse("Linux"), None);
        assert_eq!(Platform::parse("ios"), None);
        assert_eq!(Platform::parse(""), None);
    }

    #[test]
    fn wireguard_covers_android_but_ssh_tunnel_does_not() {
        assert_eq!(
            Guide::Wireguard.platform("android"),
            Some(Platform::Android)
        );
        assert_eq!(Guide::SshTunnel.platform("android"), None);
        assert_eq!(Guide::SshTunnel.platform("macos"), Some(Platform::Macos));
    }

    #[test]
    fn index_renders_every_service() {
        let stats = SystemStats::default();
        let html = index("10.0.0.5", SERVICES, &stats);

        for service in SERVICES {
            assert!(html.contains(service.name), "missing {}", service.name);
        }
        assert!(html.contains("http://10.0.0.5:8096"));
        assert!(html.contains("/ssh-tunnel"));
    }

    #[test]
    fn index_renders_unknown_for_missing_metrics() {
        let stats = SystemStats::default();
        let html = index("10.0.0.5", SERVICES, &stats);
        assert!(html.contains("Uptime: unknown"));
    }

    #[test]
    fn index_renders_present_metrics() {
        let stats = SystemStats {
            cpu: Some(12.5),
            uptime: Some("3d 5h 42m".to_string()),
            ..Default::default()
        };
        let html = index("10.0.0.5", SERVICES, &stats);
        assert!(html.contains("CPU: 12.5%"));
        assert!(html.contains("3d 5h 42m"));
    }
}
