use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Oncotrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    "oncotrack=info".to_string()
}

/// Get the application data directory.
/// `ONCOTRACK_DATA_DIR` overrides; defaults to ~/Oncotrack/
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ONCOTRACK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Path of the SQLite database file
pub fn database_path() -> PathBuf {
    app_data_dir().join("oncotrack.db")
}

/// Address the HTTP server binds to.
/// `ONCOTRACK_ADDR` overrides; defaults to 127.0.0.1:8000
pub fn bind_addr() -> SocketAddr {
    std::env::var("ONCOTRACK_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8000)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("oncotrack.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_bind_addr_is_loopback() {
        if std::env::var("ONCOTRACK_ADDR").is_err() {
            let addr = bind_addr();
            assert_eq!(addr.port(), 8000);
            assert!(addr.ip().is_loopback());
        }
    }
}
