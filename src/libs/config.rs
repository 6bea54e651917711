// config.rs

/// Database file used when the caller does not name one.
pub const DEFAULT_DATABASE: &str = "database.db";

const URL_SCHEMES: &[&str] = &["sqlite:", "postgres:", "postgresql:", "mysql:", "mariadb:"];

/// Where tables get created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub locator: String,
}

impl StoreConfig {
    /// Accepts a connection URL or a bare SQLite file path.
    ///
    /// Paths become `sqlite://<path>?mode=rwc` so the file is created on first use.
    pub fn new(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        if URL_SCHEMES.iter().any(|s| locator.starts_with(s)) {
            Self { locator }
        } else {
            Self {
                locator: format!("sqlite://{}?mode=rwc", locator),
            }
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_database_db() {
        assert_eq!(
            StoreConfig::default().locator,
            "sqlite://database.db?mode=rwc"
        );
    }

    #[test]
    fn urls_pass_through() {
        let url = "postgres://postgres@localhost:5432/postgres";
        assert_eq!(StoreConfig::new(url).locator, url);
        assert_eq!(StoreConfig::new("sqlite::memory:").locator, "sqlite::memory:");
    }

    #[test]
    fn paths_become_sqlite_urls() {
        assert_eq!(
            StoreConfig::new("/tmp/app.db").locator,
            "sqlite:///tmp/app.db?mode=rwc"
        );
    }
}
