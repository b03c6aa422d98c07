#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Retention window for the age-based cleanup sweep.
    pub file_retention_days: u32,
    pub cleanup_initial_delay_secs: u64,
    pub cleanup_interval_secs: u64,
    pub event_queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            file_retention_days: std::env::var("FILE_RETENTION_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(180),
            cleanup_initial_delay_secs: std::env::var("CLEANUP_INITIAL_DELAY_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            cleanup_interval_secs: std::env::var("CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86_400), // daily
            event_queue_capacity: std::env::var("EVENT_QUEUE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.file_retention_days == 0 {
            return Err("FILE_RETENTION_DAYS must be at least 1".to_string());
        }

        if self.cleanup_interval_secs < 60 {
            return Err("CLEANUP_INTERVAL_SECS must be at least 60 seconds".to_string());
        }

        if self.event_queue_capacity == 0 {
            return Err("EVENT_QUEUE_CAPACITY must be at least 1".to_string());
        }

        Ok(())
    }
}
