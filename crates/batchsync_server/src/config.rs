//! Server configuration.

/// Configuration for the batch server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of mutations accepted in one batch.
    pub max_push_batch: u32,
}

impl ServerConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self {
            max_push_batch: 100,
        }
    }

    /// Sets the maximum push batch size.
    pub fn with_max_push_batch(mut self, size: u32) -> Self {
        self.max_push_batch = size;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
