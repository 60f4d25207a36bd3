use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub query: QueryConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    /// Process-local store, contents are lost on restart
    Memory,
    /// Remote document database reached over its JSON API
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub api_key_service_url: Option<String>,
    pub session_service_url: Option<String>,
    pub timeout_secs: u64,
    /// Permission an API key must carry to reach the write routes
    pub write_permission: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub max_limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = v.parse().unwrap_or(self.server.max_request_size_bytes);
        }

        // Store overrides
        if let Ok(v) = env::var("STORE_BACKEND") {
            self.store.backend = match v.to_ascii_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                "http" => StoreBackend::Http,
                _ => self.store.backend,
            };
        }
        if let Ok(v) = env::var("STORE_BASE_URL") {
            self.store.base_url = Some(v);
        }
        if let Ok(v) = env::var("STORE_TIMEOUT_SECS") {
            self.store.timeout_secs = v.parse().unwrap_or(self.store.timeout_secs);
        }
        if let Ok(v) = env::var("STORE_COLLECTION") {
            if !v.trim().is_empty() {
                self.store.collection = v.trim().to_string();
            }
        }

        // Auth overrides
        if let Ok(v) = env::var("API_KEY_SERVICE_URL") {
            self.auth.api_key_service_url = Some(v);
        }
        if let Ok(v) = env::var("SESSION_SERVICE_URL") {
            self.auth.session_service_url = Some(v);
        }
        if let Ok(v) = env::var("AUTH_TIMEOUT_SECS") {
            self.auth.timeout_secs = v.parse().unwrap_or(self.auth.timeout_secs);
        }
        if let Ok(v) = env::var("AUTH_WRITE_PERMISSION") {
            if !v.trim().is_empty() {
                self.auth.write_permission = v.trim().to_string();
            }
        }

        // Query overrides
        if let Ok(v) = env::var("QUERY_MAX_LIMIT") {
            self.query.max_limit = v.parse().ok();
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8082,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                base_url: None,
                timeout_secs: 30,
                collection: "products".to_string(),
            },
            auth: AuthConfig {
                api_key_service_url: None,
                session_service_url: None,
                timeout_secs: 30,
                write_permission: "write:products".to_string(),
            },
            query: QueryConfig { max_limit: Some(1000) },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8082,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            store: StoreConfig {
                backend: StoreBackend::Http,
                base_url: None,
                timeout_secs: 10,
                collection: "products".to_string(),
            },
            auth: AuthConfig {
                api_key_service_url: None,
                session_service_url: None,
                timeout_secs: 10,
                write_permission: "write:products".to_string(),
            },
            query: QueryConfig { max_limit: Some(500) },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8082,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            store: StoreConfig {
                backend: StoreBackend::Http,
                base_url: None,
                timeout_secs: 5,
                collection: "products".to_string(),
            },
            auth: AuthConfig {
                api_key_service_url: None,
                session_service_url: None,
                timeout_secs: 5,
                write_permission: "write:products".to_string(),
            },
            query: QueryConfig { max_limit: Some(100) },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
