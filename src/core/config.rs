use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub intake: IntakeConfig,
    pub dashboard: DashboardConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Report intake settings (media limits, positioning, forwarding)
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Largest accepted media attachment in bytes
    pub max_media_size: usize,
    /// How long the host waits for a device position when the form left coordinates blank
    pub positioning_timeout: Duration,
    /// External intake endpoint; reports are only kept in memory when unset
    pub sink_url: Option<String>,
}

/// Dashboard presentation settings
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Offset used to decide which reports were submitted "today"
    pub utc_offset: FixedOffset,
    pub heat_radius_px: u32,
    pub heat_blur_px: u32,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            intake: IntakeConfig::from_env()?,
            dashboard: DashboardConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 12 * 1024 * 1024; // 12MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl IntakeConfig {
    const DEFAULT_MAX_MEDIA_SIZE: usize = 10 * 1024 * 1024; // 10MB
    const DEFAULT_POSITIONING_TIMEOUT_MS: u64 = 1500;

    pub fn from_env() -> Result<Self, String> {
        let max_media_size = env::var("MAX_MEDIA_SIZE_BYTES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_MEDIA_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_MEDIA_SIZE_BYTES must be a valid number".to_string())?;

        let positioning_timeout_ms = env::var("POSITIONING_TIMEOUT_MS")
            .unwrap_or_else(|_| Self::DEFAULT_POSITIONING_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "POSITIONING_TIMEOUT_MS must be a valid number".to_string())?;

        let sink_url = env::var("REPORT_SINK_URL").ok().filter(|s| !s.is_empty());

        Ok(Self {
            max_media_size,
            positioning_timeout: Duration::from_millis(positioning_timeout_ms),
            sink_url,
        })
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_media_size: Self::DEFAULT_MAX_MEDIA_SIZE,
            positioning_timeout: Duration::from_millis(Self::DEFAULT_POSITIONING_TIMEOUT_MS),
            sink_url: None,
        }
    }
}

impl DashboardConfig {
    const DEFAULT_HEAT_RADIUS_PX: u32 = 25;
    const DEFAULT_HEAT_BLUR_PX: u32 = 15;

    pub fn from_env() -> Result<Self, String> {
        let offset_minutes = env::var("DASHBOARD_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<i32>()
            .map_err(|_| "DASHBOARD_UTC_OFFSET_MINUTES must be a valid number".to_string())?;

        let utc_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| "DASHBOARD_UTC_OFFSET_MINUTES is out of range".to_string())?;

        let heat_radius_px = env::var("HEAT_RADIUS_PX")
            .unwrap_or_else(|_| Self::DEFAULT_HEAT_RADIUS_PX.to_string())
            .parse::<u32>()
            .map_err(|_| "HEAT_RADIUS_PX must be a valid number".to_string())?;

        let heat_blur_px = env::var("HEAT_BLUR_PX")
            .unwrap_or_else(|_| Self::DEFAULT_HEAT_BLUR_PX.to_string())
            .parse::<u32>()
            .map_err(|_| "HEAT_BLUR_PX must be a valid number".to_string())?;

        Ok(Self {
            utc_offset,
            heat_radius_px,
            heat_blur_px,
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            heat_radius_px: Self::DEFAULT_HEAT_RADIUS_PX,
            heat_blur_px: Self::DEFAULT_HEAT_BLUR_PX,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "HazardWatch API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Ocean hazard reporting and dashboard API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
