use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    /// Lifetime of a session token, in minutes.
    pub session_ttl_minutes: i64,
    pub secure_cookies: bool,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_or("DATABASE_URL", "sqlite://barbershop.db");
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("BARBERSHOP_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid BARBERSHOP_HOST: {e}"))?;

        let port: u16 = env_or("BARBERSHOP_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid BARBERSHOP_PORT: {e}"))?;

        let session_ttl_minutes: i64 = env_or("BARBERSHOP_SESSION_TTL_MINUTES", "720")
            .parse()
            .map_err(|e| format!("Invalid BARBERSHOP_SESSION_TTL_MINUTES: {e}"))?;
        if session_ttl_minutes <= 0 {
            return Err("BARBERSHOP_SESSION_TTL_MINUTES must be positive".to_string());
        }

        let secure_cookies = matches!(
            env_or("BARBERSHOP_SECURE_COOKIES", "false").as_str(),
            "1" | "true" | "yes"
        );

        let max_body_size: usize = env_or("BARBERSHOP_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid BARBERSHOP_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("BARBERSHOP_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            session_ttl_minutes,
            secure_cookies,
            max_body_size,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
