/// Registry service configuration loaded from environment variables.
#[derive(Debug)]
pub struct RegistryConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3121). Env var: `REGISTRY_PORT`.
    pub registry_port: u16,
    /// Base URL of the IP geolocation service (default "http://ipapi.co").
    pub geoip_base_url: String,
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            registry_port: std::env::var("REGISTRY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3121),
            geoip_base_url: std::env::var("GEOIP_BASE_URL")
                .unwrap_or_else(|_| "http://ipapi.co".to_owned()),
        }
    }
}
