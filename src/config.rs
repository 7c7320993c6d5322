use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
	pub host: String,
	pub port: u16,
	pub static_dir: String,
}

impl AppConfig {
	pub fn from_env() -> Self {
		Self {
			host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
			port: std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000),
			static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
		}
	}

	pub fn bind_addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self { host: "0.0.0.0".to_string(), port: 3000, static_dir: "public".to_string() }
	}
}
