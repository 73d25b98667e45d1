use serde::Deserialize;

pub const DEFAULT_ONYX_BASE_URL: &str = "https://api.onyx.dev";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub onyx: Onyx,
	#[serde(default)]
	pub notes: Notes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

/// Connection settings for the Onyx Cloud Database.
///
/// Credentials are optional here. A missing credential is reported by the client at request
/// time, so the API can start before Onyx is provisioned.
#[derive(Debug, Clone, Deserialize)]
pub struct Onyx {
	#[serde(default = "default_base_url")]
	pub base_url: String,
	#[serde(default)]
	pub database_id: Option<String>,
	#[serde(default)]
	pub api_key: Option<String>,
	#[serde(default)]
	pub api_secret: Option<String>,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}
impl Default for Onyx {
	fn default() -> Self {
		Self {
			base_url: default_base_url(),
			database_id: None,
			api_key: None,
			api_secret: None,
			timeout_ms: default_timeout_ms(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Notes {
	#[serde(default = "default_table")]
	pub table: String,
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
	/// Assign `createdAt`/`updatedAt` on write when the payload leaves them out.
	#[serde(default = "default_true")]
	pub stamp_timestamps: bool,
}
impl Default for Notes {
	fn default() -> Self {
		Self {
			table: default_table(),
			default_limit: default_limit(),
			max_limit: default_max_limit(),
			stamp_timestamps: default_true(),
		}
	}
}

fn default_base_url() -> String {
	DEFAULT_ONYX_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_table() -> String {
	"Note".to_string()
}

fn default_limit() -> u32 {
	50
}

fn default_max_limit() -> u32 {
	200
}

fn default_true() -> bool {
	true
}
