pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The two failure kinds of the Onyx client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The client cannot be built from the supplied settings.
	#[error("{message}")]
	Config { message: String },
	/// The request failed in transit or Onyx answered with a non-success status.
	#[error("{message}")]
	Http { status: Option<u16>, message: String },
}
impl Error {
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Config { .. } => None,
			Self::Http { status, .. } => *status,
		}
	}
}

impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		let message = if err.is_timeout() {
			format!("Onyx request timed out: {err}")
		} else if err.is_connect() {
			format!("Failed to connect to Onyx: {err}")
		} else {
			format!("Onyx request failed: {err}")
		};

		Self::Http { status: err.status().map(|status| status.as_u16()), message }
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Http { status: None, message: format!("Onyx returned an invalid JSON body: {err}") }
	}
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
	fn from(_: reqwest::header::InvalidHeaderValue) -> Self {
		Self::Config { message: "Onyx credentials contain characters invalid in a header.".to_string() }
	}
}
