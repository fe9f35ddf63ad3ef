use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API request failed with {}: {}", status_code, message)]
    Api {
        status_code: StatusCode,
        message: String,
    },

    #[error("Invalid endpoint `{}`", endpoint)]
    BadEndpoint { endpoint: url::Url },

    #[error(
        "Expected <name>, <owner>.<name> or mapbox://tileset-source/<owner>/<name> \
         where <name> is 1-32 characters of [A-Za-z0-9_-], got: {}",
        identifier
    )]
    BadTilesetSourceId { identifier: String },

    #[error("Expected a tileset id without `.` or `/`, got: {}", identifier)]
    BadTilesetId { identifier: String },

    #[error(
        "Expected a zoom range with 0 <= min <= max <= {}, got: {}..{}",
        crate::resources::tileset::MAX_ZOOM,
        min_zoom,
        max_zoom
    )]
    BadZoomRange { min_zoom: u8, max_zoom: u8 },

    #[error("Could not parse JSON response.")]
    BadJsonResponse(#[source] reqwest::Error),

    #[error("Failed to initialise the HTTP client")]
    BuildHttpClient(#[source] reqwest::Error),

    #[error("HTTP request error: {}", message)]
    ReqwestError {
        message: String,
        source: reqwest::Error,
    },

    #[error("An unknown error has occurred: {}", message)]
    Unknown {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl Error {
    /// Whether this is a remote 404, i.e. the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status_code, .. } if *status_code == StatusCode::NOT_FOUND)
    }
}
