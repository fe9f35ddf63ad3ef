#![deny(clippy::all)]
mod error;
pub mod resources;
pub mod retry;
pub mod workflow;

use http::Method;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::{
    blocking::{
        multipart::{Form, Part},
        Client as HttpClient, RequestBuilder, Response as HttpResponse,
    },
    header::{self, HeaderMap, HeaderValue},
    Proxy, Result as ReqwestResult,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::resources::{
    check_status, into_result,
    tileset::{NewTileset, PublishResponse},
    tileset_source::{GetResponse as GetTilesetSourceResponse, WriteResponse},
    MessageResponse,
};

use crate::retry::{Retrier, RetryConfig};

pub use crate::{
    error::{Error, Result},
    resources::{
        job::{Job, JobId, JobStage},
        tileset::{Attribution, Layer, Recipe, Tileset, TilesetId, ZoomRange, MAX_ZOOM},
        tileset_source::{IdForm, SourcePayload, TilesetSource, TilesetSourceId},
    },
    workflow::{reconcile_and_publish, JobObservation, ReconcileRequest, SourcePath},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token(pub String);

pub struct Config {
    pub endpoint: Url,
    /// Account owning the tileset sources and tilesets addressed by the client.
    pub owner: String,
    pub token: Token,
    pub accept_invalid_certificates: bool,
    pub proxy: Option<Url>,
    /// Retry settings to use, if any. These only apply to GET requests, writes to the tiling
    /// service are never retried.
    pub retry_config: Option<RetryConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.clone(),
            owner: String::new(),
            token: Token("".to_owned()),
            accept_invalid_certificates: false,
            proxy: None,
            retry_config: None,
        }
    }
}

/// The remote calls the reconciliation workflow is built from.
pub trait TilesetService {
    /// `Ok(None)` if the service has no such source.
    fn get_tileset_source(&self, id: &TilesetSourceId) -> Result<Option<TilesetSource>>;

    fn create_tileset_source(
        &self,
        id: &TilesetSourceId,
        payload: &SourcePayload,
    ) -> Result<TilesetSource>;

    fn update_tileset_source(
        &self,
        id: &TilesetSourceId,
        payload: &SourcePayload,
    ) -> Result<TilesetSource>;

    fn create_tileset(&self, tileset_id: &TilesetId, name: &str, recipe: &Recipe) -> Result<()>;

    fn publish_tileset(&self, tileset_id: &TilesetId) -> Result<JobId>;

    fn get_job(&self, tileset_id: &TilesetId, job_id: &JobId) -> Result<Job>;
}

#[derive(Debug)]
pub struct Client {
    endpoints: Endpoints,
    owner: String,
    token: Token,
    http_client: HttpClient,
    headers: HeaderMap,
    retrier: Option<Retrier>,
}

impl Client {
    /// Create a new API client.
    pub fn new(config: Config) -> Result<Client> {
        let http_client = build_http_client(&config)?;
        let headers = build_headers()?;
        let endpoints = Endpoints::new(config.endpoint)?;
        let retrier = config.retry_config.map(Retrier::new);
        Ok(Client {
            endpoints,
            owner: config.owner,
            token: config.token,
            http_client,
            headers,
            retrier,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// List the owner's tileset sources.
    pub fn get_tileset_sources(&self) -> Result<Vec<TilesetSource>> {
        Ok(self
            .get::<Vec<GetTilesetSourceResponse>>(self.endpoints.tileset_sources(&self.owner)?)?
            .into_iter()
            .map(TilesetSource::from)
            .collect())
    }

    /// Get a tileset source, or `None` if it does not exist.
    pub fn get_tileset_source(&self, id: &TilesetSourceId) -> Result<Option<TilesetSource>> {
        match self.get::<GetTilesetSourceResponse>(
            self.endpoints.tileset_source(&self.owner, id)?,
        ) {
            Ok(response) => Ok(Some(response.into())),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Create a tileset source from the payload.
    pub fn create_tileset_source(
        &self,
        id: &TilesetSourceId,
        payload: &SourcePayload,
    ) -> Result<TilesetSource> {
        Ok(self
            .upload::<WriteResponse>(
                Method::POST,
                self.endpoints.tileset_source(&self.owner, id)?,
                payload,
            )?
            .into())
    }

    /// Replace the contents of an existing tileset source with the payload.
    pub fn update_tileset_source(
        &self,
        id: &TilesetSourceId,
        payload: &SourcePayload,
    ) -> Result<TilesetSource> {
        Ok(self
            .upload::<WriteResponse>(
                Method::PUT,
                self.endpoints.tileset_source(&self.owner, id)?,
                payload,
            )?
            .into())
    }

    /// Delete a tileset source.
    pub fn delete_tileset_source(&self, id: &TilesetSourceId) -> Result<()> {
        self.delete(self.endpoints.tileset_source(&self.owner, id)?)
    }

    /// List the owner's tilesets.
    pub fn get_tilesets(&self) -> Result<Vec<Tileset>> {
        self.get(self.endpoints.tilesets(&self.owner)?)
    }

    /// Create an empty tileset which will be generated from `recipe` once published.
    pub fn create_tileset(&self, tileset_id: &TilesetId, name: &str, recipe: &Recipe) -> Result<()> {
        let response: MessageResponse = self.send_json(
            Method::POST,
            self.endpoints.tileset(&self.owner, tileset_id)?,
            &NewTileset {
                recipe,
                name,
                description: "",
                attribution: Vec::new(),
            },
        )?;
        debug!(
            "Created tileset `{}`: {}",
            tileset_id,
            response.message.unwrap_or_default()
        );
        Ok(())
    }

    /// Replace the recipe of an existing tileset.
    pub fn update_tileset_recipe(&self, tileset_id: &TilesetId, recipe: &Recipe) -> Result<()> {
        let http_response = self.send(
            self.http_client
                .request(
                    Method::PATCH,
                    self.endpoints.tileset_recipe(&self.owner, tileset_id)?,
                )
                .json(recipe),
        )?;
        check_status(http_response)?;
        Ok(())
    }

    /// Delete a tileset.
    pub fn delete_tileset(&self, tileset_id: &TilesetId) -> Result<()> {
        self.delete(self.endpoints.tileset(&self.owner, tileset_id)?)
    }

    /// Start processing the tileset's recipe, returning the id of the job doing the work.
    pub fn publish_tileset(&self, tileset_id: &TilesetId) -> Result<JobId> {
        let url = self.endpoints.tileset_publish(&self.owner, tileset_id)?;
        debug!("Attempting POST `{}`", url);
        let response: PublishResponse = into_result(self.send(self.http_client.post(url))?)?;
        debug!(
            "Published tileset `{}`: {}",
            tileset_id,
            response.message.unwrap_or_default()
        );
        Ok(JobId(response.job_id))
    }

    /// List the processing jobs of a tileset.
    pub fn get_jobs(&self, tileset_id: &TilesetId) -> Result<Vec<Job>> {
        self.get(self.endpoints.tileset_jobs(&self.owner, tileset_id)?)
    }

    /// Get a single processing job of a tileset.
    pub fn get_job(&self, tileset_id: &TilesetId, job_id: &JobId) -> Result<Job> {
        self.get(self.endpoints.tileset_job(&self.owner, tileset_id, job_id)?)
    }

    fn get<SuccessT>(&self, url: Url) -> Result<SuccessT>
    where
        for<'de> SuccessT: Deserialize<'de>,
    {
        debug!("Attempting GET `{}`", url);
        let http_response = self
            .with_retries(|| self.authorise(self.http_client.get(url.clone())).send())
            .map_err(|source| Error::ReqwestError {
                source,
                message: "GET operation failed.".to_owned(),
            })?;
        into_result(http_response)
    }

    fn delete(&self, url: Url) -> Result<()> {
        debug!("Attempting DELETE `{}`", url);
        check_status(self.send(self.http_client.delete(url))?)?;
        Ok(())
    }

    fn send_json<RequestT, SuccessT>(
        &self,
        method: Method,
        url: Url,
        body: &RequestT,
    ) -> Result<SuccessT>
    where
        RequestT: Serialize + ?Sized,
        for<'de> SuccessT: Deserialize<'de>,
    {
        debug!("Attempting {} `{}`", method, url);
        into_result(self.send(self.http_client.request(method, url).json(body))?)
    }

    fn upload<SuccessT>(&self, method: Method, url: Url, payload: &SourcePayload) -> Result<SuccessT>
    where
        for<'de> SuccessT: Deserialize<'de>,
    {
        debug!(
            "Attempting {} `{}` with `{}` ({} bytes)",
            method,
            url,
            payload.file_name,
            payload.content.len()
        );
        let part = Part::bytes(payload.content.clone())
            .file_name(payload.file_name.clone())
            .mime_str("application/octet-stream")
            .map_err(|source| Error::Unknown {
                message: "Could not build multipart upload".to_owned(),
                source: source.into(),
            })?;
        let form = Form::new().part("file", part);
        into_result(self.send(self.http_client.request(method, url).multipart(form))?)
    }

    /// Send a request once, writes are not retried.
    fn send(&self, request: RequestBuilder) -> Result<HttpResponse> {
        self.authorise(request)
            .send()
            .map_err(|source| Error::ReqwestError {
                message: "Request to the tiling service failed.".to_owned(),
                source,
            })
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .headers(self.headers.clone())
            .query(&[("access_token", &self.token.0)])
    }

    fn with_retries(
        &self,
        send_request: impl Fn() -> ReqwestResult<HttpResponse>,
    ) -> ReqwestResult<HttpResponse> {
        match &self.retrier {
            Some(retrier) => retrier.with_retries(send_request),
            None => send_request(),
        }
    }
}

impl TilesetService for Client {
    fn get_tileset_source(&self, id: &TilesetSourceId) -> Result<Option<TilesetSource>> {
        Client::get_tileset_source(self, id)
    }

    fn create_tileset_source(
        &self,
        id: &TilesetSourceId,
        payload: &SourcePayload,
    ) -> Result<TilesetSource> {
        Client::create_tileset_source(self, id, payload)
    }

    fn update_tileset_source(
        &self,
        id: &TilesetSourceId,
        payload: &SourcePayload,
    ) -> Result<TilesetSource> {
        Client::update_tileset_source(self, id, payload)
    }

    fn create_tileset(&self, tileset_id: &TilesetId, name: &str, recipe: &Recipe) -> Result<()> {
        Client::create_tileset(self, tileset_id, name, recipe)
    }

    fn publish_tileset(&self, tileset_id: &TilesetId) -> Result<JobId> {
        Client::publish_tileset(self, tileset_id)
    }

    fn get_job(&self, tileset_id: &TilesetId, job_id: &JobId) -> Result<Job> {
        Client::get_job(self, tileset_id, job_id)
    }
}

#[derive(Debug)]
struct Endpoints {
    base: Url,
}

fn construct_endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut endpoint = base.clone();

    let mut endpoint_segments = endpoint
        .path_segments_mut()
        .map_err(|_| Error::BadEndpoint {
            endpoint: base.clone(),
        })?;

    endpoint_segments.pop_if_empty();
    for segment in segments {
        endpoint_segments.push(segment);
    }

    drop(endpoint_segments);

    Ok(endpoint)
}

impl Endpoints {
    pub fn new(base: Url) -> Result<Self> {
        // Validate the base once, so a bad endpoint fails on construction.
        construct_endpoint(&base, &["tilesets", "v1"])?;
        Ok(Endpoints { base })
    }

    fn tileset_sources(&self, owner: &str) -> Result<Url> {
        construct_endpoint(&self.base, &["tilesets", "v1", "sources", owner])
    }

    fn tileset_source(&self, owner: &str, id: &TilesetSourceId) -> Result<Url> {
        // Only the short id is accepted in paths, never the canonical or namespaced form.
        construct_endpoint(
            &self.base,
            &["tilesets", "v1", "sources", owner, id.short_id()],
        )
    }

    fn tilesets(&self, owner: &str) -> Result<Url> {
        construct_endpoint(&self.base, &["tilesets", "v1", owner])
    }

    fn tileset(&self, owner: &str, tileset_id: &TilesetId) -> Result<Url> {
        construct_endpoint(&self.base, &["tilesets", "v1", &tileset_id.full_id(owner)])
    }

    fn tileset_recipe(&self, owner: &str, tileset_id: &TilesetId) -> Result<Url> {
        construct_endpoint(
            &self.base,
            &["tilesets", "v1", &tileset_id.full_id(owner), "recipe"],
        )
    }

    fn tileset_publish(&self, owner: &str, tileset_id: &TilesetId) -> Result<Url> {
        construct_endpoint(
            &self.base,
            &["tilesets", "v1", &tileset_id.full_id(owner), "publish"],
        )
    }

    fn tileset_jobs(&self, owner: &str, tileset_id: &TilesetId) -> Result<Url> {
        construct_endpoint(
            &self.base,
            &["tilesets", "v1", &tileset_id.full_id(owner), "jobs"],
        )
    }

    fn tileset_job(&self, owner: &str, tileset_id: &TilesetId, job_id: &JobId) -> Result<Url> {
        construct_endpoint(
            &self.base,
            &["tilesets", "v1", &tileset_id.full_id(owner), "jobs", &job_id.0],
        )
    }
}

const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 240;

fn build_http_client(config: &Config) -> Result<HttpClient> {
    let mut builder = HttpClient::builder()
        .gzip(true)
        .danger_accept_invalid_certs(config.accept_invalid_certificates)
        .timeout(Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS)));

    if let Some(proxy) = config.proxy.clone() {
        builder = builder.proxy(Proxy::all(proxy).map_err(Error::BuildHttpClient)?);
    }
    builder.build().map_err(Error::BuildHttpClient)
}

fn build_headers() -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(concat!("mapbox-uploader/", env!("CARGO_PKG_VERSION"))),
    );
    Ok(headers)
}

pub static DEFAULT_ENDPOINT: Lazy<Url> =
    Lazy::new(|| Url::parse("https://api.mapbox.com").expect("Default URL is well-formed"));

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &ServerGuard) -> Client {
        Client::new(Config {
            endpoint: Url::parse(&format!("{}/mapbox", server.url())).unwrap(),
            owner: "test-user".to_owned(),
            token: Token("test-token".to_owned()),
            ..Default::default()
        })
        .unwrap()
    }

    fn with_token() -> Matcher {
        Matcher::UrlEncoded("access_token".into(), "test-token".into())
    }

    fn feature() -> SourcePayload {
        SourcePayload::new(
            r#"{"type":"Feature","id":"1","geometry":{"type":"Point","coordinates":[139.76293,35.67871]},"properties":{"name":"tokyo"}}"#,
        )
    }

    #[test]
    fn test_construct_endpoint() {
        let url = construct_endpoint(
            &Url::parse("https://api.mapbox.com").unwrap(),
            &["tilesets", "v1", "sources", "test-user", "src-1"],
        )
        .unwrap();
        assert_eq!(
            url.to_string(),
            "https://api.mapbox.com/tilesets/v1/sources/test-user/src-1"
        );

        let url = construct_endpoint(
            &Url::parse("http://localhost:8080/mapbox").unwrap(),
            &["tilesets", "v1", "test-user.tileset-test-1", "publish"],
        )
        .unwrap();
        assert_eq!(
            url.to_string(),
            "http://localhost:8080/mapbox/tilesets/v1/test-user.tileset-test-1/publish"
        );
    }

    #[test]
    fn test_construct_endpoint_rejects_opaque_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            construct_endpoint(&base, &["tilesets"]),
            Err(Error::BadEndpoint { .. })
        ));
    }

    #[test]
    fn test_get_tileset_source() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/mapbox/tilesets/v1/sources/test-user/test-tileset-source-id")
            .match_query(with_token())
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "mapbox://tileset-source/test-user/tileset-source-test-1",
                    "files": 1,
                    "size": 119,
                    "size_nice": "119B"
                })
                .to_string(),
            )
            .create();

        // Any accepted form addresses the source by its short id.
        let id = "someone.test-tileset-source-id".parse().unwrap();
        let source = client_for(&server).get_tileset_source(&id).unwrap();

        mock.assert();
        assert_eq!(
            source,
            Some(TilesetSource {
                id: "mapbox://tileset-source/test-user/tileset-source-test-1"
                    .parse()
                    .unwrap(),
                files: 1,
                size: 119,
                size_nice: Some("119B".to_owned()),
            })
        );
    }

    #[test]
    fn test_get_tileset_source_not_found_is_none() {
        let mut server = Server::new();
        server
            .mock("GET", "/mapbox/tilesets/v1/sources/test-user/test-tileset-source-id")
            .match_query(with_token())
            .with_status(404)
            .with_body(
                r#"{"message": "mapbox://tileset-source/backflip/tileset-source-test-1 does not exist."}"#,
            )
            .create();

        let id = "test-tileset-source-id".parse().unwrap();
        assert_eq!(client_for(&server).get_tileset_source(&id).unwrap(), None);
    }

    #[test]
    fn test_get_tileset_source_server_error() {
        let mut server = Server::new();
        server
            .mock("GET", "/mapbox/tilesets/v1/sources/test-user/test-tileset-source-id")
            .match_query(with_token())
            .with_status(500)
            .with_body(r#"{"message": "Internal error"}"#)
            .create();

        let id = "test-tileset-source-id".parse().unwrap();
        match client_for(&server).get_tileset_source(&id) {
            Err(Error::Api {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "Internal error");
            }
            other => panic!("Expected an API error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_tileset_source_uploads_multipart() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/mapbox/tilesets/v1/sources/test-user/test-tileset-source-id")
            .match_query(with_token())
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_owned()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="file.geojson""#.to_owned()),
                Matcher::Regex("application/octet-stream".to_owned()),
                Matcher::Regex(r#""name":"tokyo""#.to_owned()),
            ]))
            .with_body(
                json!({
                    "file_size": 12345,
                    "files": 1,
                    "id": "mapbox://tileset-source/test-user/tileset-source-test-1",
                    "source_size": 12345
                })
                .to_string(),
            )
            .create();

        let id = "test-tileset-source-id".parse().unwrap();
        let source = client_for(&server)
            .create_tileset_source(&id, &feature())
            .unwrap();

        mock.assert();
        assert_eq!(
            source,
            TilesetSource {
                id: "mapbox://tileset-source/test-user/tileset-source-test-1"
                    .parse()
                    .unwrap(),
                files: 1,
                size: 12345,
                size_nice: Some("12345".to_owned()),
            }
        );
    }

    #[test]
    fn test_update_tileset_source_puts_by_short_id() {
        let mut server = Server::new();
        let mock = server
            .mock("PUT", "/mapbox/tilesets/v1/sources/test-user/tileset-source-test-1")
            .match_query(with_token())
            .match_body(Matcher::Regex(r#"filename="file.geojson""#.to_owned()))
            .with_body(
                json!({
                    "file_size": 12345,
                    "files": 1,
                    "id": "mapbox://tileset-source/test-user/tileset-source-test-1",
                    "source_size": 12345
                })
                .to_string(),
            )
            .create();

        let id = "mapbox://tileset-source/test-user/tileset-source-test-1"
            .parse()
            .unwrap();
        client_for(&server)
            .update_tileset_source(&id, &feature())
            .unwrap();
        mock.assert();
    }

    #[test]
    fn test_get_tileset_sources() {
        let mut server = Server::new();
        server
            .mock("GET", "/mapbox/tilesets/v1/sources/test-user")
            .match_query(with_token())
            .with_body(
                json!([{
                    "id": "mapbox://tileset-source/test-user/tileset-source-test-1",
                    "size": 123,
                    "files": 1
                }])
                .to_string(),
            )
            .create();

        let sources = client_for(&server).get_tileset_sources().unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].id.short_id(), "tileset-source-test-1");
        assert_eq!(sources[0].size_nice, None);
    }

    #[test]
    fn test_create_tileset_posts_recipe() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/mapbox/tilesets/v1/test-user.tileset-test-1")
            .match_query(with_token())
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "recipe": {
                    "version": 1,
                    "layers": {
                        "test-layer-1": {
                            "source": "mapbox://tileset-source/test-user/tileset-source-test-1",
                            "minzoom": 0,
                            "maxzoom": 5
                        }
                    }
                },
                "name": "tileset-name-test-1",
                "description": "",
                "attribution": []
            })))
            .with_body(
                r#"{"message": "Successfully created empty tileset tileset-test-1. Publish your tileset to begin processing your data into vector tiles."}"#,
            )
            .create();

        let recipe = Recipe::single_layer(
            "test-layer-1",
            "mapbox://tileset-source/test-user/tileset-source-test-1".to_owned(),
            ZoomRange::new(0, 5).unwrap(),
        );
        client_for(&server)
            .create_tileset(
                &TilesetId("tileset-test-1".to_owned()),
                "tileset-name-test-1",
                &recipe,
            )
            .unwrap();
        mock.assert();
    }

    #[test]
    fn test_update_tileset_recipe_patches() {
        let mut server = Server::new();
        let mock = server
            .mock("PATCH", "/mapbox/tilesets/v1/test-user.tileset-test-1/recipe")
            .match_query(with_token())
            .match_body(Matcher::PartialJson(json!({
                "version": 1,
                "layers": { "layer-1": { "minzoom": 2, "maxzoom": 9 } }
            })))
            .with_status(204)
            .create();

        let recipe = Recipe::single_layer(
            "layer-1",
            "mapbox://tileset-source/test-user/src".to_owned(),
            ZoomRange::new(2, 9).unwrap(),
        );
        client_for(&server)
            .update_tileset_recipe(&TilesetId("tileset-test-1".to_owned()), &recipe)
            .unwrap();
        mock.assert();
    }

    #[test]
    fn test_publish_tileset_returns_job_id() {
        let mut server = Server::new();
        server
            .mock("POST", "/mapbox/tilesets/v1/test-user.tileset-test-1/publish")
            .match_query(with_token())
            .with_body(
                r#"{"message": "Processing test-user.tileset-test-1", "jobId": "job_1_id"}"#,
            )
            .create();

        let job_id = client_for(&server)
            .publish_tileset(&TilesetId("tileset-test-1".to_owned()))
            .unwrap();
        assert_eq!(job_id, JobId("job_1_id".to_owned()));
    }

    #[test]
    fn test_get_jobs() {
        let mut server = Server::new();
        server
            .mock("GET", "/mapbox/tilesets/v1/test-user.tileset-test-1/jobs")
            .match_query(with_token())
            .with_body(
                json!([
                    {
                        "id": "job_1_id",
                        "stage": "success",
                        "created": 1560981902377_i64,
                        "tilesetId": "user.id",
                        "errors": [],
                        "warnings": []
                    },
                    {
                        "id": "job_2_id",
                        "stage": "processing",
                        "created": 1560982159327_i64,
                        "tilesetId": "user.id"
                    }
                ])
                .to_string(),
            )
            .create();

        let jobs = client_for(&server)
            .get_jobs(&TilesetId("tileset-test-1".to_owned()))
            .unwrap();
        assert_eq!(
            jobs.iter().map(|job| &job.stage).collect::<Vec<_>>(),
            vec![&JobStage::Success, &JobStage::Processing]
        );
    }

    #[test]
    fn test_delete_tileset() {
        let mut server = Server::new();
        let mock = server
            .mock("DELETE", "/mapbox/tilesets/v1/test-user.tileset-test-1")
            .match_query(with_token())
            .with_status(204)
            .create();

        client_for(&server)
            .delete_tileset(&TilesetId("tileset-test-1".to_owned()))
            .unwrap();
        mock.assert();
    }

    #[test]
    fn test_writes_are_not_retried() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/tilesets/v1/test-user.tileset-test-1/publish")
            .match_query(with_token())
            .with_status(503)
            .expect(1)
            .create();

        let client = Client::new(Config {
            endpoint: Url::parse(&server.url()).unwrap(),
            owner: "test-user".to_owned(),
            token: Token("test-token".to_owned()),
            retry_config: Some(RetryConfig {
                strategy: retry::RetryStrategy::Always,
                max_retry_count: 3,
                base_wait: Duration::from_secs(0),
                backoff_factor: 0.0,
            }),
            ..Default::default()
        })
        .unwrap();

        assert!(client
            .publish_tileset(&TilesetId("tileset-test-1".to_owned()))
            .is_err());
        mock.assert();
    }
}
