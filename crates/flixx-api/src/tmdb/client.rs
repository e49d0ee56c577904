//! `TmdbClient` - TMDB API client implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::error::HttpError;
use super::loading::{LoadingGuard, LoadingIndicator};
use super::types::{
    FeaturedFeed, MediaSummary, MediaType, MovieDetails, Paged, SearchParams, TmdbErrorResponse,
    TvDetails,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Value of the `language` query parameter.
    language: String,
    /// Busy indicator toggled around each request.
    loading_indicator: Option<Arc<dyn LoadingIndicator>>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    loading_indicator: Option<Arc<dyn LoadingIndicator>>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            language: None,
            loading_indicator: None,
        }
    }

    /// Overrides the base URL, e.g. `https://api.themoviedb.org/3`.
    ///
    /// A missing trailing `/` is added on build.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: `en-US`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the indicator shown while a request is in flight.
    #[must_use]
    pub fn loading_indicator(mut self, indicator: Arc<dyn LoadingIndicator>) -> Self {
        self.loading_indicator = Some(indicator);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        // `Url::join` replaces the last segment unless the path ends in `/`.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            loading_indicator: self.loading_indicator,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with Bearer auth and decodes the JSON body.
    ///
    /// `path` is relative to the base URL (e.g. `movie/603`). The
    /// `language` parameter is always sent first, followed by `query`.
    /// The loading indicator is shown for the whole call and hidden on
    /// every exit path. Nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidUrl`] if `path` cannot be joined.
    /// - [`HttpError::Transport`] if the request fails without a response.
    /// - [`HttpError::Status`] for any non-2xx response.
    /// - [`HttpError::Decode`] if the body does not match `T`.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let _loading = LoadingGuard::start(self.loading_indicator.as_deref());

        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| HttpError::InvalidUrl {
                path: String::from(path),
                source,
            })?;

        let mut params: Vec<(&str, String)> = Vec::with_capacity(query.len().saturating_add(1));
        params.push(("language", self.language.clone()));
        params.extend(query.iter().cloned());

        let transport = |source: reqwest::Error| HttpError::Transport {
            path: String::from(path),
            source,
        };

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .query(&params)
            .build()
            .map_err(transport)?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let response = self.http_client.execute(request).await.map_err(transport)?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body)
                .map_or(body, |error_response| error_response.status_message);
            return Err(HttpError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|source| HttpError::Decode {
            path: String::from(path),
            source,
        })
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn popular(&self, media_type: MediaType) -> Result<Paged<MediaSummary>, HttpError> {
        let path = format!("{media_type}/popular");
        self.fetch_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn featured(&self, feed: FeaturedFeed) -> Result<Paged<MediaSummary>, HttpError> {
        self.fetch_json(feed.path(), &[]).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, id: u64) -> Result<MovieDetails, HttpError> {
        let path = format!("movie/{id}");
        self.fetch_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, id: u64) -> Result<TvDetails, HttpError> {
        let path = format!("tv/{id}");
        self.fetch_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn search(&self, params: &SearchParams) -> Result<Paged<MediaSummary>, HttpError> {
        let query = [
            ("query", params.query.clone()),
            ("page", params.page.to_string()),
        ];
        self.fetch_json(&params.path(), &query).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Records how often the indicator was toggled.
    #[derive(Debug, Default)]
    struct CountingIndicator {
        shown: AtomicUsize,
        hidden: AtomicUsize,
    }

    impl LoadingIndicator for CountingIndicator {
        fn show(&self) {
            self.shown.fetch_add(1, Ordering::SeqCst);
        }

        fn hide(&self) {
            self.hidden.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn test_client(server: &wiremock::MockServer) -> TmdbClient {
        let base_url = format!("{}/3/", server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_token() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_token is required")
        );
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_token("test-token").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = TmdbClient::builder()
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(client.language, "en-US");
        assert!(client.loading_indicator.is_none());
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/3/").unwrap();

        // Act
        let client = TmdbClient::builder()
            .base_url(custom_url.clone())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url, custom_url);
    }

    #[tokio::test]
    async fn test_base_url_without_trailing_slash_keeps_version_segment() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_popular.json");
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/popular"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = TmdbClient::builder()
            .base_url(format!("{}/3", mock_server.uri()).parse().unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let result = client.popular(MediaType::Movie).await;

        // Assert
        assert_eq!(client.base_url.path(), "/3/");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_popular_movies_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/popular"))
            .and(wiremock::matchers::query_param("language", "en-US"))
            .and(wiremock::matchers::header("accept", "application/json"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        // Act
        let page = client.popular(MediaType::Movie).await.unwrap();

        // Assert
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].id, 299_534);
    }

    #[tokio::test]
    async fn test_featured_airing_today_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/tv_popular.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/tv/airing_today"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        // Act
        let page = client.featured(FeaturedFeed::AiringToday).await.unwrap();

        // Assert
        assert_eq!(page.results[0].title, "Game of Thrones");
    }

    #[tokio::test]
    async fn test_search_sends_query_and_page() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_movie_batman.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/movie"))
            .and(wiremock::matchers::query_param("query", "batman"))
            .and(wiremock::matchers::query_param("page", "2"))
            .and(wiremock::matchers::query_param("language", "en-US"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let params = SearchParams::new(MediaType::Movie, "batman").page(2);

        // Act
        let page = client.search(&params).await.unwrap();

        // Assert
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.total_results, 87);
    }

    #[tokio::test]
    async fn test_tv_details_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/tv_details_1399.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/tv/1399"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        // Act
        let details = client.tv_details(1399).await.unwrap();

        // Assert
        assert_eq!(details.summary.id, 1399);
        assert_eq!(details.number_of_episodes, 73);
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header(
                "Authorization",
                "Bearer my-secret-token",
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/3/", mock_server.uri());
        let client = TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token("my-secret-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        let params = SearchParams::new(MediaType::Tv, "test");

        // Act & Assert (mock expect(1) verifies Authorization header)
        client.search(&params).await.unwrap();
    }

    #[tokio::test]
    async fn test_not_found_returns_status_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = include_str!("../../../../fixtures/tmdb/error_not_found.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        // Act
        let result = client.movie_details(999_999_999).await;

        // Assert
        let err = result.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(
            err,
            HttpError::Status { status: 404, ref message }
                if message == "The resource you requested could not be found."
        ));
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_verbatim() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        // Act
        let err = client.popular(MediaType::Tv).await.unwrap_err();

        // Assert
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_http_error_is_not_retried() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        // Act
        let result = client.popular(MediaType::Movie).await;

        // Assert
        assert_eq!(result.unwrap_err().status(), Some(429));
    }

    #[tokio::test]
    async fn test_shape_mismatch_returns_decode_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_string(r#"{"id":"not-a-number"}"#),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        // Act
        let err = client.movie_details(603).await.unwrap_err();

        // Assert
        assert!(matches!(err, HttpError::Decode { ref path, .. } if path == "movie/603"));
    }

    #[tokio::test]
    async fn test_transport_failure_returns_transport_error() {
        // Arrange: nothing listens on the discard port
        let client = TmdbClient::builder()
            .base_url(Url::parse("http://127.0.0.1:9/3/").unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let err = client.popular(MediaType::Movie).await.unwrap_err();

        // Assert
        assert!(matches!(err, HttpError::Transport { .. }));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_loading_indicator_is_symmetric_on_success_and_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/popular"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/1"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string("{}"))
            .mount(&mock_server)
            .await;

        let indicator = Arc::new(CountingIndicator::default());
        let base_url = format!("{}/3/", mock_server.uri());
        let client = TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .loading_indicator(indicator.clone())
            .build()
            .unwrap();

        // Act
        client.popular(MediaType::Movie).await.unwrap();
        client.movie_details(1).await.unwrap_err();

        // Assert
        assert_eq!(indicator.shown.load(Ordering::SeqCst), 2);
        assert_eq!(indicator.hidden.load(Ordering::SeqCst), 2);
    }
}
