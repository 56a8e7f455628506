use std::time::Duration;

use directory_core::{ExperienceRecord, FilterSet, ResultPage, COMPANY_QUERY_KEY, PERSON_ID_KEY};
use directory_logging::dir_debug;
use futures_util::StreamExt;
use url::Url;

use crate::decode::{decode_experiences, decode_page, error_message};
use crate::ApiError;

/// Deployment the directory front end was built against.
pub const DEFAULT_BASE_URL: &str = "http://92.161.62.7";
/// Query key carrying the requested window size.
pub const NB_RESULTS_KEY: &str = "nb_results";

const PEOPLE_PATH: &str = "people";
const EXPERIENCES_PATH: &str = "experiences";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The two endpoints of the directory API.
#[async_trait::async_trait]
pub trait DirectoryApi: Send + Sync {
    /// GET `/people` with `filters` plus `nb_results = window_size`.
    async fn fetch_professionals(
        &self,
        filters: &FilterSet,
        window_size: usize,
    ) -> Result<ResultPage, ApiError>;

    /// GET `/experiences` for one person. Fails with `ApiError::Validation`
    /// before any network work when `person_id` is blank.
    async fn fetch_experiences(
        &self,
        person_id: &str,
        company_query: Option<&str>,
    ) -> Result<Vec<ExperienceRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDirectoryApi {
    settings: ApiSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestDirectoryApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects cannot-be-a-base urls, so segments are available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(path);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        dir_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = self.read_body(response).await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        self.read_body(response).await
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::TooLarge { max_bytes });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(ApiError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl DirectoryApi for ReqwestDirectoryApi {
    async fn fetch_professionals(
        &self,
        filters: &FilterSet,
        window_size: usize,
    ) -> Result<ResultPage, ApiError> {
        let window = window_size.to_string();
        let mut query = filters.query_pairs();
        query.push((NB_RESULTS_KEY, window.as_str()));

        let body = self.get(self.endpoint(PEOPLE_PATH, &query)).await?;
        let page = decode_page(&body)?;
        dir_debug!("window {} answered with {} records", window_size, page.len());
        Ok(page)
    }

    async fn fetch_experiences(
        &self,
        person_id: &str,
        company_query: Option<&str>,
    ) -> Result<Vec<ExperienceRecord>, ApiError> {
        let person_id = person_id.trim();
        if person_id.is_empty() {
            return Err(ApiError::Validation(
                "person id is required to fetch experiences".to_string(),
            ));
        }

        let mut query = vec![(PERSON_ID_KEY, person_id)];
        if let Some(company) = company_query.map(str::trim).filter(|c| !c.is_empty()) {
            query.push((COMPANY_QUERY_KEY, company));
        }

        let body = self.get(self.endpoint(EXPERIENCES_PATH, &query)).await?;
        decode_experiences(&body)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ApiError::Validation(format!("invalid base url {raw:?}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::Validation(format!(
            "base url must be an http(s) url, got {raw:?}"
        )));
    }
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    ApiError::Transport(err.to_string())
}
