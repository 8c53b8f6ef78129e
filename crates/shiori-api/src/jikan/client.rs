use reqwest::Client;
use url::Url;

use shiori_core::config::ApiConfig;
use shiori_core::CatalogPage;

use super::error::JikanError;
use super::types::JikanTopResponse;
use crate::traits::CatalogSource;

const BASE_URL: &str = "https://api.jikan.moe/v4/";

/// Jikan v4 client (unofficial MyAnimeList API, no auth).
pub struct JikanClient {
    base_url: Url,
    media_type: String,
    http: Client,
}

impl JikanClient {
    /// Client for the public endpoint, listing movies.
    pub fn new() -> Result<Self, JikanError> {
        Ok(Self {
            base_url: Url::parse(BASE_URL)?,
            media_type: "movie".into(),
            http: Client::new(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, JikanError> {
        let base_url = config
            .base_url()
            .map_err(|e| JikanError::Config(e.to_string()))?;
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            base_url,
            media_type: config.media_type.trim().to_string(),
            http,
        })
    }

    /// `GET {base}/top/anime?type=..&page=..&limit=..`
    pub fn top_anime_url(&self, page: u32, limit: u32) -> Result<Url, JikanError> {
        let mut url = self.base_url.join("top/anime")?;
        {
            let mut query = url.query_pairs_mut();
            if !self.media_type.is_empty() {
                query.append_pair("type", &self.media_type);
            }
            query
                .append_pair("page", &page.max(1).to_string())
                .append_pair("limit", &limit.to_string());
        }
        Ok(url)
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, JikanError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "Jikan API error");
            Err(JikanError::Api {
                status,
                message: body,
            })
        }
    }

    /// Fetch one page of the top anime listing, raw.
    pub async fn top_anime(&self, page: u32, limit: u32) -> Result<JikanTopResponse, JikanError> {
        let url = self.top_anime_url(page, limit)?;
        tracing::debug!(%url, "fetching top anime");

        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| JikanError::Parse(e.to_string()))
    }
}

impl CatalogSource for JikanClient {
    type Error = JikanError;

    async fn fetch_page(&self, page: u32, limit: u32) -> Result<CatalogPage, JikanError> {
        let resp = self.top_anime(page, limit).await?;
        let fetched = resp.into_page();
        tracing::debug!(
            page,
            returned = fetched.returned,
            kept = fetched.entries.len(),
            "fetched catalog page"
        );
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve a single canned HTTP response; resolves to the request line.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let request = String::from_utf8_lossy(&buf).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });
        (Url::parse(&format!("http://{addr}/v4/")).unwrap(), handle)
    }

    fn client_for(base_url: Url) -> JikanClient {
        JikanClient {
            base_url,
            media_type: "movie".into(),
            http: Client::new(),
        }
    }

    #[test]
    fn test_top_anime_url() {
        let client = JikanClient::new().unwrap();
        let url = client.top_anime_url(2, 25).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.jikan.moe/v4/top/anime?type=movie&page=2&limit=25"
        );
    }

    #[test]
    fn test_top_anime_url_without_type() {
        let mut config = shiori_core::config::AppConfig::default().api;
        config.media_type = String::new();
        let client = JikanClient::from_config(&config).unwrap();
        let url = client.top_anime_url(0, 10).unwrap();
        assert_eq!(url.as_str(), "https://api.jikan.moe/v4/top/anime?page=1&limit=10");
    }

    #[tokio::test]
    async fn test_fetch_page_parses_entries() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"data":[{"mal_id":1535,"title":"Death Note","type":"TV","genres":[{"name":"Suspense"}]}],"pagination":{"has_next_page":false}}"#,
        )
        .await;
        let client = client_for(base);

        let page = client.fetch_page(1, 25).await.unwrap();
        assert_eq!(page.returned, 1);
        assert_eq!(page.entries[0].title, "Death Note");
        assert_eq!(page.entries[0].genres, vec!["Suspense"]);

        let request_line = server.await.unwrap();
        assert_eq!(
            request_line,
            "GET /v4/top/anime?type=movie&page=1&limit=25 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_bad_genre_degrades_instead_of_failing_page() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"data":[{"mal_id":1,"title":"Good"},{"mal_id":2,"title":"Bad","genres":[{"mal_id":8}]}]}"#,
        )
        .await;
        let client = client_for(base);

        let page = client.fetch_page(1, 25).await.unwrap();
        let titles: Vec<_> = page.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Good", "Bad"]);
        assert!(page.entries[1].genres.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let (base, server) = serve_once("429 Too Many Requests", r#"{"status":429}"#).await;
        let client = client_for(base);

        let err = client.fetch_page(1, 25).await.unwrap_err();
        match err {
            JikanError::Api { status, message } => {
                assert_eq!(status, 429);
                assert!(message.contains("429"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (base, server) = serve_once("200 OK", r#"{"data": "nope"}"#).await;
        let client = client_for(base);

        let err = client.fetch_page(1, 25).await.unwrap_err();
        assert!(matches!(err, JikanError::Parse(_)), "got {err:?}");
        server.await.unwrap();
    }
}
