//! Token catalog over HTTP

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::entities::token::TokenList;
use crate::domain::repositories::catalog_source::CatalogSource;
use crate::shared::error::SafeSendError;
use crate::shared::types::SafeSendResult;

/// Fetches the token list JSON with one unauthenticated GET
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> SafeSendResult<TokenList> {
        log::debug!("Fetching token list from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SafeSendError::catalog_unavailable(format!("Failed to fetch token list: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SafeSendError::catalog_unavailable(format!(
                "Failed to fetch token list: {}",
                status
            )));
        }

        response
            .json::<TokenList>()
            .await
            .map_err(|e| SafeSendError::catalog_unavailable(format!("Invalid token list: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the URL to fetch
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/tokens/mainnet.json", addr)
    }

    #[tokio::test]
    async fn test_fetch_token_list() {
        let url = serve_once(
            "200 OK",
            r#"{"name":"List","tokens":[{"chainId":80094,"address":"0x0000000000000000000000000000000000000001","name":"Honey","symbol":"HONEY","decimals":18}]}"#,
        )
        .await;

        let list = HttpCatalogSource::new(url).fetch().await.unwrap();
        assert_eq!(list.name, "List");
        assert_eq!(list.tokens.len(), 1);
        assert_eq!(list.tokens_for(80094)[0].symbol, "HONEY");
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let url = serve_once("404 Not Found", "{}").await;

        match HttpCatalogSource::new(url).fetch().await {
            Err(SafeSendError::CatalogUnavailable(message)) => assert!(message.contains("404")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let url = serve_once("200 OK", r#"{"tokens": "nope"}"#).await;

        assert!(matches!(
            HttpCatalogSource::new(url).fetch().await,
            Err(SafeSendError::CatalogUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/tokens.json", listener.local_addr().unwrap());
        drop(listener);

        assert!(matches!(
            HttpCatalogSource::new(url).fetch().await,
            Err(SafeSendError::CatalogUnavailable(_))
        ));
    }
}
