// Client for the chat service that comments on the collected texts.

use reqwest::Client;

use crate::tally::{config_reader::ChatbotConfig, *};

/// The field of the request that holds the comments.
pub const REQUEST_FIELD: &str = "comentarios";
/// The field of the answer that holds the text of the chat service.
pub const RESPONSE_FIELD: &str = "respuesta";

#[derive(Debug, Clone)]
pub struct ChatbotClient {
    client: Client,
    url: String,
}

impl ChatbotClient {
    pub fn new(config: &ChatbotConfig) -> TallyResult<ChatbotClient> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context(ChatbotSnafu {})?;
        Ok(ChatbotClient {
            client,
            url: config.url.clone(),
        })
    }

    /// Sends all the comments as a single text and returns the answer.
    ///
    /// There is no retry: any failure is reported to the caller.
    pub async fn ask(&self, comments: &str) -> TallyResult<String> {
        info!(
            "Sending {} characters to the chat service at {:?}",
            comments.len(),
            self.url
        );
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ REQUEST_FIELD: comments }))
            .send()
            .await
            .context(ChatbotSnafu {})?;

        let status = response.status();
        if !status.is_success() {
            warn!("The chat service answered with status {}", status);
            return ChatbotStatusSnafu {
                status: status.as_u16(),
            }
            .fail();
        }

        let js: JSValue = response.json().await.context(ChatbotSnafu {})?;
        debug!("chatbot answer: {:?}", js);
        js.get(RESPONSE_FIELD)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .context(ChatbotPayloadSnafu {
                field: RESPONSE_FIELD,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::time::Duration;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/procesar", addr)
    }

    fn client(url: String) -> ChatbotClient {
        ChatbotClient::new(&ChatbotConfig {
            url,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn answer_is_returned() {
        let app = Router::new().route(
            "/procesar",
            post(|Json(body): Json<JSValue>| async move {
                let n = body[REQUEST_FIELD].as_str().unwrap_or("").len();
                Json(json!({ RESPONSE_FIELD: format!("received {} characters", n) }))
            }),
        );
        let c = client(spawn(app).await);
        let answer = c.ask("Voto Noboa").await.unwrap();
        assert_eq!(answer, "received 10 characters");
    }

    #[tokio::test]
    async fn error_status() {
        let app = Router::new().route(
            "/procesar",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let c = client(spawn(app).await);
        let err = c.ask("x").await.unwrap_err();
        assert!(matches!(err, TallyError::ChatbotStatus { status: 500 }));
    }

    #[tokio::test]
    async fn missing_field() {
        let app = Router::new().route(
            "/procesar",
            post(|| async { Json(json!({ "other": "x" })) }),
        );
        let c = client(spawn(app).await);
        let err = c.ask("x").await.unwrap_err();
        assert!(matches!(err, TallyError::ChatbotPayload { .. }));
    }

    #[tokio::test]
    async fn unreachable_service() {
        // Nothing listens on port 9 of the loopback interface.
        let c = client("http://127.0.0.1:9/procesar".to_string());
        let err = c.ask("x").await.unwrap_err();
        assert!(matches!(err, TallyError::Chatbot { .. }));
    }
}
