use async_trait::async_trait;
use promotion_shared::{Promotion, QueryFilter};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const COLLECTION: &str = "promotions";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("promotion service responded with {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("request to promotion service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid promotion service url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// The `message` field of a structured error body, when the service sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Operations the console performs against the Promotion service.
#[async_trait]
pub trait PromotionApi: Send + Sync {
    async fn create(&self, payload: &Promotion) -> Result<Promotion, ApiError>;
    async fn update(&self, id: &str, payload: &Promotion) -> Result<Promotion, ApiError>;
    async fn retrieve(&self, id: &str) -> Result<Promotion, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
    async fn activate(&self, id: &str) -> Result<(), ApiError>;
    async fn deactivate(&self, id: &str) -> Result<(), ApiError>;
    async fn search(&self, filter: &QueryFilter) -> Result<Vec<Promotion>, ApiError>;
}

pub struct PromotionClient {
    client: Client,
    base_url: Url,
}

impl PromotionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// `{base}/promotions/{segments...}` with every segment percent-encoded.
    fn url_for(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            path.pop_if_empty().push(COLLECTION);
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|b| b.message);
        debug!(%status, ?message, "promotion service rejected request");
        Err(ApiError::Status { status, message })
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PromotionApi for PromotionClient {
    async fn create(&self, payload: &Promotion) -> Result<Promotion, ApiError> {
        let url = self.url_for(&[])?;
        debug!(%url, "POST promotion");
        let response = self.client.post(url).json(payload).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn update(&self, id: &str, payload: &Promotion) -> Result<Promotion, ApiError> {
        let url = self.url_for(&[id])?;
        debug!(%url, "PUT promotion");
        let response = self.client.put(url).json(payload).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn retrieve(&self, id: &str) -> Result<Promotion, ApiError> {
        let url = self.url_for(&[id])?;
        debug!(%url, "GET promotion");
        let response = self.client.get(url).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url_for(&[id])?;
        debug!(%url, "DELETE promotion");
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn activate(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url_for(&[id, "activate"])?;
        debug!(%url, "PUT activate");
        let response = self.client.put(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn deactivate(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url_for(&[id, "deactivate"])?;
        debug!(%url, "PUT deactivate");
        let response = self.client.put(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn search(&self, filter: &QueryFilter) -> Result<Vec<Promotion>, ApiError> {
        let mut url = self.url_for(&[])?;
        if !filter.is_empty() {
            let query = filter.to_query_string();
            url.set_query(Some(query.as_str()));
        }
        debug!(%url, "GET promotions");
        let response = self.client.get(url).send().await?;
        Self::decode(Self::check(response).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Path, RawQuery},
        http::StatusCode as AxumStatus,
        response::IntoResponse,
        routing::{get, post, put},
    };
    use promotion_shared::{FormState, Numeric};
    use serde_json::{Value, json};

    async fn create_promotion(Json(mut body): Json<Value>) -> impl IntoResponse {
        body["id"] = json!(1);
        (AxumStatus::CREATED, Json(body))
    }

    async fn list_promotions(RawQuery(query): RawQuery) -> Json<Value> {
        Json(json!([{ "id": 1, "name": query.unwrap_or_default() }]))
    }

    async fn read_promotion(Path(id): Path<String>) -> impl IntoResponse {
        if id == "1" {
            return (AxumStatus::OK, Json(json!({ "id": 1, "name": "Sale" })));
        }
        (
            AxumStatus::NOT_FOUND,
            Json(json!({ "message": format!("Promotion with id '{}' was not found.", id) })),
        )
    }

    async fn update_promotion(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    async fn spawn_service() -> String {
        let app = Router::new()
            .route("/promotions", post(create_promotion).get(list_promotions))
            .route(
                "/promotions/{id}",
                get(read_promotion)
                    .put(update_promotion)
                    .delete(|| async { AxumStatus::NO_CONTENT }),
            )
            .route("/promotions/{id}/activate", put(|| async { Json(json!({})) }))
            .route(
                "/promotions/{id}/deactivate",
                put(|| async {
                    (AxumStatus::CONFLICT, Json(json!({ "message": "already inactive" })))
                }),
            )
            .route("/broken/promotions", get(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base: &str) -> PromotionClient {
        PromotionClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn builds_item_and_action_urls() {
        let client = client("http://svc.local/api");
        assert_eq!(
            client.url_for(&["5", "activate"]).unwrap().as_str(),
            "http://svc.local/api/promotions/5/activate"
        );
        assert_eq!(
            client.url_for(&["a/b"]).unwrap().as_str(),
            "http://svc.local/api/promotions/a%2Fb"
        );
        assert_eq!(client.url_for(&[]).unwrap().as_str(), "http://svc.local/api/promotions");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            PromotionClient::new("not a url", Duration::from_secs(1)),
            Err(ApiError::Url(_))
        ));
    }

    #[tokio::test]
    async fn create_posts_payload_and_returns_record() {
        let base = spawn_service().await;
        let form = FormState {
            name: "Sale".into(),
            product_id: "7".into(),
            status: "true".into(),
            ..Default::default()
        };
        let created = client(&base).create(&form.to_payload()).await.unwrap();
        assert_eq!(created.id, Some(Numeric::Int(1)));
        assert_eq!(created.name.as_deref(), Some("Sale"));
        assert_eq!(created.product_id, Some(Numeric::Int(7)));
        assert_eq!(created.status, Some(true));
    }

    #[tokio::test]
    async fn update_puts_to_item_path() {
        let base = spawn_service().await;
        let form = FormState {
            id: "1".into(),
            rule: "10% off".into(),
            ..Default::default()
        };
        let updated = client(&base).update("1", &form.to_payload()).await.unwrap();
        assert_eq!(updated.rule.as_deref(), Some("10% off"));
    }

    #[tokio::test]
    async fn retrieve_surfaces_structured_message() {
        let base = spawn_service().await;
        let client = client(&base);

        let found = client.retrieve("1").await.unwrap();
        assert_eq!(found.name.as_deref(), Some("Sale"));

        let err = client.retrieve("42").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND));
        assert_eq!(err.server_message(), Some("Promotion with id '42' was not found."));
    }

    #[tokio::test]
    async fn search_sends_filter_verbatim() {
        let base = spawn_service().await;
        let form = FormState {
            name: "Sale".into(),
            product_id: "7".into(),
            status: "true".into(),
            ..Default::default()
        };
        let results = client(&base)
            .search(&QueryFilter::from_form(&form))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("name=Sale&product_id=7&status=true"));
    }

    #[tokio::test]
    async fn delete_and_state_actions() {
        let base = spawn_service().await;
        let client = client(&base);
        client.delete("1").await.unwrap();
        client.activate("1").await.unwrap();

        let err = client.deactivate("1").await.unwrap_err();
        assert_eq!(err.server_message(), Some("already inactive"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let base = spawn_service().await;
        let client = client(&format!("{}/broken", base));
        let err = client.search(&QueryFilter::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.server_message(), None);
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let err = client("http://127.0.0.1:1").retrieve("1").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.server_message(), None);
    }
}
