/// 考试 API 客户端
///
/// 封装所有与考试 REST API 相关的调用逻辑
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{ApiResponse, Exam, ExamDraft, ExamList, HealthStatus};

/// 考试 API 能力
///
/// 流程层只依赖这个 trait，测试时可替换为内存实现
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// `GET /api/exams`
    async fn list_exams(&self) -> AppResult<Vec<Exam>>;
    /// `GET /api/exams/:id`
    async fn get_exam(&self, id: &str) -> AppResult<Exam>;
    /// `POST /api/exams/create`
    async fn create_exam(&self, draft: &ExamDraft) -> AppResult<ApiResponse>;
    /// `PUT /api/exams/:id`
    async fn update_exam(&self, id: &str, draft: &ExamDraft) -> AppResult<ApiResponse>;
    /// `DELETE /api/exams/:id`
    async fn delete_exam(&self, id: &str) -> AppResult<ApiResponse>;
}

#[async_trait]
impl<T: ExamApi + ?Sized> ExamApi for Arc<T> {
    async fn list_exams(&self) -> AppResult<Vec<Exam>> {
        (**self).list_exams().await
    }

    async fn get_exam(&self, id: &str) -> AppResult<Exam> {
        (**self).get_exam(id).await
    }

    async fn create_exam(&self, draft: &ExamDraft) -> AppResult<ApiResponse> {
        (**self).create_exam(draft).await
    }

    async fn update_exam(&self, id: &str, draft: &ExamDraft) -> AppResult<ApiResponse> {
        (**self).update_exam(id, draft).await
    }

    async fn delete_exam(&self, id: &str) -> AppResult<ApiResponse> {
        (**self).delete_exam(id).await
    }
}

/// 基于 reqwest 的考试 API 客户端
///
/// 不设置超时、不重试，失败直接返回给调用方
pub struct ExamClient {
    base_url: String,
    http: reqwest::Client,
}

impl ExamClient {
    /// 创建新的考试客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// `GET /health`
    pub async fn health(&self) -> AppResult<HealthStatus> {
        self.send_json(Method::GET, &["health"], |req| req).await
    }

    /// 拼接接口地址；每个片段单独编码，ID 中的 `/` 不会改变路径层级
    fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::api_request_failed(self.base_url.as_str(), e))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Other(format!("API 根地址无法拼接路径: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 发送请求并解析 JSON；非 2xx 状态转为 `ApiError::BadResponse`
    async fn send_json<T, F>(&self, method: Method, segments: &[&str], build: F) -> AppResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(segments)?;
        let endpoint = url.path().to_string();
        debug!("{} {}", method, endpoint);

        let request = build(self.http.request(method, url));
        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint.as_str(), e))?;

        let response = Self::check_status(&endpoint, response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint.as_str(), e))?;

        debug!("{} 返回: {}", endpoint, crate::utils::logging::truncate_text(&body, 200));

        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(endpoint: &str, response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // 尽量读出服务端的 message / error 字段
        let message = response
            .json::<ApiResponse>()
            .await
            .ok()
            .and_then(|r| r.message);

        Err(AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        }))
    }
}

#[async_trait]
impl ExamApi for ExamClient {
    async fn list_exams(&self) -> AppResult<Vec<Exam>> {
        let list: ExamList = self
            .send_json(Method::GET, &["api", "exams"], |req| req)
            .await?;
        Ok(list.exams)
    }

    async fn get_exam(&self, id: &str) -> AppResult<Exam> {
        self.send_json(Method::GET, &["api", "exams", id], |req| req)
            .await
    }

    async fn create_exam(&self, draft: &ExamDraft) -> AppResult<ApiResponse> {
        self.send_json(Method::POST, &["api", "exams", "create"], |req| {
            req.json(draft)
        })
        .await
    }

    async fn update_exam(&self, id: &str, draft: &ExamDraft) -> AppResult<ApiResponse> {
        self.send_json(Method::PUT, &["api", "exams", id], |req| req.json(draft))
            .await
    }

    async fn delete_exam(&self, id: &str) -> AppResult<ApiResponse> {
        self.send_json(Method::DELETE, &["api", "exams", id], |req| req)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn draft() -> ExamDraft {
        ExamDraft {
            name: "Rust 入门".into(),
            description: "所有权".into(),
            duration: 40,
            questions: vec!["1".into(), "3".into()],
            created_at: "2024-06-01T10:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn lists_exams() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/exams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exams": [
                    {"id": 1, "name": "A", "duration": 30, "questions": [1, 2]},
                    {"id": 2, "title": "B", "duration_minutes": 60}
                ]
            })))
            .mount(&server)
            .await;

        let client = ExamClient::with_base_url(&server.uri());
        let exams = client.list_exams().await.unwrap();
        assert_eq!(exams.len(), 2);
        assert_eq!(exams[0].questions, vec!["1", "2"]);
        assert_eq!(exams[1].name, "B");
        assert_eq!(exams[1].duration, 60);
    }

    #[tokio::test]
    async fn create_posts_draft_to_create_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/exams/create"))
            .and(body_partial_json(json!({
                "name": "Rust 入门",
                "duration": 40,
                "questions": ["1", "3"],
                "createdAt": "2024-06-01T10:00:00Z"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ExamClient::with_base_url(&format!("{}/", server.uri()));
        let resp = client.create_exam(&draft()).await.unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());
    }

    #[tokio::test]
    async fn update_and_delete_use_exam_path() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/exams/9"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "message": "已更新"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/exams/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false, "message": "考试已被引用"})))
            .mount(&server)
            .await;

        let client = ExamClient::with_base_url(&server.uri());
        let updated = client.update_exam("9", &draft()).await.unwrap();
        assert_eq!(updated.message.as_deref(), Some("已更新"));

        let deleted = client.delete_exam("9").await.unwrap();
        assert!(!deleted.success);
        assert_eq!(deleted.message.as_deref(), Some("考试已被引用"));
    }

    #[tokio::test]
    async fn non_success_status_becomes_bad_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/exams/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Exam not found"})),
            )
            .mount(&server)
            .await;

        let client = ExamClient::with_base_url(&server.uri());
        let err = client.get_exam("404").await.unwrap_err();
        match err {
            AppError::Api(ApiError::BadResponse {
                status, message, ..
            }) => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("Exam not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/exams"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ExamClient::with_base_url(&server.uri());
        let err = client.list_exams().await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::JsonParseFailed { .. })));
    }

    #[tokio::test]
    async fn unreachable_server_is_request_failure() {
        let client = ExamClient::with_base_url("http://127.0.0.1:9");
        let err = client.list_exams().await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::RequestFailed { .. })));
    }

    #[tokio::test]
    async fn exam_id_stays_inside_its_path_segment() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
            .expect(0)
            .mount(&server)
            .await;

        let client = ExamClient::with_base_url(&server.uri());
        assert!(client.delete_exam("1/../../health").await.is_err());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.path().starts_with("/api/exams/1%2F"));
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_kept() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/backend/api/exams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exams": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ExamClient::with_base_url(&format!("{}/backend/", server.uri()));
        assert!(client.list_exams().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn health_check_reads_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "healthy",
                "timestamp": "2024-06-01T10:00:00"
            })))
            .mount(&server)
            .await;

        let client = ExamClient::with_base_url(&server.uri());
        assert_eq!(client.health().await.unwrap().status, "healthy");
    }
}
