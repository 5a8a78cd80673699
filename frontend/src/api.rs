//! 网关 HTTP 客户端
//!
//! 基于 `web::HttpClient` 将类型化的 `ApiRequest` 派发到远程网关，
//! 并把非 2xx 响应体中的 `detail` 字段还原为可展示的错误消息。

use crate::gateway::{Gateway, GatewayError, GatewayResult};
use crate::web::http::{HttpClient, HttpError};
use async_trait::async_trait;
use leptos::prelude::*;
use openstall_shared::protocol::{
    ApiRequest, CreateOrderRequest, CreateProductRequest, GetUserRequest, HttpMethod,
    ListProductsRequest, ListUserOrdersRequest, LoginRequest, RegisterRequest, StressRequest,
    SystemStatusRequest,
};
use openstall_shared::{
    GATEWAY_PREFIX, Order, Product, StressAck, SystemStatus, User, UserSummary,
};
use serde::Deserialize;
use std::sync::Arc;

impl From<HttpError> for GatewayError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RequestBuildFailed(msg) | HttpError::NetworkError(msg) => {
                GatewayError::Network(msg)
            }
            HttpError::ResponseParseFailed(msg) => GatewayError::Decode(msg),
        }
    }
}

/// 非 2xx 响应体中的错误细节（网关透传各服务的 `{"detail": ...}`）
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// 网关 HTTP 客户端
#[derive(Clone, Debug, PartialEq)]
pub struct OpenStallApi {
    base_url: String,
}

impl OpenStallApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 核心泛型派发
    async fn send<R: ApiRequest>(&self, req: &R) -> GatewayResult<R::Response> {
        let url = self.url(&req.path());

        let builder = match R::METHOD {
            HttpMethod::Get => HttpClient::get(&url),
            HttpMethod::Post => HttpClient::post(&url).json(req)?,
        };

        let response = builder.send().await?;
        let status = response.status();

        if !(200..300).contains(&status) {
            // 失败路径：尝试从响应体恢复 detail 消息
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                .and_then(|body| body.detail);
            return Err(GatewayError::Status {
                code: status,
                detail,
            });
        }

        Ok(response.json::<R::Response>().await?)
    }
}

impl Default for OpenStallApi {
    fn default() -> Self {
        Self::new(GATEWAY_PREFIX)
    }
}

#[async_trait(?Send)]
impl Gateway for OpenStallApi {
    async fn login(&self, email: &str) -> GatewayResult<UserSummary> {
        self.send(&LoginRequest {
            email: email.to_string(),
        })
        .await
    }

    async fn fetch_user(&self, id: i64) -> GatewayResult<User> {
        self.send(&GetUserRequest { id }).await
    }

    async fn register(&self, name: &str, email: &str) -> GatewayResult<User> {
        self.send(&RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await
    }

    async fn products(&self) -> GatewayResult<Vec<Product>> {
        self.send(&ListProductsRequest).await
    }

    async fn create_product(&self, req: CreateProductRequest) -> GatewayResult<Product> {
        self.send(&req).await
    }

    async fn orders_for(&self, user_id: i64) -> GatewayResult<Vec<Order>> {
        self.send(&ListUserOrdersRequest { user_id }).await
    }

    async fn place_order(&self, req: CreateOrderRequest) -> GatewayResult<Order> {
        self.send(&req).await
    }

    async fn system_status(&self) -> GatewayResult<SystemStatus> {
        self.send(&SystemStatusRequest).await
    }

    async fn trigger_stress(&self, seconds: u32, intensity: u32) -> GatewayResult<StressAck> {
        self.send(&StressRequest { seconds, intensity }).await
    }
}

// =========================================================
// Leptos 绑定
// =========================================================

/// 注入组件树的网关客户端句柄
#[derive(Clone)]
pub struct ApiContext(Arc<OpenStallApi>);

impl ApiContext {
    pub fn new() -> Self {
        Self(Arc::new(OpenStallApi::default()))
    }

    pub fn client(&self) -> &OpenStallApi {
        &self.0
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取网关客户端
pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("ApiContext should be provided")
}
