//! 网关客户端抽象层
//!
//! 定义前端与远程网关之间的类型化接口 (Trait) 与错误分类，
//! 让动作编排层可以注入 Mock 实现进行单元测试。

use async_trait::async_trait;
use openstall_shared::protocol::{CreateOrderRequest, CreateProductRequest};
use openstall_shared::{Order, Product, StressAck, SystemStatus, User, UserSummary};
use std::fmt;

// =========================================================
// 错误分类
// =========================================================

/// 网关错误
///
/// 三类故障都会在动作层就地恢复并转换为一条用户可见的错误通知，
/// 不会作为未捕获错误向上传播，任何位置都不做重试。
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// 传输层失败（未收到响应）
    Network(String),
    /// 服务端返回非 2xx，可能携带 detail 消息
    Status { code: u16, detail: Option<String> },
    /// 响应体解析失败
    Decode(String),
}

impl GatewayError {
    /// 用户可见的错误文案：优先采用服务端提供的 detail
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// 是否为传输层失败
    pub fn is_network(&self) -> bool {
        matches!(self, GatewayError::Network(_))
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Network(msg) => write!(f, "network error: {}", msg),
            GatewayError::Status { code, detail } => match detail {
                Some(detail) => write!(f, "gateway returned {}: {}", code, detail),
                None => write!(f, "gateway returned {}", code),
            },
            GatewayError::Decode(msg) => write!(f, "invalid response: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

pub type GatewayResult<T> = Result<T, GatewayError>;

// =========================================================
// 网关操作接口
// =========================================================

/// 网关操作接口
///
/// (?Send): WASM 单线程环境下 Future 不要求 Send
#[async_trait(?Send)]
pub trait Gateway {
    /// 邮箱查找登录，只返回用户摘要
    async fn login(&self, email: &str) -> GatewayResult<UserSummary>;
    /// 拉取完整用户记录（含余额）
    async fn fetch_user(&self, id: i64) -> GatewayResult<User>;
    /// 注册新用户，起始余额由服务端分配
    async fn register(&self, name: &str, email: &str) -> GatewayResult<User>;
    /// 商品列表
    async fn products(&self) -> GatewayResult<Vec<Product>>;
    /// 上架商品（管理操作）
    async fn create_product(&self, req: CreateProductRequest) -> GatewayResult<Product>;
    /// 某个用户的订单列表
    async fn orders_for(&self, user_id: i64) -> GatewayResult<Vec<Order>>;
    /// 下单；拒绝时的 detail 由调用方原样展示
    async fn place_order(&self, req: CreateOrderRequest) -> GatewayResult<Order>;
    /// 系统状态探针
    async fn system_status(&self) -> GatewayResult<SystemStatus>;
    /// 触发后端压测
    async fn trigger_stress(&self, seconds: u32, intensity: u32) -> GatewayResult<StressAck>;
}

// =========================================================
// 内存 Mock 实现
// =========================================================
