use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 网关统一前缀（由反向代理转发到后端网关服务）
pub const GATEWAY_PREFIX: &str = "/api";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 完整的用户记录（含余额），即客户端缓存的会话内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub wallet: f64,
}

/// 登录接口返回的用户摘要
///
/// 登录只回传 id 与 name，余额需要再拉取一次完整记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
}

/// 商品记录（服务端所有，客户端只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

/// 订单记录（服务端所有，id 一律由网关响应产生）
///
/// status 的取值集合由服务端定义（如 "confirmed"），客户端只负责展示，
/// 因此保持为字符串而不做枚举约束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub status: String,
}

/// 系统状态探针的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub service: String,
    pub status: String,
}

/// 压测触发接口的确认响应（客户端视为不透明）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressAck {
    pub message: String,
}
