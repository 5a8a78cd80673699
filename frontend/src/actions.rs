//! 用户动作编排层
//!
//! 每个动作遵循同一模式：本地前置校验 -> 调用网关 -> 成功则更新
//! 会话/列表状态并发出成功通知 -> 失败则转换为一条错误通知
//! （服务端给出 detail 时优先展示，否则用各动作的兜底文案）。
//! 网关、会话与 UI 外壳 (Shell) 全部显式注入，不读取任何全局状态，
//! 因此整层可以在原生环境下用 Mock 做单元测试。

use crate::gateway::{Gateway, GatewayError};
use crate::notify::Severity;
use crate::session::SessionStore;
use crate::web::route::AppView;
use openstall_shared::protocol::{CreateOrderRequest, CreateProductRequest};
use openstall_shared::{Order, Product};

#[cfg(test)]
mod tests;

/// UI 外壳接口：通知、确认对话框与导航
///
/// 由触发动作的界面显式传入（测试中替换为 Mock）。
pub trait Shell {
    fn notify(&self, message: &str, severity: Severity);
    fn confirm(&self, message: &str) -> bool;
    fn goto(&self, view: AppView);
}

/// 系统状态探针的展示结果（探针本身永不失败，只产出展示状态）
#[derive(Debug, Clone, PartialEq)]
pub enum SystemHealth {
    /// 尚未完成首次探测
    Unknown,
    /// 在线，附带网关上报的子状态（如 "up"）
    Online(String),
    /// 任何失败（超时、网络错误、非 2xx）都归为离线
    Offline,
}

/// 系统状态探针：在装载时与管理页按需触发
///
/// 不需要 Shell：探针从不产生通知，只更新显示槽。
pub async fn check_status<G: Gateway>(gateway: &G) -> SystemHealth {
    match gateway.system_status().await {
        Ok(status) => SystemHealth::Online(status.status),
        Err(_) => SystemHealth::Offline,
    }
}

/// 登录失败文案：协议层不再细分原因，只区分"到达服务端与否"
fn login_failure_text(err: &GatewayError) -> &'static str {
    if err.is_network() {
        "Connection error"
    } else {
        "Login failed. User not found."
    }
}

/// 动作编排器
pub struct AppActions<'a, G: Gateway, S: Shell> {
    gateway: &'a G,
    session: &'a SessionStore,
    shell: &'a S,
}

impl<'a, G: Gateway, S: Shell> AppActions<'a, G, S> {
    pub fn new(gateway: &'a G, session: &'a SessionStore, shell: &'a S) -> Self {
        Self {
            gateway,
            session,
            shell,
        }
    }

    /// 登录：邮箱查找 -> 二次拉取完整记录（获得余额）-> 整体替换会话
    pub async fn login(&self, email: &str) -> bool {
        let summary = match self.gateway.login(email).await {
            Ok(summary) => summary,
            Err(err) => {
                self.shell.notify(login_failure_text(&err), Severity::Error);
                return false;
            }
        };

        match self.gateway.fetch_user(summary.id).await {
            Ok(user) => {
                self.session.replace(user);
                self.shell.notify("Login successful!", Severity::Success);
                self.shell.goto(AppView::Shop);
                true
            }
            Err(err) => {
                self.shell.notify(login_failure_text(&err), Severity::Error);
                false
            }
        }
    }

    /// 注册：起始余额由服务端分配，响应即完整会话
    pub async fn register(&self, name: &str, email: &str) -> bool {
        match self.gateway.register(name, email).await {
            Ok(user) => {
                self.session.replace(user);
                self.shell
                    .notify("Account created! Welcome bonus: $1000", Severity::Success);
                self.shell.goto(AppView::Shop);
                true
            }
            Err(_) => {
                self.shell.notify("Registration failed", Severity::Error);
                false
            }
        }
    }

    /// 登出：无条件清除会话
    ///
    /// 跳转回登录页由路由服务的认证状态监听自动完成。
    pub fn logout(&self) {
        self.session.clear();
        self.shell.notify("Logged out", Severity::Success);
    }

    /// 购买：需要会话 + 显式确认（硬性门槛），数量固定为 1
    ///
    /// 成功后依次刷新会话余额与商品列表（尽力而为，失败静默）。
    /// 返回购买后重新拉取的商品列表；None 时调用方保留旧列表。
    pub async fn purchase(&self, product_id: i64, price: f64) -> Option<Vec<Product>> {
        let Some(user_id) = self.session.user_id() else {
            self.shell.notify("Please login first", Severity::Error);
            return None;
        };

        if !self
            .shell
            .confirm(&format!("Confirm purchase for ${price}?"))
        {
            return None;
        }

        let req = CreateOrderRequest {
            user_id,
            product_id,
            quantity: 1,
        };
        match self.gateway.place_order(req).await {
            Ok(order) => {
                self.shell
                    .notify(&format!("Order #{} confirmed!", order.id), Severity::Success);
                self.session.refresh(self.gateway).await;
                self.gateway.products().await.ok()
            }
            Err(err) => {
                let text = if err.is_network() {
                    "Transaction failed".to_string()
                } else {
                    err.user_message("Purchase failed")
                };
                self.shell.notify(&text, Severity::Error);
                None
            }
        }
    }

    /// 上架商品：成功后由调用方清空表单；不向任何本地缓存乐观插入
    pub async fn create_product(&self, req: CreateProductRequest) -> bool {
        match self.gateway.create_product(req).await {
            Ok(_) => {
                self.shell
                    .notify("Product added successfully!", Severity::Success);
                true
            }
            Err(err) => {
                self.shell
                    .notify(&err.user_message("Failed to add product"), Severity::Error);
                false
            }
        }
    }

    /// 触发后端压测（管理页）
    pub async fn run_stress(&self, seconds: u32, intensity: u32) {
        self.shell
            .notify(&format!("Triggering load for {seconds}s..."), Severity::Info);
        match self.gateway.trigger_stress(seconds, intensity).await {
            Ok(_) => self.shell.notify("Stress test active!", Severity::Success),
            Err(_) => self
                .shell
                .notify("Failed to trigger stress", Severity::Error),
        }
    }

    /// 商店视图的列表加载：失败时提示一次，调用方保留原列表
    pub async fn load_products(&self) -> Option<Vec<Product>> {
        match self.gateway.products().await {
            Ok(list) => Some(list),
            Err(_) => {
                self.shell
                    .notify("Failed to load products", Severity::Error);
                None
            }
        }
    }

    /// 订单视图的列表加载（按当前会话过滤；无会话时静默跳过）
    pub async fn load_orders(&self) -> Option<Vec<Order>> {
        let user_id = self.session.user_id()?;
        match self.gateway.orders_for(user_id).await {
            Ok(list) => Some(list),
            Err(_) => {
                self.shell.notify("Failed to load orders", Severity::Error);
                None
            }
        }
    }
}

// =========================================================
// UI 外壳实现 (浏览器环境)
// =========================================================

use crate::notify::NotifyContext;
use crate::web::router::RouterService;

/// 浏览器环境下的 Shell：toast 通知 + window.confirm + 路由导航
#[derive(Clone, Copy)]
pub struct UiShell {
    toasts: NotifyContext,
    router: RouterService,
}

impl UiShell {
    pub fn new(toasts: NotifyContext, router: RouterService) -> Self {
        Self { toasts, router }
    }
}

impl Shell for UiShell {
    fn notify(&self, message: &str, severity: Severity) {
        self.toasts.push(message, severity);
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .map(|w| w.confirm_with_message(message).unwrap_or(false))
            .unwrap_or(false)
    }

    fn goto(&self, view: AppView) {
        self.router.navigate(view);
    }
}
