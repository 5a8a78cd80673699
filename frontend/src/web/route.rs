//! 视图定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有顶层视图及导航守卫规则。

use std::fmt::Display;

/// 顶层视图枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// 登录 / 注册页（默认视图）
    #[default]
    Auth,
    /// 商店
    Shop,
    /// 我的订单
    Orders,
    /// 管理页
    Admin,
    /// 页面未找到
    NotFound,
}

impl AppView {
    /// 将 URL path 解析为视图枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/auth" => Self::Auth,
            "/shop" => Self::Shop,
            "/orders" => Self::Orders,
            "/admin" => Self::Admin,
            _ => Self::NotFound,
        }
    }

    /// 获取视图对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Auth => "/",
            Self::Shop => "/shop",
            Self::Orders => "/orders",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// 已认证用户是否应离开此视图（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Auth
    }

    /// 认证成功时的重定向目标（登录后落地页）
    pub fn auth_success_redirect() -> Self {
        Self::Shop
    }
}

/// **核心守卫逻辑：单步导航解析**
///
/// 无会话时除登录页外的一切目标都被重定向到登录页；
/// 已认证用户访问登录页则落地到商店。
/// 守卫只重定向一次：重定向目标本身不会再次触发守卫。
pub fn guard(target: AppView, is_authenticated: bool) -> AppView {
    if !is_authenticated && target != AppView::Auth {
        return AppView::auth_failure_redirect();
    }
    if is_authenticated && target.should_redirect_when_authenticated() {
        return AppView::auth_success_redirect();
    }
    target
}

impl Display for AppView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VIEWS: [AppView; 5] = [
        AppView::Auth,
        AppView::Shop,
        AppView::Orders,
        AppView::Admin,
        AppView::NotFound,
    ];

    #[test]
    fn unauthenticated_always_lands_on_auth() {
        for view in ALL_VIEWS {
            assert_eq!(guard(view, false), AppView::Auth, "view {view:?}");
        }
    }

    #[test]
    fn guard_is_terminal() {
        // 重定向结果再次过守卫必须保持不变，否则会形成循环
        for view in ALL_VIEWS {
            for authed in [false, true] {
                let once = guard(view, authed);
                assert_eq!(guard(once, authed), once, "view {view:?} authed {authed}");
            }
        }
    }

    #[test]
    fn authenticated_passes_through_protected_views() {
        assert_eq!(guard(AppView::Shop, true), AppView::Shop);
        assert_eq!(guard(AppView::Orders, true), AppView::Orders);
        assert_eq!(guard(AppView::Admin, true), AppView::Admin);
    }

    #[test]
    fn authenticated_leaves_auth_for_shop() {
        assert_eq!(guard(AppView::Auth, true), AppView::Shop);
    }

    #[test]
    fn path_round_trip() {
        for view in [AppView::Auth, AppView::Shop, AppView::Orders, AppView::Admin] {
            assert_eq!(AppView::from_path(view.to_path()), view);
        }
        assert_eq!(AppView::from_path("/nope"), AppView::NotFound);
    }
}
