//! 通知模块 (Toast)
//!
//! 短暂的用户可见消息，与其它组件完全解耦：只做输出、尽力而为、永不报错。
//! 每条通知展示固定时长后自动消失；不设队列上限（突发时允许短暂堆叠）。

use leptos::prelude::*;
use std::time::Duration;

/// 通知展示时长
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// 通知严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    fn alert_class(&self) -> &'static str {
        match self {
            Severity::Success => "alert alert-success shadow-lg",
            Severity::Error => "alert alert-error shadow-lg",
            Severity::Info => "alert alert-info shadow-lg",
        }
    }
}

/// 单条通知
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// 通知上下文（Copy，经 Context 注入组件树）
#[derive(Clone, Copy)]
pub struct NotifyContext {
    notices: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u64>,
}

impl NotifyContext {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// 追加一条通知并安排定时移除
    pub fn push(&self, message: impl Into<String>, severity: Severity) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.notices.update(|list| {
            list.push(Notice {
                id,
                message: message.into(),
                severity,
            })
        });

        // 到期移除；按 id 而不是位置，避免与并发通知互相干扰
        let notices = self.notices;
        set_timeout(
            move || notices.update(|list| list.retain(|n| n.id != id)),
            NOTICE_TTL,
        );
    }
}

impl Default for NotifyContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取通知上下文
pub fn use_notify() -> NotifyContext {
    use_context::<NotifyContext>().expect("NotifyContext should be provided")
}

/// 通知堆叠出口组件，置于 App 根部
#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_notify();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    view! {
                        <div class=notice.severity.alert_class()>
                            <span>{notice.message.clone()}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
