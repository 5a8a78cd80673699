//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供尽力而为的本地存储接口。
//! 仅用于存放便利性数据（如上次登录的邮箱），绝不存放会话本身。

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 读取存储的字符串值，键不存在或出错时返回 None
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 写入存储值，失败时静默忽略
    pub fn set(key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    /// 删除存储的键值对，失败时静默忽略
    #[allow(dead_code)]
    pub fn delete(key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
