//! 认证模块
//!
//! 会话保存在一个信号中，`AuthContext` 的方法是唯一的写入者。
//! 路由服务通过注入的会话状态信号检查认证状态。

use crate::api::Api;
use crate::web::BrowserStorage;
use leptos::prelude::*;
use mycloud::auth;
use mycloud::forms::LoginForm;
use mycloud::query::QueryCache;
use mycloud::{ApiResult, ClientConfig, Credential, Session, SessionState};

/// 认证上下文
///
/// 通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session<BrowserStorage>>,
    queries: RwSignal<QueryCache>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复会话
    pub fn new(config: &ClientConfig, queries: RwSignal<QueryCache>) -> Self {
        let session = Session::restore(BrowserStorage, config);
        tracing::info!(
            authenticated = session.is_authenticated(),
            "session restored from storage"
        );
        Self {
            session: RwSignal::new(session),
            queries,
        }
    }

    /// 当前会话状态（响应式）
    pub fn state(&self) -> SessionState {
        self.session.with(Session::state)
    }

    /// 获取会话状态信号（用于路由服务注入）
    pub fn state_signal(&self) -> Signal<SessionState> {
        let session = self.session;
        Signal::derive(move || session.with(Session::state))
    }

    /// 发请求用的凭据，不建立响应式依赖
    pub fn credential(&self) -> Option<Credential> {
        self.session.with_untracked(|s| s.credential().cloned())
    }

    /// 登录，失败时会话不变
    pub async fn login(&self, api: &Api, form: &LoginForm) -> ApiResult<SessionState> {
        let mut draft = self.session.get_untracked();
        let state = auth::login(api, &mut draft, form).await?;
        self.session.set(draft);
        Ok(state)
    }

    /// 注销: 立即清除本地状态，再尽力通知服务端
    pub async fn logout(&self, api: &Api) {
        let previous = self.session.try_update(|s| s.sign_out()).flatten();
        self.queries.update(QueryCache::clear);
        auth::revoke(api, previous).await;
    }

    /// 服务端返回的管理员标记与本地不同时同步
    pub fn sync_admin(&self, is_admin: bool) {
        let current = self.session.with_untracked(|s| s.is_admin());
        if current != is_admin {
            self.session.update(|s| s.set_admin(is_admin));
        }
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
