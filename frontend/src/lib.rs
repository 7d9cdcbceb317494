//! MyCloud 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `mycloud::route`: 路由定义与守卫（领域模型，位于核心库）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `api`: 页面级请求作用域与列表失效
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod admin_user_files;
    pub mod admin_users;
    mod alert;
    mod file_item;
    mod file_manager;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod nav;
    pub mod signup;
}

use crate::api::Queries;
use crate::auth::AuthContext;
use crate::components::admin_user_files::AdminUserFilesPage;
use crate::components::admin_users::AdminUsersPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::nav::Nav;
use crate::components::signup::SignupPage;

use leptos::prelude::*;
use mycloud::ClientConfig;
use mycloud::query::QueryCache;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub mod web {
    pub mod console;
    pub(crate) mod file;
    mod http;
    pub(crate) mod router;
    mod storage;
    mod timer;

    pub use http::{FetchHttpClient, RequestScope};
    pub use storage::BrowserStorage;
}

use mycloud::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::AdminUsers => view! { <AdminUsersPage /> }.into_any(),
        AppRoute::AdminUserFiles(user_id) => view! { <AdminUserFilesPage user_id=user_id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// 读取构建时配置，无效时退回默认值
fn load_config() -> ClientConfig {
    match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid build-time configuration, using defaults");
            ClientConfig::default()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与列表失效状态
    let config = load_config();
    tracing::info!(base_url = %config.base_url, "MyCloud client starting");
    let queries = RwSignal::new(QueryCache::new());
    provide_context(Queries(queries));

    // 2. 从 LocalStorage 恢复会话并创建认证上下文
    let auth_ctx = AuthContext::new(&config, queries);
    provide_context(config);
    provide_context(auth_ctx);

    // 3. 获取会话状态信号，用于注入路由服务（解耦！）
    let session = auth_ctx.state_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
                <div class="max-w-7xl mx-auto">
                    <Nav />
                    <RouterOutlet matcher=route_matcher />
                </div>
            </div>
        </Router>
    }
}
