//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，
//! 验证一步交给核心库的 `route::guard`。

use leptos::prelude::*;
use mycloud::SessionState;
use mycloud::route::{AppRoute, RouteDecision, guard};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话状态信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    session: Signal<SessionState>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由同样经过守卫，受保护页面不会在未登录时渲染哪怕一帧。
    fn new(session: Signal<SessionState>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial = match guard(&requested, session.get_untracked()) {
            RouteDecision::Render(route) => route,
            RouteDecision::Redirect(route) => {
                tracing::info!("[Router] Initial route {} redirected to {}", requested, route);
                replace_history_state(&route.to_path());
                route
            }
        };
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate_to(&self, target_route: AppRoute) {
        // --- Step 1: 验证目标路由 ---
        let route = match guard(&target_route, self.session.get_untracked()) {
            RouteDecision::Render(route) => route,
            RouteDecision::Redirect(route) => {
                tracing::info!("[Router] Access to {} denied. Redirecting to {}.", target_route, route);
                route
            }
        };

        // --- Step 2: 加载页面 (更新状态) ---
        push_history_state(&route.to_path());
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());

            // popstate 时也执行守卫逻辑
            match guard(&target_route, session.get_untracked()) {
                RouteDecision::Render(route) => set_route.set(route),
                RouteDecision::Redirect(route) => {
                    tracing::info!("[Router] Back/forward to {} redirected to {}.", target_route, route);
                    replace_history_state(&route.to_path());
                    set_route.set(route);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化时重新执行守卫
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let state = session.get();
            let route = current_route.get_untracked();

            if let RouteDecision::Redirect(redirect) = guard(&route, state) {
                tracing::info!(
                    "[Router] Session changed (authenticated: {}), redirecting {} -> {}.",
                    state.is_authenticated,
                    route,
                    redirect
                );
                push_history_state(&redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionState>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。只有守卫放行的路由才会交给 `matcher`。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        match guard(&current, router.session.get()) {
            RouteDecision::Render(route) => matcher(route),
            // 重定向由 Effect 完成，这里什么也不渲染
            RouteDecision::Redirect(_) => ().into_any(),
        }
    }
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(into, optional)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let href = to.to_path();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(to.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
