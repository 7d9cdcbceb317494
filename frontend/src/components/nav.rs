use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::Cloud;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mycloud::route::AppRoute;

/// 顶部导航
///
/// 未登录: 登录 / 注册；已登录: 退出，管理员额外显示用户管理入口。
#[component]
pub fn Nav() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let state = Memo::new(move |_| auth.state());

    let on_logout = move |_| {
        let api = api.get();
        spawn_local(async move {
            auth.logout(&api).await;
        });
        router.navigate_to(AppRoute::Home);
    };

    view! {
        <div class="navbar bg-base-100 shadow-xl rounded-box mb-6">
            <div class="flex-1">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl gap-2">
                    <Cloud attr:class="h-6 w-6 text-primary" />
                    "MyCloud"
                </Link>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=move || state.get().is_authenticated
                    fallback=|| view! {
                        <Link to=AppRoute::Login class="btn btn-ghost">"登录"</Link>
                        <Link to=AppRoute::Signup class="btn btn-ghost">"注册"</Link>
                    }
                >
                    <Show when=move || state.get().is_admin>
                        <Link to=AppRoute::AdminUsers class="btn btn-ghost">"用户管理"</Link>
                    </Show>
                    <button class="btn btn-outline btn-error" on:click=on_logout>"退出"</button>
                </Show>
            </div>
        </div>
    }
}
