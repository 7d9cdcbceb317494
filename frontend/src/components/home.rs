use crate::auth::use_auth;
use crate::components::file_manager::FileManager;
use crate::components::icons::Cloud;
use crate::web::router::Link;
use leptos::prelude::*;
use mycloud::route::AppRoute;

/// 首页: 已登录显示文件管理器，否则显示欢迎页
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = Memo::new(move |_| auth.state().is_authenticated);

    view! {
        <Show when=move || is_authenticated.get() fallback=|| view! { <Welcome /> }>
            <FileManager />
        </Show>
    }
}

#[component]
fn Welcome() -> impl IntoView {
    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content text-center">
                <div class="max-w-md flex flex-col items-center gap-4">
                    <Cloud attr:class="h-16 w-16 text-primary" />
                    <h1 class="text-4xl font-bold">"MyCloud"</h1>
                    <p class="text-base-content/70">
                        "上传、管理并分享你的文件。登录后即可使用个人云存储。"
                    </p>
                    <div class="flex gap-2">
                        <Link to=AppRoute::Login class="btn btn-primary">"登录"</Link>
                        <Link to=AppRoute::Signup class="btn btn-outline">"注册"</Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
