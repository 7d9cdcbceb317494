use crate::api::{use_api, use_queries};
use crate::auth::use_auth;
use crate::components::alert::{ErrorAlert, Loading};
use crate::components::file_item::FileItem;
use crate::web::router::Link;
use leptos::prelude::*;
use mycloud::query::QueryKey;
use mycloud::route::AppRoute;
use mycloud::shared::UserId;

/// 管理员查看某个用户的文件（只读）
#[component]
pub fn AdminUserFilesPage(user_id: UserId) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let queries = use_queries();

    let files = LocalResource::new(move || {
        queries.track(QueryKey::UserFiles(user_id));
        let api = api.get();
        let credential = auth.credential();
        async move { api.list_user_files(credential.as_ref(), user_id).await }
    });

    let list_view = move || {
        files.get().map(|result| match result {
            Ok(list) if list.is_empty() => view! {
                <p class="text-center py-8 text-base-content/50">"该用户没有文件"</p>
            }
            .into_any(),
            Ok(list) => view! {
                <ul class="flex flex-col gap-3">
                    {list
                        .into_iter()
                        .map(|file| view! { <FileItem file=file api=api read_only=true /> })
                        .collect_view()}
                </ul>
            }
            .into_any(),
            Err(e) if e.is_cancelled() => ().into_any(),
            Err(e) => view! { <ErrorAlert message=Some(e.user_message()) /> }.into_any(),
        })
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <div class="flex items-center gap-4">
                <Link to=AppRoute::AdminUsers class="btn btn-ghost btn-sm">"← 用户列表"</Link>
                <h1 class="text-3xl font-bold">"用户 #" {user_id.to_string()} " 的文件"</h1>
            </div>
            <Suspense fallback=|| view! { <Loading /> }>
                {list_view}
            </Suspense>
        </div>
    }
}
