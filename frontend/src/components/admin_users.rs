use crate::api::{PageApi, use_api, use_queries};
use crate::auth::use_auth;
use crate::components::alert::{ErrorAlert, Loading};
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mycloud::actions;
use mycloud::mutation::Mutation;
use mycloud::query::QueryKey;
use mycloud::route::AppRoute;
use mycloud::shared::{User, format_size};

/// 用户管理页面
#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let queries = use_queries();

    let users = LocalResource::new(move || {
        queries.track(QueryKey::Users);
        let api = api.get();
        let credential = auth.credential();
        async move { api.list_users(credential.as_ref()).await }
    });

    let table = move || {
        users.get().map(|result| match result {
            Ok(list) if list.is_empty() => view! {
                <p class="text-center py-8 text-base-content/50">"没有用户"</p>
            }
            .into_any(),
            Ok(list) => view! {
                <div class="overflow-x-auto">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"用户名"</th>
                                <th>"名字"</th>
                                <th class="hidden md:table-cell">"邮箱"</th>
                                <th>"文件数"</th>
                                <th>"总大小"</th>
                                <th>"管理员"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|user| view! { <UserRow user=user api=api /> })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            }
            .into_any(),
            Err(e) if e.is_cancelled() => ().into_any(),
            Err(e) => view! { <ErrorAlert message=Some(e.user_message()) /> }.into_any(),
        })
    };

    view! {
        <div class="max-w-6xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"用户管理"</h1>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <Suspense fallback=|| view! { <Loading /> }>
                        {table}
                    </Suspense>
                </div>
            </div>
        </div>
    }
}

#[component]
fn UserRow(user: User, api: PageApi) -> impl IntoView {
    let auth = use_auth();
    let queries = use_queries();
    let status = RwSignal::new(Mutation::default());
    let id = user.id;

    let is_staff = RwSignal::new(user.is_staff);

    let on_toggle_admin = move |ev: leptos::ev::Event| {
        let requested = event_target_checked(&ev);
        is_staff.set(requested);
        if !status.try_update(Mutation::begin).unwrap_or(false) {
            is_staff.set(!requested);
            return;
        }
        let api = api.get();
        let credential = auth.credential();
        spawn_local(async move {
            let result = actions::toggle_admin(&api, credential.as_ref(), id).await;
            status.update(|m| m.finish(&result));
            is_staff.set(actions::settled_admin_flag(requested, &result));
            if let Ok(invalidate) = result {
                queries.apply(invalidate);
            }
        });
    };

    let on_delete = move |_| {
        if !status.try_update(Mutation::begin).unwrap_or(false) {
            return;
        }
        let api = api.get();
        let credential = auth.credential();
        spawn_local(async move {
            let result = actions::delete_user(&api, credential.as_ref(), id).await;
            status.update(|m| m.finish(&result));
            if let Ok(invalidate) = result {
                queries.apply(invalidate);
            }
        });
    };

    let is_pending = move || status.with(Mutation::is_pending);

    view! {
        <tr>
            <td class="font-mono">{user.username}</td>
            <td>{user.first_name}</td>
            <td class="hidden md:table-cell">{user.email}</td>
            <td>{user.total_files}</td>
            <td>{format_size(user.total_size)}</td>
            <td>
                <input
                    type="checkbox"
                    class="toggle toggle-primary toggle-sm"
                    prop:checked=move || is_staff.get()
                    disabled=is_pending
                    on:change=on_toggle_admin
                />
            </td>
            <td class="flex gap-2 items-center">
                <Link to=AppRoute::AdminUserFiles(id) class="btn btn-ghost btn-xs">"文件"</Link>
                <button class="btn btn-ghost btn-xs text-error" disabled=is_pending on:click=on_delete>
                    "删除"
                </button>
                {move || status.with(|m| m.error().map(|msg| view! {
                    <span class="text-xs text-error">{msg.to_string()}</span>
                }))}
            </td>
        </tr>
    }
}
