//! 文件列表中的一行
//!
//! 支持重命名/修改备注、删除、下载与复制公开链接。每个写操作成功后使文件列表失效。

use crate::api::{PageApi, use_queries};
use crate::auth::use_auth;
use crate::components::icons::{Download, LinkIcon, Pencil, Trash};
use crate::web::file::{copy_to_clipboard, save_download};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mycloud::actions;
use mycloud::forms::FileEdit;
use mycloud::mutation::Mutation;
use mycloud::shared::{FileEntry, format_size};

#[component]
pub fn FileItem(
    file: FileEntry,
    api: PageApi,
    /// 只读模式（管理员查看他人文件）只保留下载与链接
    #[prop(optional)]
    read_only: bool,
) -> impl IntoView {
    let auth = use_auth();
    let queries = use_queries();

    let file = StoredValue::new(file);
    let editing = RwSignal::new(false);
    let edit = RwSignal::new(FileEdit::default());
    let status = RwSignal::new(Mutation::default());
    let notice = RwSignal::new(Option::<&'static str>::None);

    let start_edit = move |_| {
        edit.set(file.with_value(|f| FileEdit::from(f)));
        editing.set(true);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = edit.get_untracked();
        if let Err(errors) = current.validate() {
            status.update(|m| m.fail(errors.to_string()));
            return;
        }
        if !status.try_update(Mutation::begin).unwrap_or(false) {
            return;
        }

        let api = api.get();
        let credential = auth.credential();
        let id = file.with_value(|f| f.id);
        spawn_local(async move {
            let result = actions::update_file(&api, credential.as_ref(), id, &current).await;
            status.update(|m| m.finish(&result));
            if let Ok((_, invalidate)) = result {
                editing.set(false);
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
        let id = file.with_value(|f| f.id);
        spawn_local(async move {
            let result = actions::delete_file(&api, credential.as_ref(), id).await;
            status.update(|m| m.finish(&result));
            if let Ok(invalidate) = result {
                queries.apply(invalidate);
            }
        });
    };

    let on_download = move |_| {
        if !status.try_update(Mutation::begin).unwrap_or(false) {
            return;
        }
        let api = api.get();
        let credential = auth.credential();
        let hash = file.with_value(|f| f.hash.clone());
        spawn_local(async move {
            let result = api.download_file(credential.as_ref(), &hash).await;
            status.update(|m| m.finish(&result));
            if let Ok(downloaded) = result {
                if let Err(e) = save_download(&downloaded) {
                    tracing::warn!(error = ?e, "failed to save download");
                    status.update(|m| m.fail("无法保存文件"));
                }
            }
        });
    };

    let on_copy_link = move |_| {
        let url = file.with_value(|f| api.get().download_url(&f.hash));
        spawn_local(async move {
            let message = match copy_to_clipboard(&url).await {
                Ok(()) => "链接已复制",
                Err(e) => {
                    tracing::warn!(error = ?e, "clipboard unavailable");
                    "无法访问剪贴板"
                }
            };
            notice.set(Some(message));
        });
    };

    let is_pending = move || status.with(Mutation::is_pending);
    let error = move || status.with(|m| m.error().map(str::to_string));

    let (name, size, created, downloaded, comment) = file.with_value(|f| {
        (
            f.name.clone(),
            format_size(f.size),
            f.data_created.map(|t| t.format()).unwrap_or_else(|| "-".to_string()),
            f.date_download.map(|t| t.format()).unwrap_or_else(|| "-".to_string()),
            f.comment().to_string(),
        )
    });

    view! {
        <li class="card bg-base-100 shadow">
            <div class="card-body p-4 gap-2">
                <Show
                    when=move || editing.get()
                    fallback=move || {
                        let name = name.clone();
                        let comment = comment.clone();
                        view! {
                            <div class="flex flex-wrap items-center justify-between gap-2">
                                <div>
                                    <h3 class="font-semibold break-all">{name}</h3>
                                    <p class="text-sm text-base-content/70">{comment}</p>
                                </div>
                                <div class="flex gap-1">
                                    <button class="btn btn-ghost btn-sm" title="下载" disabled=is_pending on:click=on_download>
                                        <Download attr:class="h-4 w-4" />
                                    </button>
                                    <button class="btn btn-ghost btn-sm" title="复制公开链接" on:click=on_copy_link>
                                        <LinkIcon attr:class="h-4 w-4" />
                                    </button>
                                    <Show when=move || !read_only>
                                        <button class="btn btn-ghost btn-sm" title="编辑" disabled=is_pending on:click=start_edit>
                                            <Pencil attr:class="h-4 w-4" />
                                        </button>
                                        <button class="btn btn-ghost btn-sm text-error" title="删除" disabled=is_pending on:click=on_delete>
                                            <Trash attr:class="h-4 w-4" />
                                        </button>
                                    </Show>
                                </div>
                            </div>
                        }
                    }
                >
                    <form class="flex flex-col gap-2" on:submit=on_save>
                        <input
                            type="text"
                            class="input input-bordered input-sm"
                            on:input=move |ev| edit.update(|e| e.name = event_target_value(&ev))
                            prop:value=move || edit.with(|e| e.name.clone())
                        />
                        <input
                            type="text"
                            class="input input-bordered input-sm"
                            placeholder="备注"
                            on:input=move |ev| edit.update(|e| e.comment = event_target_value(&ev))
                            prop:value=move || edit.with(|e| e.comment.clone())
                        />
                        <div class="flex gap-2">
                            <button class="btn btn-primary btn-sm" disabled=is_pending>"保存"</button>
                            <button type="button" class="btn btn-ghost btn-sm" on:click=move |_| editing.set(false)>"取消"</button>
                        </div>
                    </form>
                </Show>

                <div class="flex flex-wrap gap-x-4 text-xs text-base-content/60">
                    <span>"大小: " {size}</span>
                    <span>"上传于: " {created}</span>
                    <span>"最近下载: " {downloaded}</span>
                </div>

                {move || error().map(|msg| view! { <p class="text-sm text-error">{msg}</p> })}
                {move || notice.get().map(|msg| view! { <p class="text-sm text-success">{msg}</p> })}
            </div>
        </li>
    }
}
