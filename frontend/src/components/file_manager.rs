//! 文件管理器
//!
//! 挂载时用当前凭据拉取文件列表；上传成功后清空表单并使列表失效，
//! 列表随后按新的代数重新拉取。

use crate::api::{use_api, use_queries};
use crate::auth::use_auth;
use crate::components::alert::{ErrorAlert, Loading};
use crate::components::file_item::FileItem;
use crate::components::icons::{RefreshCw, Upload};
use crate::web::file::read_selected_file;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mycloud::actions;
use mycloud::forms::UploadDraft;
use mycloud::mutation::Mutation;
use mycloud::query::QueryKey;

/// 上传表单状态
#[derive(Clone, Copy)]
struct UploadFormState {
    draft: RwSignal<UploadDraft>,
    status: RwSignal<Mutation>,
    input: NodeRef<leptos::html::Input>,
}

impl UploadFormState {
    fn new() -> Self {
        Self {
            draft: RwSignal::new(UploadDraft::default()),
            status: RwSignal::new(Mutation::default()),
            input: NodeRef::new(),
        }
    }

    /// 清空文件选择框与备注
    fn reset(&self) {
        self.draft.update(UploadDraft::clear);
        if let Some(input) = self.input.get_untracked() {
            input.set_value("");
        }
    }

    fn can_submit(&self) -> bool {
        self.draft.with(UploadDraft::can_submit) && !self.status.with(Mutation::is_pending)
    }
}

#[component]
pub fn FileManager() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let queries = use_queries();
    let form = UploadFormState::new();

    let files = LocalResource::new(move || {
        queries.track(QueryKey::Files);
        let api = api.get();
        let credential = auth.credential();
        async move { api.list_files(credential.as_ref()).await }
    });

    // 服务端返回的管理员标记是权威值
    Effect::new(move |_| {
        files.with(|result| {
            if let Some(Ok(list)) = result {
                auth.sync_admin(list.is_admin);
            }
        });
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        spawn_local(async move {
            match read_selected_file(&input).await {
                Ok(file) => form.draft.update(|d| d.file = file),
                Err(e) => {
                    tracing::warn!(error = ?e, "failed to read selected file");
                    form.status.update(|m| m.fail("无法读取所选文件"));
                }
            }
        });
    };

    let on_upload = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.draft.get_untracked();
        if !current.can_submit() || !form.status.try_update(Mutation::begin).unwrap_or(false) {
            return;
        }

        let api = api.get();
        let credential = auth.credential();
        spawn_local(async move {
            let result = actions::upload_file(&api, credential.as_ref(), &current).await;
            form.status.update(|m| m.finish(&result));
            if let Ok(invalidate) = result {
                queries.apply(invalidate);
                form.reset();
            }
        });
    };

    let upload_error = Signal::derive(move || form.status.with(|m| m.error().map(str::to_string)));
    let is_uploading = move || form.status.with(Mutation::is_pending);

    let list_view = move || {
        files.get().map(|result| match result {
            Ok(list) if list.files.is_empty() => view! {
                <p class="text-center py-8 text-base-content/50">"还没有文件，上传一个开始吧。"</p>
            }
            .into_any(),
            Ok(list) => view! {
                <ul class="flex flex-col gap-3">
                    {list
                        .files
                        .into_iter()
                        .map(|file| view! { <FileItem file=file api=api /> })
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
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"云存储"</h1>
                <button
                    class="btn btn-ghost btn-circle"
                    title="刷新"
                    on:click=move |_| queries.invalidate(QueryKey::Files)
                >
                    <RefreshCw attr:class="h-5 w-5" />
                </button>
            </div>

            <form class="card bg-base-100 shadow-xl" on:submit=on_upload>
                <div class="card-body gap-3">
                    <ErrorAlert message=upload_error />
                    <div class="flex flex-col md:flex-row gap-2">
                        <input
                            type="file"
                            class="file-input file-input-bordered w-full md:w-auto"
                            node_ref=form.input
                            on:change=on_file_change
                        />
                        <input
                            type="text"
                            class="input input-bordered flex-1"
                            placeholder="备注"
                            on:input=move |ev| form.draft.update(|d| d.comment = event_target_value(&ev))
                            prop:value=move || form.draft.with(|d| d.comment.clone())
                        />
                        <button class="btn btn-primary gap-2" disabled=move || !form.can_submit()>
                            {move || if is_uploading() {
                                view! { <span class="loading loading-spinner"></span> "上传中..." }.into_any()
                            } else {
                                view! { <Upload attr:class="h-4 w-4" /> "上传文件" }.into_any()
                            }}
                        </button>
                    </div>
                </div>
            </form>

            <Suspense fallback=|| view! { <Loading /> }>
                {list_view}
            </Suspense>
        </div>
    }
}
