use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::alert::ErrorAlert;
use crate::components::icons::ShieldCheck;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mycloud::forms::LoginForm;
use mycloud::mutation::Mutation;
use mycloud::route::AppRoute;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let form = RwSignal::new(LoginForm::default());
    let status = RwSignal::new(Mutation::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();

        if let Err(errors) = current.validate() {
            status.update(|m| m.fail(errors.to_string()));
            return;
        }
        if !status.try_update(Mutation::begin).unwrap_or(false) {
            return;
        }

        let api = api.get();
        spawn_local(async move {
            let result = auth.login(&api, &current).await;
            status.update(|m| m.finish(&result));
            if result.is_ok() {
                form.update(LoginForm::clear);
                router.navigate_to(AppRoute::auth_success_redirect());
            }
        });
    };

    let is_submitting = move || status.with(Mutation::is_pending);
    let error = Signal::derive(move || status.with(|m| m.error().map(str::to_string)));

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"登录"</h1>
                        <p class="text-base-content/70">"使用用户名和密码访问你的云存储"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error />

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"用户名"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.username.clone())
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.password.clone())
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                } else {
                                    "登录".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center text-base-content/70">
                            "还没有账号？ "
                            <Link to=AppRoute::Signup class="link link-primary">"注册"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
