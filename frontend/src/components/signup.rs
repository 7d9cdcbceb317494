//! 注册页面
//!
//! 提交按钮在表单全部通过校验前保持禁用；注册成功后跳转到登录页，不自动登录。

use crate::api::use_api;
use crate::components::alert::ErrorAlert;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mycloud::auth;
use mycloud::forms::SignupForm;
use mycloud::mutation::Mutation;
use mycloud::route::AppRoute;
use mycloud::validation::Field;

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let form = RwSignal::new(SignupForm::default());
    let status = RwSignal::new(Mutation::default());
    // 字段被编辑过才显示它的错误
    let touched = RwSignal::new(Vec::<Field>::new());

    let errors = Memo::new(move |_| form.with(SignupForm::errors));
    let field_error = move |field: Field| {
        if touched.with(|t| t.contains(&field)) {
            errors.with(|e| e.get(field))
        } else {
            None
        }
    };
    let touch = move |field: Field| {
        if !touched.with_untracked(|t| t.contains(&field)) {
            touched.update(|t| t.push(field));
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !current.is_valid() || !status.try_update(Mutation::begin).unwrap_or(false) {
            return;
        }

        let api = api.get();
        spawn_local(async move {
            let result = auth::register(&api, &current).await;
            status.update(|m| m.finish(&result));
            if result.is_ok() {
                router.navigate_to(AppRoute::Login);
            }
        });
    };

    let can_submit = move || errors.with(|e| e.is_empty()) && !status.with(Mutation::is_pending);
    let error = Signal::derive(move || status.with(|m| m.error().map(str::to_string)));

    let input = move |field: Field, kind: &'static str, autocomplete: &'static str| {
        let id = format!("signup-{:?}", field).to_lowercase();
        view! {
            <div class="form-control">
                <label class="label" for=id.clone()>
                    <span class="label-text">{field.label()}</span>
                </label>
                <input
                    id=id
                    type=kind
                    autocomplete=autocomplete
                    class=move || if field_error(field).is_some() { "input input-bordered input-error" } else { "input input-bordered" }
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| match field {
                            Field::Username => f.username = value,
                            Field::FirstName => f.first_name = value,
                            Field::Email => f.email = value,
                            _ => f.password = value,
                        });
                        touch(field);
                    }
                />
                {move || field_error(field).map(|msg| view! {
                    <label class="label">
                        <span class="label-text-alt text-error">{msg}</span>
                    </label>
                })}
            </div>
        }
    };

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"注册"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error />

                        {input(Field::Username, "text", "username")}
                        {input(Field::FirstName, "text", "given-name")}
                        {input(Field::Email, "email", "email")}
                        {input(Field::Password, "password", "new-password")}

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || !can_submit()>
                                {move || if status.with(Mutation::is_pending) {
                                    view! { <span class="loading loading-spinner"></span> "提交中..." }.into_any()
                                } else {
                                    "注册".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center text-base-content/70">
                            "已有账号？ "
                            <Link to=AppRoute::Login class="link link-primary">"登录"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
