//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient`。
//! 每个客户端属于一个请求作用域，作用域关闭时中止其所有进行中的请求。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mycloud::request::{
    FormPart, HttpClient, HttpRequest, HttpResponse, RequestBody, TransportError,
};
use js_sys::Object;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, FormData, Headers, Request, RequestInit, Response};

use super::file::bytes_to_blob;
use super::timer::Timeout;

// =========================================================
// 请求作用域
// =========================================================

#[derive(Default)]
struct ScopeInner {
    controllers: RefCell<Vec<AbortController>>,
    closed: Cell<bool>,
}

/// 一个页面拥有的进行中请求集合
#[derive(Clone, Default)]
pub struct RequestScope {
    inner: Rc<ScopeInner>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    /// 关闭作用域并中止所有进行中的请求
    pub fn abort_all(&self) {
        self.inner.closed.set(true);
        let controllers: Vec<_> = self.inner.controllers.borrow_mut().drain(..).collect();
        if !controllers.is_empty() {
            tracing::debug!(count = controllers.len(), "aborting in-flight requests");
        }
        for controller in controllers {
            controller.abort();
        }
    }

    fn register(&self, controller: &AbortController) {
        self.inner.controllers.borrow_mut().push(controller.clone());
    }

    fn release(&self, controller: &AbortController) {
        self.inner
            .controllers
            .borrow_mut()
            .retain(|c| !Object::is(c, controller));
    }
}

// =========================================================
// fetch 客户端
// =========================================================

/// 基于 `fetch` 的 HTTP 客户端
#[derive(Clone, Default)]
pub struct FetchHttpClient {
    scope: RequestScope,
}

impl FetchHttpClient {
    pub fn new(scope: RequestScope) -> Self {
        Self { scope }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        if self.scope.is_closed() {
            return Err(TransportError::Cancelled);
        }

        let controller = AbortController::new().map_err(|e| network_error("创建 AbortController 失败", &e))?;
        self.scope.register(&controller);

        let timed_out = Rc::new(Cell::new(false));
        let _timer = req.timeout.and_then(|timeout| {
            let controller = controller.clone();
            let timed_out = timed_out.clone();
            let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
            Timeout::new(millis, move || {
                timed_out.set(true);
                controller.abort();
            })
        });

        let result = fetch(&req, &controller).await;
        self.scope.release(&controller);

        result.map_err(|e| {
            if timed_out.get() {
                TransportError::Timeout
            } else if controller.signal().aborted() {
                TransportError::Cancelled
            } else {
                e
            }
        })
    }
}

async fn fetch(req: &HttpRequest, controller: &AbortController) -> Result<HttpResponse, TransportError> {
    let headers = Headers::new().map_err(|e| network_error("创建 Headers 失败", &e))?;
    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| network_error("设置 Header 失败", &e))?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());
    opts.set_signal(Some(&controller.signal()));

    match &req.body {
        RequestBody::Empty => {}
        RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
        RequestBody::Multipart(parts) => opts.set_body(&form_data(parts)?.into()),
    }

    let request = Request::new_with_str_and_init(&req.url, &opts)
        .map_err(|e| network_error("请求构建失败", &e))?;

    let window = web_sys::window()
        .ok_or_else(|| TransportError::Network("无法获取 window 对象".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| network_error("请求失败", &e))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|e| network_error("Response 类型转换失败", &e))?;

    let mut resp = HttpResponse::new(response.status(), Vec::new());
    if let Ok(Some(iter)) = js_sys::try_iter(&response.headers()) {
        for entry in iter.flatten() {
            let pair: js_sys::Array = entry.unchecked_into();
            if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                resp = resp.with_header(&key, &value);
            }
        }
    }

    let buffer = response
        .array_buffer()
        .map_err(|e| network_error("读取响应失败", &e))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| network_error("读取响应失败", &e))?;
    resp.body = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(resp)
}

fn form_data(parts: &[FormPart]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(|e| network_error("创建 FormData 失败", &e))?;
    for part in parts {
        let appended = match &part.file_name {
            Some(file_name) => {
                let blob = bytes_to_blob(&part.data, part.content_type.as_deref())
                    .map_err(|e| network_error("创建 Blob 失败", &e))?;
                form.append_with_blob_and_filename(&part.name, &blob, file_name)
            }
            None => form.append_with_str(&part.name, part.as_text().unwrap_or_default()),
        };
        appended.map_err(|e| network_error("写入表单失败", &e))?;
    }
    Ok(form)
}

fn network_error(context: &str, err: &JsValue) -> TransportError {
    let detail = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    TransportError::Network(format!("{}: {}", context, detail))
}
