//! 文件与剪贴板相关的浏览器 API

use mycloud::DownloadedFile;
use mycloud::forms::SelectedFile;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlInputElement, Url};

/// 用字节构造 Blob
pub fn bytes_to_blob(data: &[u8], content_type: Option<&str>) -> Result<Blob, JsValue> {
    let array = js_sys::Uint8Array::from(data);
    let parts = js_sys::Array::of1(&array);
    let bag = BlobPropertyBag::new();
    if let Some(content_type) = content_type {
        bag.set_type(content_type);
    }
    Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
}

/// 读取 `<input type="file">` 中选中的第一个文件
pub async fn read_selected_file(input: &HtmlInputElement) -> Result<Option<SelectedFile>, JsValue> {
    let Some(file) = input.files().and_then(|list| list.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer()).await?;
    let content_type = file.type_();

    Ok(Some(SelectedFile {
        name: file.name(),
        content_type: (!content_type.is_empty()).then_some(content_type),
        data: js_sys::Uint8Array::new(&buffer).to_vec(),
    }))
}

/// 通过临时链接触发浏览器保存文件
pub fn save_download(file: &DownloadedFile) -> Result<(), JsValue> {
    let blob = bytes_to_blob(&file.bytes, file.content_type.as_deref())?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("无法获取 document 对象"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&file.file_name);
    anchor.click();

    Url::revoke_object_url(&url)
}

/// 写入剪贴板
pub async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("无法获取 window 对象"))?;
    JsFuture::from(window.navigator().clipboard().write_text(text)).await?;
    Ok(())
}
