//! 浏览器控制台输出
//!
//! - `tracing` 事件格式化后写入 `console.*`
//! - panic 信息连同 JS 调用栈写入 `console.error`

use std::io;
use std::panic;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(inline_js = "export function get_stack() { return new Error().stack; }")]
extern "C" {
    fn get_stack() -> String;
}

// =========================================================
// tracing writer
// =========================================================

/// 缓冲一条格式化后的日志，drop 时按级别输出到控制台
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }
        let msg = wasm_bindgen::JsValue::from_str(line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&msg),
            Level::WARN => web_sys::console::warn_1(&msg),
            Level::INFO => web_sys::console::info_1(&msg),
            _ => web_sys::console::debug_1(&msg),
        }
    }
}

pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// 日志级别由构建时的 `MYCLOUD_LOG` 决定，默认 `info`
fn max_level() -> Level {
    option_env!("MYCLOUD_LOG")
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(Level::INFO)
}

pub fn init_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .without_time()
        .with_target(false)
        .with_max_level(max_level())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }
}

// =========================================================
// panic hook
// =========================================================

/// 把 panic 写入 `console.error`，非 wasm 目标写入 `stderr`
pub fn hook(info: &panic::PanicHookInfo) {
    #[cfg(target_arch = "wasm32")]
    {
        let msg = format!("{}\n\nStack:\n\n{}\n\n", info, get_stack());
        web_sys::console::error_1(&msg.into());
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::io::Write;
        let _ = writeln!(io::stderr(), "{}", info);
    }
}

pub fn init_panic_hook() {
    panic::set_hook(Box::new(hook));
}
