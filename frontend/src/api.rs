//! 页面级 API 访问
//!
//! 每个调用 `use_api` 的组件拥有自己的请求作用域，组件卸载时中止进行中的请求。

use crate::web::{FetchHttpClient, RequestScope};
use leptos::prelude::*;
use mycloud::query::{Invalidate, QueryCache, QueryKey};
use mycloud::{ClientConfig, CloudApi};

pub type Api = CloudApi<FetchHttpClient>;

/// 组件持有的 API 句柄
#[derive(Clone, Copy)]
pub struct PageApi {
    api: StoredValue<Api, LocalStorage>,
}

impl PageApi {
    pub fn get(&self) -> Api {
        self.api.get_value()
    }
}

pub fn use_api() -> PageApi {
    let config = use_context::<ClientConfig>().expect("ClientConfig should be provided");
    let scope = RequestScope::new();
    let api = CloudApi::new(FetchHttpClient::new(scope.clone()), config);

    let scope = StoredValue::new_local(scope);
    on_cleanup(move || {
        scope.try_with_value(RequestScope::abort_all);
    });

    PageApi {
        api: StoredValue::new_local(api),
    }
}

/// 列表查询的失效状态
#[derive(Clone, Copy)]
pub struct Queries(pub RwSignal<QueryCache>);

impl Queries {
    /// 读取代数并建立响应式依赖
    pub fn track(&self, key: QueryKey) -> u64 {
        self.0.with(|c| c.generation(key))
    }

    pub fn apply(&self, invalidate: Invalidate) {
        self.0.update(|c| c.apply(invalidate));
    }

    pub fn invalidate(&self, key: QueryKey) {
        self.0.update(|c| c.invalidate(key));
    }
}

pub fn use_queries() -> Queries {
    use_context::<Queries>().expect("Queries should be provided")
}
