//! 对象缓存抽象层
//!
//! 通过插件注册机制支持多种缓存后端（moka 内存缓存 / redis），
//! 后端由配置 `cache.type` 决定，启动时从注册表按名称构造。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件
///
/// 被声明的类型需要提供 `fn new() -> Result<Self, String>`。
/// 注册在程序加载期（ctor）完成，运行时按名称查找构造器。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $plugin::new()
                                .map_err($crate::errors::EduAdminError::CacheConnection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
