//! 路径参数安全提取器
//!
//! 直接使用 web::Path<i64> 时，非法参数会返回框架默认的纯文本错误。
//! 这里为每类 ID 提供提取器，解析失败时返回统一的 JSON 错误响应。

use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, error::InternalError};
use futures_util::future::{Ready, err, ok};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_id_extractor {
    ($(
        $name:ident($param:literal)
    ),* $(,)?) => {
        $(
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    match req
                        .match_info()
                        .get($param)
                        .and_then(|v| v.parse::<i64>().ok())
                        .filter(|id| *id > 0)
                    {
                        Some(id) => ok($name(id)),
                        None => {
                            let response = actix_web::HttpResponse::BadRequest().json(
                                ApiResponse::error_empty(
                                    ErrorCode::InvalidParameters,
                                    format!("Invalid {} in path", $param),
                                ),
                            );
                            err(InternalError::from_response(
                                format!("Invalid {} in path", $param),
                                response,
                            )
                            .into())
                        }
                    }
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeUserIdI64("user_id"),
    SafeGroupIdI64("group_id"),
    SafeLessonIdI64("lesson_id"),
    SafeStudentIdI64("student_id"),
}
