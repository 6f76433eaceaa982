use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::UserService;
use crate::errors::EduAdminError;
use crate::mail;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::CreatedUserResponse},
};
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

const TEMP_PASSWORD_LENGTH: usize = 12;

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证用户名
    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParameters, msg)));
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParameters, msg)));
    }

    // 未提供密码时生成临时密码，通过邮件发送给新用户
    let (plain_password, generated) = match user_data.password.take() {
        Some(password) => {
            if let Err(msg) = validate_password_simple(&password) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::InvalidParameters, msg)));
            }
            (password, false)
        }
        None => (generate_random_code(TEMP_PASSWORD_LENGTH), true),
    };

    user_data.password = match hash_password(&plain_password) {
        Ok(hash) => Some(hash),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let storage = service.get_storage(request);
    let email = user_data.email.clone();
    let username = user_data.username.clone();

    match storage.create_user(user_data).await {
        Ok(user) => {
            // 临时密码通过邮件下发；发送失败时降级为在响应中返回一次
            let mut temporary_password = None;
            if generated {
                match mail::send_temporary_password(&email, &username, &plain_password).await {
                    Ok(()) => {}
                    Err(e) => {
                        warn!(
                            "Failed to deliver temporary password to {}: {}",
                            email,
                            e.format_simple()
                        );
                        temporary_password = Some(plain_password);
                    }
                }
            }

            Ok(HttpResponse::Created().json(ApiResponse::success(
                CreatedUserResponse {
                    user,
                    temporary_password,
                },
                "用户创建成功",
            )))
        }
        // 用户名/邮箱唯一索引冲突
        Err(EduAdminError::UniqueViolation(detail)) => {
            warn!("User creation rejected by unique constraint: {}", detail);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Username or email already exists",
            )))
        }
        Err(e) => {
            let msg = format!("User creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::UserCreationFailed, msg)))
        }
    }
}
