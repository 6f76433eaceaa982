//! 业务错误码定义
//!
//! 与 HTTP 状态码分离，前端通过 code 字段判断具体错误。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 认证相关 10xx
    AuthFailed = 1001,
    Unauthorized = 1002,
    TokenInvalid = 1003,
    PermissionDenied = 1004,
    RateLimited = 1005,

    // 用户相关 20xx
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    UserCreationFailed = 2003,
    NotAStudent = 2004,
    StudentAlreadyAssigned = 2005,
    StudentNotAssigned = 2006,
    PasswordMismatch = 2007,

    // 小组相关 30xx
    GroupNotFound = 3001,
    GroupAlreadyExists = 3002,
    GroupPermissionDenied = 3003,
    GroupCreationFailed = 3004,
    StudentAlreadyInGroup = 3005,
    StudentNotInGroup = 3006,

    // 课程相关 40xx
    LessonNotFound = 4001,
    LessonTargetInvalid = 4002,
    LessonPermissionDenied = 4003,
    ParticipantNotInLesson = 4004,
    LessonCreationFailed = 4005,

    // 通用
    InvalidParameters = 9001,
    InternalServerError = 9500,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::AuthFailed as i32, 1001);
        assert_eq!(ErrorCode::StudentAlreadyInGroup as i32, 3005);
        assert_eq!(ErrorCode::LessonTargetInvalid as i32, 4002);
        assert_eq!(ErrorCode::InternalServerError as i32, 9500);
    }
}
