//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_eduadmin_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduAdminError {
            $($variant(String),)*
        }

        impl EduAdminError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduAdminError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduAdminError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduAdminError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduAdminError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduAdminError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_eduadmin_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    UniqueViolation("E013", "Unique Constraint Violation"),
    MailDelivery("E006", "Mail Delivery Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
}

impl EduAdminError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EduAdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduAdminError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduAdminError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突单独区分，服务层据此返回 409 而不是 500
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                EduAdminError::UniqueViolation(msg)
            }
            _ => EduAdminError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for EduAdminError {
    fn from(err: std::io::Error) -> Self {
        EduAdminError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for EduAdminError {
    fn from(err: serde_json::Error) -> Self {
        EduAdminError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduAdminError {
    fn from(err: chrono::ParseError) -> Self {
        EduAdminError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduAdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduAdminError::cache_connection("test").code(), "E001");
        assert_eq!(EduAdminError::database_config("test").code(), "E003");
        assert_eq!(EduAdminError::validation("test").code(), "E007");
        assert_eq!(EduAdminError::authentication("test").code(), "E011");
        assert_eq!(EduAdminError::unique_violation("test").code(), "E013");
    }

    #[test]
    fn test_unique_violation_is_distinguishable() {
        let unique = EduAdminError::unique_violation("users.email");
        let generic = EduAdminError::database_operation("connection reset");
        assert!(matches!(unique, EduAdminError::UniqueViolation(_)));
        assert!(!matches!(generic, EduAdminError::UniqueViolation(_)));
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduAdminError::mail_delivery("test").error_type(),
            "Mail Delivery Error"
        );
        assert_eq!(
            EduAdminError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = EduAdminError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = EduAdminError::authorization("Access denied");
        let formatted = err.format_simple();
        assert!(formatted.contains("Authorization Error"));
        assert!(formatted.contains("Access denied"));
    }
}
