//! 业务服务层
//!
//! 每个领域一个服务结构体，路由层持有 Lazy 静态实例。
//! 服务从请求的 app_data 中取存储句柄，权限校验在服务内完成。

pub mod auth;
pub mod dashboard;
pub mod groups;
pub mod lessons;
pub mod users;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use groups::GroupService;
pub use lessons::LessonService;
pub use users::UserService;
