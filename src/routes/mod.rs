pub mod auth;

pub mod users;

pub mod groups;

pub mod lessons;

pub mod dashboard;

pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use groups::configure_group_routes;
pub use lessons::configure_lesson_routes;
pub use users::configure_user_routes;
