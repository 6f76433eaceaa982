//! SMTP 邮件发送
//!
//! 用于向新建账号的用户发送临时密码。`smtp.enabled = false` 时
//! 所有发送调用直接返回 `MailDelivery` 错误，由调用方降级处理。

use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use once_cell::sync::OnceCell;
use tracing::{debug, error};

use crate::config::AppConfig;
use crate::errors::{EduAdminError, Result};

static MAILER: OnceCell<AsyncSmtpTransport<Tokio1Executor>> = OnceCell::new();

fn get_transport() -> Result<&'static AsyncSmtpTransport<Tokio1Executor>> {
    MAILER.get_or_try_init(|| {
        let config = AppConfig::get();
        let smtp = &config.smtp;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
            .map_err(|e| EduAdminError::MailDelivery(format!("Invalid SMTP relay host: {e}")))?
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build();

        debug!("SMTP transport initialized for {}:{}", smtp.host, smtp.port);
        Ok(transport)
    })
}

/// 向新用户发送包含临时密码的欢迎邮件
pub async fn send_temporary_password(
    to_email: &str,
    username: &str,
    temporary_password: &str,
) -> Result<()> {
    let config = AppConfig::get();
    if !config.smtp.enabled {
        return Err(EduAdminError::MailDelivery(
            "SMTP is disabled in configuration".to_string(),
        ));
    }

    let from: Mailbox = config
        .smtp
        .from
        .parse()
        .map_err(|e| EduAdminError::MailDelivery(format!("Invalid from address: {e}")))?;
    let to: Mailbox = to_email
        .parse()
        .map_err(|e| EduAdminError::MailDelivery(format!("Invalid recipient address: {e}")))?;

    let body = format!(
        "Hello {username},\n\n\
         An account has been created for you in {system}.\n\n\
         Username: {username}\n\
         Temporary password: {temporary_password}\n\n\
         Please log in and change your password as soon as possible.\n",
        system = config.app.system_name,
    );

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(format!("Your {} account", config.app.system_name))
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .map_err(|e| EduAdminError::MailDelivery(format!("Failed to build message: {e}")))?;

    let transport = get_transport()?;
    transport.send(message).await.map_err(|e| {
        error!("Failed to send mail to {}: {}", to_email, e);
        EduAdminError::MailDelivery(e.to_string())
    })?;

    debug!("Temporary password mail sent to {}", to_email);
    Ok(())
}
