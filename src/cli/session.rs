//! Session, token, and theme command handlers.

use anyhow::{bail, Result};

use pathfinder::session::Theme;
use pathfinder::utils::format::format_date;

use super::{App, SessionSubcommand};

pub(crate) fn cmd_session(app: &App, action: SessionSubcommand) -> Result<()> {
    match action {
        SessionSubcommand::Show => {
            match app.session.user() {
                Some(user) => {
                    println!("User:    {} ({})", user.name, user.id);
                    if let Some(email) = &user.email {
                        println!("Email:   {email}");
                    }
                    println!("Since:   {}", format_date(user.created_at));
                }
                None => println!("No session stored."),
            }
            println!(
                "Token:   {}",
                if app.session.token().is_some() {
                    "present"
                } else {
                    "absent"
                }
            );
            println!("Theme:   {}", app.session.theme().as_str());
        }
        SessionSubcommand::Login { token } => {
            app.session.set_token(&token);
            println!("Token stored.");
        }
        SessionSubcommand::Logout => {
            app.session.clear_user();
            app.session.clear_token();
            println!("Session and token removed.");
        }
        SessionSubcommand::Theme { theme } => {
            let next = match theme.as_str() {
                "toggle" => app.session.theme().toggled(),
                other => match other.parse::<Theme>() {
                    Ok(theme) => theme,
                    Err(e) => bail!(e),
                },
            };
            app.session.set_theme(next);
            println!("Switched to {} mode.", next.as_str());
        }
    }
    Ok(())
}
