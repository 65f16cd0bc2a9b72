use crate::models::RegisterUser;
use crate::{services::auth, Config, Database};
use anyhow::Result;
use std::path::Path;

use super::UserCommand;

pub async fn run(config_path: &Path, command: UserCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path)?;

    match command {
        UserCommand::Add {
            email,
            name,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => {
                    let p = rpassword::prompt_password("Password: ")?;
                    let p_confirm = rpassword::prompt_password("Confirm password: ")?;
                    if p != p_confirm {
                        anyhow::bail!("Passwords do not match");
                    }
                    p
                }
            };

            let user = auth::register(
                &db,
                &RegisterUser {
                    email,
                    password,
                    name,
                },
            )?;
            tracing::info!("User '{}' created (slug '{}')", user.email, user.slug);
        }
        UserCommand::List => {
            let conn = db.get()?;
            let mut stmt =
                conn.prepare("SELECT email, name, slug FROM users ORDER BY created_at DESC")?;
            let users = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;

            println!("{:<30} {:<24} {:<24}", "EMAIL", "NAME", "SLUG");
            println!("{}", "-".repeat(78));
            for user in users {
                let (email, name, slug) = user?;
                println!(
                    "{:<30} {:<24} {:<24}",
                    email,
                    name.unwrap_or_default(),
                    slug
                );
            }
        }
        UserCommand::Remove { email } => {
            let conn = db.get()?;
            let affected = conn.execute("DELETE FROM users WHERE email = ?", [&email])?;
            if affected > 0 {
                tracing::info!("User '{}' removed", email);
            } else {
                tracing::warn!("User '{}' not found", email);
            }
        }
        UserCommand::Passwd { email } => {
            let password = rpassword::prompt_password("New password: ")?;
            let password_confirm = rpassword::prompt_password("Confirm password: ")?;

            if password != password_confirm {
                anyhow::bail!("Passwords do not match");
            }

            auth::update_password(&db, &email, &password)?;
            tracing::info!("Password updated for '{}'", email);
        }
    }

    Ok(())
}
