//! User command implementation.

use colored::Colorize;
use tracing::info;

use super::Context;
use crate::cli::args::{OutputFormat, UserCommands};
use crate::error::HabitsError;
use crate::model::UserUpdate;
use crate::output::{format_user, format_users, to_json};
use crate::storage::UserStore;

/// Execute user subcommands.
///
/// # Errors
///
/// Returns an error if the store rejects the operation or the config cannot
/// be saved.
pub fn user(ctx: &mut Context, cmd: UserCommands) -> Result<String, HabitsError> {
    match cmd {
        UserCommands::Register { username, email } => register(ctx, &username, &email),
        UserCommands::List => {
            let users = UserStore::new(&ctx.db).list()?;
            format_users(&users, ctx.format)
        }
        UserCommands::Show { target } => {
            let user = match target {
                Some(key) => UserStore::new(&ctx.db).resolve(&key)?,
                None => ctx.current_user()?,
            };
            format_user(&user, ctx.format)
        }
        UserCommands::Update {
            target,
            username,
            email,
        } => {
            let store = UserStore::new(&ctx.db);
            let target = store.resolve(&target)?;
            let updated = store.update(target.id, UserUpdate { username, email })?;

            // Keep the config pointing at the same person after a rename
            if ctx.config.user.current.as_deref() == Some(target.username.as_str())
                && updated.username != target.username
            {
                ctx.config.user.current = Some(updated.username.clone());
                ctx.save_config()?;
            }

            format_user(&updated, ctx.format)
        }
        UserCommands::Delete { target } => {
            let store = UserStore::new(&ctx.db);
            let target = store.resolve(&target)?;
            let deleted = store.delete(target.id)?;

            if ctx.config.user.current.as_deref() == Some(deleted.username.as_str()) {
                ctx.config.user.current = None;
                ctx.save_config()?;
            }

            match ctx.format {
                OutputFormat::Json => to_json(&deleted),
                OutputFormat::Pretty => Ok(format!(
                    "{} Deleted user {} and all of their habits",
                    "✓".green(),
                    deleted.username.bold()
                )),
            }
        }
        UserCommands::Use { target } => {
            let target = UserStore::new(&ctx.db).resolve(&target)?;
            ctx.config.user.current = Some(target.username.clone());
            ctx.save_config()?;
            info!(username = %target.username, "switched current user");

            match ctx.format {
                OutputFormat::Json => to_json(&target),
                OutputFormat::Pretty => Ok(format!(
                    "{} Now acting as {}",
                    "✓".green(),
                    target.username.bold()
                )),
            }
        }
    }
}

fn register(ctx: &mut Context, username: &str, email: &str) -> Result<String, HabitsError> {
    let user = UserStore::new(&ctx.db).register(username, email)?;

    // The first user becomes "me" automatically
    let became_current = ctx.config.user.current.is_none();
    if became_current {
        ctx.config.user.current = Some(user.username.clone());
        ctx.save_config()?;
    }

    match ctx.format {
        OutputFormat::Json => to_json(&user),
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} Registered {} (ID {})",
                "✓".green(),
                user.username.bold(),
                user.id
            );
            if became_current {
                output.push_str(&format!("\n  {}", "Set as current user".dimmed()));
            }
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::context;
    use crate::config::Config;

    #[test]
    fn test_register_conflict() {
        let (mut ctx, _dir) = context(OutputFormat::Json);
        let err = user(
            &mut ctx,
            UserCommands::Register {
                username: "ada".to_string(),
                email: "new@example.com".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Username already registered");
    }

    #[test]
    fn test_register_first_user_becomes_current() {
        let (mut ctx, _dir) = context(OutputFormat::Pretty);
        ctx.config.user.current = None;

        let output = user(
            &mut ctx,
            UserCommands::Register {
                username: "grace".to_string(),
                email: "grace@example.com".to_string(),
            },
        )
        .unwrap();

        assert!(output.contains("grace"));
        assert_eq!(ctx.config.user.current.as_deref(), Some("grace"));
        let saved = Config::load_from_path(&ctx.config_path).unwrap();
        assert_eq!(saved.user.current.as_deref(), Some("grace"));
    }

    #[test]
    fn test_use_switches_and_persists() {
        let (mut ctx, _dir) = context(OutputFormat::Pretty);
        UserStore::new(&ctx.db).register("grace", "grace@example.com").unwrap();

        user(&mut ctx, UserCommands::Use { target: "grace".to_string() }).unwrap();

        assert_eq!(ctx.current_user().unwrap().username, "grace");
        let saved = Config::load_from_path(&ctx.config_path).unwrap();
        assert_eq!(saved.user.current.as_deref(), Some("grace"));
    }

    #[test]
    fn test_rename_current_user_follows_config() {
        let (mut ctx, _dir) = context(OutputFormat::Json);
        user(
            &mut ctx,
            UserCommands::Update {
                target: "ada".to_string(),
                username: Some("lovelace".to_string()),
                email: None,
            },
        )
        .unwrap();

        assert_eq!(ctx.config.user.current.as_deref(), Some("lovelace"));
        assert_eq!(ctx.current_user().unwrap().username, "lovelace");
    }

    #[test]
    fn test_delete_current_user_clears_config() {
        let (mut ctx, _dir) = context(OutputFormat::Json);
        user(&mut ctx, UserCommands::Delete { target: "ada".to_string() }).unwrap();

        assert!(ctx.config.user.current.is_none());
        assert!(matches!(ctx.current_user(), Err(HabitsError::NoIdentity)));
    }

    #[test]
    fn test_list_json() {
        let (mut ctx, _dir) = context(OutputFormat::Json);
        let output = user(&mut ctx, UserCommands::List).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["username"], "ada");
    }
}
