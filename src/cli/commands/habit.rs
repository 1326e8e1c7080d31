//! Habit command implementation.

use colored::Colorize;

use super::Context;
use crate::cli::args::{HabitCommands, OutputFormat};
use crate::error::HabitsError;
use crate::model::HabitUpdate;
use crate::output::{format_habit, format_habits, to_json};
use crate::storage::HabitStore;

/// Execute habit subcommands for the current user.
///
/// # Errors
///
/// Returns an error if no user is selected, the habit is not found, or the
/// store rejects the operation.
pub fn habit(ctx: &Context, cmd: HabitCommands) -> Result<String, HabitsError> {
    let owner = ctx.current_user()?;
    let store = HabitStore::new(&ctx.db);

    match cmd {
        HabitCommands::Add { title, description } => {
            let habit = store.create(owner.id, &title, description.as_deref())?;
            match ctx.format {
                OutputFormat::Json => to_json(&habit),
                OutputFormat::Pretty => Ok(format!(
                    "{} Created habit {} (ID {})",
                    "✓".green(),
                    habit.title.bold(),
                    habit.id
                )),
            }
        }
        HabitCommands::List => {
            let habits = store.list_for_owner(owner.id)?;
            format_habits(&habits, ctx.format)
        }
        HabitCommands::Show { id } => {
            let habit = store.get_owned(id, owner.id)?;
            format_habit(&habit, ctx.format)
        }
        HabitCommands::Edit {
            id,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                return Err(HabitsError::InvalidInput(
                    "nothing to change; pass --title and/or --description".to_string(),
                ));
            }
            let habit = store.update(id, owner.id, HabitUpdate { title, description })?;
            format_habit(&habit, ctx.format)
        }
        HabitCommands::Delete { id } => {
            let habit = store.delete(id, owner.id)?;
            match ctx.format {
                OutputFormat::Json => to_json(&habit),
                OutputFormat::Pretty => Ok(format!(
                    "{} Deleted habit {}",
                    "✓".green(),
                    habit.title.bold()
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::context;
    use crate::storage::UserStore;

    fn add(ctx: &Context, title: &str) -> i64 {
        let output = habit(
            ctx,
            HabitCommands::Add {
                title: title.to_string(),
                description: None,
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        value["id"].as_i64().unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let (ctx, _dir) = context(OutputFormat::Json);
        add(&ctx, "Read");
        add(&ctx, "Run");

        let output = habit(&ctx, HabitCommands::List).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["items"][1]["title"], "Run");
    }

    #[test]
    fn test_other_users_habits_are_hidden() {
        let (mut ctx, _dir) = context(OutputFormat::Json);
        let id = add(&ctx, "Read");

        UserStore::new(&ctx.db).register("grace", "grace@example.com").unwrap();
        ctx.user_override = Some("grace".to_string());

        let err = habit(&ctx, HabitCommands::Show { id }).unwrap_err();
        assert_eq!(err.to_string(), "Habit not found");

        let output = habit(&ctx, HabitCommands::List).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 0);
    }

    #[test]
    fn test_edit_requires_a_change() {
        let (ctx, _dir) = context(OutputFormat::Json);
        let id = add(&ctx, "Read");

        let err = habit(
            &ctx,
            HabitCommands::Edit {
                id,
                title: None,
                description: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, HabitsError::InvalidInput(_)));

        let output = habit(
            &ctx,
            HabitCommands::Edit {
                id,
                title: Some("Read books".to_string()),
                description: None,
            },
        )
        .unwrap();
        assert!(output.contains("Read books"));
    }

    #[test]
    fn test_delete() {
        let (ctx, _dir) = context(OutputFormat::Pretty);
        let id = {
            let owner = ctx.current_user().unwrap();
            HabitStore::new(&ctx.db).create(owner.id, "Read", None).unwrap().id
        };

        let output = habit(&ctx, HabitCommands::Delete { id }).unwrap();
        assert!(output.contains("Deleted habit"));
        assert!(habit(&ctx, HabitCommands::Show { id }).is_err());
    }
}
