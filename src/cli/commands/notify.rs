use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notify::{NotifyLogic, TemplateContext};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::formatting::{bold, truncate};
use crate::utils::table::Table;

/// Handles both `notify` (send) and `notifications` (inbox).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Notify {
            to,
            template,
            room,
            at,
            title,
            message,
            kind,
        } => {
            let mut pool = DbPool::new(&cfg.database)?;
            let ctx = TemplateContext {
                classroom: room.clone(),
                at: at.clone(),
            };
            let draft = NotifyLogic::draft(
                &pool,
                to,
                *template,
                &ctx,
                title.as_deref(),
                message.as_deref(),
                *kind,
            )?;
            let sent = NotifyLogic::send(&mut pool, to, draft)?;
            success(format!("Notification '{}' sent to {}", sent.title, to));
        }

        Commands::Notifications { user, mark_read } => {
            let user_id = user.as_deref().unwrap_or(&cfg.teacher_id);
            let mut pool = DbPool::new(&cfg.database)?;
            let notes = NotifyLogic::list(&mut pool, user_id, *mark_read)?;

            if notes.is_empty() {
                info(format!("No notifications for {}.", user_id));
                return Ok(());
            }

            let mut table = Table::new(["", "Type", "Title", "Message", "Sent"]);
            for n in &notes {
                let title = if n.read {
                    format!("{GREY}{}{RESET}", n.title)
                } else {
                    bold(&n.title)
                };
                table.add_row(vec![
                    if n.read { " ".into() } else { "●".into() },
                    n.kind.to_db_str().to_string(),
                    title,
                    truncate(&n.message, 60),
                    n.created_at.chars().take(16).collect::<String>().replace('T', " "),
                ]);
            }
            table.print();

            if *mark_read {
                info("All notifications marked as read.");
            }
        }

        _ => {}
    }

    Ok(())
}
