//! `!help`.

use super::{Context, Handler, HandlerResult, TRIGGER};

/// Byte budget for the command catalog reply.
pub const HELP_BUDGET: usize = 256;

/// Handler for `!help [command]`.
///
/// Without an argument, lists the catalog. With one, shows that command's
/// usage line.
pub struct HelpHandler;

impl Handler for HelpHandler {
    fn handle(&self, ctx: &mut Context<'_>, argument: Option<&str>) -> HandlerResult {
        let reply = match argument {
            Some(name) => {
                let bare = name.trim_start_matches(TRIGGER);
                match ctx.registry.usage(bare) {
                    Some(usage) => usage.to_string(),
                    None => format!("{TRIGGER}{bare} is not a command"),
                }
            }
            None => catalog(ctx.registry.names(), HELP_BUDGET),
        };
        ctx.reply(reply);
        Ok(())
    }
}

/// `Commands: !a !b ...`, stopping before the entry that would push the
/// reply past `budget` bytes.
pub fn catalog<'a>(names: impl IntoIterator<Item = &'a str>, budget: usize) -> String {
    let mut out = String::with_capacity(budget);
    out.push_str("Commands:");
    for name in names {
        // " !" + name
        if out.len() + 2 + name.len() > budget {
            break;
        }
        out.push(' ');
        out.push(TRIGGER);
        out.push_str(name);
    }
    out
}
