//! `!smack`.

use super::{Context, Handler, HandlerResult};

/// Highest damage roll; rolling it is a critical hit.
pub const MAX_DAMAGE: u32 = 20;

/// Appended to the action on a critical hit.
pub const CRITICAL_SUFFIX: &str = " (SUPER EFFECTIVE)";

/// Handler for `!smack [person]`. Smacks the invoker when no one is named.
pub struct SmackHandler;

impl Handler for SmackHandler {
    fn handle(&self, ctx: &mut Context<'_>, argument: Option<&str>) -> HandlerResult {
        let target = argument.unwrap_or(ctx.nick);
        let damage = ctx.roll(1, MAX_DAMAGE);
        ctx.action(smack_text(target, damage));
        Ok(())
    }
}

/// The action text for a smack of `damage` points.
pub fn smack_text(target: &str, damage: u32) -> String {
    let suffix = if damage == MAX_DAMAGE { CRITICAL_SUFFIX } else { "" };
    format!("smacks {target} for {damage} damage{suffix}.")
}
