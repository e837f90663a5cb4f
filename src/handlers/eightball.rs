//! `!8ball`.

use super::{Context, Handler, HandlerResult};

/// The twenty classic answers.
pub const ANSWERS: [&str; 20] = [
    "It is certain.",
    "It is decidedly so.",
    "Without a doubt.",
    "Yes - definitely.",
    "You may rely on it.",
    "As I see it, yes.",
    "Most likely.",
    "Outlook good.",
    "Yes.",
    "Signs point to yes.",
    "Reply hazy, try again.",
    "Ask again later.",
    "Better not tell you now.",
    "Cannot predict now.",
    "Concentrate and ask again.",
    "Don't count on it.",
    "My reply is no.",
    "My sources say no.",
    "Outlook not so good.",
    "Very doubtful.",
];

/// Handler for `!8ball [question]`. The question is not read.
pub struct EightBallHandler;

impl Handler for EightBallHandler {
    fn handle(&self, ctx: &mut Context<'_>, _argument: Option<&str>) -> HandlerResult {
        if let Some(answer) = ctx.choose(&ANSWERS) {
            ctx.reply(*answer);
        }
        Ok(())
    }
}
