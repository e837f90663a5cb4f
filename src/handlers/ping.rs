//! `!ping`.

use super::{Context, Handler, HandlerResult};

/// Handler for `!ping`: always answers `pong`.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, _argument: Option<&str>) -> HandlerResult {
        ctx.reply("pong");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Registry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use slbot_proto::Outbound;

    #[test]
    fn test_pong_ignores_argument() {
        let registry = Registry::empty();
        let mut rng = StdRng::seed_from_u64(0);
        let mut out = Vec::new();
        let mut ctx = Context::new("alice", "#c", &registry, &mut rng, &mut out);
        PingHandler.handle(&mut ctx, None).unwrap();
        PingHandler.handle(&mut ctx, Some("anything")).unwrap();
        assert_eq!(out, vec![Outbound::privmsg("#c", "pong"); 2]);
    }
}
