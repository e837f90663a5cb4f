//! Web search links: `!google` and `!wiki`.

use slbot_proto::query_url;
use tracing::debug;

use super::{Context, Handler, HandlerResult};

/// Byte budget for the encoded query.
pub const SEARCH_BUDGET: usize = 256;

pub const GOOGLE_TEMPLATE: &str = "https://www.google.com/search?q=";
pub const WIKI_TEMPLATE: &str = "https://en.wikipedia.org/w/index.php?search=";

/// Sent instead of a link when the query does not fit.
pub const TOO_LONG: &str = "search too long for IRC, search it yourself";

/// Handler answering with a search link built from a URL template.
pub struct SearchHandler {
    template: &'static str,
}

impl SearchHandler {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    pub const fn google() -> Self {
        Self::new(GOOGLE_TEMPLATE)
    }

    pub const fn wiki() -> Self {
        Self::new(WIKI_TEMPLATE)
    }
}

impl Handler for SearchHandler {
    fn handle(&self, ctx: &mut Context<'_>, argument: Option<&str>) -> HandlerResult {
        let Some(query) = argument else {
            return Ok(());
        };
        let reply = match query_url(self.template, query, SEARCH_BUDGET) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "Search query over budget");
                TOO_LONG.to_string()
            }
        };
        ctx.reply(reply);
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

    fn search(handler: &SearchHandler, argument: Option<&str>) -> Vec<Outbound> {
        let registry = Registry::empty();
        let mut rng = StdRng::seed_from_u64(0);
        let mut out = Vec::new();
        let mut ctx = Context::new("alice", "#c", &registry, &mut rng, &mut out);
        handler.handle(&mut ctx, argument).unwrap();
        out
    }

    #[test]
    fn test_google_link() {
        assert_eq!(
            search(&SearchHandler::google(), Some("a b+c")),
            vec![Outbound::privmsg(
                "#c",
                "https://www.google.com/search?q=a%20b+c"
            )]
        );
    }

    #[test]
    fn test_wiki_link() {
        assert_eq!(
            search(&SearchHandler::wiki(), Some("Ferris")),
            vec![Outbound::privmsg(
                "#c",
                "https://en.wikipedia.org/w/index.php?search=Ferris"
            )]
        );
    }

    #[test]
    fn test_no_argument_is_silent() {
        assert!(search(&SearchHandler::google(), None).is_empty());
    }

    #[test]
    fn test_empty_argument_gives_bare_template() {
        assert_eq!(
            search(&SearchHandler::google(), Some("")),
            vec![Outbound::privmsg("#c", GOOGLE_TEMPLATE)]
        );
        assert_eq!(
            search(&SearchHandler::wiki(), Some("")),
            vec![Outbound::privmsg("#c", WIKI_TEMPLATE)]
        );
    }

    #[test]
    fn test_over_budget_falls_back() {
        // Each space costs three bytes.
        let query = " ".repeat(SEARCH_BUDGET / 3 + 1);
        assert_eq!(
            search(&SearchHandler::google(), Some(&query)),
            vec![Outbound::privmsg("#c", TOO_LONG)]
        );
    }
}
