//! `!insult`, backed by a plain-text file with one insult per line.
//!
//! The file is read on every call so edits take effect without a restart.
//! Reads are capped at [`INSULT_FILE_MAX`] bytes.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use slbot_proto::util::truncate_bytes;

use super::{Context, Handler, HandlerError, HandlerResult};

/// Longest insult sent, in bytes.
pub const INSULT_MAX: usize = 255;

/// Upper bound on bytes read from the insult file.
pub const INSULT_FILE_MAX: u64 = 64 * 1024;

/// Handler for `!insult [person]`.
pub struct InsultHandler {
    path: PathBuf,
}

impl InsultHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<String, HandlerError> {
        let unavailable = |source| HandlerError::ResourceUnavailable {
            path: self.path.display().to_string(),
            source,
        };
        let file = File::open(&self.path).map_err(unavailable)?;
        let mut raw = Vec::new();
        file.take(INSULT_FILE_MAX)
            .read_to_end(&mut raw)
            .map_err(unavailable)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

impl Handler for InsultHandler {
    fn handle(&self, ctx: &mut Context<'_>, argument: Option<&str>) -> HandlerResult {
        let contents = self.read()?;
        let lines = line_count(&contents);
        if lines == 0 {
            return Err(HandlerError::EmptyResource(self.path.display().to_string()));
        }

        let index = ctx.index(lines);
        let insult = truncate_bytes(nth_line(&contents, index), INSULT_MAX);
        match argument {
            Some(target) => ctx.reply(format!("{target}: {insult}")),
            None => ctx.reply(insult),
        }
        Ok(())
    }
}

/// Number of newline-terminated lines.
fn line_count(contents: &str) -> usize {
    contents.bytes().filter(|&b| b == b'\n').count()
}

/// Line `index` without its terminator.
fn nth_line(contents: &str, index: usize) -> &str {
    let line = contents.split('\n').nth(index).unwrap_or("");
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Registry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use slbot_proto::Outbound;
    use std::io::Write;

    fn insult(handler: &InsultHandler, argument: Option<&str>) -> (HandlerResult, Vec<Outbound>) {
        let registry = Registry::empty();
        let mut rng = StdRng::seed_from_u64(5);
        let mut out = Vec::new();
        let mut ctx = Context::new("alice", "#c", &registry, &mut rng, &mut out);
        let result = handler.handle(&mut ctx, argument);
        (result, out)
    }

    #[test]
    fn test_line_helpers() {
        assert_eq!(line_count("a\nb\n"), 2);
        assert_eq!(line_count("a\nb"), 1);
        assert_eq!(line_count(""), 0);
        assert_eq!(nth_line("a\r\nb\n", 0), "a");
        assert_eq!(nth_line("a\r\nb\n", 1), "b");
    }

    #[test]
    fn test_single_line_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "you code like a crab").unwrap();
        let handler = InsultHandler::new(file.path());

        let (result, out) = insult(&handler, None);
        assert!(result.is_ok());
        assert_eq!(out, vec![Outbound::privmsg("#c", "you code like a crab")]);

        let (_, out) = insult(&handler, Some("bob"));
        assert_eq!(
            out,
            vec![Outbound::privmsg("#c", "bob: you code like a crab")]
        );
    }

    #[test]
    fn test_empty_target_keeps_prefix() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "you code like a crab").unwrap();
        let handler = InsultHandler::new(file.path());

        let (_, out) = insult(&handler, Some(""));
        assert_eq!(out, vec![Outbound::privmsg("#c", ": you code like a crab")]);
    }

    #[test]
    fn test_picks_from_counted_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "one\r\ntwo\r\nthree").unwrap();
        let handler = InsultHandler::new(file.path());
        for _ in 0..50 {
            let (_, out) = insult(&handler, None);
            let Some(Outbound::Privmsg { text, .. }) = out.first() else {
                panic!("expected a reply");
            };
            assert!(text == "one" || text == "two", "{text}");
        }
    }

    #[test]
    fn test_missing_file_is_silent_error() {
        let handler = InsultHandler::new("/nonexistent/insults.txt");
        let (result, out) = insult(&handler, None);
        assert!(matches!(
            result,
            Err(HandlerError::ResourceUnavailable { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_file_is_silent_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let handler = InsultHandler::new(file.path());
        let (result, out) = insult(&handler, Some("bob"));
        assert!(matches!(result, Err(HandlerError::EmptyResource(_))));
        assert!(out.is_empty());
    }
}
