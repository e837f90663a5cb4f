//! Phrase modules loaded from a directory.
//!
//! Every `<name>.txt` file in the module directory becomes a `!<name>`
//! command that answers with a random line from the file. Modules are
//! loaded once at startup; a module that fails to load is logged and
//! skipped.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::registry::Registry;
use super::{Context, Handler, HandlerResult};

/// File extension marking a phrase module.
pub const MODULE_EXTENSION: &str = "txt";

/// Errors loading a single module.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("failed to read module: {0}")]
    Io(#[from] std::io::Error),
    #[error("module has no phrases")]
    Empty,
    #[error("invalid command name '{0}'")]
    InvalidName(String),
    #[error("command '{0}' already exists")]
    NameTaken(String),
}

/// Handler answering with one random phrase.
pub struct PhraseHandler {
    phrases: Vec<String>,
}

impl PhraseHandler {
    /// Build from a list of phrases; blank lines are dropped.
    pub fn new<I, S>(phrases: I) -> Result<Self, ModuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim_end_matches('\r').to_string())
            .filter(|p| !p.trim().is_empty())
            .collect();
        if phrases.is_empty() {
            return Err(ModuleError::Empty);
        }
        Ok(Self { phrases })
    }

    /// Read one phrase per line from `path`.
    pub fn from_file(path: &Path) -> Result<Self, ModuleError> {
        let raw = fs::read(path)?;
        Self::new(String::from_utf8_lossy(&raw).lines())
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl Handler for PhraseHandler {
    fn handle(&self, ctx: &mut Context<'_>, _argument: Option<&str>) -> HandlerResult {
        if let Some(phrase) = ctx.choose(&self.phrases) {
            ctx.reply(phrase.as_str());
        }
        Ok(())
    }
}

/// Command name for a module file, if it is one.
fn module_name(path: &Path) -> Option<Result<String, ModuleError>> {
    if path.extension()? != MODULE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_string_lossy().into_owned();
    let valid = !stem.is_empty() && stem.chars().all(|c| c.is_ascii_graphic());
    Some(if valid {
        Ok(stem)
    } else {
        Err(ModuleError::InvalidName(stem))
    })
}

fn load_one(registry: &mut Registry, path: &Path, name: String) -> Result<(), ModuleError> {
    if registry.get(&name).is_some() {
        return Err(ModuleError::NameTaken(name));
    }
    let handler = PhraseHandler::from_file(path)?;
    let usage = format!("USAGE: !{name}");
    if !registry.register(name.clone(), usage, Box::new(handler)) {
        return Err(ModuleError::NameTaken(name));
    }
    Ok(())
}

/// Register up to `max` phrase modules from `dir`, in file-name order.
///
/// Returns how many were loaded. A missing directory loads nothing.
pub fn load_modules(registry: &mut Registry, dir: &Path, max: usize) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            info!(dir = %dir.display(), error = %e, "No module directory, skipping modules");
            return 0;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut loaded = 0;
    for path in paths {
        let Some(name) = module_name(&path) else {
            continue;
        };
        if loaded == max {
            warn!(
                dir = %dir.display(),
                max,
                "Module limit reached, remaining modules not loaded"
            );
            break;
        }
        let result = name.and_then(|name| {
            let display = name.clone();
            load_one(registry, &path, name).map(|()| display)
        });
        match result {
            Ok(name) => {
                info!(module = %name, path = %path.display(), "Loaded module");
                loaded += 1;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping module");
            }
        }
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::PingHandler;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use slbot_proto::Outbound;

    fn write(dir: &Path, file: &str, contents: &str) {
        fs::write(dir.join(file), contents).unwrap();
    }

    #[test]
    fn test_phrase_handler_rejects_blank() {
        assert!(matches!(
            PhraseHandler::new(["", "  ", "\r"]),
            Err(ModuleError::Empty)
        ));
        assert_eq!(PhraseHandler::new(["a\r", "", "b"]).unwrap().len(), 2);
    }

    #[test]
    fn test_loads_txt_modules_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "quote.txt", "stay hungry\nstay foolish\n");
        write(dir.path(), "cat.txt", "meow\n");
        write(dir.path(), "notes.md", "not a module\n");

        let mut registry = Registry::empty();
        assert_eq!(load_modules(&mut registry, dir.path(), 16), 2);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["cat", "quote"]);
        assert_eq!(registry.usage("cat"), Some("USAGE: !cat"));
    }

    #[test]
    fn test_limit_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "one\n");
        write(dir.path(), "b.txt", "\n\n");
        write(dir.path(), "ping.txt", "shadowed\n");
        write(dir.path(), "c.txt", "three\n");
        write(dir.path(), "d.txt", "four\n");

        let mut registry = Registry::empty();
        registry.register("ping", "USAGE: !ping", Box::new(PingHandler));
        assert_eq!(load_modules(&mut registry, dir.path(), 16), 3);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["ping", "a", "c", "d"]);
        assert_eq!(registry.usage("ping"), Some("USAGE: !ping"));

        // Skipped modules do not count toward the limit.
        let mut registry = Registry::empty();
        assert_eq!(load_modules(&mut registry, dir.path(), 2), 2);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_missing_dir_loads_nothing() {
        let mut registry = Registry::empty();
        assert_eq!(
            load_modules(&mut registry, Path::new("/nonexistent/slbot"), 16),
            0
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_module_replies_with_phrase() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "cat.txt", "meow\n");
        let mut registry = Registry::empty();
        load_modules(&mut registry, dir.path(), 1);

        let mut rng = StdRng::seed_from_u64(0);
        let mut out = Vec::new();
        let mut ctx = Context::new("alice", "#c", &registry, &mut rng, &mut out);
        registry.dispatch(&mut ctx, "!cat").unwrap();
        assert_eq!(out, vec![Outbound::privmsg("#c", "meow")]);
    }
}
