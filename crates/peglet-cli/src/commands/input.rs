//! Loading grammar and input text from files, stdin or inline flags.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Text read from one of the supported sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub text: String,
    /// Display name for diagnostics; `None` for inline text.
    pub name: Option<String>,
}

pub fn load_grammar(path: Option<&Path>, text: Option<&str>) -> Result<Loaded, String> {
    let loaded = load(path, text)
        .ok_or("grammar is required: use positional argument or -g/--grammar")??;
    if loaded.text.trim().is_empty() {
        return Err("grammar cannot be empty".to_string());
    }
    Ok(loaded)
}

pub fn load_input(path: Option<&Path>, text: Option<&str>) -> Result<Loaded, String> {
    load(path, text).ok_or("input is required: use positional argument or -i/--input")?
}

/// `None` when neither a path nor inline text was given.
fn load(path: Option<&Path>, text: Option<&str>) -> Option<Result<Loaded, String>> {
    if let Some(text) = text {
        return Some(Ok(Loaded {
            text: text.to_owned(),
            name: None,
        }));
    }

    let path = path?;
    if path.as_os_str() == "-" {
        return Some(load_stdin());
    }
    Some(load_file(path))
}

fn load_stdin() -> Result<Loaded, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(Loaded {
        text: buf,
        name: Some("<stdin>".to_string()),
    })
}

fn load_file(path: &Path) -> Result<Loaded, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    Ok(Loaded {
        text,
        name: Some(path.to_string_lossy().into_owned()),
    })
}
