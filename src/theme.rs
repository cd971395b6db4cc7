//! Theme resolution and scaffolding.
//!
//! A theme is a directory with a `theme.html` template plus any number of
//! `.css` files, all of which are handed to the PDF renderer. One theme is
//! embedded in the binary and doubles as the scaffolding starting point.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};

pub const BUILTIN_THEME: &str = "prairie";

const BUILTIN_TEMPLATE: &str = include_str!("../themes/prairie/theme.html");
const BUILTIN_STYLESHEET: &str = include_str!("../themes/prairie/prairie.css");

pub struct Theme {
    pub template: String,
    pub stylesheets: Vec<PathBuf>,
    // Keeps a materialized built-in theme alive for the render's duration.
    _scratch: Option<TempDir>,
}

impl Theme {
    /// Resolve a theme argument: an existing directory wins, otherwise the
    /// built-in theme name is accepted.
    pub fn resolve(arg: &str) -> Result<Theme> {
        let dir = Path::new(arg);
        if dir.is_dir() {
            return Self::load(dir);
        }
        if arg == BUILTIN_THEME {
            let scratch = tempfile::tempdir()?;
            write_builtin(scratch.path())?;
            let mut theme = Self::load(scratch.path())?;
            theme._scratch = Some(scratch);
            return Ok(theme);
        }
        Err(Error::UnknownTheme(arg.to_string()))
    }

    /// Load a theme directory, collecting every `.css` file it contains.
    pub fn load(dir: &Path) -> Result<Theme> {
        let template_path = dir.join("theme.html");
        let template = fs::read_to_string(&template_path).map_err(|source| Error::ReadFile {
            path: template_path,
            source,
        })?;

        let mut stylesheets = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "css") {
                stylesheets.push(path);
            }
        }
        stylesheets.sort();

        Ok(Theme {
            template,
            stylesheets,
            _scratch: None,
        })
    }
}

/// Copy the built-in theme into a fresh directory, as a starting point for a
/// custom one. Refuses to overwrite an existing directory.
pub fn scaffold(output: &Path) -> Result<()> {
    fs::create_dir(output).map_err(|source| Error::WriteFile {
        path: output.to_path_buf(),
        source,
    })?;
    write_builtin(output)
}

fn write_builtin(dir: &Path) -> Result<()> {
    for (name, content) in [
        ("theme.html", BUILTIN_TEMPLATE),
        ("prairie.css", BUILTIN_STYLESHEET),
    ] {
        let path = dir.join(name);
        fs::write(&path, content).map_err(|source| Error::WriteFile { path, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_theme_resolves() {
        let theme = Theme::resolve(BUILTIN_THEME).unwrap();
        assert!(theme.template.contains("basics.name"));
        assert_eq!(theme.stylesheets.len(), 1);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(matches!(
            Theme::resolve("no-such-theme"),
            Err(Error::UnknownTheme(_))
        ));
    }

    #[test]
    fn loads_a_theme_directory_and_collects_css() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("theme.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("b.css"), "body {}").unwrap();
        fs::write(dir.path().join("a.css"), "h1 {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let theme = Theme::load(dir.path()).unwrap();
        let names: Vec<_> = theme
            .stylesheets
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.css", "b.css"]);
    }

    #[test]
    fn scaffold_refuses_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("mytheme");
        scaffold(&out).unwrap();
        assert!(out.join("theme.html").is_file());
        assert!(matches!(scaffold(&out), Err(Error::WriteFile { .. })));
    }
}
