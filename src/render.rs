//! HTML rendering of a canonical document through a theme template.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use tera::{Context, Tera};

use crate::error::Result;
use crate::model::Meta;
use crate::theme::Theme;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render the document through the theme's template.
pub fn render_html(doc: &serde_yaml::Value, theme: &Theme) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template("theme.html", &theme.template)?;

    let mut context = Context::from_serialize(doc)?;
    // Themes rely on `meta` existing even when the document omits it.
    if !context.contains_key("meta") {
        context.insert("meta", &Meta::default());
    }
    Ok(tera.render("theme.html", &context)?)
}

/// PDF document metadata, injected into the rendered HTML head so the
/// external renderer picks it up.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub keywords: Vec<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

impl Metadata {
    /// Fill unset fields with sensible defaults: title from the output
    /// filename, author from `basics.name`, created from the existing output
    /// file's timestamp (or today), modified from today.
    pub fn auto_fill(&mut self, doc: &serde_yaml::Value, output: &Path) {
        let today = Local::now().format(DATE_FORMAT).to_string();
        if self.title.is_none() {
            self.title = Some(output.display().to_string());
        }
        if self.author.is_none() {
            self.author = doc
                .get("basics")
                .and_then(|b| b.get("name"))
                .and_then(serde_yaml::Value::as_str)
                .map(str::to_string);
        }
        if self.keywords.is_empty() {
            self.keywords = vec!["resume".to_string()];
        }
        if self.created.is_none() {
            self.created = Some(file_date(output).unwrap_or_else(|| today.clone()));
        }
        if self.modified.is_none() {
            self.modified = Some(today);
        }
    }

    /// Insert the metadata tags right after the document's `<head>`, or at
    /// the very top when the template has no head element.
    pub fn inject(&self, html: &str) -> String {
        let tags = self.head_tags();
        if tags.is_empty() {
            return html.to_string();
        }
        match head_insertion_point(html) {
            Some(at) => format!("{}\n{}{}", &html[..at], tags, &html[at..]),
            None => format!("{tags}{html}"),
        }
    }

    fn head_tags(&self) -> String {
        let mut tags = String::new();
        if let Some(title) = &self.title {
            tags.push_str(&format!("<title>{}</title>\n", tera::escape_html(title)));
        }
        if let Some(author) = &self.author {
            tags.push_str(&format!(
                "<meta name=\"author\" content=\"{}\">\n",
                tera::escape_html(author)
            ));
        }
        if !self.keywords.is_empty() {
            tags.push_str(&format!(
                "<meta name=\"keywords\" content=\"{}\">\n",
                tera::escape_html(&self.keywords.join(", "))
            ));
        }
        if let Some(created) = &self.created {
            tags.push_str(&format!(
                "<meta name=\"dcterms.created\" content=\"{}\">\n",
                tera::escape_html(created)
            ));
        }
        if let Some(modified) = &self.modified {
            tags.push_str(&format!(
                "<meta name=\"dcterms.modified\" content=\"{}\">\n",
                tera::escape_html(modified)
            ));
        }
        tags
    }
}

/// Byte offset just past the `<head...>` opening tag, if any. The tag name
/// must end at a boundary so `<header>` in a head-less template does not
/// match.
fn head_insertion_point(html: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(found) = html[from..].find("<head") {
        let start = from + found;
        let rest = &html[start + "<head".len()..];
        if rest
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c == '/' || c.is_ascii_whitespace())
        {
            let close = rest.find('>')?;
            return Some(start + "<head".len() + close + 1);
        }
        from = start + "<head".len();
    }
    None
}

fn file_date(path: &Path) -> Option<String> {
    let meta = fs::metadata(path).ok()?;
    let stamp = meta.created().or_else(|_| meta.modified()).ok()?;
    Some(DateTime::<Local>::from(stamp).format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc(text: &str) -> serde_yaml::Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn renders_the_builtin_theme() {
        let theme = Theme::resolve(crate::theme::BUILTIN_THEME).unwrap();
        let html = render_html(
            &doc(
                "\
basics:
  name: Darth Vader
  email: vader@empire.example
work:
  - name: Empire
    position: Dark Lord
    startDate: 2016-08-01
    highlights: [Built the Death Star]
",
            ),
            &theme,
        )
        .unwrap();
        assert!(html.contains("Darth Vader"));
        assert!(html.contains("Empire"));
        assert!(html.contains("Built the Death Star"));
    }

    #[test]
    fn rendering_escapes_html_in_values() {
        let theme = Theme::resolve(crate::theme::BUILTIN_THEME).unwrap();
        let html = render_html(&doc("basics:\n  name: <b>Vader</b>\n"), &theme).unwrap();
        assert!(!html.contains("<b>Vader</b>"));
        assert!(html.contains("&lt;b&gt;Vader&lt;&#x2F;b&gt;"));
    }

    #[test]
    fn metadata_lands_inside_the_head() {
        let meta = Metadata {
            title: Some("my resume".to_string()),
            author: Some("Darth Vader".to_string()),
            keywords: vec!["resume".to_string(), "sith".to_string()],
            created: Some("2016-08-01".to_string()),
            modified: None,
        };
        let html = meta.inject("<html><head>\n<meta charset=\"utf-8\">\n</head></html>");
        let head_end = html.find("</head>").unwrap();
        let head = &html[..head_end];
        assert!(head.contains("<title>my resume</title>"));
        assert!(head.contains("<meta name=\"author\" content=\"Darth Vader\">"));
        assert!(head.contains("content=\"resume, sith\""));
        assert!(head.contains("dcterms.created"));
        assert!(!html.contains("dcterms.modified"));
    }

    #[test]
    fn metadata_values_are_escaped() {
        let meta = Metadata {
            title: Some("a \"b\" <c>".to_string()),
            ..Metadata::default()
        };
        let html = meta.inject("<head></head>");
        assert!(html.contains("a &quot;b&quot; &lt;c&gt;"));
    }

    #[test]
    fn header_element_is_not_mistaken_for_head() {
        let meta = Metadata {
            title: Some("my resume".to_string()),
            ..Metadata::default()
        };
        let html = meta.inject("<html><body><header><h1>Vader</h1></header></body></html>");
        // No head element, so the tags go before everything else.
        assert!(html.starts_with("<title>my resume</title>"));
        assert!(html.contains("<header><h1>Vader</h1></header>"));
    }

    #[test]
    fn head_with_attributes_still_matches() {
        let meta = Metadata {
            title: Some("my resume".to_string()),
            ..Metadata::default()
        };
        let html = meta.inject("<html><head lang=\"en\"></head><body><header></header></body></html>");
        let head_end = html.find("</head>").unwrap();
        assert!(html[..head_end].contains("<title>my resume</title>"));
    }

    #[test]
    fn empty_metadata_leaves_the_html_alone() {
        let html = "<html><body></body></html>";
        assert_eq!(Metadata::default().inject(html), html);
    }

    #[test]
    fn auto_fill_defaults_from_the_document() {
        let mut meta = Metadata::default();
        meta.auto_fill(
            &doc("basics:\n  name: Darth Vader\n"),
            &PathBuf::from("out.pdf"),
        );
        assert_eq!(meta.title.as_deref(), Some("out.pdf"));
        assert_eq!(meta.author.as_deref(), Some("Darth Vader"));
        assert_eq!(meta.keywords, ["resume"]);
        assert!(meta.created.is_some());
        assert!(meta.modified.is_some());
    }

    #[test]
    fn auto_fill_keeps_explicit_values() {
        let mut meta = Metadata {
            title: Some("custom".to_string()),
            keywords: vec!["jedi".to_string()],
            ..Metadata::default()
        };
        meta.auto_fill(&doc("basics:\n  name: Luke\n"), &PathBuf::from("out.pdf"));
        assert_eq!(meta.title.as_deref(), Some("custom"));
        assert_eq!(meta.keywords, ["jedi"]);
        assert_eq!(meta.author.as_deref(), Some("Luke"));
    }
}
