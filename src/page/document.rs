//! In-memory page document.
//!
//! The page is a fixed shell (header, language switcher, footer) around one
//! markup container per dataset section. Renders replace container content
//! wholesale; chrome elements keep their default markup so every language
//! switch starts from the same source text.

use crate::dataset::SECTIONS;
use crate::i18n::{Direction, Language};
use crate::page::markup::escape_html;

/// Container below the sections holding page metadata (last update, author).
pub const PAGE_META_CONTAINER: &str = "page-meta";

/// Element of the page shell tagged with a translation key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeElement {
    pub id: String,
    /// Dot-path into the common dictionary (`data-i18n`)
    pub key: String,
    /// Markup shipped with the page, in the default language
    pub default_markup: String,
    /// Markup currently displayed
    pub markup: String,
}

impl ChromeElement {
    pub fn new(id: &str, key: &str, default_markup: &str) -> Self {
        Self {
            id: id.to_string(),
            key: key.to_string(),
            default_markup: default_markup.to_string(),
            markup: default_markup.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Container {
    id: String,
    inner_html: String,
}

#[derive(Debug, Clone)]
pub struct Document {
    lang: String,
    dir: Direction,
    title: String,
    description: String,
    containers: Vec<Container>,
    chrome: Vec<ChromeElement>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty page with the standard shell.
    pub fn new() -> Self {
        let mut containers: Vec<Container> = SECTIONS
            .iter()
            .filter(|section| **section != "metadata")
            .map(|section| Container {
                id: section.to_string(),
                inner_html: String::new(),
            })
            .collect();
        containers.push(Container {
            id: PAGE_META_CONTAINER.to_string(),
            inner_html: String::new(),
        });

        Self {
            lang: Language::default_language().code().to_string(),
            dir: Direction::Ltr,
            title: String::new(),
            description: String::new(),
            containers,
            chrome: default_chrome(),
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_language_attributes(&mut self, language: Language) {
        self.lang = language.code().to_string();
        self.dir = language.direction();
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    /// Replace the inner markup of container `id`, adding it if unknown.
    pub fn replace_container(&mut self, id: &str, inner_html: String) {
        match self.containers.iter_mut().find(|c| c.id == id) {
            Some(container) => container.inner_html = inner_html,
            None => self.containers.push(Container {
                id: id.to_string(),
                inner_html,
            }),
        }
    }

    pub fn container(&self, id: &str) -> Option<&str> {
        self.containers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.inner_html.as_str())
    }

    pub fn chrome(&self) -> &[ChromeElement] {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut [ChromeElement] {
        &mut self.chrome
    }

    /// Current markup of the chrome element bound to `key`.
    pub fn chrome_markup(&self, key: &str) -> Option<&str> {
        self.chrome
            .iter()
            .find(|el| el.key == key)
            .map(|el| el.markup.as_str())
    }

    /// Add a chrome element to the shell.
    pub fn add_chrome(&mut self, element: ChromeElement) {
        self.chrome.push(element);
    }

    fn chrome_html(&self, id: &str) -> String {
        self.chrome
            .iter()
            .find(|el| el.id == id)
            .map(|el| {
                format!(
                    r#"<span id="{}" data-i18n="{}">{}</span>"#,
                    escape_html(&el.id),
                    escape_html(&el.key),
                    el.markup
                )
            })
            .unwrap_or_default()
    }

    fn language_switcher_html(&self) -> String {
        let mut html = String::from(r#"<nav class="language-switcher"><ul>"#);
        for language in Language::all_enabled() {
            let current = if language.code() == self.lang {
                r#" aria-current="true""#
            } else {
                ""
            };
            html.push_str(&format!(
                r#"<li><button type="button" data-lang="{}" lang="{}"{}>{}</button></li>"#,
                language.code(),
                language.code(),
                current,
                escape_html(language.native_name())
            ));
        }
        html.push_str("</ul></nav>");
        html
    }

    /// Serialise the whole page.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n");
        html.push_str(&format!(
            "<html lang=\"{}\" dir=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n",
            escape_html(&self.lang),
            self.dir.as_str()
        ));
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        if !self.description.is_empty() {
            html.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">\n",
                escape_html(&self.description)
            ));
        }
        html.push_str("</head>\n<body>\n<header class=\"site-header\">\n");
        html.push_str(&format!(
            "<nav class=\"site-nav\">{} {}</nav>\n",
            self.chrome_html("nav-home"),
            self.chrome_html("nav-about")
        ));
        html.push_str(&self.chrome_html("language-label"));
        html.push_str(&self.language_switcher_html());
        html.push_str("\n</header>\n<main>\n");

        for container in &self.containers {
            if container.inner_html.is_empty() {
                continue;
            }
            html.push_str(&format!(
                "<section id=\"{}\">\n{}\n</section>\n",
                escape_html(&container.id),
                container.inner_html
            ));
        }

        html.push_str("</main>\n<footer class=\"site-footer\">\n");
        html.push_str(&format!(
            "<div class=\"share\">{}</div>\n<p>{}</p>\n",
            self.chrome_html("share-label"),
            self.chrome_html("footer-rights")
        ));
        html.push_str("</footer>\n</body>\n</html>\n");
        html
    }

    /// Visible failure page for a dataset that could not be loaded, with a
    /// reload control.
    pub fn error_page(message: &str) -> Self {
        let mut document = Self::new();
        document.set_title("Unable to load page");
        document.replace_container(
            "error",
            format!(
                concat!(
                    r#"<div class="error-state" role="alert">"#,
                    "<h1>Unable to load this page</h1>",
                    "<p>{}</p>",
                    r#"<button type="button" onclick="location.reload()">Reload</button>"#,
                    "</div>"
                ),
                escape_html(message)
            ),
        );
        document
    }
}

fn default_chrome() -> Vec<ChromeElement> {
    vec![
        ChromeElement::new("nav-home", "common.nav.home", "Home"),
        ChromeElement::new("nav-about", "common.nav.about", "About"),
        ChromeElement::new("language-label", "common.language", "Language"),
        ChromeElement::new("share-label", "common.share", "Share this page"),
        ChromeElement::new(
            "footer-rights",
            "common.footer.rights",
            r#"Documented by <span class="notranslate">Palestine Memory Archive</span>. All rights reserved."#,
        ),
    ]
}
