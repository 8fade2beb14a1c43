//! Site content: translation bundles, blog posts, and the menu.
//!
//! Content is loaded once from a directory laid out as:
//!
//! ```text
//! <dir>/locales/<locale>.json   translation bundle per locale
//! <dir>/posts/<slug>.json       blog posts
//! <dir>/menu.json               menu sections and prices
//! ```
//!
//! A supported locale without a bundle is not an error at load time; page
//! lookups for it resolve to not-found.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::locale::{Direction, Locale};

/// A page of the site, identified by the path after the locale segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Menu,
    Accommodation,
    Restaurant,
    Gallery,
    Blog,
    BlogPost(String),
    Contact,
}

impl Page {
    /// Parse the path remainder after `/<locale>`; surrounding slashes are ignored.
    pub fn parse(rest: &str) -> Option<Self> {
        let rest = rest.trim_matches('/');
        let page = match rest {
            "" => Self::Home,
            "menu" => Self::Menu,
            "konaklama" => Self::Accommodation,
            "restoran" => Self::Restaurant,
            "galeri" => Self::Gallery,
            "blog" => Self::Blog,
            "iletisim" => Self::Contact,
            _ => {
                let slug = rest.strip_prefix("blog/")?;
                if slug.is_empty() || slug.contains('/') {
                    return None;
                }
                Self::BlogPost(slug.to_string())
            }
        };
        Some(page)
    }

    /// Stable identifier used in responses.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Menu => "menu",
            Self::Accommodation => "accommodation",
            Self::Restaurant => "restaurant",
            Self::Gallery => "gallery",
            Self::Blog => "blog",
            Self::BlogPost(_) => "blog_post",
            Self::Contact => "contact",
        }
    }
}

/// Everything a renderer needs for one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub locale: Locale,
    pub dir: Direction,
    pub page: &'static str,
    pub translations: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// In-memory content loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    translations: HashMap<Locale, Value>,
    posts: BTreeMap<String, Value>,
    menu: Option<Value>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load content from a directory.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut store = Self::new();

        for locale in Locale::ALL {
            let path = dir.join("locales").join(format!("{}.json", locale));
            match read_json(&path)? {
                Some(bundle) => {
                    store.translations.insert(locale, bundle);
                }
                None => warn!(locale = %locale, path = %path.display(), "No translation bundle"),
            }
        }

        let posts_dir = dir.join("posts");
        if posts_dir.is_dir() {
            let entries = fs::read_dir(&posts_dir).map_err(|e| {
                Error::config(format!("cannot read {}: {}", posts_dir.display(), e))
            })?;
            for entry in entries {
                let path = entry
                    .map_err(|e| Error::config(format!("cannot read post entry: {}", e)))?
                    .path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if let Some(post) = read_json(&path)? {
                    store.posts.insert(slug.to_string(), post);
                }
            }
        }

        store.menu = read_json(&dir.join("menu.json"))?;

        debug!(
            locales = store.translations.len(),
            posts = store.posts.len(),
            menu = store.menu.is_some(),
            "Content loaded"
        );

        Ok(store)
    }

    pub fn with_translations(mut self, locale: Locale, bundle: Value) -> Self {
        self.translations.insert(locale, bundle);
        self
    }

    pub fn with_post(mut self, slug: impl Into<String>, post: Value) -> Self {
        self.posts.insert(slug.into(), post);
        self
    }

    pub fn with_menu(mut self, menu: Value) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Translation bundle for a locale.
    pub fn translations(&self, locale: Locale) -> Result<&Value> {
        self.translations
            .get(&locale)
            .ok_or_else(|| Error::locale_not_found(locale.as_str()))
    }

    pub fn post(&self, slug: &str) -> Result<&Value> {
        self.posts
            .get(slug)
            .ok_or_else(|| Error::page_not_found(format!("blog/{}", slug)))
    }

    /// Post slugs in sorted order.
    pub fn post_slugs(&self) -> Vec<&str> {
        self.posts.keys().map(String::as_str).collect()
    }

    pub fn menu(&self) -> Option<&Value> {
        self.menu.as_ref()
    }

    /// Assemble the context for a page.
    pub fn page_context(&self, locale: Locale, page: &Page) -> Result<PageContext> {
        let translations = self.translations(locale)?.clone();

        let data = match page {
            Page::Menu => self.menu.clone(),
            Page::Blog => Some(Value::from(self.post_slugs())),
            Page::BlogPost(slug) => Some(self.post(slug)?.clone()),
            _ => None,
        };

        Ok(PageContext {
            locale,
            dir: locale.direction(),
            page: page.key(),
            translations,
            data,
        })
    }
}

/// Read a JSON file; `Ok(None)` when it does not exist.
fn read_json(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
    let value = serde_json::from_str(&raw)
        .map_err(|e| Error::config(format!("invalid JSON in {}: {}", path.display(), e)))?;
    Ok(Some(value))
}
