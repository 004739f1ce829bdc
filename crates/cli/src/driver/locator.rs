// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Element locators understood by every driver.
//!
//! A locator is a CSS selector, optionally narrowed to elements whose text
//! contains one of a set of strings, then reduced to a single match.

use serde::Serialize;
use std::fmt;

/// Which of the matching elements an action targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Pick {
    First,
    Last,
    Nth(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Locator {
    css: String,
    has_text: Vec<String>,
    innermost: bool,
    pick: Pick,
}

impl Locator {
    /// Match elements by CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            css: selector.into(),
            has_text: Vec::new(),
            innermost: false,
            pick: Pick::First,
        }
    }

    /// Match the innermost element whose text contains `text`
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            css: "body *".to_string(),
            has_text: vec![text.into()],
            innermost: true,
            pick: Pick::First,
        }
    }

    /// Keep only elements whose text contains `text`.
    ///
    /// Repeated calls widen the filter: an element matching any of the texts
    /// is kept.
    pub fn has_text(mut self, text: impl Into<String>) -> Self {
        self.has_text.push(text.into());
        self
    }

    pub fn first(mut self) -> Self {
        self.pick = Pick::First;
        self
    }

    pub fn last(mut self) -> Self {
        self.pick = Pick::Last;
        self
    }

    pub fn nth(mut self, index: usize) -> Self {
        self.pick = Pick::Nth(index);
        self
    }

    pub fn selector(&self) -> &str {
        &self.css
    }

    pub fn texts(&self) -> &[String] {
        &self.has_text
    }

    pub fn is_innermost(&self) -> bool {
        self.innermost
    }

    pub fn pick(&self) -> Pick {
        self.pick
    }

    /// Whether the locator mentions `needle` in its selector or text filter.
    pub fn mentions(&self, needle: &str) -> bool {
        self.css.contains(needle) || self.has_text.iter().any(|t| t.contains(needle))
    }

    /// JSON form handed to in-page resolution scripts.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.innermost {
            write!(f, "text={}", self.has_text.join("|"))?;
        } else {
            f.write_str(&self.css)?;
            for text in &self.has_text {
                write!(f, ":has-text('{text}')")?;
            }
        }
        match self.pick {
            Pick::First => Ok(()),
            Pick::Last => f.write_str(" >> last"),
            Pick::Nth(i) => write!(f, " >> nth={i}"),
        }
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
