//! HTML for the date-range form

use serde::Deserialize;
use std::fmt::Write as _;

/// Message shown above the form after a redirect
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Flash {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Flash {
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Some(level.into()),
            message: Some(message.into()),
        }
    }

    /// URL-encoded query string carrying this flash
    pub fn to_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(level) = &self.level {
            query.append_pair("level", level);
        }
        if let Some(message) = &self.message {
            query.append_pair("message", message);
        }
        query.finish()
    }

    /// CSS class of the message; anything but `info` renders as an error
    fn css_class(&self) -> &'static str {
        match self.level.as_deref() {
            Some("info") => "flash info",
            _ => "flash error",
        }
    }
}

/// Renders the form page, with the flash message when one is present
pub fn render_form(flash: &Flash) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Maintenance Visit Billing Report</title>\n\
         <style>\n\
         body { font-family: sans-serif; max-width: 32rem; margin: 3rem auto; }\n\
         label { display: block; margin-top: 1rem; }\n\
         .flash { padding: 0.75rem; border-radius: 4px; }\n\
         .flash.error { background: #fde2e1; color: #8a1c17; }\n\
         .flash.info { background: #e1effd; color: #17468a; }\n\
         </style>\n</head>\n<body>\n<h1>Maintenance Visit Billing Report</h1>\n",
    );

    if let Some(message) = flash.message.as_deref().filter(|m| !m.is_empty()) {
        let _ = writeln!(
            html,
            "<p class=\"{}\">{}</p>",
            flash.css_class(),
            escape_html(message)
        );
    }

    html.push_str(
        "<form method=\"post\" action=\"/\">\n\
         <label>Start Date <input type=\"date\" name=\"start_date\" required></label>\n\
         <label>End Date <input type=\"date\" name=\"end_date\" required></label>\n\
         <p><button type=\"submit\">Download</button></p>\n\
         </form>\n</body>\n</html>\n",
    );
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
