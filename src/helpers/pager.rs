//! Pager controls for the post listing

use super::url::listing_url;
use crate::listing::{Affordances, Control};

/// Generate the pager: previous controls on the left, next controls on the right
///
/// Controls that are not offered on the current page are left out entirely.
pub fn pager(affordances: &Affordances) -> String {
    if affordances.target(Control::Previous).is_none() && affordances.target(Control::Next).is_none() {
        return String::new();
    }

    let mut html = r#"<nav class="pager">"#.to_string();

    html.push_str(r#"<div class="pager-back">"#);
    push_control(&mut html, affordances, Control::First, "&laquo;");
    push_control(&mut html, affordances, Control::Previous, "&lsaquo;");
    html.push_str("</div>");

    html.push_str(r#"<div class="pager-forward">"#);
    push_control(&mut html, affordances, Control::Next, "&rsaquo;");
    push_control(&mut html, affordances, Control::Last, "&raquo;");
    html.push_str("</div>");

    html.push_str("</nav>");
    html
}

fn push_control(html: &mut String, affordances: &Affordances, control: Control, symbol: &str) {
    if let Some(page) = affordances.target(control) {
        html.push_str(&format!(
            r#"<a class="pager-{}" href="{}" title="{}">{}</a>"#,
            css_name(control),
            listing_url(page),
            control,
            symbol
        ));
    }
}

fn css_name(control: Control) -> &'static str {
    match control {
        Control::First => "first",
        Control::Previous => "prev",
        Control::Next => "next",
        Control::Last => "last",
    }
}
