//! Markup for each dataset section.
//!
//! Each renderer returns the inner markup of its section container, or
//! `None` when the dataset has no such section. List items are read by
//! index so that `timeline.events.3.title` in a translation file lines up
//! with the fourth event of the dataset.

use crate::page::format::format_date;
use crate::page::localizer::Localizer;
use crate::page::markup::escape_html;

/// Render the container content for `section`.
pub fn render_section(section: &str, l: &Localizer<'_>) -> Option<String> {
    if !l.dataset().has_section(section) {
        return None;
    }

    let html = match section {
        "breadcrumb" => breadcrumb(l),
        "hero" => hero(l),
        "quickFacts" => quick_facts(l),
        "media" => media(l),
        "executiveSummary" => executive_summary(l),
        "casualties" => casualties(l),
        "timeline" => timeline(l),
        "warCrimes" => war_crimes(l),
        "internationalLaw" => international_law(l),
        "testimonies" => testimonies(l),
        "personalities" => personalities(l),
        "historicalImpact" => historical_impact(l),
        "sources" => sources(l),
        "cta" => cta(l),
        _ => return None,
    };
    Some(html)
}

/// Metadata line shown under the sections (last update and author).
pub fn page_meta(l: &Localizer<'_>) -> Option<String> {
    let updated = l.literal("metadata.lastUpdated");
    let author = l.text("metadata.author");
    if updated.is_none() && author.is_none() {
        return None;
    }

    let mut html = String::from(r#"<p class="page-meta">"#);
    if let Some(date) = updated {
        html.push_str(&format!(
            r#"<span>{}: <time datetime="{}">{}</time></span>"#,
            escape_html(&l.ui("common.labels.lastUpdated", "Last updated")),
            escape_html(&date),
            escape_html(&format_date(&date, l.language()))
        ));
    }
    if let Some(author) = author {
        html.push_str(&format!(
            r#" <span class="author">{}: {}</span>"#,
            escape_html(&l.ui("common.labels.author", "Author")),
            escape_html(&author)
        ));
    }
    html.push_str("</p>");
    Some(html)
}

// ==================== Helpers ====================

/// Escaped field text wrapped in `<tag class="...">`, or empty.
fn field(l: &Localizer<'_>, path: &str, tag: &str, class: &str) -> String {
    match l.text(path) {
        Some(text) if !text.is_empty() => format!(
            r#"<{tag} class="{class}">{}</{tag}>"#,
            escape_html(&text),
            tag = tag,
            class = class
        ),
        _ => String::new(),
    }
}

fn heading(l: &Localizer<'_>, section: &str, default: &str) -> String {
    format!("<h2>{}</h2>", escape_html(&l.heading(section, default)))
}

fn external_link(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape_html(href),
        escape_html(text)
    )
}

/// `<ul>` of every string item of the list at `path`.
fn string_list(l: &Localizer<'_>, path: &str, class: &str) -> String {
    let count = l.dataset().len(path);
    if count == 0 {
        return String::new();
    }

    let mut html = format!(r#"<ul class="{}">"#, class);
    for i in 0..count {
        if let Some(text) = l.text(&format!("{}.{}", path, i)) {
            html.push_str(&format!("<li>{}</li>", escape_html(&text)));
        }
    }
    html.push_str("</ul>");
    html
}

// ==================== Sections ====================

fn breadcrumb(l: &Localizer<'_>) -> String {
    let mut html = String::from(r#"<nav class="breadcrumb" aria-label="breadcrumb"><ol>"#);
    for i in 0..l.dataset().len("breadcrumb.items") {
        let base = format!("breadcrumb.items.{}", i);
        let text = l.text(&format!("{}.text", base)).unwrap_or_default();
        let item = match l.literal(&format!("{}.link", base)) {
            Some(link) if !link.is_empty() => {
                format!(r#"<a href="{}">{}</a>"#, escape_html(&link), escape_html(&text))
            }
            _ => format!(r#"<span aria-current="page">{}</span>"#, escape_html(&text)),
        };
        html.push_str(&format!("<li>{}</li>", item));
    }
    html.push_str("</ol></nav>");
    html
}

fn hero(l: &Localizer<'_>) -> String {
    let mut html = String::new();
    html.push_str(&field(l, "hero.category", "span", "hero-category"));
    html.push_str(&field(l, "hero.title", "h1", "hero-title"));
    html.push_str(&field(l, "hero.subtitle", "p", "hero-subtitle"));

    let cards = l.dataset().len("hero.metaCards");
    if cards > 0 {
        html.push_str(r#"<div class="meta-cards">"#);
        for i in 0..cards {
            let base = format!("hero.metaCards.{}", i);
            html.push_str(r#"<div class="meta-card">"#);
            if let Some(icon) = l.literal(&format!("{}.icon", base)) {
                html.push_str(&format!(
                    r#"<span class="icon" aria-hidden="true">{}</span>"#,
                    escape_html(&icon)
                ));
            }
            html.push_str(&field(l, &format!("{}.label", base), "span", "label"));
            html.push_str(&field(l, &format!("{}.value", base), "strong", "value"));
            html.push_str(&field(l, &format!("{}.detail", base), "small", "detail"));
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
    html
}

fn quick_facts(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "quickFacts", "Quick Facts");
    html.push_str(r#"<dl class="quick-facts">"#);
    for i in 0..l.dataset().len("quickFacts.items") {
        let base = format!("quickFacts.items.{}", i);
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(&l.text(&format!("{}.label", base)).unwrap_or_default()),
            escape_html(&l.text(&format!("{}.value", base)).unwrap_or_default())
        ));
    }
    html.push_str("</dl>");
    html
}

fn media(l: &Localizer<'_>) -> String {
    let title = l.heading("media", "Media");
    let mut html = format!("<h2>{}</h2>", escape_html(&title));

    let mut images = String::new();
    for kind in ["local", "remote"] {
        let path = format!("media.images.{}", kind);
        for i in 0..l.dataset().len(&path) {
            if let Some(src) = l.literal(&format!("{}.{}", path, i)) {
                images.push_str(&format!(
                    r#"<figure><img src="{}" alt="{}" loading="lazy"></figure>"#,
                    escape_html(&src),
                    escape_html(&title)
                ));
            }
        }
    }
    if !images.is_empty() {
        html.push_str(&format!(r#"<div class="media-gallery">{}</div>"#, images));
    }

    let mut documents = String::new();
    for kind in ["local", "remote"] {
        let path = format!("media.documents.{}", kind);
        for i in 0..l.dataset().len(&path) {
            if let Some(href) = l.literal(&format!("{}.{}", path, i)) {
                let name = href.rsplit('/').next().unwrap_or(&href).to_string();
                documents.push_str(&format!("<li>{}</li>", external_link(&href, &name)));
            }
        }
    }
    if !documents.is_empty() {
        html.push_str(&format!(
            r#"<h3>{}</h3><ul class="media-documents">{}</ul>"#,
            escape_html(&l.ui("common.labels.documents", "Documents")),
            documents
        ));
    }
    html
}

fn executive_summary(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "executiveSummary", "Executive Summary");
    for i in 0..l.dataset().len("executiveSummary.paragraphs") {
        if let Some(text) = l.text(&format!("executiveSummary.paragraphs.{}", i)) {
            html.push_str(&format!("<p>{}</p>", escape_html(&text)));
        }
    }
    html
}

fn casualties(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "casualties", "Casualties");

    let stats = [
        ("deaths", "common.labels.deaths", "Killed"),
        ("injured", "common.labels.injured", "Injured"),
        ("forced_displacement", "common.labels.displaced", "Displaced"),
    ];
    let mut headline = String::new();
    for (key, label_key, default_label) in stats {
        if let Some(value) = l.number(&format!("casualties.{}", key)) {
            headline.push_str(&format!(
                r#"<div class="stat stat-{}"><strong>{}</strong><span>{}</span></div>"#,
                key,
                escape_html(&value),
                escape_html(&l.ui(label_key, default_label))
            ));
        }
    }
    if !headline.is_empty() {
        html.push_str(&format!(r#"<div class="casualty-stats">{}</div>"#, headline));
    }

    let count = l.dataset().len("casualties.breakdown");
    if count > 0 {
        html.push_str(r#"<div class="casualty-breakdown">"#);
        for i in 0..count {
            let base = format!("casualties.breakdown.{}", i);
            let kind = l.literal(&format!("{}.type", base)).unwrap_or_default();
            html.push_str(&format!(
                r#"<div class="casualty-item casualty-{}">"#,
                escape_html(&kind)
            ));
            if let Some(number) = l.number(&format!("{}.number", base)) {
                html.push_str(&format!("<strong>{}</strong>", escape_html(&number)));
            }
            html.push_str(&field(l, &format!("{}.label", base), "span", "label"));
            html.push_str(&field(l, &format!("{}.detail", base), "small", "detail"));
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
    html
}

fn timeline(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "timeline", "Timeline");
    html.push_str(r#"<ol class="timeline">"#);
    for i in 0..l.dataset().len("timeline.events") {
        let base = format!("timeline.events.{}", i);
        html.push_str(r#"<li class="timeline-event">"#);
        html.push_str(&field(l, &format!("{}.time", base), "time", "event-time"));
        html.push_str(&field(l, &format!("{}.title", base), "h3", "event-title"));
        html.push_str(&field(l, &format!("{}.description", base), "p", "event-description"));
        html.push_str(&field(l, &format!("{}.source", base), "cite", "event-source"));
        html.push_str("</li>");
    }
    html.push_str("</ol>");
    html
}

fn war_crimes(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "warCrimes", "War Crimes");
    html.push_str(r#"<div class="war-crimes">"#);
    for i in 0..l.dataset().len("warCrimes.crimes") {
        let base = format!("warCrimes.crimes.{}", i);
        html.push_str(r#"<article class="war-crime">"#);
        if let Some(icon) = l.literal(&format!("{}.icon", base)) {
            html.push_str(&format!(
                r#"<span class="icon" aria-hidden="true">{}</span>"#,
                escape_html(&icon)
            ));
        }
        html.push_str(&field(l, &format!("{}.title", base), "h3", "crime-title"));
        html.push_str(&field(l, &format!("{}.description", base), "p", "crime-description"));

        if let Some(link) = l.literal(&format!("{}.sourceLink", base)).filter(|s| !s.is_empty()) {
            let text = l
                .text(&format!("{}.sourceText", base))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| link.clone());
            html.push_str(&format!(r#"<p class="crime-source">{}</p>"#, external_link(&link, &text)));
        } else {
            html.push_str(&field(l, &format!("{}.sourceText", base), "p", "crime-source"));
        }
        html.push_str("</article>");
    }
    html.push_str("</div>");
    html
}

fn international_law(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "internationalLaw", "International Law");
    for i in 0..l.dataset().len("internationalLaw.sections") {
        let base = format!("internationalLaw.sections.{}", i);
        html.push_str(r#"<div class="law-section">"#);
        html.push_str(&field(l, &format!("{}.heading", base), "h3", "law-heading"));
        html.push_str(&string_list(l, &format!("{}.violations", base), "violations"));
        html.push_str("</div>");
    }
    html
}

fn testimonies(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "testimonies", "Testimonies");
    for i in 0..l.dataset().len("testimonies.witnesses") {
        let base = format!("testimonies.witnesses.{}", i);
        html.push_str(r#"<blockquote class="testimony">"#);
        html.push_str(&field(l, &format!("{}.initials", base), "span", "initials"));
        html.push_str(&field(l, &format!("{}.testimony", base), "p", "testimony-text"));
        html.push_str("<footer>");
        html.push_str(&field(l, &format!("{}.name", base), "strong", "witness-name"));
        html.push_str(&field(l, &format!("{}.role", base), "span", "witness-role"));

        let source = l.text(&format!("{}.source", base)).filter(|s| !s.is_empty());
        let link = l.literal(&format!("{}.sourceLink", base)).filter(|s| !s.is_empty());
        match (source, link) {
            (Some(source), Some(link)) => {
                html.push_str(&format!("<cite>{}</cite>", external_link(&link, &source)))
            }
            (None, Some(link)) => html.push_str(&format!("<cite>{}</cite>", external_link(&link, &link))),
            (Some(source), None) => html.push_str(&format!("<cite>{}</cite>", escape_html(&source))),
            (None, None) => {}
        }
        html.push_str("</footer></blockquote>");
    }
    html
}

fn person(l: &Localizer<'_>, base: &str) -> String {
    let mut html = String::from(r#"<article class="person">"#);
    html.push_str(&field(l, &format!("{}.name", base), "h4", "person-name"));
    for key in ["name_arabic", "name_hebrew"] {
        if let Some(native) = l.literal(&format!("{}.{}", base, key)) {
            html.push_str(&format!(
                r#"<span class="person-native-name" translate="no">{}</span>"#,
                escape_html(&native)
            ));
        }
    }
    html.push_str(&field(l, &format!("{}.birth_death", base), "span", "person-dates"));
    html.push_str(&field(l, &format!("{}.role", base), "p", "person-role"));
    html.push_str(&field(l, &format!("{}.responsibility", base), "p", "person-responsibility"));
    html.push_str(&string_list(l, &format!("{}.later_positions", base), "later-positions"));
    html.push_str(&field(l, &format!("{}.accountability", base), "p", "person-accountability"));
    html.push_str(&field(l, &format!("{}.notes", base), "p", "person-notes"));
    html.push_str("</article>");
    html
}

fn personalities(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "personalities", "Key Personalities");

    let groups = [
        ("commanders", "common.labels.commanders", "Commanders"),
        ("witnesses_critics", "common.labels.witnessesCritics", "Witnesses and Critics"),
    ];
    for (group, label_key, default_label) in groups {
        let path = format!("personalities.{}", group);
        let count = l.dataset().len(&path);
        if count == 0 {
            continue;
        }
        html.push_str(&format!(
            r#"<div class="person-group person-group-{}"><h3>{}</h3>"#,
            group,
            escape_html(&l.ui(label_key, default_label))
        ));
        for i in 0..count {
            html.push_str(&person(l, &format!("{}.{}", path, i)));
        }
        html.push_str("</div>");
    }

    let context_keys = l.dataset().keys("personalities.organizational_context");
    if !context_keys.is_empty() {
        html.push_str(&format!(
            r#"<div class="organizational-context"><h3>{}</h3><dl>"#,
            escape_html(&l.ui("common.labels.organizationalContext", "Organizational Context"))
        ));
        for key in context_keys {
            let description = l
                .text(&format!("personalities.organizational_context.{}", key))
                .unwrap_or_default();
            html.push_str(&format!(
                "<dt>{}</dt><dd>{}</dd>",
                escape_html(&key),
                escape_html(&description)
            ));
        }
        html.push_str("</dl></div>");
    }
    html
}

fn historical_impact(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "historicalImpact", "Historical Impact");
    for i in 0..l.dataset().len("historicalImpact.sections") {
        let base = format!("historicalImpact.sections.{}", i);
        html.push_str(r#"<div class="impact-section">"#);
        html.push_str(&field(l, &format!("{}.heading", base), "h3", "impact-heading"));
        html.push_str(&string_list(l, &format!("{}.items", base), "impact-items"));
        html.push_str("</div>");
    }
    html
}

fn sources(l: &Localizer<'_>) -> String {
    let mut html = heading(l, "sources", "Sources");
    html.push_str(r#"<ul class="sources">"#);
    for i in 0..l.dataset().len("sources.list") {
        let base = format!("sources.list.{}", i);
        html.push_str(r#"<li class="source">"#);
        if let Some(icon) = l.literal(&format!("{}.icon", base)) {
            html.push_str(&format!(
                r#"<span class="icon" aria-hidden="true">{}</span>"#,
                escape_html(&icon)
            ));
        }

        let name = l.text(&format!("{}.name", base)).unwrap_or_default();
        match l.literal(&format!("{}.link", base)).filter(|s| !s.is_empty()) {
            Some(link) => html.push_str(&format!(
                r#"<strong class="source-name">{}</strong>"#,
                external_link(&link, &name)
            )),
            None => html.push_str(&format!(
                r#"<strong class="source-name">{}</strong>"#,
                escape_html(&name)
            )),
        }

        html.push_str(&field(l, &format!("{}.type", base), "span", "source-type"));
        html.push_str(&field(l, &format!("{}.description", base), "p", "source-description"));
        if l.literal(&format!("{}.verified", base)).as_deref() == Some("true") {
            html.push_str(&format!(
                r#"<span class="badge verified">{}</span>"#,
                escape_html(&l.ui("common.labels.verified", "Verified"))
            ));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

fn cta(l: &Localizer<'_>) -> String {
    let mut html = String::from(r#"<div class="cta">"#);
    html.push_str(&field(l, "cta.title", "h2", "cta-title"));
    html.push_str(&field(l, "cta.text", "p", "cta-text"));
    for i in 0..l.dataset().len("cta.buttons") {
        let base = format!("cta.buttons.{}", i);
        let text = l.text(&format!("{}.text", base)).unwrap_or_default();
        let link = l.literal(&format!("{}.link", base)).unwrap_or_else(|| "#".to_string());
        let kind = l.literal(&format!("{}.type", base)).unwrap_or_else(|| "primary".to_string());
        let action = l
            .literal(&format!("{}.action", base))
            .map(|a| format!(r#" data-action="{}""#, escape_html(&a)))
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<a class="btn btn-{}" href="{}"{}>{}</a>"#,
            escape_html(&kind),
            escape_html(&link),
            action,
            escape_html(&text)
        ));
    }
    html.push_str("</div>");
    html
}
