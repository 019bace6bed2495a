//! Document Renderer: validated content + request facts → one self-contained HTML page.
//!
//! Pure and deterministic. Facts of record (name, contact, employers, titles,
//! institutions, dates) come from the request; prose comes from the model.
//! Every interpolated value is HTML-escaped.

use crate::models::resume::{GeneratedResumeContent, ResumeRequest};

const STYLES: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
@page { size: A4; margin: 12mm; }
body {
  font-family: 'Segoe UI', 'Helvetica Neue', Arial, sans-serif;
  line-height: 1.5;
  color: #1a1a1a;
  background: white;
  font-size: 14px;
  -webkit-print-color-adjust: exact;
  print-color-adjust: exact;
}
.resume {
  width: 100%;
  display: grid;
  grid-template-columns: 1fr 2fr;
  gap: 20px;
}
.sidebar {
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  color: white;
  padding: 25px 20px;
  border-radius: 8px;
  height: fit-content;
}
.sidebar h3 {
  font-size: 0.9em;
  font-weight: 600;
  margin-bottom: 12px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}
.sidebar-section { margin-bottom: 25px; }
.contact-item {
  display: flex;
  align-items: center;
  gap: 8px;
  margin-bottom: 10px;
  font-size: 0.9em;
  color: rgba(255, 255, 255, 0.9);
  word-break: break-all;
}
.contact-item a { color: white; }
.icon { width: 14px; height: 14px; flex-shrink: 0; opacity: 0.8; }
.skill-tag {
  display: inline-block;
  background: rgba(255, 255, 255, 0.2);
  padding: 4px 8px;
  border-radius: 12px;
  font-size: 0.8em;
  margin: 2px 4px 2px 0;
  font-weight: 500;
}
.main-content { padding-left: 15px; }
.header { text-align: center; padding-bottom: 20px; }
.header h1 {
  font-size: 2.2em;
  font-weight: 700;
  margin-bottom: 8px;
  letter-spacing: -0.5px;
}
.header .contact {
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  gap: 15px;
  font-size: 0.95em;
  color: #4a5568;
}
.header .contact span {
  display: inline-flex;
  align-items: center;
  gap: 6px;
  padding: 4px 8px;
  background: #f7fafc;
  border-radius: 4px;
}
.header .contact a { color: #0077b5; }
.section { margin-bottom: 25px; }
.section h2 {
  font-size: 1.3em;
  font-weight: 600;
  color: #2d3748;
  margin-bottom: 6px;
  padding-bottom: 6px;
  border-bottom: 2px solid #333333;
  text-align: center;
}
.summary { color: #4a5568; background: #f8fafc; padding: 15px; line-height: 1.6; }
.entry { padding: 12px; break-inside: avoid; }
.entry-header {
  display: flex;
  justify-content: space-between;
  align-items: flex-start;
  flex-wrap: wrap;
  gap: 10px;
  margin-bottom: 8px;
}
.entry-header h3 { font-size: 1.1em; font-weight: 600; color: #2d3748; line-height: 1.3; }
.organization { font-weight: 600; color: #4a5568; font-size: 0.95em; }
.dates {
  color: #718096;
  font-size: 0.9em;
  background: #f7fafc;
  padding: 4px 8px;
  border-radius: 4px;
  white-space: nowrap;
}
.description { font-style: italic; color: #4a5568; font-size: 0.95em; margin: 12px 0; }
.achievements { list-style: none; }
.achievements li { position: relative; padding-left: 20px; margin-bottom: 8px; color: #2d3748; }
.achievements li::before {
  content: '\25B6';
  position: absolute;
  left: 0;
  color: #667eea;
  font-size: 0.8em;
}
.skills-text { color: #4a5568; padding: 10px; font-size: 0.95em; }
"#;

const EMAIL_ICON: &str = r#"<svg class="icon" viewBox="0 0 24 24" fill="currentColor"><path d="M20 4H4c-1.1 0-2 .9-2 2v12c0 1.1.9 2 2 2h16c1.1 0 2-.9 2-2V6c0-1.1-.9-2-2-2zm0 4l-8 5-8-5V6l8 5 8-5v2z"/></svg>"#;
const PHONE_ICON: &str = r#"<svg class="icon" viewBox="0 0 24 24" fill="currentColor"><path d="M6.6 10.8c1.4 2.8 3.8 5.1 6.6 6.6l2.2-2.2c.3-.3.7-.4 1-.2 1.1.4 2.3.6 3.6.6.6 0 1 .4 1 1V20c0 .6-.4 1-1 1C10.6 21 3 13.4 3 4c0-.6.4-1 1-1h3.5c.6 0 1 .4 1 1 0 1.3.2 2.5.6 3.6.1.3 0 .7-.2 1z"/></svg>"#;
const NETWORK_ICON: &str = r#"<svg class="icon" viewBox="0 0 24 24" fill="currentColor"><path d="M20.4 20.5h-3.6v-5.6c0-1.3 0-3-1.8-3s-2.1 1.4-2.1 2.9v5.7H9.4V9h3.4v1.6c.5-.9 1.6-1.9 3.4-1.9 3.6 0 4.3 2.4 4.3 5.5v6.3zM5.3 7.4a2.1 2.1 0 1 1 0-4.1 2.1 2.1 0 0 1 0 4.1zm1.8 13.1H3.6V9h3.5v11.5zM22.2 0H1.8C.8 0 0 .8 0 1.7v20.6c0 .9.8 1.7 1.8 1.7h20.4c1 0 1.8-.8 1.8-1.7V1.7C24 .8 23.2 0 22.2 0z"/></svg>"#;

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_resume_html(request: &ResumeRequest, content: &GeneratedResumeContent) -> String {
    let candidate = &request.candidate;
    let name = escape_html(&candidate.name);
    let email = escape_html(&candidate.email);
    let phone = escape_html(&candidate.phone);
    let linkedin = candidate.linkedin().map(escape_html);

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>Resume - {name}</title>\n"));
    html.push_str("<style>");
    html.push_str(STYLES);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"resume\">\n");

    // Sidebar: contact block and skill tags.
    html.push_str("<aside class=\"sidebar\">\n<div class=\"sidebar-section\">\n<h3>Contact</h3>\n");
    html.push_str(&format!(
        "<div class=\"contact-item\">{EMAIL_ICON}<span>{email}</span></div>\n"
    ));
    html.push_str(&format!(
        "<div class=\"contact-item\">{PHONE_ICON}<span>{phone}</span></div>\n"
    ));
    if let Some(url) = &linkedin {
        html.push_str(&format!(
            "<div class=\"contact-item\">{NETWORK_ICON}<a href=\"{url}\">LinkedIn Profile</a></div>\n"
        ));
    }
    html.push_str("</div>\n<div class=\"sidebar-section\">\n<h3>Skills</h3>\n<div>");
    for skill in &content.skills {
        html.push_str(&format!(
            "<span class=\"skill-tag\">{}</span>",
            escape_html(skill)
        ));
    }
    html.push_str("</div>\n</div>\n</aside>\n");

    // Main column.
    html.push_str("<main class=\"main-content\">\n<header class=\"header\">\n");
    html.push_str(&format!("<h1>{name}</h1>\n<div class=\"contact\">\n"));
    html.push_str(&format!("<span>{EMAIL_ICON}{email}</span>\n"));
    html.push_str(&format!("<span>{PHONE_ICON}{phone}</span>\n"));
    if let Some(url) = &linkedin {
        html.push_str(&format!(
            "<span>{NETWORK_ICON}<a href=\"{url}\">{url}</a></span>\n"
        ));
    }
    html.push_str("</div>\n</header>\n");

    html.push_str(&format!(
        "<section class=\"section\">\n<h2>Summary</h2>\n<div class=\"summary\">{}</div>\n</section>\n",
        escape_html(&content.professional_summary)
    ));

    if !request.work_experience.is_empty() {
        html.push_str("<section class=\"section\">\n<h2>Work Experience</h2>\n");
        for (entry, generated) in request.work_experience.iter().zip(&content.work_experience) {
            html.push_str("<div class=\"entry\">\n<div class=\"entry-header\">\n");
            html.push_str(&format!("<h3>{}</h3>\n", escape_html(&entry.role)));
            html.push_str(&format!(
                "<span class=\"organization\">{}</span>\n",
                escape_html(&entry.company_name)
            ));
            html.push_str(&date_range(&entry.start_date, &entry.end_date));
            html.push_str("</div>\n");
            html.push_str(&format!(
                "<p class=\"description\">{}</p>\n<ul class=\"achievements\">\n",
                escape_html(&generated.description)
            ));
            for achievement in &generated.achievements {
                html.push_str(&format!("<li>{}</li>\n", escape_html(achievement)));
            }
            html.push_str("</ul>\n</div>\n");
        }
        html.push_str("</section>\n");
    }

    if !request.education.is_empty() {
        html.push_str("<section class=\"section\">\n<h2>Education</h2>\n");
        for entry in &request.education {
            html.push_str("<div class=\"entry\">\n<div class=\"entry-header\">\n");
            html.push_str(&format!("<h3>{}</h3>\n<div>\n", escape_html(&entry.diploma)));
            html.push_str(&format!(
                "<span class=\"organization\">{}</span>\n",
                escape_html(&entry.university)
            ));
            html.push_str(&date_range(&entry.start_date, &entry.end_date));
            html.push_str("</div>\n</div>\n</div>\n");
        }
        html.push_str("</section>\n");
    }

    let skills_line = content
        .skills
        .iter()
        .map(|s| escape_html(s))
        .collect::<Vec<_>>()
        .join(", ");
    html.push_str(&format!(
        "<section class=\"section\">\n<h2>Skills</h2>\n<div class=\"skills-text\">{skills_line}</div>\n</section>\n"
    ));

    html.push_str("</main>\n</div>\n</body>\n</html>\n");
    html
}

fn date_range(start: &str, end: &str) -> String {
    format!(
        "<span class=\"dates\">{} - {}</span>\n",
        escape_html(start),
        escape_html(end)
    )
}
