//! Cover letter body: identity header, date, recipient block and a fixed
//! four-paragraph letter signed with the candidate's name.

use chrono::NaiveDate;

use crate::models::Document;
use crate::render::escape::escape_html;

pub const DEFAULT_RECIPIENT: &str = "Hiring Manager";
pub const DEFAULT_SALUTATION: &str = "Hiring Team";
pub const DEFAULT_BODY: &str =
    "I believe my skills and background make me a strong candidate for this role.";

pub fn render_cover_body(document: &Document, today: NaiveDate) -> String {
    let basics = &document.resume.basics;
    let letter = &document.resume.cover_letter;

    let recipient = non_empty_or(&letter.hiring_manager, DEFAULT_RECIPIENT);
    let salutation = non_empty_or(&letter.hiring_manager, DEFAULT_SALUTATION);
    let custom = non_empty_or(&letter.custom, DEFAULT_BODY);
    let name = escape_html(&basics.name);
    let company = escape_html(&letter.company);

    let mut body = format!(
        "<header style=\"border-bottom: 2px solid var(--line); padding-bottom: 20px; margin-bottom: 30px;\"><h1 style=\"font-size:24px;\">{name}</h1><div class=\"contact-line\">{} | {}</div></header>",
        escape_html(&basics.email),
        escape_html(&basics.phone)
    );
    body.push_str(&format!(
        "<div style=\"margin-bottom: 30px; font-size: 14px; color: var(--muted);\"><div>{}</div><div style=\"margin-top:10px;\"><strong>To:</strong> {}</div><div>{company}</div></div>",
        today.format("%a %b %d %Y"),
        escape_html(recipient)
    ));
    body.push_str("<div style=\"font-size: 14px; line-height: 1.8;\">");
    body.push_str(&format!("<p>Dear {},</p>", escape_html(salutation)));
    body.push_str(&format!(
        "<p>I am writing to express my interest in the <strong>{}</strong> position at {company}.</p>",
        escape_html(&letter.role)
    ));
    body.push_str(&format!("<p>{}</p>", escape_html(custom)));
    body.push_str("<p>Thank you for your time and consideration.</p>");
    body.push_str("<br><p>Sincerely,</p>");
    body.push_str(&format!("<p><strong>{name}</strong></p></div>"));
    body
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
