//! Resume body shared by the ATS and CV preview modes.
//!
//! Sections appear in a fixed order and only when they have content:
//! summary, experience, projects, skills, education.

use crate::models::{Basics, Document, Resume};
use crate::render::escape::escape_html;
use crate::render::styles::Headings;

pub fn render_resume_body(document: &Document) -> String {
    let resume = &document.resume;
    let headings = Headings::for_language(&document.options.output_language);

    let mut body = render_header(&resume.basics);
    body.push_str(&render_summary(resume, &headings));
    body.push_str(&render_experience(resume, &headings));
    body.push_str(&render_projects(resume, &headings));
    body.push_str(&render_skills(resume, &headings));
    body.push_str(&render_education(resume, &headings));
    body
}

fn render_header(basics: &Basics) -> String {
    let mut contact = String::new();
    let fields = [
        ("📧", &basics.email),
        ("📱", &basics.phone),
        ("📍", &basics.location),
    ];
    for (icon, value) in fields {
        if !value.is_empty() {
            contact.push_str(&format!("<span>{icon} {}</span>", escape_html(value)));
        }
    }

    // Link targets are inserted verbatim; only the visible label is escaped.
    let links = basics
        .links
        .iter()
        .map(|link| {
            let label = if link.label.is_empty() {
                "Link"
            } else {
                link.label.as_str()
            };
            format!("<a href=\"{}\">{}</a>", link.url, escape_html(label))
        })
        .collect::<Vec<_>>()
        .join(" • ");
    contact.push_str(&links);

    format!(
        "<header><h1>{}</h1><div class=\"job-title\">{}</div><div class=\"contact-line\">{}</div></header>",
        escape_html(&basics.name),
        escape_html(&basics.headline),
        contact
    )
}

fn render_summary(resume: &Resume, headings: &Headings) -> String {
    if resume.summary.is_empty() {
        return String::new();
    }
    format!(
        "<section><h2>{}</h2><p style=\"font-size:13px\">{}</p></section>",
        headings.summary,
        escape_html(&resume.summary)
    )
}

fn render_experience(resume: &Resume, headings: &Headings) -> String {
    if resume.experience.is_empty() {
        return String::new();
    }
    let mut section = format!("<section><h2>{}</h2>", headings.experience);
    for job in &resume.experience {
        section.push_str("<div style=\"margin-bottom:16px;\">");
        section.push_str(&format!(
            "<div class=\"row\"><strong style=\"font-size:15px;\">{}</strong><span class=\"meta\">{} — {}</span></div>",
            escape_html(&job.role),
            escape_html(&job.start_date),
            escape_html(&job.end_date)
        ));
        section.push_str(&format!(
            "<div class=\"row\"><span style=\"font-size:14px; color:#4b5563;\">{}</span><span class=\"meta\">{}</span></div>",
            escape_html(&job.company),
            escape_html(&job.location)
        ));
        section.push_str(&bullet_list(&job.highlights));
        if !job.tech.is_empty() {
            section.push_str(&format!(
                "<div style=\"margin-top:4px; font-size:12px;\">🛠 {}</div>",
                tags(&job.tech)
            ));
        }
        section.push_str("</div>");
    }
    section.push_str("</section>");
    section
}

fn render_projects(resume: &Resume, headings: &Headings) -> String {
    if resume.projects.is_empty() {
        return String::new();
    }
    let mut section = format!("<section><h2>{}</h2>", headings.projects);
    for project in &resume.projects {
        let link = if project.link.is_empty() {
            String::new()
        } else {
            let href = &project.link;
            format!(" <a href=\"{href}\" style=\"font-size:12px;\">↗</a>")
        };
        section.push_str(&format!(
            "<div style=\"margin-bottom:12px;\"><div class=\"row\"><strong style=\"font-size:14px;\">{}{}</strong></div><div style=\"font-size:13px; margin-bottom:4px;\">{}</div>{}</div>",
            escape_html(&project.name),
            link,
            escape_html(&project.context),
            bullet_list(&project.highlights)
        ));
    }
    section.push_str("</section>");
    section
}

/// Core, tools and domains in one cloud. Soft skills and per-project tech are left out.
fn render_skills(resume: &Resume, headings: &Headings) -> String {
    let skills: Vec<String> = resume
        .skills
        .core
        .iter()
        .chain(&resume.skills.tools)
        .chain(&resume.skills.domains)
        .cloned()
        .collect();
    if skills.is_empty() {
        return String::new();
    }
    format!(
        "<section><h2>{}</h2><div>{}</div></section>",
        headings.skills,
        tags(&skills)
    )
}

fn render_education(resume: &Resume, headings: &Headings) -> String {
    if resume.education.is_empty() {
        return String::new();
    }
    let mut section = format!("<section><h2>{}</h2>", headings.education);
    for school in &resume.education {
        let field = if school.field.is_empty() {
            String::new()
        } else {
            format!(" in {}", escape_html(&school.field))
        };
        section.push_str(&format!(
            "<div style=\"margin-bottom:8px;\"><div class=\"row\"><strong>{}</strong><span class=\"meta\">{} - {}</span></div><div style=\"font-size:13px;\">{}{}</div></div>",
            escape_html(&school.institution),
            escape_html(&school.start_date),
            escape_html(&school.end_date),
            escape_html(&school.degree),
            field
        ));
    }
    section.push_str("</section>");
    section
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let bullets: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();
    format!("<ul>{bullets}</ul>")
}

fn tags(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<span class=\"tag\">{}</span>", escape_html(item)))
        .collect::<Vec<_>>()
        .join(" ")
}
