//! Server-side HTML views rendered with minijinja. Templates are embedded at compile time.

use crate::error::AppError;
use crate::flash::FlashMessage;
use crate::model::Sample;
use axum::http::StatusCode;
use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("detail.html", include_str!("../templates/detail.html")),
    ("create.html", include_str!("../templates/create.html")),
    ("edit.html", include_str!("../templates/edit.html")),
    ("error.html", include_str!("../templates/error.html")),
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn build_environment(
    templates: &[(&'static str, &'static str)],
) -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    for &(name, source) in templates {
        env.add_template(name, source).inspect_err(|e| {
            tracing::error!(template = %name, error = %e, "template failed to compile");
        })?;
    }
    Ok(env)
}

fn environment() -> Result<&'static Environment<'static>, AppError> {
    if let Some(env) = ENV.get() {
        return Ok(env);
    }
    let env = build_environment(TEMPLATES)?;
    Ok(ENV.get_or_init(|| env))
}

/// Compile every template. Called once at startup so a broken template stops boot.
pub fn init() -> Result<(), AppError> {
    let env = environment()?;
    tracing::debug!(templates = env.templates().count(), "templates compiled");
    Ok(())
}

fn render<T: Serialize>(name: &str, page: &T) -> Result<String, AppError> {
    let html = environment()?.get_template(name)?.render(page)?;
    Ok(html)
}

/// Display form of a sample.
#[derive(Serialize, Debug, PartialEq)]
pub struct SampleView {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Sample> for SampleView {
    fn from(s: &Sample) -> Self {
        SampleView {
            id: s.id,
            name: s.name.clone(),
            created_at: s.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: s.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct IndexPage<'a> {
    pub title: &'a str,
    pub app_name: &'a str,
    pub profile: &'a str,
    pub current_time: String,
    pub samples: Vec<SampleView>,
    pub flash: Option<FlashMessage>,
}

#[derive(Serialize)]
pub struct DetailPage {
    pub title: String,
    pub sample: SampleView,
}

#[derive(Serialize)]
pub struct CreatePage<'a> {
    pub title: &'a str,
    pub flash: Option<FlashMessage>,
}

#[derive(Serialize)]
pub struct EditPage {
    pub title: String,
    pub sample: SampleView,
    pub flash: Option<FlashMessage>,
}

#[derive(Serialize)]
struct ErrorPage<'a> {
    status: u16,
    title: &'a str,
    message: &'a str,
}

pub fn render_index(page: &IndexPage<'_>) -> Result<String, AppError> {
    render("index.html", page)
}

pub fn render_detail(page: &DetailPage) -> Result<String, AppError> {
    render("detail.html", page)
}

pub fn render_create(page: &CreatePage<'_>) -> Result<String, AppError> {
    render("create.html", page)
}

pub fn render_edit(page: &EditPage) -> Result<String, AppError> {
    render("edit.html", page)
}

pub fn render_error(status: StatusCode, title: &str, message: &str) -> Result<String, AppError> {
    render(
        "error.html",
        &ErrorPage {
            status: status.as_u16(),
            title,
            message,
        },
    )
}

/// Local wall-clock time for the index page footer.
pub fn current_time() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewSample;
    use chrono::{TimeZone, Utc};

    fn sample(id: i64, name: &str) -> Sample {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        NewSample::new(name.into(), at).into_persisted(id)
    }

    #[test]
    fn every_template_compiles() {
        init().unwrap();
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn broken_template_is_an_error() {
        let broken = [("ok.html", "<p>{{ x }}</p>"), ("broken.html", "{% if %}")];
        assert!(build_environment(&broken).is_err());
        assert!(build_environment(&broken[..1]).is_ok());
    }

    #[test]
    fn index_lists_samples_and_flash() {
        let html = render_index(&IndexPage {
            title: "Samples",
            app_name: "sample-crud",
            profile: "dev",
            current_time: current_time(),
            samples: vec![SampleView::from(&sample(3, "Third"))],
            flash: Some(FlashMessage::success("Created sample: Third")),
        })
        .unwrap();
        assert!(html.contains("/detail/3"));
        assert!(html.contains("2024-05-01 12:30:00"));
        assert!(html.contains("class=\"flash flash-success\""));
        assert!(html.contains("Created sample: Third"));
    }

    #[test]
    fn empty_index_says_so() {
        let html = render_index(&IndexPage {
            title: "Samples",
            app_name: "a",
            profile: "default",
            current_time: current_time(),
            samples: Vec::new(),
            flash: None,
        })
        .unwrap();
        assert!(html.contains("No samples yet."));
        assert!(!html.contains("class=\"flash"));
    }

    #[test]
    fn names_are_html_escaped() {
        let html = render_detail(&DetailPage {
            title: "Detail".into(),
            sample: SampleView::from(&sample(1, "<script>alert(1)</script>")),
        })
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let html = render_edit(&EditPage {
            title: "Edit".into(),
            sample: SampleView::from(&sample(4, "Fourth")),
            flash: Some(FlashMessage::error("Error: name is required")),
        })
        .unwrap();
        assert!(html.contains("action=\"/edit/4\""));
        assert!(html.contains("value=\"Fourth\""));
        assert!(html.contains("class=\"flash flash-error\""));
    }

    #[test]
    fn error_page_shows_status_and_message() {
        let html = render_error(StatusCode::NOT_FOUND, "Not found", "nothing here").unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("nothing here"));
    }
}
