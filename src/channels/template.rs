//! Jinja-style message templates.
//!
//! Every template sees the fields of [`TemplateData`]:
//! - `active_reviewers`: reviewers pinged now
//! - `disabled_reviewers`: reviewers not pinged, with status
//! - `pr_number`, `repo_owner`, `repo_name`, `pr_url`
//!
//! Integrations override the built-in text with a `template` parameter.

use minijinja::{AutoEscape, Environment};

use crate::error::PingError;
use crate::ping::TemplateData;

/// Hidden marker identifying reminder comments.
pub const COMMENT_MARKER: &str = "<!-- gong -->";

/// Built-in console template.
pub const CONSOLE_TEMPLATE: &str = concat!(
    "{% if active_reviewers %}Pinging: {{ active_reviewers | join(\", \") }}{% endif %}",
    "{% if active_reviewers and disabled_reviewers %}\n{% endif %}",
    "{% if disabled_reviewers %}Not pinging: {{ disabled_reviewers | join(\", \") }}{% endif %}",
    "{% if not active_reviewers and not disabled_reviewers %}No pending review requests.{% endif %}",
);

/// Built-in pull request comment template.
pub const COMMENT_TEMPLATE: &str = concat!(
    "Awaiting reviews from: ",
    "{% for reviewer in active_reviewers %}{% if not loop.first %}, {% endif %}@{{ reviewer }}{% endfor %}",
    "\n<!-- gong -->",
);

/// Built-in Slack message template.
pub const SLACK_TEMPLATE: &str = concat!(
    "PR #{{ pr_number }} is waiting for review: ",
    "<{{ pr_url }}|{{ repo_owner }}/{{ repo_name }}#{{ pr_number }}>",
    "{% if active_reviewers %}\nReviewers: {{ active_reviewers | join(\", \") }}{% endif %}",
);

/// Renders `source` against `data`.
///
/// # Errors
///
/// Returns [`PingError::Template`] when the template fails to parse or
/// render.
pub fn render(name: &str, source: &str, data: &TemplateData) -> Result<String, PingError> {
    let mut env = Environment::new();

    // Messages are plain text, never HTML
    env.set_auto_escape_callback(|_| AutoEscape::None);

    env.add_template(name, source)
        .map_err(|error| PingError::Template {
            message: format!("invalid {name} template: {error}"),
        })?;

    let template = env.get_template(name).map_err(|error| PingError::Template {
        message: format!("failed to retrieve {name} template: {error}"),
    })?;

    template.render(data).map_err(|error| PingError::Template {
        message: format!("{name} template rendering failed: {error}"),
    })
}
