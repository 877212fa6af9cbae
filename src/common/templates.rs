/// Templates module for the repository configuration files written by `SvnAdmin`.
/// The templates are embedded at compile time using include_str! macro
use std::collections::HashMap;

/// `conf/svnserve.conf` template
pub fn get_svnserve_conf_template() -> &'static str {
    include_str!("../../templates/svnserve.conf")
}

/// `conf/authz` template
pub fn get_authz_template() -> &'static str {
    include_str!("../../templates/authz")
}

/// `conf/passwd` template
pub fn get_passwd_template() -> &'static str {
    include_str!("../../templates/passwd")
}

/// Replaces `{{key}}` placeholders in a template
#[derive(Debug, Default)]
pub struct TemplateProcessor {
    replacements: HashMap<String, String>,
}

impl TemplateProcessor {
    /// Create a new template processor with no replacements
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a placeholder value
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.replacements.insert(key.into(), value.into());
        self
    }

    /// Render the template. Unknown placeholders are left untouched.
    pub fn process(&self, template: &str) -> String {
        self.replacements
            .iter()
            .fold(template.to_string(), |rendered, (key, value)| {
                rendered.replace(&format!("{{{{{}}}}}", key), value)
            })
    }
}
