use std::collections::BTreeMap;

use anyhow::Result;

/// Renders a named template with parameters into localized text. The
/// reseller id doubles as the locale context, as the template catalog is
/// maintained per reseller.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(
        &self,
        key: &str,
        params: &BTreeMap<String, String>,
        reseller_id: i64,
    ) -> Result<String>;
}
