pub mod components;
pub mod layouts;
pub mod pages;

use crate::config::Config;

pub use layouts::admin::admin_layout;
pub use layouts::site::site_layout;

/// Site-wide values the public layout shows on every page.
#[derive(Debug, Clone, Copy)]
pub struct SiteInfo<'a> {
    pub name: &'a str,
    pub whatsapp: Option<&'a str>,
}

impl<'a> SiteInfo<'a> {
    pub fn from_config(config: &'a Config) -> Self {
        Self {
            name: &config.site_name,
            whatsapp: config.whatsapp_number.as_deref(),
        }
    }
}
