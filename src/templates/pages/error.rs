use crate::templates::components::error_block;
use crate::templates::{site_layout, SiteInfo};
use maud::Markup;

pub fn error_page(site_name: &str, status: u16, message: &str) -> Markup {
    let site = SiteInfo {
        name: site_name,
        whatsapp: None,
    };
    site_layout(site, &format!("Erro {status}"), error_block(status, message))
}
