use maud::{html, Markup};
use url::form_urlencoded;

pub mod error;
pub mod filter_form;
pub mod indicators;
pub mod lead_form;
pub mod listing_card;

pub use error::{error_block, form_errors};
pub use filter_form::filter_form;
pub use indicators::indicators_widget;
pub use lead_form::{contact_form, offer_form, thanks_message};
pub use listing_card::listing_card;

/// Click-to-chat link with a prefilled message.
pub fn whatsapp_link(number: &str, text: &str, label: &str) -> Markup {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    let text: String = form_urlencoded::byte_serialize(text.as_bytes()).collect();
    html! {
        a class="whatsapp" href=(format!("https://wa.me/{digits}?text={text}")) target="_blank" rel="noopener" {
            (label)
        }
    }
}

/// `<select>` whose options are `(value, label)` pairs plus an "any" entry.
pub fn select(name: &str, any_label: &str, options: &[(String, String)], current: Option<&str>) -> Markup {
    html! {
        select name=(name) id=(name) {
            option value="" { (any_label) }
            @for (value, label) in options {
                option value=(value) selected[current == Some(value.as_str())] { (label) }
            }
        }
    }
}
