use err_derive::Error;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use super::models::OrderItem;

pub const DEFAULT_PHONE: &str = "918639378049";
const WHATSAPP_BASE: &str = "https://wa.me/";

// Everything but the URI component unreserved characters.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error)]
pub enum LinkError {
    #[error(display = "not a WhatsApp number: {:?}", _0)]
    InvalidPhone(String),
    #[error(display = "could not build link")]
    Url(#[error(source)] url::ParseError),
}

/// Composes orders as pre-filled WhatsApp chats with the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WhatsApp {
    pub phone: String,
}

impl Default for WhatsApp {
    fn default() -> Self {
        WhatsApp {
            phone: DEFAULT_PHONE.to_string(),
        }
    }
}

impl WhatsApp {
    pub fn message(&self, order: &OrderItem) -> String {
        format!(
            "Hi! I'd like to order:\n\n{} x {}\nPrice: ₹{}\n\nPlease confirm my order and delivery details.",
            order.item.name,
            order.quantity,
            order.total()
        )
    }

    /// `https://wa.me/<phone>?text=<message>`, with the message
    /// percent-encoded as a URI component (`%20` for spaces). `Url` may still
    /// escape `'` as `%27` in an https query.
    pub fn order_link(&self, order: &OrderItem) -> Result<Url, LinkError> {
        if self.phone.is_empty() || !self.phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LinkError::InvalidPhone(self.phone.clone()));
        }
        let mut url = Url::parse(WHATSAPP_BASE)
            .and_then(|base| base.join(&self.phone))
            .map_err(LinkError::Url)?;
        let message = self.message(order);
        let text = utf8_percent_encode(&message, COMPONENT_ENCODE_SET);
        url.set_query(Some(&format!("text={}", text)));
        Ok(url)
    }
}
