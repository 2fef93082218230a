use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::page::NewPage;
use crate::domain::types::{CategoryId, PageTitle, PageUrl, ViewCount};
use crate::forms::{FieldErrors, FormError};

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct AddPageForm {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Please enter a title of at most 128 characters."
    ))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "Please enter the URL of the page."))]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddPageFormPayload {
    pub title: PageTitle,
    pub url: PageUrl,
}

impl AddPageFormPayload {
    /// New page under `category_id` with its view counter at zero.
    pub fn into_new_page(self, category_id: CategoryId) -> NewPage {
        NewPage {
            category_id,
            title: self.title,
            url: self.url,
            views: ViewCount::default(),
        }
    }
}

/// Bare host names such as `www.example.com` are accepted and stored with an
/// `http://` scheme.
fn with_scheme(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

impl TryFrom<AddPageForm> for AddPageFormPayload {
    type Error = FormError;

    fn try_from(value: AddPageForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let mut errors = FieldErrors::new();
        let title = errors.check(PageTitle::new(value.title));
        let url = errors.check(PageUrl::new(with_scheme(&value.url)));

        match (title, url) {
            (Some(title), Some(url)) => Ok(Self { title, url }),
            _ => Err(FormError(errors)),
        }
    }
}
