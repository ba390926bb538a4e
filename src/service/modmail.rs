//! Modmail service.
//!
//! A case links a user's DMs to a channel in the support guild. The channel name
//! carries the user ID so the team side can find the case without a lookup table.

use sea_orm::DatabaseConnection;

use crate::{
    data::modmail::ModmailRepository,
    error::AppError,
    model::modmail::ModmailCase,
    util::{
        parse::parse_id,
        text::{channel_slug, truncate_chars},
    },
};

pub const OPEN_PREFIX: &str = "open-";
pub const CLOSED_PREFIX: &str = "deleted-";

const MAX_SLUG_LENGTH: usize = 50;
const MAX_CHANNEL_NAME_LENGTH: usize = 100;

/// Content types inlined as the relay embed image.
const INLINE_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/gif"];

pub struct ModmailService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModmailService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn case_for_user(&self, user_id: u64) -> Result<Option<ModmailCase>, AppError> {
        Ok(ModmailRepository::new(self.db).find_by_user(user_id).await?)
    }

    pub async fn open(&self, user_id: u64, channel_id: u64) -> Result<ModmailCase, AppError> {
        Ok(ModmailRepository::new(self.db)
            .create(user_id, channel_id)
            .await?)
    }

    /// Closes the user's case.
    ///
    /// # Returns
    /// - `Ok(Some(case))` - The closed case, whose channel should be archived
    /// - `Ok(None)` - The user had no open case
    pub async fn close(&self, user_id: u64) -> Result<Option<ModmailCase>, AppError> {
        let repo = ModmailRepository::new(self.db);
        let Some(case) = repo.find_by_user(user_id).await? else {
            return Ok(None);
        };

        repo.delete_by_user(user_id).await?;

        Ok(Some(case))
    }
}

/// Name of a case channel: `open-<slug>-<user id>` with the slug cut at 50 characters.
pub fn open_channel_name(display_name: &str, user_id: u64) -> String {
    format!(
        "{}{}-{}",
        OPEN_PREFIX,
        truncate_chars(&channel_slug(display_name), MAX_SLUG_LENGTH),
        user_id
    )
}

/// Name of an archived case channel: `deleted-<slug>-<user id>`, at most 100 characters.
pub fn closed_channel_name(display_name: &str, user_id: u64) -> String {
    truncate_chars(
        &format!("{}{}-{}", CLOSED_PREFIX, channel_slug(display_name), user_id),
        MAX_CHANNEL_NAME_LENGTH,
    )
}

/// Name used when a channel without a case is archived.
pub fn orphan_closed_channel_name(current_name: &str) -> String {
    truncate_chars(
        &format!("{}{}", CLOSED_PREFIX, current_name),
        MAX_CHANNEL_NAME_LENGTH,
    )
}

pub fn is_open_channel(name: &str) -> bool {
    name.starts_with(OPEN_PREFIX)
}

pub fn is_case_channel(name: &str) -> bool {
    name.starts_with(OPEN_PREFIX) || name.starts_with(CLOSED_PREFIX)
}

/// Parses the user ID from the last dash-separated segment of a case channel name.
///
/// Open channels need at least three segments (`open`, slug, ID).
pub fn user_id_from_channel_name(name: &str) -> Option<u64> {
    if !is_case_channel(name) {
        return None;
    }

    let parts: Vec<&str> = name.split('-').collect();
    if parts.len() < 3 {
        return None;
    }

    parse_id(parts.last()?)
}

/// Whether an attachment is shown inline in the relay embed.
pub fn is_inline_image(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|content_type| {
        INLINE_IMAGE_TYPES
            .iter()
            .any(|inline| content_type.starts_with(inline))
    })
}

/// Markdown list of attachment links for the relay embed.
pub fn attachment_list<'a>(attachments: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    attachments
        .into_iter()
        .map(|(filename, url)| format!("[{}]({})", filename, url))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    #[test]
    fn builds_open_channel_name() {
        assert_eq!(open_channel_name("Big Tom", 42), "open-big-tom-42");

        let long = open_channel_name(&"x".repeat(80), 42);
        assert_eq!(long, format!("open-{}-42", "x".repeat(50)));
    }

    #[test]
    fn closed_channel_name_is_capped() {
        assert_eq!(closed_channel_name("Big Tom", 42), "deleted-big-tom-42");
        assert_eq!(closed_channel_name(&"x".repeat(200), 42).chars().count(), 100);
        assert_eq!(orphan_closed_channel_name("open-a-1"), "deleted-open-a-1");
    }

    #[test]
    fn parses_user_id_from_channel_name() {
        assert_eq!(user_id_from_channel_name("open-big-tom-42"), Some(42));
        assert_eq!(user_id_from_channel_name("deleted-tom-42"), Some(42));
        assert_eq!(user_id_from_channel_name("open-42"), None);
        assert_eq!(user_id_from_channel_name("open-tom-abc"), None);
        assert_eq!(user_id_from_channel_name("general-tom-42"), None);
        assert_eq!(user_id_from_channel_name("open-tom-0"), None);
    }

    #[test]
    fn recognises_inline_images() {
        assert!(is_inline_image(Some("image/png")));
        assert!(is_inline_image(Some("image/jpeg; charset=binary")));
        assert!(!is_inline_image(Some("application/pdf")));
        assert!(!is_inline_image(None));
    }

    #[test]
    fn lists_attachments_as_links() {
        let list = attachment_list([("a.png", "https://cdn/a.png"), ("b.txt", "https://cdn/b.txt")]);

        assert_eq!(list, "[a.png](https://cdn/a.png)\n[b.txt](https://cdn/b.txt)");
    }

    #[tokio::test]
    async fn one_open_case_per_user() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ModmailCase)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = ModmailService::new(db);

        assert_eq!(service.case_for_user(42).await?, None);
        let case = service.open(42, 900).await?;

        assert_eq!(service.case_for_user(42).await?, Some(case.clone()));
        assert!(service.open(42, 901).await.is_err());
        assert_eq!(service.close(42).await?, Some(case));
        assert_eq!(service.close(42).await?, None);

        Ok(())
    }
}
