//! Component and modal custom IDs.
//!
//! IDs are stable across restarts so buttons on old panels keep working. IDs that
//! need context carry one argument after a `:`, e.g. `clan_approve:TAG`.

pub const TICKET_SELECT: &str = "ticket_select";
pub const TICKET_CLAIM: &str = "ticket_claim";
pub const TICKET_CLOSE: &str = "ticket_close";
pub const TICKET_REOPEN: &str = "ticket_reopen";
pub const TICKET_DELETE: &str = "ticket_delete";
pub const TICKET_DELETE_CONFIRM: &str = "ticket_delete_confirm";
pub const TICKET_DELETE_CANCEL: &str = "ticket_delete_cancel";

pub const TEMPVOICE_LOCK: &str = "tempvoice_lock";
pub const TEMPVOICE_UNLOCK: &str = "tempvoice_unlock";
pub const TEMPVOICE_HIDE: &str = "tempvoice_hide";
pub const TEMPVOICE_SHOW: &str = "tempvoice_show";
pub const TEMPVOICE_RENAME: &str = "tempvoice_rename";
pub const TEMPVOICE_LIMIT: &str = "tempvoice_limit";
pub const TEMPVOICE_RENAME_MODAL: &str = "tempvoice_rename_modal";
pub const TEMPVOICE_LIMIT_MODAL: &str = "tempvoice_limit_modal";

pub const CLAN_CREATE: &str = "clan_create";
pub const CLAN_JOIN_LIST: &str = "clan_join_list";
pub const CLAN_APPROVE: &str = "clan_approve";
pub const CLAN_REJECT: &str = "clan_reject";
pub const CLAN_BROWSE: &str = "clan_browse";
pub const CLAN_BROWSE_JOIN: &str = "clan_browse_join";
pub const CLAN_EDIT: &str = "clan_edit";
pub const CLAN_CREATE_MODAL: &str = "clan_create_modal";
pub const CLAN_EDIT_MODAL: &str = "clan_edit_modal";

pub const RULES_ACCEPT: &str = "rules_accept";
pub const CLAN_RULES_ACCEPT: &str = "clan_rules_accept";

pub const FAQ_SELECT: &str = "faq_select";
pub const FAQ_DELETE_SELECT: &str = "faq_delete_select";
pub const FAQ_ADD_MODAL: &str = "faq_add_modal";

/// Modal input field IDs.
pub mod input {
    pub const VALUE: &str = "value";
    pub const CLAN_NAME: &str = "clan_name";
    pub const CLAN_TAG: &str = "clan_tag";
    pub const CLAN_COLOR: &str = "clan_color";
    pub const CLAN_DESCRIPTION: &str = "clan_description";
    pub const CLAN_APPROVAL: &str = "clan_approval";
    pub const FAQ_QUESTION: &str = "faq_question";
    pub const FAQ_ANSWER: &str = "faq_answer";
}

/// Appends an argument to a base ID.
pub fn with_arg(base: &str, arg: impl std::fmt::Display) -> String {
    format!("{}:{}", base, arg)
}

/// Splits a custom ID into its base and optional argument.
pub fn split(custom_id: &str) -> (&str, Option<&str>) {
    match custom_id.split_once(':') {
        Some((base, arg)) => (base, Some(arg).filter(|arg| !arg.is_empty())),
        None => (custom_id, None),
    }
}
