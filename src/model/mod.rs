//! Domain models shared between the data, service and bot layers.
//!
//! Entity models from the `entity` crate are converted into these types at the
//! repository boundary, parsing stored string IDs into `u64`.

pub mod api;
pub mod clan;
pub mod faq;
pub mod modmail;
pub mod role_category;
pub mod temp_voice;
pub mod ticket;
