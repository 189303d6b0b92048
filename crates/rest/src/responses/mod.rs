//! Response types beyond plain JSON.
//!
//! - [`Attachment`] - file downloads (CSV catalogue, generated CIF)

mod attachment;

pub use attachment::{Attachment, CIF_MEDIA_TYPE};
