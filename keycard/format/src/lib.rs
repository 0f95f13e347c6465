#![allow(clippy::doc_overindented_list_items)]

mod error;

pub mod int;
pub mod tags;
pub mod tlv;

pub use self::error::{FormatError, FormatResult};
pub use self::tlv::{Mark, Reader, Writer};
