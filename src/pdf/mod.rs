//! PDF manipulation module

pub mod codec;
pub mod composite;
pub mod inspect;

// Re-export commonly used items
pub use codec::{decode, draw_embedded, embed_page, encode, EmbeddedPage};
pub use composite::{composite, composite_files};
pub use inspect::{count_pages, page_size};
