pub mod library;
pub mod movie;
pub mod person;
pub mod tokenizer;

pub use library::title_id_from_guid;
pub use movie::MovieExtractor;
pub use person::{PersonExtractor, first_search_result, search_query};
pub use tokenizer::{Event, Tag, TokenStream};
