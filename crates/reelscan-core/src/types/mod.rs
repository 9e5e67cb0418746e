pub mod library;
pub mod movie;
pub mod person;

pub use library::{LibraryListing, TagValue, Video};
pub use movie::Movie;
pub use person::Person;
