//! Domain entities of the catalog.

mod category;
mod person;
mod product;

pub use category::Category;
pub use person::Person;
pub use product::Product;
