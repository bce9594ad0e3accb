pub mod people;
pub mod sheet;
pub mod store;
pub mod weather;

pub use people::people;
pub use sheet::{append, create, exists, find, get, set, tabs};
pub use store::store;
pub use weather::weather;
