pub mod flatten;
#[allow(clippy::module_inception)]
pub mod table;

pub use flatten::json_to_table;
pub use table::Table;
