pub mod reader;
pub mod table;
pub mod window;

pub use reader::DelimitedTextReader;
pub use table::{DataSource, DataTable, Pattern};
pub use window::SlidingWindow;
