pub mod notify;
pub mod table;

pub use notify::{ConsoleNavigator, ConsoleNotifier};
pub use table::{Column, DataTable, format_cell_value, render_list_header, truncate_text};
