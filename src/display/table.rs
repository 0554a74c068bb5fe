use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LOADING_PLACEHOLDER: &str = "Loading...";
const EMPTY_PLACEHOLDER: &str = "No data found";

/// How a column turns a row into text: either a named field of the row's
/// serialized form, or an explicit derivation.
pub enum Accessor<T> {
    Field(&'static str),
    Derived(Box<dyn Fn(&T) -> String + Send + Sync>),
}

/// Describes one table column over a generic row type.
pub struct Column<T> {
    header: String,
    accessor: Accessor<T>,
    cell: Option<Box<dyn Fn(&T) -> Cell + Send + Sync>>,
}

impl<T: Serialize> Column<T> {
    pub fn field(header: &str, name: &'static str) -> Self {
        Self {
            header: header.to_string(),
            accessor: Accessor::Field(name),
            cell: None,
        }
    }

    pub fn derived(
        header: &str,
        derive: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.to_string(),
            accessor: Accessor::Derived(Box::new(derive)),
            cell: None,
        }
    }

    /// Attach a fully custom cell renderer. It wins over the accessor for
    /// rendering; the accessor still supplies the searchable text.
    pub fn with_cell(mut self, render: impl Fn(&T) -> Cell + Send + Sync + 'static) -> Self {
        self.cell = Some(Box::new(render));
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// The column's text for one row, used for search and plain rendering.
    pub fn text(&self, row: &T) -> String {
        match &self.accessor {
            Accessor::Derived(derive) => derive(row),
            Accessor::Field(name) => serde_json::to_value(row)
                .ok()
                .and_then(|value| value.get(*name).cloned())
                .map(|value| format_cell_value(&value))
                .unwrap_or_else(|| "-".to_string()),
        }
    }

    fn render_cell(&self, row: &T) -> Cell {
        if let Some(render) = &self.cell {
            return render(row);
        }
        Cell::new(self.text(row))
    }
}

/// Generic searchable table over any serializable row collection. Holds the
/// column set and the current search term; never the rows themselves.
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    actions: Option<Box<dyn Fn(&T) -> String + Send + Sync>>,
    search_term: String,
    max_width: Option<usize>,
    use_colors: bool,
}

impl<T: Serialize> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            actions: None,
            search_term: String::new(),
            max_width: detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Append a per-row trailing column (edit/delete hints and the like).
    pub fn with_actions(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.actions = Some(Box::new(render));
        self
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Rows whose visible fields contain the search term, case-insensitive.
    /// An empty term keeps everything. The source collection is untouched.
    pub fn filtered<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        if self.search_term.is_empty() {
            return rows.iter().collect();
        }
        let term = self.search_term.to_lowercase();
        rows.iter()
            .filter(|row| {
                self.columns
                    .iter()
                    .any(|column| column.text(row).to_lowercase().contains(&term))
            })
            .collect()
    }

    pub fn render(&self, rows: &[T], is_loading: bool) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);

        let mut headers: Vec<Cell> = self
            .columns
            .iter()
            .map(|column| self.header_cell(column.header()))
            .collect();
        if self.actions.is_some() {
            headers.push(self.header_cell("Actions"));
        }
        table.set_header(headers);

        if is_loading {
            table.add_row(vec![self.placeholder_cell(LOADING_PLACEHOLDER)]);
            return table.to_string();
        }

        let visible = self.filtered(rows);
        if visible.is_empty() {
            table.add_row(vec![self.placeholder_cell(EMPTY_PLACEHOLDER)]);
            return table.to_string();
        }

        for row in visible {
            let mut cells: Vec<Cell> = self
                .columns
                .iter()
                .map(|column| column.render_cell(row))
                .collect();
            if let Some(actions) = &self.actions {
                cells.push(Cell::new(actions(row)));
            }
            table.add_row(cells);
        }

        table.to_string()
    }

    fn header_cell(&self, text: &str) -> Cell {
        if self.use_colors {
            Cell::new(text)
                .add_attribute(Attribute::Bold)
                .fg(Color::Green)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn placeholder_cell(&self, text: &str) -> Cell {
        if self.use_colors {
            Cell::new(text)
                .fg(Color::DarkGrey)
                .add_attribute(Attribute::Italic)
        } else {
            Cell::new(text)
        }
    }

    /// Set table width to match the terminal size
    fn configure_table_width(&self, table: &mut Table) {
        if let Some(terminal_width) = self.max_width {
            let available_width = if terminal_width > 20 {
                terminal_width - 6
            } else {
                terminal_width.max(40)
            };

            table.set_width(available_width as u16);
        } else {
            table.set_width(80);
        }
    }
}

/// Header block printed above a listing: source, record count, filter
/// marker and timestamp.
pub fn render_list_header(source: &str, total: usize, is_filtered: bool) -> String {
    let mut header = String::new();

    header.push_str(&format!("🚀 {}\n", source));
    header.push_str(&format!("📊 Total records: {}", total));
    if is_filtered {
        header.push_str(" | 🔍 Filter applied");
    }
    header.push('\n');
    header.push_str(&format!(
        "⏰ {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    header.push_str("──────────────────────────────────────────────────────────");

    header
}

/// Detect terminal width
fn detect_terminal_width() -> Option<usize> {
    match terminal::size() {
        Ok((cols, _rows)) => {
            let width = cols as usize;
            // Clamp for stability on extreme terminal sizes
            if width < 40 {
                Some(40)
            } else if width > 200 {
                Some(200)
            } else {
                Some(width)
            }
        }
        Err(_) => Some(80),
    }
}

/// Render one JSON field value as cell text.
pub fn format_cell_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => {
            if s.len() > 100 {
                truncate_text(s, 100)
            } else {
                s.clone()
            }
        }
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            if arr.is_empty() {
                "[]".to_string()
            } else {
                format!("[{} items]", arr.len())
            }
        }
        serde_json::Value::Object(obj) => {
            if obj.is_empty() {
                "{}".to_string()
            } else {
                format!("{{{} items}}", obj.len())
            }
        }
    }
}

/// Truncate text to the specified display width and add an ellipsis.
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let ellipsis_width = ellipsis.width();

    if max_width <= ellipsis_width {
        return ellipsis[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ellipsis);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Branch, User, Workout};
    use serde_json::json;

    fn branches() -> Vec<Branch> {
        vec![
            Branch {
                id: 1,
                name: "Central".to_string(),
                email: "c@x.com".to_string(),
                location: "Downtown".to_string(),
            },
            Branch {
                id: 2,
                name: "North".to_string(),
                email: "n@x.com".to_string(),
                location: "Uptown".to_string(),
            },
        ]
    }

    fn branch_table() -> DataTable<Branch> {
        DataTable::new(vec![
            Column::field("ID", "id"),
            Column::field("Name", "name"),
            Column::field("Email", "email"),
            Column::field("Location", "location"),
        ])
        .with_colors(false)
        .with_max_width(100)
    }

    #[test]
    fn test_empty_term_keeps_all_rows() {
        let table = branch_table();
        let rows = branches();
        assert_eq!(table.filtered(&rows).len(), 2);
        assert!(!table.is_filtered());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut table = branch_table();
        let rows = branches();

        table.set_search_term("downtown");
        let visible = table.filtered(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Central");

        table.set_search_term("uptown");
        let visible = table.filtered(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "North");

        // "uptown" is a substring of "Uptown" only; "downtown" row hidden
        table.set_search_term("UPTOWN");
        assert_eq!(table.filtered(&rows).len(), 1);
    }

    #[test]
    fn test_filter_matches_any_visible_field() {
        let mut table = branch_table();
        let rows = branches();

        table.set_search_term("n@x.com");
        let visible = table.filtered(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);

        table.set_search_term("no-such-text");
        assert!(table.filtered(&rows).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_and_leaves_source_untouched() {
        let mut table = branch_table();
        let rows = branches();

        table.set_search_term("central");
        let first: Vec<u32> = table.filtered(&rows).iter().map(|b| b.id).collect();
        let second: Vec<u32> = table.filtered(&rows).iter().map(|b| b.id).collect();
        assert_eq!(first, second);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_cell_resolution_prefers_custom_renderer() {
        let column = Column::<Workout>::derived("Duration (minutes)", |w| {
            format!("{} mins", w.duration)
        })
        .with_cell(|w| Cell::new(format!("** {} **", w.duration)));

        let workout = Workout {
            id: Some(1),
            workout_type: "Cardio".to_string(),
            duration: 45,
        };

        // The accessor still feeds search text; the renderer owns display.
        assert_eq!(column.text(&workout), "45 mins");
        let table = DataTable::new(vec![column]).with_colors(false).with_max_width(100);
        let rendered = table.render(std::slice::from_ref(&workout), false);
        assert!(rendered.contains("** 45 **"));
    }

    #[test]
    fn test_field_accessor_stringifies_values() {
        let column = Column::<Workout>::field("ID", "id");
        let workout = Workout {
            id: Some(7),
            workout_type: "Yoga".to_string(),
            duration: 60,
        };
        assert_eq!(column.text(&workout), "7");

        let unsaved = Workout {
            id: None,
            workout_type: "Yoga".to_string(),
            duration: 60,
        };
        assert_eq!(column.text(&unsaved), "-");

        let missing = Column::<Workout>::field("Ghost", "nope");
        assert_eq!(missing.text(&workout), "-");
    }

    #[test]
    fn test_derived_accessor_used_for_filtering() {
        let mut table = DataTable::new(vec![
            Column::<User>::field("ID", "id"),
            Column::derived("Branch", |u: &User| {
                u.branch
                    .as_ref()
                    .map(|b| b.name.clone())
                    .unwrap_or_else(|| "N/A".to_string())
            }),
        ])
        .with_colors(false)
        .with_max_width(100);

        let users = vec![
            User {
                id: 1,
                email: "a@gym.test".to_string(),
                role: "ADMIN".to_string(),
                branch: Some(crate::api::models::BranchRef {
                    id: Some(1),
                    name: "Central".to_string(),
                }),
            },
            User {
                id: 2,
                email: "b@gym.test".to_string(),
                role: "MEMBER".to_string(),
                branch: None,
            },
        ];

        table.set_search_term("central");
        assert_eq!(table.filtered(&users).len(), 1);

        table.set_search_term("n/a");
        assert_eq!(table.filtered(&users).len(), 1);
    }

    #[test]
    fn test_render_loading_placeholder() {
        let table = branch_table();
        let rendered = table.render(&branches(), true);
        assert!(rendered.contains("Loading..."));
        assert!(!rendered.contains("Central"));
    }

    #[test]
    fn test_render_empty_placeholder() {
        let mut table = branch_table();
        table.set_search_term("nowhere");
        let rendered = table.render(&branches(), false);
        assert!(rendered.contains("No data found"));
        assert!(!rendered.contains("Central"));
    }

    #[test]
    fn test_render_rows_and_actions_column() {
        let table = branch_table().with_actions(|b: &Branch| format!("edit {}", b.id));
        let rendered = table.render(&branches(), false);
        assert!(rendered.contains("Central"));
        assert!(rendered.contains("Downtown"));
        assert!(rendered.contains("Actions"));
        assert!(rendered.contains("edit 1"));
    }

    #[test]
    fn test_actions_column_absent_when_not_supplied() {
        let table = branch_table();
        let rendered = table.render(&branches(), false);
        assert!(!rendered.contains("Actions"));
    }

    #[test]
    fn test_format_cell_value() {
        assert_eq!(format_cell_value(&json!(null)), "-");
        assert_eq!(format_cell_value(&json!("text")), "text");
        assert_eq!(format_cell_value(&json!(123)), "123");
        assert_eq!(format_cell_value(&json!(true)), "true");
        assert_eq!(format_cell_value(&json!([])), "[]");
        assert_eq!(format_cell_value(&json!([1, 2])), "[2 items]");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hello", 10), "Hello");
        assert_eq!(truncate_text("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_render_list_header() {
        let header = render_list_header("Branches", 2, true);
        assert!(header.contains("Branches"));
        assert!(header.contains("Total records: 2"));
        assert!(header.contains("Filter applied"));

        let header = render_list_header("Workouts", 0, false);
        assert!(!header.contains("Filter applied"));
    }
}
