//! Table rendering of a find session

use comfy_table::CellAlignment;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use findpick_lib::instance::FieldInstance;
use findpick_lib::model::Value;
use findpick_lib::picker::FindSession;
use findpick_lib::schema::Alignment;
use findpick_lib::schema::FieldDefinition;
use findpick_lib::schema::SortOrder;

/// Renders the visible rows of `session` in display order.
///
/// The first column numbers the rows from 1, which is what `--pick` takes.
pub fn render(session: &FindSession) -> String {
    let field_defns = session.row_definition().field_defns();
    let rows = session.rows();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["#".to_string()];
    header.extend(field_defns.iter().map(header_cell));
    table.set_header(header);

    for (n, &index) in session.display_order().iter().enumerate() {
        let mut cells = vec![(n + 1).to_string()];
        cells.extend(
            rows[index]
                .fields()
                .iter()
                .zip(field_defns)
                .map(|(instance, field_defn)| cell(instance, field_defn)),
        );
        table.add_row(cells);
    }

    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (i, field_defn) in field_defns.iter().enumerate() {
        if let Some(column) = table.column_mut(i + 1) {
            column.set_cell_alignment(cell_alignment(field_defn.alignment()));
        }
    }

    table.to_string()
}

fn header_cell(field_defn: &FieldDefinition) -> String {
    match field_defn.sort_order() {
        SortOrder::Ascending => format!("{} ^", field_defn.title()),
        SortOrder::Descending => format!("{} v", field_defn.title()),
        SortOrder::Unsorted => field_defn.title().to_string(),
    }
}

fn cell(instance: &FieldInstance, field_defn: &FieldDefinition) -> String {
    if field_defn.is_bool() {
        return match instance.value() {
            Some(Value::Bool(true)) => "[x]".to_string(),
            _ => "[ ]".to_string(),
        };
    }
    instance.display().unwrap_or_default().to_string()
}

fn cell_alignment(alignment: Alignment) -> CellAlignment {
    match alignment {
        Alignment::Left => CellAlignment::Left,
        Alignment::Right => CellAlignment::Right,
        Alignment::Center => CellAlignment::Center,
    }
}
