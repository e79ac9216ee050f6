use super::model::{Cell, Column, RawTable};

/// Build one [`Column`] per header entry, keeping only clean samples.
///
/// Missing cells (short rows), text, blanks and non-finite numbers are all
/// dropped silently. Cells past the end of the header are ignored.
pub fn sample_columns(table: &RawTable) -> Vec<Column> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(index, label)| Column {
            label: label.clone(),
            index,
            samples: (0..table.num_rows())
                .filter_map(|row| table.cell(row, index).and_then(Cell::as_sample))
                .collect(),
        })
        .collect()
}
