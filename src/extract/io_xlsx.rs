use crate::extract::*;

use calamine::{open_workbook, DataType, Reader, Xlsx};

/// Reads tables saved as Excel worksheets.
///
/// Each worksheet is one table on its own page, numbered by the position of the sheet.
/// The cells are placed at their absolute column so that a blank first column is kept.
/// Excel does not store the blank last column of the extracted tables: it is added back.
pub fn read_xlsx(path: &str, worksheet: Option<&str>) -> RunResult<RawDocument> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let sheet_names = workbook.sheet_names().to_vec();
    debug!("read_xlsx: {}: worksheets {:?}", path, sheet_names);

    if let Some(name) = worksheet {
        ensure!(
            sheet_names.iter().any(|n| n == name),
            MissingWorksheetSnafu { name, path }
        );
    }

    let mut pages: Vec<RawPage> = Vec::new();
    for (idx, name) in sheet_names.iter().enumerate() {
        if worksheet.map_or(false, |w| w != name.as_str()) {
            continue;
        }
        let range = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?;
        let first_column = range.start().map_or(0, |(_, c)| c as usize);
        let rows: Vec<Vec<Cell>> = range
            .rows()
            .map(|row| {
                std::iter::repeat(None)
                    .take(first_column)
                    .chain(row.iter().map(cell_text))
                    .chain(std::iter::once(None))
                    .collect()
            })
            .collect();
        debug!("read_xlsx: worksheet {:?}: {} rows", name, rows.len());
        pages.push(RawPage {
            page_number: (idx + 1) as u32,
            tables: vec![RawTable::new(rows)],
        });
    }
    Ok(RawDocument { pages })
}

fn cell_text(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        // Tallies typed as numbers.
        DataType::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        x => Some(x.to_string()),
    }
}
