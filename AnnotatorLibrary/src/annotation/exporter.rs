use std::path::Path;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use crate::annotation::roi_table::{Cell, RoiTable};

pub const SPREADSHEET_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const WORKSHEET_NAME: &str = "ROI";

pub struct SpreadsheetExporter;

impl SpreadsheetExporter {
    pub fn write_buffer(table: &RoiTable) -> Result<Vec<u8>, String> {
        let mut workbook = Workbook::new();
        Self::fill_worksheet(workbook.add_worksheet(), table)?;
        workbook.save_to_buffer()
            .map_err(|err| format!("Exporter: Unable to serialize workbook.\nReason: {err}"))
    }

    pub fn write_file(table: &RoiTable, path: &Path) -> Result<(), String> {
        let mut workbook = Workbook::new();
        Self::fill_worksheet(workbook.add_worksheet(), table)?;
        workbook.save(path)
            .map_err(|err| format!("Exporter: Unable to write workbook {path}.\nReason: {err}", path = path.display()))
    }

    fn fill_worksheet(worksheet: &mut Worksheet, table: &RoiTable) -> Result<(), String> {
        worksheet.set_name(WORKSHEET_NAME)
            .map_err(|err| format!("Exporter: Unable to name worksheet.\nReason: {err}"))?;
        let header_format = Format::new().set_bold();
        for (column, header) in table.headers.iter().enumerate() {
            worksheet.write_with_format(0, column as u16, *header, &header_format)
                .map_err(|err| format!("Exporter: Unable to write header row.\nReason: {err}"))?;
        }
        for (row, cells) in table.rows.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                let result = match cell {
                    Cell::Text(text) => worksheet.write(row as u32 + 1, column as u16, text.as_str()),
                    Cell::Integer(number) => worksheet.write(row as u32 + 1, column as u16, *number),
                };
                result.map_err(|err| format!("Exporter: Unable to write data row {row}.\nReason: {err}", row = row + 1))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use Common::annotation::utils::export_schema::ExportSchema;
    use Common::annotation::utils::labeled_roi::LabeledRoi;
    use Common::annotation::utils::rectangle::Rectangle;

    fn sample_table() -> RoiTable {
        let rois = [LabeledRoi::new(Rectangle::new(10, 20, 30, 40), "Lesion".to_string(), "L1".to_string())];
        RoiTable::build(&rois, ExportSchema::Corner, true)
    }

    #[test]
    fn buffer_is_a_zip_container() {
        let buffer = SpreadsheetExporter::write_buffer(&sample_table()).unwrap();
        assert!(buffer.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn header_only_table_still_serializes() {
        let table = RoiTable::build(&[], ExportSchema::FourCorner, false);
        let buffer = SpreadsheetExporter::write_buffer(&table).unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn write_file_creates_workbook_on_disk() {
        let path = std::env::temp_dir().join(format!("{}_coordinates.xlsx", Uuid::new_v4()));
        SpreadsheetExporter::write_file(&sample_table(), &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"PK\x03\x04"));
        let _ = std::fs::remove_file(&path);
    }
}
