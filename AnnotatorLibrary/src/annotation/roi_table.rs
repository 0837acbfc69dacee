use Common::annotation::utils::export_schema::ExportSchema;
use Common::annotation::utils::labeled_roi::LabeledRoi;

pub const CORNER_HEADERS: [&str; 7] = ["ROI", "Name", "Code", "Top-Left X", "Top-Left Y", "Bottom-Right X", "Bottom-Right Y"];
pub const FOUR_CORNER_HEADERS: [&str; 6] = ["ROI", "Name", "Code", "Coordinate", "X", "Y"];
pub const COORDINATE_LABELS: [&str; 4] = ["Top-Left", "Top-Right", "Bottom-Left", "Bottom-Right"];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u32),
}

#[derive(Debug, Clone)]
pub struct RoiTable {
    pub schema: ExportSchema,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

impl RoiTable {
    //Pure reshaping. Region geometry is taken as handed in, validation happens at ingestion.
    pub fn build(rois: &[LabeledRoi], schema: ExportSchema, require_labels: bool) -> Self {
        let rows = rois.iter().enumerate()
            .filter(|(_, roi)| !require_labels || roi.has_complete_labels())
            .flat_map(|(index, roi)| match schema {
                ExportSchema::Corner => vec![Self::corner_row(index, roi)],
                ExportSchema::FourCorner => Self::four_corner_rows(index, roi),
            })
            .collect();
        Self {
            schema,
            headers: match schema {
                ExportSchema::Corner => &CORNER_HEADERS,
                ExportSchema::FourCorner => &FOUR_CORNER_HEADERS,
            },
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn roi_label(index: usize) -> String {
        format!("ROI {}", index + 1)
    }

    fn corner_row(index: usize, roi: &LabeledRoi) -> Vec<Cell> {
        let rectangle = &roi.rectangle;
        let (right, bottom) = rectangle.bottom_right();
        vec![
            Cell::Text(Self::roi_label(index)),
            Cell::Text(roi.name.clone()),
            Cell::Text(roi.code.clone()),
            Cell::Integer(rectangle.x),
            Cell::Integer(rectangle.y),
            Cell::Integer(right),
            Cell::Integer(bottom),
        ]
    }

    fn four_corner_rows(index: usize, roi: &LabeledRoi) -> Vec<Vec<Cell>> {
        roi.rectangle.corners().iter().zip(COORDINATE_LABELS)
            .map(|(&(x, y), coordinate)| vec![
                Cell::Text(Self::roi_label(index)),
                Cell::Text(roi.name.clone()),
                Cell::Text(roi.code.clone()),
                Cell::Text(coordinate.to_string()),
                Cell::Integer(x),
                Cell::Integer(y),
            ])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Common::annotation::utils::rectangle::Rectangle;

    fn roi(x: u32, y: u32, width: u32, height: u32, name: &str, code: &str) -> LabeledRoi {
        LabeledRoi::new(Rectangle::new(x, y, width, height), name.to_string(), code.to_string())
    }

    #[test]
    fn corner_schema_worked_example() {
        let table = RoiTable::build(&[roi(10, 20, 30, 40, "Lesion", "L1")], ExportSchema::Corner, true);
        assert_eq!(table.headers, &CORNER_HEADERS);
        assert_eq!(table.rows, vec![vec![
            Cell::Text("ROI 1".to_string()),
            Cell::Text("Lesion".to_string()),
            Cell::Text("L1".to_string()),
            Cell::Integer(10),
            Cell::Integer(20),
            Cell::Integer(40),
            Cell::Integer(60),
        ]]);
    }

    #[test]
    fn four_corner_schema_worked_example() {
        let table = RoiTable::build(&[roi(10, 20, 30, 40, "Lesion", "L1")], ExportSchema::FourCorner, false);
        assert_eq!(table.headers, &FOUR_CORNER_HEADERS);
        assert_eq!(table.rows.len(), 4);
        let coordinates: Vec<(Cell, Cell, Cell)> = table.rows.iter()
            .map(|row| (row[3].clone(), row[4].clone(), row[5].clone()))
            .collect();
        assert_eq!(coordinates, vec![
            (Cell::Text("Top-Left".to_string()), Cell::Integer(10), Cell::Integer(20)),
            (Cell::Text("Top-Right".to_string()), Cell::Integer(40), Cell::Integer(20)),
            (Cell::Text("Bottom-Left".to_string()), Cell::Integer(10), Cell::Integer(60)),
            (Cell::Text("Bottom-Right".to_string()), Cell::Integer(40), Cell::Integer(60)),
        ]);
        for row in &table.rows {
            assert_eq!(row[0], Cell::Text("ROI 1".to_string()));
        }
    }

    #[test]
    fn corner_schema_filters_incomplete_labels() {
        let rois = [
            roi(0, 0, 10, 10, "Lesion", "L1"),
            roi(10, 10, 10, 10, "Unnamed", ""),
            roi(20, 20, 10, 10, "", "L3"),
            roi(30, 30, 10, 10, "Nodule", "N1"),
        ];
        let table = RoiTable::build(&rois, ExportSchema::Corner, true);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], Cell::Text("ROI 1".to_string()));
        //Positional identity survives filtering.
        assert_eq!(table.rows[1][0], Cell::Text("ROI 4".to_string()));
    }

    #[test]
    fn four_corner_schema_exports_every_roi() {
        let rois = [
            roi(0, 0, 10, 10, "", ""),
            roi(10, 10, 10, 10, "Lesion", "L1"),
            roi(20, 20, 10, 10, "Nodule", ""),
        ];
        let table = RoiTable::build(&rois, ExportSchema::FourCorner, ExportSchema::FourCorner.default_filter());
        assert_eq!(table.rows.len(), 4 * rois.len());
    }

    #[test]
    fn empty_input_builds_header_only_table() {
        let table = RoiTable::build(&[], ExportSchema::Corner, true);
        assert!(table.is_empty());
        assert_eq!(table.headers, &CORNER_HEADERS);
    }

    #[test]
    fn all_filtered_out_builds_header_only_table() {
        let table = RoiTable::build(&[roi(0, 0, 5, 5, "", "")], ExportSchema::Corner, true);
        assert!(table.is_empty());
    }

    #[test]
    fn filter_flag_overrides_schema_default() {
        let rois = [roi(0, 0, 5, 5, "", "")];
        let unfiltered = RoiTable::build(&rois, ExportSchema::Corner, false);
        assert_eq!(unfiltered.rows.len(), 1);
        let filtered = RoiTable::build(&rois, ExportSchema::FourCorner, true);
        assert!(filtered.is_empty());
    }

    #[test]
    fn corner_arithmetic_preserves_size() {
        let rois = [roi(3, 4, 0, 7, "Strip", "S1")];
        let table = RoiTable::build(&rois, ExportSchema::Corner, true);
        let row = &table.rows[0];
        match (&row[3], &row[5]) {
            (Cell::Integer(left), Cell::Integer(right)) => assert_eq!(right - left, 0),
            _ => panic!("coordinate columns must be numeric"),
        }
        match (&row[4], &row[6]) {
            (Cell::Integer(top), Cell::Integer(bottom)) => assert_eq!(bottom - top, 7),
            _ => panic!("coordinate columns must be numeric"),
        }
    }
}
