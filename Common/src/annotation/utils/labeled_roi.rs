use serde::{Serialize, Deserialize};
use crate::annotation::utils::rectangle::Rectangle;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabeledRoi {
    pub rectangle: Rectangle,
    pub name: String,
    pub code: String,
}

impl LabeledRoi {
    pub fn new(rectangle: Rectangle, name: String, code: String) -> Self {
        Self {
            rectangle,
            name,
            code,
        }
    }

    pub fn has_complete_labels(&self) -> bool {
        !self.name.is_empty() && !self.code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_labels_require_both_fields() {
        let rectangle = Rectangle::new(0, 0, 10, 10);
        assert!(LabeledRoi::new(rectangle, "Lesion".to_string(), "L1".to_string()).has_complete_labels());
        assert!(!LabeledRoi::new(rectangle, "Lesion".to_string(), String::new()).has_complete_labels());
        assert!(!LabeledRoi::new(rectangle, String::new(), "L1".to_string()).has_complete_labels());
        assert!(!LabeledRoi::new(rectangle, String::new(), String::new()).has_complete_labels());
    }
}
