use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom_right(&self) -> (u32, u32) {
        (self.x + self.width, self.y + self.height)
    }

    //Fixed order: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [(u32, u32); 4] {
        let (right, bottom) = self.bottom_right();
        [
            (self.x, self.y),
            (right, self.y),
            (self.x, bottom),
            (right, bottom),
        ]
    }

    pub fn validate(&self, image_width: u32, image_height: u32) -> Result<(), String> {
        let right = self.x.checked_add(self.width)
            .ok_or(format!("Region x coordinate overflow with width {width}.", width = self.width))?;
        let bottom = self.y.checked_add(self.height)
            .ok_or(format!("Region y coordinate overflow with height {height}.", height = self.height))?;
        if right > image_width || bottom > image_height {
            return Err(format!("Region ({x}, {y}) {width}x{height} exceeds image bounds {image_width}x{image_height}.",
                x = self.x, y = self.y, width = self.width, height = self.height));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_right_preserves_size() {
        let rectangle = Rectangle::new(10, 20, 30, 40);
        let (right, bottom) = rectangle.bottom_right();
        assert_eq!(right - rectangle.x, rectangle.width);
        assert_eq!(bottom - rectangle.y, rectangle.height);
    }

    #[test]
    fn corners_in_fixed_order() {
        let rectangle = Rectangle::new(10, 20, 30, 40);
        assert_eq!(rectangle.corners(), [(10, 20), (40, 20), (10, 60), (40, 60)]);
    }

    #[test]
    fn zero_size_region_collapses_to_point() {
        let rectangle = Rectangle::new(5, 7, 0, 0);
        assert_eq!(rectangle.corners(), [(5, 7); 4]);
    }

    #[test]
    fn validate_accepts_edge_touching_region() {
        let rectangle = Rectangle::new(20, 30, 80, 70);
        assert!(rectangle.validate(100, 100).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_bounds_region() {
        let rectangle = Rectangle::new(90, 90, 20, 20);
        assert!(rectangle.validate(100, 100).is_err());
    }

    #[test]
    fn validate_rejects_coordinate_overflow() {
        let rectangle = Rectangle::new(u32::MAX, 0, 1, 0);
        assert!(rectangle.validate(u32::MAX, u32::MAX).is_err());
    }
}
