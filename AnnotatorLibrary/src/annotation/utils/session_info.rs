use uuid::Uuid;
use serde::{Serialize, Deserialize};
use crate::annotation::utils::session::Session;

#[derive(Serialize, Deserialize, Clone)]
pub struct SessionInfo {
    pub uuid: Uuid,
    pub image_filename: String,
    pub image_width: u32,
    pub image_height: u32,
    pub roi_count: usize,
}

impl SessionInfo {
    pub fn new(session: &Session) -> Self {
        Self {
            uuid: session.uuid,
            image_filename: session.image_filename.clone(),
            image_width: session.image_width,
            image_height: session.image_height,
            roi_count: session.rois.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_for_the_browser() {
        let session = Session::new(Uuid::nil(), "demo.png".to_string(), 640, 480);
        let session_info = SessionInfo::new(&session);
        let json = serde_json::to_value(&session_info).unwrap();
        assert_eq!(json["image_width"], 640);
        assert_eq!(json["roi_count"], 0);
        assert_eq!(json["image_filename"], "demo.png");
    }
}
