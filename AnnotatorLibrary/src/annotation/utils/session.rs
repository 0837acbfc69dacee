use uuid::Uuid;
use chrono::{DateTime, Local};
use Common::annotation::utils::labeled_roi::LabeledRoi;

#[derive(Debug, Clone)]
pub struct Session {
    pub uuid: Uuid,
    pub image_filename: String,
    pub image_width: u32,
    pub image_height: u32,
    pub rois: Vec<LabeledRoi>,
    pub last_activity: DateTime<Local>,
}

impl Session {
    pub fn new(uuid: Uuid, image_filename: String, image_width: u32, image_height: u32) -> Self {
        Self {
            uuid,
            image_filename,
            image_width,
            image_height,
            rois: Vec::new(),
            last_activity: Local::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Local::now();
    }

    pub fn idle_seconds(&self) -> i64 {
        Local::now().signed_duration_since(self.last_activity).num_seconds()
    }
}
