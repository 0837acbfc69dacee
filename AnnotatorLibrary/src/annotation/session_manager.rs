use uuid::Uuid;
use tokio::time::sleep;
use std::time::Duration;
use lazy_static::lazy_static;
use std::collections::HashMap;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use Common::annotation::utils::labeled_roi::LabeledRoi;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::annotation::file_manager::FileManager;
use crate::annotation::utils::session::Session;
use crate::annotation::utils::session_info::SessionInfo;

lazy_static! {
    static ref SESSION_MANAGER: RwLock<SessionManager> = RwLock::new(SessionManager::new());
}

pub struct SessionManager {
    sessions: HashMap<Uuid, Session>,
    terminate: bool,
}

impl SessionManager {
    fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            terminate: false,
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        SESSION_MANAGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        SESSION_MANAGER.write().await
    }

    pub async fn run() {
        tokio::spawn(async {
            Self::expire_sessions().await;
        });
        logging_information!("Session Manager", "Online now");
    }

    pub async fn terminate() {
        logging_information!("Session Manager", "Termination in progress");
        Self::instance_mut().await.terminate = true;
        logging_information!("Session Manager", "Termination complete");
    }

    async fn expire_sessions() {
        let config = Config::now().await;
        while !Self::instance().await.terminate {
            let idle_duration = Config::now().await.session_idle_duration as i64;
            let expired: Vec<Uuid> = Self::instance().await.sessions.values()
                .filter(|session| session.idle_seconds() > idle_duration)
                .map(|session| session.uuid)
                .collect();
            for session_id in expired {
                if let Some(session) = Self::remove_session(session_id).await {
                    FileManager::remove_image(&session.image_filename).await;
                    logging_information!("Session Manager", format!("Session {session_id} expired after idle timeout"));
                }
            }
            sleep(Duration::from_secs(config.refresh_interval)).await;
        }
    }

    pub async fn create_session(image_filename: String, image_width: u32, image_height: u32) -> SessionInfo {
        let session_id = Uuid::new_v4();
        let session = Session::new(session_id, image_filename, image_width, image_height);
        let session_info = SessionInfo::new(&session);
        let mut session_manager = Self::instance_mut().await;
        session_manager.sessions.insert(session_id, session);
        drop(session_manager);
        logging_information!(session_id, "Session Manager", "Session created", "");
        session_info
    }

    pub async fn remove_session(session_id: Uuid) -> Option<Session> {
        let mut session_manager = Self::instance_mut().await;
        let session = session_manager.sessions.remove(&session_id);
        drop(session_manager);
        if session.is_some() {
            Logger::remove_session_log(session_id).await;
        }
        session
    }

    pub async fn get_session_info(session_id: Uuid) -> Option<SessionInfo> {
        let session_manager = Self::instance().await;
        session_manager.sessions.get(&session_id).map(SessionInfo::new)
    }

    pub async fn clone_session(session_id: Uuid) -> Option<Session> {
        let session_manager = Self::instance().await;
        session_manager.sessions.get(&session_id).cloned()
    }

    pub async fn get_rois(session_id: Uuid) -> Option<Vec<LabeledRoi>> {
        let mut session_manager = Self::instance_mut().await;
        let session = session_manager.sessions.get_mut(&session_id)?;
        session.touch();
        Some(session.rois.clone())
    }

    pub async fn add_roi(session_id: Uuid, roi: LabeledRoi) -> Result<(), String> {
        let mut session_manager = Self::instance_mut().await;
        let session = session_manager.sessions.get_mut(&session_id)
            .ok_or(format!("Session Manager: Session {session_id} does not exist."))?;
        roi.rectangle.validate(session.image_width, session.image_height)
            .map_err(|err| format!("Session Manager: Invalid region.\nReason: {err}"))?;
        session.rois.push(roi);
        session.touch();
        Ok(())
    }

    pub async fn update_labels(session_id: Uuid, index: usize, name: String, code: String) -> Result<(), String> {
        let mut session_manager = Self::instance_mut().await;
        let session = session_manager.sessions.get_mut(&session_id)
            .ok_or(format!("Session Manager: Session {session_id} does not exist."))?;
        let roi = session.rois.get_mut(index)
            .ok_or(format!("Session Manager: Region index {index} does not exist."))?;
        roi.name = name;
        roi.code = code;
        session.touch();
        Ok(())
    }

    pub async fn remove_roi(session_id: Uuid, index: usize) -> Result<(), String> {
        let mut session_manager = Self::instance_mut().await;
        let session = session_manager.sessions.get_mut(&session_id)
            .ok_or(format!("Session Manager: Session {session_id} does not exist."))?;
        if index >= session.rois.len() {
            return Err(format!("Session Manager: Region index {index} does not exist."));
        }
        session.rois.remove(index);
        session.touch();
        Ok(())
    }

    //The canvas regenerates its rectangle list wholesale on redraw.
    pub async fn clear_rois(session_id: Uuid) -> Result<(), String> {
        let mut session_manager = Self::instance_mut().await;
        let session = session_manager.sessions.get_mut(&session_id)
            .ok_or(format!("Session Manager: Session {session_id} does not exist."))?;
        session.rois.clear();
        session.touch();
        Ok(())
    }

    pub async fn size() -> usize {
        Self::instance().await.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Common::annotation::utils::rectangle::Rectangle;

    async fn test_session() -> Uuid {
        SessionManager::create_session("test.png".to_string(), 100, 100).await.uuid
    }

    fn roi(x: u32, y: u32, width: u32, height: u32) -> LabeledRoi {
        LabeledRoi::new(Rectangle::new(x, y, width, height), "Lesion".to_string(), "L1".to_string())
    }

    #[tokio::test]
    async fn add_roi_within_bounds() {
        let session_id = test_session().await;
        assert!(SessionManager::add_roi(session_id, roi(10, 10, 50, 50)).await.is_ok());
        assert_eq!(SessionManager::get_rois(session_id).await.unwrap().len(), 1);
        SessionManager::remove_session(session_id).await;
    }

    #[tokio::test]
    async fn add_roi_out_of_bounds_rejected() {
        let session_id = test_session().await;
        assert!(SessionManager::add_roi(session_id, roi(90, 90, 20, 20)).await.is_err());
        assert!(SessionManager::get_rois(session_id).await.unwrap().is_empty());
        SessionManager::remove_session(session_id).await;
    }

    #[tokio::test]
    async fn add_roi_unknown_session_rejected() {
        assert!(SessionManager::add_roi(Uuid::new_v4(), roi(0, 0, 1, 1)).await.is_err());
    }

    #[tokio::test]
    async fn update_and_remove_roi() {
        let session_id = test_session().await;
        SessionManager::add_roi(session_id, roi(0, 0, 10, 10)).await.unwrap();
        SessionManager::update_labels(session_id, 0, "Nodule".to_string(), "N1".to_string()).await.unwrap();
        let rois = SessionManager::get_rois(session_id).await.unwrap();
        assert_eq!(rois[0].name, "Nodule");
        assert_eq!(rois[0].code, "N1");
        assert!(SessionManager::update_labels(session_id, 5, String::new(), String::new()).await.is_err());
        SessionManager::remove_roi(session_id, 0).await.unwrap();
        assert!(SessionManager::get_rois(session_id).await.unwrap().is_empty());
        SessionManager::remove_session(session_id).await;
    }

    #[tokio::test]
    async fn clear_rois_empties_the_list() {
        let session_id = test_session().await;
        SessionManager::add_roi(session_id, roi(0, 0, 10, 10)).await.unwrap();
        SessionManager::add_roi(session_id, roi(20, 20, 10, 10)).await.unwrap();
        SessionManager::clear_rois(session_id).await.unwrap();
        assert!(SessionManager::get_rois(session_id).await.unwrap().is_empty());
        SessionManager::remove_session(session_id).await;
    }

    #[tokio::test]
    async fn removed_session_is_gone() {
        let session_id = test_session().await;
        assert!(SessionManager::remove_session(session_id).await.is_some());
        assert!(SessionManager::get_session_info(session_id).await.is_none());
    }
}
