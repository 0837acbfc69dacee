use tokio::time::sleep;
use std::time::Duration;
use lazy_static::lazy_static;
use actix_web::{web, App, HttpServer};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::annotation::file_manager::FileManager;
use crate::annotation::session_manager::SessionManager;
use crate::web::api;
use crate::web::page;

lazy_static! {
    static ref ANNOTATOR: RwLock<Annotator> = RwLock::new(Annotator::new());
}

pub struct Annotator {
    terminate: bool,
}

impl Annotator {
    fn new() -> Self {
        Self {
            terminate: false,
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        ANNOTATOR.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        ANNOTATOR.write().await
    }

    pub async fn run() {
        Config::now().await;
        FileManager::run().await;
        SessionManager::run().await;
        let http_server = loop {
            if Self::instance().await.terminate {
                return;
            }
            let config = Config::now().await;
            let http_server = HttpServer::new(|| {
                App::new()
                    .service(page::annotate::initialize())
                    .service(page::config::initialize())
                    .service(page::log::initialize())
                    .service(page::misc::initialize())
                    .service(api::session::initialize())
                    .service(api::javascript::initialize())
                    .default_service(web::route().to(api::default::default_route))
            }).bind(format!("127.0.0.1:{}", config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_error!("Annotator", "Http service bind port failed", format!("Err: {err}"));
                    sleep(Duration::from_secs(config.bind_retry_duration)).await;
                    continue;
                },
            }
        };
        logging_information!("Annotator", "Web service ready");
        logging_information!("Annotator", "Online now");
        if let Err(err) = http_server.run().await {
            logging_error!("Annotator", "Error while Http service running", format!("Err: {err}"));
        }
    }

    pub async fn terminate() {
        logging_information!("Annotator", "Termination in progress");
        SessionManager::terminate().await;
        FileManager::terminate().await;
        Self::instance_mut().await.terminate = true;
        logging_information!("Annotator", "Termination complete");
    }
}
