use uuid::Uuid;
use tokio::fs::File;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use actix_multipart::{Field, Multipart};
use sanitize_filename::sanitize;
use futures::{StreamExt, TryStreamExt};
use actix_web::{get, post, web, Scope, HttpResponse, Responder};
use crate::utils::config::Config;
use crate::utils::static_files::StaticFiles;
use crate::web::utils::response::OperationStatus;
use crate::annotation::file_manager::FileManager;
use crate::annotation::session_manager::SessionManager;

pub fn initialize() -> Scope {
    web::scope("/annotate")
        .service(page)
        .service(upload_image)
}

#[get("")]
async fn page() -> impl Responder {
    let html = StaticFiles::get("html/annotate.html").expect("File not found in static files.").data;
    HttpResponse::Ok().content_type("text/html").body(html.into_owned())
}

#[post("/upload_image")]
async fn upload_image(mut payload: Multipart) -> impl Responder {
    let uuid = Uuid::new_v4();
    let max_upload_size = Config::now().await.max_upload_size;
    let mut image_filename = String::new();
    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let (field_name, mut file_name) = match (content_disposition.get_name(), content_disposition.get_filename()) {
            (Some(field_name), Some(file_name)) => (field_name, sanitize(file_name)),
            _ => return HttpResponse::BadRequest().json(OperationStatus::new(false, Some("Invalid payload.".to_string()))),
        };
        if file_name.is_empty() {
            return HttpResponse::BadRequest().json(OperationStatus::new(false, Some("Invalid filename.".to_string())));
        }
        file_name = format!("{}_{}", uuid, file_name);
        let file_extension = Path::new(&file_name).extension().and_then(|os_str| os_str.to_str()).unwrap_or("");
        let file_path = match (field_name, file_extension) {
            ("imageFile", "png" | "jpg" | "jpeg") => {
                image_filename = file_name.clone();
                FileManager::image_path(&file_name)
            },
            _ => return HttpResponse::BadRequest().json(OperationStatus::new(false, Some("Invalid file type or extension.".to_string()))),
        };
        if let Err(response) = create_file(&file_path, &mut field, max_upload_size).await {
            FileManager::remove_image(&image_filename).await;
            return response;
        }
    }
    if image_filename.is_empty() {
        return HttpResponse::BadRequest().json(OperationStatus::new(false, Some("No image file in payload.".to_string())));
    }
    match FileManager::probe_dimensions(&FileManager::image_path(&image_filename)) {
        Ok((image_width, image_height)) => {
            let session_info = SessionManager::create_session(image_filename, image_width, image_height).await;
            HttpResponse::Ok().json(session_info)
        },
        Err(_) => {
            FileManager::remove_image(&image_filename).await;
            HttpResponse::BadRequest().json(OperationStatus::new(false, Some("Unable to decode image.".to_string())))
        },
    }
}

async fn create_file(file_path: &Path, field: &mut Field, max_upload_size: u64) -> Result<(), HttpResponse> {
    let mut file = File::create(file_path).await
        .map_err(|_| HttpResponse::InternalServerError().json(OperationStatus::new(false, None)))?;
    let mut written = 0_u64;
    while let Some(chunk) = field.next().await {
        let data = chunk
            .map_err(|_| HttpResponse::InternalServerError().json(OperationStatus::new(false, None)))?;
        written += data.len() as u64;
        if written > max_upload_size {
            return Err(HttpResponse::BadRequest().json(OperationStatus::new(false, Some("Image file exceeds the upload size limit.".to_string()))));
        }
        file.write_all(&data).await
            .map_err(|_| HttpResponse::InternalServerError().json(OperationStatus::new(false, None)))?;
    }
    Ok(())
}
