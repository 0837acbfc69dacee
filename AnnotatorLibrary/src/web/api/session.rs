use uuid::Uuid;
use std::str::FromStr;
use actix_files::NamedFile;
use serde::{Serialize, Deserialize};
use actix_web::{delete, get, post, web, Scope, HttpRequest, HttpResponse, Responder};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use Common::annotation::utils::export_schema::ExportSchema;
use Common::annotation::utils::labeled_roi::LabeledRoi;
use Common::annotation::utils::rectangle::Rectangle;
use crate::utils::logging::*;
use crate::web::utils::response::OperationStatus;
use crate::annotation::exporter::{SpreadsheetExporter, SPREADSHEET_MIME};
use crate::annotation::file_manager::FileManager;
use crate::annotation::roi_table::RoiTable;
use crate::annotation::session_manager::SessionManager;

pub fn initialize() -> Scope {
    web::scope("/session")
        .service(session_info)
        .service(list_rois)
        .service(add_roi)
        .service(update_labels)
        .service(remove_roi)
        .service(clear_rois)
        .service(preview)
        .service(export_download)
        .service(export_save)
        .service(download_result)
}

#[derive(Serialize, Deserialize, Clone)]
struct RoiForm {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    code: String,
}

impl RoiForm {
    fn into_labeled_roi(self) -> LabeledRoi {
        LabeledRoi::new(Rectangle::new(self.x, self.y, self.width, self.height), self.name, self.code)
    }
}

#[derive(Serialize, Deserialize, Clone)]
struct LabelForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    code: String,
}

#[derive(Deserialize)]
struct ExportOptions {
    filter: Option<bool>,
}

#[get("/{session_id}/info")]
async fn session_info(session_id: web::Path<Uuid>) -> impl Responder {
    match SessionManager::get_session_info(session_id.into_inner()).await {
        Some(session_info) => HttpResponse::Ok().json(session_info),
        None => HttpResponse::NotFound().json(OperationStatus::new(false, Some("Session not found.".to_string()))),
    }
}

#[get("/{session_id}/rois")]
async fn list_rois(session_id: web::Path<Uuid>) -> impl Responder {
    match SessionManager::get_rois(session_id.into_inner()).await {
        Some(rois) => HttpResponse::Ok().json(rois),
        None => HttpResponse::NotFound().json(OperationStatus::new(false, Some("Session not found.".to_string()))),
    }
}

#[post("/{session_id}/roi")]
async fn add_roi(session_id: web::Path<Uuid>, form: web::Json<RoiForm>) -> impl Responder {
    let session_id = session_id.into_inner();
    let roi = form.into_inner().into_labeled_roi();
    let rectangle = roi.rectangle;
    match SessionManager::add_roi(session_id, roi).await {
        Ok(_) => {
            logging_information!(session_id, "Session", format!("Region added at ({x}, {y}) size {width}x{height}",
                x = rectangle.x, y = rectangle.y, width = rectangle.width, height = rectangle.height), "");
            HttpResponse::Ok().json(OperationStatus::new(true, None))
        },
        Err(err) => HttpResponse::BadRequest().json(OperationStatus::new(false, Some(err))),
    }
}

#[post("/{session_id}/roi/{index}/labels")]
async fn update_labels(argument: web::Path<(Uuid, usize)>, form: web::Json<LabelForm>) -> impl Responder {
    let (session_id, index) = argument.into_inner();
    let form = form.into_inner();
    match SessionManager::update_labels(session_id, index, form.name, form.code).await {
        Ok(_) => HttpResponse::Ok().json(OperationStatus::new(true, None)),
        Err(err) => HttpResponse::BadRequest().json(OperationStatus::new(false, Some(err))),
    }
}

#[delete("/{session_id}/roi/{index}")]
async fn remove_roi(argument: web::Path<(Uuid, usize)>) -> impl Responder {
    let (session_id, index) = argument.into_inner();
    match SessionManager::remove_roi(session_id, index).await {
        Ok(_) => HttpResponse::Ok().json(OperationStatus::new(true, None)),
        Err(err) => HttpResponse::BadRequest().json(OperationStatus::new(false, Some(err))),
    }
}

#[delete("/{session_id}/rois")]
async fn clear_rois(session_id: web::Path<Uuid>) -> impl Responder {
    match SessionManager::clear_rois(session_id.into_inner()).await {
        Ok(_) => HttpResponse::Ok().json(OperationStatus::new(true, None)),
        Err(err) => HttpResponse::BadRequest().json(OperationStatus::new(false, Some(err))),
    }
}

#[get("/{session_id}/preview")]
async fn preview(session_id: web::Path<Uuid>) -> impl Responder {
    let session_id = session_id.into_inner();
    let session = match SessionManager::clone_session(session_id).await {
        Some(session) => session,
        None => return HttpResponse::NotFound().json(OperationStatus::new(false, Some("Session not found.".to_string()))),
    };
    match FileManager::render_preview(&session).await {
        Ok(buffer) => HttpResponse::Ok().content_type("image/png").body(buffer),
        Err(err) => {
            logging_error!(session_id, "Session", "Unable to render preview", err);
            HttpResponse::InternalServerError().json(OperationStatus::new(false, None))
        },
    }
}

#[get("/{session_id}/export/{schema}")]
async fn export_download(argument: web::Path<(Uuid, String)>, options: web::Query<ExportOptions>) -> impl Responder {
    let (session_id, schema) = argument.into_inner();
    let (table, schema) = match build_table(session_id, &schema, options.filter).await {
        Ok(built) => built,
        Err(response) => return response,
    };
    match SpreadsheetExporter::write_buffer(&table) {
        Ok(buffer) => {
            logging_information!(session_id, "Session", format!("Exported {rows} rows with the {schema} schema", rows = table.rows.len()), "");
            HttpResponse::Ok()
                .content_type(SPREADSHEET_MIME)
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![
                        DispositionParam::Filename(schema.default_file_name().to_string()),
                    ],
                })
                .body(buffer)
        },
        Err(err) => {
            logging_error!(session_id, "Session", "Unable to serialize spreadsheet", err);
            HttpResponse::InternalServerError().json(OperationStatus::new(false, None))
        },
    }
}

#[post("/{session_id}/export/{schema}/save")]
async fn export_save(argument: web::Path<(Uuid, String)>, options: web::Query<ExportOptions>) -> impl Responder {
    let (session_id, schema) = argument.into_inner();
    let (table, schema) = match build_table(session_id, &schema, options.filter).await {
        Ok(built) => built,
        Err(response) => return response,
    };
    let result_filename = format!("{}_{}", session_id, schema.default_file_name());
    match SpreadsheetExporter::write_file(&table, &FileManager::result_path(&result_filename)) {
        Ok(_) => {
            logging_information!(session_id, "Session", format!("Saved {rows} rows to {result_filename}", rows = table.rows.len()), "");
            HttpResponse::Ok().json(OperationStatus::new(true, Some(result_filename)))
        },
        Err(err) => {
            logging_error!(session_id, "Session", "Unable to write spreadsheet", err);
            HttpResponse::InternalServerError().json(OperationStatus::new(false, None))
        },
    }
}

#[get("/{session_id}/result/{filename}")]
async fn download_result(req: HttpRequest, argument: web::Path<(Uuid, String)>) -> impl Responder {
    let (session_id, filename) = argument.into_inner();
    let filename = sanitize_filename::sanitize(filename);
    if !filename.starts_with(&session_id.to_string()) {
        return HttpResponse::NotFound().finish();
    }
    let file_path = FileManager::result_path(&filename);
    match NamedFile::open_async(&file_path).await {
        Ok(named_file) => {
            let content_disposition = ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![
                    DispositionParam::Filename(filename.clone()),
                ],
            };
            named_file
                .set_content_disposition(content_disposition)
                .set_content_type(mime_guess::from_path(&file_path).first_or_octet_stream())
                .into_response(&req)
        },
        Err(_) => HttpResponse::NotFound().finish(),
    }
}

async fn build_table(session_id: Uuid, schema_str: &str, filter: Option<bool>) -> Result<(RoiTable, ExportSchema), HttpResponse> {
    let schema = ExportSchema::from_str(schema_str)
        .map_err(|_| HttpResponse::BadRequest().json(OperationStatus::new(false, Some("Invalid export schema.".to_string()))))?;
    let rois = SessionManager::get_rois(session_id).await
        .ok_or(HttpResponse::NotFound().json(OperationStatus::new(false, Some("Session not found.".to_string()))))?;
    let require_labels = filter.unwrap_or(schema.default_filter());
    let table = RoiTable::build(&rois, schema, require_labels);
    if table.is_empty() {
        return Err(HttpResponse::BadRequest().json(OperationStatus::new(false, Some("No valid ROIs to save.".to_string()))));
    }
    Ok((table, schema))
}
