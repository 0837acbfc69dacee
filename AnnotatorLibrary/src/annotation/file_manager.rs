use tokio::fs;
use std::io::Cursor;
use imageproc::rect::Rect;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use ab_glyph::{FontVec, PxScale};
use std::path::{Path, PathBuf};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use Common::annotation::utils::labeled_roi::LabeledRoi;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::annotation::utils::session::Session;

pub struct FileManager;

impl FileManager {
    pub async fn run() {
        Self::initialize().await;
        logging_information!("File Manager", "Online now");
    }

    async fn initialize() {
        logging_information!("File Manager", "Initializing");
        let folders = ["SavedImage", "Result"];
        for &folder_name in &folders {
            match fs::create_dir(folder_name).await {
                Ok(_) => logging_information!("File Manager", format!("Create {folder_name} folder successfully")),
                Err(err) => logging_error!("File Manager", format!("Cannot create {folder_name} folder"), format!("Err: {err}")),
            }
        }
        logging_information!("File Manager", "Initialization completed");
    }

    pub async fn terminate() {
        logging_information!("File Manager", "Termination in progress");
        Self::cleanup().await;
        logging_information!("File Manager", "Termination complete");
    }

    async fn cleanup() {
        let folders = ["SavedImage", "Result"];
        for &folder_name in &folders {
            match fs::remove_dir_all(folder_name).await {
                Ok(_) => logging_information!("File Manager", format!("Deleted {folder_name} folder successfully")),
                Err(err) => logging_error!("File Manager", format!("Cannot delete {folder_name} folder"), format!("Err: {err}")),
            }
        }
    }

    pub fn image_path(image_filename: &str) -> PathBuf {
        Path::new(".").join("SavedImage").join(image_filename)
    }

    pub fn result_path(result_filename: &str) -> PathBuf {
        Path::new(".").join("Result").join(result_filename)
    }

    pub async fn remove_image(image_filename: &str) {
        let image_path = Self::image_path(image_filename);
        if let Err(err) = fs::remove_file(&image_path).await {
            logging_error!("File Manager", format!("Cannot delete file {image_path}", image_path = image_path.display()), format!("Err: {err}"));
        }
    }

    pub fn probe_dimensions(image_path: &Path) -> Result<(u32, u32), String> {
        image::image_dimensions(image_path)
            .map_err(|err| format!("File Manager: Unable to decode image {image_path}.\nReason: {err}", image_path = image_path.display()))
    }

    pub async fn render_preview(session: &Session) -> Result<Vec<u8>, String> {
        let config = Config::now().await;
        let font_path = &config.font_path;
        let font_data = fs::read(font_path).await
            .map_err(|err| format!("File Manager: Cannot read file {font_path}.\nReason: {err}"))?;
        let font = FontVec::try_from_vec(font_data)
            .map_err(|_| "File Manager: Unable to parse font data.".to_string())?;
        let image = Self::draw_regions(session, &config, &font)?;
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|err| format!("File Manager: Unable to encode preview image.\nReason: {err}"))?;
        Ok(buffer)
    }

    fn draw_regions(session: &Session, config: &Config, font: &FontVec) -> Result<RgbImage, String> {
        let border_color = Rgb(config.border_color);
        let text_color = Rgb(config.text_color);
        let image_path = Self::image_path(&session.image_filename);
        let mut image = image::open(&image_path)
            .map_err(|err| format!("File Manager: Cannot read file {image_path}.\nReason: {err}", image_path = image_path.display()))?
            .to_rgb8();
        for (index, roi) in session.rois.iter().enumerate() {
            let rectangle = &roi.rectangle;
            //A zero-sized region still gets a visible one pixel marker.
            let base_rectangle = Rect::at(rectangle.x as i32, rectangle.y as i32)
                .of_size(rectangle.width.max(1), rectangle.height.max(1));
            for i in 0..config.border_width {
                let offset_rectangle = Rect::at(base_rectangle.left() - i as i32, base_rectangle.top() - i as i32)
                    .of_size(base_rectangle.width() + 2 * i, base_rectangle.height() + 2 * i);
                draw_hollow_rect_mut(&mut image, offset_rectangle, border_color);
            }
            let text = Self::region_caption(index, roi);
            let scale = PxScale::from(config.font_size);
            let position_x = rectangle.x as i32;
            let position_y = (rectangle.y + rectangle.height + config.border_width + 10) as i32;
            draw_text_mut(&mut image, text_color, position_x, position_y, scale, font, &text);
        }
        Ok(image)
    }

    fn region_caption(index: usize, roi: &LabeledRoi) -> String {
        if roi.has_complete_labels() {
            format!("{name}: {code}", name = roi.name, code = roi.code)
        } else {
            format!("ROI {}", index + 1)
        }
    }
}
