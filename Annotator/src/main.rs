#![allow(non_snake_case)]

use AnnotatorLibrary::annotation::manager::Annotator;

#[actix_web::main]
async fn main() {
    Annotator::run().await;
    Annotator::terminate().await;
}
