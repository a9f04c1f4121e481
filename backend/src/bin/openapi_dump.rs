//! Print the OpenAPI document as JSON.

use backend::doc::ApiDoc;
use utoipa::OpenApi;

fn main() {
    match ApiDoc::openapi().to_json() {
        Ok(json) => println!("{json}"),
        Err(error) => {
            eprintln!("failed to serialize OpenAPI document: {error}");
            std::process::exit(1);
        }
    }
}
