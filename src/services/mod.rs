pub mod generator_service;
pub mod hosting_service;
pub mod share_links;

pub use generator_service::GeneratorService;
pub use hosting_service::{CloudinaryHost, ImageHost};
