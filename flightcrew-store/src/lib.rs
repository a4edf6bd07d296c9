pub mod app_config;
pub mod amadeus;
pub mod inquiry;

pub use amadeus::AmadeusClient;
pub use app_config::Config;
pub use inquiry::load_inquiry;
