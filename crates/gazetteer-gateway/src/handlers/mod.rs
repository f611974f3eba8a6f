mod city;
mod health;
mod import;

pub use city::{
    create_city_handler, delete_city_handler, get_city_handler, list_capitals_handler,
    list_cities_by_state_handler, list_cities_handler, update_city_handler,
};
pub use health::health_handler;
pub use import::upload_csv_handler;
