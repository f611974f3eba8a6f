use std::sync::Arc;

use gazetteer_core::CityDirectory;

#[derive(Clone)]
pub struct AppState {
    directory: Arc<dyn CityDirectory>,
}

impl AppState {
    pub fn new(directory: Arc<dyn CityDirectory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &dyn CityDirectory {
        self.directory.as_ref()
    }
}
