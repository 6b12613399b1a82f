use geoproc_core::Processor;
use geoproc_geo::GeoEngine;

#[derive(Debug, Clone)]
pub struct AppState {
    pub processor: Processor<GeoEngine>,
}

impl AppState {
    pub fn new(processor: Processor<GeoEngine>) -> Self {
        Self { processor }
    }
}
