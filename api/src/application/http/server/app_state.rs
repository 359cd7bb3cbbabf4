use std::sync::Arc;

use glycoload_core::application::GlycoloadService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: GlycoloadService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: GlycoloadService) -> Self {
        Self { args, service }
    }
}
