use crate::core::DataSnapshot;
use crate::error::ConfigResult;
use crate::render::{ConfigRenderer, RenderFrame};

/// No-op renderer used by tests and headless engine usage.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_series_count: usize,
    pub last_value_count: usize,
    pub last_row_count: usize,
}

impl ConfigRenderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame, data: &DataSnapshot) -> ConfigResult<()> {
        self.last_series_count = frame.series.len();
        self.last_value_count = frame.values.len();
        self.last_row_count = data.rows().len();
        Ok(())
    }
}
