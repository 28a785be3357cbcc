mod frame;
mod null_renderer;

pub use frame::{FrameColumns, FrameSeries, FrameValue, RenderFrame};
pub use null_renderer::NullRenderer;

use crate::api::ChartConfiguration;
use crate::core::DataSnapshot;
use crate::error::ConfigResult;

/// Contract implemented by any plotting backend.
///
/// Backends receive a resolved `RenderFrame` plus the rows it was built for,
/// so drawing code never inspects raw configuration.
pub trait ConfigRenderer {
    fn render(&mut self, frame: &RenderFrame, data: &DataSnapshot) -> ConfigResult<()>;
}

/// Builds the frame for `config` and hands it to `renderer`.
pub fn render_configuration<R: ConfigRenderer + ?Sized>(
    renderer: &mut R,
    config: &ChartConfiguration,
    data: &DataSnapshot,
) -> ConfigResult<()> {
    let frame = RenderFrame::build(config, data)?;
    renderer.render(&frame, data)
}
