mod impact_render_coordinator;
mod impact_state;
mod render_frame;

pub use impact_render_coordinator::ImpactRenderCoordinator;
pub use impact_state::{DisruptionLocation, ImpactState, ImpactStatus};
pub use render_frame::{RenderFrame, RenderedSegment};
