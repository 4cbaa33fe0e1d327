pub mod labels;
pub mod layout;
pub mod panel;
pub mod surface;
pub mod text;

pub use labels::{LabelSet, WeatherLabel};
pub use panel::{MemorySink, Panel, PanelSink, TerminalSink};
pub use surface::{DisplaySurface, SurfaceGuard};
pub use text::{BoundedText, LabelText, LABEL_CAPACITY};
