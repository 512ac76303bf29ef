pub mod panels;
pub mod spec;

pub use panels::{PageKind, PageLayout, PanelDescriptor, TimeAxis, TimeEncoding, TimeUnit, ValueType};
pub use spec::{build, ChartSpec, Panel};
