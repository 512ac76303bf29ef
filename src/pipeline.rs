//! One pass from page context to a chart ready for rendering.

use crate::chart::{self, ChartSpec, PageKind};
use crate::error::ChartError;
use crate::query::{self, ExtractionPath, PageContext, QuerySource};
use crate::render::RenderTarget;
use crate::window::{self, Clock, TimeWindow, WindowMode};

/// Page the demo chart reads from.
pub const DEMO_PAGE_PATH: &str = "/sensor/10";

/// Window the demo chart is frozen to.
pub const DEMO_WINDOW: TimeWindow = TimeWindow {
    start: 1_548_210_420,
    end: 1_548_220_420,
};

/// A chart request for one kind of page.
#[derive(Debug, Clone, Copy)]
pub enum PageRequest<'a> {
    Readings {
        page: &'a PageContext,
        window: WindowMode,
    },
    EnergyStats {
        page: &'a PageContext,
    },
    Demo,
}

impl PageRequest<'_> {
    #[must_use]
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Readings { .. } => PageKind::Readings,
            Self::EnergyStats { .. } => PageKind::EnergyStats,
            Self::Demo => PageKind::Demo,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageChart {
    pub target: RenderTarget,
    pub spec: ChartSpec,
}

/// Build the chart for a page.
///
/// # Errors
///
/// `ChartError::MissingResourcePath` if a page-scoped chart is requested
/// for a page without a resource, `ChartError::EmptyPanelSet` if the
/// layout has no panels.
pub fn page_chart(
    request: PageRequest<'_>,
    clock: &impl Clock,
    width: u32,
) -> Result<PageChart, ChartError> {
    let layout = request.kind().layout();
    let extraction_path = ExtractionPath::new(layout.extraction_path);

    let demo_page = PageContext::new(DEMO_PAGE_PATH);
    let source = match request {
        PageRequest::Readings { page, window } => QuerySource::PageRelative {
            page,
            window: window::resolve(window, clock),
        },
        PageRequest::EnergyStats { page } => QuerySource::PageStats { page },
        PageRequest::Demo => QuerySource::PageRelative {
            page: &demo_page,
            window: window::resolve(WindowMode::Fixed(DEMO_WINDOW), clock),
        },
    };

    let target = query::resolve(source, extraction_path)?;
    let spec = chart::build(target, layout.axis, layout.panels, width)?;

    Ok(PageChart {
        target: RenderTarget::new(layout.mount_id),
        spec,
    })
}
