use crate::domain::{
    chart::{
        CandleGlyph, CandleRenderer, ChartOptions, ChartSurface, CoordinateMapper, SurfaceProvider,
        SurfaceSize,
    },
    errors::{ChartError, ChartResult, LifecycleError},
    logging::LogComponent,
    market_data::BarSequence,
};
use serde::Serialize;

/// What the surface currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderState {
    Unmounted,
    /// Mounted, showing the "No data available" placeholder
    NoData,
    /// Mounted, showing `bars` candles
    Chart { bars: usize },
}

struct MountedChart<S> {
    surface: S,
    options: ChartOptions,
    renderer: CandleRenderer,
    bars: BarSequence,
    mapper: CoordinateMapper,
    state: RenderState,
}

impl<S: ChartSurface> MountedChart<S> {
    /// Full repaint from the cached mapper.
    fn paint(&mut self) -> ChartResult<RenderState> {
        self.state = if self.bars.is_empty() {
            self.renderer.render_placeholder(&self.options.placeholder_text(), &mut self.surface)?;
            RenderState::NoData
        } else {
            let drawn = self.renderer.render(&self.bars, &self.mapper, &mut self.surface)?;
            RenderState::Chart { bars: drawn }
        };
        Ok(self.state)
    }
}

/// Owns the chart surface from `mount` to `unmount` and repaints it on every data or size change.
///
/// `Unmounted -> Mounted(no data) <-> Mounted(with data) -> Unmounted`. Every repaint is a full
/// pass, so replacing data never leaves glyphs from the previous sequence behind.
pub struct ChartLifecycleManager<P: SurfaceProvider> {
    provider: P,
    mounted: Option<MountedChart<P::Surface>>,
    mapper_builds: u64,
}

impl<P: SurfaceProvider> ChartLifecycleManager<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, mounted: None, mapper_builds: 0 }
    }

    pub fn mount(&mut self, container: &P::Container, options: ChartOptions) -> ChartResult<RenderState> {
        if self.mounted.is_some() {
            crate::log_error!(LogComponent::Application("ChartLifecycle"), "mount called while mounted");
            return Err(LifecycleError::AlreadyMounted.into());
        }

        let surface = self.provider.acquire(container, options.size()).map_err(|err| {
            crate::log_warn!(LogComponent::Application("ChartLifecycle"), "mount failed: {}", err);
            err
        })?;

        let bars = BarSequence::empty();
        let mapper = CoordinateMapper::new(&bars, surface.size(), options.insets);
        self.mapper_builds += 1;

        let mut chart = MountedChart {
            surface,
            renderer: CandleRenderer::new(options.style.clone()),
            options,
            bars,
            mapper,
            state: RenderState::NoData,
        };

        match chart.paint() {
            Ok(state) => {
                crate::log_info!(
                    LogComponent::Application("ChartLifecycle"),
                    "mounted {}x{} chart for '{}'",
                    chart.options.width,
                    chart.options.height,
                    chart.options.symbol
                );
                self.mounted = Some(chart);
                Ok(state)
            }
            Err(err) => {
                chart.surface.release();
                Err(err)
            }
        }
    }

    /// Replace the bound sequence wholesale and repaint.
    pub fn set_data(&mut self, bars: BarSequence) -> ChartResult<RenderState> {
        self.bind(None, bars)
    }

    /// Switch to `symbol` and its bars with a single repaint.
    pub fn load(&mut self, symbol: &str, bars: BarSequence) -> ChartResult<RenderState> {
        self.bind(Some(symbol), bars)
    }

    fn bind(&mut self, symbol: Option<&str>, bars: BarSequence) -> ChartResult<RenderState> {
        let chart = self.mounted.as_mut().ok_or(ChartError::Lifecycle(LifecycleError::NotMounted))?;
        if let Some(symbol) = symbol {
            chart.options.symbol = symbol.to_string();
        }
        chart.mapper = CoordinateMapper::new(&bars, chart.surface.size(), chart.options.insets);
        chart.bars = bars;
        self.mapper_builds += 1;

        crate::log_debug!(
            LogComponent::Application("ChartLifecycle"),
            "bound {} bars for '{}'",
            chart.bars.len(),
            chart.options.symbol
        );
        chart.paint()
    }

    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<RenderState> {
        let chart = self.mounted.as_mut().ok_or(ChartError::Lifecycle(LifecycleError::NotMounted))?;
        chart.surface.set_size(SurfaceSize::new(width, height));
        chart.options.width = width;
        chart.options.height = height;
        chart.mapper = CoordinateMapper::new(&chart.bars, chart.surface.size(), chart.options.insets);
        self.mapper_builds += 1;

        crate::log_debug!(LogComponent::Application("ChartLifecycle"), "resized to {}x{}", width, height);
        chart.paint()
    }

    /// Change the display label. Layout is unaffected; only the placeholder text changes.
    pub fn set_symbol(&mut self, symbol: &str) -> ChartResult<RenderState> {
        let chart = self.mounted.as_mut().ok_or(ChartError::Lifecycle(LifecycleError::NotMounted))?;
        chart.options.symbol = symbol.to_string();
        chart.paint()
    }

    /// Repaint with the current mapper, without recomputing it.
    pub fn redraw(&mut self) -> ChartResult<RenderState> {
        let chart = self.mounted.as_mut().ok_or(ChartError::Lifecycle(LifecycleError::NotMounted))?;
        chart.paint()
    }

    /// Release the surface. Calling it while unmounted is a no-op.
    pub fn unmount(&mut self) {
        if let Some(mut chart) = self.mounted.take() {
            chart.surface.release();
            crate::log_info!(
                LogComponent::Application("ChartLifecycle"),
                "unmounted chart for '{}'",
                chart.options.symbol
            );
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn render_state(&self) -> RenderState {
        self.mounted.as_ref().map(|chart| chart.state).unwrap_or(RenderState::Unmounted)
    }

    pub fn bars(&self) -> Option<&BarSequence> {
        self.mounted.as_ref().map(|chart| &chart.bars)
    }

    pub fn mapper(&self) -> Option<&CoordinateMapper> {
        self.mounted.as_ref().map(|chart| &chart.mapper)
    }

    pub fn options(&self) -> Option<&ChartOptions> {
        self.mounted.as_ref().map(|chart| &chart.options)
    }

    pub fn surface(&self) -> Option<&P::Surface> {
        self.mounted.as_ref().map(|chart| &chart.surface)
    }

    /// Glyph geometry of the current frame; empty while unmounted or without data.
    pub fn glyphs(&self) -> Vec<CandleGlyph> {
        self.mounted
            .as_ref()
            .map(|chart| chart.renderer.layout(&chart.bars, &chart.mapper))
            .unwrap_or_default()
    }

    /// Number of coordinate mappers built so far.
    pub fn mapper_builds(&self) -> u64 {
        self.mapper_builds
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: SurfaceProvider> Drop for ChartLifecycleManager<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}
