use omics::{HeatmapMatrix, VolcanoFigure};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("figure contains non-finite values")]
    NonFinite,
    #[error("figure is empty")]
    Empty,
}

/// Something that can take a finished figure and show it.
pub trait ChartSink<F> {
    fn plot(&mut self, figure: F) -> Result<(), PlotError>;
}

/// Figures the egui surface knows how to validate before accepting.
pub trait Figure {
    fn check(&self) -> Result<(), PlotError>;
}

impl Figure for VolcanoFigure {
    fn check(&self) -> Result<(), PlotError> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(PlotError::NonFinite)
        }
    }
}

impl Figure for HeatmapMatrix {
    fn check(&self) -> Result<(), PlotError> {
        if self.rows() == 0 || self.cols() == 0 {
            return Err(PlotError::Empty);
        }
        if !self.is_finite() {
            return Err(PlotError::NonFinite);
        }
        Ok(())
    }
}

/// Holds the figure last accepted for drawing. The egui pass reads it back
/// each frame.
#[derive(Debug, Clone)]
pub struct PlotSurface<F> {
    current: Option<F>,
    redraws: usize,
}

impl<F> Default for PlotSurface<F> {
    fn default() -> Self {
        Self {
            current: None,
            redraws: 0,
        }
    }
}

impl<F> PlotSurface<F> {
    pub fn current(&self) -> Option<&F> {
        self.current.as_ref()
    }

    /// Number of figures accepted so far.
    pub fn redraws(&self) -> usize {
        self.redraws
    }
}

impl<F: Figure> ChartSink<F> for PlotSurface<F> {
    fn plot(&mut self, figure: F) -> Result<(), PlotError> {
        figure.check()?;
        self.current = Some(figure);
        self.redraws += 1;
        Ok(())
    }
}

/// Hand `figure` to `sink`, logging and dropping a rejection.
pub fn plot_or_log<F, S: ChartSink<F> + ?Sized>(sink: &mut S, figure: F, chart: &str) {
    if let Err(e) = sink.plot(figure) {
        tracing::debug!(chart, error = %e, "chart sink rejected figure");
    }
}
