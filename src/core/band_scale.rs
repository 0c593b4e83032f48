use crate::error::{ChartError, ChartResult};

/// Categorical scale splitting a pixel range into equal, padded bands.
///
/// Bands are addressed by domain position rather than by label, so two
/// categories sharing a label (two dates in one month) still get their own
/// band and the left-to-right order is exactly the domain order.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    labels: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    bandwidth: f64,
    first_band_start: f64,
}

impl BandScale {
    /// Builds a scale with equal inner and outer padding and centered bands.
    pub fn new(labels: Vec<String>, range: (f64, f64), padding: f64) -> ChartResult<Self> {
        Self::with_padding(labels, range, padding, padding, 0.5)
    }

    pub fn with_padding(
        labels: Vec<String>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
        align: f64,
    ) -> ChartResult<Self> {
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }
        if !padding_inner.is_finite() || !(0.0..=1.0).contains(&padding_inner) {
            return Err(ChartError::InvalidData(
                "band inner padding must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !padding_outer.is_finite() || padding_outer < 0.0 {
            return Err(ChartError::InvalidData(
                "band outer padding must be finite and >= 0".to_owned(),
            ));
        }
        if !align.is_finite() || !(0.0..=1.0).contains(&align) {
            return Err(ChartError::InvalidData(
                "band align must be finite and in [0, 1]".to_owned(),
            ));
        }

        let mut scale = Self {
            labels,
            range_start,
            range_end,
            padding_inner,
            padding_outer,
            align,
            step: 0.0,
            bandwidth: 0.0,
            first_band_start: range_start,
        };
        scale.rescale();
        Ok(scale)
    }

    fn rescale(&mut self) {
        let count = self.labels.len() as f64;
        let (low, high) = if self.range_end < self.range_start {
            (self.range_end, self.range_start)
        } else {
            (self.range_start, self.range_end)
        };
        let span = high - low;

        self.step = span / (count - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.bandwidth = self.step * (1.0 - self.padding_inner);
        self.first_band_start =
            low + (span - self.step * (count - self.padding_inner)) * self.align;
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Left edge of the band at `index`, or `None` past the domain.
    #[must_use]
    pub fn band_start(&self, index: usize) -> Option<f64> {
        let count = self.labels.len();
        if index >= count {
            return None;
        }
        // A reversed range lays the domain out right to left.
        let position = if self.range_end < self.range_start {
            count - 1 - index
        } else {
            index
        };
        Some(self.first_band_start + self.step * position as f64)
    }

    #[must_use]
    pub fn band_center(&self, index: usize) -> Option<f64> {
        self.band_start(index)
            .map(|start| start + self.bandwidth * 0.5)
    }
}
