//! Multi-step forecast generation.
//!
//! [`ForecastSteps`] lazily yields one forecast observation per period ahead,
//! `h = 1..=horizon`. In [`ForecastMode::Recursive`] each forecast is shifted
//! into the inflation lags so later horizons build on earlier forecasts, and the
//! sentiment lags are refreshed with the last observed sentiment value (sentiment
//! is never forecast). In [`ForecastMode::Static`] every step reuses the initial
//! lag vectors, so the point forecast is flat while the band still widens.

use chrono::NaiveDate;

use crate::domain::{ForecastConfig, ForecastMode, InflationObservation, ModelParams, ObservationKind};
use crate::forecast::band::UncertaintyBand;
use crate::forecast::model::{ForecastBreakdown, LagModel};
use crate::math::LagVector;
use crate::series::{MergedPoint, add_months};

/// Lag vectors and anchor date taken from the end of the merged history.
#[derive(Debug, Clone, PartialEq)]
pub struct LagState {
    pub sentiment: LagVector,
    pub inflation: LagVector,
    /// Date of the last historical period.
    pub last_date: NaiveDate,
}

impl LagState {
    /// Build padded lag vectors from the tail of the merged history.
    ///
    /// Returns `None` for an empty history: there is no date to forecast from.
    pub fn from_history(history: &[MergedPoint], params: &ModelParams) -> Option<Self> {
        let last = history.last()?;
        let inflation: Vec<f64> = history.iter().map(|p| p.inflation).collect();
        let sentiment: Vec<f64> = history.iter().map(|p| p.sentiment).collect();
        Some(Self {
            sentiment: LagVector::from_series_tail(&sentiment, params.sentiment_lags(), params.fallback_sentiment),
            inflation: LagVector::from_series_tail(&inflation, params.inflation_lags(), params.fallback_inflation),
            last_date: last.date,
        })
    }
}

/// Lazy, finite sequence of forecast observations.
#[derive(Debug, Clone)]
pub struct ForecastSteps {
    model: LagModel,
    band: UncertaintyBand,
    mode: ForecastMode,
    step_months: u32,
    horizon: u32,
    next_h: u32,
    /// Last observed sentiment; held constant for every future period.
    frozen_sentiment: f64,
    sentiment: LagVector,
    inflation: LagVector,
    last_date: NaiveDate,
}

impl ForecastSteps {
    pub fn new(state: LagState, config: &ForecastConfig) -> Self {
        let frozen_sentiment = state
            .sentiment
            .latest()
            .unwrap_or(config.params.fallback_sentiment);
        Self {
            model: LagModel::new(&config.params),
            band: UncertaintyBand::new(&config.params),
            mode: config.mode,
            step_months: config.frequency.months(),
            horizon: u32::try_from(config.horizon).unwrap_or(u32::MAX),
            next_h: 1,
            frozen_sentiment,
            sentiment: state.sentiment,
            inflation: state.inflation,
            last_date: state.last_date,
        }
    }

    /// Breakdown of the step that `next()` would produce.
    pub fn peek_breakdown(&self) -> ForecastBreakdown {
        self.model.decompose(&self.sentiment, &self.inflation)
    }

    pub fn sentiment_lags(&self) -> &LagVector {
        &self.sentiment
    }

    pub fn inflation_lags(&self) -> &LagVector {
        &self.inflation
    }
}

impl Iterator for ForecastSteps {
    type Item = InflationObservation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_h > self.horizon {
            return None;
        }
        let h = self.next_h;

        // Past the end of the calendar there is no date to attach; stop.
        let date = add_months(self.last_date, self.step_months.checked_mul(h)?)?;

        if self.mode == ForecastMode::Recursive && h > 1 {
            self.sentiment.shift_in(self.frozen_sentiment);
        }

        let value = self.model.forecast(&self.sentiment, &self.inflation);

        if self.mode == ForecastMode::Recursive {
            self.inflation.shift_in(value);
        }

        let (lower, upper) = self.band.bounds(value, h);
        self.next_h += 1;

        Some(InflationObservation {
            date,
            value,
            kind: ObservationKind::Forecast,
            lower_bound: Some(lower),
            upper_bound: Some(upper),
            horizon: h,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.horizon.saturating_add(1).saturating_sub(self.next_h) as usize;
        (0, Some(remaining))
    }
}

/// Run all steps and collect them.
pub fn generate(state: LagState, config: &ForecastConfig) -> Vec<InflationObservation> {
    ForecastSteps::new(state, config).collect()
}
