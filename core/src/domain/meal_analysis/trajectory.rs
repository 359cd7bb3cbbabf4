use tracing::{error, trace};

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::{
        entities::{GlucoseCurve, GlucoseWindow},
        ports::GlucoseForecaster,
        value_objects::ForecastInput,
    },
};

/// Immutable snapshot of the predictor between two steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryState {
    pub step: usize,
    pub window: GlucoseWindow,
}

impl TrajectoryState {
    pub fn initial(window: GlucoseWindow) -> Self {
        Self { step: 0, window }
    }
}

/// One transition of the predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryStep {
    pub before: TrajectoryState,
    pub after: TrajectoryState,
    pub predicted: f64,
}

/// Autoregressive forecast: every prediction is fed back as the newest reading.
pub struct TrajectoryPredictor<'a, F: GlucoseForecaster> {
    forecaster: &'a F,
    steps: usize,
}

impl<'a, F: GlucoseForecaster> TrajectoryPredictor<'a, F> {
    pub fn new(forecaster: &'a F, steps: usize) -> Self {
        Self { forecaster, steps }
    }

    pub async fn step(
        &self,
        state: TrajectoryState,
        glycemic_load: f64,
    ) -> Result<TrajectoryStep, CoreError> {
        let input = ForecastInput::new(state.window, glycemic_load);
        let predicted = self.forecaster.forecast(input).await?;

        if !predicted.is_finite() {
            error!(step = state.step, "forecaster returned a non-finite value");
            return Err(CoreError::ForecastUnavailable(format!(
                "non-finite prediction at step {}",
                state.step
            )));
        }

        let after = TrajectoryState {
            step: state.step + 1,
            window: state.window.slide(predicted),
        };
        trace!(step = after.step, predicted, "trajectory step");

        Ok(TrajectoryStep {
            before: state,
            after,
            predicted,
        })
    }

    /// Runs exactly `steps` transitions and returns the predicted values; the
    /// final window is discarded.
    pub async fn predict(
        &self,
        initial: GlucoseWindow,
        glycemic_load: f64,
    ) -> Result<GlucoseCurve, CoreError> {
        let mut state = TrajectoryState::initial(initial);
        let mut values = Vec::with_capacity(self.steps);

        for _ in 0..self.steps {
            let step = self.step(state, glycemic_load).await?;
            values.push(step.predicted);
            state = step.after;
        }

        Ok(GlucoseCurve::new(values))
    }
}
