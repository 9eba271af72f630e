use slog::{debug, info, Logger};
use std::sync::Arc;
use time::OffsetDateTime;

use crate::{
    join_series, render_forecast, render_live, render_uv, Board, CycleError, ForecastService,
    JsonFetcher, LiveObservationService, Locator, Normalizer, Settings, UvService,
};

/// The two refresh cycles: fetch, join, render. Records live only for the length of a cycle.
pub struct Pipeline {
    logger: Logger,
    locator: Arc<dyn Locator>,
    forecasts: ForecastService,
    uv: UvService,
    live: LiveObservationService,
    board: Arc<Board>,
    normalizer: Normalizer,
}

impl Pipeline {
    pub fn new(
        logger: Logger,
        settings: &Settings,
        fetcher: Arc<dyn JsonFetcher>,
        locator: Arc<dyn Locator>,
        board: Arc<Board>,
        normalizer: Normalizer,
    ) -> Self {
        Pipeline {
            forecasts: ForecastService::new(
                logger.clone(),
                fetcher.clone(),
                &settings.nws_url,
                settings.forecast_hours,
            ),
            uv: UvService::new(logger.clone(), fetcher.clone(), &settings.epa_url),
            live: LiveObservationService::new(
                logger.clone(),
                fetcher,
                settings.live_source.clone(),
                &settings.mesonet_url,
            ),
            logger,
            locator,
            board,
            normalizer,
        }
    }

    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    /// Forecast and UV are fetched side by side; the page is only touched once both arrived.
    pub async fn forecast_cycle(&self) -> Result<(), CycleError> {
        let coordinate = self.locator.locate().await?;
        debug!(self.logger, "refreshing forecast for {}", coordinate);

        let (hours, readings) = tokio::try_join!(
            self.forecasts.get_hours(&coordinate),
            self.uv.get_readings(&coordinate)
        )?;
        let joined = join_series(hours, &readings);
        let matched = joined.iter().filter(|hour| hour.uv.is_some()).count();
        info!(
            self.logger,
            "forecast refreshed: {} hours, {} with uv", joined.len(), matched
        );

        self.board
            .update(|page| {
                render_forecast(page, &joined);
                render_uv(page, &readings);
            })
            .await?;
        Ok(())
    }

    pub async fn live_cycle(&self) -> Result<(), CycleError> {
        let observation = self.live.latest().await?;
        let now = OffsetDateTime::now_utc();
        self.board
            .update(|page| render_live(page, &observation, now, &self.normalizer))
            .await?;
        Ok(())
    }
}
