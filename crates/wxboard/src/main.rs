use slog::{info, warn};
use std::sync::Arc;
use time::UtcOffset;
use tokio_util::sync::CancellationToken;
use wxboard::{
    create_folder, get_config_info, run_every, setup_logger, shutdown_signal, Board,
    FixedLocator, HtmlPage, HttpFetcher, Normalizer, Pipeline, Settings,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    // Only answers while this is the sole thread, so ask before the log drain starts its own.
    let local_offset = UtcOffset::current_local_offset().ok();

    let cli = get_config_info()?;
    let logger = setup_logger(&cli);
    let settings = Settings::try_from(cli)?;

    let offset = match settings.utc_offset.or(local_offset) {
        Some(offset) => offset,
        None => {
            warn!(logger, "could not determine the local utc offset, using UTC");
            UtcOffset::UTC
        }
    };
    let normalizer = Normalizer::new(offset);
    info!(logger, "showing observation times at utc offset {}", offset);
    if settings.coordinate.is_none() {
        warn!(logger, "no latitude/longitude set, the forecast will stay empty");
    }

    if let Some(parent) = settings.output.as_ref().and_then(|output| output.parent()) {
        create_folder(parent, &logger);
    }
    let page = HtmlPage::new("Weather").with_refresh(settings.live_interval.as_secs());
    let board = Arc::new(Board::new(logger.clone(), page, settings.output.clone()));
    let fetcher = Arc::new(HttpFetcher::new(
        logger.clone(),
        &settings.user_agent,
        settings.retries,
    )?);
    let locator = Arc::new(FixedLocator::new(settings.coordinate));
    let pipeline = Pipeline::new(
        logger.clone(),
        &settings,
        fetcher,
        locator,
        board,
        normalizer,
    );

    let pipeline = &pipeline;
    let shutdown = CancellationToken::new();
    tokio::join!(
        run_every(
            logger.clone(),
            "live",
            settings.live_interval,
            shutdown.clone(),
            move || pipeline.live_cycle(),
        ),
        run_every(
            logger.clone(),
            "forecast",
            settings.forecast_interval,
            shutdown.clone(),
            move || pipeline.forecast_cycle(),
        ),
        async {
            shutdown_signal(&logger).await;
            info!(logger, "shutting down");
            shutdown.cancel();
        },
    );
    Ok(())
}
