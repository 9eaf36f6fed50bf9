use std::sync::Arc;

use chrono::NaiveDate;
use dalal_core::{
    Capability, DalalConnector, DalalError, DateWindow, FetchStrategy, PriceSeries, RawSeries,
    SourceOutcome, StockData, Symbol, SymbolInfo, annotate, normalize_series,
};
use dalal_middleware::{CacheStore, keys};

use crate::Dalal;
use crate::core::HistoryStep;

type Winner = (RawSeries, Arc<dyn DalalConnector>);

fn today_utc() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

impl Dalal {
    /// Annotated price history plus company metadata for `symbol`.
    ///
    /// Behavior:
    /// - Both dates are clamped to today (UTC) and swapped if reversed.
    /// - A cache hit for the normalized window returns immediately.
    /// - Otherwise the fallback chain runs; the winning series is normalized,
    ///   annotated with indicators and cached.
    /// - Metadata comes from the winning connector when it has an info
    ///   capability. A failed or missing lookup leaves it empty and never
    ///   triggers fallback.
    ///
    /// # Errors
    /// - `DataUnavailable` when no step produced a usable series.
    /// - `MalformedUpstream` when the winning series has priced rows without dates.
    /// - `RequestTimeout` when the optional overall deadline elapsed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "dalal::router",
            skip(self),
            fields(symbol = %symbol),
        )
    )]
    pub async fn stock_data(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<StockData>, DalalError> {
        let window = DateWindow::normalized(start, end, today_utc());
        let key = keys::stock(symbol, &window);
        if let Some(hit) = self.stores.stock.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(%key, "stock data served from cache");
            return Ok(hit);
        }

        let (raw, winner) = self.run_chain(symbol, window).await?;
        let series = normalize_series(symbol, raw)?;
        let info = self.winner_info(&winner, symbol).await;
        let data = Arc::new(StockData {
            history: annotate(series, &self.cfg.indicators),
            info,
        });
        self.stores.stock.insert(key, Arc::clone(&data)).await;
        Ok(data)
    }

    /// Normalized price series for `symbol`, without indicators or caching.
    ///
    /// # Errors
    /// Same as [`Dalal::stock_data`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "dalal::router",
            skip(self),
            fields(symbol = %symbol),
        )
    )]
    pub async fn price_history(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DalalError> {
        let window = DateWindow::normalized(start, end, today_utc());
        let (raw, _) = self.run_chain(symbol, window).await?;
        normalize_series(symbol, raw)
    }

    async fn run_chain(&self, symbol: &Symbol, window: DateWindow) -> Result<Winner, DalalError> {
        let chain = async {
            let found = match self.cfg.fetch_strategy {
                FetchStrategy::Latency => self.latency_chain(symbol, window).await,
                _ => self.sequential_chain(symbol, window).await,
            };
            found.ok_or_else(|| DalalError::data_unavailable(format!("data for {symbol}")))
        };
        self.with_request_deadline(Capability::History, chain).await
    }

    async fn run_step(&self, step: &HistoryStep, symbol: &Symbol, window: DateWindow) -> SourceOutcome {
        let c = &step.connector;
        let Some(src) = c.as_history_source() else {
            return SourceOutcome::Failed(DalalError::unsupported(Capability::History.as_str()));
        };
        let window = window.adjusted(step.adjust);
        let fut = async { Ok(src.fetch(symbol, window).await) };
        Self::provider_call_with_timeout(
            c.name(),
            Capability::History,
            self.cfg.provider_timeout,
            fut,
        )
        .await
        .unwrap_or_else(SourceOutcome::Failed)
    }

    async fn sequential_chain(&self, symbol: &Symbol, window: DateWindow) -> Option<Winner> {
        for (idx, step) in self.chain.iter().enumerate() {
            let outcome = self.run_step(step, symbol, window).await;
            Self::log_outcome(idx, step, &outcome);
            if let Some(series) = outcome.into_usable() {
                return Some((series, Arc::clone(&step.connector)));
            }
        }
        None
    }

    /// Start every step at once and settle in priority order: a usable series
    /// at index `i` wins only after steps `0..i` have all come back unusable.
    async fn latency_chain(&self, symbol: &Symbol, window: DateWindow) -> Option<Winner> {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut futs: FuturesUnordered<_> = self
            .chain
            .iter()
            .enumerate()
            .map(|(idx, step)| async move { (idx, self.run_step(step, symbol, window).await) })
            .collect();

        let mut settled: Vec<Option<Option<RawSeries>>> = vec![None; self.chain.len()];
        let mut next = 0;
        while let Some((idx, outcome)) = futs.next().await {
            Self::log_outcome(idx, &self.chain[idx], &outcome);
            settled[idx] = Some(outcome.into_usable());
            while let Some(Some(slot)) = settled.get_mut(next) {
                if let Some(series) = slot.take() {
                    return Some((series, Arc::clone(&self.chain[next].connector)));
                }
                next += 1;
            }
        }
        None
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn log_outcome(idx: usize, step: &HistoryStep, outcome: &SourceOutcome) {
        #[cfg(feature = "tracing")]
        {
            let connector = step.connector.name();
            match outcome {
                o if o.is_usable() => {
                    tracing::info!(step = idx, connector, adjust = ?step.adjust, "history source won");
                }
                SourceOutcome::Failed(e) => {
                    tracing::warn!(step = idx, connector, error = %e, "history source failed");
                }
                _ => tracing::debug!(step = idx, connector, "history source had no usable rows"),
            }
        }
    }

    async fn winner_info(&self, c: &Arc<dyn DalalConnector>, symbol: &Symbol) -> SymbolInfo {
        let Some(p) = c.as_info_provider() else {
            return SymbolInfo::default();
        };
        match Self::provider_call_with_timeout(
            c.name(),
            Capability::Info,
            self.cfg.provider_timeout,
            p.info(symbol),
        )
        .await
        {
            Ok(info) => info,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(connector = c.name(), error = %_e, "info lookup failed; serving empty info");
                SymbolInfo::default()
            }
        }
    }
}
