//! Interactive conversion session.
//!
//! A small event loop over a terminal. Keystrokes, debounce fires, swap
//! phase ticks and completed refreshes all arrive as [`Event`]s on one
//! channel, so every state change happens on the loop task and the screen
//! is redrawn after each one. Amount edits update the converted value
//! optimistically and schedule a debounced refresh; currency changes
//! refresh immediately.

use anyhow::{Result, bail};
use console::{Key, Term};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::ui::{self, StyleType};
use crate::core::converter::{Converter, RefreshRequest, Side};
use crate::core::currency::{self, Currency};
use crate::core::debounce::Debouncer;
use crate::core::rates::MarketSummary;
use crate::core::refresh::{CONNECTIVITY_ERROR, RefreshEngine, RefreshOutcome};
use crate::core::trend::TrendPoint;
use crate::store::FavoritesStore;

/// Quiet period between the last amount edit and the refresh it triggers.
const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);
/// Delay between starting a swap and exchanging the currencies.
const SWAP_EXCHANGE_DELAY: Duration = Duration::from_millis(200);
/// Delay between the exchange and the end of the swap animation.
const SWAP_SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapPhase {
    Exchange,
    Settle,
}

enum Event {
    Key(Key),
    DebounceFired(u64),
    SwapTick(SwapPhase),
    RefreshDone(RefreshRequest, Result<RefreshOutcome>),
    InputClosed,
}

/// What the event loop should do after a keystroke.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    /// Amount changed; schedule a debounced refresh.
    EditAmount,
    /// Pair changed; refresh immediately.
    Refresh,
    /// Start the timed swap sequence.
    BeginSwap,
}

struct Session {
    converter: Converter,
    favorites: Vec<String>,
    trend: Vec<TrendPoint>,
    summary: Option<MarketSummary>,
    error: Option<&'static str>,
    loading: bool,
}

impl Session {
    fn new(
        amount: &str,
        from: &'static Currency,
        to: &'static Currency,
        favorites: Vec<String>,
    ) -> Self {
        Session {
            converter: Converter::new(amount, from, to),
            favorites,
            trend: Vec::new(),
            summary: None,
            error: None,
            loading: false,
        }
    }

    fn handle_key(&mut self, key: Key) -> Action {
        match key {
            Key::Char(c) if c.is_ascii_digit() || c == '.' => {
                let mut text = self.converter.amount_text().to_string();
                text.push(c);
                self.converter.set_amount(&text);
                Action::EditAmount
            }
            Key::Backspace => {
                let mut text = self.converter.amount_text().to_string();
                text.pop();
                self.converter.set_amount(&text);
                Action::EditAmount
            }
            Key::Char('c') => {
                self.converter.set_amount("");
                Action::EditAmount
            }
            Key::Char('s') if !self.converter.is_swapping() => {
                self.converter.begin_swap();
                Action::BeginSwap
            }
            Key::Char('f') => self.cycle_favorite(Side::From),
            Key::Char('t') => self.cycle_favorite(Side::To),
            Key::Char('r') if self.error.is_some() => {
                self.error = None;
                Action::Refresh
            }
            Key::Char('x') if self.error.is_some() => {
                self.error = None;
                Action::None
            }
            Key::Char('q') | Key::Char('\u{3}') | Key::Escape => Action::Quit,
            _ => Action::None,
        }
    }

    /// Moves one side of the pair to the next favorite, wrapping around.
    /// A currency outside the favorites list restarts at the first one.
    fn cycle_favorite(&mut self, side: Side) -> Action {
        if self.favorites.is_empty() {
            return Action::None;
        }
        let current = match side {
            Side::From => self.converter.from(),
            Side::To => self.converter.to(),
        };
        let next_index = self
            .favorites
            .iter()
            .position(|code| code == current.code)
            .map(|index| (index + 1) % self.favorites.len())
            .unwrap_or(0);
        let next = currency::find_or_default(&self.favorites[next_index]);
        self.converter.set_currency(side, next);
        Action::Refresh
    }

    fn start_refresh(
        &mut self,
        engine: &Arc<RefreshEngine>,
        events: &mpsc::UnboundedSender<Event>,
    ) {
        let Some(request) = self.converter.begin_refresh() else {
            // nothing to fetch for empty or non-positive amounts
            return;
        };
        self.loading = true;
        let engine = Arc::clone(engine);
        let events = events.clone();
        tokio::spawn(async move {
            let result = engine.refresh(&request).await;
            let _ = events.send(Event::RefreshDone(request, result));
        });
    }

    fn apply_refresh(&mut self, request: &RefreshRequest, result: Result<RefreshOutcome>) {
        self.loading = false;
        match result {
            Ok(outcome) => {
                if self.converter.reconcile(request, outcome.converted) {
                    self.trend = outcome.trend;
                    self.summary = Some(outcome.summary);
                    self.error = None;
                } else {
                    debug!(seq = request.seq, "Dropped stale refresh result");
                }
            }
            Err(e) => {
                debug!(error = %e, "Refresh failed");
                self.error = Some(CONNECTIVITY_ERROR);
            }
        }
    }
}

/// Runs the interactive session until the user quits.
pub async fn run(
    engine: Arc<RefreshEngine>,
    store: &FavoritesStore,
    amount: &str,
    from: &'static Currency,
    to: &'static Currency,
) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        bail!("Live mode requires an interactive terminal; try `kurs convert` instead");
    }

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    // Blocking key reader on its own thread, feeding the event loop.
    let key_events = events_tx.clone();
    let key_term = term.clone();
    std::thread::spawn(move || {
        loop {
            match key_term.read_key() {
                Ok(key) => {
                    if key_events.send(Event::Key(key)).is_err() {
                        break;
                    }
                }
                Err(_) => {
                    let _ = key_events.send(Event::InputClosed);
                    break;
                }
            }
        }
    });

    let mut session = Session::new(amount, from, to, store.load());
    let mut debouncer = Debouncer::new(DEBOUNCE_DELAY);

    term.hide_cursor()?;
    session.start_refresh(&engine, &events_tx);

    let loop_result = async {
        render(&term, &session)?;
        while let Some(event) = events_rx.recv().await {
            match event {
                Event::Key(key) => match session.handle_key(key) {
                    Action::Quit => break,
                    Action::EditAmount => {
                        let fired = events_tx.clone();
                        debouncer.arm(move |generation| {
                            let _ = fired.send(Event::DebounceFired(generation));
                        });
                    }
                    Action::Refresh => {
                        debouncer.cancel();
                        session.start_refresh(&engine, &events_tx);
                    }
                    Action::BeginSwap => {
                        schedule_swap_tick(&events_tx, SwapPhase::Exchange, SWAP_EXCHANGE_DELAY);
                    }
                    Action::None => {}
                },
                Event::DebounceFired(generation) => {
                    if debouncer.is_current(generation) {
                        session.start_refresh(&engine, &events_tx);
                    }
                }
                Event::SwapTick(SwapPhase::Exchange) => {
                    session.converter.apply_swap();
                    schedule_swap_tick(&events_tx, SwapPhase::Settle, SWAP_SETTLE_DELAY);
                }
                Event::SwapTick(SwapPhase::Settle) => {
                    session.converter.finish_swap();
                    debouncer.cancel();
                    session.start_refresh(&engine, &events_tx);
                }
                Event::RefreshDone(request, result) => {
                    session.apply_refresh(&request, result);
                }
                Event::InputClosed => break,
            }
            render(&term, &session)?;
        }
        Ok(())
    }
    .await;

    // restore the cursor even when a redraw failed mid-session
    term.show_cursor()?;
    term.write_line("")?;
    loop_result
}

fn schedule_swap_tick(events: &mpsc::UnboundedSender<Event>, phase: SwapPhase, delay: Duration) {
    let events = events.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = events.send(Event::SwapTick(phase));
    });
}

fn render(term: &Term, session: &Session) -> Result<()> {
    let mut lines: Vec<String> = Vec::new();

    let mut title = ui::style_text("Currency Converter", StyleType::Title);
    if session.loading {
        title.push(' ');
        title.push_str(&ui::style_text("updating...", StyleType::Subtle));
    }
    lines.push(title);
    lines.push(String::new());

    if let Some(error) = session.error {
        lines.push(ui::style_text(error, StyleType::Error));
        lines.push(ui::style_text("[r] retry  [x] dismiss", StyleType::Subtle));
        lines.push(String::new());
    }

    let from = session.converter.from();
    let to = session.converter.to();
    let amount = if session.converter.amount_text().is_empty() {
        ui::style_text("0.00", StyleType::Subtle)
    } else {
        session.converter.amount_text().to_string()
    };
    lines.push(format!(
        "You send     {} {}  {}",
        from.flag_emoji(),
        ui::style_text(from.code, StyleType::Label),
        ui::style_text(from.name, StyleType::Subtle)
    ));
    lines.push(format!("             {amount}"));
    lines.push(format!(
        "You receive  {} {}  {}",
        to.flag_emoji(),
        ui::style_text(to.code, StyleType::Label),
        ui::style_text(to.name, StyleType::Subtle)
    ));
    lines.push(format!(
        "             {}",
        ui::style_text(
            &format!("{:.2}", session.converter.converted()),
            StyleType::Value
        )
    ));
    lines.push(String::new());

    if session.converter.is_swapping() {
        lines.push(ui::style_text("swapping...", StyleType::Subtle));
    } else if session.converter.rate() > 0.0 {
        let rate = session.converter.rate();
        lines.push(format!("1 {} = {:.4} {}", from.code, rate, to.code));
    } else {
        lines.push(ui::style_text("Rate not loaded yet", StyleType::Subtle));
    }

    if !session.trend.is_empty() {
        let rates: Vec<f64> = session.trend.iter().map(|p| p.rate).collect();
        let first = &session.trend[0].label;
        let last = &session.trend[session.trend.len() - 1].label;
        lines.push(format!(
            "{}  {}",
            ui::sparkline(&rates),
            ui::style_text(&format!("{first} to {last}"), StyleType::Subtle)
        ));
    }
    if let Some(summary) = &session.summary {
        lines.push(ui::style_text(&summary.explanation, StyleType::Subtle));
    }

    lines.push(String::new());
    lines.push(ui::style_text(
        "[0-9.] amount  [backspace] erase  [c] clear  [s] swap  [f]/[t] cycle favorites  [q] quit",
        StyleType::Subtle,
    ));

    term.clear_screen()?;
    term.write_line(&lines.join("\n"))?;
    Ok(())
}
