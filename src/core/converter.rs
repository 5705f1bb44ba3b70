//! Conversion state and reconciliation.
//!
//! [`Converter`] owns everything a conversion view needs: the amount as the
//! user typed it, the currency pair, the last known rate and the converted
//! amount. Mutations follow an optimistic-update scheme. Edits recompute
//! the converted amount immediately from the cached rate, and a later
//! authoritative fetch reconciles the result. The cached rate is
//! indicative only; `0.0` means no rate is known for the current pair.

use crate::core::currency::Currency;
use crate::core::rates::round2;

/// Which side of the pair an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

/// A snapshot taken when an authoritative refresh starts. Carrying the
/// sequence number and the inputs lets [`Converter::reconcile`] drop
/// results that no longer match the live state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshRequest {
    pub seq: u64,
    pub amount: f64,
    pub from: &'static Currency,
    pub to: &'static Currency,
}

#[derive(Debug)]
pub struct Converter {
    amount_text: String,
    from: &'static Currency,
    to: &'static Currency,
    rate: f64,
    converted: f64,
    swapping: bool,
    seq: u64,
}

impl Converter {
    pub fn new(amount: &str, from: &'static Currency, to: &'static Currency) -> Self {
        Self {
            amount_text: amount.to_string(),
            from,
            to,
            rate: 0.0,
            converted: 0.0,
            swapping: false,
            seq: 0,
        }
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn from(&self) -> &'static Currency {
        self.from
    }

    pub fn to(&self) -> &'static Currency {
        self.to
    }

    /// Last known rate for the pair, or `0.0` when none is known.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn converted(&self) -> f64 {
        self.converted
    }

    pub fn is_swapping(&self) -> bool {
        self.swapping
    }

    /// The amount text as a number, if it parses to a finite value.
    pub fn parsed_amount(&self) -> Option<f64> {
        self.amount_text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }

    /// Replaces the amount text and optimistically updates the converted
    /// amount. With a known rate and a parseable amount the output becomes
    /// `round2(amount * rate)`. Clearing the text zeroes the output. Any
    /// other unparseable text leaves the previous output on screen until a
    /// refresh reconciles it.
    pub fn set_amount(&mut self, text: &str) {
        self.amount_text = text.to_string();
        match self.parsed_amount() {
            Some(amount) if self.rate > 0.0 => self.converted = round2(amount * self.rate),
            _ if self.amount_text.is_empty() => self.converted = 0.0,
            _ => {}
        }
    }

    /// Replaces one side of the pair. The cached rate belongs to the old
    /// pair, so it is always reset to unknown, even when the new currency
    /// equals the old one. Callers are expected to refresh immediately.
    pub fn set_currency(&mut self, side: Side, currency: &'static Currency) {
        match side {
            Side::From => self.from = currency,
            Side::To => self.to = currency,
        }
        self.rate = 0.0;
    }

    /// Marks the start of a swap. Data is untouched until [`apply_swap`];
    /// callers own the delay between the two.
    ///
    /// [`apply_swap`]: Converter::apply_swap
    pub fn begin_swap(&mut self) {
        self.swapping = true;
    }

    /// Exchanges the two currencies and carries values across.
    ///
    /// With a known rate the previous output becomes the new input and the
    /// rate is inverted, so the new output is derived from the previous
    /// output rather than from whatever text was on screen. That keeps a
    /// swap meaningful while the text is mid-edit. Without a rate the two
    /// values are exchanged as they are, with unparseable text counting
    /// as zero.
    pub fn apply_swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        if self.rate > 0.0 {
            let new_rate = 1.0 / self.rate;
            let previous_output = self.converted;
            self.rate = new_rate;
            self.amount_text = format_amount(previous_output);
            self.converted = round2(previous_output * new_rate);
        } else {
            let fallback = self.parsed_amount().unwrap_or(0.0);
            self.amount_text = format_amount(self.converted);
            self.converted = fallback;
        }
    }

    /// Clears the swap marker once the caller's settle delay has passed.
    pub fn finish_swap(&mut self) {
        self.swapping = false;
    }

    /// Starts an authoritative refresh for the current inputs. Returns
    /// `None` when the amount is missing or not positive; there is nothing
    /// to fetch for those. Each call supersedes all earlier requests.
    pub fn begin_refresh(&mut self) -> Option<RefreshRequest> {
        let amount = self.parsed_amount().filter(|amount| *amount > 0.0)?;
        self.seq += 1;
        Some(RefreshRequest {
            seq: self.seq,
            amount,
            from: self.from,
            to: self.to,
        })
    }

    /// Applies an authoritative converted amount, if it is still fresh.
    ///
    /// A result is stale when a newer refresh started since, when either
    /// currency changed, or when the amount text no longer parses to the
    /// requested amount. Stale results are dropped and `false` is
    /// returned. Fresh results also re-derive the cached rate from the
    /// authoritative output, so later optimistic updates scale from it.
    pub fn reconcile(&mut self, request: &RefreshRequest, converted: f64) -> bool {
        let fresh = request.seq == self.seq
            && request.from.code == self.from.code
            && request.to.code == self.to.code
            && self.parsed_amount() == Some(request.amount);
        if !fresh {
            return false;
        }
        self.converted = converted;
        if request.amount > 0.0 {
            self.rate = converted / request.amount;
        }
        true
    }
}

/// Renders a value the way it would be typed back into the amount field,
/// shortest form that round-trips ("10", "155.5").
fn format_amount(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency;

    fn converter(amount: &str) -> Converter {
        Converter::new(
            amount,
            currency::find_or_default("USD"),
            currency::find_or_default("IDR"),
        )
    }

    /// Drives the converter to a known rate through a reconciled refresh.
    fn converter_with_rate(amount: &str, rate: f64) -> Converter {
        let mut c = converter(amount);
        let request = c.begin_refresh().unwrap();
        assert!(c.reconcile(&request, round2(request.amount * rate)));
        c
    }

    #[test]
    fn test_new_starts_with_unknown_rate() {
        let c = converter("1");
        assert_eq!(c.amount_text(), "1");
        assert_eq!(c.rate(), 0.0);
        assert_eq!(c.converted(), 0.0);
        assert!(!c.is_swapping());
    }

    #[test]
    fn test_set_amount_updates_optimistically_with_known_rate() {
        let mut c = converter_with_rate("10", 15800.0);
        c.set_amount("2.5");
        assert_eq!(c.converted(), 39500.0);
        c.set_amount("0.001");
        assert_eq!(c.converted(), 15.8);
    }

    #[test]
    fn test_set_amount_clearing_text_zeroes_output() {
        let mut c = converter_with_rate("10", 15800.0);
        assert_eq!(c.converted(), 158000.0);
        c.set_amount("");
        assert_eq!(c.converted(), 0.0);
        assert_eq!(c.amount_text(), "");
    }

    #[test]
    fn test_set_amount_unparseable_keeps_previous_output() {
        let mut c = converter_with_rate("10", 15800.0);
        c.set_amount("12..");
        assert_eq!(c.converted(), 158000.0);
        assert_eq!(c.amount_text(), "12..");
    }

    #[test]
    fn test_set_amount_without_rate_keeps_output() {
        let mut c = converter("10");
        c.set_amount("50");
        assert_eq!(c.converted(), 0.0);
        assert_eq!(c.rate(), 0.0);
    }

    #[test]
    fn test_set_currency_always_resets_rate() {
        let mut c = converter_with_rate("10", 15800.0);
        let eur = currency::find_or_default("EUR");
        c.set_currency(Side::To, eur);
        assert_eq!(c.rate(), 0.0);
        assert_eq!(c.to().code, "EUR");

        // selecting the currency already in place still resets
        let mut c = converter_with_rate("10", 15800.0);
        let idr = currency::find_or_default("IDR");
        c.set_currency(Side::To, idr);
        assert_eq!(c.rate(), 0.0);
    }

    #[test]
    fn test_swap_inverts_rate_and_carries_output_across() {
        let mut c = converter_with_rate("10", 15800.0);
        c.begin_swap();
        assert!(c.is_swapping());
        c.apply_swap();
        c.finish_swap();

        assert!(!c.is_swapping());
        assert_eq!(c.from().code, "IDR");
        assert_eq!(c.to().code, "USD");
        assert_eq!(c.amount_text(), "158000");
        assert!((c.rate() - 1.0 / 15800.0).abs() < 1e-12);
        assert_eq!(c.converted(), 10.0);
    }

    #[test]
    fn test_double_swap_restores_pair_and_rate() {
        let mut c = converter_with_rate("10", 15800.0);
        for _ in 0..2 {
            c.begin_swap();
            c.apply_swap();
            c.finish_swap();
        }
        assert_eq!(c.from().code, "USD");
        assert_eq!(c.to().code, "IDR");
        assert!((c.rate() - 15800.0).abs() < 1e-9);
    }

    #[test]
    fn test_swap_with_unknown_rate_exchanges_values() {
        let mut c = converter("50");
        c.begin_swap();
        c.apply_swap();
        c.finish_swap();

        assert_eq!(c.from().code, "IDR");
        assert_eq!(c.to().code, "USD");
        assert_eq!(c.amount_text(), "0");
        assert_eq!(c.converted(), 50.0);
        assert_eq!(c.rate(), 0.0);
    }

    #[test]
    fn test_swap_with_unparseable_text_uses_output_side() {
        let mut c = converter_with_rate("10", 15800.0);
        c.set_amount("12..");
        c.begin_swap();
        c.apply_swap();
        c.finish_swap();

        // derived from the previous output, not the garbage text
        assert_eq!(c.amount_text(), "158000");
        assert_eq!(c.converted(), 10.0);
    }

    #[test]
    fn test_begin_refresh_requires_positive_amount() {
        let mut c = converter("");
        assert!(c.begin_refresh().is_none());
        c.set_amount("0");
        assert!(c.begin_refresh().is_none());
        c.set_amount("-5");
        assert!(c.begin_refresh().is_none());
        c.set_amount("abc");
        assert!(c.begin_refresh().is_none());
        c.set_amount("10");
        assert!(c.begin_refresh().is_some());
    }

    #[test]
    fn test_reconcile_derives_rate_from_authoritative_output() {
        let mut c = converter("10");
        let request = c.begin_refresh().unwrap();
        assert!(c.reconcile(&request, 158000.0));
        assert_eq!(c.converted(), 158000.0);
        assert_eq!(c.rate(), 15800.0);

        // subsequent optimistic edits scale from the derived rate
        c.set_amount("2");
        assert_eq!(c.converted(), 31600.0);
    }

    #[test]
    fn test_reconcile_drops_superseded_request() {
        let mut c = converter("10");
        let first = c.begin_refresh().unwrap();
        let second = c.begin_refresh().unwrap();

        assert!(!c.reconcile(&first, 1.0));
        assert_eq!(c.converted(), 0.0);
        assert!(c.reconcile(&second, 158000.0));
        assert_eq!(c.converted(), 158000.0);
    }

    #[test]
    fn test_reconcile_drops_result_after_pair_change() {
        let mut c = converter("10");
        let request = c.begin_refresh().unwrap();
        c.set_currency(Side::To, currency::find_or_default("EUR"));

        assert!(!c.reconcile(&request, 158000.0));
        assert_eq!(c.rate(), 0.0);
        assert_eq!(c.converted(), 0.0);
    }

    #[test]
    fn test_reconcile_drops_result_after_amount_edit() {
        let mut c = converter("10");
        let request = c.begin_refresh().unwrap();
        c.set_amount("999");

        assert!(!c.reconcile(&request, 158000.0));
        assert_eq!(c.converted(), 0.0);
    }

    #[test]
    fn test_reconcile_drops_result_after_swap() {
        let mut c = converter("10");
        let request = c.begin_refresh().unwrap();
        c.begin_swap();
        c.apply_swap();
        c.finish_swap();

        assert!(!c.reconcile(&request, 158000.0));
    }

    #[test]
    fn test_reconcile_accepts_equivalent_amount_text() {
        let mut c = converter("10");
        let request = c.begin_refresh().unwrap();
        // same numeric value, different spelling
        c.set_amount("10.0");
        assert!(c.reconcile(&request, 158000.0));
    }

    #[test]
    fn test_format_amount_round_trips_short_values() {
        assert_eq!(format_amount(155.5), "155.5");
        assert_eq!(format_amount(10.0), "10");
        assert_eq!(format_amount(0.0), "0");
    }
}
