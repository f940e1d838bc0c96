//! Price computation: early-bird windows and sibling discounts.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::Camp;

/// Price computation errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    /// The sibling discount ratio cannot be derived: the base price is
    /// zero while a sibling price and an early-bird price are both set.
    #[error("sibling discount ratio undefined: base price is zero")]
    SiblingRatioUndefined,
}

/// One camp's computed cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub cost: f64,
    /// Human-readable composition, e.g. `1 × 90.00 + 1 × 72.00 (sibling)`.
    pub detail: String,
    pub has_sibling_discount: bool,
    pub has_early_bird: bool,
}

/// Whether the early-bird price applies on `today`.
///
/// Requires both an early-bird price and a deadline. The deadline day
/// itself still qualifies; time of day is irrelevant.
#[must_use]
pub fn is_early_bird_active(camp: &Camp, today: NaiveDate) -> bool {
    match (camp.early_bird_price, camp.early_bird_deadline) {
        (Some(_), Some(deadline)) => today <= deadline,
        _ => false,
    }
}

/// The price the first attendee pays on `today`.
///
/// `None` when the camp has no base price yet. That outcome must reach
/// the caller; it never defaults to zero.
#[must_use]
pub fn effective_price(camp: &Camp, today: NaiveDate) -> Option<f64> {
    let base = camp.base_price?;
    if is_early_bird_active(camp, today) {
        return camp.early_bird_price;
    }
    Some(base)
}

/// The price each additional sibling pays on `today`.
///
/// Without a dedicated sibling price this equals [`effective_price`].
/// While early bird is active the sibling discount keeps its percentage
/// of the regular price: `early_bird_price * (sibling_price /
/// base_price)`, rather than stacking both discounts additively.
pub fn effective_sibling_price(
    camp: &Camp,
    today: NaiveDate,
) -> Result<Option<f64>, PricingError> {
    let Some(sibling) = camp.sibling_price else {
        return Ok(effective_price(camp, today));
    };

    match (camp.early_bird_price, camp.early_bird_deadline) {
        (Some(early), Some(deadline)) if today <= deadline => match camp.base_price {
            Some(base) => {
                // The ratio is non-finite exactly when the base is zero.
                let ratio = sibling / base;
                if ratio.is_finite() {
                    Ok(Some(early * ratio))
                } else {
                    Err(PricingError::SiblingRatioUndefined)
                }
            }
            None => Ok(None),
        },
        _ => Ok(Some(sibling)),
    }
}

/// Prices a camp for `attendee_count` attendees on `today`.
///
/// The first attendee pays the effective price; with a sibling price and
/// more than one attendee, every further attendee pays the sibling rate.
/// `Ok(None)` means the camp's price is still to be determined.
#[expect(
    clippy::cast_precision_loss,
    reason = "attendee counts are far below f64's integer range"
)]
pub fn quote(
    camp: &Camp,
    attendee_count: usize,
    today: NaiveDate,
) -> Result<Option<Quote>, PricingError> {
    let Some(price) = effective_price(camp, today) else {
        return Ok(None);
    };
    let has_early_bird = is_early_bird_active(camp, today);

    let quote = if camp.sibling_price.is_some() && attendee_count > 1 {
        let Some(sibling) = effective_sibling_price(camp, today)? else {
            return Ok(None);
        };
        let extra = attendee_count - 1;
        let mut detail = format!("1 × {price:.2} + {extra} × {sibling:.2} (sibling)");
        if has_early_bird {
            detail.push_str(" [Early Bird]");
        }
        Quote {
            cost: price + sibling * extra as f64,
            detail,
            has_sibling_discount: true,
            has_early_bird,
        }
    } else {
        let mut detail = format!("{attendee_count} × {price:.2}");
        if has_early_bird {
            detail.push_str(" [Early Bird]");
        }
        Quote {
            cost: price * attendee_count as f64,
            detail,
            has_sibling_discount: false,
            has_early_bird,
        }
    };

    Ok(Some(quote))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn priced(
        base: Option<f64>,
        sibling: Option<f64>,
        early: Option<f64>,
        deadline: Option<NaiveDate>,
    ) -> Camp {
        Camp {
            base_price: base,
            sibling_price: sibling,
            early_bird_price: early,
            early_bird_deadline: deadline,
            ..Camp::bare(1, date(2024, 7, 1))
        }
    }

    #[test]
    fn early_bird_needs_price_and_deadline() {
        let today = date(2024, 4, 1);
        let deadline = Some(date(2024, 5, 1));
        assert!(is_early_bird_active(
            &priced(Some(100.0), None, Some(90.0), deadline),
            today
        ));
        assert!(!is_early_bird_active(
            &priced(Some(100.0), None, Some(90.0), None),
            today
        ));
        assert!(!is_early_bird_active(
            &priced(Some(100.0), None, None, deadline),
            today
        ));
    }

    #[test]
    fn early_bird_deadline_is_inclusive() {
        let camp = priced(Some(100.0), None, Some(90.0), Some(date(2024, 5, 1)));
        assert_eq!(effective_price(&camp, date(2024, 5, 1)), Some(90.0));
        // The day after the deadline reverts to the base price.
        assert_eq!(effective_price(&camp, date(2024, 5, 2)), Some(100.0));
    }

    #[test]
    fn effective_price_none_without_base() {
        let camp = priced(None, Some(80.0), Some(90.0), Some(date(2024, 5, 1)));
        assert_eq!(effective_price(&camp, date(2024, 4, 1)), None);
    }

    #[test]
    fn sibling_price_falls_back_to_effective_price() {
        let camp = priced(Some(100.0), None, None, None);
        assert_eq!(
            effective_sibling_price(&camp, date(2024, 4, 1)).unwrap(),
            Some(100.0)
        );
    }

    #[test]
    fn sibling_price_scales_under_early_bird() {
        // Sibling ratio 0.8 of the base keeps 0.8 of the early-bird price.
        let camp = priced(
            Some(100.0),
            Some(80.0),
            Some(90.0),
            Some(date(2024, 5, 1)),
        );
        let sibling = effective_sibling_price(&camp, date(2024, 4, 1))
            .unwrap()
            .unwrap();
        assert!((sibling - 72.0).abs() < 1e-9);
    }

    #[test]
    fn zero_base_price_makes_ratio_undefined() {
        let camp = priced(Some(0.0), Some(80.0), Some(90.0), Some(date(2024, 5, 1)));
        assert_eq!(
            effective_sibling_price(&camp, date(2024, 4, 1)),
            Err(PricingError::SiblingRatioUndefined)
        );
        assert_eq!(
            quote(&camp, 2, date(2024, 4, 1)),
            Err(PricingError::SiblingRatioUndefined)
        );
    }

    #[test]
    fn quote_without_sibling_price_multiplies() {
        let camp = priced(Some(100.0), None, None, None);
        let q = quote(&camp, 3, date(2024, 4, 1)).unwrap().unwrap();
        assert!((q.cost - 300.0).abs() < 1e-9);
        assert_eq!(q.detail, "3 × 100.00");
        assert!(!q.has_sibling_discount);
        assert!(!q.has_early_bird);
    }

    #[test]
    fn quote_with_sibling_price_discounts_additional_attendees() {
        let camp = priced(Some(100.0), Some(80.0), None, None);
        let q = quote(&camp, 3, date(2024, 4, 1)).unwrap().unwrap();
        assert!((q.cost - 260.0).abs() < 1e-9);
        assert_eq!(q.detail, "1 × 100.00 + 2 × 80.00 (sibling)");
        assert!(q.has_sibling_discount);
        assert!(!q.has_early_bird);
    }

    #[test]
    fn quote_single_attendee_ignores_sibling_price() {
        let camp = priced(Some(100.0), Some(80.0), None, None);
        let q = quote(&camp, 1, date(2024, 4, 1)).unwrap().unwrap();
        assert!((q.cost - 100.0).abs() < 1e-9);
        assert_eq!(q.detail, "1 × 100.00");
        assert!(!q.has_sibling_discount);
    }

    #[test]
    fn quote_combines_early_bird_and_sibling_discount() {
        let camp = priced(
            Some(100.0),
            Some(80.0),
            Some(90.0),
            Some(date(2024, 5, 1)),
        );
        let q = quote(&camp, 2, date(2024, 4, 1)).unwrap().unwrap();
        assert!((q.cost - 162.0).abs() < 1e-9);
        assert_eq!(q.detail, "1 × 90.00 + 1 × 72.00 (sibling) [Early Bird]");
        assert!(q.has_sibling_discount);
        assert!(q.has_early_bird);
    }

    #[test]
    fn quote_flags_early_bird_without_sibling_branch() {
        let camp = priced(Some(100.0), None, Some(90.0), Some(date(2024, 5, 1)));
        let q = quote(&camp, 2, date(2024, 4, 1)).unwrap().unwrap();
        assert!((q.cost - 180.0).abs() < 1e-9);
        assert_eq!(q.detail, "2 × 90.00 [Early Bird]");
        assert!(q.has_early_bird);
    }

    #[test]
    fn quote_none_when_price_undetermined() {
        let camp = priced(None, None, None, None);
        assert_eq!(quote(&camp, 2, date(2024, 4, 1)), Ok(None));
    }
}
