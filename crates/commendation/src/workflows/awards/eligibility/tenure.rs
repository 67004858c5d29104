use chrono::{Datelike, NaiveDate};
use tracing::warn;

use super::EligibilityError;
use crate::workflows::awards::domain::{CoefficientBand, PositionHistoryRecord};

/// Whole calendar months between two dates. A partial trailing month does
/// not count: 2020-01-15 to 2020-02-14 is zero months.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Result<u32, EligibilityError> {
    if end < start {
        return Err(EligibilityError::InvalidInterval { start, end });
    }

    let mut months =
        (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    if end.day() < start.day() {
        months -= 1;
    }

    Ok(months.max(0) as u32)
}

/// Month totals per qualifying band for one member.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BandedMonths {
    pub(crate) band09: u32,
    pub(crate) band08: u32,
    pub(crate) band07: u32,
}

/// Fold a member's history into per-band totals. Open-ended records run to
/// `today`. Overlapping intervals and out-of-band coefficients are warned
/// about but never abort: partial history still yields a best-effort answer.
pub(crate) fn accumulate(
    records: &[PositionHistoryRecord],
    today: NaiveDate,
) -> Result<BandedMonths, EligibilityError> {
    let mut totals = BandedMonths::default();
    let mut folded: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(records.len());

    for record in records {
        if let Some(end_date) = record.end_date {
            if end_date < record.start_date {
                return Err(EligibilityError::InvalidInterval {
                    start: record.start_date,
                    end: end_date,
                });
            }
        }

        let end = record.end_date.unwrap_or(today);
        let months = match record.months {
            Some(stored) => stored,
            None => months_between(record.start_date, end)?,
        };

        if folded
            .iter()
            .any(|(other_start, other_end)| record.start_date < *other_end && *other_start < end)
        {
            warn!(
                personnel = %record.personnel_id.0,
                start = %record.start_date,
                "overlapping position intervals; months summed literally"
            );
        }
        folded.push((record.start_date, end));

        match CoefficientBand::classify(record.coefficient) {
            Some(CoefficientBand::Band09To10) => totals.band09 += months,
            Some(CoefficientBand::Band08) => totals.band08 += months,
            Some(CoefficientBand::Band07) => totals.band07 += months,
            None => warn!(
                personnel = %record.personnel_id.0,
                coefficient = record.coefficient,
                "coefficient outside qualifying bands; record excluded"
            ),
        }
    }

    Ok(totals)
}
