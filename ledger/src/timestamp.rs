//! # Ledger Timestamps
//!
//! Block timestamps count microseconds since 1400-01-01 00:00:00 UTC — the
//! ledger's own epoch, inherited from its consensus core. These helpers
//! convert between that representation and [`chrono`] UTC datetimes.

use chrono::{DateTime, TimeZone, Utc};

/// Microseconds from the ledger epoch (1400-01-01T00:00:00Z) to the Unix
/// epoch: 208188 days.
const EPOCH_OFFSET_MICROS: i64 = 208_188 * 86_400 * 1_000_000;

/// Converts a ledger timestamp to a UTC datetime.
///
/// Returns `None` for values outside chrono's representable range.
pub fn stamp_to_time(stamp: u64) -> Option<DateTime<Utc>> {
    let unix_micros = i64::try_from(stamp).ok()?.checked_sub(EPOCH_OFFSET_MICROS)?;
    match Utc.timestamp_micros(unix_micros) {
        chrono::LocalResult::Single(t) => Some(t),
        _ => None,
    }
}

/// Converts a UTC datetime to a ledger timestamp.
///
/// Returns `None` for datetimes before the ledger epoch.
pub fn time_to_stamp(time: &DateTime<Utc>) -> Option<u64> {
    let micros = time.timestamp_micros().checked_add(EPOCH_OFFSET_MICROS)?;
    u64::try_from(micros).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Block timestamps observed on the live network.
    const VECTORS: &[(u64, &str)] = &[
        (19_502_164_800_000_000, "2017-Dec-31 12:00:00"),
        (19_527_035_308_000_000, "2018-Oct-15 08:28:28"),
        (19_527_035_428_000_000, "2018-Oct-15 08:30:28"),
        (19_527_219_262_000_000, "2018-Oct-17 11:34:22"),
    ];

    #[test]
    fn stamp_to_time_reference_vectors() {
        for (stamp, want) in VECTORS {
            let time = stamp_to_time(*stamp).expect("in range");
            assert_eq!(&time.format("%Y-%b-%d %H:%M:%S").to_string(), want);
        }
    }

    #[test]
    fn roundtrips_through_chrono() {
        for (stamp, _) in VECTORS {
            let time = stamp_to_time(*stamp).expect("in range");
            assert_eq!(time_to_stamp(&time), Some(*stamp));
        }
    }

    #[test]
    fn epoch_is_stamp_zero() {
        let epoch = stamp_to_time(0).expect("in range");
        assert_eq!(epoch.to_rfc3339(), "1400-01-01T00:00:00+00:00");
        assert_eq!(time_to_stamp(&epoch), Some(0));
    }

    #[test]
    fn pre_epoch_times_have_no_stamp() {
        let before = stamp_to_time(0).expect("in range") - chrono::Duration::microseconds(1);
        assert_eq!(time_to_stamp(&before), None);
    }
}
