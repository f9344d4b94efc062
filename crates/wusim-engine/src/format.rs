//! ---
//! wusim_section: "02-simulation"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Fixed-width step formatting."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use wusim_common::{HarnessError, Result};

/// Fill character for [`pad_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    Space,
    Zero,
}

/// Number of decimal digits in `value` (`0` has one digit).
pub fn digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Right-align `step` in a field of `width` columns.
///
/// Steps with more digits than the field are rejected rather than widening
/// the field.
pub fn pad_step(step: u64, width: usize, padding: Padding) -> Result<String> {
    if digit_count(step) > width {
        return Err(HarnessError::StepOverflow { step, width });
    }
    Ok(match padding {
        Padding::Space => format!("{step:>width$}"),
        Padding::Zero => format!("{step:0>width$}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_counts() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(999_999), 6);
        assert_eq!(digit_count(1_000_000), 7);
        assert_eq!(digit_count(u64::MAX), 20);
    }

    #[test]
    fn space_padding_loses_one_column_per_digit() {
        assert_eq!(pad_step(4, 8, Padding::Space).unwrap(), "       4");
        assert_eq!(pad_step(42, 8, Padding::Space).unwrap(), "      42");
        assert_eq!(pad_step(420, 8, Padding::Space).unwrap(), "     420");
    }

    #[test]
    fn zero_padding_matches_output_suffixes() {
        assert_eq!(pad_step(5, 6, Padding::Zero).unwrap(), "000005");
        assert_eq!(pad_step(20_000, 6, Padding::Zero).unwrap(), "020000");
        assert_eq!(pad_step(999_999, 6, Padding::Zero).unwrap(), "999999");
    }

    #[test]
    fn overflow_is_an_error() {
        let err = pad_step(1_000_000, 6, Padding::Zero).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::StepOverflow {
                step: 1_000_000,
                width: 6
            }
        ));
    }
}
