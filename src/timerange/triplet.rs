//! Numeric component extraction for date and time parts

use super::RangeError;

/// Split `input` on `separator` into (coarse, middle, fine) component
/// strings. A single component fills only the fine slot, two fill middle
/// and fine, three fill everything; any other count is rejected.
pub(crate) fn split_components(
    input: &str,
    separator: char,
) -> Result<[Option<&str>; 3], RangeError> {
    let parts: Vec<&str> = input.split(separator).collect();

    match parts.as_slice() {
        [fine] => Ok([None, None, Some(fine)]),
        [middle, fine] => Ok([None, Some(middle), Some(fine)]),
        [coarse, middle, fine] => Ok([Some(coarse), Some(middle), Some(fine)]),
        _ => Err(RangeError::ComponentSplit {
            input: input.to_string(),
            separator,
        }),
    }
}

/// Up to three numeric components split out of a date or time string.
///
/// A single component fills only the finest slot (`15` as a time means 15
/// seconds; as a date, day 15). Two components fill the middle and fine
/// slots (`04:22` is minutes and seconds, `01/05` is month and day). The
/// fine slot parses as a real number so fractional seconds survive; the
/// others are integers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triplet {
    pub coarse: Option<i64>,
    pub middle: Option<i64>,
    pub fine: Option<f64>,
}

impl Triplet {
    /// A triplet with no components, used for absent date or time parts
    pub const EMPTY: Triplet = Triplet {
        coarse: None,
        middle: None,
        fine: None,
    };

    /// Split `input` on `separator` and parse the resulting components
    pub fn parse(input: &str, separator: char) -> Result<Self, RangeError> {
        let [coarse, middle, fine] = split_components(input, separator)?;

        Ok(Self {
            coarse: coarse.map(|v| parse_integer(v, input)).transpose()?,
            middle: middle.map(|v| parse_integer(v, input)).transpose()?,
            fine: fine.map(|v| parse_real(v, input)).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.coarse.is_none() && self.middle.is_none() && self.fine.is_none()
    }
}

pub(crate) fn parse_integer(value: &str, input: &str) -> Result<i64, RangeError> {
    value.parse().map_err(|_| RangeError::InvalidNumber {
        input: input.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn parse_real(value: &str, input: &str) -> Result<f64, RangeError> {
    value.parse().map_err(|_| RangeError::InvalidNumber {
        input: input.to_string(),
        value: value.to_string(),
    })
}
