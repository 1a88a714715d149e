//! Typed cell values and their ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// The value a row exposes for one column.
///
/// Values order naturally within a variant; across variants the order is
/// `Empty < Bool < numbers < Text < Date < DateTime`. `Int` and `Float`
/// compare numerically with each other, and floats use a total order so NaN
/// sorts deterministically.
#[derive(Debug, Clone, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Date(_) => 4,
            CellValue::DateTime(_) => 5,
        }
    }

    /// Check if the cell renders as the empty placeholder.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => cmp_int_float(*a, *b),
            (Float(a), Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Text(a), Text(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compare an integer with a float exactly.
///
/// Agrees with `f64::total_cmp`: negative NaN sorts below every number,
/// positive NaN above, and an integer zero sits above `-0.0`.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63; every f64 at or beyond it is outside the i64 range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() { Ordering::Greater } else { Ordering::Less };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    if float == 0.0 && float.is_sign_negative() {
        return if int >= 0 { Ordering::Greater } else { Ordering::Less };
    }
    let whole = float.trunc();
    // In range, so the cast is exact.
    int.cmp(&(whole as i64)).then_with(|| {
        let fraction = float - whole;
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            _ if self.is_empty() => f.write_str("-"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            CellValue::Empty => f.write_str("-"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(v: NaiveDateTime) -> Self {
        CellValue::DateTime(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_across_variants() {
        assert!(CellValue::Int(2) > CellValue::Float(1.5));
        assert!(CellValue::Float(2.5) > CellValue::Int(2));
        assert_eq!(CellValue::Int(3), CellValue::Float(3.0));
    }

    #[test]
    fn test_large_ints_compare_exactly_with_floats() {
        let big = 1i64 << 53;
        assert!(CellValue::Int(big + 1) > CellValue::Float(big as f64));
        assert!(CellValue::Float(big as f64) < CellValue::Int(big + 1));
        assert_eq!(CellValue::Int(big), CellValue::Float(big as f64));
        assert!(CellValue::Int(i64::MAX) < CellValue::Float(9.3e18));
        assert!(CellValue::Int(i64::MIN) == CellValue::Float(i64::MIN as f64));
        assert!(CellValue::Int(-1) > CellValue::Float(-1.5));
        assert!(CellValue::Int(0) > CellValue::Float(-0.5));

        let mut values = vec![
            CellValue::Int(big + 1),
            CellValue::Float(big as f64),
            CellValue::Int(big),
        ];
        values.sort();
        assert!(matches!(values[0], CellValue::Float(_)));
        assert!(matches!(values[1], CellValue::Int(v) if v == big));
        assert!(matches!(values[2], CellValue::Int(v) if v == big + 1));
    }

    #[test]
    fn test_int_float_order_matches_total_cmp_edges() {
        assert!(CellValue::Int(i64::MIN) > CellValue::Float(f64::NEG_INFINITY));
        assert!(CellValue::Int(i64::MAX) < CellValue::Float(f64::INFINITY));
        assert!(CellValue::Int(i64::MAX) < CellValue::Float(f64::NAN));
        assert!(CellValue::Int(i64::MIN) > CellValue::Float(-f64::NAN));
        // -0.0 < +0.0 under total_cmp, and Int(0) equals +0.0.
        assert!(CellValue::Int(0) > CellValue::Float(-0.0));
        assert_eq!(CellValue::Int(0), CellValue::Float(0.0));
    }

    #[test]
    fn test_variant_rank() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut values = vec![
            CellValue::Date(date),
            CellValue::Text("a".into()),
            CellValue::Int(1),
            CellValue::Empty,
            CellValue::Bool(true),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                CellValue::Empty,
                CellValue::Bool(true),
                CellValue::Int(1),
                CellValue::Text("a".into()),
                CellValue::Date(date),
            ]
        );
    }

    #[test]
    fn test_nan_is_ordered() {
        let nan = CellValue::Float(f64::NAN);
        assert_eq!(nan.cmp(&nan), Ordering::Equal);
        assert_ne!(nan.cmp(&CellValue::Float(1.0)), Ordering::Equal);
    }

    #[test]
    fn test_display_placeholder() {
        assert_eq!(CellValue::Empty.to_string(), "-");
        assert_eq!(CellValue::from("").to_string(), "-");
        assert_eq!(CellValue::from(None::<i64>).to_string(), "-");
        assert_eq!(CellValue::Int(0).to_string(), "0");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
    }
}
