//! Typed cell values produced by column accessors.

use std::cmp::Ordering;
use std::fmt;

/// A dynamic value extracted from a row by a column accessor.
///
/// The engine never inspects row types directly: accessors project each cell
/// into a `CellValue`, which gives the engine a total ordering for
/// client-mode sorting and a display form for substring filtering.
///
/// # Example
///
/// ```
/// use gridstate::value::CellValue;
///
/// let name = CellValue::from("Contoso");
/// let total = CellValue::from(1_000_000i64);
/// let active = CellValue::from(true);
/// let empty = CellValue::Empty;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell.
    Empty,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Text value.
    Text(String),
}

impl CellValue {
    /// Variant rank used when comparing across variants.
    ///
    /// Numbers share a rank so integers and floats compare numerically.
    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Total ordering over cell values.
    ///
    /// Same-variant values compare naturally, integers and floats compare
    /// numerically, and mixed variants fall back to a fixed variant order
    /// (`Empty < Bool < numbers < Text`) so sorting never panics on a
    /// heterogeneous column.
    pub fn compare(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Returns `true` if this is [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<u32> for CellValue {
    fn from(i: u32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<usize> for CellValue {
    fn from(i: usize) -> Self {
        CellValue::Int(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(opt: Option<V>) -> Self {
        opt.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_variant_ordering() {
        assert_eq!(
            CellValue::Int(1).compare(&CellValue::Int(2)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Text("b".into()).compare(&CellValue::Text("a".into())),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Bool(false).compare(&CellValue::Bool(true)),
            Ordering::Less
        );
    }

    #[test]
    fn numeric_cross_variant_ordering() {
        assert_eq!(
            CellValue::Int(2).compare(&CellValue::Float(2.5)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Float(3.0).compare(&CellValue::Int(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn empty_sorts_first() {
        assert_eq!(
            CellValue::Empty.compare(&CellValue::Text("a".into())),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Int(0).compare(&CellValue::Empty),
            Ordering::Greater
        );
    }

    #[test]
    fn display_forms() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Int(42).to_string(), "42");
        assert_eq!(CellValue::Text("hi".into()).to_string(), "hi");
    }

    #[test]
    fn option_conversion() {
        assert_eq!(CellValue::from(None::<i64>), CellValue::Empty);
        assert_eq!(CellValue::from(Some(7i64)), CellValue::Int(7));
    }
}
