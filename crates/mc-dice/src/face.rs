//! Face symbols

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// 2^63 as f64, first value above the i64 range
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// A single face of a die
///
/// Faces are atomic values used both as identity keys and as display values.
/// Numeric faces compare by value across variants, so `Int(1)` and
/// `Float(1.0)` are the same face. Every numeric face sorts before every
/// text face.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Face {
    /// Integer face (pips, card ranks, ...)
    Int(i64),
    /// Real-valued face
    Float(f64),
    /// Named face ("H", "T", "WILD", ...)
    Text(String),
}

impl Face {
    /// Create a text face
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Is this a number (integer or float)?
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    /// Numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(_) => None,
        }
    }

    /// Text value, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// NaN is not a usable face: it never equals itself in arithmetic
    pub(crate) fn is_nan(&self) -> bool {
        matches!(self, Self::Float(f) if f.is_nan())
    }

    /// Integral float within i64 range, hashed and compared like an Int
    fn integral_value(f: f64) -> Option<i64> {
        if f.is_finite() && f.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&f) {
            Some(f as i64)
        } else {
            None
        }
    }
}

/// Exact comparison of an integer against a float
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= I64_LIMIT {
        return Ordering::Less;
    }
    if f < -I64_LIMIT {
        return Ordering::Greater;
    }
    let floor = f.floor();
    match i.cmp(&(floor as i64)) {
        Ordering::Equal if f > floor => Ordering::Less,
        other => other,
    }
}

impl Ord for Face {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Int(a), Self::Float(b)) => cmp_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => cmp_int_float(*b, *a).reverse(),
            // 0.0 and -0.0 are one face
            (Self::Float(a), Self::Float(b)) if a == b => Ordering::Equal,
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Text(_), _) => Ordering::Greater,
            (_, Self::Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Face {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Face {}

impl Hash for Face {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Int(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            Self::Float(f) => match Self::integral_value(*f) {
                Some(i) => {
                    0u8.hash(state);
                    i.hash(state);
                }
                None => {
                    1u8.hash(state);
                    f.to_bits().hash(state);
                }
            },
            Self::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

macro_rules! face_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Face {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

face_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Face {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Face {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<&str> for Face {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Face {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<char> for Face {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

/// Collect anything face-like into a face list
pub fn faces<I, T>(values: I) -> Vec<Face>
where
    I: IntoIterator<Item = T>,
    T: Into<Face>,
{
    values.into_iter().map(Into::into).collect()
}

/// Render a face list as `{a, b, c}`
pub(crate) fn format_face_set(faces: &[Face]) -> String {
    let parts: Vec<String> = faces.iter().map(ToString::to_string).collect();
    format!("{{{}}}", parts.join(", "))
}
