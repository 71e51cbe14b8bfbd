// src/scalar.rs

use std::hash::{Hash, Hasher};

/// A single cell value from a loaded table: either a key component or the
/// value column. Inference tries the constructors in a fixed priority order
/// (integer, then float, then text), so `"50"` is always `Int(50)` and never
/// `Float(50.0)`.
#[derive(Debug, Clone)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Coerce a raw token to the most specific type that parses.
    /// Purely syntactic: the same token always yields the same scalar,
    /// regardless of which column it came from.
    pub fn infer(raw: &str) -> Scalar {
        if let Ok(i) = raw.parse::<i64>() {
            return Scalar::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Scalar::Float(f);
        }
        Scalar::Text(raw.to_string())
    }

    /// Keep the token as text, no coercion.
    pub fn text(raw: &str) -> Scalar {
        Scalar::Text(raw.to_string())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The float value, widening `Int` as well since rate columns are read
    /// as numbers either way.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

// Manual Eq/Hash so Scalar can key a HashMap: floats compare by bit
// pattern, which is exact for values that came from the same source text.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Int(i) => i.hash(state),
            Scalar::Float(f) => f.to_bits().hash(state),
            Scalar::Text(s) => s.hash(state),
        }
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::infer(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_wins_over_float() {
        assert_eq!(Scalar::infer("50"), Scalar::Int(50));
        assert_eq!(Scalar::infer("-3"), Scalar::Int(-3));
        assert_eq!(Scalar::infer("050"), Scalar::Int(50));
    }

    #[test]
    fn float_when_integer_fails() {
        assert_eq!(Scalar::infer("0.0123"), Scalar::Float(0.0123));
        assert_eq!(Scalar::infer("1e5"), Scalar::Float(1e5));
        assert_eq!(Scalar::infer("-0.5"), Scalar::Float(-0.5));
    }

    #[test]
    fn text_fallback() {
        assert_eq!(Scalar::infer("m"), Scalar::Text("m".into()));
        assert_eq!(Scalar::infer("abc1234"), Scalar::Text("abc1234".into()));
        assert_eq!(Scalar::infer(""), Scalar::Text("".into()));
    }

    #[test]
    fn inference_is_deterministic() {
        for token in ["50", "0.0123", "m", "2021-06"] {
            assert_eq!(Scalar::infer(token), Scalar::infer(token));
        }
    }

    #[test]
    fn discriminant_separates_equal_looking_values() {
        // Int(50) and Float(50.0) must never collide as keys
        assert_ne!(Scalar::Int(50), Scalar::Float(50.0));
        assert_ne!(Scalar::Int(50), Scalar::Text("50".into()));
    }

    #[test]
    fn accessors() {
        assert_eq!(Scalar::infer("50").as_i64(), Some(50));
        assert_eq!(Scalar::infer("0.5").as_f64(), Some(0.5));
        assert_eq!(Scalar::infer("50").as_f64(), Some(50.0));
        assert_eq!(Scalar::infer("m").as_str(), Some("m"));
        assert_eq!(Scalar::infer("m").as_i64(), None);
    }
}
