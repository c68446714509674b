//! Random extraction from stored values.
//!
//! - arrays yield a random element
//! - objects yield the value under a random key
//! - a number `n` yields an integer in `[0, n]` (`[n, 0]` when negative)
//! - booleans yield a random boolean
//! - anything else is read as text and yields a random line

use lazy_static::lazy_static;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use regex::Regex;
use serde_json::value::Value as JsonValue;

use crate::kind;

pub fn pick<R: Rng>(value: &JsonValue, rng: &mut R) -> Option<JsonValue> {
    match value {
        JsonValue::Array(arr) => arr.choose(rng).cloned(),
        JsonValue::Object(map) => map.values().choose(rng).cloned(),
        JsonValue::Number(n) => {
            let bound = n.as_f64()?.trunc() as i64;
            let (low, high) = if bound < 0 { (bound, 0) } else { (0, bound) };
            Some(JsonValue::from(rng.gen_range(low..=high)))
        }
        JsonValue::Bool(_) => Some(JsonValue::Bool(rng.gen_bool(0.5))),
        JsonValue::String(_) | JsonValue::Null => {
            let text = kind::to_text(value);
            random_line(&text, rng).map(JsonValue::from)
        }
    }
}

fn random_line<'a, R: Rng>(text: &'a str, rng: &mut R) -> Option<&'a str> {
    lazy_static! {
        static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
    }

    LINE_BREAK.split(text).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn array_picks_an_element() {
        let mut rng = rng();
        let value = json!(["a", "b", "c"]);
        for _ in 0..50 {
            let picked = pick(&value, &mut rng).unwrap();
            assert!(value.as_array().unwrap().contains(&picked));
        }
        assert_eq!(pick(&json!([]), &mut rng), None);
    }

    #[test]
    fn object_picks_a_value() {
        let mut rng = rng();
        let value = json!({"x": 1, "y": 2});
        for _ in 0..50 {
            let picked = pick(&value, &mut rng).unwrap();
            assert!(picked == json!(1) || picked == json!(2));
        }
        assert_eq!(pick(&json!({}), &mut rng), None);
    }

    #[test]
    fn number_is_an_inclusive_bound() {
        let mut rng = rng();
        let mut seen_bound = false;
        for _ in 0..200 {
            let picked = pick(&json!(3), &mut rng).unwrap().as_i64().unwrap();
            assert!((0..=3).contains(&picked));
            seen_bound |= picked == 3;
        }
        assert!(seen_bound);

        for _ in 0..50 {
            let picked = pick(&json!(-2), &mut rng).unwrap().as_i64().unwrap();
            assert!((-2..=0).contains(&picked));
        }
        assert_eq!(pick(&json!(0), &mut rng), Some(json!(0)));
    }

    #[test]
    fn boolean_picks_a_boolean() {
        let mut rng = rng();
        assert!(pick(&json!(true), &mut rng).unwrap().is_boolean());
    }

    #[test]
    fn text_picks_a_line() {
        let mut rng = rng();
        let value = json!("one\r\ntwo\rthree\nfour");
        for _ in 0..50 {
            let picked = pick(&value, &mut rng).unwrap();
            let picked = picked.as_str().unwrap();
            assert!(["one", "two", "three", "four"].contains(&picked));
        }
        assert_eq!(pick(&json!("single"), &mut rng), Some(json!("single")));
    }
}
