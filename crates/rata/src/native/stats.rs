//! `Stats`: descriptive statistics over numeric collections

use super::{expect_list, numbers, Invoke, NativeRegistry, NativeResult};
use crate::value::Value;

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("Stats", "mean", 1, |args, _| {
        sample(&args[0], "Stats.mean").map(|xs| Value::Float(mean(&xs)))
    });
    registry.register("Stats", "median", 1, stats_median);
    registry.register("Stats", "variance", 1, |args, _| {
        sample(&args[0], "Stats.variance").map(|xs| Value::Float(variance(&xs)))
    });
    registry.register("Stats", "stddev", 1, |args, _| {
        sample(&args[0], "Stats.stddev").map(|xs| Value::Float(variance(&xs).sqrt()))
    });
}

/// Numbers of a non-empty collection.
fn sample(value: &Value, what: &str) -> Result<Vec<f64>, String> {
    let xs = numbers(&expect_list(value, what)?, what)?;
    if xs.is_empty() {
        return Err(format!("{}: empty collection", what));
    }
    Ok(xs)
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population variance.
fn variance(xs: &[f64]) -> f64 {
    let m = mean(xs);
    xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64
}

fn stats_median(args: &[Value], _: &mut dyn Invoke) -> NativeResult {
    let mut xs = sample(&args[0], "Stats.median")?;
    xs.sort_by(f64::total_cmp);
    let mid = xs.len() / 2;
    let median = if xs.len() % 2 == 0 {
        (xs[mid - 1] + xs[mid]) / 2.0
    } else {
        xs[mid]
    };
    Ok(Value::Float(median))
}

#[cfg(test)]
mod tests {
    use super::super::testing::call;
    use super::*;

    fn data() -> Value {
        Value::vector(
            [2, 4, 4, 4, 5, 5, 7, 9]
                .iter()
                .copied()
                .map(Value::Int)
                .collect(),
        )
    }

    #[test]
    fn test_mean_variance_stddev() {
        assert_eq!(call("Stats", "mean", vec![data()]), Ok(Value::Float(5.0)));
        assert_eq!(call("Stats", "variance", vec![data()]), Ok(Value::Float(4.0)));
        assert_eq!(call("Stats", "stddev", vec![data()]), Ok(Value::Float(2.0)));
    }

    #[test]
    fn test_median() {
        assert_eq!(call("Stats", "median", vec![data()]), Ok(Value::Float(4.5)));
        assert_eq!(
            call("Stats", "median", vec![Value::Range(1, 3)]),
            Ok(Value::Float(2.0))
        );
    }

    #[test]
    fn test_empty_is_failure() {
        let err = call("Stats", "mean", vec![Value::vector(vec![])]).unwrap_err();
        assert_eq!(err, "Stats.mean: empty collection");
    }
}
