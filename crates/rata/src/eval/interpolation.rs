//! f-string evaluation

use crate::ast::{InterpolatedString, StringPart};
use crate::context::Context;
use crate::value::Value;

use super::{ControlFlow, Evaluate, Evaluator};

impl Evaluate for InterpolatedString {
    fn eval(&self, ev: &mut Evaluator, ctx: &Context) -> Result<Value, ControlFlow> {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                StringPart::Literal(text) => out.push_str(text),
                // Strings embed raw; everything else uses its display form
                StringPart::Expr(expr) => out.push_str(&expr.eval(ev, ctx)?.to_string()),
            }
        }
        Ok(Value::string(out))
    }
}

#[cfg(test)]
mod tests {
    use crate::eval::testing::run;
    use crate::value::Value;

    #[test]
    fn test_interpolates_values() {
        assert_eq!(
            run("name = \"Ada\"\nf\"hi {name}, {1 + 2} {:ok} {[1, \"x\"]}\""),
            Ok(Value::string("hi Ada, 3 :ok [1, \"x\"]"))
        );
    }

    #[test]
    fn test_fault_inside_interpolation() {
        assert!(run("f\"{missing}\"").is_err());
    }
}
