use log::trace;
use parser::Expr;
use scanner::TokenType;

mod value;
pub use value::Value;

/// Tree-walking evaluator.
///
/// Evaluation can't fail: operands that don't fit an operator degrade to `nil`
/// (or to string concatenation for `+`) instead of raising an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    pub fn interpret(&self, exprs: &[Expr]) -> Vec<Value> {
        exprs.iter().map(|expr| self.evaluate(expr)).collect()
    }

    /// Recurses along the tree, trees from [`parser::Parser`] are at most
    /// [`parser::MAX_DEPTH`] high.
    pub fn evaluate(&self, expr: &Expr) -> Value {
        use Expr::*;
        let value: Value = match expr {
            Literal(literal) => (*literal).into(),

            Grouping(expr) => self.evaluate(expr),

            Unary { operator, right } => {
                let right = self.evaluate(right);
                match operator.ty {
                    TokenType::Minus => right.negate(),
                    TokenType::Bang => (!right.is_truthy()).into(),
                    _ => Value::Nil,
                }
            }

            Binary { left, operator, right } => {
                let left = self.evaluate(left);
                let right = self.evaluate(right);
                binary(operator.ty, left, right)
            }
        };

        trace!("{} => {:?}", expr, value);
        value
    }
}

fn binary(operator: TokenType, left: Value, right: Value) -> Value {
    use TokenType::*;

    match operator {
        EqualEqual => return left.equals(&right).into(),
        BangEqual => return (!left.equals(&right)).into(),
        _ => (),
    }

    match (left.as_number(), right.as_number(), operator) {
        (Some(l), Some(r), Plus) => (l + r).into(),
        (Some(l), Some(r), Minus) => (l - r).into(),
        (Some(l), Some(r), Star) => (l * r).into(),
        // Division by zero yields inf or NaN
        (Some(l), Some(r), Slash) => (l / r).into(),

        (Some(l), Some(r), Greater) => (l > r).into(),
        (Some(l), Some(r), GreaterEqual) => (l >= r).into(),
        (Some(l), Some(r), Less) => (l < r).into(),
        (Some(l), Some(r), LessEqual) => (l <= r).into(),

        (_, _, Plus) => Value::Str(left.text().into_owned() + &right.text()),

        _ => Value::Nil,
    }
}

#[cfg(test)]
mod tests {
    use parser::Parser;
    use pretty_assertions::assert_eq;
    use scanner::Scanner;

    use super::*;

    fn eval(source: &str) -> String {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        assert!(scan_errors.is_empty(), "{}", scan_errors);
        let expr = Parser::new(tokens).parse_expression().unwrap();
        Interpreter::new().evaluate(&expr).to_string()
    }

    #[test]
    fn literals() {
        assert_eq!(eval("true"), "true");
        assert_eq!(eval("nil"), "nil");
        assert_eq!(eval("\"hello world!\""), "hello world!");
        assert_eq!(eval("10.40"), "10.4");
        assert_eq!(eval("10"), "10");
        assert_eq!(eval("(\"grouped\")"), "grouped");
    }

    #[test]
    fn literal_evaluation_is_repeatable() {
        let (tokens, _) = Scanner::new("42.5").scan_tokens();
        let expr = Parser::new(tokens).parse_expression().unwrap();
        let interpreter = Interpreter::new();
        assert_eq!(interpreter.evaluate(&expr), interpreter.evaluate(&expr));
        assert_eq!(interpreter.evaluate(&expr), Value::Number(42.5));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval("(1 + 2) * 3"), "9");
        assert_eq!(eval("7 / 2"), "3.5");
        assert_eq!(eval("1.5 + 1.5"), "3");
        assert_eq!(eval("0.1 + 0.2"), "0.30000000000000004");
        assert_eq!(eval("20 - 4 - 6"), "10");
        assert_eq!(eval("-(-3 * 2)"), "6");
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval("10 / 0"), "inf");
        assert_eq!(eval("-10 / 0"), "-inf");
        assert_eq!(eval("0 / 0"), "NaN");
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(eval("\"foo\" + \"bar\""), "foobar");
        assert_eq!(eval("\"foo\" + 1"), "foo1.0");
        assert_eq!(eval("nil + true"), "niltrue");
        // Numeric text is used as a number
        assert_eq!(eval("\"1\" + 2"), "3");
    }

    #[test]
    fn non_numeric_operands_yield_nil() {
        assert_eq!(eval("\"a\" * 2"), "nil");
        assert_eq!(eval("true - 1"), "nil");
        assert_eq!(eval("nil / 2"), "nil");
        assert_eq!(eval("\"a\" < \"b\""), "nil");
    }

    #[test]
    fn comparison() {
        assert_eq!(eval("1 < 2"), "true");
        assert_eq!(eval("2 <= 1"), "false");
        assert_eq!(eval("3 > 3"), "false");
        assert_eq!(eval("3 >= 3"), "true");
        assert_eq!(eval("(1 + 1) > 1 == true"), "true");
    }

    #[test]
    fn equality() {
        assert_eq!(eval("1 == 1.0"), "true");
        assert_eq!(eval("\"1.0\" == 1"), "true");
        assert_eq!(eval("\"1\" == 1"), "false");
        assert_eq!(eval("nil == false"), "false");
        assert_eq!(eval("nil != false"), "true");
        assert_eq!(eval("\"foo\" == \"foo\""), "true");
    }

    #[test]
    fn unary() {
        assert_eq!(eval("!true"), "false");
        assert_eq!(eval("!nil"), "true");
        assert_eq!(eval("!0"), "false");
        assert_eq!(eval("!\"\""), "false");
        assert_eq!(eval("!!42"), "true");
        assert_eq!(eval("-5"), "-5");
        assert_eq!(eval("--1"), "1");
        assert_eq!(eval("-\"foo\""), "-foo");
        assert_eq!(eval("-true"), "-true");
    }

    #[test]
    fn deepest_tree() {
        let negated = format!("{}1", "-".repeat(parser::MAX_DEPTH));
        assert_eq!(eval(&negated), "-1");
    }

    #[test]
    fn interpret_keeps_source_order() {
        let (tokens, _) = Scanner::new("1 + 1 \"b\" nil").scan_tokens();
        let (exprs, errors) = Parser::new(tokens).parse();
        assert!(errors.is_empty());
        assert_eq!(
            Interpreter::new().interpret(&exprs),
            vec![Value::Number(2.0), Value::from("b"), Value::Nil]
        );
    }
}
