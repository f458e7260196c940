/// Ways a calculation can fail after its arguments were parsed successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("{lhs} {symbol} {rhs} overflows")]
    Overflow {
        lhs: i64,
        symbol: char,
        rhs: i64,
    },
}
