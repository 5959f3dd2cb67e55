use thiserror::Error;

/// 自动机构造与运行期间的错误。
///
/// 拒绝（`process` 返回 `Ok(false)`）不是错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// 转移引用了字母表之外的输入符号
    #[error("symbol '{}' not in alphabet", sym(.0))]
    InvalidSymbol(u8),
    /// PDA 转移引用了栈字母表之外的符号（栈顶或压栈符号）
    #[error("stack symbol '{}' not in stack alphabet", sym(.0))]
    InvalidStackSymbol(u8),
    /// 引用了从未注册的状态
    #[error("state '{0}' not in automaton")]
    UnknownState(String),
    /// 在设置初始状态之前调用了 `process`
    #[error("no initial state set")]
    NoInitialState,
    /// 空 motif 无法编译
    #[error("motif must not be empty")]
    EmptyMotif,
}

fn sym(b: &u8) -> char {
    char::from(*b)
}

pub type Result<T> = std::result::Result<T, AutomatonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render_symbols_as_chars() {
        assert_eq!(AutomatonError::InvalidSymbol(b'X').to_string(), "symbol 'X' not in alphabet");
        assert_eq!(
            AutomatonError::InvalidStackSymbol(b'#').to_string(),
            "stack symbol '#' not in stack alphabet"
        );
        assert_eq!(AutomatonError::UnknownState("q9".into()).to_string(), "state 'q9' not in automaton");
    }
}
